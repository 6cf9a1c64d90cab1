//! File I/O for the ERGM engine: Pajek arc-list graphs, attribute tables,
//! and the `key = value` run-configuration format. `ergm-core` has no
//! knowledge of any of this; this crate is the "external collaborator" that
//! turns files on disk into the plain data `ergm-core` operates on.

mod attributes;
mod config;
mod errors;
mod pajek;

pub use attributes::{
    read_binary_attribute, read_categorical_attribute, read_continuous_attribute,
    read_set_attribute, read_zone_file,
};
pub use config::parse as parse_config;
pub use errors::{AttributeError, ConfigError, PajekError};
pub use pajek::{read_pajek, write_pajek};
