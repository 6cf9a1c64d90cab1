//! Parses the `key = value` configuration file format into a
//! [`RunConfig`](ergm_core::RunConfig): case-insensitive keys, `#` line
//! comments, blank lines ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ergm_core::{RunConfig, RunMode, SamplerChoice, StatError, StatKind, StatSelection, TwoPathBackendChoice};

use crate::errors::ConfigError;

struct RawEntry {
    line: usize,
    value: String,
}

const KNOWN_KEYS: &[&str] = &[
    "mode",
    "useifdsampler",
    "usetntsampler",
    "twopathbackend",
    "arclistfile",
    "structparams",
    "attrparams",
    "dyadicparams",
    "attrinteractionparams",
    "ifd_k",
    "ifdtargetdensity",
    "aca_s",
    "aca_ee",
    "compc",
    "samplersteps",
    "ssteps",
    "eesteps",
    "eeinnersteps",
    "binattrfile",
    "catattrfile",
    "contattrfile",
    "setattrfile",
    "zonefile",
    "useconditionalestimation",
    "forbidreciprocity",
    "allowloops",
    "thetafileprefix",
    "dzafileprefix",
    "statsfile",
    "simnetfileprefix",
    "numnodes",
    "samplesize",
    "interval",
    "burnin",
    "outputsimulatednetworks",
    "baseseed",
];

/// Parses a `key = value` configuration file into a [`RunConfig`].
///
/// # Errors
/// Returns [`ConfigError`] if the file cannot be opened or read, a
/// non-comment line is not a `key = value` pair, a key is unrecognized, a
/// required key is missing, `useIFDsampler` and `useTNTsampler` are both
/// set, a value cannot be parsed as the type its key requires, or a
/// statistic list names an unknown statistic.
pub fn parse(path: &Path) -> Result<RunConfig, ConfigError> {
    let entries = read_entries(path)?;
    build_config(&entries)
}

fn read_entries(path: &Path) -> Result<HashMap<String, RawEntry>, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut entries = HashMap::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let line_no = line_no + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (key, value) = trimmed.split_once('=').ok_or_else(|| ConfigError::MalformedLine {
            line: line_no,
            text: trimmed.to_owned(),
        })?;
        let raw_key = key.trim().to_owned();
        let key = raw_key.to_ascii_lowercase();
        if !KNOWN_KEYS.contains(&key.as_str()) {
            return Err(ConfigError::UnknownKey {
                line: line_no,
                key: raw_key,
            });
        }
        let value = value.trim().to_owned();
        entries.insert(
            key,
            RawEntry {
                line: line_no,
                value,
            },
        );
    }
    Ok(entries)
}

fn build_config(entries: &HashMap<String, RawEntry>) -> Result<RunConfig, ConfigError> {
    let mode = match get_str(entries, "mode") {
        Some(value) if value.eq_ignore_ascii_case("simulate") => RunMode::Simulate,
        Some(value) if value.eq_ignore_ascii_case("estimate") => RunMode::Estimate,
        Some(_) => return Err(invalid_value(entries, "mode")),
        None => RunMode::Estimate,
    };

    let use_ifd = get_bool(entries, "useifdsampler")?.unwrap_or(false);
    let use_tnt = get_bool(entries, "usetntsampler")?.unwrap_or(false);
    if use_ifd && use_tnt {
        return Err(ConfigError::ContradictorySamplerFlags);
    }
    let sampler = if use_ifd {
        SamplerChoice::Ifd
    } else if use_tnt {
        SamplerChoice::Tnt
    } else {
        SamplerChoice::Basic
    };

    let two_path_backend = match get_str(entries, "twopathbackend") {
        Some(value) if value.eq_ignore_ascii_case("sparse") => TwoPathBackendChoice::Sparse,
        Some(value) if value.eq_ignore_ascii_case("disabled") => TwoPathBackendChoice::Disabled,
        Some(value) if value.eq_ignore_ascii_case("dense") => TwoPathBackendChoice::Dense,
        Some(_) => return Err(invalid_value(entries, "twoPathBackend")),
        None => TwoPathBackendChoice::Dense,
    };

    let arclist_file = match get_path(entries, "arclistfile") {
        Some(path) => path,
        None if matches!(mode, RunMode::Estimate) => {
            return Err(ConfigError::MissingRequiredKey {
                key: "arclistFile",
            })
        }
        None => PathBuf::new(),
    };

    let struct_params = parse_stat_list(entries, "structparams", parse_statistic_token)?;
    let attr_params = parse_stat_list(entries, "attrparams", parse_statistic_token)?;
    let dyadic_params = parse_stat_list(entries, "dyadicparams", parse_statistic_token)?;
    let interaction_params = parse_stat_list(entries, "attrinteractionparams", parse_interaction_token)?;
    let selection = StatSelection::new(
        struct_params
            .into_iter()
            .chain(attr_params)
            .chain(dyadic_params)
            .chain(interaction_params)
            .collect(),
    );

    Ok(RunConfig {
        mode,
        sampler,
        two_path_backend,
        ifd_k: get_f64(entries, "ifd_k")?.unwrap_or(0.0),
        ifd_target_density: get_f64(entries, "ifdtargetdensity")?.unwrap_or(0.0),
        aca_s: get_f64(entries, "aca_s")?.unwrap_or(0.0),
        aca_ee: get_f64(entries, "aca_ee")?.unwrap_or(0.0),
        comp_c: get_f64(entries, "compc")?.unwrap_or(0.0),
        sampler_steps: get_usize(entries, "samplersteps")?.unwrap_or(0),
        s_steps: get_usize(entries, "ssteps")?.unwrap_or(0),
        ee_steps: get_usize(entries, "eesteps")?.unwrap_or(0),
        ee_inner_steps: get_usize(entries, "eeinnersteps")?.unwrap_or(0),
        arclist_file,
        binattr_file: get_path(entries, "binattrfile"),
        catattr_file: get_path(entries, "catattrfile"),
        contattr_file: get_path(entries, "contattrfile"),
        setattr_file: get_path(entries, "setattrfile"),
        zone_file: get_path(entries, "zonefile"),
        use_conditional_estimation: get_bool(entries, "useconditionalestimation")?.unwrap_or(false),
        forbid_reciprocity: get_bool(entries, "forbidreciprocity")?.unwrap_or(false),
        allow_loops: get_bool(entries, "allowloops")?.unwrap_or(false),
        selection,
        theta_file_prefix: get_path(entries, "thetafileprefix"),
        dz_a_file_prefix: get_path(entries, "dzafileprefix"),
        stats_file: get_path(entries, "statsfile"),
        sim_net_file_prefix: get_path(entries, "simnetfileprefix"),
        num_nodes: get_usize(entries, "numnodes")?.unwrap_or(0),
        sample_size: get_usize(entries, "samplesize")?.unwrap_or(0),
        interval: get_usize(entries, "interval")?.unwrap_or(0),
        burnin: get_usize(entries, "burnin")?.unwrap_or(0),
        output_simulated_networks: get_bool(entries, "outputsimulatednetworks")?.unwrap_or(false),
        base_seed: get_u64(entries, "baseseed")?.unwrap_or(0),
    })
}

fn get_str<'a>(entries: &'a HashMap<String, RawEntry>, key: &str) -> Option<&'a str> {
    entries.get(key).map(|entry| entry.value.as_str())
}

fn get_path(entries: &HashMap<String, RawEntry>, key: &str) -> Option<PathBuf> {
    get_str(entries, key).map(PathBuf::from)
}

fn get_bool(entries: &HashMap<String, RawEntry>, key: &'static str) -> Result<Option<bool>, ConfigError> {
    let Some(entry) = entries.get(key) else {
        return Ok(None);
    };
    match entry.value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue {
            line: entry.line,
            key,
            value: entry.value.clone(),
        }),
    }
}

fn get_f64(entries: &HashMap<String, RawEntry>, key: &'static str) -> Result<Option<f64>, ConfigError> {
    let Some(entry) = entries.get(key) else {
        return Ok(None);
    };
    entry
        .value
        .parse::<f64>()
        .map(Some)
        .map_err(|_source| ConfigError::InvalidValue {
            line: entry.line,
            key,
            value: entry.value.clone(),
        })
}

fn get_usize(entries: &HashMap<String, RawEntry>, key: &'static str) -> Result<Option<usize>, ConfigError> {
    let Some(entry) = entries.get(key) else {
        return Ok(None);
    };
    entry
        .value
        .parse::<usize>()
        .map(Some)
        .map_err(|_source| ConfigError::InvalidValue {
            line: entry.line,
            key,
            value: entry.value.clone(),
        })
}

fn get_u64(entries: &HashMap<String, RawEntry>, key: &'static str) -> Result<Option<u64>, ConfigError> {
    let Some(entry) = entries.get(key) else {
        return Ok(None);
    };
    entry
        .value
        .parse::<u64>()
        .map(Some)
        .map_err(|_source| ConfigError::InvalidValue {
            line: entry.line,
            key,
            value: entry.value.clone(),
        })
}

fn invalid_value(entries: &HashMap<String, RawEntry>, key: &'static str) -> ConfigError {
    let lookup = key.to_ascii_lowercase();
    let entry = entries.get(&lookup);
    ConfigError::InvalidValue {
        line: entry.map_or(0, |entry| entry.line),
        key,
        value: entry.map_or_else(String::new, |entry| entry.value.clone()),
    }
}

fn parse_stat_list(
    entries: &HashMap<String, RawEntry>,
    key: &str,
    parser: impl Fn(&str) -> Result<StatKind, ConfigError>,
) -> Result<Vec<StatKind>, ConfigError> {
    let Some(value) = get_str(entries, key) else {
        return Ok(Vec::new());
    };
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parser)
        .collect()
}

/// Parses one `structParams`/`attrParams`/`dyadicParams` token, in the same
/// `Name` or `Name(arg)` textual form as [`StatKind::name`].
fn parse_statistic_token(token: &str) -> Result<StatKind, ConfigError> {
    let (name, args) = split_name_args(token)?;

    let lambda = || parse_lambda(token, args);
    let attribute = || require_arg(token, args).map(str::to_owned);

    Ok(match name {
        "Arc" => StatKind::Arc,
        "Reciprocity" => StatKind::Reciprocity,
        "AltKStarsOut" => StatKind::AlternatingKStarsOut { lambda: lambda()? },
        "AltKStarsIn" => StatKind::AlternatingKStarsIn { lambda: lambda()? },
        "AltKTrianglesT" => StatKind::AlternatingKTrianglesT { lambda: lambda()? },
        "AltKTrianglesC" => StatKind::AlternatingKTrianglesC { lambda: lambda()? },
        "AltKTrianglesD" => StatKind::AlternatingKTrianglesD { lambda: lambda()? },
        "AltKTrianglesU" => StatKind::AlternatingKTrianglesU { lambda: lambda()? },
        "AltTwoPathsMixed" => StatKind::AlternatingTwoPathsMixed { lambda: lambda()? },
        "AltTwoPathsDown" => StatKind::AlternatingTwoPathsDown { lambda: lambda()? },
        "AltTwoPathsUp" => StatKind::AlternatingTwoPathsUp { lambda: lambda()? },
        "Sender" => StatKind::Sender {
            attribute: attribute()?,
        },
        "Receiver" => StatKind::Receiver {
            attribute: attribute()?,
        },
        "Matching" => StatKind::Matching {
            attribute: attribute()?,
        },
        "MatchingReciprocity" => StatKind::MatchingReciprocity {
            attribute: attribute()?,
        },
        "ContinuousDifference" => StatKind::ContinuousDifference {
            attribute: attribute()?,
        },
        "DyadicCovariate" => StatKind::DyadicCovariate {
            covariate_id: attribute()?,
        },
        _ => return Err(unknown_statistic(token)),
    })
}

/// Parses one `attrInteractionParams` token, of the form
/// `Interaction(left*right)` where `left`/`right` name two other selected
/// statistics.
fn parse_interaction_token(token: &str) -> Result<StatKind, ConfigError> {
    let (name, args) = split_name_args(token)?;
    if name != "Interaction" {
        return Err(unknown_statistic(token));
    }
    let inner = require_arg(token, args)?;
    let (left, right) = inner.split_once('*').ok_or_else(|| unknown_statistic(token))?;
    Ok(StatKind::AttributeInteraction {
        left: left.trim().to_owned(),
        right: right.trim().to_owned(),
    })
}

fn split_name_args(token: &str) -> Result<(&str, Option<&str>), ConfigError> {
    let Some(open) = token.find('(') else {
        return Ok((token, None));
    };
    let close = token
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| unknown_statistic(token))?;
    Ok((&token[..open], Some(&token[open + 1..close])))
}

fn parse_lambda(token: &str, args: Option<&str>) -> Result<f64, ConfigError> {
    require_arg(token, args)?
        .parse::<f64>()
        .map_err(|_source| unknown_statistic(token))
}

fn require_arg<'a>(token: &str, args: Option<&'a str>) -> Result<&'a str, ConfigError> {
    args.map(str::trim).ok_or_else(|| unknown_statistic(token))
}

fn unknown_statistic(token: &str) -> ConfigError {
    ConfigError::Stat(StatError::UnknownStatistic {
        name: token.to_owned(),
    })
}

#[cfg(test)]
mod tests;
