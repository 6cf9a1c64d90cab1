use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn parses_basic_keys_and_defaults_the_sampler() {
    let file = write_temp(
        "# a comment\n\
         arclistFile = graph.net\n\
         ACA_S = 0.1\n\
         ACA_EE = 0.05\n\
         compC = 0.5\n\
         samplerSteps = 1000\n",
    );
    let config = parse(file.path()).expect("parse");
    assert_eq!(config.arclist_file, PathBuf::from("graph.net"));
    assert_eq!(config.aca_s, 0.1);
    assert_eq!(config.sampler, SamplerChoice::Basic);
    assert_eq!(config.mode, RunMode::Estimate);
}

#[test]
fn keys_are_case_insensitive() {
    let file = write_temp("ArcListFile = graph.net\nUSEtntSAMPLER = true\n");
    let config = parse(file.path()).expect("parse");
    assert_eq!(config.sampler, SamplerChoice::Tnt);
}

#[test]
fn contradictory_sampler_flags_are_rejected() {
    let file = write_temp("arclistFile = graph.net\nuseIFDsampler = true\nuseTNTsampler = true\n");
    let err = parse(file.path()).expect_err("contradictory flags");
    assert!(matches!(err, ConfigError::ContradictorySamplerFlags));
}

#[test]
fn missing_arclist_file_is_an_error_in_estimate_mode() {
    let file = write_temp("ACA_S = 0.1\n");
    let err = parse(file.path()).expect_err("missing arclistFile");
    assert!(matches!(
        err,
        ConfigError::MissingRequiredKey {
            key: "arclistFile"
        }
    ));
}

#[test]
fn simulate_mode_does_not_require_an_arclist_file() {
    let file = write_temp("mode = simulate\nnumNodes = 20\nsampleSize = 10\n");
    let config = parse(file.path()).expect("parse");
    assert_eq!(config.mode, RunMode::Simulate);
    assert_eq!(config.num_nodes, 20);
}

#[test]
fn unknown_boolean_value_is_an_invalid_value_error() {
    let file = write_temp("arclistFile = graph.net\nallowLoops = maybe\n");
    let err = parse(file.path()).expect_err("invalid bool");
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            key: "allowloops",
            ..
        }
    ));
}

#[test]
fn malformed_line_without_an_equals_sign_is_rejected() {
    let file = write_temp("arclistFile graph.net\n");
    let err = parse(file.path()).expect_err("malformed line");
    assert!(matches!(err, ConfigError::MalformedLine { .. }));
}

#[test]
fn parses_struct_and_attr_params_in_order() {
    let file = write_temp(
        "arclistFile = graph.net\n\
         structParams = Arc, AltKTrianglesT(2.0)\n\
         attrParams = Sender(sex), Matching(sex)\n\
         attrInteractionParams = Interaction(Sender(sex)*Matching(sex))\n",
    );
    let config = parse(file.path()).expect("parse");
    assert_eq!(config.selection.len(), 5);
    assert!(matches!(config.selection.get(0), Some(StatKind::Arc)));
    assert!(matches!(
        config.selection.get(1),
        Some(StatKind::AlternatingKTrianglesT { lambda }) if *lambda == 2.0
    ));
    assert!(matches!(
        config.selection.get(4),
        Some(StatKind::AttributeInteraction { left, right })
            if left == "Sender(sex)" && right == "Matching(sex)"
    ));
}

#[test]
fn unknown_statistic_name_is_rejected() {
    let file = write_temp("arclistFile = graph.net\nstructParams = NotAStatistic\n");
    let err = parse(file.path()).expect_err("unknown statistic");
    assert!(matches!(err, ConfigError::Stat(StatError::UnknownStatistic { .. })));
}

#[test]
fn unknown_key_is_rejected() {
    let file = write_temp("arclistFile = graph.net\nnotARealKey = 1\n");
    let err = parse(file.path()).expect_err("unknown key");
    assert!(matches!(err, ConfigError::UnknownKey { key, .. } if key == "notARealKey"));
}

#[test]
fn two_path_backend_defaults_to_dense() {
    let file = write_temp("arclistFile = graph.net\n");
    let config = parse(file.path()).expect("parse");
    assert_eq!(config.two_path_backend, ergm_core::TwoPathBackendChoice::Dense);
}
