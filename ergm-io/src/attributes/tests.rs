use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn reads_a_binary_attribute_with_a_missing_value() {
    let file = write_temp("sex\n1\n0\nNA\n1\n");
    let (name, attribute) = read_binary_attribute(file.path()).expect("read_binary_attribute");
    assert_eq!(name, "sex");
    let NodeAttributes::Binary(values) = attribute else {
        panic!("expected Binary");
    };
    assert_eq!(values, vec![Some(true), Some(false), None, Some(true)]);
}

#[test]
fn na_is_case_insensitive() {
    let file = write_temp("sex\nna\nNa\nNA\n");
    let (_, attribute) = read_binary_attribute(file.path()).expect("read_binary_attribute");
    let NodeAttributes::Binary(values) = attribute else {
        panic!("expected Binary");
    };
    assert_eq!(values, vec![None, None, None]);
}

#[test]
fn rejects_a_malformed_binary_value() {
    let file = write_temp("sex\n2\n");
    let err = read_binary_attribute(file.path()).expect_err("malformed");
    assert!(matches!(err, AttributeError::MalformedValue { kind: "binary", .. }));
}

#[test]
fn reads_a_categorical_attribute() {
    let file = write_temp("group\n1\n2\n3\n");
    let (_, attribute) = read_categorical_attribute(file.path()).expect("read_categorical_attribute");
    let NodeAttributes::Categorical(values) = attribute else {
        panic!("expected Categorical");
    };
    assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn reads_a_continuous_attribute() {
    let file = write_temp("age\n1.5\n2.25\nNA\n");
    let (_, attribute) = read_continuous_attribute(file.path()).expect("read_continuous_attribute");
    let NodeAttributes::Continuous(values) = attribute else {
        panic!("expected Continuous");
    };
    assert_eq!(values, vec![Some(1.5), Some(2.25), None]);
}

#[test]
fn reads_a_zone_file() {
    let file = write_temp("0\n0\n1\n1\n");
    let zones = read_zone_file(file.path()).expect("read_zone_file");
    assert_eq!(zones, vec![0, 0, 1, 1]);
}

#[test]
fn rejects_a_malformed_zone_value() {
    let file = write_temp("0\n-1\n");
    let err = read_zone_file(file.path()).expect_err("negative zone");
    assert!(matches!(err, AttributeError::MalformedValue { kind: "zone", .. }));
}

#[test]
fn reads_a_set_valued_attribute() {
    let file = write_temp("interests\n1,2,5\nNA\n3\n");
    let (_, attribute) = read_set_attribute(file.path()).expect("read_set_attribute");
    let NodeAttributes::SetValued(values) = attribute else {
        panic!("expected SetValued");
    };
    assert_eq!(values[0], Some(HashSet::from([1, 2, 5])));
    assert_eq!(values[1], None);
    assert_eq!(values[2], Some(HashSet::from([3])));
}
