//! Tests for loading study lists from disk.

use std::io::Write;

use tempfile::{Builder, NamedTempFile};
use tsa::data::{load_studies, load_studies_csv, DataError, CSV_HEADER};
use tsa::Study;

fn temp_with_suffix(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn csv_preserves_file_order() {
    let file = temp_with_suffix(
        ".csv",
        &format!(
            "{}\nlate,Late,2010,5,50,9,50\nearly,Early,1990,7,60,12,61\n",
            CSV_HEADER
        ),
    );
    let studies = load_studies(file.path()).unwrap();
    let ids: Vec<&str> = studies.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["late", "early"]);
}

#[test]
fn json_dispatch_by_extension() {
    let file = temp_with_suffix(
        ".json",
        r#"[{"id":"s1","name":"Smith","year":1998,"eventsTrt":12,"totalTrt":150,"eventsCtrl":22,"totalCtrl":148}]"#,
    );
    let studies = load_studies(file.path()).unwrap();
    assert_eq!(studies, vec![Study::new("s1", "Smith", 1998, 12, 150, 22, 148)]);
}

#[test]
fn uppercase_json_extension() {
    let file = temp_with_suffix(".JSON", "[]");
    assert!(load_studies(file.path()).unwrap().is_empty());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    assert!(matches!(load_studies_csv(&missing), Err(DataError::Io(_))));
}

#[test]
fn errors_carry_line_numbers() {
    let file = temp_with_suffix(
        ".csv",
        &format!("# exported 2024-01-01\n{}\n\ns1,Smith,19x8,12,150,22,148\n", CSV_HEADER),
    );
    let err = load_studies(file.path()).unwrap_err();
    match &err {
        DataError::InvalidValue { line, column, .. } => {
            assert_eq!(*line, 4);
            assert_eq!(*column, "year");
        }
        other => panic!("Expected InvalidValue error, got {:?}", other),
    }
    assert!(err.to_string().contains("line 4"));
}

#[test]
fn double_zero_studies_load() {
    let file = temp_with_suffix(".csv", &format!("{}\nz,Zero,2000,0,40,0,40\n", CSV_HEADER));
    let studies = load_studies(file.path()).unwrap();
    assert!(studies[0].is_double_zero());
}
