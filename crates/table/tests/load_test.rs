//! Loader tests against an on-disk fixture export.

use std::path::PathBuf;

use chrono::NaiveDate;
use common::WattboardError;
use table::load;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn test_load_fixture() {
    let table = load(fixture("consumption_sample.csv")).unwrap();

    assert_eq!(table.len(), 6);
    assert_eq!(table.regions(), &["Punjab", "Haryana", "Delhi"]);

    // Index is strictly ascending
    for pair in table.timestamps().windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert_eq!(
        table.start().unwrap(),
        NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
    assert_eq!(
        table.end().unwrap(),
        NaiveDate::from_ymd_opt(2019, 1, 2)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap()
    );

    let punjab = table.column("Punjab").unwrap();
    assert_eq!(punjab[0], 119.9);
    assert_eq!(punjab[5], 117.3);
}

#[test]
fn test_malformed_cells_load_as_nan() {
    let table = load(fixture("consumption_sample.csv")).unwrap();

    // Empty cell and junk cell both coerce to NaN
    assert!(table.column("Punjab").unwrap()[2].is_nan());
    assert!(table.column("Haryana").unwrap()[3].is_nan());
    // Neighbouring cells are untouched
    assert_eq!(table.column("Delhi").unwrap()[2], 79.8);
}

#[test]
fn test_missing_file_is_data_unavailable() {
    let result = load(fixture("no_such_file.csv"));
    assert!(matches!(result, Err(WattboardError::DataUnavailable(_))));
}
