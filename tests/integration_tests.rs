//! Integration tests for georange

use std::fs;

use georange::alert::{rng_from_seed, AlertGenerator};
use georange::store::load;
use georange::{Config, Mutation, RangeKey, RangeRecord, RangeStore};
use tempfile::TempDir;

// =============================================================================
// Store Workflow
// =============================================================================

#[test]
fn test_edit_session_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("GeoIPCountryWhois.csv");
    fs::write(
        &path,
        concat!(
            "\"192.168.1.0\",\"192.168.1.255\",\"3232235776\",\"3232236031\",\"SN\",\"Small Network\"\n",
            "\"10.0.0.0\",\"10.255.255.255\",\"167772160\",\"184549375\",\"PN\",\"Private Network\"\n",
            "\"127.3.0.0\",\"127.3.255.255\",\"2130903040\",\"2130968575\",\"MN\",\"My Network\"\n",
        ),
    )
    .unwrap();

    let config = Config::builder().db_path(&path).build();
    let mut store = RangeStore::open(&config.db_path).unwrap();

    assert_eq!(
        store.list_keys(),
        vec![
            RangeKey::new("My Network", "MN"),
            RangeKey::new("Private Network", "PN"),
            RangeKey::new("Small Network", "SN"),
        ]
    );

    let edits = vec![
        Mutation::Delete(RangeKey::new("Small Network", "SN")),
        Mutation::Create(RangeKey::new("Lab", "LB")),
        Mutation::InsertOrCreate {
            key: RangeKey::new("Private Network", "PN"),
            records: vec![RangeRecord::new(
                "172.16.0.0",
                "172.31.255.255",
                "2886729728",
                "2887778303",
            )],
        },
        Mutation::InsertOrCreate {
            key: RangeKey::new("Guest", "GN"),
            records: vec![RangeRecord::new(
                "192.168.50.0",
                "192.168.50.255",
                "3232248320",
                "3232248575",
            )],
        },
    ];
    for edit in edits {
        store.apply(edit).unwrap();
    }

    // Post-mutation order is insertion order, not sorted
    assert_eq!(
        store.list_keys(),
        vec![
            RangeKey::new("My Network", "MN"),
            RangeKey::new("Private Network", "PN"),
            RangeKey::new("Lab", "LB"),
            RangeKey::new("Guest", "GN"),
        ]
    );

    assert_eq!(store.flush().unwrap(), 4);

    // The declared-empty group is gone after a reload; the rest is re-sorted
    let reloaded = load(&path).unwrap();
    assert_eq!(
        reloaded.list_keys(),
        vec![
            RangeKey::new("Guest", "GN"),
            RangeKey::new("My Network", "MN"),
            RangeKey::new("Private Network", "PN"),
        ]
    );
    assert_eq!(
        reloaded.get_records(&RangeKey::new("Private Network", "PN"))[1].ip_start,
        "172.16.0.0"
    );
}

// =============================================================================
// Alert Workflow
// =============================================================================

#[test]
fn test_generate_alert_file_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("alert.csv");

    let config = Config::builder()
        .alert_output(&output)
        .alert_count(100)
        .seed(Some(2014))
        .build();

    let mut rng = rng_from_seed(config.alert.seed);
    let generator = AlertGenerator::new(&config.alert, &mut rng).unwrap();
    generator.write_csv(&config.alert.output_path, &mut rng).unwrap();

    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 101);
}
