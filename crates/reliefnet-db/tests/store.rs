use std::path::PathBuf;
use std::time::Duration;

use reliefnet_db::{Database, StoreError};
use reliefnet_types::models::NewHelpRequest;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("reliefnet_db_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn fresh_db(test_name: &str) -> Database {
    let path = temp_dir(test_name).join("reliefnet.db");
    Database::new(path, Duration::from_secs(5))
}

/// An existing but empty database file, as left by `sqlite3 reliefnet.db ""`.
fn empty_db(test_name: &str) -> Database {
    let db = fresh_db(test_name);
    std::fs::File::create(db.path()).expect("create db file");
    db
}

fn ready_db(test_name: &str) -> Database {
    let db = fresh_db(test_name);
    db.setup(false).expect("setup");
    db
}

fn request(id: &str, timestamp: i64, resources: &[&str]) -> NewHelpRequest {
    NewHelpRequest {
        id: id.to_string(),
        name: "Ravi".to_string(),
        phone: "+919876543210".to_string(),
        resource_types: resources.iter().map(|r| r.to_string()).collect(),
        latitude: 19.076,
        longitude: 72.8777,
        description: String::new(),
        timestamp,
        disaster_type: "flood".to_string(),
    }
}

#[test]
fn created_request_is_listed_unresolved() {
    let db = ready_db("created_request_is_listed_unresolved");
    db.create(&request("a", 10, &["water", "food"])).expect("create");

    let listed = db.list_unresolved().expect("list");
    assert_eq!(listed.len(), 1);
    let req = &listed[0];
    assert_eq!(req.id, "a");
    assert!(!req.is_resolved);
    assert_eq!(req.resource_types, vec!["water", "food"]);
    assert_eq!(req.name, "Ravi");
    assert_eq!(req.latitude, 19.076);
}

#[test]
fn empty_resources_list_back_empty() {
    let db = ready_db("empty_resources_list_back_empty");
    db.create(&request("a", 10, &[])).expect("create");

    let listed = db.list_unresolved().expect("list");
    assert!(listed[0].resource_types.is_empty());
}

#[test]
fn list_is_newest_first() {
    let db = ready_db("list_is_newest_first");
    db.create(&request("old", 100, &[])).expect("create");
    db.create(&request("new", 300, &[])).expect("create");
    db.create(&request("mid", 200, &[])).expect("create");

    let ids: Vec<String> = db
        .list_unresolved()
        .expect("list")
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[test]
fn list_on_empty_table_is_empty() {
    let db = ready_db("list_on_empty_table_is_empty");
    assert!(db.list_unresolved().expect("list").is_empty());
}

#[test]
fn duplicate_id_conflicts_and_keeps_first() {
    let db = ready_db("duplicate_id_conflicts_and_keeps_first");
    db.create(&request("dup", 10, &["water"])).expect("create");

    let mut second = request("dup", 20, &["blankets"]);
    second.name = "Someone Else".to_string();
    let err = db.create(&second).unwrap_err();
    assert!(matches!(err, StoreError::Conflict(ref id) if id == "dup"), "{err:?}");

    let listed = db.list_unresolved().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Ravi");
    assert_eq!(listed[0].timestamp, 10);
    assert_eq!(listed[0].resource_types, vec!["water"]);
}

#[test]
fn create_without_schema_is_schema_not_ready() {
    let db = empty_db("create_without_schema_is_schema_not_ready");
    let err = db.create(&request("a", 10, &[])).unwrap_err();
    assert!(matches!(err, StoreError::SchemaNotReady), "{err:?}");
}

#[test]
fn list_without_schema_is_schema_not_ready() {
    let db = empty_db("list_without_schema_is_schema_not_ready");
    let err = db.list_unresolved().unwrap_err();
    assert!(matches!(err, StoreError::SchemaNotReady), "{err:?}");
}

#[test]
fn resolving_hides_request() {
    let db = ready_db("resolving_hides_request");
    db.create(&request("a", 10, &[])).expect("create");
    db.create(&request("b", 20, &[])).expect("create");

    assert_eq!(db.update_resolution("a", Some(true)).expect("update"), 1);
    let ids: Vec<String> = db.list_unresolved().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["b"]);
}

#[test]
fn resolution_defaults_to_resolved() {
    let db = ready_db("resolution_defaults_to_resolved");
    db.create(&request("a", 10, &[])).expect("create");

    db.update_resolution("a", None).expect("update");
    assert!(db.list_unresolved().unwrap().is_empty());
}

#[test]
fn unresolving_brings_request_back() {
    let db = ready_db("unresolving_brings_request_back");
    db.create(&request("a", 10, &[])).expect("create");
    db.update_resolution("a", Some(true)).expect("resolve");
    db.update_resolution("a", Some(false)).expect("unresolve");

    assert_eq!(db.list_unresolved().unwrap().len(), 1);
}

#[test]
fn updating_unknown_id_is_a_no_op() {
    let db = ready_db("updating_unknown_id_is_a_no_op");
    assert_eq!(db.update_resolution("ghost", None).expect("update"), 0);
}

#[test]
fn delete_is_unconditional() {
    let db = ready_db("delete_is_unconditional");
    assert_eq!(db.delete("ghost").expect("delete unknown"), 0);

    db.create(&request("a", 10, &[])).expect("create");
    assert_eq!(db.delete("a").expect("delete"), 1);
    assert!(db.list_unresolved().unwrap().is_empty());

    // The id is free again after deletion
    db.create(&request("a", 11, &[])).expect("recreate");
}

#[test]
fn health_check_does_not_need_schema() {
    let db = empty_db("health_check_does_not_need_schema");
    db.health_check().expect("healthy");
}

#[test]
fn operations_do_not_create_a_missing_file() {
    let db = fresh_db("operations_do_not_create_a_missing_file");

    assert!(matches!(db.health_check(), Err(StoreError::Storage(_))));
    assert!(matches!(db.list_unresolved(), Err(StoreError::Storage(_))));
    assert!(!db.path().exists());

    db.setup(false).expect("setup creates the file");
    assert!(db.path().exists());
    db.health_check().expect("healthy after setup");
}

#[test]
fn health_check_fails_when_unreachable() {
    let dir = temp_dir("health_check_fails_when_unreachable");
    let db = Database::new(dir.join("missing").join("reliefnet.db"), Duration::from_secs(1));
    assert!(matches!(db.health_check(), Err(StoreError::Storage(_))));
}

#[test]
fn setup_is_idempotent_and_seeds_once() {
    let db = fresh_db("setup_is_idempotent_and_seeds_once");
    db.setup(true).expect("first setup");
    db.setup(true).expect("second setup");

    let listed = db.list_unresolved().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "test123");
    assert_eq!(listed[0].resource_types, vec!["water", "food"]);
}

#[test]
fn setup_without_seed_leaves_table_empty() {
    let db = ready_db("setup_without_seed_leaves_table_empty");
    assert!(db.list_unresolved().unwrap().is_empty());
}

// -- Facilities --

fn add_facility(db: &Database, table: &str, name: &str, lat: f64, lon: f64) {
    db.with_conn(|conn| {
        conn.execute(
            &format!("INSERT INTO {table} (name, address, latitude, longitude) VALUES (?1, ?2, ?3, ?4)"),
            rusqlite::params![name, format!("{name} road"), lat, lon],
        )?;
        Ok(())
    })
    .expect("insert facility");
}

/// Degrees of latitude spanning `km` along a meridian.
fn lat_for_km(km: f64) -> f64 {
    (km / reliefnet_geo::EARTH_RADIUS_KM).to_degrees()
}

#[test]
fn nearest_facility_in_category() {
    let db = ready_db("nearest_facility_in_category");
    add_facility(&db, "hospitals", "General", lat_for_km(5.2), 0.0);
    add_facility(&db, "hospitals", "City", lat_for_km(1.1), 0.0);
    add_facility(&db, "hospitals", "Rural", lat_for_km(9.9), 0.0);
    add_facility(&db, "police_stations", "Central", lat_for_km(0.5), 0.0);

    let nearest = db.find_nearest_facility("hospitals", 0.0, 0.0).expect("nearest");
    assert_eq!(nearest.name, "City");
    assert_eq!(nearest.address, "City road");
    assert!((nearest.distance_km - 1.1).abs() < 1e-3);
}

#[test]
fn empty_category_is_not_found() {
    let db = ready_db("empty_category_is_not_found");
    let err = db.find_nearest_facility("police_stations", 0.0, 0.0).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref c) if c == "police_stations"), "{err:?}");
}

#[test]
fn unknown_or_unsafe_category_is_rejected() {
    let db = ready_db("unknown_or_unsafe_category_is_rejected");
    assert!(matches!(
        db.list_facilities("fire_stations"),
        Err(StoreError::UnknownCategory(_))
    ));
    assert!(matches!(
        db.list_facilities("hospitals; DROP TABLE help_requests"),
        Err(StoreError::UnknownCategory(_))
    ));
}
