//! Offline unit tests for weat-db pool configuration and row mapping.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use weat_core::{AppConfig, DistanceUnit, Environment};
use weat_db::{PoolConfig, RestaurantRow, TaskRunRow};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        default_page_size: 20,
        distance_unit: DistanceUnit::Kilometers,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

fn row(id: Uuid) -> RestaurantRow {
    RestaurantRow {
        id,
        name_zh: Some("小籠包店".to_string()),
        name_en: Some("Dumpling House".to_string()),
        lat: Some(25.0478),
        lng: Some(121.5170),
        phone_number: None,
        google_maps_place_id: None,
        updated_at: Utc::now(),
        address: None,
        summary: None,
    }
}

#[test]
fn into_restaurant_collapses_json_agg_relations() {
    let id = Uuid::new_v4();
    let mut raw = row(id);
    raw.address = Some(json!([{
        "id": "11111111-1111-1111-1111-111111111111",
        "street": "Main St 1",
        "city": "Taipei",
        "province": "Taiwan",
        "postal_code": "100"
    }]));
    raw.summary = Some(json!([{
        "average_rating": 4.4,
        "review_count": 321,
        "top_tags": ["soup", "dumplings"]
    }]));

    let restaurant = raw.into_restaurant();
    assert_eq!(restaurant.id, id.to_string());

    let address = restaurant.address.expect("address should unwrap");
    assert_eq!(address.city.as_deref(), Some("Taipei"));

    let summary = restaurant.summary.expect("summary should unwrap");
    assert_eq!(summary.review_count, 321);
    assert_eq!(summary.top_tags, vec!["soup", "dumplings"]);
}

#[test]
fn into_restaurant_maps_missing_relations_to_none() {
    let restaurant = row(Uuid::new_v4()).into_restaurant();
    assert!(restaurant.address.is_none());
    assert!(restaurant.summary.is_none());
    assert!(restaurant.distance.is_none());
}

#[test]
fn into_restaurant_requires_both_coordinates() {
    let mut raw = row(Uuid::new_v4());
    raw.lng = None;
    let restaurant = raw.into_restaurant();
    assert!(restaurant.location.is_none());

    let located = row(Uuid::new_v4()).into_restaurant();
    let location = located.location.expect("location should pair up");
    assert!((location.lat - 25.0478).abs() < 1e-9);
}

/// Compile-time smoke test: confirm that [`TaskRunRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn task_run_row_has_expected_fields() {
    let row = TaskRunRow {
        id: Uuid::new_v4(),
        task_type: "summary_generation".to_string(),
        status: "queued".to_string(),
        attempts: 0_i32,
        error_message: None,
        created_at: Utc::now(),
        started_at: None,
        completed_at: None,
    };

    let run = row.clone().into_task_run();
    assert_eq!(run.id, row.id.to_string());
    assert_eq!(run.task_type, "summary_generation");
    assert_eq!(run.status, "queued");
    assert_eq!(run.attempts, 0);
    assert!(run.error_message.is_none());
    assert!(run.started_at.is_none());
    assert!(run.completed_at.is_none());
}
