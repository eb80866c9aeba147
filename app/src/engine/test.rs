use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use sprout_core::{
    ActionLogEntry, ActionScope, ActuatorKind, CommandState, PinReading, Plant, Severity,
    SystemThresholds, Threshold, ZoneSensorSample, ZoneSensors,
};

use crate::access::mock::MemoryStores;

use super::{EngineSettings, GrowObserver, ZoneStatus};

fn settings(zones: &[&str]) -> EngineSettings {
    EngineSettings {
        zones: zones.iter().map(|z| (*z).to_owned()).collect(),
        fetch_timeout: Duration::from_millis(250),
        plant_fanout: 4,
        action_scan_depth: 50,
        sensor_clusters: HashMap::new(),
    }
}

fn observer(stores: MemoryStores, zones: &[&str]) -> Arc<GrowObserver> {
    let stores = Arc::new(stores);
    GrowObserver::new(
        stores.clone(),
        stores.clone(),
        stores.clone(),
        stores,
        settings(zones),
    )
}

fn plant(id: &str, zone: &str, pin: Option<i32>, threshold: Threshold) -> Plant {
    Plant {
        plant_id: id.to_owned(),
        name: format!("{} plant", id),
        zone: zone.to_owned(),
        moisture_pin: pin,
        moisture_threshold: threshold,
    }
}

fn sample(temperature: Option<f64>, readings: &[(i32, f64)]) -> ZoneSensorSample {
    ZoneSensorSample {
        timestamp: Utc::now(),
        zone_sensors: ZoneSensors {
            temperature,
            light: None,
            humidity: None,
            air_quality: None,
        },
        soil_moisture_by_pin: readings
            .iter()
            .map(|&(pin, soil_moisture)| PinReading { pin, soil_moisture })
            .collect(),
    }
}

fn env_thresholds() -> SystemThresholds {
    SystemThresholds {
        temperature: Threshold::new(30.0, 40.0),
        light: Threshold::new(1700.0, 4095.0),
        air_quality: Threshold::default(),
    }
}

const MOISTURE: Threshold = Threshold {
    min: Some(2000.0),
    max: Some(4095.0),
};

#[tokio::test]
async fn test_dry_plant_in_hot_zone_raises_both_alerts() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores
        .plants_by_zone
        .insert("zone1".to_owned(), vec![plant("p1", "zone1", Some(34), MOISTURE)]);
    stores
        .samples
        .insert("zone1".to_owned(), sample(Some(42.0), &[(34, 1800.0)]));

    let observer = observer(stores, &["zone1"]);
    let alerts = observer.alerts().await;

    assert_eq!(2, alerts.len());
    // Zone-level metrics come first, plants after.
    assert_eq!("temperature", alerts[0].metric);
    assert_eq!(Severity::Warning, alerts[0].severity);
    assert_eq!(42.0, alerts[0].value);

    assert_eq!("moisture", alerts[1].metric);
    assert_eq!(Severity::Critical, alerts[1].severity);
    assert_eq!(Some("p1 plant".to_owned()), alerts[1].plant);
    assert_eq!(2, observer.alert_count().await);
}

#[tokio::test]
async fn test_in_range_readings_raise_nothing() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores
        .plants_by_zone
        .insert("zone1".to_owned(), vec![plant("p1", "zone1", Some(34), MOISTURE)]);
    stores
        .samples
        .insert("zone1".to_owned(), sample(Some(35.0), &[(34, 3000.0)]));

    let observer = observer(stores, &["zone1"]);
    assert!(observer.alerts().await.is_empty());
}

#[tokio::test]
async fn test_unresolvable_pin_contributes_no_alert() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores.plants_by_zone.insert(
        "zone1".to_owned(),
        vec![
            // Pin 39 has no sample entry, p2 has no pin at all.
            plant("p1", "zone1", Some(39), MOISTURE),
            plant("p2", "zone1", None, MOISTURE),
        ],
    );
    stores
        .samples
        .insert("zone1".to_owned(), sample(Some(35.0), &[(34, 100.0)]));

    let observer = observer(stores, &["zone1"]);
    assert!(observer.alerts().await.is_empty());
}

#[tokio::test]
async fn test_alert_order_is_zone_major_then_plant_order() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores.plants_by_zone.insert(
        "zone1".to_owned(),
        vec![
            plant("a", "zone1", Some(1), MOISTURE),
            plant("b", "zone1", Some(2), MOISTURE),
        ],
    );
    stores
        .plants_by_zone
        .insert("zone2".to_owned(), vec![plant("c", "zone2", Some(1), MOISTURE)]);
    stores
        .samples
        .insert("zone1".to_owned(), sample(None, &[(1, 100.0), (2, 200.0)]));
    stores
        .samples
        .insert("zone2".to_owned(), sample(Some(45.0), &[(1, 300.0)]));

    let observer = observer(stores, &["zone1", "zone2"]);
    let alerts = observer.alerts().await;

    let keys: Vec<(String, String, Option<String>)> = alerts
        .iter()
        .map(|a| (a.zone.clone(), a.metric.clone(), a.plant.clone()))
        .collect();
    assert_eq!(
        vec![
            ("zone1".to_owned(), "moisture".to_owned(), Some("a plant".to_owned())),
            ("zone1".to_owned(), "moisture".to_owned(), Some("b plant".to_owned())),
            ("zone2".to_owned(), "temperature".to_owned(), None),
            ("zone2".to_owned(), "moisture".to_owned(), Some("c plant".to_owned())),
        ],
        keys
    );
}

#[tokio::test]
async fn test_zone_failure_is_contained() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores.fail_zones.insert("zone1".to_owned());
    stores
        .plants_by_zone
        .insert("zone2".to_owned(), vec![plant("p2", "zone2", Some(34), MOISTURE)]);
    stores
        .samples
        .insert("zone2".to_owned(), sample(None, &[(34, 500.0)]));

    let observer = observer(stores, &["zone1", "zone2"]);
    let alerts = observer.alerts().await;
    assert_eq!(1, alerts.len());
    assert_eq!("zone2", alerts[0].zone);
}

#[tokio::test]
async fn test_plant_fetch_failure_suppresses_only_that_plant() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores.fail_plants.insert("p1".to_owned());
    stores.plants_by_zone.insert(
        "zone1".to_owned(),
        vec![
            plant("p1", "zone1", Some(1), MOISTURE),
            plant("p2", "zone1", Some(2), MOISTURE),
        ],
    );
    stores
        .samples
        .insert("zone1".to_owned(), sample(None, &[(1, 100.0), (2, 200.0)]));

    let observer = observer(stores, &["zone1"]);
    let alerts = observer.alerts().await;
    assert_eq!(1, alerts.len());
    assert_eq!(Some("p2 plant".to_owned()), alerts[0].plant);
}

#[tokio::test]
async fn test_threshold_store_failure_skips_env_metrics_only() {
    let mut stores = MemoryStores {
        fail_thresholds: true,
        ..Default::default()
    };
    stores
        .plants_by_zone
        .insert("zone1".to_owned(), vec![plant("p1", "zone1", Some(34), MOISTURE)]);
    stores
        .samples
        .insert("zone1".to_owned(), sample(Some(500.0), &[(34, 100.0)]));

    let observer = observer(stores, &["zone1"]);
    let alerts = observer.alerts().await;
    // No evaluable env ranges, but the plant's own threshold still applies.
    assert_eq!(1, alerts.len());
    assert_eq!("moisture", alerts[0].metric);
}

#[tokio::test]
async fn test_stalled_sample_fetch_counts_as_missing_data() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        sample_delay: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    stores
        .plants_by_zone
        .insert("zone1".to_owned(), vec![plant("p1", "zone1", Some(34), MOISTURE)]);
    stores
        .samples
        .insert("zone1".to_owned(), sample(Some(42.0), &[(34, 100.0)]));

    let observer = observer(stores, &["zone1"]);
    assert!(observer.alerts().await.is_empty());
}

#[tokio::test]
async fn test_clustered_zone_reads_its_host_sample() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores
        .plants_by_zone
        .insert("zone2".to_owned(), vec![plant("p1", "zone2", Some(34), MOISTURE)]);
    // Only zone1 has sensor hardware.
    stores
        .samples
        .insert("zone1".to_owned(), sample(Some(42.0), &[(34, 1800.0)]));

    let stores = Arc::new(stores);
    let mut settings = settings(&["zone2"]);
    settings
        .sensor_clusters
        .insert("zone2".to_owned(), "zone1".to_owned());
    let observer = GrowObserver::new(
        stores.clone(),
        stores.clone(),
        stores.clone(),
        stores,
        settings,
    );

    let alerts = observer.alerts().await;
    assert_eq!(2, alerts.len());
    assert!(alerts.iter().all(|a| a.zone == "zone2"));

    let summary = observer.zone_summary("zone2").await;
    assert_eq!(42.0, summary.temperature);
}

#[tokio::test]
async fn test_zone_summary_aggregates_and_rounds() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores.plants_by_zone.insert(
        "zone1".to_owned(),
        vec![
            plant("p1", "zone1", Some(34), MOISTURE),
            plant("p2", "zone1", Some(35), MOISTURE),
            plant("p3", "zone1", None, MOISTURE),
        ],
    );
    let mut zone_sample = sample(Some(23.46), &[(34, 1800.0), (35, 2601.0)]);
    zone_sample.zone_sensors.light = Some(2000.4);
    zone_sample.zone_sensors.humidity = Some(55.5);
    stores.samples.insert("zone1".to_owned(), zone_sample);

    let observer = observer(stores, &["zone1"]);
    let summary = observer.zone_summary("zone1").await;

    // Mean over the two resolvable probes only.
    assert_eq!(2201.0, summary.soil_moisture);
    assert_eq!(23.5, summary.temperature);
    assert_eq!(2000.0, summary.light);
    assert_eq!(56.0, summary.humidity);
    assert_eq!(0.0, summary.air_quality);
    assert_eq!(3, summary.plant_count);
    // p1 is dry, so the zone rolls up as warning.
    assert_eq!(ZoneStatus::Warning, summary.status);
}

#[tokio::test]
async fn test_empty_zone_is_healthy_with_zero_moisture() {
    let stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    let observer = observer(stores, &["zone1"]);
    let summary = observer.zone_summary("zone1").await;

    assert_eq!(0.0, summary.soil_moisture);
    assert_eq!(ZoneStatus::Healthy, summary.status);
    assert_eq!(0, summary.plant_count);
}

#[tokio::test]
async fn test_evaluation_is_idempotent() {
    let mut stores = MemoryStores {
        thresholds: env_thresholds(),
        ..Default::default()
    };
    stores
        .plants_by_zone
        .insert("zone1".to_owned(), vec![plant("p1", "zone1", Some(34), MOISTURE)]);
    stores
        .samples
        .insert("zone1".to_owned(), sample(Some(42.0), &[(34, 1800.0)]));

    let observer = observer(stores, &["zone1"]);
    assert_eq!(observer.alerts().await, observer.alerts().await);
    assert_eq!(
        observer.zone_summary("zone1").await,
        observer.zone_summary("zone1").await
    );
}

#[tokio::test]
async fn test_toggle_appends_and_confirms() {
    let observer = observer(MemoryStores::default(), &["zone1"]);
    let scope = ActionScope::Zone("zone1".to_owned());

    assert!(!observer.actuator_state(&scope, ActuatorKind::Pump).await);

    let command = observer
        .toggle_actuator(&scope, ActuatorKind::Pump, "tester")
        .await;
    assert_eq!(CommandState::Confirmed, command.state);
    assert_eq!("water_on", command.action());
    assert!(command.effective_state());
    assert!(observer.actuator_state(&scope, ActuatorKind::Pump).await);

    // The flip back reads the entry it just appended.
    let command = observer
        .toggle_actuator(&scope, ActuatorKind::Pump, "tester")
        .await;
    assert_eq!("water_off", command.action());
    assert!(!observer.actuator_state(&scope, ActuatorKind::Pump).await);
}

#[tokio::test]
async fn test_plant_scope_does_not_leak_into_zone_scope() {
    let observer = observer(MemoryStores::default(), &["zone1"]);
    let plant_scope = ActionScope::Plant("p1".to_owned());

    observer
        .toggle_actuator(&plant_scope, ActuatorKind::Pump, "tester")
        .await;

    assert!(observer.actuator_state(&plant_scope, ActuatorKind::Pump).await);
    let zone_scope = ActionScope::Zone("zone1".to_owned());
    assert!(!observer.actuator_state(&zone_scope, ActuatorKind::Pump).await);
}

#[tokio::test]
async fn test_failed_append_reports_fallback_state() {
    let stores = MemoryStores {
        fail_append: true,
        ..Default::default()
    };
    // Seed one confirmed on-entry directly, so the current state is on.
    stores.actions.write().push(ActionLogEntry {
        action: "fan_on".to_owned(),
        actuator_id: "zone1:fan".to_owned(),
        plant_id: None,
        zone: Some("zone1".to_owned()),
        trigger: "manual".to_owned(),
        trigger_by: "tester".to_owned(),
        timestamp: Utc.timestamp_opt(1, 0).unwrap(),
    });

    let observer = observer(stores, &["zone1"]);
    let scope = ActionScope::Zone("zone1".to_owned());
    let command = observer
        .toggle_actuator(&scope, ActuatorKind::Fan, "tester")
        .await;

    assert_eq!(CommandState::Failed, command.state);
    assert!(!command.requested);
    // The optimistic flip is rolled back.
    assert!(command.effective_state());
    assert!(observer.actuator_state(&scope, ActuatorKind::Fan).await);
}
