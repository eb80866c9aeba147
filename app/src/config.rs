use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::env;

pub struct Config {
    inner: RwLock<InnerConfig>,
}

struct InnerConfig {
    database_url: String,
    bind_addr: String,
    zones: Vec<String>,
    fetch_timeout_ms: u64,
    plant_fanout: usize,
    action_scan_depth: i64,
    sensor_clusters: HashMap<String, String>,
}

impl Config {
    pub fn database_url(&self) -> String {
        self.inner.read().database_url.clone()
    }

    pub fn bind_addr(&self) -> String {
        self.inner.read().bind_addr.clone()
    }

    pub fn zones(&self) -> Vec<String> {
        self.inner.read().zones.clone()
    }

    pub fn fetch_timeout_ms(&self) -> u64 {
        self.inner.read().fetch_timeout_ms
    }

    pub fn plant_fanout(&self) -> usize {
        self.inner.read().plant_fanout
    }

    pub fn action_scan_depth(&self) -> i64 {
        self.inner.read().action_scan_depth
    }

    pub fn sensor_clusters(&self) -> HashMap<String, String> {
        self.inner.read().sensor_clusters.clone()
    }
}

/// Parses the zone-to-sensor-cluster topology, e.g.
/// `SENSOR_CLUSTERS=zone2=zone1,zone3=zone1`. Zones without an entry read
/// their own sensor hardware.
fn parse_sensor_clusters(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let mut split = pair.splitn(2, '=');
            let zone = split.next()?.trim();
            let cluster = split.next()?.trim();
            if zone.is_empty() || cluster.is_empty() {
                None
            } else {
                Some((zone.to_owned(), cluster.to_owned()))
            }
        })
        .collect()
}

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv::dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let bind_addr = env::var("BIND_ADDR").expect("BIND_ADDR must be set");
    let zones: Vec<String> = env::var("ZONES")
        .expect("ZONES must be set")
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect();
    let fetch_timeout_ms = env::var("FETCH_TIMEOUT_MS")
        .unwrap_or_else(|_| "2000".to_owned())
        .parse()
        .expect("FETCH_TIMEOUT_MS must be a number");
    let plant_fanout = env::var("PLANT_FANOUT")
        .unwrap_or_else(|_| "8".to_owned())
        .parse()
        .expect("PLANT_FANOUT must be a number");
    let action_scan_depth = env::var("ACTION_SCAN_DEPTH")
        .unwrap_or_else(|_| "50".to_owned())
        .parse()
        .expect("ACTION_SCAN_DEPTH must be a number");
    let sensor_clusters = env::var("SENSOR_CLUSTERS")
        .map(|raw| parse_sensor_clusters(&raw))
        .unwrap_or_default();

    if zones.is_empty() {
        panic!("No zones provided");
    }

    Config {
        inner: RwLock::new(InnerConfig {
            database_url,
            bind_addr,
            zones,
            fetch_timeout_ms,
            plant_fanout,
            action_scan_depth,
            sensor_clusters,
        }),
    }
});
