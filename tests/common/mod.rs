#![allow(dead_code)]

use purchase_intent::SessionRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rusqlite::{params, Connection};
use std::path::Path;

pub const VISITOR_TYPES: [&str; 3] = ["Returning_Visitor", "New_Visitor", "Other"];
pub const MONTHS: [&str; 10] = ["Feb", "Mar", "May", "June", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Syntetické sessions: presne `buyers` kupujúcich, správanie kupujúcich sa líši
/// v počte produktových stránok a bounce/exit rates.
pub fn synthetic_sessions(n: usize, buyers: usize, seed: u64) -> Vec<SessionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut labels: Vec<bool> = (0..n).map(|i| i < buyers).collect();
    labels.shuffle(&mut rng);

    labels
        .into_iter()
        .map(|buyer| {
            let engagement: f64 = (if buyer { 1.0 } else { 0.0 }) + rng.gen_range(-0.8..0.8);
            let product_related = (20.0 + 25.0 * engagement + rng.gen_range(0.0..15.0)).max(0.0).round();
            SessionRecord {
                administrative: rng.gen_range(0..8) as f64,
                administrative_duration: rng.gen_range(0.0..300.0),
                informational: rng.gen_range(0..3) as f64,
                informational_duration: rng.gen_range(0.0..60.0),
                product_related,
                product_related_duration: product_related * rng.gen_range(20.0..50.0),
                bounce_rates: (0.03 - 0.02 * engagement + rng.gen_range(0.0..0.01)).max(0.0),
                exit_rates: (0.05 - 0.025 * engagement + rng.gen_range(0.0..0.02)).max(0.001),
                special_day: if rng.gen_bool(0.1) { 0.4 } else { 0.0 },
                operating_systems: rng.gen_range(1..5) as f64,
                browser: rng.gen_range(1..6) as f64,
                region: rng.gen_range(1..10) as f64,
                traffic_type: rng.gen_range(1..12) as f64,
                visitor_type: VISITOR_TYPES[rng.gen_range(0..VISITOR_TYPES.len())].to_string(),
                month: MONTHS[rng.gen_range(0..MONTHS.len())].to_string(),
                weekend: rng.gen_bool(0.25),
                revenue: buyer,
            }
        })
        .collect()
}

/// Hodnota, ktorá by prezradila label - loadery ju musia ignorovať
pub fn page_value(record: &SessionRecord) -> f64 {
    if record.revenue {
        120.0
    } else {
        0.0
    }
}

const HEADER: [&str; 18] = [
    "Administrative",
    "Administrative_Duration",
    "Informational",
    "Informational_Duration",
    "ProductRelated",
    "ProductRelated_Duration",
    "BounceRates",
    "ExitRates",
    "PageValues",
    "SpecialDay",
    "Month",
    "OperatingSystems",
    "Browser",
    "Region",
    "TrafficType",
    "VisitorType",
    "Weekend",
    "Revenue",
];

fn upper_flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// CSV v rozložení UCI datasetu vrátane `PageValues`
pub fn write_csv(path: &Path, records: &[SessionRecord]) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(HEADER).unwrap();
    for r in records {
        writer
            .write_record([
                r.administrative.to_string(),
                r.administrative_duration.to_string(),
                r.informational.to_string(),
                r.informational_duration.to_string(),
                r.product_related.to_string(),
                r.product_related_duration.to_string(),
                r.bounce_rates.to_string(),
                r.exit_rates.to_string(),
                page_value(r).to_string(),
                r.special_day.to_string(),
                r.month.clone(),
                r.operating_systems.to_string(),
                r.browser.to_string(),
                r.region.to_string(),
                r.traffic_type.to_string(),
                r.visitor_type.clone(),
                upper_flag(r.weekend).to_string(),
                upper_flag(r.revenue).to_string(),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
}

pub fn write_json(path: &Path, records: &[SessionRecord]) {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            let mut value = serde_json::to_value(r).unwrap();
            value["PageValues"] = serde_json::json!(page_value(r));
            value
        })
        .collect();
    std::fs::write(path, serde_json::to_string(&rows).unwrap()).unwrap();
}

pub fn write_sqlite(path: &Path, table: &str, records: &[SessionRecord]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE {table} (
            Administrative INTEGER, Administrative_Duration REAL,
            Informational INTEGER, Informational_Duration REAL,
            ProductRelated INTEGER, ProductRelated_Duration REAL,
            BounceRates REAL, ExitRates REAL, PageValues REAL, SpecialDay REAL,
            Month TEXT, OperatingSystems INTEGER, Browser INTEGER, Region INTEGER,
            TrafficType INTEGER, VisitorType TEXT, Weekend INTEGER, Revenue INTEGER
        );"
    ))
    .unwrap();

    let mut stmt = conn
        .prepare(&format!(
            "INSERT INTO {table} VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)"
        ))
        .unwrap();
    for r in records {
        stmt.execute(params![
            r.administrative as i64,
            r.administrative_duration,
            r.informational as i64,
            r.informational_duration,
            r.product_related as i64,
            r.product_related_duration,
            r.bounce_rates,
            r.exit_rates,
            page_value(r),
            r.special_day,
            r.month,
            r.operating_systems as i64,
            r.browser as i64,
            r.region as i64,
            r.traffic_type as i64,
            r.visitor_type,
            r.weekend as i64,
            r.revenue as i64,
        ])
        .unwrap();
    }
}
