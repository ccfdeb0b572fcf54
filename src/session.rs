use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Stĺpce, ktoré musí obsahovať každý zdroj dát.
/// `PageValues` tu zámerne nie je - počíta sa až po skončení session.
pub const REQUIRED_COLUMNS: [&str; 17] = [
    "Administrative",
    "Administrative_Duration",
    "Informational",
    "Informational_Duration",
    "ProductRelated",
    "ProductRelated_Duration",
    "BounceRates",
    "ExitRates",
    "SpecialDay",
    "OperatingSystems",
    "Browser",
    "Region",
    "TrafficType",
    "VisitorType",
    "Month",
    "Weekend",
    "Revenue",
];

/// Jedna session návštevníka e-shopu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "Administrative")]
    pub administrative: f64,
    #[serde(rename = "Administrative_Duration")]
    pub administrative_duration: f64,
    #[serde(rename = "Informational")]
    pub informational: f64,
    #[serde(rename = "Informational_Duration")]
    pub informational_duration: f64,
    #[serde(rename = "ProductRelated")]
    pub product_related: f64,
    #[serde(rename = "ProductRelated_Duration")]
    pub product_related_duration: f64,
    #[serde(rename = "BounceRates")]
    pub bounce_rates: f64,
    #[serde(rename = "ExitRates")]
    pub exit_rates: f64,
    #[serde(rename = "SpecialDay")]
    pub special_day: f64,
    #[serde(rename = "OperatingSystems")]
    pub operating_systems: f64,
    #[serde(rename = "Browser")]
    pub browser: f64,
    #[serde(rename = "Region")]
    pub region: f64,
    #[serde(rename = "TrafficType")]
    pub traffic_type: f64,
    #[serde(rename = "VisitorType")]
    pub visitor_type: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Weekend", deserialize_with = "deserialize_flag")]
    pub weekend: bool,
    #[serde(rename = "Revenue", deserialize_with = "deserialize_flag")]
    pub revenue: bool,
}

impl SessionRecord {
    /// Label v tvare {0, 1}
    pub fn label(&self) -> u8 {
        u8::from(self.revenue)
    }
}

/// Boolean stĺpce prichádzajú ako `TRUE`/`FALSE`, `true`, `1`/`0` podľa zdroja.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "1.0" => Some(true),
        "false" | "no" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => Ok(b),
        FlagRepr::Int(0) => Ok(false),
        FlagRepr::Int(1) => Ok(true),
        FlagRepr::Int(other) => Err(D::Error::custom(format!(
            "očakávaná hodnota 0 alebo 1, nájdené {}",
            other
        ))),
        FlagRepr::Float(f) if f == 0.0 => Ok(false),
        FlagRepr::Float(f) if f == 1.0 => Ok(true),
        FlagRepr::Float(other) => Err(D::Error::custom(format!(
            "očakávaná hodnota 0 alebo 1, nájdené {}",
            other
        ))),
        FlagRepr::Text(s) => parse_flag(&s)
            .ok_or_else(|| D::Error::custom(format!("'{}' nie je boolean hodnota", s))),
    }
}
