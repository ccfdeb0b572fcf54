use super::label_encoder::LabelEncoder;
use crate::error::{PipelineError, Result};
use crate::session::SessionRecord;
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::debug;

pub const FEATURE_COUNT: usize = 16;

/// Poradie stĺpcov vo feature vektore. `PageValues` sem nepatrí (data leakage).
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
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
    "VisitorType_encoded",
    "Month_encoded",
    "Weekend_encoded",
];

/// Zakódovaný dataset: feature matica a labely {0, 1}
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    pub features: DenseMatrix<f64>,
    pub labels: Vec<u8>,
}

impl EncodedDataset {
    pub fn num_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn num_positive(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }
}

/// Feature Encoder - z session záznamu zostaví 16-prvkový numerický vektor
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    visitor_type: LabelEncoder,
    month: LabelEncoder,
}

impl FeatureEncoder {
    /// Nafituje label encodery na celom datasete
    pub fn fit(records: &[SessionRecord]) -> Self {
        let visitor_type =
            LabelEncoder::fit("VisitorType", records.iter().map(|r| r.visitor_type.as_str()));
        let month = LabelEncoder::fit("Month", records.iter().map(|r| r.month.as_str()));

        debug!(
            visitor_types = ?visitor_type.classes(),
            months = ?month.classes(),
            "categorical encoders fitted"
        );

        Self { visitor_type, month }
    }

    pub fn encode(&self, record: &SessionRecord) -> Result<[f64; FEATURE_COUNT]> {
        Ok([
            record.administrative,
            record.administrative_duration,
            record.informational,
            record.informational_duration,
            record.product_related,
            record.product_related_duration,
            record.bounce_rates,
            record.exit_rates,
            record.special_day,
            record.operating_systems,
            record.browser,
            record.region,
            record.traffic_type,
            self.visitor_type.transform(&record.visitor_type)? as f64,
            self.month.transform(&record.month)? as f64,
            if record.weekend { 1.0 } else { 0.0 },
        ])
    }

    pub fn encode_all(&self, records: &[SessionRecord]) -> Result<EncodedDataset> {
        if records.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let rows = records
            .iter()
            .map(|r| self.encode(r).map(|v| v.to_vec()))
            .collect::<Result<Vec<_>>>()?;
        let labels = records.iter().map(SessionRecord::label).collect();

        Ok(EncodedDataset {
            features: DenseMatrix::from_2d_vec(&rows)?,
            labels,
        })
    }

    pub fn visitor_type_encoder(&self) -> &LabelEncoder {
        &self.visitor_type
    }

    pub fn month_encoder(&self) -> &LabelEncoder {
        &self.month
    }
}
