use crate::evaluation::{Direction, EvaluationReport};

/// Počet prediktorov v každom smere, ktoré sa zobrazia v závere reportu
pub const PREDICTORS_PER_DIRECTION: usize = 2;

/// Zhrnutie modelu odvodené z rankingu features
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInsights {
    pub roc_auc: f64,
    pub top_positive: Vec<String>,
    pub top_negative: Vec<String>,
}

impl ModelInsights {
    pub fn from_report(report: &EvaluationReport) -> Self {
        let pick = |direction: Direction| -> Vec<String> {
            report
                .feature_importance
                .iter()
                .filter(|f| f.direction() == direction && f.coefficient != 0.0)
                .take(PREDICTORS_PER_DIRECTION)
                .map(|f| f.feature.clone())
                .collect()
        };

        Self {
            roc_auc: report.metrics.roc_auc,
            top_positive: pick(Direction::Increases),
            top_negative: pick(Direction::Decreases),
        }
    }

    /// Dva riadky obchodného odporúčania
    pub fn business_implication(&self) -> [String; 2] {
        let reduce = if self.top_negative.is_empty() {
            "Monitor sessions with weak engagement".to_string()
        } else {
            format!("Focus on reducing {}", self.top_negative.join(" / "))
        };
        let encourage = if self.top_positive.is_empty() {
            "and test new engagement levers".to_string()
        } else {
            format!("and encouraging {}", self.top_positive.join(" / "))
        };
        [reduce, encourage]
    }
}
