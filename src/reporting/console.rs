use super::insights::ModelInsights;
use super::with_thousands;
use crate::error::Result;
use crate::pipeline::PipelineOutcome;
use crate::processing::LabelEncoder;
use std::fmt::Write;

/// Počet features vypísaných v rebríčku dôležitosti
pub const TOP_FEATURES: usize = 10;

const WIDE: usize = 60;

/// Zloží textový report z výsledku pipeline
pub fn render(outcome: &PipelineOutcome) -> Result<String> {
    let mut out = String::new();
    let dataset = &outcome.dataset;
    let report = &outcome.report;
    let m = &report.metrics;
    let cm = &report.confusion_matrix;

    banner(&mut out, '=', "ONLINE SHOPPERS PURCHASE PREDICTION MODEL")?;
    writeln!(out, "\nDataset: {} sessions", with_thousands(dataset.num_samples))?;
    writeln!(out, "Features: {}", dataset.num_features)?;
    writeln!(out, "Target: Revenue (purchase yes/no)")?;

    writeln!(out, "\nClass distribution:")?;
    writeln!(
        out,
        "  Non-buyers: {} ({:.1}%)",
        with_thousands(dataset.num_non_buyers()),
        100.0 - dataset.buyer_rate()
    )?;
    writeln!(
        out,
        "  Buyers: {} ({:.1}%)",
        with_thousands(dataset.num_buyers),
        dataset.buyer_rate()
    )?;

    writeln!(out, "\nTrain set: {} sessions", with_thousands(outcome.train_size))?;
    writeln!(out, "Test set: {} sessions", with_thousands(outcome.test_size))?;

    writeln!(out, "\nCategory codes:")?;
    codes(&mut out, outcome.encoder.visitor_type_encoder())?;
    codes(&mut out, outcome.encoder.month_encoder())?;

    writeln!(out)?;
    banner(&mut out, '-', "TRAINING LOGISTIC REGRESSION MODEL")?;

    writeln!(out, "\nModel Performance:")?;
    writeln!(out, "  Accuracy:    {:.1}%", 100.0 * m.accuracy)?;
    writeln!(out, "  Precision:   {:.1}%", 100.0 * m.precision)?;
    writeln!(out, "  Recall:      {:.1}%", 100.0 * m.recall)?;
    writeln!(out, "  F1 Score:    {:.1}%", 100.0 * m.f1_score)?;
    writeln!(out, "  ROC AUC:     {:.3}", m.roc_auc)?;
    writeln!(out, "  Specificity: {:.1}%", 100.0 * m.specificity)?;
    writeln!(out, "  MCC:         {:.3}", m.mcc)?;

    writeln!(out, "\nConfusion Matrix:")?;
    writeln!(
        out,
        "  True Negatives:  {} (correctly predicted non-buyers)",
        with_thousands(cm.true_negatives)
    )?;
    writeln!(
        out,
        "  False Positives: {} (predicted buyer, actually non-buyer)",
        with_thousands(cm.false_positives)
    )?;
    writeln!(
        out,
        "  False Negatives: {} (predicted non-buyer, actually buyer)",
        with_thousands(cm.false_negatives)
    )?;
    writeln!(
        out,
        "  True Positives:  {} (correctly predicted buyers)",
        with_thousands(cm.true_positives)
    )?;

    writeln!(out)?;
    banner(&mut out, '-', &format!("FEATURE IMPORTANCE (Top {})", TOP_FEATURES))?;
    for feature in report.top_features(TOP_FEATURES) {
        writeln!(
            out,
            "  {:30} {} {:.3}",
            feature.feature,
            feature.sign(),
            feature.magnitude()
        )?;
    }

    writeln!(out)?;
    summary(&mut out, outcome)?;

    Ok(out)
}

fn banner(out: &mut String, fill: char, title: &str) -> Result<()> {
    let line: String = std::iter::repeat(fill).take(WIDE).collect();
    writeln!(out, "{}", line)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", line)?;
    Ok(())
}

fn codes(out: &mut String, encoder: &LabelEncoder) -> Result<()> {
    let assignment: Vec<String> = encoder
        .classes()
        .iter()
        .enumerate()
        .map(|(code, class)| format!("{}={}", class, code))
        .collect();
    writeln!(out, "  {}: {}", encoder.column(), assignment.join(", "))?;
    Ok(())
}

fn summary(out: &mut String, outcome: &PipelineOutcome) -> Result<()> {
    let m = &outcome.report.metrics;
    let insights = ModelInsights::from_report(&outcome.report);

    banner(out, '=', "MODEL SUMMARY")?;
    writeln!(
        out,
        "\nThe logistic regression model predicts purchase likelihood with {:.1}%",
        100.0 * m.accuracy
    )?;
    writeln!(out, "accuracy and {:.3} ROC AUC score.", m.roc_auc)?;
    if !outcome.model.converged() {
        writeln!(
            out,
            "Solver stopped after {} iterations without reaching the tolerance.",
            outcome.model.iterations()
        )?;
    }

    writeln!(out, "\nNote: PageValues was excluded as it's calculated post-session and would")?;
    writeln!(out, "create data leakage in a real-time prediction scenario.")?;

    writeln!(out, "\nKey findings:")?;
    if !insights.top_negative.is_empty() {
        writeln!(
            out,
            "- Strongest negative predictors: {}",
            insights.top_negative.join(", ")
        )?;
    }
    if !insights.top_positive.is_empty() {
        writeln!(
            out,
            "- Strongest positive predictors: {}",
            insights.top_positive.join(", ")
        )?;
    }
    let [reduce, encourage] = insights.business_implication();
    writeln!(out, "- Business implication: {} {}", reduce, encourage)?;
    Ok(())
}
