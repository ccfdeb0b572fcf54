//! Štvorpanelový graf výsledkov modelu (plotters, SVG backend).
//!
//! Panely: dôležitosť features, confusion matrix, hlavné metriky a zhrnutie.

use super::insights::ModelInsights;
use super::with_thousands;
use crate::error::Result;
use crate::evaluation::{Direction, EvaluationReport, FeatureImportance};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::info;

const SIZE: (u32, u32) = (1600, 1000);
const TOP_FEATURES: usize = 10;
const FONT: &str = "sans-serif";

const BG_COLOR: RGBColor = RGBColor(0xf5, 0xf5, 0xf5);
const CARD_BG: RGBColor = RGBColor(0xff, 0xff, 0xff);
const TEXT_COLOR: RGBColor = RGBColor(0x2d, 0x34, 0x36);
const TEXT_SECONDARY: RGBColor = RGBColor(0x63, 0x6e, 0x72);
const ACCENT_BLUE: RGBColor = RGBColor(0x09, 0x84, 0xe3);
const ACCENT_GREEN: RGBColor = RGBColor(0x00, 0xb8, 0x94);
const ACCENT_RED: RGBColor = RGBColor(0xd6, 0x30, 0x31);
const ACCENT_PURPLE: RGBColor = RGBColor(0x6c, 0x5c, 0xe7);

const CLASS_LABELS: [&str; 2] = ["Non-Buyer", "Buyer"];

type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Vykreslí graf do SVG reťazca
pub fn render_svg(report: &EvaluationReport) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        draw_dashboard(&root, report)?;
        root.present()?;
    }
    Ok(svg)
}

/// Zapíše graf do súboru
pub fn render_to_file(report: &EvaluationReport, path: &Path) -> Result<()> {
    let svg = render_svg(report)?;
    std::fs::write(path, svg)?;
    info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw_dashboard(root: &Panel<'_>, report: &EvaluationReport) -> Result<()> {
    root.fill(&BG_COLOR)?;
    let root = root.titled(
        "Purchase Prediction Model Results",
        (FONT, 30).into_font().style(FontStyle::Bold).color(&TEXT_COLOR),
    )?;

    let panels = root.margin(5, 5, 10, 10).split_evenly((2, 2));
    let cards: Vec<Panel<'_>> = panels.iter().map(|p| p.margin(10, 10, 10, 10)).collect();
    for card in &cards {
        card.fill(&CARD_BG)?;
    }

    feature_panel(&cards[0], report)?;
    confusion_panel(&cards[1], report)?;
    metrics_panel(&cards[2], report)?;
    insights_panel(&cards[3], report)?;
    Ok(())
}

fn caption_style() -> TextStyle<'static> {
    (FONT, 20).into_font().style(FontStyle::Bold).color(&TEXT_COLOR)
}

fn direction_color(direction: Direction) -> RGBColor {
    match direction {
        Direction::Increases => ACCENT_GREEN,
        Direction::Decreases => ACCENT_RED,
    }
}

fn feature_panel(area: &Panel<'_>, report: &EvaluationReport) -> Result<()> {
    let features = report.top_features(TOP_FEATURES);
    let rows = features.len().max(1);
    let max = features.iter().map(|f| f.magnitude()).fold(0.0_f64, f64::max);
    let x_max = if max > 0.0 { max * 1.25 } else { 1.0 };

    // najsilnejšia feature je hore
    let row_of = |i: usize| rows - 1 - i;
    let names: Vec<&str> = features.iter().map(|f| f.feature.as_str()).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("Top 10 Feature Importance", caption_style())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(190)
        .build_cartesian_2d(0.0..x_max, (0..rows).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows)
        .y_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(row) | SegmentValue::Exact(row) => names
                .get(rows - 1 - (*row).min(rows - 1))
                .map(|n| n.to_string())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .x_desc("Absolute Coefficient")
        .axis_desc_style((FONT, 14).into_font().color(&TEXT_SECONDARY))
        .draw()?;

    for (direction, label) in [
        (Direction::Increases, "Increases purchase likelihood"),
        (Direction::Decreases, "Decreases purchase likelihood"),
    ] {
        let color = direction_color(direction);
        chart
            .draw_series(
                features
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| f.direction() == direction)
                    .map(|(i, f)| feature_bar(row_of(i), f)),
            )?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
    }

    let value_style = (FONT, 12)
        .into_font()
        .color(&TEXT_SECONDARY)
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(features.iter().enumerate().map(|(i, f)| {
        Text::new(
            format!(" {:.3}", f.magnitude()),
            (f.magnitude(), SegmentValue::CenterOf(row_of(i))),
            value_style.clone(),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(CARD_BG.mix(0.9))
        .border_style(TEXT_SECONDARY)
        .label_font((FONT, 12))
        .draw()?;
    Ok(())
}

fn feature_bar(row: usize, feature: &FeatureImportance) -> Rectangle<(f64, SegmentValue<usize>)> {
    let mut bar = Rectangle::new(
        [
            (0.0, SegmentValue::Exact(row)),
            (feature.magnitude(), SegmentValue::Exact(row + 1)),
        ],
        direction_color(feature.direction()).filled(),
    );
    bar.set_margin(4, 4, 0, 0);
    bar
}

/// Lineárna interpolácia medzi svetlou a tmavou modrou (ako colormap Blues)
fn blues(fraction: f64) -> RGBColor {
    let light = (247.0, 251.0, 255.0);
    let dark = (8.0, 48.0, 107.0);
    let t = fraction.clamp(0.0, 1.0);
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(mix(light.0, dark.0), mix(light.1, dark.1), mix(light.2, dark.2))
}

/// Riadok 0 (skutoční nekupujúci) je hore
fn class_label(v: &SegmentValue<usize>, top_down: bool) -> String {
    match v {
        SegmentValue::CenterOf(k) | SegmentValue::Exact(k) if *k < 2 => {
            let k = if top_down { 1 - k } else { *k };
            CLASS_LABELS[k].to_string()
        }
        _ => String::new(),
    }
}

fn confusion_panel(area: &Panel<'_>, report: &EvaluationReport) -> Result<()> {
    let cm = &report.confusion_matrix;
    let max = cm.max_cell();

    let mut chart = ChartBuilder::on(area)
        .caption("Confusion Matrix", caption_style())
        .margin(20)
        .margin_left(120)
        .margin_right(120)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d((0..2usize).into_segmented(), (0..2usize).into_segmented())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(2)
        .y_labels(2)
        .x_label_formatter(&|v| class_label(v, false))
        .y_label_formatter(&|v| class_label(v, true))
        .x_desc("Predicted")
        .y_desc("Actual")
        .axis_desc_style((FONT, 14).into_font().color(&TEXT_SECONDARY))
        .draw()?;

    let cells: Vec<(usize, usize, usize)> = cm
        .grid()
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, &count)| (i, j, count)))
        .collect();

    chart.draw_series(cells.iter().map(|&(i, j, count)| {
        let fraction = if max > 0 { count as f64 / max as f64 } else { 0.0 };
        Rectangle::new(
            [
                (SegmentValue::Exact(j), SegmentValue::Exact(1 - i)),
                (SegmentValue::Exact(j + 1), SegmentValue::Exact(2 - i)),
            ],
            blues(fraction).filled(),
        )
    }))?;

    chart.draw_series(cells.iter().map(|&(i, j, count)| {
        let color = if 2 * count > max { CARD_BG } else { TEXT_COLOR };
        Text::new(
            with_thousands(count),
            (SegmentValue::CenterOf(j), SegmentValue::CenterOf(1 - i)),
            (FONT, 24)
                .into_font()
                .style(FontStyle::Bold)
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )
    }))?;
    Ok(())
}

fn metrics_panel(area: &Panel<'_>, report: &EvaluationReport) -> Result<()> {
    let headline = report.metrics.headline();
    let colors = [ACCENT_BLUE, ACCENT_GREEN, ACCENT_PURPLE, ACCENT_RED];
    let names: Vec<&str> = headline.iter().map(|(name, _)| *name).collect();

    let mut chart = ChartBuilder::on(area)
        .caption("Model Performance Metrics", caption_style())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..headline.len()).into_segmented(), 0.0..1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(headline.len())
        .x_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(k) | SegmentValue::Exact(k) => {
                names.get(*k).map(|n| n.to_string()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .y_labels(6)
        .y_label_formatter(&|y| format!("{:.1}", y))
        .y_desc("Score")
        .axis_desc_style((FONT, 14).into_font().color(&TEXT_SECONDARY))
        .draw()?;

    chart.draw_series(headline.iter().zip(colors).enumerate().map(|(k, ((_, value), color))| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(k), 0.0),
                (SegmentValue::Exact(k + 1), value.clamp(0.0, 1.0)),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 25, 25);
        bar
    }))?;

    chart.draw_series(headline.iter().enumerate().map(|(k, (_, value))| {
        Text::new(
            format!("{:.1}%", 100.0 * value),
            (SegmentValue::CenterOf(k), value.clamp(0.0, 1.0) + 0.02),
            (FONT, 14)
                .into_font()
                .style(FontStyle::Bold)
                .color(&TEXT_COLOR)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;
    Ok(())
}

fn insights_panel(area: &Panel<'_>, report: &EvaluationReport) -> Result<()> {
    let area = area.titled("Key Model Insights", caption_style())?;
    let insights = ModelInsights::from_report(report);
    let [reduce, encourage] = insights.business_implication();

    let mut lines: Vec<String> = vec![format!("ROC AUC Score: {:.3}", insights.roc_auc), String::new()];
    lines.push("Top Positive Predictors:".to_string());
    lines.extend(bullets(&insights.top_positive));
    lines.push(String::new());
    lines.push("Top Negative Predictors:".to_string());
    lines.extend(bullets(&insights.top_negative));
    lines.push(String::new());
    lines.push("Business Implication:".to_string());
    lines.push(format!("  {}", reduce));
    lines.push(format!("  {}", encourage));

    let heading = (FONT, 16).into_font().style(FontStyle::Bold).color(&TEXT_COLOR);
    let body = (FONT, 16).into_font().color(&TEXT_COLOR);
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let style = if line.starts_with("  ") { &body } else { &heading };
        area.draw(&Text::new(line.as_str(), (40, 20 + i as i32 * 26), style.clone()))?;
    }
    Ok(())
}

fn bullets(names: &[String]) -> Vec<String> {
    if names.is_empty() {
        return vec!["  \u{2022} none".to_string()];
    }
    names.iter().map(|n| format!("  \u{2022} {}", n)).collect()
}
