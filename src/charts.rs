//! Declarative chart configurations.
//!
//! The dashboard core never draws anything; it produces a `{kind, data,
//! options}` description and hands it to the view, which owns the actual
//! chart surface. Colors are the backend dashboard's fixed palette.

use crate::model::ChartSeries;

/// Positional palette for the status distribution chart.
pub const STATUS_COLORS: [&str; 3] = ["#10b981", "#3b82f6", "#ef4444"];
/// Single-series color for the outlet risk bars.
pub const RISK_BAR_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub values: Vec<f64>,
    /// One color per value, already cycled from the palette.
    pub colors: Vec<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOptions {
    pub show_legend: bool,
    /// Clamp for the value axis, when the scale is bounded (percentages).
    pub y_max: Option<f64>,
    /// Suffix value-axis ticks with `%`.
    pub percent_ticks: bool,
    /// Requested category-label rotation in degrees.
    pub x_label_rotation: Option<u16>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// Pie of transaction-status counts. Labels arrive as raw status keys
/// ("on_due"); they are prettified for display.
pub fn build_status_chart(series: &ChartSeries) -> ChartConfig {
    let labels = series.labels.iter().map(|l| prettify_status_label(l)).collect();
    let colors = (0..series.values.len())
        .map(|i| STATUS_COLORS[i % STATUS_COLORS.len()])
        .collect();
    ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: None,
                values: series.values.clone(),
                colors,
            }],
        },
        options: ChartOptions {
            show_legend: true,
            ..ChartOptions::default()
        },
    }
}

/// Bar chart of the highest-risk outlets, value axis clamped to 0-100%.
pub fn build_outlet_risk_chart(series: &ChartSeries) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset {
                label: Some("% At-Risk".to_string()),
                values: series.values.clone(),
                colors: vec![RISK_BAR_COLOR; series.values.len()],
            }],
        },
        options: ChartOptions {
            show_legend: false,
            y_max: Some(100.0),
            percent_ticks: true,
            x_label_rotation: Some(45),
        },
    }
}

/// First character uppercased, underscores replaced by spaces.
fn prettify_status_label(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(labels: &[&str], values: &[f64]) -> ChartSeries {
        ChartSeries {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_status_labels_prettified() {
        let cfg = build_status_chart(&series(&["on_due", "late", "auction"], &[5.0, 2.0, 1.0]));
        assert_eq!(cfg.kind, ChartKind::Pie);
        assert_eq!(cfg.data.labels, vec!["On due", "Late", "Auction"]);
    }

    #[test]
    fn test_status_palette_cycles() {
        let cfg = build_status_chart(&series(
            &["a", "b", "c", "d"],
            &[1.0, 2.0, 3.0, 4.0],
        ));
        let colors = &cfg.data.datasets[0].colors;
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], STATUS_COLORS[0]);
        assert_eq!(colors[3], STATUS_COLORS[0]);
    }

    #[test]
    fn test_risk_chart_axis_contract() {
        let cfg = build_outlet_risk_chart(&series(&["KEDIRI", "BLITAR"], &[42.0, 17.5]));
        assert_eq!(cfg.kind, ChartKind::Bar);
        assert_eq!(cfg.options.y_max, Some(100.0));
        assert!(cfg.options.percent_ticks);
        assert_eq!(cfg.options.x_label_rotation, Some(45));
        assert_eq!(cfg.data.datasets[0].label.as_deref(), Some("% At-Risk"));
    }
}
