// covered-call-common/src/chart.rs

use crate::types::ProfitPoint;
use serde::{Deserialize, Serialize};

/// Line chart configuration in the shape the charting library consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
    pub scales: ChartScales,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlugins {
    pub legend: Toggle,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

/// Reduce a profit curve to the points that get plotted.
///
/// Curves longer than one point keep only their first and last entries;
/// shorter curves are plotted unchanged.
pub fn reduce_profit_curve(curve: &[ProfitPoint]) -> (Vec<String>, Vec<f64>) {
    match curve {
        [first, .., last] => (
            vec![first.date.clone(), last.date.clone()],
            vec![first.profit, last.profit],
        ),
        _ => (
            curve.iter().map(|p| p.date.clone()).collect(),
            curve.iter().map(|p| p.profit).collect(),
        ),
    }
}

impl ChartConfig {
    pub fn profit_curve(curve: &[ProfitPoint]) -> Self {
        let (labels, data) = reduce_profit_curve(curve);

        Self {
            chart_type: "line".to_string(),
            data: ChartData {
                labels,
                datasets: vec![ChartDataset {
                    label: "Profit Curve".to_string(),
                    data,
                    border_color: "#007bff".to_string(),
                    background_color: "rgba(0,123,255,0.1)".to_string(),
                    fill: true,
                    tension: 0.2,
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: ChartPlugins {
                    legend: Toggle { display: false },
                    title: Title::shown("Profit Over Time"),
                },
                scales: ChartScales {
                    x: Axis {
                        title: Title::shown("Date"),
                    },
                    y: Axis {
                        title: Title::shown("Profit ($)"),
                    },
                },
            },
        }
    }

    pub fn point_count(&self) -> usize {
        self.data.datasets.first().map_or(0, |d| d.data.len())
    }
}
