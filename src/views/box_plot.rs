//! Monthly income distribution per lead source.

use crate::filter::Subset;
use serde::Serialize;
use std::collections::HashMap;

pub const BOX_PLOT_TITLE: &str = "Box Plot of Monthly Total Income by Source";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotFigure {
    pub data: Vec<BoxTrace>,
    pub layout: BoxLayout,
    /// Per-source statistics, in the same order as `data`.
    pub groups: Vec<SourceGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceGroup {
    pub source: String,
    pub incomes: Vec<f64>,
    pub stats: Option<BoxStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub orientation: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxLayout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn from_sample(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(BoxStats {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Groups by source in first-appearance order. Leads without a source are
/// left out; leads without an income still create their source's group.
pub fn group_by_source(subset: &Subset<'_>) -> Vec<SourceGroup> {
    let mut groups: Vec<SourceGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for lead in subset.iter() {
        let Some(source) = lead.source.as_deref() else {
            continue;
        };
        let idx = *index.entry(source).or_insert_with(|| {
            groups.push(SourceGroup {
                source: source.to_string(),
                incomes: Vec::new(),
                stats: None,
            });
            groups.len() - 1
        });
        if let Some(income) = lead.monthly_total_income.filter(|v| !v.is_nan()) {
            groups[idx].incomes.push(income);
        }
    }

    for group in &mut groups {
        group.stats = BoxStats::from_sample(&group.incomes);
    }
    groups
}

pub fn build_box_plot(subset: &Subset<'_>) -> BoxPlotFigure {
    let groups = group_by_source(subset);

    let data = groups
        .iter()
        .map(|g| BoxTrace {
            kind: "box",
            name: g.source.clone(),
            orientation: "h",
            x: g.incomes.clone(),
            y: vec![g.source.clone(); g.incomes.len()],
        })
        .collect();

    BoxPlotFigure {
        data,
        layout: BoxLayout {
            title: BOX_PLOT_TITLE.to_string(),
            xaxis: Axis {
                title: "monthly_total_income".to_string(),
            },
            yaxis: Axis {
                title: "source".to_string(),
            },
            showlegend: false,
        },
        groups,
    }
}
