//! Scatter map of the selected leads, shaped as a Plotly `scattermapbox` figure.

use crate::config::MapConfig;
use crate::filter::Subset;
use crate::types::Lead;
use geo::Point;
use serde::Serialize;

pub const MAP_TITLE: &str = "Map of Leads";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFigure {
    pub data: Vec<ScatterMapbox>,
    pub layout: MapLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMapbox {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    pub text: Vec<String>,
    pub mode: &'static str,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
    pub opacity: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    pub title: String,
    pub mapbox: Mapbox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapbox {
    pub style: String,
    pub center: Center,
    pub zoom: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl From<Point<f64>> for Center {
    fn from(point: Point<f64>) -> Self {
        Center {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

impl MapFigure {
    pub fn point_count(&self) -> usize {
        self.data.iter().map(|trace| trace.lat.len()).sum()
    }
}

/// Location of a lead, if it has one that can be plotted.
pub fn lead_point(lead: &Lead) -> Option<Point<f64>> {
    let (lat, lon) = (lead.latitude?, lead.longitude?);
    let valid = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);
    valid.then(|| Point::new(lon, lat))
}

pub fn hover_label(lead: &Lead) -> String {
    let income = match lead.monthly_total_income {
        Some(v) if !v.is_nan() => format!("{:.2}", v),
        _ => "nan".to_string(),
    };
    format!("{}<br>Monthly Income: ${}", lead.name, income)
}

pub fn build_map(subset: &Subset<'_>, config: &MapConfig) -> MapFigure {
    let mut lat = Vec::with_capacity(subset.len());
    let mut lon = Vec::with_capacity(subset.len());
    let mut text = Vec::with_capacity(subset.len());

    for lead in subset.iter() {
        if let Some(point) = lead_point(lead) {
            lat.push(point.y());
            lon.push(point.x());
            text.push(hover_label(lead));
        }
    }

    // Fixed view: the map does not recenter on the selected points.
    let center = Point::new(config.center_lon, config.center_lat);

    MapFigure {
        data: vec![ScatterMapbox {
            kind: "scattermapbox",
            lat,
            lon,
            text,
            mode: "markers",
            marker: Marker {
                size: config.marker_size,
                opacity: config.marker_opacity,
                color: config.marker_color.clone(),
            },
        }],
        layout: MapLayout {
            title: MAP_TITLE.to_string(),
            mapbox: Mapbox {
                style: config.style.clone(),
                center: center.into(),
                zoom: config.zoom,
            },
        },
    }
}
