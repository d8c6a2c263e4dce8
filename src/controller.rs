//! Binds the selector to the three views. Every update recomputes the filter
//! and all builders in one synchronous call and swaps the results in together.

use crate::config::MapConfig;
use crate::filter::filter;
use crate::types::{Dataset, Selector};
use crate::views::{build_box_plot, build_map, build_summary, BoxPlotFigure, MapFigure, SummaryRow};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Everything one update produces, always from the same subset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifacts {
    pub selector: Selector,
    pub map: MapFigure,
    pub box_plot: BoxPlotFigure,
    pub summary: Vec<SummaryRow>,
}

pub fn compute_artifacts(dataset: &Dataset, selector: &Selector, map_config: &MapConfig) -> Artifacts {
    let subset = filter(dataset, selector);
    debug!("Selector {:?} matched {} leads", selector.as_str(), subset.len());

    Artifacts {
        selector: selector.clone(),
        map: build_map(&subset, map_config),
        box_plot: build_box_plot(&subset),
        summary: build_summary(&subset),
    }
}

#[derive(Debug, Clone)]
pub enum ControllerState {
    Idle {
        selector: Selector,
        artifacts: Arc<Artifacts>,
    },
    Recomputing {
        selector: Selector,
    },
}

pub struct ReactiveController {
    dataset: Arc<Dataset>,
    map_config: MapConfig,
    state: ControllerState,
}

impl ReactiveController {
    /// Starts idle on `All`, with the initial render already computed.
    pub fn new(dataset: Arc<Dataset>, map_config: MapConfig) -> Self {
        let selector = Selector::All;
        let artifacts = Arc::new(compute_artifacts(&dataset, &selector, &map_config));
        Self {
            dataset,
            map_config,
            state: ControllerState::Idle { selector, artifacts },
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn selector(&self) -> &Selector {
        match &self.state {
            ControllerState::Idle { selector, .. } | ControllerState::Recomputing { selector } => selector,
        }
    }

    /// The last rendered artifacts; `None` only while recomputing.
    pub fn current(&self) -> Option<Arc<Artifacts>> {
        match &self.state {
            ControllerState::Idle { artifacts, .. } => Some(Arc::clone(artifacts)),
            ControllerState::Recomputing { .. } => None,
        }
    }

    pub fn on_selector_change(&mut self, selector: Selector) -> Arc<Artifacts> {
        if let ControllerState::Idle { selector: current, artifacts } = &self.state {
            if *current == selector {
                return Arc::clone(artifacts);
            }
        }

        self.state = ControllerState::Recomputing {
            selector: selector.clone(),
        };
        let artifacts = Arc::new(compute_artifacts(&self.dataset, &selector, &self.map_config));
        self.state = ControllerState::Idle {
            selector,
            artifacts: Arc::clone(&artifacts),
        };
        artifacts
    }
}
