//! Pure builders turning a filtered subset into the three dashboard views.
//! Each one accepts any subset, the empty one included.

pub mod box_plot;
pub mod map;
pub mod summary;

pub use box_plot::{build_box_plot, BoxPlotFigure};
pub use map::{build_map, MapFigure};
pub use summary::{build_summary, SummaryRow};
