pub mod state;
pub mod view;
pub mod window;

pub use state::ViewerState;
pub use view::{ChartSeries, ViewBounds};
pub use window::{TimeWindow, YScale, DEFAULT_WINDOW_SECS};
