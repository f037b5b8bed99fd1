use crate::decode::{LoadOutcome, SeriesSummary, TimeSeries};
use crate::viewer::view::{ChartSeries, ViewBounds};
use crate::viewer::window::{TimeWindow, YScale};

/// Everything the renderer reads. A load replaces the file, series and summary in
/// one assignment so a half-updated state is never drawn.
#[derive(Clone, Debug, Default)]
pub struct ViewerState {
    loaded: Loaded,
    window: TimeWindow,
    y_scale: YScale,
}

#[derive(Clone, Debug, Default)]
struct Loaded {
    file_name: Option<String>,
    series: TimeSeries,
    summary: Option<SeriesSummary>,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, outcome: LoadOutcome) {
        self.loaded = Loaded {
            file_name: Some(outcome.file_name),
            series: outcome.series,
            summary: outcome.summary,
        };
    }

    pub fn file_name(&self) -> Option<&str> {
        self.loaded.file_name.as_deref()
    }

    pub fn series(&self) -> &TimeSeries {
        &self.loaded.series
    }

    pub fn summary(&self) -> Option<&SeriesSummary> {
        self.loaded.summary.as_ref()
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn set_window_size(&mut self, seconds: u32) {
        self.window = TimeWindow::new(seconds);
    }

    /// The window already takes effect as soon as it changes; this is kept as an
    /// explicit action that does nothing.
    pub fn apply_window(&self) {
        log::debug!("apply: window is {} s", self.window.seconds());
    }

    pub fn reset_window(&mut self) {
        self.window = TimeWindow::default();
    }

    pub fn set_y_scale(&mut self, y_scale: YScale) {
        self.y_scale = y_scale;
    }

    /// `[0, min(window, last time value)]`, or `None` when there is nothing to draw.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let last = self.loaded.series.last_time()?;
        Some((0.0, self.window.as_secs_f64().min(last)))
    }

    /// Value range of the samples inside [`Self::x_range`], across all channels.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let (start, end) = self.x_range()?;
        let series = &self.loaded.series;
        let visible = series.window_indices(start, end);
        let values = series
            .channels()
            .iter()
            .flat_map(|c| c.values[visible.clone()].iter());
        self.y_scale.bounds(values)
    }

    /// Like [`Self::y_range`] but for a single channel, for stacked panes.
    pub fn channel_y_range(&self, channel: usize) -> Option<(f64, f64)> {
        let (start, end) = self.x_range()?;
        let series = &self.loaded.series;
        let values = &series.channels().get(channel)?.values;
        self.y_scale
            .bounds(values[series.window_indices(start, end)].iter())
    }

    pub fn view_bounds(&self) -> Option<ViewBounds> {
        Some(ViewBounds {
            x: self.x_range()?,
            y: self.y_range()?,
        })
    }

    pub fn channel_view_bounds(&self, channel: usize) -> Option<ViewBounds> {
        Some(ViewBounds {
            x: self.x_range()?,
            y: self.channel_y_range(channel)?,
        })
    }

    pub fn chart_series(&self) -> Vec<ChartSeries> {
        let series = &self.loaded.series;
        series
            .channels()
            .iter()
            .map(|channel| ChartSeries {
                name: channel.name.clone(),
                x: series.time().to_vec(),
                y: channel.values.clone(),
            })
            .collect()
    }
}
