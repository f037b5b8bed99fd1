/// Seconds of the time axis shown when a file is first drawn.
pub const DEFAULT_WINDOW_SECS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    seconds: u32,
}

impl TimeWindow {
    /// Whole seconds, at least one.
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds: seconds.max(1),
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn as_secs_f64(&self) -> f64 {
        f64::from(self.seconds)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow {
            seconds: DEFAULT_WINDOW_SECS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum YScale {
    /// Fit the visible samples, padded so a flat line still gets some height.
    Auto,
    Fixed { min: f64, max: f64 },
}

impl YScale {
    pub fn bounds<'a>(&self, values: impl Iterator<Item = &'a f64>) -> Option<(f64, f64)> {
        match *self {
            YScale::Fixed { min, max } => Some((min, max)),
            YScale::Auto => {
                let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
                if min > max {
                    return None;
                }
                let pad = ((max - min) * 0.1).max(1.0);
                Some((min - pad, max + pad))
            }
        }
    }
}

impl Default for YScale {
    fn default() -> Self {
        YScale::Auto
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_at_least_one_second() {
        assert_eq!(TimeWindow::new(0).seconds(), 1);
        assert_eq!(TimeWindow::new(25).seconds(), 25);
        assert_eq!(TimeWindow::default().seconds(), 10);
    }

    #[test]
    fn auto_scale_pads_flat_lines() {
        let values = [2.0, 2.0, 2.0];
        assert_eq!(YScale::Auto.bounds(values.iter()), Some((1.0, 3.0)));
        assert_eq!(YScale::Auto.bounds([].iter()), None);
    }

    #[test]
    fn auto_scale_pads_by_a_tenth_of_the_span() {
        let values = [0.0, 100.0];
        assert_eq!(YScale::Auto.bounds(values.iter()), Some((-10.0, 110.0)));
    }
}
