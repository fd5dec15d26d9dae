// -----------------------------------------------------------------------------
// EtaWindow

/// Default number of samples an [`EtaWindow`] averages over.
pub const DEFAULT_ETA_STEPS: usize = 20;

/// A fixed-size moving average over remaining-time estimates.
///
/// Raw per-step estimates jitter with whatever the job happened to do since
/// the last update; averaging the most recent `steps` samples keeps the
/// displayed value steady. The window starts zero-filled, so early averages
/// are biased low and ramp up as real samples arrive.
///
/// ```
/// use tk_console::EtaWindow;
///
/// let mut window = EtaWindow::new(4);
/// assert_eq!(window.push(8.0), 2.0);
/// assert_eq!(window.push(8.0), 4.0);
/// assert_eq!(window.push(8.0), 6.0);
/// assert_eq!(window.push(8.0), 8.0);
/// ```
#[derive(Clone, Debug)]
pub struct EtaWindow {
    samples: Vec<f64>,
    step: usize,
}

impl Default for EtaWindow {
    /// An [`EtaWindow`] over [`DEFAULT_ETA_STEPS`] samples.
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_ETA_STEPS)
    }
}

impl EtaWindow {
    /// Creates a zero-filled window over `steps` samples.
    ///
    /// # Panics
    ///
    /// Panics if `steps` is zero.
    pub fn new(steps: usize) -> Self {
        assert!(steps > 0, "an ETA window needs at least one sample slot");
        Self {
            samples: vec![0.0; steps],
            step: 0,
        }
    }

    /// Records a raw estimate and returns the smoothed value in seconds.
    ///
    /// The oldest sample is overwritten once the window is full.
    pub fn push(&mut self, eta_seconds: f64) -> f64 {
        let len = self.samples.len();
        self.samples[self.step % len] = eta_seconds;
        self.step += 1;
        self.samples.iter().sum::<f64>() / len as f64
    }

    /// Zeroes the window for a fresh run.
    pub fn reset(&mut self) {
        self.samples.fill(0.0);
        self.step = 0;
    }
}

// -----------------------------------------------------------------------------
// format_eta

/// Formats a second count as `H:MM:SS`, with unbounded hours.
///
/// ```
/// use tk_console::format_eta;
///
/// assert_eq!(format_eta(100.0), "0:01:40");
/// assert_eq!(format_eta(86_461.0), "24:01:01");
/// ```
///
/// Negative or non-finite inputs clamp to `0:00:00`.
pub fn format_eta(eta_seconds: f64) -> String {
    let total = if eta_seconds.is_finite() && eta_seconds > 0.0 {
        eta_seconds as u64
    } else {
        0
    };
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    format!("{hours}:{minutes:02}:{seconds:02}")
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{EtaWindow, format_eta};

    #[test]
    fn window_ramps_up_from_zero() {
        let mut window = EtaWindow::new(2);
        assert_eq!(window.push(10.0), 5.0);
        assert_eq!(window.push(10.0), 10.0);
    }

    #[test]
    fn window_overwrites_oldest_sample() {
        let mut window = EtaWindow::new(2);
        window.push(4.0);
        window.push(4.0);
        // Replaces the first sample, not the second.
        assert_eq!(window.push(8.0), 6.0);
    }

    #[test]
    fn reset_zeroes_the_window() {
        let mut window = EtaWindow::new(3);
        window.push(9.0);
        window.reset();
        assert_eq!(window.push(3.0), 1.0);
    }

    #[test]
    #[should_panic(expected = "at least one sample slot")]
    fn zero_width_window_is_rejected() {
        let _ = EtaWindow::new(0);
    }

    #[test]
    fn eta_formatting() {
        assert_eq!(format_eta(0.0), "0:00:00");
        assert_eq!(format_eta(59.9), "0:00:59");
        assert_eq!(format_eta(60.0), "0:01:00");
        assert_eq!(format_eta(3_600.0), "1:00:00");
        assert_eq!(format_eta(90_061.5), "25:01:01");
        assert_eq!(format_eta(-5.0), "0:00:00");
        assert_eq!(format_eta(f64::NAN), "0:00:00");
        assert_eq!(format_eta(f64::INFINITY), "0:00:00");
    }
}
