use std::fmt;
use std::io::{self, Stdout, Write};
use std::time::Instant;

use crate::eta::{EtaWindow, format_eta};

// -----------------------------------------------------------------------------
// ProgressBar

/// A single-line terminal progress bar with a smoothed remaining-time
/// estimate.
///
/// Every [`progress`](ProgressBar::progress) call redraws the line in place
/// (leading `\r`, no newline): a bracketed bar filled proportionally to the
/// given percentage, the estimate, and a caller-formatted trailer. Trailing
/// blanks pad each redraw so a shorter line fully covers a longer one.
///
/// ```no_run
/// use tk_console::ProgressBar;
///
/// let mut bar = ProgressBar::new(30);
/// for step in 1..=100 {
///     // ... one unit of work ...
///     bar.progress(step as f64, format_args!(" step {step}/100")).unwrap();
/// }
/// ```
///
/// The estimate extrapolates the time spent since the previous call over the
/// remaining percentage, averaged through an [`EtaWindow`]. A call that
/// repeats the previous percentage carries no timing information and is
/// skipped without touching the terminal.
pub struct ProgressBar<W: Write = Stdout> {
    writer: W,
    length: usize,
    eta: Option<EtaWindow>,
    prev_time: Instant,
    prev_percent: f64,
}

impl ProgressBar<Stdout> {
    /// Creates a bar of `length` columns writing to stdout, with the
    /// default [`EtaWindow`].
    pub fn new(length: usize) -> Self {
        Self::with_writer(length, io::stdout())
    }
}

impl<W: Write> ProgressBar<W> {
    /// Creates a bar of `length` columns writing to `writer`.
    pub fn with_writer(length: usize, writer: W) -> Self {
        Self {
            writer,
            length,
            eta: Some(EtaWindow::default()),
            prev_time: Instant::now(),
            prev_percent: -1.0,
        }
    }

    /// Replaces the smoothing window with one over `steps` samples.
    #[must_use]
    pub fn with_eta_steps(mut self, steps: usize) -> Self {
        self.eta = Some(EtaWindow::new(steps));
        self
    }

    /// Drops the estimate from the rendered line entirely.
    #[must_use]
    pub fn without_eta(mut self) -> Self {
        self.eta = None;
        self
    }

    /// Redraws the bar at `percent` (a `0.0..=100.0` scale), appending
    /// `info` after the estimate.
    ///
    /// Repeating the previous percentage is a no-op: no time has been
    /// attributed to progress, so there is nothing new to show.
    pub fn progress(&mut self, percent: f64, info: fmt::Arguments<'_>) -> io::Result<()> {
        if percent == self.prev_percent {
            return Ok(());
        }
        let now = Instant::now();
        let step_eta = now.duration_since(self.prev_time).as_secs_f64()
            / (percent - self.prev_percent)
            * (100.0 - percent);
        self.prev_time = now;
        self.prev_percent = percent;

        let filled = (percent * self.length as f64 / 100.0) as usize;
        let filled = filled.min(self.length);

        write!(self.writer, "\r[")?;
        for _ in 0..filled {
            write!(self.writer, "=")?;
        }
        for _ in filled..self.length {
            write!(self.writer, " ")?;
        }
        write!(self.writer, "]")?;
        if let Some(window) = &mut self.eta {
            let smoothed = window.push(step_eta);
            write!(self.writer, "(eta: {})", format_eta(smoothed))?;
        }
        write!(self.writer, "{info}")?;
        // Blank out leftovers from a previously longer line.
        write!(self.writer, "{:10}", "")?;
        self.writer.flush()
    }

    /// Rewinds the bar for a fresh run: clears the smoothing window and
    /// restarts the timing baseline.
    pub fn reset(&mut self) {
        if let Some(window) = &mut self.eta {
            window.reset();
        }
        self.prev_time = Instant::now();
        self.prev_percent = -1.0;
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ProgressBar;

    fn rendered(buf: &[u8]) -> &str {
        core::str::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_bar_and_trailer_in_place() {
        let mut bar = ProgressBar::with_writer(10, Vec::new()).without_eta();
        bar.progress(50.0, format_args!(" halfway")).unwrap();

        assert_eq!(rendered(&bar.writer), "\r[=====     ] halfway          ");
    }

    #[test]
    fn fill_scales_with_the_percentage() {
        let mut bar = ProgressBar::with_writer(20, Vec::new()).without_eta();
        bar.progress(25.0, format_args!("")).unwrap();
        assert!(rendered(&bar.writer).starts_with("\r[=====               ]"));

        bar.writer.clear();
        bar.progress(100.0, format_args!("")).unwrap();
        assert!(rendered(&bar.writer).starts_with("\r[====================]"));
    }

    #[test]
    fn repeated_percentage_is_skipped() {
        let mut bar = ProgressBar::with_writer(10, Vec::new()).without_eta();
        bar.progress(30.0, format_args!("")).unwrap();
        let first_len = bar.writer.len();

        bar.progress(30.0, format_args!("")).unwrap();
        assert_eq!(bar.writer.len(), first_len);
    }

    #[test]
    fn reset_allows_replaying_a_percentage() {
        let mut bar = ProgressBar::with_writer(10, Vec::new()).without_eta();
        bar.progress(30.0, format_args!("")).unwrap();
        bar.reset();

        let before = bar.writer.len();
        bar.progress(30.0, format_args!("")).unwrap();
        assert!(bar.writer.len() > before);
    }

    #[test]
    fn eta_segment_is_present_by_default() {
        let mut bar = ProgressBar::with_writer(5, Vec::new());
        bar.progress(40.0, format_args!("")).unwrap();

        assert!(rendered(&bar.writer).contains("](eta: "));
    }
}
