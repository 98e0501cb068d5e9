//! Fraction-to-percentage conversion for progress events.

use crate::events::{DownloadEvent, EventHub};

/// Whole percentage for a transfer fraction, rounded toward zero.
///
/// The fraction is clamped to `[0.0, 1.0]` first (NaN counts as 0), so only
/// an exact `1.0` yields 100.
pub fn percent(fraction: f64) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).floor() as u8
}

/// Emits progress events for one file, dropping repeats of the last percentage.
pub(super) struct PercentReporter<'a> {
    events: &'a EventHub,
    last: u8,
}

impl<'a> PercentReporter<'a> {
    /// Starts after the per-file reset, so 0 counts as already emitted.
    pub(super) fn after_reset(events: &'a EventHub) -> Self {
        Self { events, last: 0 }
    }

    pub(super) fn report(&mut self, fraction: f64) {
        let pct = percent(fraction);
        if pct != self.last {
            self.last = pct;
            self.events.emit(DownloadEvent::Progress(pct));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(0.009), 0);
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(0.999), 99);
        assert_eq!(percent(0.99999), 99);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(percent(-0.5), 0);
        assert_eq!(percent(1.5), 100);
        assert_eq!(percent(f64::NAN), 0);
        assert_eq!(percent(f64::INFINITY), 100);
    }

    #[test]
    fn reporter_coalesces_repeats() {
        let hub = EventHub::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        hub.on_progress(move |p| s.lock().unwrap().push(p));

        let mut reporter = PercentReporter::after_reset(&hub);
        for f in [0.001, 0.25, 0.251, 0.5, 0.5, 1.0] {
            reporter.report(f);
        }
        assert_eq!(*seen.lock().unwrap(), vec![25, 50, 100]);
    }
}
