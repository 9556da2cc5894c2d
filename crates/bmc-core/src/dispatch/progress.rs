//! Icon resolution progress messages.

/// Sent on the progress channel each time a website receives its final icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconProgress {
    pub done: usize,
    pub total: usize,
    /// Seconds since the dispatcher started.
    pub elapsed_secs: f64,
}

impl IconProgress {
    /// Websites still waiting for an icon.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.done)
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Share of websites resolved; an empty run counts as finished.
    pub fn fraction(&self) -> f64 {
        match self.total {
            0 => 1.0,
            total => (self.done as f64 / total as f64).min(1.0),
        }
    }

    /// Remaining time extrapolated from the average time per website so far.
    pub fn eta_secs(&self) -> Option<f64> {
        if self.is_complete() {
            return Some(0.0);
        }
        if self.done == 0 || self.elapsed_secs <= 0.0 {
            return None;
        }
        let secs_per_site = self.elapsed_secs / self.done as f64;
        Some(secs_per_site * self.remaining() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(done: usize, total: usize, elapsed_secs: f64) -> IconProgress {
        IconProgress {
            done,
            total,
            elapsed_secs,
        }
    }

    #[test]
    fn quarter_done_extrapolates() {
        let p = progress(10, 40, 5.0);
        assert_eq!(p.remaining(), 30);
        assert!((p.eta_secs().unwrap() - 15.0).abs() < 1e-9);
        assert!((p.fraction() - 0.25).abs() < 1e-9);
        assert!(!p.is_complete());
    }

    #[test]
    fn no_estimate_before_first_website() {
        assert_eq!(progress(0, 3, 0.0).eta_secs(), None);
        assert_eq!(progress(0, 3, 4.0).eta_secs(), None);
    }

    #[test]
    fn empty_run_is_complete() {
        let p = progress(0, 0, 1.0);
        assert_eq!(p.fraction(), 1.0);
        assert_eq!(p.eta_secs(), Some(0.0));
        assert!(p.is_complete());
    }
}
