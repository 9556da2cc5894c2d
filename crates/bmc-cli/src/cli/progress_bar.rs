//! Terminal progress bar for icon resolution.

use bmc_core::dispatch::IconProgress;
use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Instant;

const BAR_WIDTH: usize = 50;
const PRINT_INTERVAL_MS: u128 = 200;

/// One progress line, e.g. `[#####-----] 50.0% | 5/10 | 2.0s | ETA 2.0s`.
pub(crate) fn render(stats: &IconProgress) -> String {
    let filled = ((stats.fraction() * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    let eta = stats
        .eta_secs()
        .map(|s| format!("{:.1}s", s))
        .unwrap_or_else(|| "?".to_string());
    format!(
        "[{}] {:.1}% | {}/{} | {:.1}s | ETA {}",
        bar,
        stats.fraction() * 100.0,
        stats.done,
        stats.total,
        stats.elapsed_secs,
        eta
    )
}

/// Draws progress from `rx` until the sender side is dropped.
pub fn print_progress(rx: mpsc::Receiver<IconProgress>) {
    let mut last_print: Option<Instant> = None;
    let mut printed = false;
    for stats in rx {
        let due = last_print.map_or(true, |t| t.elapsed().as_millis() >= PRINT_INTERVAL_MS);
        if due || stats.is_complete() {
            print!("\r{}", render(&stats));
            let _ = io::stdout().flush();
            last_print = Some(Instant::now());
            printed = true;
        }
    }
    if printed {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_half_done() {
        let line = render(&IconProgress {
            done: 5,
            total: 10,
            elapsed_secs: 2.0,
        });
        assert!(line.starts_with(&format!("[{}{}]", "█".repeat(25), "-".repeat(25))));
        assert!(line.contains("50.0% | 5/10 | 2.0s | ETA 2.0s"));
    }

    #[test]
    fn render_unknown_eta() {
        let line = render(&IconProgress {
            done: 0,
            total: 4,
            elapsed_secs: 0.0,
        });
        assert!(line.ends_with("ETA ?"));
    }
}
