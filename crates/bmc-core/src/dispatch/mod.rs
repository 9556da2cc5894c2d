//! Concurrent icon resolution over a whole [`Document`].
//!
//! A fixed pool of scoped worker threads pulls `&mut Website` references from
//! a shared queue, resolves each one to completion and writes the icon back
//! into that website. Completion order is arbitrary; document order is never
//! touched. A panic while resolving one website only affects that website,
//! which gets the fallback icon.

mod progress;

pub use progress::IconProgress;

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crate::icon::{IconStep, ResolveIcon, ResolvedIcon};
use crate::model::{Document, Website};

/// What a dispatcher run did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconSummary {
    /// Websites that still needed an icon.
    pub total: usize,
    /// Websites whose icon was written (equals `total` after a run).
    pub processed: usize,
    pub page_link: usize,
    pub favicon_ico: usize,
    pub favicon_service: usize,
    pub known_domain: usize,
    /// Nothing found, or resolution panicked.
    pub fallback: usize,
    /// Resolutions that panicked and were replaced by the fallback.
    pub panicked: usize,
    pub elapsed_secs: f64,
}

impl IconSummary {
    fn record(&mut self, step: Option<IconStep>) {
        match step {
            Some(IconStep::PageLink) => self.page_link += 1,
            Some(IconStep::FaviconIco) => self.favicon_ico += 1,
            Some(IconStep::FaviconService) => self.favicon_service += 1,
            Some(IconStep::KnownDomain) => self.known_domain += 1,
            None => self.fallback += 1,
        }
    }

    fn merge(&mut self, other: &IconSummary) {
        self.page_link += other.page_link;
        self.favicon_ico += other.favicon_ico;
        self.favicon_service += other.favicon_service;
        self.known_domain += other.known_domain;
        self.fallback += other.fallback;
        self.panicked += other.panicked;
    }
}

type WorkQueue<'d> = Mutex<VecDeque<&'d mut Website>>;

fn next_website<'d>(work: &WorkQueue<'d>) -> Option<&'d mut Website> {
    match work.lock() {
        Ok(mut queue) => queue.pop_front(),
        Err(poisoned) => poisoned.into_inner().pop_front(),
    }
}

fn run_worker<R: ResolveIcon + ?Sized>(
    work: &WorkQueue<'_>,
    resolver: &R,
    processed: &AtomicUsize,
    total: usize,
    started: Instant,
    progress_tx: Option<mpsc::Sender<IconProgress>>,
) -> IconSummary {
    let mut local = IconSummary::default();
    while let Some(website) = next_website(work) {
        let resolved = match panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve_icon(&website.url))) {
            Ok(resolved) => resolved,
            Err(_) => {
                tracing::warn!(url = %website.url, "icon resolution panicked; using fallback");
                local.panicked += 1;
                ResolvedIcon::fallback()
            }
        };
        local.record(resolved.step);
        website.icon = resolved.icon;

        let done = processed.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(tx) = &progress_tx {
            let _ = tx.send(IconProgress {
                done,
                total,
                elapsed_secs: started.elapsed().as_secs_f64(),
            });
        }
    }
    local
}

/// Resolves the icon of every website in `document` still showing the
/// loading icon, using up to `workers` threads (at least 1, never more than
/// there are websites to resolve). Websites that already carry a final icon
/// are left alone.
///
/// Blocks until every website has a final icon. If `progress_tx` is `Some`,
/// an [`IconProgress`] is sent after each website.
pub fn resolve_icons<R: ResolveIcon + ?Sized>(
    document: &mut Document,
    resolver: &R,
    workers: usize,
    progress_tx: Option<&mpsc::Sender<IconProgress>>,
) -> IconSummary {
    let started = Instant::now();
    let queue: VecDeque<&mut Website> = document
        .websites_mut()
        .filter(|website| website.icon_pending())
        .collect();
    let total = queue.len();
    let mut summary = IconSummary {
        total,
        ..IconSummary::default()
    };
    if total == 0 {
        return summary;
    }

    let num_workers = workers.max(1).min(total);
    tracing::info!(total, workers = num_workers, "resolving icons");

    let work: WorkQueue<'_> = Mutex::new(queue);
    let processed = AtomicUsize::new(0);

    thread::scope(|scope| {
        let work = &work;
        let processed = &processed;
        let handles: Vec<_> = (0..num_workers)
            .map(|_| {
                let tx = progress_tx.cloned();
                scope.spawn(move || run_worker(work, resolver, processed, total, started, tx))
            })
            .collect();
        for handle in handles {
            match handle.join() {
                Ok(local) => summary.merge(&local),
                Err(_) => tracing::error!("icon worker thread panicked"),
            }
        }
    });

    summary.processed = processed.load(Ordering::SeqCst);
    summary.elapsed_secs = started.elapsed().as_secs_f64();
    tracing::info!(
        processed = summary.processed,
        fallback = summary.fallback,
        "icon resolution finished in {:.2}s",
        summary.elapsed_secs
    );
    summary
}
