//! `bmc convert <input> [output]` – parse an export, resolve icons, write the file.

use anyhow::Result;
use bmc_core::config::BmcConfig;
use bmc_core::convert::{convert_file, ConvertOptions, ConvertReport};
use bmc_core::dispatch::IconProgress;
use bmc_core::output::normalize_output_path;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use crate::cli::{preflight, progress_bar};

pub fn run_convert(
    cfg: &BmcConfig,
    input: &Path,
    output: Option<&Path>,
    workers: Option<usize>,
    no_icons: bool,
) -> Result<()> {
    let output = normalize_output_path(output);
    println!("{}", "=".repeat(50));
    println!("Chrome/Edge bookmark converter");
    println!("{}", "=".repeat(50));
    println!("Input:  {}", input.display());
    println!("Output: {}", output.display());

    preflight::check(input, &output)?;

    let options = ConvertOptions {
        workers: workers.unwrap_or(cfg.workers),
        offline: no_icons,
    };
    if options.offline {
        println!("Skipping icon download (--no-icons)");
    } else {
        println!("Fetching icons with {} worker(s)...", options.workers.max(1));
    }

    let (progress_tx, progress_rx) = mpsc::channel::<IconProgress>();
    let printer = thread::spawn(move || progress_bar::print_progress(progress_rx));
    let result = convert_file(input, &output, cfg, options, Some(&progress_tx));
    drop(progress_tx);
    let _ = printer.join();

    let report = result?;
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &ConvertReport) {
    let stats = &report.stats;
    let icons = &report.icons;
    println!();
    println!("Done! Saved to {} ({:.2} KiB)", report.output.display(), report.bytes_written as f64 / 1024.0);
    println!("Summary:");
    println!("  Categories:    {}", stats.categories);
    println!("  Sections:      {}", stats.sections);
    println!("  Websites:      {}", stats.websites);
    println!("  Custom icons:  {}", stats.custom_icons);
    println!("  Default icons: {}", stats.fallback_icons);
    if icons.processed > 0 {
        println!(
            "  Icon sources:  page {}, favicon.ico {}, service {}, known domain {} ({:.1}s)",
            icons.page_link,
            icons.favicon_ico,
            icons.favicon_service,
            icons.known_domain,
            icons.elapsed_secs
        );
    }
}
