use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use saf_lca::cli::cli::{Args, Command};
use saf_lca::config::dashboard_config::DashboardConfig;
use saf_lca::error::DashboardError;
use saf_lca::pages::page_output::{PageContext, PageKind, PageOutput};
use saf_lca::pages::{about, contribution, heatmap, monetization, overview, prospective, raw_data};
use saf_lca::utils::csv_export::CsvExporter;
use saf_lca::utils::logging;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging());

    println!("SAF LCA Dashboard");

    let config = build_config(&args)?;
    let exporter = CsvExporter::new(&config.output_dir, config.timestamped_output)
        .with_context(|| format!("Could not create output directory {}", config.output_dir.display()))?;
    info!(output = %exporter.output_dir().display(), "writing dashboard output");

    let ctx = PageContext::new(&config, &exporter);
    let failures = match args.command().page() {
        Some(page) => usize::from(!report(page, render_page(page, &ctx, args.command()))),
        None => render_all(&ctx, args.command()),
    };

    logging::print_timing_report();

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Defaults, then the JSON config, then command-line flags.
fn build_config(args: &Args) -> Result<DashboardConfig> {
    let mut config = match args.config() {
        Some(path) => DashboardConfig::load_from_json(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    if let Some(dir) = args.data_dir() {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = args.output_dir() {
        config.output_dir = dir.clone();
    }
    if args.no_timestamp() {
        config.timestamped_output = false;
    }
    config
        .apply_color_overrides(args.command().color_overrides())
        .context("Invalid --color override")?;

    Ok(config)
}

fn render_page(page: PageKind, ctx: &PageContext<'_>, command: &Command) -> Result<PageOutput, DashboardError> {
    match page {
        PageKind::Overview => overview::render(ctx, &command.overview_options()),
        PageKind::Monetization => monetization::render(ctx, &command.monetization_options()),
        PageKind::Contribution => contribution::render(ctx, &command.contribution_options()),
        PageKind::Heatmap => heatmap::render(ctx),
        PageKind::Prospective => prospective::render(ctx, &command.prospective_options()),
        PageKind::RawData => raw_data::render(ctx, &command.raw_data_options()),
        PageKind::About => Ok(about::render()),
    }
}

/// Prints what a page wrote; returns false when it failed.
fn report(page: PageKind, result: Result<PageOutput, DashboardError>) -> bool {
    match result {
        Ok(output) => {
            print!("{}", output);
            true
        }
        Err(e) if e.is_missing_input() => {
            eprintln!("❌ {}: {}", page, e);
            false
        }
        Err(e) => {
            error!(page = %page, "page failed: {}", e);
            eprintln!("❌ {} failed: {}", page, e);
            false
        }
    }
}

/// Every page in order; a failing page does not stop the rest.
fn render_all(ctx: &PageContext<'_>, command: &Command) -> usize {
    let pb = ProgressBar::new(PageKind::ALL.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style);
    }

    let mut failures = 0;
    for page in PageKind::ALL {
        pb.set_message(page.title());
        let ok = pb.suspend(|| {
            println!("\n== {} ==", page);
            report(page, render_page(page, ctx, command))
        });
        if !ok {
            failures += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    if failures > 0 {
        eprintln!("{} of {} pages failed", failures, PageKind::ALL.len());
    }
    failures
}
