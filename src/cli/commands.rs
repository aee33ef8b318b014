//! Command implementations for the carpark-info CLI
//!
//! Each subcommand builds a `CarparkContext` from the global flags, loads what
//! it needs and prints one report to stdout. Logging goes to stderr.

use crate::app::context::CarparkContext;
use crate::app::services::map_markers;
use crate::app::services::query::{self, MapFilter};
use crate::cli::args::{
    Args, Commands, ExportArgs, LocationArgs, MarkersArgs, PercentArgs, SnapshotArgs,
};
use crate::cli::menu::Menu;
use crate::cli::report;
use crate::constants::BASEMENT_CARPARK_TYPE;
use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{debug, info};

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config();
    config.validate()?;
    let mut context = CarparkContext::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        None | Some(Commands::Menu) => run_menu(&mut context),
        Some(Commands::Catalog) => run_catalog(&mut context, &mut out),
        Some(Commands::Basements) => run_basements(&mut context, &mut out),
        Some(Commands::Load(source)) => run_load(&mut context, &source, &mut out),
        Some(Commands::Full(source)) => run_full(&mut context, &source, &mut out),
        Some(Commands::Available(percent)) => {
            run_available(&mut context, &percent, false, &mut out)
        }
        Some(Commands::Addresses(percent)) => {
            run_available(&mut context, &percent, true, &mut out)
        }
        Some(Commands::Location(location)) => run_location(&mut context, &location, &mut out),
        Some(Commands::MostLots(source)) => run_most_lots(&mut context, &source, &mut out),
        Some(Commands::Export(export)) => run_export(&mut context, &export, &mut out),
        Some(Commands::Markers(markers)) => run_markers(&mut context, &markers, &mut out),
        Some(Commands::Sources) => run_sources(&context, &mut out),
    }
}

/// Set up tracing to stderr; `RUST_LOG` overrides the flag-derived level
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("carpark_info={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

fn run_menu(context: &mut CarparkContext) -> Result<()> {
    // Fail early on a missing metadata file rather than at the first option
    context.catalog().context("Failed to load carpark metadata")?;

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout());
    menu.run(context)
}

fn run_catalog<W: Write>(context: &mut CarparkContext, out: &mut W) -> Result<()> {
    let catalog = context.catalog()?;
    report::write_catalog_total(out, &catalog, &context.config().catalog_file)?;
    Ok(())
}

fn run_basements<W: Write>(context: &mut CarparkContext, out: &mut W) -> Result<()> {
    let catalog = context.catalog()?;
    report::write_basements(out, &catalog.records_of_type(BASEMENT_CARPARK_TYPE))?;
    Ok(())
}

fn load(context: &mut CarparkContext, source: &SnapshotArgs) -> Result<()> {
    context
        .load_snapshot_file(&source.snapshot)
        .with_context(|| format!("Failed to load snapshot '{}'", source.snapshot))?;
    Ok(())
}

fn run_load<W: Write>(
    context: &mut CarparkContext,
    source: &SnapshotArgs,
    out: &mut W,
) -> Result<()> {
    load(context, source)?;
    let snapshot = context.snapshot()?;
    report::write_snapshot_loaded(out, snapshot)?;
    report::write_snapshot_total(out, snapshot)?;
    Ok(())
}

fn run_full<W: Write>(
    context: &mut CarparkContext,
    source: &SnapshotArgs,
    out: &mut W,
) -> Result<()> {
    load(context, source)?;
    let full = query::records_with_zero_availability(&context.snapshot()?.records);
    report::write_full(out, &full)?;
    Ok(())
}

fn run_available<W: Write>(
    context: &mut CarparkContext,
    args: &PercentArgs,
    with_address: bool,
    out: &mut W,
) -> Result<()> {
    load(context, &args.source)?;
    let records = query::filter_by_min_percentage(
        &context.snapshot()?.records,
        f64::from(args.min_percent),
    );
    report::write_availability(out, &records, with_address)?;
    Ok(())
}

fn run_location<W: Write>(
    context: &mut CarparkContext,
    args: &LocationArgs,
    out: &mut W,
) -> Result<()> {
    load(context, &args.source)?;
    let records = query::filter_by_address(&context.snapshot()?.records, &args.query);
    report::write_location(out, &args.query, &records)?;
    Ok(())
}

fn run_most_lots<W: Write>(
    context: &mut CarparkContext,
    source: &SnapshotArgs,
    out: &mut W,
) -> Result<()> {
    load(context, source)?;
    let record = query::max_total_lots(&context.snapshot()?.records)?;
    report::write_most_lots(out, record)?;
    Ok(())
}

fn run_export<W: Write>(
    context: &mut CarparkContext,
    args: &ExportArgs,
    out: &mut W,
) -> Result<()> {
    load(context, &args.source)?;
    let summary = context.export().context("Failed to write export file")?;
    info!("Export complete: {}", summary.path.display());
    report::write_export_summary(out, &summary)?;
    Ok(())
}

fn run_markers<W: Write>(
    context: &mut CarparkContext,
    args: &MarkersArgs,
    out: &mut W,
) -> Result<()> {
    load(context, &args.source)?;
    let filter = MapFilter::new(args.location.as_str(), f64::from(args.min_percent));
    let markers = context.markers(&filter, args.most_lots)?;

    if args.json {
        writeln!(out, "{}", map_markers::markers_to_json(&markers)?)?;
    } else {
        report::write_markers(out, &markers)?;
    }
    Ok(())
}

fn run_sources<W: Write>(context: &CarparkContext, out: &mut W) -> Result<()> {
    let paths = context.discover_snapshots()?;
    report::write_sources(out, &paths)?;
    Ok(())
}
