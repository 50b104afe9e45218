//! vehicle-tco entry point: CLI wiring and catalog-driven reports.

use std::path::Path;
use std::process;

use tracing::{Level, debug};
use vehicle_tco::catalog::Catalog;
use vehicle_tco::compare::ComparatorConfig;
use vehicle_tco::config::CatalogConfig;
use vehicle_tco::error::CostError;
use vehicle_tco::io::export::{export_comparison_csv, export_ranking_csv};
use vehicle_tco::reporting::{ComparisonReport, RankingReport};
use vehicle_tco::runner::{ComparisonRun, evaluate_catalog, run_comparison};
use vehicle_tco::trip;

/// Preset used when neither `--catalog` nor `--preset` is given.
const DEFAULT_PRESET: &str = "commuter";

/// Parsed CLI arguments.
struct CliArgs {
    catalog_path: Option<String>,
    preset: Option<String>,
    compare: Option<(String, String)>,
    years: Option<u32>,
    opportunity_rate: Option<f64>,
    ranking_out: Option<String>,
    comparison_out: Option<String>,
    trip: bool,
    verbose: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("vehicle-tco: vehicle total-cost-of-ownership calculator");
    eprintln!();
    eprintln!("Usage: vehicle-tco [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --catalog <path>           Load vehicles from a TOML catalog");
    eprintln!(
        "  --preset <name>            Use a built-in catalog ({})",
        CatalogConfig::PRESETS.join(", ")
    );
    eprintln!("  --compare <A> <B>          Compare two vehicles year by year");
    eprintln!("  --years <n>                Override the comparison horizon");
    eprintln!("  --opportunity-rate <f>     Override the yearly opportunity-cost factor");
    eprintln!("  --ranking-out <path>       Export the ranking to CSV");
    eprintln!("  --comparison-out <path>    Export the comparison years to CSV");
    eprintln!("  --trip                     Print the road-trip charging tables");
    eprintln!("  --verbose                  Log debug events to stderr");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                    Start REST API server after the reports");
        eprintln!("  --port <u16>               API server port (default: 3000)");
    }
    eprintln!("  --help                     Show this help message");
    eprintln!();
    eprintln!("If no --catalog or --preset is given, the {DEFAULT_PRESET} preset is used.");
}

/// Returns the value following flag `args[*i]`, or exits with an error.
fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str, what: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        catalog_path: None,
        preset: None,
        compare: None,
        years: None,
        opportunity_rate: None,
        ranking_out: None,
        comparison_out: None,
        trip: false,
        verbose: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--catalog" => {
                cli.catalog_path = Some(next_value(&args, &mut i, "--catalog", "a path argument").to_string());
            }
            "--preset" => {
                cli.preset = Some(next_value(&args, &mut i, "--preset", "a name argument").to_string());
            }
            "--compare" => {
                let a = next_value(&args, &mut i, "--compare", "two vehicle names").to_string();
                let b = next_value(&args, &mut i, "--compare", "two vehicle names").to_string();
                cli.compare = Some((a, b));
            }
            "--years" => {
                let raw = next_value(&args, &mut i, "--years", "a positive integer");
                if let Ok(n) = raw.parse::<u32>() {
                    cli.years = Some(n);
                } else {
                    eprintln!("error: --years value \"{raw}\" is not a valid integer");
                    process::exit(1);
                }
            }
            "--opportunity-rate" => {
                let raw = next_value(&args, &mut i, "--opportunity-rate", "a number");
                if let Ok(r) = raw.parse::<f64>() {
                    cli.opportunity_rate = Some(r);
                } else {
                    eprintln!("error: --opportunity-rate value \"{raw}\" is not a valid number");
                    process::exit(1);
                }
            }
            "--ranking-out" => {
                cli.ranking_out = Some(next_value(&args, &mut i, "--ranking-out", "a path argument").to_string());
            }
            "--comparison-out" => {
                cli.comparison_out =
                    Some(next_value(&args, &mut i, "--comparison-out", "a path argument").to_string());
            }
            "--trip" => {
                cli.trip = true;
            }
            "--verbose" | "-v" => {
                cli.verbose = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let raw = next_value(&args, &mut i, "--port", "a u16 argument");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Loads the catalog configuration: `--catalog` first, then `--preset`,
/// then the default preset.
fn load_config(cli: &CliArgs) -> CatalogConfig {
    let loaded = if let Some(ref path) = cli.catalog_path {
        CatalogConfig::from_toml_file(Path::new(path))
    } else {
        CatalogConfig::from_preset(cli.preset.as_deref().unwrap_or(DEFAULT_PRESET))
    };
    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

/// Works out which comparison to run, if any, from the catalog and CLI overrides.
fn comparison_request(cfg: &CatalogConfig, cli: &CliArgs) -> Option<(String, String, ComparatorConfig)> {
    let (names, mut comparator) = match (&cli.compare, &cfg.comparison) {
        (Some((a, b)), Some(c)) => ((a.clone(), b.clone()), c.comparator()),
        (Some((a, b)), None) => ((a.clone(), b.clone()), ComparatorConfig::default()),
        (None, Some(c)) => ((c.vehicle_a.clone(), c.vehicle_b.clone()), c.comparator()),
        (None, None) => {
            if cli.years.is_some() || cli.opportunity_rate.is_some() {
                eprintln!("error: --years and --opportunity-rate need a comparison (use --compare <A> <B>)");
                process::exit(1);
            }
            return None;
        }
    };
    if let Some(years) = cli.years {
        comparator.num_years = years;
    }
    if let Some(rate) = cli.opportunity_rate {
        comparator.opportunity_cost_rate = rate;
    }
    Some((names.0, names.1, comparator))
}

fn exit_on_cost_error(err: &CostError, catalog: &Catalog) -> ! {
    match err {
        CostError::NotFound { name } => {
            eprintln!("error: vehicle \"{name}\" not found");
            eprintln!("available vehicles: {}", catalog.names().join(", "));
        }
        CostError::InvalidArgument { .. } => eprintln!("error: {err}"),
    }
    process::exit(1);
}

fn main() {
    let cli = parse_args();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();

    let cfg = load_config(&cli);

    // Validate
    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let catalog = match cfg.to_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let mode = cfg.settings.mode;
    debug!(mode = mode.name(), vehicles = catalog.len(), "catalog ready");

    // Ranking
    let ranking = evaluate_catalog(&catalog, &mode).unwrap_or_else(|e| exit_on_cost_error(&e, &catalog));
    print!("{}", RankingReport(&ranking));
    if let Some(best) = ranking.first() {
        println!();
        println!("Vehicles ranked: {}", ranking.len());
        println!(
            "Cheapest per mile: {} ({:.2} $/mi)",
            best.name, best.profile.cost_per_mile
        );
    }

    if let Some(ref path) = cli.ranking_out {
        if let Err(e) = export_ranking_csv(&ranking, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Ranking written to {path}");
    }

    // Comparison
    let comparison: Option<ComparisonRun> = comparison_request(&cfg, &cli).map(|(a, b, comparator)| {
        run_comparison(&catalog, &mode, &a, &b, &comparator)
            .unwrap_or_else(|e| exit_on_cost_error(&e, &catalog))
    });
    if let Some(ref run) = comparison {
        println!();
        println!("{}", ComparisonReport(run));
    }

    if let Some(ref path) = cli.comparison_out {
        let Some(ref run) = comparison else {
            eprintln!("error: --comparison-out needs a comparison (use --compare <A> <B>)");
            process::exit(1);
        };
        if let Err(e) = export_comparison_csv(&run.comparison.records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Comparison written to {path}");
    }

    // Road trip
    if cli.trip {
        let plan = trip::plan(&cfg.trip.road).unwrap_or_else(|e| exit_on_cost_error(&e, &catalog));
        let daily = trip::daily_table(&cfg.trip.daily).unwrap_or_else(|e| exit_on_cost_error(&e, &catalog));
        println!();
        println!("{plan}");
        println!("{daily}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(vehicle_tco::api::AppState {
            ranking,
            comparison,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(vehicle_tco::api::serve(state, addr)) {
            eprintln!("error: API server failed on {addr}: {e}");
            process::exit(1);
        }
    }
}
