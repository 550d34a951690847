//! Microcycle - Strength & Conditioning Plan Builder
//!
//! Command-line entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use microcycle::catalog::{Catalog, CatalogIndex};
use microcycle::plan::{auto_generate, PlanAggregate, PlanSummary};
use microcycle::search::{apply_filters_with, FilterState, FuzzyMatcher};
use microcycle::storage::config::{self, AppConfig};
use microcycle::storage::SqliteStore;

#[derive(Parser)]
#[command(name = "microcycle", version, about = "Build weekly training plans from an exercise catalog")]
struct Cli {
    /// Configuration file (defaults to the data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Plan database (defaults to the data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print derived risk flags for every catalog variant
    Flags {
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Filter and search the catalog
    Search {
        #[arg(long)]
        catalog: PathBuf,
        /// Fuzzy text query
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        arquetipo: Option<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        only_vbt: bool,
        #[arg(long)]
        low_risk: bool,
    },
    /// Add a randomly generated day to the stored plan
    Generate {
        #[arg(long)]
        catalog: PathBuf,
        /// Primary target substring (defaults to configuration)
        #[arg(long)]
        target: Option<String>,
        /// Alto, Bajo or Cualquiera (defaults to configuration)
        #[arg(long)]
        roi: Option<String>,
        #[arg(long)]
        count: Option<usize>,
        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the load summary of the stored plan
    Summary,
    /// Reset the stored plan to a single empty day
    Clear,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;

    tracing::debug!("Starting microcycle v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Flags { catalog } => print_flags(&catalog),
        Command::Search {
            catalog,
            query,
            arquetipo,
            target,
            only_vbt,
            low_risk,
        } => {
            let filters = FilterState {
                search: query,
                only_vbt,
                low_risk,
                ..FilterState::default()
            };
            let filters = match arquetipo {
                Some(a) => filters.with_arquetipo(a),
                None => filters,
            };
            let filters = match target {
                Some(t) => filters.with_target(t),
                None => filters,
            };
            print_search(&catalog, &filters, &config)
        }
        Command::Generate {
            catalog,
            target,
            roi,
            count,
            seed,
        } => {
            let mut settings = config.generator.clone();
            if let Some(target) = target {
                settings.target = target;
            }
            if let Some(roi) = roi {
                settings.roi = roi;
            }
            if let Some(count) = count {
                settings.count = count;
            }
            let criteria = settings.criteria()?;

            let index = load_index(&catalog)?;
            let mut plan = open_plan(&cli.db, &config)?;
            let mut rng = match seed {
                Some(seed) => ChaCha20Rng::seed_from_u64(seed),
                None => ChaCha20Rng::from_entropy(),
            };

            let day_id = auto_generate(&mut plan, index.entries(), &criteria, &mut rng)?;
            report_persistence(&plan)?;

            if let Some(day) = plan.day(&day_id) {
                println!("{} ({})", day.label, day.id);
                for entry in day.exercises() {
                    println!("  {}", entry.variant.nombre_tecnico);
                }
            }
            Ok(())
        }
        Command::Summary => {
            let plan = open_plan(&cli.db, &config)?;
            print_summary(&plan);
            Ok(())
        }
        Command::Clear => {
            let mut plan = open_plan(&cli.db, &config)?;
            plan.clear();
            report_persistence(&plan)?;
            println!("Plan cleared");
            Ok(())
        }
    }
}

fn load_index(path: &Path) -> Result<CatalogIndex> {
    let catalog = Catalog::from_file(path).context("failed to load catalog")?;
    Ok(CatalogIndex::build(&catalog))
}

fn open_plan(db: &Option<PathBuf>, config: &AppConfig) -> Result<PlanAggregate> {
    let path = db.clone().unwrap_or_else(|| config.database_path());
    let store = SqliteStore::open(&path)
        .with_context(|| format!("failed to open plan database {}", path.display()))?;

    Ok(PlanAggregate::open(Box::new(store), config.plan.storage_key.clone())
        .with_default_name(config.plan.default_name.clone()))
}

fn report_persistence(plan: &PlanAggregate) -> Result<()> {
    match plan.last_persist_error() {
        Some(e) => Err(anyhow::anyhow!("plan changed but was not saved: {}", e)),
        None => Ok(()),
    }
}

fn print_flags(catalog: &Path) -> Result<()> {
    let index = load_index(catalog)?;

    for entry in index.entries() {
        let flags = &entry.flags;
        println!(
            "{:<24} HYP_ADV={:<5} ONLINE={:<10} PF={}{}",
            entry.id,
            flags.hyp_adv,
            flags.online_risk.display_name(),
            flags.pf_risk,
            flags
                .pf_risk_reason
                .as_deref()
                .map(|r| format!(" ({})", r))
                .unwrap_or_default()
        );
    }
    Ok(())
}

fn print_search(catalog: &Path, filters: &FilterState, config: &AppConfig) -> Result<()> {
    let index = load_index(catalog)?;
    let matcher = FuzzyMatcher::new(config.search.threshold);

    let results = apply_filters_with(index.entries(), filters, &matcher);
    for entry in &results {
        println!(
            "{:<24} {} [{}]",
            entry.id,
            entry.nombre_tecnico,
            entry.target_primarios.join(", ")
        );
    }
    println!("{} of {} variants", results.len(), index.len());
    Ok(())
}

fn print_summary(plan: &PlanAggregate) {
    let summary = PlanSummary::from_plan(plan.plan());

    println!(
        "{}: {} exercises in {} days",
        plan.plan().name,
        summary.exercise_count,
        summary.day_count
    );
    for volume in &summary.volume_by_target {
        println!("  {:<24} {:>3} sets", volume.target, volume.sets);
    }
    println!(
        "  Grind {} sets, ballistic/plyo {} sets",
        summary.grind_sets,
        summary.explosive_sets()
    );
    for alert in &summary.alerts {
        let mut reasons = Vec::new();
        if let Some(threat) = alert.threat {
            reasons.push(format!("amenaza {}", threat));
        }
        if alert.online_prohibited {
            reasons.push("online prohibido".to_string());
        }
        if alert.pelvic_floor_contraindicated {
            reasons.push("suelo pélvico contraindicado".to_string());
        }
        println!("  ! {} ({}): {}", alert.exercise, alert.day_label, reasons.join(", "));
    }
}
