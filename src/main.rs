use anyhow::Result;
use clap::{Parser, Subcommand};

use liftlog::aggregate::Scope;
use liftlog::cli::{balance, compare, load_records, monthly, prs, quarters, report, sources};
use liftlog::config::Config;
use liftlog::model::Period;
use liftlog::source::SourceRegistry;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Strength training analytics over workout app exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ./liftlog.yaml, then the user config dir)
    #[arg(short, long)]
    config: Option<String>,

    /// More diagnostics on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only analyze this calendar year
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Last month (1-12) of the early period
    #[arg(long, global = true)]
    boundary_month: Option<u32>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured sources and their export files
    Sources,

    /// Full analytics report
    Report,

    /// Personal records
    Prs {
        /// all, early, later, q1-q4, YYYY, YYYY-MM or YYYY-MM-DD..YYYY-MM-DD
        #[arg(short, long, default_value = "all")]
        scope: Scope,

        /// Maximum number of exercises
        #[arg(short, long, default_value_t = 25)]
        limit: usize,
    },

    /// Volume by category, push/pull and upper/lower ratios
    Balance {
        #[arg(short, long, default_value = "all")]
        scope: Scope,
    },

    /// Month by month volume and workouts
    Monthly,

    /// Compare two scopes (early → later unless given)
    Compare {
        #[arg(long)]
        from: Option<Scope>,

        #[arg(long)]
        to: Option<Scope>,
    },

    /// Quarter over quarter progression
    Quarters,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    liftlog::logging::init(cli.verbose)?;

    // Load config, then apply command line overrides
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(year) = cli.year {
        config.analysis.year = Some(year);
    }
    if let Some(month) = cli.boundary_month {
        config.analysis.period_boundary_month = month;
    }

    // Initialize source registry
    let registry = SourceRegistry::new(&config);

    if let Commands::Sources = cli.command {
        return sources::run(&config, &registry);
    }

    let records = load_records(&config, &registry)?;
    let analysis = config.analysis_config();

    match cli.command {
        Commands::Sources => {}
        Commands::Report => {
            report::run(&records, &analysis, cli.json)?;
        }
        Commands::Prs { scope, limit } => {
            prs::run(&records, &scope, limit, cli.json)?;
        }
        Commands::Balance { scope } => {
            balance::run(&records, &scope, analysis.imbalance_threshold_pct, cli.json)?;
        }
        Commands::Monthly => {
            monthly::run(&records, cli.json)?;
        }
        Commands::Compare { from, to } => {
            let from = from.unwrap_or(Scope::period(Period::Early));
            let to = to.unwrap_or(Scope::period(Period::Later));
            compare::run(&records, &from, &to, cli.json)?;
        }
        Commands::Quarters => {
            quarters::run(&records, &analysis, cli.json)?;
        }
    }

    Ok(())
}
