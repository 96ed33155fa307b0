//! truststack-wizard CLI
//!
//! Thin display layer over the wizard engine: inspect catalogs, check a
//! parked session's readiness, and assemble the creation payload. Command
//! logic lives in the `cli` module.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use truststack_wizard::catalog::{domain_counts, filter_packs, DomainFilter, LlmCatalog};
use truststack_wizard::cli;
use truststack_wizard::session::Readiness;
use truststack_wizard::state::state_file_path;
use truststack_wizard::types::{IndustryCatalog, Pack};

#[derive(Parser)]
#[command(name = "truststack-wizard")]
#[command(version, about = "Selection-state engine for the TrustStack project wizard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the industry hierarchy from a catalog document
    Industries {
        /// Industry catalog JSON file
        #[arg(long)]
        file: PathBuf,
    },

    /// List packs in canonical order, optionally filtered by domain
    Packs {
        /// Pack catalog JSON file
        #[arg(long)]
        file: PathBuf,

        /// Domain filter: all, governance, safety, or security
        #[arg(long, default_value = "all")]
        domain: String,
    },

    /// Search the builtin LLM model catalog
    Models {
        /// Free-text query over model, developer, tier, and driver
        #[arg(default_value = "")]
        query: String,
    },

    /// Show the parked session's readiness breakdown
    Status {
        /// Industry catalog JSON file
        #[arg(long)]
        industries: PathBuf,

        /// Session state file
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Assemble the creation payload from the parked session
    Assemble {
        /// Industry catalog JSON file
        #[arg(long)]
        industries: PathBuf,

        /// Session state file
        #[arg(long)]
        state: Option<PathBuf>,

        /// Project name
        #[arg(long)]
        name: String,

        /// Project description
        #[arg(long)]
        description: Option<String>,
    },
}

fn display_industries(catalog: &IndustryCatalog) {
    println!();
    println!("{}", "Industry hierarchy".bright_cyan().bold());
    for industry in &catalog.industries {
        println!("  {} {}", industry.name.bold(), format!("({})", industry.id).dimmed());
        for segment in &industry.segments {
            println!("    {} {}", segment.name, format!("({})", segment.id).dimmed());
            for use_case in &segment.use_cases {
                println!(
                    "      {} {} {}",
                    use_case.name,
                    format!("({})", use_case.id).dimmed(),
                    format!("[{} questions]", use_case.scope_questions.len()).dimmed()
                );
            }
        }
    }
    println!();
}

fn display_packs(packs: &[Pack], filter: DomainFilter) {
    let counts = domain_counts(packs);
    let filtered = filter_packs(packs, filter);

    println!();
    println!("{}", "Pack catalog".bright_cyan().bold());
    for (domain, count) in &counts {
        println!("  {} {}", domain.to_string().bold(), format!("({count})").dimmed());
    }
    println!();
    for pack in filtered {
        let versions = pack.versions.join(", ");
        println!(
            "  {:<12} {:<28} {}",
            pack.domain.to_string().dimmed(),
            pack.display_name(),
            versions.dimmed()
        );
    }
    println!();
}

fn display_models(catalog: &LlmCatalog, query: &str) {
    let results = catalog.search(query);
    println!();
    println!("{}", "LLM model catalog".bright_cyan().bold());
    for model in results {
        println!(
            "  {:>3}. {:<22} {:<12} {:<12} {}",
            model.rank,
            model.model.bold(),
            model.developer,
            model.popularity_tier.dimmed(),
            model.main_driver.dimmed()
        );
    }
    println!();
}

fn display_readiness(readiness: &Readiness) {
    let leg = |ok: bool, label: &str| {
        if ok {
            println!("  {} {}", "✓".bright_green(), label);
        } else {
            println!("  {} {}", "○".dimmed(), label.dimmed());
        }
    };

    println!();
    println!("{}", "Session readiness".bright_cyan().bold());
    leg(readiness.industry, "industry");
    leg(readiness.segment, "segment");
    leg(readiness.use_case, "use case");
    leg(readiness.deployment_environment, "deployment environment");
    leg(
        readiness.model_count >= 1,
        &format!("models selected: {}", readiness.model_count),
    );
    leg(
        readiness.pack_count >= 1,
        &format!("packs selected: {}", readiness.pack_count),
    );
    println!();
    if readiness.is_ready() {
        println!("{}", "Ready to submit.".bright_green().bold());
    } else {
        println!(
            "{} {}",
            "Not ready:".bright_yellow().bold(),
            readiness.missing().join(", ")
        );
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("truststack-wizard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Industries { file } => {
            let catalog = cli::load_industries(&file)?;
            display_industries(&catalog);
        }
        Commands::Packs { file, domain } => {
            let filter = DomainFilter::from_str(&domain)?;
            let packs = cli::load_packs(&file)?;
            display_packs(&packs, filter);
        }
        Commands::Models { query } => {
            display_models(&LlmCatalog::standard(), &query);
        }
        Commands::Status { industries, state } => {
            let state = state.unwrap_or_else(state_file_path);
            let session = cli::load_session(&state, &industries)?;
            display_readiness(&session.readiness());
        }
        Commands::Assemble {
            industries,
            state,
            name,
            description,
        } => {
            let state = state.unwrap_or_else(state_file_path);
            let payload =
                cli::assemble_from_state(&state, &industries, &name, description.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
