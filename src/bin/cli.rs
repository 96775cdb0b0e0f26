//! apiscan CLI - API surface detection for repositories.
//!
//! Usage:
//!   apiscan scan                 # Scan all repositories under the root
//!   apiscan detect <path>        # Scan one repository, print JSON
//!   apiscan list                 # List catalogued repositories
//!   apiscan show <name>          # Print one catalog entry
//!   apiscan search <query>       # Search the catalog
//!   apiscan stats                # Catalog statistics
//!   apiscan postman <name>       # Export a Postman collection

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use apiscan::catalog::ApiCatalog;
use apiscan::config::ScanConfig;
use apiscan::detect::{detect_repository, detect_workspace};
use apiscan::postman;

#[derive(Parser)]
#[command(name = "apiscan")]
#[command(about = "apiscan - API surface detection for repositories", long_about = None)]
struct Cli {
    /// Root directory holding the repositories (default: current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every repository under the root and rebuild the catalog
    Scan,

    /// Scan a single repository directory and print the result as JSON
    Detect {
        /// Repository directory
        path: PathBuf,
    },

    /// List catalogued repositories with API counts and buttons
    List,

    /// Print one catalog entry as JSON
    Show {
        /// Repository name
        name: String,
    },

    /// Search the catalog (repository names, file paths, titles, services)
    Search {
        /// Query string
        query: String,
    },

    /// Show catalog statistics
    Stats,

    /// Export a Postman collection for a repository
    Postman {
        /// Repository name
        name: String,

        /// Output file (default: <name>.postman_collection.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let apiscan_dir = root.join(".apiscan");
    let config = ScanConfig::load(&apiscan_dir.join("config.toml"));
    let cache_path = config.resolve_cache_path(&apiscan_dir);

    match cli.command {
        Commands::Scan => {
            let results = detect_workspace(&root, &config)?;
            let mut catalog = ApiCatalog::new();
            for detection in results {
                let summary = detection.summary();
                println!(
                    "  {}  ({})  {}",
                    detection.repository,
                    summary,
                    buttons_line(&detection.buttons)
                );
                catalog.insert(detection);
            }
            catalog.save(&cache_path)?;
            println!("✓ Catalog built: {} repositories", catalog.len());
            return Ok(());
        }

        Commands::Detect { path } => {
            let detection = detect_repository(&path, &config)?;
            println!("{}", serde_json::to_string_pretty(&detection)?);
            return Ok(());
        }

        _ => {}
    }

    // Query commands need an existing catalog; build one on first run.
    let catalog = if cache_path.exists() {
        ApiCatalog::load(&cache_path)?
    } else {
        eprintln!("Building catalog (first run)...");
        let mut catalog = ApiCatalog::new();
        for detection in detect_workspace(&root, &config)? {
            catalog.insert(detection);
        }
        catalog.save(&cache_path)?;
        catalog
    };

    match cli.command {
        Commands::List => {
            if catalog.is_empty() {
                println!("Catalog is empty — run `apiscan scan`");
                return Ok(());
            }
            for detection in catalog.entries() {
                let summary = detection.summary();
                println!(
                    "{:<30} {}  {}",
                    detection.repository,
                    summary,
                    buttons_line(&detection.buttons)
                );
            }
        }

        Commands::Show { name } => {
            let detection = catalog.get_required(&name)?;
            println!("{}", serde_json::to_string_pretty(detection)?);
        }

        Commands::Search { query } => {
            let result = catalog.search(&query);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Stats => {
            let stats = catalog.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }

        Commands::Postman { name, out } => {
            let detection = catalog.get_required(&name)?;
            let collection = postman::build_collection(&root.join(&name), detection)?;
            let out = out.unwrap_or_else(|| {
                PathBuf::from(format!("{}.postman_collection.json", name))
            });
            std::fs::write(&out, serde_json::to_string_pretty(&collection)?)?;
            println!("✓ Wrote {}", out.display());
        }

        Commands::Scan | Commands::Detect { .. } => {
            // Already handled above
        }
    }

    Ok(())
}

fn buttons_line(buttons: &[apiscan::detect::ButtonKind]) -> String {
    if buttons.is_empty() {
        "no APIs".to_string()
    } else {
        let names: Vec<String> = buttons.iter().map(|b| b.to_string()).collect();
        format!("[{}]", names.join(", "))
    }
}
