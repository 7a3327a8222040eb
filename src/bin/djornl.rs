//! djornl CLI: validate, inspect and load a network release.
//!
//! Usage:
//!   djornl [--root path] validate
//!   djornl [--root path] dump <edges|nodes|clusters>
//!   djornl [--root path] delta
//!   djornl [--root path] load [--db path]

use clap::{Parser, Subcommand, ValueEnum};
use djornl::config::ROOT_DATA_PATH_ENV;
use djornl::{DataType, LoadConfig, NetworkLoader, OpenStore, SqliteStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "djornl",
    version,
    about = "Gene/phenotype network loader"
)]
struct Cli {
    /// Data root containing manifest.yaml
    #[arg(long, global = true, env = ROOT_DATA_PATH_ENV)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest and list the files it declares
    Validate,
    /// Print one ingestion pass as JSON
    Dump {
        #[arg(value_enum)]
        pass: Pass,
    },
    /// Report nodes referenced by edges or clusters but missing metadata
    Delta,
    /// Ingest every pass and save the records
    Load {
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Pass {
    Edges,
    Nodes,
    Clusters,
}

/// Get the default database path (~/.local/share/djornl/djornl.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("djornl").join("djornl.db")
}

fn open_config(root: Option<PathBuf>) -> Result<LoadConfig, String> {
    let config = match root {
        Some(root) => LoadConfig::new(root),
        None => LoadConfig::from_env(),
    };
    config.map_err(|e| e.to_string())
}

fn cmd_validate(config: &LoadConfig) -> i32 {
    println!("Manifest OK: {}", config.root_data_path().display());
    for data_type in DataType::ALL {
        for file in config.files(data_type) {
            match file.prefix() {
                Some(prefix) => println!("  {:<8} {} (prefix {})", data_type, file.path(), prefix),
                None => println!("  {:<8} {}", data_type, file.path()),
            }
        }
    }
    0
}

fn cmd_dump(loader: &NetworkLoader, pass: Pass) -> i32 {
    let dataset = match pass {
        Pass::Edges => loader.load_edges(),
        Pass::Nodes => loader.load_node_metadata(),
        Pass::Clusters => loader.load_cluster_data(),
    };
    let dataset = match dataset {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match serde_json::to_string_pretty(&dataset) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_delta(loader: &NetworkLoader) -> i32 {
    match loader.check_data_delta() {
        Ok(report) => {
            println!("{}", report);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_load(loader: &NetworkLoader, db: Option<PathBuf>) -> i32 {
    let db_path = db.unwrap_or_else(default_db_path);
    let store = match SqliteStore::open(&db_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: failed to open database at {}: {}", db_path.display(), e);
            return 1;
        }
    };
    match loader.load_data(&store) {
        Ok(summary) => {
            for (collection, saved) in &summary.collections {
                println!(
                    "Saved docs to collection {}: {} created, {} updated",
                    collection, saved.created, saved.updated
                );
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match open_config(cli.root) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Validate => cmd_validate(&config),
        Commands::Dump { pass } => cmd_dump(&NetworkLoader::new(config), pass),
        Commands::Delta => cmd_delta(&NetworkLoader::new(config)),
        Commands::Load { db } => cmd_load(&NetworkLoader::new(config), db),
    };
    std::process::exit(code);
}
