//! georange CLI
//!
//! Command-line interface for inspecting and editing a range file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use georange::{Config, RangeError, RangeKey, RangeRecord, RangeStore};
use tracing_subscriber::{fmt, EnvFilter};

/// georange CLI
#[derive(Parser, Debug)]
#[command(name = "georange-cli")]
#[command(about = "Inspect and edit GeoIP-style IP range files")]
#[command(version)]
struct Args {
    /// Range CSV file
    #[arg(short, long, default_value = "./data.csv")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every (range name, short name) key
    List,

    /// Show the ranges filed under a key
    Show {
        range_name: String,
        short_name: String,
    },

    /// Declare an empty group
    ///
    /// Removes every range already filed under the key. Empty groups are
    /// not written, so the key only appears in the file once ranges are
    /// inserted.
    Create {
        range_name: String,
        short_name: String,
    },

    /// Delete a group
    Delete {
        range_name: String,
        short_name: String,
    },

    /// Append one range to a group, creating the group if absent
    Insert {
        range_name: String,
        short_name: String,
        ip_start: String,
        ip_end: String,
        int_start: String,
        int_end: String,
    },

    /// Load the file and write it to another path
    Copy {
        /// Destination file
        dest: PathBuf,
    },
}

impl Commands {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Commands::Create { .. } | Commands::Delete { .. } | Commands::Insert { .. }
        )
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,georange=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::builder().db_path(&args.db).build();

    if let Err(e) = run(&config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Commands) -> georange::Result<()> {
    // Mutating commands may start a new file
    let mut store = match RangeStore::open(&config.db_path) {
        Err(RangeError::NotFound(path)) if command.mutates() => {
            tracing::info!("{} does not exist, starting empty", path.display());
            RangeStore::new(path)
        }
        other => other?,
    };

    match command {
        Commands::List => {
            for key in store.list_keys() {
                println!("{}\t{}", key.range_name, key.short_name);
            }
        }
        Commands::Show {
            range_name,
            short_name,
        } => {
            let key = RangeKey::new(range_name, short_name);
            for record in store.get_records(&key) {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.ip_start, record.ip_end, record.int_start, record.int_end
                );
            }
        }
        Commands::Create {
            range_name,
            short_name,
        } => {
            let key = RangeKey::new(range_name, short_name);
            let discarded = store
                .create(key.clone())
                .map_or(0, |previous| previous.records().len());
            if discarded > 0 {
                tracing::warn!("Removed {} ranges from {}", discarded, key);
            }
            tracing::warn!("{} is empty and will not be written until ranges are inserted", key);
            store.flush()?;
        }
        Commands::Delete {
            range_name,
            short_name,
        } => {
            store.delete(&RangeKey::new(range_name, short_name));
            store.flush()?;
        }
        Commands::Insert {
            range_name,
            short_name,
            ip_start,
            ip_end,
            int_start,
            int_end,
        } => {
            let key = RangeKey::new(range_name, short_name);
            let record = RangeRecord::new(ip_start, ip_end, int_start, int_end);
            let outcome = store.insert_records(key, vec![record])?;
            tracing::info!(?outcome, "inserted range");
            store.flush()?;
        }
        Commands::Copy { dest } => {
            let rows = store.write_to(&dest)?;
            tracing::info!("Copied {} rows to {}", rows, dest.display());
        }
    }

    Ok(())
}
