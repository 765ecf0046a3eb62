//! Wellness CLI
//!
//! Inspect the wellness store directly, without going through the server.

use clap::{Parser, Subcommand};

use wellness::config::{resolve_db_path, DEFAULT_DB_PATH};
use wellness::error::Result;
use wellness::mcp::handler::render_reminders;
use wellness::storage::queries::{list_progress, list_reminders};
use wellness::storage::Storage;
use wellness::tips;
use wellness::types::{StorageConfig, StorageMode};

#[derive(Parser)]
#[command(name = "wellness-cli")]
#[command(about = "Health & wellness store CLI")]
#[command(version)]
struct Cli {
    /// Database path
    #[arg(long, env = "WELLNESS_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a user's reminders
    Reminders {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },

    /// Show a user's progress history
    Progress {
        /// User identifier
        #[arg(short, long)]
        user: String,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Print the wellness tip for a category
    Tip {
        /// Category name (nutrition, stress, workout)
        category: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = StorageConfig {
        db_path: resolve_db_path(&cli.db_path),
        storage_mode: StorageMode::Local,
    };

    match cli.command {
        Commands::Reminders { user } => {
            let storage = Storage::open(config)?;
            let reminders = storage.with_connection(|conn| list_reminders(conn, &user))?;
            println!("{}", render_reminders(&reminders, chrono::Utc::now()));
        }

        Commands::Progress { user, category } => {
            let storage = Storage::open(config)?;
            let entries = storage
                .with_connection(|conn| list_progress(conn, &user, category.as_deref()))?;
            if entries.is_empty() {
                println!("No progress recorded.");
            }
            for entry in entries {
                println!(
                    "{} {:>8} {}",
                    entry.last_updated.format("%Y-%m-%d %H:%M:%S"),
                    entry.value,
                    entry.category
                );
            }
        }

        Commands::Tip { category } => match category {
            Some(category) => println!("{}", tips::get_tip(&category)),
            None => {
                for name in tips::categories() {
                    println!("{}: {}", name, tips::get_tip(name));
                }
            }
        },
    }

    Ok(())
}
