//! noticeboard CLI
//!
//! Dashboard and public notice browser for the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use noticeboard::{
    error::{AppError, Result},
    interaction::{AutoConfirm, Confirm, LogNotifier},
    models::{ALL_NOTICES, CategoryCounts, Config, Notice},
    services::{BookmarkStore, Dashboard, DraftField, HttpNoticeRepository, SortOrder},
    storage::LocalStorage,
};

/// noticeboard - Campus Notice Board
#[derive(Parser, Debug)]
#[command(name = "noticeboard", version, about = "Campus notice board client")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "noticeboard.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List notices
    List {
        /// Case-insensitive search over title, description and categories
        #[arg(short, long, default_value = "")]
        search: String,

        /// newest, oldest or title
        #[arg(long, default_value = "newest")]
        sort: SortOrder,

        /// Only notices in this category (public browser view)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one notice in full
    Show { id: String },

    /// Create a notice
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,

        /// Category; repeat for several
        #[arg(long = "category", required = true)]
        categories: Vec<String>,
    },

    /// Edit a notice
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Replacement categories; repeat for several
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// Delete a notice
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export notices to CSV
    Export {
        /// Output directory (default from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Show category counts
    Categories {
        /// Use the public browser vocabulary
        #[arg(long)]
        public: bool,
    },

    /// Show dashboard statistics
    Stats,

    /// Bookmark a notice, or remove its bookmark
    Bookmark { id: String },

    /// List bookmarks, most recent first
    Bookmarks,

    /// Validate configuration
    Validate,
}

/// Asks on stderr and reads the answer from stdin.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

const LIST_TEMPLATE: &str = "{id}  {created}  [{categories}]  {title}";

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_counts(counts: &CategoryCounts) {
    println!("{:<14} {}", ALL_NOTICES, counts.total);
    for category in &counts.categories {
        println!("{:<14} {}", category.name, category.count);
    }
}

fn print_list<'a>(notices: impl IntoIterator<Item = &'a Notice>) {
    let mut shown = 0;
    for notice in notices {
        println!("{}", notice.format(LIST_TEMPLATE));
        shown += 1;
    }
    if shown == 0 {
        log::info!("No notices found.");
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;
    log::debug!("Using API at {}", config.api.base_url);

    let mismatch = config.category_mismatch();
    if !mismatch.is_empty() {
        log::debug!(
            "Public categories not offered by the dashboard form: {}",
            mismatch.join(", ")
        );
    }

    let repository = HttpNoticeRepository::new(&config.api)?;
    let mut dashboard = Dashboard::new(repository, config.categories.dashboard.clone());
    let notifier = LogNotifier;

    match cli.command {
        Command::List {
            search,
            sort,
            category,
        } => {
            dashboard.refresh().await?;
            match category {
                Some(name) => {
                    let collection = dashboard.collection();
                    print_list(
                        collection
                            .filtered_and_sorted(&search, sort)
                            .into_iter()
                            .filter(|n| n.has_category_ignore_case(&name)),
                    );
                }
                None => print_list(dashboard.view(&search, sort)),
            }
        }

        Command::Show { id } => {
            dashboard.refresh().await?;
            let details = dashboard.details(&id).ok_or_else(|| AppError::not_found(&id))?;
            println!("{details}");
        }

        Command::Create {
            title,
            description,
            categories,
        } => {
            let form = dashboard.form_mut();
            form.update_field(DraftField::Title, title);
            form.update_field(DraftField::Description, description);
            for category in &categories {
                form.toggle_category(category);
            }
            let notice = dashboard.submit(&notifier).await?;
            println!("{}", notice.format(LIST_TEMPLATE));
        }

        Command::Edit {
            id,
            title,
            description,
            categories,
        } => {
            dashboard.refresh().await?;
            dashboard.edit(&id)?;

            let form = dashboard.form_mut();
            if let Some(title) = title {
                form.update_field(DraftField::Title, title);
            }
            if let Some(description) = description {
                form.update_field(DraftField::Description, description);
            }
            if !categories.is_empty() {
                for existing in form.selected_categories().to_vec() {
                    form.toggle_category(&existing);
                }
                for category in &categories {
                    form.toggle_category(category);
                }
            }
            let notice = dashboard.submit(&notifier).await?;
            println!("{}", notice.format(LIST_TEMPLATE));
        }

        Command::Delete { id, yes } => {
            dashboard.refresh().await?;
            let deleted = if yes {
                dashboard.delete(&id, &AutoConfirm(true), &notifier).await?
            } else {
                dashboard.delete(&id, &StdinConfirm, &notifier).await?
            };
            if !deleted {
                log::info!("Nothing deleted.");
            }
        }

        Command::Export {
            output,
            search,
            sort,
        } => {
            dashboard.refresh().await?;
            let dir = output.unwrap_or_else(|| config.export.output_dir.clone());
            let today = Utc::now().date_naive();
            let path = dashboard.export(&dir, &search, sort, today, &notifier)?;
            println!("{}", path.display());
        }

        Command::Categories { public } => {
            dashboard.refresh().await?;
            let counts = if public {
                dashboard
                    .collection()
                    .public_category_counts(&config.categories.public_names())
            } else {
                dashboard.category_counts()
            };
            print_counts(&counts);
        }

        Command::Stats => {
            dashboard.refresh().await?;
            let stats = dashboard.collection().stats(Local::now());
            println!("Total Notices  {}", stats.total);
            println!("This Month     {}", stats.this_month);
            println!("Active         {}", stats.active);
            println!("Archived       {}", stats.archived);
        }

        Command::Bookmark { id } => {
            let storage = LocalStorage::new(&config.bookmarks.storage_dir);
            let mut bookmarks = BookmarkStore::open(storage, config.bookmarks.key.as_str());

            let bookmarked = dashboard.toggle_bookmark(&mut bookmarks, &id).await?;
            log::info!(
                "{} {} ({} bookmarked)",
                if bookmarked { "Bookmarked" } else { "Removed bookmark for" },
                id,
                bookmarks.len()
            );
        }

        Command::Bookmarks => {
            let storage = LocalStorage::new(&config.bookmarks.storage_dir);
            let bookmarks = BookmarkStore::open(storage, config.bookmarks.key.as_str());
            let sorted = bookmarks.sorted_by_recency();
            if sorted.is_empty() {
                log::info!("No bookmarks yet.");
            }
            for saved in sorted {
                println!(
                    "{}  {}",
                    saved.bookmarked_at.format("%Y-%m-%d %H:%M"),
                    saved.notice.format(LIST_TEMPLATE)
                );
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            log::info!("✓ Config OK");
            if mismatch.is_empty() {
                log::info!("✓ Public and dashboard categories agree");
            } else {
                log::warn!(
                    "Public categories never produced by the dashboard form: {}",
                    mismatch.join(", ")
                );
            }
        }
    }

    Ok(())
}
