use super::ui;
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use reviveboard::catalog::{SearchFilters, SortBy, SortDirection};
use reviveboard::router::BrowserEvent;
use reviveboard::{AdoptionStatus, AppConfig, LinkActivation, ReviveHub};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reviveboard")]
#[command(about = "Browse, adopt and revive abandoned open-source repositories")]
pub struct Cli {
    /// Directory for persisted state (defaults to ./reviveboard_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep all state in memory for this run
    #[arg(long, global = true)]
    in_memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List repositories matching the filters
    Explore(ExploreArgs),
    /// Adopt a repository as the signed-in user
    ///
    /// Only catalog ids are known to a fresh run; ids shown for extra pages
    /// by `explore --more` are not kept between runs.
    Adopt { id: u64 },
    /// Update the status of one of your adoptions
    Status {
        id: u64,
        /// adopted, in_progress or revived
        status: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Show your adopted repositories
    Adopted,
    /// Show the contributor leaderboard
    Leaderboard {
        #[arg(long)]
        top: Option<usize>,
    },
    /// Generate maintenance suggestions for a repository
    Suggest { id: u64 },
    /// Sign in with the configured identity
    Login,
    /// Sign out
    Logout,
    /// Follow links in order and print the view each one resolves to
    Navigate {
        hrefs: Vec<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        rel: Option<String>,
    },
}

#[derive(Args)]
struct ExploreArgs {
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    min_stars: Option<u32>,
    #[arg(long)]
    min_forks: Option<u32>,
    #[arg(long = "topic")]
    topics: Vec<String>,
    #[arg(long, default_value = "staleness")]
    sort_by: String,
    #[arg(long, default_value = "desc")]
    direction: String,
    /// Extra pages to load after the first (their ids last for this run only)
    #[arg(long, default_value_t = 0)]
    more: usize,
}

impl ExploreArgs {
    fn filters(&self) -> Result<SearchFilters> {
        let defaults = SearchFilters::default();
        Ok(SearchFilters {
            language: self.language.clone(),
            min_stars: self.min_stars.or(defaults.min_stars),
            min_forks: self.min_forks,
            topics: self.topics.clone(),
            sort_by: self.sort_by.parse::<SortBy>()?,
            sort_direction: self.direction.parse::<SortDirection>()?,
        })
    }
}

impl Cli {
    fn config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::from_env().context("read REVIVEBOARD_* environment")?;
        if self.in_memory {
            config = config.in_memory();
        } else if let Some(dir) = &self.data_dir {
            config = config.data_dir(dir.clone());
        } else if config.data_dir.is_none() {
            let dir = env::current_dir()
                .context("resolve current directory for default data dir")?
                .join("reviveboard_data");
            config = config.data_dir(dir);
        }
        Ok(config)
    }

    pub async fn run(self) -> Result<()> {
        let config = self.config()?;
        let mut hub = ReviveHub::open(&config)
            .await
            .with_context(|| format!("open state in {:?}", config.data_dir))?;
        let now = Utc::now();

        match self.command {
            Command::Explore(args) => {
                let filters = args.filters()?;
                hub.search(Some(filters));
                for _ in 0..args.more {
                    if hub.load_more() == 0 {
                        break;
                    }
                }
                let store = hub.repositories();
                print!("{}", ui::repositories(store.repositories(), store.filters(), &now));
            }
            Command::Adopt { id } => {
                let record = hub.adopt(id)?;
                println!("Successfully adopted {}", record.repository.name);
            }
            Command::Status { id, status, note } => {
                let status = status.parse::<AdoptionStatus>()?;
                let record = hub.update_status(id, status, note)?;
                println!("{} is now {}", record.repository.full_name, status);
            }
            Command::Adopted => {
                let records = hub.my_adoptions()?;
                print!("{}", ui::adopted(&records));
            }
            Command::Leaderboard { top } => {
                let board = hub.leaderboard();
                let entries = board.entries();
                let shown = &entries[..top.unwrap_or(entries.len()).min(entries.len())];
                print!("{}", ui::leaderboard(shown, board.error()));
            }
            Command::Suggest { id } => {
                let repo = hub.generate_suggestions(id).await?;
                print!("{}", ui::suggestions(repo));
            }
            Command::Login => {
                let user = hub.login().await?;
                println!("Signed in as {}", user.login);
            }
            Command::Logout => {
                hub.logout()?;
                println!("Signed out");
            }
            Command::Navigate { hrefs, target, rel } => {
                if hrefs.is_empty() {
                    return Err(anyhow!("give at least one href to follow"));
                }
                println!("start: {}", hub.current_view());
                for href in hrefs {
                    let mut click = LinkActivation::new(&href);
                    click.target = target.clone();
                    click.rel = rel.clone();
                    let handled = hub.router_mut().dispatch(BrowserEvent::Click(&mut click));
                    let outcome = if handled { "in-app" } else { "left to browser" };
                    println!("{} -> {} ({})", href, hub.current_view(), outcome);
                }
            }
        }

        Ok(())
    }
}
