mod display;
mod session;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use legisight_core::SearchField;
use legisight_dashboard::{Dashboard, ProxyClient, WatchlistStore};
use legisight_proxy::ProxyConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "legisight", version)]
#[command(about = "Browse Legistar matters through a token-masking proxy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of a running `legisight serve`.
    #[arg(
        long,
        global = true,
        env = "LEGISIGHT_PROXY_URL",
        default_value = "http://localhost:3001"
    )]
    proxy_url: String,

    /// Watchlist file [default: <data dir>/legisight/watchlist.json]
    #[arg(long, global = true, env = "LEGISIGHT_WATCHLIST")]
    watchlist: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the proxy server
    Serve(ProxyConfig),
    /// Browse interactively: recent matters, search, history, watchlist
    Dashboard,
    /// Show matters introduced in the last six months
    Recent,
    /// Search matters by field
    Search {
        /// law, file, title, name, summary, or committee
        #[arg(long, short, default_value_t = SearchField::LawNumber)]
        by: SearchField,
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show a matter's history timeline
    History {
        matter_id: i64,
        /// File number to show in the heading
        #[arg(long)]
        file: Option<String>,
    },
    /// Manage the watchlist
    #[command(subcommand)]
    Watch(WatchCommand),
}

#[derive(Subcommand)]
enum WatchCommand {
    /// Add a matter by id
    Add { matter_id: i64 },
    /// Remove a matter by id
    Remove { matter_id: i64 },
    /// List watched matters
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Command::Serve(_)));
    tracing::info!("legisight v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Serve(config) => legisight_proxy::serve(config).await,
        command => {
            let store = match cli.watchlist {
                Some(path) => WatchlistStore::new(path),
                None => WatchlistStore::default_location()?,
            };
            let dash = Dashboard::new(ProxyClient::new(cli.proxy_url), store);
            run_dashboard(dash, command).await
        }
    }
}

/// Logs go to stderr; stdout is reserved for command output.
fn init_tracing(serving: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter(serving))),
        )
        .with_writer(io::stderr)
        .init();
}

/// `info` for the proxy; client commands only surface warnings unless
/// `RUST_LOG` says otherwise.
fn default_log_filter(serving: bool) -> &'static str {
    if serving { "info" } else { "warn" }
}

async fn run_dashboard(mut dash: Dashboard<ProxyClient>, command: Command) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();

    match command {
        Command::Serve(_) => {}
        Command::Dashboard => {
            writeln!(out, "{}", session::HELP)?;
            writeln!(out)?;
            session::run(&mut dash, io::stdin().lock(), &mut out).await?;
        }
        Command::Recent => {
            dash.load().await;
            display::write_view(&mut out, dash.view(), dash.recent())?;
        }
        Command::Search { by, query } => {
            dash.search(by, &query.join(" ")).await;
            display::write_view(&mut out, dash.view(), dash.recent())?;
        }
        Command::History { matter_id, file } => {
            let label = file.unwrap_or_else(|| format!("#{matter_id}"));
            dash.open_history(matter_id, label).await;
            display::write_view(&mut out, dash.view(), dash.recent())?;
        }
        Command::Watch(WatchCommand::Add { matter_id }) => {
            let added = dash
                .watch_by_id(matter_id)
                .await
                .context("updating watchlist")?;
            session::write_watch_outcome(&mut out, matter_id, added)?;
        }
        Command::Watch(WatchCommand::Remove { matter_id }) => {
            match dash.unwatch(matter_id).context("updating watchlist")? {
                Some(matter) => writeln!(
                    out,
                    "Removed {} from the watchlist",
                    matter.display_file()
                )?,
                None => writeln!(out, "Matter {matter_id} is not on the watchlist")?,
            }
        }
        Command::Watch(WatchCommand::List) => {
            display::write_watchlist(&mut out, dash.watchlist())?;
        }
    }

    Ok(())
}
