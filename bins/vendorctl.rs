//! `vendorctl`: drive the hospitality vendor API from a terminal.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use configs::{ClientConfig, TokenStoreKind};
use dotenvy::dotenv;
use models::Searchable;
use service::pagination::{PageButton, DEFAULT_PAGE_SIZE, DEFAULT_VISIBLE_BUTTONS};
use service::{ApiClient, ListView, Services, SessionManager};
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(name = "vendorctl", about = "Manage a venue on the hospitality API", version)]
struct Cli {
    /// Emit JSON log lines instead of the compact format.
    #[arg(long, global = true, env = "VENDORCTL_LOG_JSON")]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and keep the session token on disk.
    Login {
        #[arg(long)]
        email: String,
        /// Falls back to `VENUE_PASSWORD` when omitted.
        #[arg(long, env = "VENUE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Keep the session for the long retention window.
        #[arg(long)]
        remember: bool,
    },
    Logout,
    /// Print the id of the logged-in venue.
    Whoami,
    Orders(ListArgs),
    Reservations(ListArgs),
    /// Dump client metrics in Prometheus text format.
    Metrics,
}

#[derive(Debug, clap::Args)]
struct ListArgs {
    /// Case-insensitive filter over the listed fields.
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    if cli.log_json {
        common::utils::logging::init_logging_json();
    } else {
        common::utils::logging::init_logging_default();
    }
    service::observability::init();

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = ClientConfig::load_and_validate().context("load client config")?;
    // a memory store would forget the session between invocations
    cfg.session.store = TokenStoreKind::File;
    debug!(base_url = %cfg.api.base_url, store = %cfg.session.store_path, "client configured");

    let session = Arc::new(SessionManager::from_config(&cfg.session).await);
    let client = Arc::new(ApiClient::from_config(&cfg, session)?);
    let services = Services::new(client.clone());

    match cli.command {
        Command::Login { email, password, remember } => {
            let resp = services.auth.login(&email, &password, remember).await?;
            info!(%email, remember, "login complete");
            println!("{}", resp.message);
        }
        Command::Logout => {
            println!("{}", services.auth.logout().await.message);
        }
        Command::Whoami => {
            let venue_id = services.venue_cache().get_my_venue_id(&client).await?;
            match services.venue_cache().cached_user_id().await {
                Some(user_id) => println!("venue {venue_id} (user {user_id})"),
                None => println!("venue {venue_id}"),
            }
        }
        Command::Orders(args) => {
            let orders = services.orders.list().await?.data;
            print_page(orders, &args, |o| {
                format!(
                    "#{:<6} {:<10} {:<24} {}",
                    o.id,
                    o.status.as_str(),
                    o.customer_name.as_deref().unwrap_or("-"),
                    o.total_amount.map(|t| format!("{t:.2}")).unwrap_or_else(|| "-".into()),
                )
            });
        }
        Command::Reservations(args) => {
            let reservations = services.reservations.list().await?.data;
            print_page(reservations, &args, |r| {
                format!(
                    "#{:<6} {:<10} {:<24} party of {:<3} {} {}",
                    r.id,
                    r.status.as_str(),
                    r.guest_name,
                    r.party_size,
                    r.reservation_date.as_deref().unwrap_or("-"),
                    r.reservation_time.as_deref().unwrap_or(""),
                )
            });
        }
        Command::Metrics => {
            let text = service::observability::encode_metrics().map_err(anyhow::Error::msg)?;
            print!("{text}");
        }
    }
    Ok(())
}

fn print_page<T: Searchable>(items: Vec<T>, args: &ListArgs, row: impl Fn(&T) -> String) {
    let mut view = ListView::new(items, args.page_size);
    if let Some(term) = &args.search {
        view.set_search(term.as_str());
    }
    view.go_to(args.page);

    let rows = view.page_items();
    if rows.is_empty() {
        println!("(nothing to show)");
    }
    for item in rows {
        println!("{}", row(item));
    }

    let pager: Vec<String> = view
        .page_buttons(DEFAULT_VISIBLE_BUTTONS)
        .into_iter()
        .map(|b| match b {
            PageButton::Page(n) if n == view.page() => format!("[{n}]"),
            PageButton::Page(n) => n.to_string(),
            PageButton::Ellipsis => "...".to_string(),
        })
        .collect();
    println!(
        "-- {} of {} match(es); page {}",
        view.filtered_len(),
        view.items().len(),
        pager.join(" ")
    );
}
