//! CLI entry point for ad_pulse.
//!
//! Loads the account, metrics and last-run sheets from a published Google
//! Spreadsheet and prints one dashboard view as JSON.

use ad_pulse::analyzers::ranking::{CampaignColumn, SortState};
use ad_pulse::analyzers::snapshot::SnapshotScope;
use ad_pulse::config::Config;
use ad_pulse::dashboard::{DashboardData, load_dashboard};
use ad_pulse::fetch::BasicClient;
use ad_pulse::fetch::auth::BearerToken;
use ad_pulse::infra::gviz::GvizClient;
use ad_pulse::output::{print_pretty, to_json, write_campaigns_csv};
use ad_pulse::services::table_source::TableSource;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "ad_pulse")]
#[command(about = "Ad account and campaign KPIs from a published Google Sheet", long_about = None)]
struct Cli {
    /// Spreadsheet id (overrides SHEETS_SPREADSHEET_ID)
    #[arg(long, global = true)]
    spreadsheet_id: Option<String>,

    /// Sheets host (overrides SHEETS_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Filtered,
    Global,
}

impl From<ScopeArg> for SnapshotScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Filtered => SnapshotScope::Filtered,
            ScopeArg::Global => SnapshotScope::Global,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List active accounts
    Accounts,
    /// KPI totals of the latest snapshot with deltas against the previous one
    Kpis {
        /// Account id, or "all" (default: first active account)
        #[arg(short, long)]
        account: Option<String>,

        /// Which rows decide the latest/previous collection dates
        #[arg(long, value_enum, default_value_t = ScopeArg::Filtered)]
        scope: ScopeArg,
    },
    /// Latest snapshot per active account, highest spend first
    Overview,
    /// Latest-snapshot campaigns
    Campaigns {
        /// Account id, or "all" (default: first active account)
        #[arg(short, long)]
        account: Option<String>,

        /// Column to sort by
        #[arg(long, value_enum, default_value_t = CampaignColumn::Spend)]
        sort: CampaignColumn,

        /// Sort ascending instead of descending
        #[arg(long, default_value_t = false)]
        asc: bool,

        /// Keep only the first N rows
        #[arg(short, long, conflicts_with = "top")]
        limit: Option<usize>,

        /// Top 10 by spend, ignoring --sort/--asc
        #[arg(long, default_value_t = false)]
        top: bool,

        /// Also write the rows to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
    /// Spend and clicks per collection date
    Trend {
        /// Account id, or "all" (default: first active account)
        #[arg(short, long)]
        account: Option<String>,
    },
    /// Latest-snapshot spend per account (all-accounts view)
    AccountSpend,
    /// When the collector last ran
    LastRun,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ad_pulse.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ad_pulse.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    // CLI flags take precedence over the environment.
    let config = Config::from_lookup(|key| match key {
        "SHEETS_SPREADSHEET_ID" if cli.spreadsheet_id.is_some() => cli.spreadsheet_id.clone(),
        "SHEETS_BASE_URL" if cli.base_url.is_some() => cli.base_url.clone(),
        _ => std::env::var(key).ok(),
    })?;

    let data = load(&config).await?;

    let json = match cli.command {
        Commands::Accounts => to_json(&data.active_accounts().collect::<Vec<_>>())?,
        Commands::Kpis { account, scope } => {
            let account = account.unwrap_or_else(|| data.default_account().to_string());
            info!(account = %account, "Computing KPIs");
            to_json(&data.kpis(&account, scope.into()))?
        }
        Commands::Overview => to_json(&data.account_overview())?,
        Commands::Campaigns {
            account,
            sort,
            asc,
            limit,
            top,
            csv,
        } => {
            let account = account.unwrap_or_else(|| data.default_account().to_string());
            let state = SortState {
                column: sort,
                ascending: asc,
            };
            let rows = if top {
                data.top_campaigns(&account)
            } else {
                data.campaigns(&account, state, limit)
            };
            if rows.is_empty() {
                warn!(account = %account, "No campaigns in the latest snapshot");
            }
            if let Some(path) = csv {
                write_campaigns_csv(&path, &rows)?;
            }
            to_json(&rows)?
        }
        Commands::Trend { account } => {
            let account = account.unwrap_or_else(|| data.default_account().to_string());
            to_json(&data.trend(&account))?
        }
        Commands::AccountSpend => to_json(&data.account_spend())?,
        Commands::LastRun => match data.last_run_at() {
            Some(at) => to_json(&at)?,
            None => {
                warn!("Last-run sheet is empty");
                "null".to_string()
            }
        },
    };

    println!("{json}");
    Ok(())
}

/// Builds the sheet client from `config` and loads every table.
#[tracing::instrument(skip(config), fields(spreadsheet_id = %config.spreadsheet_id))]
async fn load(config: &Config) -> Result<DashboardData> {
    let http = BasicClient::with_timeouts(config.timeout, config.connect_timeout)?;

    let source: Box<dyn TableSource> = match &config.access_token {
        Some(token) => Box::new(GvizClient::new(
            BearerToken::new(http, token)?,
            &config.base_url,
            &config.spreadsheet_id,
        )),
        None => Box::new(GvizClient::new(http, &config.base_url, &config.spreadsheet_id)),
    };

    let data = load_dashboard(source.as_ref(), &config.sheets).await?;
    print_pretty(&data.accounts);
    Ok(data)
}
