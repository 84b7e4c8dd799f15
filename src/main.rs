use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

mod client;
mod clipboard;
mod commands;
mod domain;
mod logging;
mod state;
mod theme;
mod tui;
mod ui;

#[cfg(test)]
mod test_utils;

use crate::domain::{AccountIndex, ContractDefinition};
use crate::state::{App, AppConfig, ConfigOverrides, NodeLauncher};
use crate::theme::ThemeVariant;

/// lazyvote version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const LOGO: &str = r"
 _                                _
| | __ _ _____   ___   _____  ___| |_ ___
| |/ _` |_  / | | \ \ / / _ \|_  _| __/ _ \
| | (_| |/ /| |_| |\ V / (_) || | | ||  __/
|_|\__,_/___|\__, | \_/ \___/ |_|  \__\___|
             |___/
";

/// lazyvote - Terminal dashboard for a local voting contract
#[derive(Debug, Parser)]
#[command(name = "lazyvote", version = VERSION, about, long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON-RPC endpoint of the local node
    #[arg(long, value_name = "URL")]
    rpc_url: Option<String>,

    /// Path of the compiled contract artifact
    #[arg(long, value_name = "PATH")]
    contract: Option<PathBuf>,

    /// Color scheme
    #[arg(long, value_enum)]
    theme: Option<ThemeVariant>,

    /// Account slot (0-8) selected when the dashboard opens
    #[arg(long, value_name = "N", value_parser = parse_account)]
    account: Option<AccountIndex>,

    /// Seconds allowed for node setup and contract lookup (1-86400)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=86_400))]
    timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Display version with ASCII art
    Version,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            rpc_url: self.rpc_url.clone(),
            contract_path: self.contract.clone(),
            theme: self.theme,
            setup_timeout_secs: self.timeout,
        }
    }
}

fn parse_account(raw: &str) -> Result<AccountIndex, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    AccountIndex::new(value).map_err(|e| e.to_string())
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(Commands::Version) = cli.command {
        println!("{LOGO}");
        println!("lazyvote v{VERSION}");
        return Ok(());
    }

    if let Err(err) = logging::init() {
        eprintln!("warning: logging disabled: {err}");
    }

    let config = AppConfig::load().with_overrides(cli.overrides());
    let definition = ContractDefinition::load(&config.contract_path).wrap_err_with(|| {
        format!(
            "failed to load contract artifact {}",
            config.contract_path.display()
        )
    })?;
    tracing::info!(
        contract = %definition.contract_name,
        rpc_url = %config.rpc_url,
        "configuration loaded"
    );

    let launcher = NodeLauncher::new(config.rpc_url.clone(), definition, config.setup_timeout())
        .sync_poll(config.sync_poll());
    let mut app = App::new(config, Arc::new(launcher))
        .with_initial_account(cli.account.unwrap_or_default())
        .with_persistence(true);

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal);
    tui::restore()?;

    result
}
