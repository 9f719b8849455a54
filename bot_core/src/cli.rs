use std::ffi::OsString;
use std::io::Write;

use anyhow::Result;
use clap::Parser;
use futures_api::{
    API_KEY_VAR, API_SECRET_VAR, BinanceClient, Config, Credentials, ExchangeClient, MockClient,
};
use thiserror::Error;

use crate::{
    OrderManager, OrderRequest, Settings, ValidationError, format_order_response,
    format_request_summary, validators::validate_symbol,
};

pub const SUCCESS: u8 = 0;
pub const FAILURE: u8 = 1;

const ORDER_EXAMPLES: &str = "\
Examples:
  # Place a market buy order
  place_order --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001

  # Place a limit sell order
  place_order --symbol ETHUSDT --side SELL --type LIMIT --quantity 0.01 --price 3000

  # Simulate without contacting the exchange
  place_order --symbol BTCUSDT --side buy --type market --quantity 0.001 --dry-run";

#[derive(Parser, Debug)]
#[command(
    name = "place_order",
    version,
    about = "Binance Futures Trading Bot - Place orders on testnet",
    after_help = ORDER_EXAMPLES
)]
pub struct OrderArgs {
    /// Trading pair (e.g., BTCUSDT)
    #[arg(long)]
    pub symbol: String,

    /// Order side: BUY or SELL (case-insensitive)
    #[arg(long)]
    pub side: String,

    /// Order type: MARKET or LIMIT (case-insensitive)
    #[arg(long = "type")]
    pub order_type: String,

    /// Order quantity
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,

    /// Limit price (required for LIMIT orders)
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    #[command(flatten)]
    pub auth: AuthArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "account_info",
    version,
    about = "Check the connection: print futures balances and symbol trading rules"
)]
pub struct AccountArgs {
    /// Also print the trading rules of this symbol
    #[arg(long)]
    pub symbol: Option<String>,

    #[command(flatten)]
    pub auth: AuthArgs,
}

#[derive(clap::Args, Debug)]
pub struct AuthArgs {
    /// Binance API key (or set BINANCE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Binance API secret (or set BINANCE_API_SECRET)
    #[arg(long)]
    pub api_secret: Option<String>,

    /// Simulate without contacting Binance
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("API credentials not found")]
    MissingCredentials,
}

impl AuthArgs {
    /// `None` in dry-run mode.
    fn credentials(self, config: &Config) -> Result<Option<Credentials>, CliError> {
        if self.dry_run {
            tracing::info!("Dry-run mode enabled");
            return Ok(None);
        }
        config
            .credentials(self.api_key, self.api_secret)
            .map(Some)
            .ok_or(CliError::MissingCredentials)
    }
}

/// Entry point of `place_order`. Returns the process exit code.
pub async fn place_order<I, T>(
    args: I,
    settings: &Settings,
    config: &Config,
    out: &mut impl Write,
) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match OrderArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => return usage_failure(e),
    };

    match execute_order(args, settings, config, out).await {
        Ok(()) => {
            tracing::info!("Order completed successfully");
            SUCCESS
        }
        Err(e) => report(e, "Failed to place order", out),
    }
}

/// Entry point of `account_info`. Returns the process exit code.
pub async fn account_info<I, T>(
    args: I,
    settings: &Settings,
    config: &Config,
    out: &mut impl Write,
) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match AccountArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => return usage_failure(e),
    };

    match execute_account(args, settings, config, out).await {
        Ok(()) => SUCCESS,
        Err(e) => report(e, "Failed to query account", out),
    }
}

async fn execute_order(
    args: OrderArgs,
    settings: &Settings,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let request = OrderRequest::from_raw(
        &args.symbol,
        &args.side,
        &args.order_type,
        &args.quantity,
        args.price.as_deref(),
        &settings.quote_asset,
    )?;
    let credentials = args.auth.credentials(config)?;

    write!(out, "{}", format_request_summary(&request))?;

    tracing::info!("Initializing Binance client...");
    match credentials {
        None => submit(OrderManager::new(MockClient::new()), &request, out).await,
        Some(credentials) => {
            let client = BinanceClient::new(credentials, config)?;
            submit(OrderManager::new(client), &request, out).await
        }
    }
}

async fn submit<C: ExchangeClient>(
    manager: OrderManager<C>,
    request: &OrderRequest,
    out: &mut impl Write,
) -> Result<()> {
    let order = manager.place(request).await?;
    writeln!(out, "{}", format_order_response(&order))?;
    Ok(())
}

async fn execute_account(
    args: AccountArgs,
    settings: &Settings,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    let symbol = args
        .symbol
        .as_deref()
        .map(|s| validate_symbol(s, &settings.quote_asset))
        .transpose()?;
    let credentials = args.auth.credentials(config)?;

    match credentials {
        None => show_account(&MockClient::new(), symbol.as_deref(), out).await,
        Some(credentials) => {
            let client = BinanceClient::new(credentials, config)?;
            show_account(&client, symbol.as_deref(), out).await
        }
    }
}

async fn show_account<C: ExchangeClient>(
    client: &C,
    symbol: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let account = client.get_account_info().await?;
    let rule = "=".repeat(50);

    writeln!(out, "\n{rule}\nFUTURES ACCOUNT\n{rule}")?;
    if let Some(total) = &account.total_wallet_balance {
        writeln!(out, "Total Wallet Balance: {total}")?;
    }
    if let Some(available) = &account.available_balance {
        writeln!(out, "Available Balance: {available}")?;
    }
    let funded: Vec<_> = account.assets.iter().filter(|a| !a.is_empty()).collect();
    if funded.is_empty() {
        writeln!(out, "No funded assets")?;
    }
    for asset in funded {
        match &asset.available_balance {
            Some(available) => writeln!(
                out,
                "{}: {} (available {available})",
                asset.asset, asset.wallet_balance
            )?,
            None => writeln!(out, "{}: {}", asset.asset, asset.wallet_balance)?,
        }
    }

    if let Some(symbol) = symbol {
        writeln!(out, "{rule}")?;
        match client.get_symbol_info(symbol).await? {
            Some(info) => {
                writeln!(out, "Symbol: {} ({})", info.symbol, info.status)?;
                writeln!(out, "Assets: {} / {}", info.base_asset, info.quote_asset)?;
                writeln!(out, "Price Precision: {}", info.price_precision)?;
                writeln!(out, "Quantity Precision: {}", info.quantity_precision)?;
                for filter in &info.filters {
                    writeln!(out, "Filter: {filter}")?;
                }
            }
            None => writeln!(out, "{symbol} is not listed")?,
        }
    }
    writeln!(out, "{rule}\n")?;
    Ok(())
}

fn usage_failure(err: clap::Error) -> u8 {
    let _ = err.print();
    if err.use_stderr() { FAILURE } else { SUCCESS }
}

fn report(err: anyhow::Error, context: &str, out: &mut impl Write) -> u8 {
    if let Some(e) = err.downcast_ref::<ValidationError>() {
        let _ = writeln!(out, "\n❌ VALIDATION ERROR: {e}\n");
        tracing::error!("Validation error: {e}");
    } else if let Some(CliError::MissingCredentials) = err.downcast_ref::<CliError>() {
        let _ = writeln!(out, "\n❌ ERROR: API credentials not found!");
        let _ = writeln!(
            out,
            "Either provide --api-key and --api-secret, or set environment variables:"
        );
        let _ = writeln!(out, "  export {API_KEY_VAR}='your_key'");
        let _ = writeln!(out, "  export {API_SECRET_VAR}='your_secret'\n");
        tracing::error!("API credentials not found");
    } else {
        let _ = writeln!(out, "\n❌ ERROR: {err}\n");
        tracing::error!("{context}: {err:?}");
    }
    FAILURE
}
