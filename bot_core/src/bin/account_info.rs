use std::process::ExitCode;

use bot_core::{Settings, cli};
use futures_api::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid TRADING_BOT_* settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = match utils::init_tracing(&settings.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid BINANCE_* settings: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout();
    let code = cli::account_info(std::env::args_os(), &settings, &config, &mut stdout).await;
    ExitCode::from(code)
}
