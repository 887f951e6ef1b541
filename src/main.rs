use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use coinconv::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Alpha Vantage API key, overrides the one in the configuration file
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for coinconv::AppCommand {
    fn from(cmd: Commands) -> coinconv::AppCommand {
        match cmd {
            Commands::Coins => coinconv::AppCommand::Coins,
            Commands::Convert {
                amount,
                no_amount,
                coin,
                currency,
            } => coinconv::AppCommand::Convert(coinconv::ConvertArgs {
                amount,
                no_amount,
                coin,
                currency,
            }),
            Commands::Rate { coin, currency } => coinconv::AppCommand::Rate { coin, currency },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List supported coins
    Coins,
    /// Convert an amount of a coin into a fiat currency
    Convert {
        /// Amount of the coin to convert, defaults to the configured amount
        #[arg(allow_negative_numbers = true)]
        amount: Option<f64>,

        /// Convert nothing, as if the amount field were cleared
        #[arg(long, conflicts_with = "amount")]
        no_amount: bool,

        /// Coin ticker, e.g. BTC
        #[arg(long)]
        coin: Option<String>,

        /// Target currency: USD, EUR or GBP
        #[arg(long)]
        currency: Option<String>,
    },
    /// Show the full exchange rate quote for a coin
    Rate {
        /// Coin ticker, e.g. BTC
        #[arg(long)]
        coin: Option<String>,

        /// Target currency: USD, EUR or GBP
        #[arg(long)]
        currency: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = coinconv::RunOptions {
        config_path: cli.config_path.as_deref(),
        api_key: cli.api_key.as_deref(),
    };

    let result = match cli.command {
        Some(Commands::Setup) => coinconv::cli::setup::setup(),
        Some(cmd) => coinconv::run_command(cmd.into(), options).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
