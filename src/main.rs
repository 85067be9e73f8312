use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use futurama_roster::{
    api::FuturamaClient,
    cli::Cli,
    config::Config,
    tui,
    view::{rows::plain_report, App},
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "futurama_roster=info");
    }

    let mut config = Config::from_env()?;
    if let Some(log_file) = cli.log_file.clone() {
        config.log_file = log_file;
    }
    config.validate()?;

    init_logging(&config, cli.cli)?;
    info!("Starting futurama-roster against {}", config.api_base_url);

    let client = FuturamaClient::new(&config)?;
    let mut app = App::new(Arc::new(client));

    if cli.cli {
        return run_cli(&mut app).await;
    }

    match tui::run_tui(&mut app).await {
        Ok(_) => {
            info!("TUI exited successfully");
        }
        Err(e) => {
            error!("TUI encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Initialize logging to the log file, and to stderr as well in CLI mode.
/// The TUI owns the terminal, so it only logs to the file.
fn init_logging(config: &Config, cli_mode: bool) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let (log_dir, log_file_name) = config.log_file_parts()?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_file_name);

    let stderr_layer = cli_mode.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();

    Ok(())
}

/// CLI mode: run one fetch cycle, print the roster and exit
async fn run_cli(app: &mut App) -> Result<()> {
    app.mount();
    app.wait_for_fetch().await;

    let report = plain_report(&app.state);
    if app.state.error().is_some() {
        eprintln!("{}", report);
        std::process::exit(1);
    }

    println!("{}", report);
    Ok(())
}
