mod cli;
mod controller;
mod runtime;

use std::path::Path;
use std::sync::Arc;

use mosaic_client::{HttpApi, PushClient};
use mosaic_common::ConversationId;
use mosaic_config::MosaicConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use controller::AppController;
use runtime::{HeadlessRenderer, Runtime, UserCommand};

fn main() {
    let args = cli::parse();

    // Config first: it decides the default log level.
    let loaded = mosaic_config::load_config(args.config.as_deref().map(Path::new));
    let default_directive = match &loaded {
        Ok(config) => config.logging.level.directive(),
        Err(_) => "mosaic=info",
    };

    let log_directive = args.log_level.as_deref().unwrap_or(default_directive);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "mosaic=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Mosaic v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        MosaicConfig::default()
    });
    args.apply_server_overrides(&mut config.server);
    tracing::info!(
        server = %config.server.base_url,
        push = %config.server.push_url,
        "Config loaded"
    );

    if args.print_config {
        println!("{}", mosaic_config::config_to_json(&config));
        return;
    }

    if let Err(e) = start(config, args.open) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

fn start(config: MosaicConfig, open: Vec<String>) -> mosaic_common::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(run(config, open))
}

async fn run(config: MosaicConfig, open: Vec<String>) -> mosaic_common::Result<()> {
    let api = Arc::new(HttpApi::new(config.server.clone())?);
    let (push, push_rx) = PushClient::connect(config.server.push_url.clone(), config.push.clone());

    let mut controller = AppController::new(&config.sync);
    let renderer = HeadlessRenderer::new(controller.subscribe(), Box::new(std::io::stdout()));
    for id in open {
        controller.open_conversation(ConversationId::from(id));
    }

    let mut runtime = Runtime::new(controller, api, Some(push), push_rx, renderer);
    runtime.load_directory().await;

    let (command_tx, command_rx) = mpsc::channel(32);
    tokio::spawn(read_commands(command_tx));

    runtime.run(command_rx).await;
    Ok(())
}

/// Parse stdin lines into commands until EOF.
async fn read_commands(tx: mpsc::Sender<UserCommand>) {
    eprintln!("{}", runtime::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read input: {e}");
                break;
            }
        };
        match UserCommand::parse(&line) {
            Ok(command) => {
                if tx.send(command).await.is_err() {
                    break;
                }
            }
            Err(runtime::CommandError::Empty) => {}
            Err(e) => eprintln!("{e}\n{}", runtime::HELP),
        }
    }
}
