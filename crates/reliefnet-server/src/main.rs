use std::net::SocketAddr;

use anyhow::bail;
use tracing::{info, warn};

use reliefnet_api::AppStateInner;
use reliefnet_db::Database;
use reliefnet_server::config::Config;

#[derive(Debug, PartialEq)]
enum Command {
    Serve,
    Setup { seed: bool },
}

fn usage() -> &'static str {
    "Usage: reliefnet [serve]\n       reliefnet setup [--seed]\n\n\
     serve          Run the HTTP API (default)\n\
     setup          Create the database schema if missing\n\
     --seed         With setup: insert the sample request\n"
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut command: Option<&str> = None;
    let mut seed = false;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{}", usage());
                std::process::exit(0);
            }
            "--seed" => seed = true,
            "serve" | "setup" if command.is_none() => command = Some(arg.as_str()),
            other => bail!("unexpected argument: {other}\n\n{}", usage()),
        }
    }

    match command.unwrap_or("serve") {
        "setup" => Ok(Command::Setup { seed }),
        _ if seed => bail!("--seed only applies to setup"),
        _ => Ok(Command::Serve),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    reliefnet_server::init_tracing("reliefnet=debug,tower_http=debug", false);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    let config = Config::from_env()?;
    let db = Database::new(&config.db_path, config.db_timeout);

    match command {
        Command::Setup { seed } => {
            db.setup(seed)?;
            Ok(())
        }
        Command::Serve => serve(config, db).await,
    }
}

async fn serve(config: Config, db: Database) -> anyhow::Result<()> {
    if config.auto_migrate {
        db.setup(false)?;
    }

    info!("Using database {}", db.path().display());
    let app = reliefnet_api::router(AppStateInner::new(db, config.db_timeout));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("ReliefNet API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
