//! `fundhub` -- command-line companion for the fundhub client.
//!
//! ```text
//! fundhub validate <rewards.json> [funding-end]
//! fundhub listen
//! ```
//!
//! `validate` checks a reward list (a JSON array, or a single reward object)
//! and prints the result as JSON, exiting with status 1 if it is invalid.
//! `listen` streams notifications for the configured session until Ctrl-C.
//!
//! # Environment variables
//!
//! See [`ClientConfig::from_env`]. A `.env` file is loaded if present.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fundhub_client::config::ClientConfig;
use fundhub_client::notifications::{NotificationListener, NotificationStore};
use fundhub_client::session::SessionStore;
use fundhub_core::reward::{validate_reward_list, RewardContext, RewardInput};

const USAGE: &str = "usage: fundhub validate <rewards.json> [funding-end] | fundhub listen";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundhub_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("validate") => {
            let Some(path) = args.get(1) else {
                bail!(USAGE);
            };
            let ok = validate(Path::new(path), args.get(2).map(String::as_str))?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }
        Some("listen") => listen().await,
        _ => bail!(USAGE),
    }
}

fn validate(path: &Path, funding_end: Option<&str>) -> anyhow::Result<bool> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let json: Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    let inputs: Vec<RewardInput> = match json {
        Value::Array(_) => serde_json::from_value(json)?,
        other => vec![serde_json::from_value(other)?],
    };
    let ctx = funding_end
        .map(|date| RewardContext::with_funding_end(date))
        .unwrap_or_default();

    let result = validate_reward_list(&inputs, &ctx);
    tracing::info!(
        rewards = inputs.len(),
        ok = result.ok,
        violations = result.all_errors.len(),
        "Validated reward list",
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.ok)
}

async fn listen() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    let session = Arc::new(match &config.access_token {
        Some(token) => SessionStore::with_token(token.clone()),
        None => SessionStore::new(),
    });
    if !session.is_signed_in().await {
        tracing::warn!("ACCESS_TOKEN is not set; the stream may reject the connection");
    }

    let store = Arc::new(NotificationStore::default());
    let listener = NotificationListener::new(&config, session, Arc::clone(&store))?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
            cancel.cancel();
        }
    });

    let mut rx = store.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notification) => match serde_json::to_string(&notification) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!(error = %e, "Could not print notification"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    tracing::info!(url = %config.notification_stream_url(), "Listening for notifications");
    let result = listener.run(cancel).await;
    drop(listener);
    drop(store);
    // The printer ends once every sender is gone.
    printer.await.ok();
    result?;
    Ok(())
}
