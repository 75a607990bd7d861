//! # Main Entry Point
//!
//! Initializes the link bot:
//! - Domain: Configuration, Types and Errors
//! - Infrastructure: Matrix, Logging
//! - Application: Link Store, Registry, Router
//! - Interface: Command Handlers
//!
//! A malformed link store aborts startup before any message is handled.

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::OriginalSyncRoomMessageEvent,
    },
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::application::registry::CommandRegistry;
use crate::application::router::CommandRouter;
use crate::application::store::LinkStore;
use crate::domain::config::AppConfig;
use crate::infrastructure::matrix::{MatrixService, inbound_from_event};
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(
    name = "linkbot",
    version,
    about = "Matrix bot that answers short commands with saved server links"
)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, env = "LINKBOT_CONFIG", default_value = "data/config.yaml")]
    config: PathBuf,

    /// JSON link store, overrides `storage.path` from the config
    #[arg(long, env = "LINKBOT_STORE")]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let _log_guard = infrastructure::logging::init(&config.logging)?;
    tracing::info!("{}", logs::STARTING);
    tracing::info!(
        "{}",
        logs::config_loaded(
            &args.config.display().to_string(),
            &config.services.matrix.username
        )
    );

    // 3. Link Store
    let store_path = args
        .store
        .unwrap_or_else(|| PathBuf::from(&config.storage.path));
    let store = LinkStore::load(&store_path).context("Failed to load link store")?;
    tracing::info!(
        "{}",
        logs::store_loaded(&store.path().display().to_string(), store.len())
    );
    let store = Arc::new(RwLock::new(store));

    // 4. Matrix Setup
    let matrix = &config.services.matrix;
    let secret = matrix.secret()?;

    let client = Client::builder()
        .homeserver_url(&matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(&matrix.username, &secret)
        .initial_device_display_name("linkbot")
        .send()
        .await
        .context("Matrix login failed")?;

    tracing::info!("{}", logs::logged_in(&matrix.username));

    if let Some(name) = &matrix.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    // 5. Router
    let own_user_id = client.user_id().map(|id| id.to_string());
    let router = Arc::new(CommandRouter::new(
        config.bot.prefix.clone(),
        own_user_id,
        CommandRegistry::standard(),
        store,
    ));

    // 6. Event Handlers
    let start_time = SystemTime::now();

    client.add_event_handler(move |ev: OriginalSyncRoomMessageEvent, room: Room| {
        let router = router.clone();

        async move {
            // Ignore history delivered by the initial sync
            let event_time =
                UNIX_EPOCH + Duration::from_millis(ev.origin_server_ts.get().into());
            if event_time < start_time {
                return;
            }

            let Some(message) = inbound_from_event(&ev) else {
                return;
            };

            let chat = MatrixService::new(room);
            if let Err(e) = router.route(&chat, &message).await {
                tracing::error!("Failed to route message: {}", e);
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::warn!(
                    "{}",
                    logs::join_failed(room.room_id().as_str(), &e.to_string())
                );
            }
        }
    });

    // 7. Sync Loop
    tracing::info!("{}", logs::SYNC_LOOP_START);
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}
