/// Telegram client lifecycle
///
/// One grammers client handle per process, created lazily on first use
/// and shared behind a global slot. The session is restored from the
/// session file when present, otherwise from the configured base64
/// session string, so no interactive login is ever required.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use grammers_client::{Client, Config as ClientConfig, InitParams};
use grammers_session::Session;
use once_cell::sync::Lazy;
use tokio::sync::RwLock;

use crate::config::{self, Config};
use crate::errors::{StoryGateError, TelegramError};
use crate::logger::{self, LogTag};

/// Global client slot; `None` until the first successful connect
static CLIENT: Lazy<RwLock<Option<Client>>> = Lazy::new(|| RwLock::new(None));

/// Get the shared client, connecting first if needed
pub async fn get_client() -> Result<Client, StoryGateError> {
    if let Some(client) = CLIENT.read().await.clone() {
        return Ok(client);
    }
    connect().await
}

/// True when a connected client is currently available
pub async fn is_connected() -> bool {
    CLIENT.read().await.is_some()
}

async fn connect() -> Result<Client, StoryGateError> {
    let mut slot = CLIENT.write().await;
    // Another task may have connected while we waited for the lock
    if let Some(client) = slot.clone() {
        return Ok(client);
    }

    let config = config::get_config();
    config
        .validate()
        .map_err(StoryGateError::configuration_error)?;

    let session = load_session(&config)?;

    logger::debug(LogTag::Telegram, "Connecting to Telegram...");
    let client = Client::connect(ClientConfig {
        session,
        api_id: config.telegram.api_id,
        api_hash: config.telegram.api_hash.clone(),
        params: InitParams::default(),
    })
    .await
    .map_err(|e| {
        StoryGateError::Telegram(TelegramError::NotConnected {
            reason: e.to_string(),
        })
    })?;

    let authorized = client.is_authorized().await.map_err(|e| {
        StoryGateError::Telegram(TelegramError::NotConnected {
            reason: e.to_string(),
        })
    })?;
    if !authorized {
        return Err(StoryGateError::Telegram(TelegramError::NotAuthorized));
    }

    match client.get_me().await {
        Ok(me) => {
            let name = me
                .username()
                .map(|u| format!("@{}", u))
                .unwrap_or_else(|| me.id().to_string());
            logger::info(LogTag::Telegram, &format!("Client started as {}", name));
        }
        Err(e) => {
            logger::warning(
                LogTag::Telegram,
                &format!("Connected but get_me failed: {}", e),
            );
        }
    }

    persist_session(&client, &config);

    *slot = Some(client.clone());
    Ok(client)
}

/// Restore the session: file first, then the configured session string
fn load_session(config: &Config) -> Result<Session, StoryGateError> {
    let path = config.session_file_path();

    if path.exists() {
        return Session::load_file_or_create(&path).map_err(|e| {
            StoryGateError::configuration_error(format!(
                "Failed to load session file {}: {}",
                path.display(),
                e
            ))
        });
    }

    if !config.telegram.session_string.is_empty() {
        let raw = BASE64
            .decode(config.telegram.session_string.trim())
            .map_err(|e| {
                StoryGateError::configuration_error(format!("Invalid session string: {}", e))
            })?;
        return Session::load(&raw).map_err(|e| {
            StoryGateError::configuration_error(format!("Corrupt session string: {}", e))
        });
    }

    // Fresh session; the authorization check after connect will reject it
    // with a clear message instead of an interactive login.
    Session::load_file_or_create(&path).map_err(|e| {
        StoryGateError::configuration_error(format!(
            "Failed to create session file {}: {}",
            path.display(),
            e
        ))
    })
}

/// Write the session to disk so restarts skip the handshake
fn persist_session(client: &Client, config: &Config) {
    let path = config.session_file_path();
    if let Err(e) = client.session().save_to_file(&path) {
        logger::warning(
            LogTag::Telegram,
            &format!("Failed to persist session to {}: {}", path.display(), e),
        );
    }
}

/// Save the session and drop the shared client (shutdown path)
pub async fn shutdown_client() {
    let mut slot = CLIENT.write().await;
    if let Some(client) = slot.take() {
        persist_session(&client, &config::get_config());
        logger::info(LogTag::Telegram, "Telegram client stopped");
    }
}
