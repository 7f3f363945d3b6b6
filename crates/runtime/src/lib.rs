use std::sync::Arc;

use anyhow::{Context, Result};
use chatsync_api::HttpChatApi;
use chatsync_config::ClientConfig;
use chatsync_users::SessionStore;
use tracing::info;

mod session;

pub use session::{ChatSession, SessionError, SessionResult};

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Build a [`ChatSession`] from configuration and the persisted session file.
///
/// Returns `None` when nobody is signed in.
pub async fn restore_session(config: &ClientConfig) -> Result<Option<ChatSession>> {
    let api = HttpChatApi::new(&config.api).context("failed to build API client")?;
    let sessions = SessionStore::new(&config.session.path);

    let Some(current) = sessions
        .load()
        .await
        .context("failed to read session file")?
    else {
        info!(path = %sessions.path().display(), "no stored session");
        return Ok(None);
    };

    info!(user = %current.id(), base_url = api.base_url(), "session restored");
    Ok(Some(ChatSession::new(
        Arc::new(api),
        sessions,
        current,
        config.search.max_results,
    )))
}
