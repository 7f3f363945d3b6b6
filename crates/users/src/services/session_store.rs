//! Persisted `userInfo` record for the signed-in user.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::entities::CurrentUser;
use crate::types::UserResult;

/// File-backed storage of the current session.
///
/// The record is written by the sign-in flow, read once at start-up and
/// removed on logout.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, `None` if nobody is signed in.
    pub async fn load(&self) -> UserResult<Option<CurrentUser>> {
        if !fs::try_exists(&self.path).await? {
            debug!(path = %self.path.display(), "no stored session");
            return Ok(None);
        }

        let raw = fs::read(&self.path).await?;
        let current: CurrentUser = serde_json::from_slice(&raw)?;
        debug!(user_id = %current.id(), "loaded stored session");
        Ok(Some(current))
    }

    pub async fn save(&self, current: &CurrentUser) -> UserResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let raw = serde_json::to_vec_pretty(current)?;
        fs::write(&self.path, raw).await?;
        info!(user_id = %current.id(), "stored session");
        Ok(())
    }

    /// Remove the stored session. Missing file is not an error.
    pub async fn clear(&self) -> UserResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "cleared stored session");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
