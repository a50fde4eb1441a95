use std::path::{Path, PathBuf};

use futures::AsyncWriteExt;

use crate::{Res, error::PlayError, types::Token};

/// Reads and writes the single persisted [`Token`].
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the token from disk.
    ///
    /// Both a missing file and a file that does not decode are reported as
    /// [`PlayError::NotLoggedIn`]; the caller treats either as "run login".
    pub async fn load(&self) -> Res<Token> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.not_logged_in(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| self.not_logged_in(e.to_string()))
    }

    /// Writes the token, replacing any previous file. On unix the file is
    /// created with mode `0600`.
    pub async fn save(&self, token: &Token) -> Res<()> {
        let json = serde_json::to_string_pretty(token)?;

        let mut options = async_fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use async_fs::unix::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).await?;
        // mode() only applies on creation; tighten files left by older runs
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            async_fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600)).await?;
        }
        file.write_all(json.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        tracing::debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    fn not_logged_in(&self, reason: String) -> PlayError {
        PlayError::NotLoggedIn {
            path: self.path.display().to_string(),
            reason,
        }
    }
}
