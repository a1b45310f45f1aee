use std::path::Path;

use anyhow::Context;
use chamber_auth::Viewer;
use chamber_config::ChamberConfig;
use chamber_core::RowSizes;
use chamber_core::identity::SessionToken;
use chamber_db::service::ChamberService;
use chamber_mail::{HttpMailer, MemoryMailer};
use chamber_storage::{StorageError, UploadStore};

use super::mailer::AppMailer;
use super::session_file;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ChamberService,
    pub config: ChamberConfig,
    pub mailer: AppMailer,
    pub uploads: Option<UploadStore>,
    pub viewer: Viewer,
    pub session_token: Option<SessionToken>,
    pub row_sizes: RowSizes,
}

impl AppContext {
    /// Open the database, pick the mail and upload backends, and resolve the
    /// remembered session.
    pub async fn init(config: ChamberConfig) -> anyhow::Result<Self> {
        if !config.database.is_remote() {
            ensure_parent_dir(Path::new(&config.database.path))?;
        }

        let service = ChamberService::from_config(&config)
            .await
            .context("failed to open chamber database")?;

        let mailer = if config.mail.is_configured() {
            AppMailer::Http(HttpMailer::from_config(&config.mail)?)
        } else {
            tracing::debug!("mail provider not configured; keeping outgoing mail in memory");
            AppMailer::Outbox(MemoryMailer::new())
        };

        let uploads = if config.storage.is_configured() {
            Some(UploadStore::from_config(&config.storage).context("failed to build upload store")?)
        } else {
            None
        };

        let row_sizes = config.directory.row_sizes()?;
        let session_token = session_file::load();
        let viewer = resolve_viewer(&service, session_token.as_ref()).await;

        Ok(Self {
            service,
            config,
            mailer,
            uploads,
            viewer,
            session_token,
            row_sizes,
        })
    }

    /// The upload store, or `StorageError::NotConfigured`.
    pub fn uploads(&self) -> Result<&UploadStore, StorageError> {
        self.uploads.as_ref().ok_or(StorageError::NotConfigured)
    }
}

async fn resolve_viewer(service: &ChamberService, token: Option<&SessionToken>) -> Viewer {
    let Some(token) = token else {
        return Viewer::Anonymous;
    };
    match service.resolve_identity(token).await {
        Ok(identity) => {
            if identity.is_none() {
                tracing::debug!("remembered session is unknown or expired");
            }
            Viewer::from_identity(identity)
        }
        Err(error) => {
            tracing::warn!(%error, "failed to resolve session; continuing signed out");
            Viewer::Anonymous
        }
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if path.as_os_str() == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}
