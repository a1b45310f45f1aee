//! Remembered CLI session token.
//!
//! Resolution order: `CHAMBER_SESSION_TOKEN`, then `.chamber/session` in the
//! project root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chamber_core::identity::SessionToken;

pub const SESSION_ENV: &str = "CHAMBER_SESSION_TOKEN";

#[must_use]
pub fn session_path() -> PathBuf {
    PathBuf::from(".chamber").join("session")
}

/// Token from the environment or the session file.
#[must_use]
pub fn load() -> Option<SessionToken> {
    std::env::var(SESSION_ENV)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .map(SessionToken::new)
        .or_else(|| load_from(&session_path()))
}

pub fn store(token: &SessionToken) -> anyhow::Result<()> {
    store_at(&session_path(), token)
}

/// Remove the session file. Returns whether one existed.
pub fn delete() -> anyhow::Result<bool> {
    delete_at(&session_path())
}

fn load_from(path: &Path) -> Option<SessionToken> {
    let content = fs::read_to_string(path).ok()?;
    let token = content.trim();
    if token.is_empty() {
        None
    } else {
        Some(SessionToken::new(token))
    }
}

fn store_at(path: &Path, token: &SessionToken) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, token.as_str())
        .with_context(|| format!("failed to write session file {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict {}", path.display()))?;
    }

    Ok(())
}

fn delete_at(path: &Path) -> anyhow::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn store_load_delete_cycle() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join(".chamber").join("session");

        store_at(&path, &SessionToken::new("tok_abc")).expect("store");
        assert_eq!(load_from(&path).map(|t| t.as_str().to_string()), Some("tok_abc".into()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        assert!(delete_at(&path).expect("delete"));
        assert!(load_from(&path).is_none());
        assert!(!delete_at(&path).expect("second delete"));
    }

    #[test]
    fn blank_file_is_no_session() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("session");
        fs::write(&path, "  \n").expect("write");
        assert!(load_from(&path).is_none());
    }
}
