use std::path::Path;

use anyhow::Context;
use chamber_storage::UploadRequest;

use crate::context::AppContext;

/// Read a local file into an upload for `folder`.
pub fn read_upload(path: &str, folder: &str) -> anyhow::Result<UploadRequest> {
    let path = Path::new(path);
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;
    Ok(UploadRequest {
        folder: folder.to_string(),
        file_name,
        bytes,
    })
}

/// Upload a local file and return its public URL.
pub async fn upload_file(ctx: &AppContext, path: &str, folder: &str) -> anyhow::Result<String> {
    let request = read_upload(path, folder)?;
    let url = ctx.uploads()?.upload(&request).await?;
    Ok(url)
}

/// Remove a previously uploaded file. Failures are logged, not returned.
pub async fn discard_upload(ctx: &AppContext, url: &str) {
    let Some(store) = ctx.uploads.as_ref() else {
        return;
    };
    if let Err(error) = store.delete(url).await {
        tracing::warn!(%error, url, "failed to delete stored file");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::read_upload;

    #[test]
    fn reads_bytes_and_file_name() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("Shop Front.PNG");
        std::fs::write(&path, b"png-bytes").expect("write");

        let request = read_upload(path.to_str().expect("utf8 path"), "gallery").expect("read");
        assert_eq!(request.folder, "gallery");
        assert_eq!(request.file_name, "Shop Front.PNG");
        assert_eq!(request.bytes, b"png-bytes".to_vec());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_upload("/definitely/not/here.png", "logos").is_err());
    }
}
