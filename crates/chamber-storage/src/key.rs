//! Object key construction for uploads.

use crate::error::StorageError;

/// Image types accepted for logos, service images, and gallery photos.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Content type for an accepted extension.
#[must_use]
pub fn content_type_for(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn clean_segment(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Normalise a folder such as `"Logos/Acme Mart"` into `"logos/acme-mart"`.
///
/// # Errors
///
/// Returns `StorageError::InvalidPath` for `..` segments or a folder that
/// cleans down to nothing.
pub fn clean_folder(folder: &str) -> Result<String, StorageError> {
    let mut segments = Vec::new();
    for raw in folder.split('/').filter(|s| !s.trim().is_empty()) {
        if raw.trim() == ".." || raw.trim() == "." {
            return Err(StorageError::InvalidPath(folder.to_string()));
        }
        let segment = clean_segment(raw);
        if !segment.is_empty() {
            segments.push(segment);
        }
    }
    if segments.is_empty() {
        return Err(StorageError::InvalidPath(folder.to_string()));
    }
    Ok(segments.join("/"))
}

/// Split and validate a file name into `(stem, extension)`.
///
/// # Errors
///
/// Returns `StorageError::UnsupportedType` if the extension is missing or not
/// an accepted image type.
pub fn clean_file_name(file_name: &str) -> Result<(String, String), StorageError> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let Some((stem, extension)) = base.rsplit_once('.') else {
        return Err(StorageError::UnsupportedType(file_name.to_string()));
    };
    let extension = extension.to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(StorageError::UnsupportedType(extension));
    }
    let stem = clean_segment(stem);
    let stem = if stem.is_empty() { String::from("file") } else { stem };
    Ok((stem, extension))
}

/// Random 8-hex-char prefix so two uploads of `logo.png` never collide.
///
/// # Errors
///
/// Returns `StorageError::Other` if the OS random source fails.
pub fn unique_prefix() -> Result<String, StorageError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| StorageError::Other(e.to_string()))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}

/// Full object key: `{folder}/{prefix}-{stem}.{ext}`.
///
/// # Errors
///
/// See [`clean_folder`], [`clean_file_name`], and [`unique_prefix`].
pub fn object_key(folder: &str, file_name: &str) -> Result<String, StorageError> {
    let folder = clean_folder(folder)?;
    let (stem, extension) = clean_file_name(file_name)?;
    Ok(format!("{folder}/{}-{stem}.{extension}", unique_prefix()?))
}
