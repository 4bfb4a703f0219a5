use std::io;
use std::path::{Path, PathBuf};

/// Reduce a client-supplied filename to a safe name component
///
/// Drops any path components (either separator style), maps whitespace to
/// underscores, keeps only ASCII alphanumerics plus `.`, `_`, `-`, and strips
/// leading/trailing dots so no traversal or hidden-file name survives. May
/// return an empty string for a filename with nothing salvageable.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_matches('.').to_string()
}

/// Ensure the upload directory exists
pub async fn init_upload_dir(dir: &Path) -> io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}

/// Write uploaded image bytes under the upload directory
///
/// An existing file with the same sanitized name is overwritten; there is no
/// collision handling or unique-naming strategy.
pub async fn save_file(dir: &Path, filename: &str, data: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(filename);
    tokio::fs::write(&path, data).await?;
    tracing::debug!("Saved upload: {:?} ({} bytes)", path, data.len());
    Ok(path)
}
