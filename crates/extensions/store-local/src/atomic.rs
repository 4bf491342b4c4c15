//! Crash-safe file replacement.

use std::path::Path;

use tokio::fs;

use markwise_protocols::StoreError;

/// Write `content` to a sibling temp file, then rename it over `path`.
pub(crate) async fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content).await?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_and_leaves_no_temp() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data.json");

        write_atomic(&path, b"{}").await.unwrap();
        write_atomic(&path, b"{\"a\":1}").await.unwrap();

        assert_eq!(fs::read_to_string(&path).await.unwrap(), "{\"a\":1}");
        let mut entries = fs::read_dir(path.parent().unwrap()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
