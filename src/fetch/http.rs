//! Streaming archive downloads with byte progress.

use std::path::Path;

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::{Result, ToolupError};
use crate::ui;
use crate::utils::format_bytes;

/// Download a file to `dest`, rendering a byte-progress bar.
///
/// Returns the number of bytes written. Non-success HTTP statuses are an
/// error; a partial file is removed before returning one.
pub async fn download_archive(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    label: &str,
) -> Result<u64> {
    tracing::debug!("downloading {} to {}", url, dest.display());

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(ToolupError::Download {
            url: url.to_string(),
            reason: format!("server returned {}", response.status()),
        });
    }

    let bar = ui::download_bar(&format!("Downloading {} archive", label))?;
    if let Some(total) = response.content_length() {
        bar.set_length(total);
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                bar.finish_and_clear();
                drop(file);
                let _ = tokio::fs::remove_file(dest).await;
                return Err(ToolupError::Download {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        };
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        bar.set_position(written);
    }

    file.flush().await?;
    bar.finish_and_clear();
    ui::done(&format!(
        "Downloaded {} archive ({})",
        label,
        format_bytes(written)
    ));

    Ok(written)
}

/// Hex-encoded SHA-256 digest of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Verify a downloaded file against a pinned hex SHA-256 digest.
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(ToolupError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_archive_writes_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tool.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"archive-bytes".to_vec()))
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("tool.tar.gz");
        let client = reqwest::Client::new();

        let written = download_archive(
            &client,
            &format!("{}/tool.tar.gz", server.uri()),
            &dest,
            "tool",
        )
        .await
        .unwrap();

        assert_eq!(written, 13);
        assert_eq!(std::fs::read(&dest).unwrap(), b"archive-bytes");
    }

    #[tokio::test]
    async fn test_download_archive_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.tar.gz"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("missing.tar.gz");
        let client = reqwest::Client::new();

        let result = download_archive(
            &client,
            &format!("{}/missing.tar.gz", server.uri()),
            &dest,
            "missing",
        )
        .await;

        assert!(matches!(result, Err(ToolupError::Download { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_sha256_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("data");
        std::fs::write(&file, b"hello").unwrap();

        assert_eq!(
            sha256_file(&file).unwrap(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_verify_sha256_mismatch() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("data");
        std::fs::write(&file, b"hello").unwrap();

        let result = verify_sha256(&file, "00".repeat(32).as_str());
        assert!(matches!(result, Err(ToolupError::ChecksumMismatch { .. })));

        verify_sha256(
            &file,
            "2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824",
        )
        .unwrap();
    }
}
