//! External-tool conversion strategy.
//!
//! Writes the source into a scoped temp directory, invokes a native converter
//! executable as `<tool> <input> <output>`, and reads the produced usdz back.
//! The TempDir guard removes the work files on every exit path; the child
//! process is killed if the timeout elapses.

use crate::traits::{ConversionError, UsdzConverter};
use arcast_core::ModelFormat;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Converter backed by an external executable (e.g. Apple's `usdzconvert` or
/// a `gltf2usd` wrapper).
pub struct ExternalConverter {
    tool_path: PathBuf,
    timeout: Duration,
}

impl ExternalConverter {
    pub fn new(tool_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            tool_path: tool_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl UsdzConverter for ExternalConverter {
    async fn convert(
        &self,
        data: &[u8],
        format: ModelFormat,
    ) -> Result<Vec<u8>, ConversionError> {
        if !format.is_convertible() {
            return Err(ConversionError::UnsupportedSource(
                format.extension().to_string(),
            ));
        }

        let work_dir = tempfile::tempdir()?;
        let input_path = work_dir
            .path()
            .join(format!("input.{}", format.extension()));
        let output_path = work_dir.path().join("output.usdz");

        tokio::fs::write(&input_path, data).await?;

        let start = std::time::Instant::now();

        let mut command = Command::new(&self.tool_path);
        command
            .arg(&input_path)
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ConversionError::Timeout(self.timeout))?
            .map_err(|e| {
                ConversionError::Tool(format!(
                    "failed to execute {}: {}",
                    self.tool_path.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConversionError::Tool(format!(
                "{} exited with {}: {}",
                self.tool_path.display(),
                output.status,
                stderr.trim()
            )));
        }

        let usdz_bytes = tokio::fs::read(&output_path).await.map_err(|e| {
            ConversionError::Tool(format!("converter produced no output file: {}", e))
        })?;

        tracing::debug!(
            tool = %self.tool_path.display(),
            input_bytes = data.len(),
            output_bytes = usdz_bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "external conversion finished"
        );

        Ok(usdz_bytes)
    }

    fn strategy(&self) -> &'static str {
        "external"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `cp input output` behaves like a converter that copies bytes through,
    // which is enough to exercise the invocation and read-back path.
    #[tokio::test]
    async fn runs_tool_and_reads_output_back() {
        let converter = ExternalConverter::new("cp", Duration::from_secs(10));
        let result = converter
            .convert(b"glTFfake-binary-model", ModelFormat::Glb)
            .await
            .unwrap();
        assert_eq!(result, b"glTFfake-binary-model");
    }

    #[tokio::test]
    async fn nonzero_exit_is_a_tool_error() {
        let converter = ExternalConverter::new("false", Duration::from_secs(10));
        let err = converter
            .convert(b"glTFx", ModelFormat::Glb)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::Tool(_)));
    }

    #[tokio::test]
    async fn missing_output_file_is_a_tool_error() {
        // `true` succeeds without writing anything.
        let converter = ExternalConverter::new("true", Duration::from_secs(10));
        let err = converter
            .convert(b"glTFx", ModelFormat::Glb)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::Tool(_)));
    }

    #[tokio::test]
    async fn missing_executable_is_a_tool_error() {
        let converter = ExternalConverter::new("/nonexistent/usdzconvert", Duration::from_secs(10));
        let err = converter
            .convert(b"glTFx", ModelFormat::Glb)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::Tool(_)));
    }

    #[tokio::test]
    async fn non_convertible_source_is_rejected_before_invocation() {
        let converter = ExternalConverter::new("/nonexistent/usdzconvert", Duration::from_secs(10));
        let err = converter
            .convert(b"solid teapot", ModelFormat::Obj)
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedSource(_)));
    }
}
