//! Video duration probing via ffprobe.
//!
//! The probe is best-effort: callers that need a duration regardless of
//! ffprobe availability should use [`video_duration_or_default`].

use std::path::Path;

use crate::media::DEFAULT_DURATION_SECS;

/// Error type for ffprobe invocations.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("ffprobe binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("video file not found: {0}")]
    VideoNotFound(String),
}

/// Probe the duration of a video file in seconds.
///
/// Runs `ffprobe -v error -show_entries format=duration
/// -of default=noprint_wrappers=1:nokey=1 <path>` and parses the single
/// floating-point line it prints.
pub async fn video_duration_secs(path: &Path) -> Result<f64, ProbeError> {
    if !path.exists() {
        return Err(ProbeError::VideoNotFound(path.display().to_string()));
    }

    let output = tokio::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()
        .await
        .map_err(ProbeError::NotFound)?;

    if !output.status.success() {
        return Err(ProbeError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .trim()
        .parse::<f64>()
        .map_err(|e| ProbeError::ParseError(format!("{e}: {stdout:?}")))
}

/// Probe a video's duration, falling back to [`DEFAULT_DURATION_SECS`] when
/// ffprobe is unavailable or fails.
pub async fn video_duration_or_default(path: &Path) -> f64 {
    match video_duration_secs(path).await {
        Ok(duration) => duration,
        Err(_) => DEFAULT_DURATION_SECS,
    }
}
