//! Pre-flight checks before talking to YouTube.
//!
//! Validates that required tools are available before starting operations
//! that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, TranscriberError};
use std::path::Path;
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Searching needs yt-dlp.
    Search,
    /// Transcripts need yt-dlp for track listing.
    Transcript,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Search | Operation::Transcript => {
            check_tool(&settings.ytdlp_path())?;
        }
    }
    Ok(())
}

/// Check if an external tool is available.
pub fn check_tool(program: &Path) -> Result<()> {
    let name = program.display().to_string();
    match Command::new(program).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TranscriberError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TranscriberError::ToolNotFound(name))
        }
        Err(e) => Err(TranscriberError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let mut settings = Settings::default();
        settings.youtube.ytdlp_path = "/nonexistent/yt-dlp-binary".to_string();

        for operation in [Operation::Search, Operation::Transcript] {
            let err = check(operation, &settings).unwrap_err();
            assert!(matches!(err, TranscriberError::ToolNotFound(ref name) if name.contains("yt-dlp-binary")));
        }
    }
}
