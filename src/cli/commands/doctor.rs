//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use crate::search::{MAX_LIMIT, MIN_LIMIT};
use console::style;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    Output::header("yt-transcriber doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("External Tools").bold());
    let tool_check = check_ytdlp(&settings.ytdlp_path());
    tool_check.print();
    checks.push(tool_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_path = config_path.unwrap_or_else(Settings::default_config_path);
    let config_checks = vec![check_config_file(&config_path), check_settings(settings)];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Search and transcripts will fail until they are fixed.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! yt-transcriber is ready to use.");
    }

    Ok(())
}

/// Check that yt-dlp runs and report its version.
fn check_ytdlp(program: &Path) -> CheckResult {
    let name = "yt-dlp";
    match Command::new(program).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok(name, &format!("{} ({})", version, program.display()))
        }
        Ok(_) => CheckResult::error(name, "installed but not working", install_hint_ytdlp()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::error(
            name,
            &format!("not found at {}", program.display()),
            install_hint_ytdlp(),
        ),
        Err(e) => CheckResult::error(name, &format!("error: {}", e), install_hint_ytdlp()),
    }
}

/// Check whether the config file exists and parses.
fn check_config_file(path: &Path) -> CheckResult {
    if !path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: yt-transcriber config init",
        );
    }

    match Settings::load_from(Some(&path.to_path_buf())) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", path.display())),
        Err(e) => CheckResult::error(
            "Config file",
            &format!("{} is invalid: {}", path.display(), e),
            "Fix the file or regenerate it with: yt-transcriber config init --force",
        ),
    }
}

/// Flag setting values that will be silently adjusted at runtime.
fn check_settings(settings: &Settings) -> CheckResult {
    let limit = settings.search.default_limit;
    if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        return CheckResult::warning(
            "Search defaults",
            &format!("default_limit {} will be clamped", limit),
            &format!("Use a value between {} and {}", MIN_LIMIT, MAX_LIMIT),
        );
    }
    if settings.youtube.timeout_seconds == 0 {
        return CheckResult::warning(
            "Timeouts",
            "timeout_seconds is 0 and will be raised to 1",
            "Set [youtube] timeout_seconds to a positive value",
        );
    }
    CheckResult::ok(
        "Defaults",
        &format!(
            "limit {}, language {}, timeout {}s",
            limit, settings.transcript.default_language, settings.youtube.timeout_seconds
        ),
    )
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}
