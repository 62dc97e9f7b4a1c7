use std::path::Path;

use {anyhow::Result, clap::Subcommand};

use sedbot_config::{SedbotConfig, Severity, ValidationResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Validate the configuration and report errors/warnings.
    Check {
        /// Show informational diagnostics in addition to errors and warnings.
        #[arg(long)]
        verbose: bool,
    },
}

pub fn handle_config(
    action: &ConfigAction,
    explicit_path: Option<&Path>,
    config: &SedbotConfig,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        },
        ConfigAction::Check { verbose } => check(explicit_path, config, *verbose),
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn check(explicit_path: Option<&Path>, config: &SedbotConfig, verbose: bool) -> Result<()> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(sedbot_config::find_config_file);
    match path {
        Some(ref path) => eprintln!("Checking {}\n", path.display()),
        None => eprintln!("No config file found; checking defaults.\n"),
    }

    let result = sedbot_config::validate(config);
    let lines = render(&result, verbose);
    for line in &lines {
        eprintln!("{line}");
    }
    if !lines.is_empty() {
        eprintln!();
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn render(result: &ValidationResult, verbose: bool) -> Vec<String> {
    result
        .diagnostics
        .iter()
        .filter(|d| verbose || d.severity != Severity::Info)
        .map(|d| {
            let color = match d.severity {
                Severity::Error => RED,
                Severity::Warning => YELLOW,
                Severity::Info => CYAN,
            };
            if d.path.is_empty() {
                format!("  {BOLD}{color}{}{RESET} {}", d.severity, d.message)
            } else {
                format!(
                    "  {BOLD}{color}{}{RESET} {}: {}",
                    d.severity, d.path, d.message
                )
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn info_is_hidden_unless_verbose() {
        // Default config joins no channels, which is only informational.
        let result = sedbot_config::validate(&SedbotConfig::default());
        assert!(!result.has_errors());
        assert!(render(&result, false).is_empty());

        let verbose = render(&result, true);
        assert_eq!(verbose.len(), 1);
        assert!(verbose[0].contains("irc.channels"));
    }

    #[test]
    fn errors_carry_their_path() {
        let mut config = SedbotConfig::default();
        config.irc.nick = "two words".into();
        let lines = render(&sedbot_config::validate(&config), false);
        assert!(
            lines
                .iter()
                .any(|l| l.contains("error") && l.contains("irc.nick"))
        );
    }

    #[test]
    fn show_round_trips_through_toml() {
        let mut config = SedbotConfig::default();
        config.irc.channels = vec!["#rust".into()];
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SedbotConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
