//! Configuration validation.
//!
//! Checks a loaded config for values that would make registration fail or
//! that are probably mistakes.

use crate::schema::SedbotConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "irc.channels[0]"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn new(severity: Severity, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Conventional port for IRC over TLS, which sedbot does not speak.
const TLS_PORT: u16 = 6697;

const CHANNEL_PREFIXES: &[char] = &['#', '&', '+', '!'];

/// Validate an already-parsed config.
pub fn validate(config: &SedbotConfig) -> ValidationResult {
    let mut diagnostics = Vec::new();
    let irc = &config.irc;

    if irc.server.trim().is_empty() {
        diagnostics.push(Diagnostic::new(Severity::Error, "irc.server", "server is empty"));
    }
    if irc.port == 0 {
        diagnostics.push(Diagnostic::new(Severity::Error, "irc.port", "port must be non-zero"));
    } else if irc.port == TLS_PORT {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "irc.port",
            "6697 is usually a TLS port; sedbot connects in plaintext",
        ));
    }

    for (path, value) in [("irc.nick", &irc.nick), ("irc.username", &irc.username)] {
        if value.is_empty() {
            diagnostics.push(Diagnostic::new(Severity::Error, path, "must not be empty"));
        } else if value.contains(char::is_whitespace) {
            diagnostics.push(Diagnostic::new(Severity::Error, path, "must not contain whitespace"));
        }
    }

    if irc.channels.is_empty() {
        diagnostics.push(Diagnostic::new(
            Severity::Info,
            "irc.channels",
            "no channels configured; the bot will only answer private messages",
        ));
    }
    for (i, channel) in irc.channels.iter().enumerate() {
        if let Some(problem) = channel_name_problem(channel) {
            diagnostics.push(Diagnostic::new(
                Severity::Error,
                format!("irc.channels[{i}]"),
                format!("{channel:?} {problem}"),
            ));
        }
    }

    ValidationResult { diagnostics }
}

fn channel_name_problem(name: &str) -> Option<&'static str> {
    if !name.starts_with(CHANNEL_PREFIXES) {
        return Some("must start with one of # & + !");
    }
    if name.len() < 2 {
        return Some("is too short");
    }
    if name.contains([' ', ',', '\x07']) {
        return Some("must not contain spaces, commas or BEL");
    }
    None
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    fn config_with_channels(channels: &[&str]) -> SedbotConfig {
        let mut cfg = SedbotConfig::default();
        cfg.irc.channels = channels.iter().map(|c| c.to_string()).collect();
        cfg
    }

    #[test]
    fn default_config_has_no_errors() {
        let result = validate(&SedbotConfig::default());
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Info), 1);
    }

    #[test]
    fn valid_channels_are_clean() {
        let result = validate(&config_with_channels(&["#rust", "&local"]));
        assert!(result.diagnostics.is_empty());
    }

    #[rstest]
    #[case("rust")]
    #[case("#")]
    #[case("#two words")]
    #[case("#a,#b")]
    fn bad_channel_names(#[case] name: &str) {
        let result = validate(&config_with_channels(&["#ok", name]));
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "irc.channels[1]");
    }

    #[test]
    fn empty_nick_is_error() {
        let mut cfg = config_with_channels(&["#a"]);
        cfg.irc.nick.clear();
        let result = validate(&cfg);
        assert_eq!(result.count(Severity::Error), 1);
        assert_eq!(result.diagnostics[0].path, "irc.nick");
    }

    #[test]
    fn nick_with_space_is_error() {
        let mut cfg = config_with_channels(&["#a"]);
        cfg.irc.nick = "sed bot".into();
        assert!(validate(&cfg).has_errors());
    }

    #[test]
    fn empty_server_and_zero_port() {
        let mut cfg = config_with_channels(&["#a"]);
        cfg.irc.server = "  ".into();
        cfg.irc.port = 0;
        let result = validate(&cfg);
        assert_eq!(result.count(Severity::Error), 2);
    }

    #[test]
    fn tls_port_warns() {
        let mut cfg = config_with_channels(&["#a"]);
        cfg.irc.port = 6697;
        let result = validate(&cfg);
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 1);
    }

    #[test]
    fn severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
