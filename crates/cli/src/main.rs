mod config_commands;
mod local_commands;

use std::path::PathBuf;

use {
    anyhow::bail,
    clap::{Parser, Subcommand},
    sedbot_channels::ChannelRegistry,
    sedbot_config::{SedbotConfig, Severity},
    sedbot_irc::{IrcClient, console::spawn_console},
    tracing::{error, info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "sedbot", about = "sedbot: s/// and y/// for IRC channels")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching the default locations.
    #[arg(long, global = true, env = "SEDBOT_CONFIG")]
    config: Option<PathBuf>,

    // Connection arguments (used when no subcommand is provided, or with `run`)
    /// IRC server host (overrides config value).
    #[arg(long, global = true)]
    server: Option<String>,
    /// IRC server port (overrides config value).
    #[arg(long, global = true)]
    port: Option<u16>,
    /// Nick to register with (overrides config value).
    #[arg(long, global = true)]
    nick: Option<String>,
    /// Channel to join; repeatable, added to the configured channels.
    #[arg(long = "channel", global = true)]
    channels: Vec<String>,
    /// Forward raw lines typed on stdin to the server.
    #[arg(long, global = true, default_value_t = false)]
    console: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect and serve channels (default when no subcommand is provided).
    Run,
    /// Feed `<author> text` lines from stdin into one channel, without a
    /// server. Uses the first `--channel`, or `#local`.
    Local,
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; `local` prints replies on stdout.
    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Loaded config with command-line overrides applied.
fn effective_config(cli: &Cli) -> anyhow::Result<SedbotConfig> {
    let mut config = match cli.config {
        Some(ref path) => sedbot_config::load_config(path)?,
        None => sedbot_config::discover_and_load(),
    };
    apply_overrides(cli, &mut config);
    Ok(config)
}

fn apply_overrides(cli: &Cli, config: &mut SedbotConfig) {
    if let Some(ref server) = cli.server {
        config.irc.server = server.clone();
    }
    if let Some(port) = cli.port {
        config.irc.port = port;
    }
    if let Some(ref nick) = cli.nick {
        config.irc.nick = nick.clone();
    }
    for channel in &cli.channels {
        if !config.irc.channels.contains(channel) {
            config.irc.channels.push(channel.clone());
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = effective_config(cli)?;

    let report = sedbot_config::validate(&config);
    for d in &report.diagnostics {
        match d.severity {
            Severity::Error => error!(path = %d.path, "{}", d.message),
            Severity::Warning => warn!(path = %d.path, "{}", d.message),
            Severity::Info => info!(path = %d.path, "{}", d.message),
        }
    }
    if report.has_errors() {
        bail!("invalid configuration; run `sedbot config check` for details");
    }

    let client = IrcClient::connect(&config.irc).await?;
    let outbound = client.outbound();
    if cli.console {
        spawn_console(client.outbound());
    }
    let mut registry = ChannelRegistry::new(outbound);

    tokio::select! {
        result = client.run(&mut registry) => result?,
        _ = tokio::signal::ctrl_c() => info!("interrupted, shutting down"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "sedbot starting");

    match cli.command {
        // Default: connect when no subcommand is provided
        None | Some(Commands::Run) => run(&cli).await,
        Some(Commands::Local) => {
            let channel = cli
                .channels
                .first()
                .map_or(local_commands::DEFAULT_CHANNEL, String::as_str);
            local_commands::run_local(channel).await
        },
        Some(Commands::Config { ref action }) => {
            let config = effective_config(&cli)?;
            config_commands::handle_config(action, cli.config.as_deref(), &config)
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn run_is_the_default_command() {
        let cli = Cli::try_parse_from(["sedbot", "--server", "irc.example.net"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.server.as_deref(), Some("irc.example.net"));
    }

    #[test]
    fn overrides_replace_and_append() {
        let cli = Cli::try_parse_from([
            "sedbot",
            "run",
            "--port",
            "6668",
            "--nick",
            "fixer",
            "--channel",
            "#a",
            "--channel",
            "#b",
        ])
        .unwrap();
        let mut config = SedbotConfig::default();
        config.irc.channels = vec!["#a".into()];

        apply_overrides(&cli, &mut config);

        assert_eq!(config.irc.port, 6668);
        assert_eq!(config.irc.nick, "fixer");
        assert_eq!(config.irc.server, "irc.libera.chat");
        assert_eq!(config.irc.channels, vec!["#a", "#b"]);
    }

    #[test]
    fn config_subcommands_parse() {
        let cli = Cli::try_parse_from(["sedbot", "config", "check", "--verbose"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: config_commands::ConfigAction::Check { verbose: true }
            })
        ));
    }
}
