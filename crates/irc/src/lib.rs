//! Plaintext IRC transport.
//!
//! Connects, registers, joins the configured channels, answers `PING`, and
//! turns `PRIVMSG` lines into [`InboundMessage`]s for the channel registry.
//! Replies go out through [`IrcOutbound`], which frames and sanitizes them.
//!
//! [`InboundMessage`]: sedbot_channels::InboundMessage

pub mod client;
pub mod console;
pub mod error;
pub mod line;
pub mod outbound;
mod private;

pub use {
    client::IrcClient,
    error::{Error, Result},
    line::{IrcLine, parse_line},
    outbound::IrcOutbound,
    private::MAX_PRIVATE_CONVERSATIONS,
};
