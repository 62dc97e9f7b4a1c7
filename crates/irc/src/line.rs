/// Channel name prefixes (RFC 2811).
const CHANNEL_PREFIXES: &[char] = &['#', '&', '+', '!'];

/// The server lines sedbot reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrcLine<'a> {
    /// `PING <token>`; the token is echoed back verbatim in `PONG`.
    Ping(&'a str),
    /// `:<nick>!<user>@<host> PRIVMSG <target> :<text>`
    Privmsg {
        target: &'a str,
        author: &'a str,
        text: &'a str,
    },
    /// `001`: registration accepted.
    Welcome,
    /// `433`: the requested nick is taken.
    NickInUse,
    Other,
}

/// Parse one line received from the server, without its terminator.
pub fn parse_line(line: &str) -> IrcLine<'_> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (prefix, rest) = match line.strip_prefix(':') {
        Some(tagged) => match tagged.split_once(' ') {
            Some((prefix, rest)) => (Some(prefix), rest),
            None => return IrcLine::Other,
        },
        None => (None, line),
    };
    let (command, params) = rest.split_once(' ').unwrap_or((rest, ""));

    match command {
        "PING" => IrcLine::Ping(params),
        "001" => IrcLine::Welcome,
        "433" => IrcLine::NickInUse,
        "PRIVMSG" => {
            let Some(author) = prefix.map(nick_of).filter(|n| !n.is_empty()) else {
                return IrcLine::Other;
            };
            let Some((target, text)) = params.split_once(' ') else {
                return IrcLine::Other;
            };
            IrcLine::Privmsg {
                target,
                author,
                text: text.strip_prefix(':').unwrap_or(text),
            }
        },
        _ => IrcLine::Other,
    }
}

/// Nick part of a `nick!user@host` prefix.
fn nick_of(prefix: &str) -> &str {
    prefix.split(['!', '@']).next().unwrap_or(prefix)
}

/// Whether `target` names a channel rather than a user.
pub fn is_channel(target: &str) -> bool {
    target.starts_with(CHANNEL_PREFIXES)
}
