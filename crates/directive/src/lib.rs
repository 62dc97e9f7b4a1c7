//! `s///` and `y///` directives.
//!
//! A chat line starting with `s/` rewrites the most recent history entry
//! matching a regular expression; one starting with `y/` transliterates the
//! most recent entry containing any of the listed characters. Everything
//! else is plain chat and is only recorded.

pub mod error;
pub mod parse;
pub mod substitute;
pub mod translate;

use sedbot_history::{HistoryBuffer, Message};

pub use {
    error::{DirectiveError, Result},
    parse::{Command, Directive, split_fields},
    substitute::substitute,
    translate::translate,
};

/// Run `command` against `history`.
///
/// Plain chat is recorded and yields `Ok(None)`. Directives yield the
/// rewritten message to echo back, or the error to report to the requester.
pub fn apply(
    command: &Command,
    author: &str,
    text: &str,
    history: &mut HistoryBuffer,
) -> Result<Option<Message>> {
    match command {
        Command::Plain => {
            history.record(Message::new(author, text));
            Ok(None)
        },
        Command::Substitution(directive) => substitute(history, directive).map(Some),
        Command::Translation(directive) => translate(history, directive).map(Some),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn run(history: &mut HistoryBuffer, author: &str, text: &str) -> Result<Option<Message>> {
        let command = Command::classify(text)?;
        apply(&command, author, text, history)
    }

    #[test]
    fn plain_chat_is_recorded_without_reply() {
        let mut history = HistoryBuffer::new();
        assert_eq!(run(&mut history, "alice", "foo baz").unwrap(), None);
        assert_eq!(history.front(), Some(&Message::new("alice", "foo baz")));
    }

    #[test]
    fn directives_are_not_recorded() {
        let mut history = HistoryBuffer::new();
        run(&mut history, "alice", "foo baz").unwrap();
        let reply = run(&mut history, "bob", "s/foo/bar/").unwrap();
        assert_eq!(reply.unwrap().to_string(), "<alice> bar baz");
        assert_eq!(history.len(), 1);

        let err = run(&mut history, "bob", "s/onlyoneSlash").unwrap_err();
        assert_eq!(err.to_string(), "Too few '/'s.");
        assert_eq!(history.len(), 1);
        assert_eq!(history.front(), Some(&Message::new("alice", "bar baz")));
    }

    #[test]
    fn rewritten_entry_can_be_rewritten_again() {
        let mut history = HistoryBuffer::new();
        run(&mut history, "alice", "cab").unwrap();
        run(&mut history, "bob", "y/ab/xy/").unwrap();
        let reply = run(&mut history, "carol", "s/xy/!/").unwrap().unwrap();
        assert_eq!(reply.to_string(), "<alice> c!");
    }

    #[test]
    fn backslashes_can_be_mapped_and_inserted() {
        let mut history = HistoryBuffer::new();
        run(&mut history, "alice", "a\\b").unwrap();
        let reply = run(&mut history, "bob", "y/\\\\/x/").unwrap().unwrap();
        assert_eq!(reply.to_string(), "<alice> axb");

        run(&mut history, "alice", "a/b").unwrap();
        let reply = run(&mut history, "bob", "s/\\//\\\\/").unwrap().unwrap();
        assert_eq!(reply.to_string(), "<alice> a\\b");
    }
}
