use {
    regex::Regex,
    sedbot_history::{HistoryBuffer, Message},
};

use crate::{
    error::{DirectiveError, Result},
    parse::Directive,
};

/// Apply `s/pattern/replacement/` to the most recent matching message.
///
/// The rewritten message keeps the original author and moves to the front
/// of the history. `$1` and `${name}` in the replacement expand to captures.
pub fn substitute(history: &mut HistoryBuffer, directive: &Directive) -> Result<Message> {
    let re = Regex::new(&directive.left)?;
    let index = history
        .position(|m| re.is_match(&m.text))
        .ok_or(DirectiveError::NoMatchFound)?;
    let target = history.get(index).ok_or(DirectiveError::NoMatchFound)?;

    let text = re
        .replace_all(&target.text, directive.right.as_str())
        .into_owned();
    let rewritten = Message::new(target.author.clone(), text);

    history
        .replace(index, rewritten)
        .ok_or(DirectiveError::NoMatchFound)
}
