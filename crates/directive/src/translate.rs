use std::collections::HashMap;

use sedbot_history::{HistoryBuffer, Message};

use crate::{
    error::{DirectiveError, Result},
    parse::Directive,
};

/// Apply `y/set1/set2/` to the most recent message containing any character
/// of `set1`.
///
/// Characters are paired by position. If `set1` lists a character twice the
/// later pairing wins.
pub fn translate(history: &mut HistoryBuffer, directive: &Directive) -> Result<Message> {
    let map = translation_map(&directive.left, &directive.right)?;
    let index = history
        .position(|m| m.text.chars().any(|c| map.contains_key(&c)))
        .ok_or(DirectiveError::NoMatchFound)?;
    let target = history.get(index).ok_or(DirectiveError::NoMatchFound)?;

    let text: String = target
        .text
        .chars()
        .map(|c| map.get(&c).copied().unwrap_or(c))
        .collect();
    let rewritten = Message::new(target.author.clone(), text);

    history
        .replace(index, rewritten)
        .ok_or(DirectiveError::NoMatchFound)
}

fn translation_map(from: &str, to: &str) -> Result<HashMap<char, char>> {
    if from.chars().count() != to.chars().count() {
        return Err(DirectiveError::LengthMismatch);
    }
    Ok(from.chars().zip(to.chars()).collect())
}
