//! Player input sanitizing and verb/noun splitting.

use crate::error::InputError;

/// Clean a raw input line.
///
/// Letters are lowered, runs of spaces collapse to one and the ends are
/// trimmed. Anything other than letters and spaces is rejected. Returns
/// `Ok(None)` for a line with no words.
pub fn sanitize(raw: &str) -> Result<Option<String>, InputError> {
    let mut clean = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            'a'..='z' => clean.push(c),
            'A'..='Z' => clean.push(c.to_ascii_lowercase()),
            ' ' => {
                if !clean.is_empty() && !clean.ends_with(' ') {
                    clean.push(' ');
                }
            }
            other => return Err(InputError::InvalidCharacter(other)),
        }
    }

    let clean = clean.trim_end().to_string();
    if clean.is_empty() {
        Ok(None)
    } else {
        Ok(Some(clean))
    }
}

/// A sanitized line split into a verb and its nouns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    /// The verb, possibly several words long.
    pub verb: String,
    /// Everything after the verb, one word per noun.
    pub nouns: Vec<String>,
}

impl PlayerCommand {
    /// Parse a raw line.
    ///
    /// The verb is the longest run of leading words accepted by `is_command`,
    /// so multi-word verbs work. When no prefix matches, the first word is
    /// taken as the verb.
    pub fn parse(raw: &str, is_command: impl Fn(&str) -> bool) -> Result<Option<Self>, InputError> {
        let Some(clean) = sanitize(raw)? else {
            return Ok(None);
        };
        let words: Vec<&str> = clean.split(' ').collect();

        let verb_len = (1..=words.len())
            .rev()
            .find(|&n| is_command(&words[..n].join(" ")))
            .unwrap_or(1);

        Ok(Some(Self {
            verb: words[..verb_len].join(" "),
            nouns: words[verb_len..].iter().map(|w| w.to_string()).collect(),
        }))
    }
}

/// Whether an answer to a yes/no question means yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        sanitize(answer).ok().flatten().as_deref(),
        Some("y" | "yes" | "yeah" | "sure")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowers_and_collapses() {
        assert_eq!(
            sanitize("  Look   AT the  Cow ").unwrap(),
            Some("look at the cow".to_string())
        );
    }

    #[test]
    fn sanitize_rejects_symbols() {
        assert_eq!(sanitize("look!"), Err(InputError::InvalidCharacter('!')));
        assert_eq!(sanitize("push 3 cows"), Err(InputError::InvalidCharacter('3')));
        assert_eq!(sanitize("push\tcow"), Err(InputError::InvalidCharacter('\t')));
    }

    #[test]
    fn sanitize_empty_is_none() {
        assert_eq!(sanitize("").unwrap(), None);
        assert_eq!(sanitize("    ").unwrap(), None);
    }

    #[test]
    fn parse_single_word_verb() {
        let cmd = PlayerCommand::parse("push cow box", |v| v == "push")
            .unwrap()
            .unwrap();
        assert_eq!(cmd.verb, "push");
        assert_eq!(cmd.nouns, vec!["cow", "box"]);
    }

    #[test]
    fn parse_prefers_longest_verb() {
        let known = ["pick", "pick up"];
        let cmd = PlayerCommand::parse("Pick Up box", |v| known.contains(&v))
            .unwrap()
            .unwrap();
        assert_eq!(cmd.verb, "pick up");
        assert_eq!(cmd.nouns, vec!["box"]);
    }

    #[test]
    fn parse_unknown_verb_uses_first_word() {
        let cmd = PlayerCommand::parse("dance wildly", |_| false)
            .unwrap()
            .unwrap();
        assert_eq!(cmd.verb, "dance");
        assert_eq!(cmd.nouns, vec!["wildly"]);
    }

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("Yes"));
        assert!(is_affirmative(" y "));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yes!"));
        assert!(!is_affirmative(""));
    }
}
