//! Control command vocabulary — intercepted before crisis detection and
//! the provider call.
//!
//! Matching is whole-string: the trimmed, lower-cased text must equal the
//! bare command word or the word prefixed with `/` or `!`. No partial
//! matches, no arguments.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Start,
    Reset,
    Resources,
    Crisis,
}

impl Command {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "help" => Some(Command::Help),
            "start" => Some(Command::Start),
            "reset" => Some(Command::Reset),
            "resources" => Some(Command::Resources),
            "crisis" => Some(Command::Crisis),
            _ => None,
        }
    }
}

/// Recognize a control command, or `None` when the message should flow on
/// to crisis detection and generation.
pub fn parse_command(text: &str) -> Option<Command> {
    let lower = text.trim().to_lowercase();
    let word = lower
        .strip_prefix('/')
        .or_else(|| lower.strip_prefix('!'))
        .unwrap_or(&lower);
    Command::from_word(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_prefixed_forms_match() {
        for text in ["help", "/help", "!help", "  HELP  ", "/Help"] {
            assert_eq!(parse_command(text), Some(Command::Help), "input: {text:?}");
        }
    }

    #[test]
    fn all_commands_are_recognized() {
        assert_eq!(parse_command("start"), Some(Command::Start));
        assert_eq!(parse_command("reset"), Some(Command::Reset));
        assert_eq!(parse_command("resources"), Some(Command::Resources));
        assert_eq!(parse_command("crisis"), Some(Command::Crisis));
    }

    #[test]
    fn substrings_and_arguments_do_not_match() {
        assert_eq!(parse_command("help me please"), None);
        assert_eq!(parse_command("/help now"), None);
        assert_eq!(parse_command("helpful"), None);
        assert_eq!(parse_command("restart"), None);
        assert_eq!(parse_command(""), None);
    }
}
