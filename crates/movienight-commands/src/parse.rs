//! Command-string parsing: `!command args` plus bare confirmations.

const COMMAND_PREFIX: char = '!';

#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Lowercased command word without the prefix.
    pub command: String,
    /// Remainder after the command word, trimmed. Empty when absent.
    pub args: String,
}

/// Parse a `!`-prefixed command. `None` for anything else.
pub fn parse_command(message: &str) -> Option<ParsedCommand> {
    let trimmed = message.trim();
    let without_prefix = trimmed.strip_prefix(COMMAND_PREFIX)?;

    match without_prefix.split_once(' ') {
        Some((command, args)) => Some(ParsedCommand {
            command: command.to_lowercase(),
            args: args.trim().to_string(),
        }),
        None => Some(ParsedCommand {
            command: without_prefix.to_lowercase(),
            args: String::new(),
        }),
    }
}

/// A bare "yes" (or local variants) confirms a pending suggestion.
pub fn is_confirmation(message: &str) -> bool {
    matches!(message.trim().to_lowercase().as_str(), "yes" | "y" | "ja")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_with_args() {
        let parsed = parse_command("!suggest The Matrix").unwrap();
        assert_eq!(parsed.command, "suggest");
        assert_eq!(parsed.args, "The Matrix");
    }

    #[test]
    fn command_without_args() {
        let parsed = parse_command("!list").unwrap();
        assert_eq!(parsed.command, "list");
        assert_eq!(parsed.args, "");
    }

    #[test]
    fn command_is_lowercased_and_args_trimmed() {
        let parsed = parse_command("  !Suggest   Heat  ").unwrap();
        assert_eq!(parsed.command, "suggest");
        assert_eq!(parsed.args, "Heat");
    }

    #[test]
    fn non_command_is_none() {
        assert!(parse_command("just chatting").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn confirmation_variants() {
        assert!(is_confirmation("yes"));
        assert!(is_confirmation(" YES "));
        assert!(is_confirmation("y"));
        assert!(is_confirmation("ja"));
        assert!(!is_confirmation("yes please"));
        assert!(!is_confirmation("no"));
    }
}
