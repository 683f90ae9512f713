use std::path::PathBuf;
use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Commands that can be invoked by starting a message with a leading slash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SlashCommand {
    /// Load a logo image from a file
    Logo,
    /// Show help
    Help,
    /// Exit the application
    Bye,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: SlashCommand,
    pub argument: Option<String>,
}

impl ParsedCommand {
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// Path argument of `/logo`, with a leading `~/` expanded
    pub fn logo_path(&self) -> Option<PathBuf> {
        if self.command != SlashCommand::Logo {
            return None;
        }

        let arg = self.argument()?.trim();
        match arg.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(arg)),
        }
    }
}

impl SlashCommand {
    /// User-visible description shown in help.
    pub fn description(self) -> &'static str {
        match self {
            SlashCommand::Logo => "load a logo image, e.g. /logo ~/acme.png",
            SlashCommand::Help => "show available commands",
            SlashCommand::Bye => "exit the application",
        }
    }

    /// Command string without the leading '/'.
    pub fn command(self) -> &'static str {
        self.into()
    }
}

/// Parse a slash command from user input
pub fn parse_slash_command(input: &str) -> Option<ParsedCommand> {
    let input = input.trim_start();
    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, char::is_whitespace);
    let head = parts.next()?;
    let rest = parts.next().map(str::trim).filter(|s| !s.is_empty());

    let command = SlashCommand::from_str(head).ok().or_else(|| match head.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Some(SlashCommand::Bye),
        "h" | "?" => Some(SlashCommand::Help),
        _ => None,
    })?;

    Some(ParsedCommand {
        command,
        argument: rest.map(|s| s.to_string()),
    })
}

/// Get help text for all available commands
pub fn get_help_text() -> String {
    let mut help = String::from("Commands:");
    for command in SlashCommand::iter() {
        help.push_str(&format!("  /{} - {}", command.command(), command.description()));
    }
    help.push_str("  | Enter sends, PgUp/PgDn scroll, Esc quits");
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(parse_slash_command("What is the capital of France?").is_none());
        assert!(parse_slash_command("a/b").is_none());
    }

    #[test]
    fn parses_logo_with_path() {
        let parsed = parse_slash_command("/logo  /tmp/my logo.png ").unwrap();
        assert_eq!(parsed.command, SlashCommand::Logo);
        assert_eq!(parsed.logo_path(), Some(PathBuf::from("/tmp/my logo.png")));
    }

    #[test]
    fn logo_without_path() {
        let parsed = parse_slash_command("/logo").unwrap();
        assert_eq!(parsed.logo_path(), None);
    }

    #[test]
    fn aliases() {
        for alias in ["/q", "/quit", "/exit", "/bye"] {
            assert_eq!(parse_slash_command(alias).unwrap().command, SlashCommand::Bye);
        }
        assert_eq!(parse_slash_command("/?").unwrap().command, SlashCommand::Help);
    }

    #[test]
    fn unknown_command_is_none() {
        assert!(parse_slash_command("/dance").is_none());
    }

    #[test]
    fn help_lists_every_command() {
        let help = get_help_text();
        for command in SlashCommand::iter() {
            assert!(help.contains(&format!("/{}", command.command())));
        }
    }
}
