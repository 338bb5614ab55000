//! Slash-command grammar of the terminal client.

use thiserror::Error;

pub const HELP_TEXT: &str = "Commands:
  /help              show this help
  /users             list online users in the current room
  /join <room>       switch to a different room
  /dm <user> <msg>   send a private message to a user
  /quit              disconnect and exit";

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Users,
    Join(String),
    Dm { to_user: String, content: String },
    Quit,
    /// Plain text, posted to the current room.
    Say(String),
    /// Blank line.
    Empty,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: /join <room>")]
    JoinUsage,
    #[error("Usage: /dm <user> <message>")]
    DmUsage,
    #[error("Unknown command: {0}  (type /help)")]
    Unknown(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(ChatCommand::Empty);
        }
        if !input.starts_with('/') {
            return Ok(ChatCommand::Say(input.to_string()));
        }

        let mut parts = input.splitn(3, ' ');
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());
        let rest = parts.next().map(str::trim).filter(|s| !s.is_empty());

        match cmd.as_str() {
            "/help" => Ok(ChatCommand::Help),
            "/users" => Ok(ChatCommand::Users),
            "/quit" => Ok(ChatCommand::Quit),
            "/join" => arg
                .map(|room| ChatCommand::Join(room.to_string()))
                .ok_or(CommandError::JoinUsage),
            "/dm" => match (arg, rest) {
                (Some(to_user), Some(content)) => Ok(ChatCommand::Dm {
                    to_user: to_user.to_string(),
                    content: content.to_string(),
                }),
                _ => Err(CommandError::DmUsage),
            },
            _ => Err(CommandError::Unknown(cmd)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_said() {
        assert_eq!(
            ChatCommand::parse("  hello there \n"),
            Ok(ChatCommand::Say("hello there".into()))
        );
        assert_eq!(ChatCommand::parse("   "), Ok(ChatCommand::Empty));
    }

    #[test]
    fn dm_keeps_rest_of_line() {
        assert_eq!(
            ChatCommand::parse("/dm bob hi there"),
            Ok(ChatCommand::Dm {
                to_user: "bob".into(),
                content: "hi there".into()
            })
        );
        assert_eq!(ChatCommand::parse("/dm bob"), Err(CommandError::DmUsage));
    }

    #[test]
    fn join_requires_room() {
        assert_eq!(
            ChatCommand::parse("/JOIN rust"),
            Ok(ChatCommand::Join("rust".into()))
        );
        assert_eq!(ChatCommand::parse("/join"), Err(CommandError::JoinUsage));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(ChatCommand::parse("/help"), Ok(ChatCommand::Help));
        assert_eq!(ChatCommand::parse("/users"), Ok(ChatCommand::Users));
        assert_eq!(ChatCommand::parse("/quit"), Ok(ChatCommand::Quit));
        assert_eq!(
            ChatCommand::parse("/shout x"),
            Err(CommandError::Unknown("/shout".into()))
        );
    }
}
