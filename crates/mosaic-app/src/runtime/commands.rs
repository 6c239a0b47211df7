//! User commands read from the terminal, one per line.

use mosaic_common::ConversationId;
use mosaic_tiling::LayoutTree;

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Open(ConversationId),
    Close(ConversationId),
    /// Replace the whole layout with a JSON-encoded tree.
    Layout(LayoutTree),
    Send {
        conversation_id: ConversationId,
        text: String,
    },
    Retry(ConversationId),
    List,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("invalid layout: {0}")]
    Layout(String),
}

pub const HELP: &str = "commands: open <id> | close <id> | layout <json> | send <id> <text> | retry <id> | list | quit";

impl UserCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "" => Err(CommandError::Empty),
            "open" => Ok(UserCommand::Open(conversation_arg("open", rest)?)),
            "close" => Ok(UserCommand::Close(conversation_arg("close", rest)?)),
            "retry" => Ok(UserCommand::Retry(conversation_arg("retry", rest)?)),
            "layout" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "layout",
                        what: "a JSON tree",
                    });
                }
                serde_json::from_str(rest)
                    .map(UserCommand::Layout)
                    .map_err(|e| CommandError::Layout(e.to_string()))
            }
            "send" => {
                let (id, text) = rest
                    .split_once(char::is_whitespace)
                    .map(|(id, text)| (id, text.trim()))
                    .filter(|(_, text)| !text.is_empty())
                    .ok_or(CommandError::MissingArgument {
                        command: "send",
                        what: "a conversation id and a message",
                    })?;
                Ok(UserCommand::Send {
                    conversation_id: ConversationId::from(id),
                    text: text.to_string(),
                })
            }
            "list" | "ls" => Ok(UserCommand::List),
            "quit" | "exit" => Ok(UserCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn conversation_arg(command: &'static str, rest: &str) -> Result<ConversationId, CommandError> {
    match rest.split_whitespace().next() {
        Some(id) => Ok(ConversationId::from(id)),
        None => Err(CommandError::MissingArgument {
            command,
            what: "a conversation id",
        }),
    }
}
