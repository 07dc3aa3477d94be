//! Line commands typed at the prompt

use review_thread::{NodeId, ThreadAction};

pub const HELP: &str = "\
Commands:
  open <id>         show a comment and its replies
  back              go up one level (leaves the review at the top)
  reply <text>      reply to the focused node
  upvote [id]       toggle your upvote (defaults to the focused node)
  edit <id> <text>  replace a node's text
  link <id>         jump to a comment as if following a link
  reload            fetch the thread again
  help              show this help
  quit              leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(ThreadAction),
    /// Upvote whatever is focused when the command runs
    UpvoteFocused,
    Help,
    Empty,
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match (word, rest) {
        ("", _) => Command::Empty,
        ("open" | "o", id) if !id.is_empty() => Command::Action(ThreadAction::Open(NodeId::from(id))),
        ("back" | "b", _) => Command::Action(ThreadAction::Back),
        ("reply" | "r", text) => Command::Action(ThreadAction::Reply(text.to_string())),
        ("upvote" | "u", "") => Command::UpvoteFocused,
        ("upvote" | "u", id) => Command::Action(ThreadAction::ToggleUpvote(NodeId::from(id))),
        ("edit" | "e", rest) => match rest.split_once(char::is_whitespace) {
            Some((id, text)) => Command::Action(ThreadAction::Edit {
                node_id: NodeId::from(id),
                content: text.trim().to_string(),
            }),
            None => Command::Unknown(line.to_string()),
        },
        ("link" | "l", id) if !id.is_empty() => {
            Command::Action(ThreadAction::DeepLink(NodeId::from(id)))
        }
        ("reload", _) => Command::Action(ThreadAction::Reload),
        ("help" | "h" | "?", _) => Command::Help,
        ("quit" | "q" | "exit", _) => Command::Action(ThreadAction::Close),
        _ => Command::Unknown(line.to_string()),
    }
}
