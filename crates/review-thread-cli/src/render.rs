//! Plain-text rendering of the thread view

use review_thread::{Node, ThreadEvent, ThreadViewState};
use std::fmt::Write;

const EXCERPT_LEN: usize = 60;

fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > EXCERPT_LEN || text.lines().nth(1).is_some() {
        let cut: String = line.chars().take(EXCERPT_LEN).collect();
        format!("{}…", cut.trim_end())
    } else {
        line.to_string()
    }
}

fn meta(node: &Node) -> String {
    let mut meta = format!("@{} ▲{}", node.author.handle, node.upvote_count);
    if node.viewer_has_upvoted {
        meta.push('*');
    }
    if node.reply_count() > 0 {
        let _ = write!(meta, " ({} replies)", node.reply_count());
    }
    if node.is_edited {
        meta.push_str(" (edited)");
    }
    if node.image_url.is_some() {
        meta.push_str(" [image]");
    }
    meta
}

/// Breadcrumb, focused node and its direct replies
pub fn thread(state: &ThreadViewState) -> String {
    let mut out = String::new();

    let crumbs: Vec<&str> = state
        .breadcrumb()
        .iter()
        .map(|node| node.id.as_str())
        .collect();
    let _ = writeln!(out, "{}", crumbs.join(" > "));

    let focus = state.cursor().focus_node();
    let _ = writeln!(out, "[{}] {}", focus.id, meta(focus));
    if let Some(score) = focus
        .payload
        .as_ref()
        .and_then(|payload| payload.get("score"))
    {
        let _ = writeln!(out, "  score: {}", score);
    }
    for line in focus.content.lines() {
        let _ = writeln!(out, "  {}", line);
    }

    let children = state.visible_children();
    if children.is_empty() {
        let _ = writeln!(out, "  (no replies)");
    }
    for child in children {
        let _ = writeln!(
            out,
            "  - [{}] {}: {}",
            child.id,
            meta(child),
            excerpt(&child.content)
        );
    }
    out
}

/// One-line notice for events worth telling the user about
pub fn event(event: &ThreadEvent) -> Option<String> {
    match event {
        ThreadEvent::DeepLinkMissed { requested } => Some(format!(
            "Comment {} is not in this thread, showing the review",
            requested
        )),
        ThreadEvent::ScrollRequested(target) => Some(format!("→ {}", target.target)),
        ThreadEvent::Rejected(err) => Some(format!("! {}", err)),
        ThreadEvent::RefetchRequested => Some("Reloading thread…".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use review_thread::{Author, Forest, NodeId, ThreadAction, UserId};

    fn state() -> ThreadViewState {
        let reply = Node::new(NodeId::from("11"), Author::new(1, "ana"), "Acme");
        let comment = Node::new(NodeId::from("10"), Author::new(2, "bo"), "Which brand?")
            .with_upvotes(2, false)
            .with_replies(vec![reply]);
        let root = Node::new(NodeId::review(1), Author::new(1, "ana"), "Helped")
            .with_payload(serde_json::json!({ "score": 4 }))
            .with_replies(vec![comment]);
        ThreadViewState::new(Forest::new(root), Some(UserId(2))).unwrap()
    }

    #[test]
    fn test_thread_at_root() {
        let out = thread(&state());
        assert_eq!(
            out,
            "review-1\n\
             [review-1] @ana ▲0 (1 replies)\n  score: 4\n  Helped\n  \
             - [10] @bo ▲2 (1 replies): Which brand?\n"
        );
    }

    #[test]
    fn test_thread_on_leaf() {
        let mut state = state();
        state.handle_action(ThreadAction::Open(NodeId::from("11")));
        let out = thread(&state);
        assert!(out.starts_with("review-1 > 10 > 11\n"));
        assert!(out.contains("(no replies)"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");
        assert_eq!(excerpt("first\nsecond"), "first…");
        let long = "x".repeat(80);
        assert_eq!(excerpt(&long).chars().count(), EXCERPT_LEN + 1);
    }
}
