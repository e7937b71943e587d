//! Inline parsing for `lark_md` text.

use pulldown_cmark::{Event, Options, Parser as CmarkParser, Tag, TagEnd};

use crate::output::InlineNode;

/// Parse `lark_md` content into inline runs.
///
/// Only inline formatting is kept; block structure collapses into the runs
/// of its text, with a hard break between consecutive paragraphs.
pub fn parse_inlines(content: &str) -> Vec<InlineNode> {
    let events: Vec<Event<'_>> = CmarkParser::new_ext(content, Options::ENABLE_STRIKETHROUGH).collect();
    let mut i = 0;
    let mut runs = Vec::new();
    while i < events.len() {
        collect_runs(&events, &mut i, &mut runs, None);
    }
    runs
}

/// Collect runs until the matching end tag (or the end of input).
fn collect_runs(events: &[Event<'_>], i: &mut usize, runs: &mut Vec<InlineNode>, until: Option<TagEnd>) {
    while *i < events.len() {
        let event = &events[*i];
        *i += 1;
        match event {
            Event::End(end) if Some(*end) == until => return,
            Event::Start(Tag::Paragraph) => {
                if !runs.is_empty() {
                    runs.push(InlineNode::HardBreak);
                }
            }
            Event::Text(s) | Event::InlineHtml(s) | Event::Html(s) => push_text(runs, s),
            Event::Code(s) => runs.push(InlineNode::Code(s.to_string())),
            Event::SoftBreak => runs.push(InlineNode::SoftBreak),
            Event::HardBreak => runs.push(InlineNode::HardBreak),
            Event::Start(Tag::Strong) => {
                let mut children = Vec::new();
                collect_runs(events, i, &mut children, Some(TagEnd::Strong));
                runs.push(InlineNode::Strong(children));
            }
            Event::Start(Tag::Emphasis) => {
                let mut children = Vec::new();
                collect_runs(events, i, &mut children, Some(TagEnd::Emphasis));
                runs.push(InlineNode::Emphasis(children));
            }
            Event::Start(Tag::Strikethrough) => {
                let mut children = Vec::new();
                collect_runs(events, i, &mut children, Some(TagEnd::Strikethrough));
                runs.push(InlineNode::Strikethrough(children));
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                let href = dest_url.to_string();
                let mut content = Vec::new();
                collect_runs(events, i, &mut content, Some(TagEnd::Link));
                runs.push(InlineNode::Link { href, content });
            }
            _ => {}
        }
    }
}

/// Append text, merging with a preceding text run.
fn push_text(runs: &mut Vec<InlineNode>, s: &str) {
    if let Some(InlineNode::Text(last)) = runs.last_mut() {
        last.push_str(s);
    } else {
        runs.push(InlineNode::Text(s.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineNode {
        InlineNode::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_a_single_run() {
        assert_eq!(parse_inlines("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn nested_formatting() {
        assert_eq!(
            parse_inlines("**bold *and italic*** ~~gone~~"),
            vec![
                InlineNode::Strong(vec![text("bold "), InlineNode::Emphasis(vec![text("and italic")])]),
                text(" "),
                InlineNode::Strikethrough(vec![text("gone")]),
            ]
        );
    }

    #[test]
    fn links_and_code() {
        assert_eq!(
            parse_inlines("see [docs](https://example.test) or `cargo`"),
            vec![
                text("see "),
                InlineNode::Link {
                    href: "https://example.test".to_string(),
                    content: vec![text("docs")],
                },
                text(" or "),
                InlineNode::Code("cargo".to_string()),
            ]
        );
    }

    #[test]
    fn paragraphs_are_separated_by_hard_breaks() {
        let runs = parse_inlines("first\n\nsecond");
        assert_eq!(runs, vec![text("first"), InlineNode::HardBreak, text("second")]);
        let plain: String = runs.iter().map(InlineNode::plain_text).collect();
        assert_eq!(plain, "first\nsecond");
    }
}
