use std::fmt;

use serde::Serialize;

/// Inline formatting runs parsed from `lark_md` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InlineNode {
    Text(String),
    Strong(Vec<InlineNode>),
    Emphasis(Vec<InlineNode>),
    Strikethrough(Vec<InlineNode>),
    Code(String),
    Link { href: String, content: Vec<InlineNode> },
    SoftBreak,
    HardBreak,
}

impl InlineNode {
    /// The text of this run with all formatting dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain(&mut out);
        out
    }

    fn push_plain(&self, out: &mut String) {
        match self {
            InlineNode::Text(s) | InlineNode::Code(s) => out.push_str(s),
            InlineNode::Strong(children)
            | InlineNode::Emphasis(children)
            | InlineNode::Strikethrough(children)
            | InlineNode::Link { content: children, .. } => {
                for child in children {
                    child.push_plain(out);
                }
            }
            InlineNode::SoftBreak => out.push(' '),
            InlineNode::HardBreak => out.push('\n'),
        }
    }
}

fn write_runs(f: &mut fmt::Formatter<'_>, runs: &[InlineNode]) -> fmt::Result {
    for run in runs {
        write!(f, "{}", run)?;
    }
    Ok(())
}

impl fmt::Display for InlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineNode::Text(s) => write!(f, "{}", s),
            InlineNode::Strong(children) => {
                write!(f, "**")?;
                write_runs(f, children)?;
                write!(f, "**")
            }
            InlineNode::Emphasis(children) => {
                write!(f, "*")?;
                write_runs(f, children)?;
                write!(f, "*")
            }
            InlineNode::Strikethrough(children) => {
                write!(f, "~~")?;
                write_runs(f, children)?;
                write!(f, "~~")
            }
            InlineNode::Code(code) => write!(f, "`{}`", code),
            InlineNode::Link { href, content } => {
                write!(f, "[")?;
                write_runs(f, content)?;
                write!(f, "]({})", href)
            }
            InlineNode::SoftBreak | InlineNode::HardBreak => writeln!(f),
        }
    }
}
