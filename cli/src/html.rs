//! Materializes a compiled card tree as an HTML fragment.

use std::fmt::Write;

use card::output::{Content, InlineNode, NodeKind, OutputNode};
use card::style;

pub fn render(tree: &OutputNode) -> String {
    let mut out = String::new();
    write_node(&mut out, tree);
    out
}

fn write_node(out: &mut String, node: &OutputNode) {
    let class = escape(&node.classes.join(" "));
    match node.kind {
        NodeKind::Root => {
            let _ = write!(out, "<div class=\"{}\"><style>{}</style>", class, style::STYLESHEET);
            write_children(out, node);
            out.push_str("</div>");
        }
        NodeKind::Hr => {
            let _ = write!(out, "<hr class=\"{}\">", class);
        }
        NodeKind::Img | NodeKind::EmbeddedImg => {
            let src = node.locator().unwrap_or_default();
            let alt = node.attrs.alt.as_deref().unwrap_or_default();
            let _ = write!(out, "<img class=\"{}\" src=\"{}\" alt=\"{}\"", class, escape(src), escape(alt));
            if let Some(width) = node.attrs.custom_width {
                let _ = write!(out, " style=\"max-width: {}px\"", width);
            }
            out.push('>');
        }
        NodeKind::EmbeddedText => {
            let _ = write!(out, "<span class=\"{}\">", class);
            if node.attrs.inline.is_empty() {
                out.push_str(&escape(node.text().unwrap_or_default()));
            } else {
                write_inlines(out, &node.attrs.inline);
            }
            out.push_str("</span>");
        }
        NodeKind::Header
        | NodeKind::ElementsContainer
        | NodeKind::Div
        | NodeKind::Note
        | NodeKind::ColumnSet
        | NodeKind::Column => {
            let _ = write!(out, "<div class=\"{}\">", class);
            match &node.content {
                Content::Text(text) => out.push_str(&escape(text)),
                _ => write_children(out, node),
            }
            out.push_str("</div>");
        }
    }
}

fn write_children(out: &mut String, node: &OutputNode) {
    for child in node.children() {
        write_node(out, child);
    }
}

fn write_inlines(out: &mut String, runs: &[InlineNode]) {
    for run in runs {
        match run {
            InlineNode::Text(text) => out.push_str(&escape(text)),
            InlineNode::Code(code) => {
                let _ = write!(out, "<code>{}</code>", escape(code));
            }
            InlineNode::Strong(children) => wrap(out, "strong", children),
            InlineNode::Emphasis(children) => wrap(out, "em", children),
            InlineNode::Strikethrough(children) => wrap(out, "del", children),
            InlineNode::Link { href, content } => {
                let _ = write!(out, "<a href=\"{}\">", escape(href));
                write_inlines(out, content);
                out.push_str("</a>");
            }
            InlineNode::SoftBreak => out.push(' '),
            InlineNode::HardBreak => out.push_str("<br>"),
        }
    }
}

fn wrap(out: &mut String, tag: &str, children: &[InlineNode]) {
    let _ = write!(out, "<{}>", tag);
    write_inlines(out, children);
    let _ = write!(out, "</{}>", tag);
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use compiler::Compiler;

    use super::*;

    #[test]
    fn renders_elements_with_escaping() {
        let source = r#"{
            "header": {"title": {"tag": "plain_text", "content": "Q&A"}, "template": "red"},
            "elements": [
                {"tag": "div", "text": {"tag": "plain_text", "content": "<b>"}},
                {"tag": "img", "img_key": "k", "alt": "pic", "custom_width": 300, "compact_width": true},
                {"tag": "note", "elements": [{"tag": "lark_md", "content": "**hi** [x](https://e.test)"}]}
            ]
        }"#;
        let out = Compiler::default().compile(source).expect("compile");
        let html = render(&out.tree);

        assert!(html.starts_with("<div class=\"lark-card\"><style>"));
        assert!(html.contains("<div class=\"lark-card-header red\">Q&amp;A</div>"));
        assert!(html.contains("<div class=\"lark-card-element div\">&lt;b&gt;</div>"));
        assert!(html.contains(
            "<img class=\"lark-card-element img compact\" src=\"https://open.feishu.cn/open-apis/block-kit/image/k\" alt=\"pic\" style=\"max-width: 300px\">"
        ));
        assert!(html.contains(
            "<span class=\"lark-card-embedded text\"><strong>hi</strong> <a href=\"https://e.test\">x</a></span>"
        ));
        assert!(html.ends_with("</div></div>"));
    }
}
