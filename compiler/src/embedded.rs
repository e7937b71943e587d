use serde_json::{Map, Value};

use card::element::{EmbeddedTag, describe_tag, is_truthy, non_empty_str};
use card::markdown;
use card::output::{NodeAttrs, NodeKind, OutputNode};
use card::style;

use crate::compiler::Session;
use crate::error::CompileError;
use crate::image;
use crate::validator::{Flow, Step};

impl Session<'_> {
    /// Compile one child of a `note`. Unlike the top-level grammar there is
    /// no deferred tag here: anything outside the grammar is fatal.
    pub(crate) fn compile_embedded(&mut self, element: &Value, path: &str) -> Step<OutputNode> {
        let object = self.require(element.as_object(), "note.elements item must be an object", path)?;
        let tag = object.get("tag");
        let Some(kind) = tag.and_then(Value::as_str).and_then(EmbeddedTag::parse) else {
            return Err(Flow::Abort(self.validator.fatal(
                CompileError::UnknownTag {
                    field: "note.elements.tag",
                    tag: describe_tag(tag),
                    allowed: EmbeddedTag::allowed(),
                },
                path,
            )));
        };

        match kind {
            EmbeddedTag::PlainText | EmbeddedTag::LarkMd => self.compile_embedded_text(kind, object, path),
            EmbeddedTag::Img => self.compile_embedded_img(object, path),
        }
    }

    fn compile_embedded_text(
        &mut self,
        kind: EmbeddedTag,
        object: &Map<String, Value>,
        path: &str,
    ) -> Step<OutputNode> {
        let content = self.require(
            non_empty_str(object, "content"),
            format!("{}.content is required", kind),
            path,
        )?;
        let inline = match kind {
            EmbeddedTag::LarkMd => markdown::parse_inlines(content),
            _ => Vec::new(),
        };
        Ok(OutputNode::new(NodeKind::EmbeddedText, &[style::EMBEDDED, style::EMBEDDED_TEXT])
            .with_text(content)
            .with_attrs(NodeAttrs {
                inline,
                ..NodeAttrs::default()
            }))
    }

    fn compile_embedded_img(&mut self, object: &Map<String, Value>, path: &str) -> Step<OutputNode> {
        let img_key = non_empty_str(object, "img_key");
        let alt = object.get("alt").filter(|alt| is_truthy(Some(*alt)));
        self.ensure_all(
            [
                (img_key.is_some(), "img.img_key is required"),
                (alt.is_some(), "img.alt is required"),
            ],
            path,
        )?;
        let (Some(img_key), Some(alt)) = (img_key, alt) else {
            return Err(Flow::Skip);
        };

        let preview = object.get("preview").and_then(Value::as_bool).unwrap_or(true);
        Ok(OutputNode::new(NodeKind::EmbeddedImg, &[style::EMBEDDED, style::EMBEDDED_IMG])
            .with_locator(image::resolve(img_key))
            .with_attrs(NodeAttrs {
                size: Some(image::EMBEDDED_IMAGE_SIZE),
                preview: Some(preview),
                alt: Some(self.alt_text(alt)),
                ..NodeAttrs::default()
            }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use card::output::{InlineNode, NodeKind};

    use crate::options::{CompileOptions, ValidationLevel};
    use crate::{CompileError, Compiler};

    fn note(children: serde_json::Value) -> String {
        json!({ "elements": [{ "tag": "note", "elements": children }] }).to_string()
    }

    fn compiler(level: ValidationLevel) -> Compiler {
        Compiler::new(CompileOptions::default().with_validate(level))
    }

    #[test]
    fn note_children_keep_their_order() {
        let out = compiler(ValidationLevel::Error)
            .compile(&note(json!([
                {"tag": "img", "img_key": "icon", "alt": {"tag": "plain_text", "content": "i"}, "preview": false},
                {"tag": "plain_text", "content": "by bot"},
                {"tag": "lark_md", "content": "**now**"},
            ])))
            .expect("compile");
        let note = &out.tree.children()[0].children()[0];
        let kinds: Vec<_> = note.children().iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![NodeKind::EmbeddedImg, NodeKind::EmbeddedText, NodeKind::EmbeddedText]);

        let img = &note.children()[0];
        assert_eq!(img.attrs.size, Some(16));
        assert_eq!(img.attrs.preview, Some(false));
        assert_eq!(img.attrs.alt.as_deref(), Some("i"));

        assert!(note.children()[1].attrs.inline.is_empty());
        let md = &note.children()[2];
        assert_eq!(md.text(), Some("**now**"));
        assert_eq!(
            md.attrs.inline,
            vec![InlineNode::Strong(vec![InlineNode::Text("now".into())])]
        );
    }

    #[test]
    fn unknown_child_tag_is_fatal_even_when_validation_is_off() {
        let err = compiler(ValidationLevel::Off)
            .compile(&note(json!([{"tag": "button"}])))
            .unwrap_err();
        assert_eq!(
            err.error,
            CompileError::UnknownTag {
                field: "note.elements.tag",
                tag: "button".into(),
                allowed: "plain_text, lark_md, img".into(),
            }
        );
        assert_eq!(err.path.as_deref(), Some("elements[0].elements[0]"));
    }

    #[test]
    fn a_bad_child_drops_the_whole_note() {
        let out = compiler(ValidationLevel::Warning)
            .compile(&note(json!([
                {"tag": "plain_text", "content": "fine"},
                {"tag": "plain_text", "content": ""},
            ])))
            .expect("compile");
        assert!(out.tree.children()[0].children().is_empty());
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].to_string(), "plain_text.content is required");
    }

    #[test]
    fn empty_note_is_a_validation_failure() {
        let out = compiler(ValidationLevel::Warning)
            .compile(&note(json!([])))
            .expect("compile");
        assert!(out.tree.children()[0].children().is_empty());
        assert_eq!(out.warnings[0].to_string(), "note.elements is required");
    }
}
