use serde_json::{Map, Value};

use card::element::{ElementTag, as_number, describe_tag, is_truthy, non_empty_array, non_empty_str};
use card::output::{NodeAttrs, NodeKind, OutputNode};
use card::style;
use card::text::Text;

use crate::compiler::Session;
use crate::error::{CompileError, DiagnosticError};
use crate::image;
use crate::validator::{Flow, Step};

impl Session<'_> {
    /// Compile a sequence of elements in order. Elements that fail
    /// validation below `error` level, and deferred tags, yield no node.
    ///
    /// `depth` is 1 for the top-level array and grows by one for each
    /// column level.
    pub(crate) fn compile_elements(
        &mut self,
        elements: &[Value],
        path: &str,
        depth: usize,
    ) -> Result<Vec<OutputNode>, DiagnosticError> {
        if depth > self.options.max_depth {
            return Err(self
                .validator
                .fatal(CompileError::DepthExceeded(self.options.max_depth), path));
        }

        let mut nodes = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let element_path = format!("{}[{}]", path, index);
            match self.compile_element(element, &element_path, depth) {
                Ok(Some(node)) => nodes.push(node),
                Ok(None) | Err(Flow::Skip) => {}
                Err(Flow::Abort(error)) => return Err(error),
            }
        }
        Ok(nodes)
    }

    fn compile_element(&mut self, element: &Value, path: &str, depth: usize) -> Step<Option<OutputNode>> {
        self.ensure(!element.is_null(), "element is required", path)?;
        let object = self.require(element.as_object(), "element must be an object", path)?;
        let tag = object.get("tag");
        self.ensure(is_truthy(tag), "element.tag is required", path)?;

        // Unknown tags have no fallback, so they fail at every level.
        let Some(tag) = tag.and_then(Value::as_str).and_then(ElementTag::parse) else {
            return Err(Flow::Abort(self.validator.fatal(
                CompileError::UnknownTag {
                    field: "element.tag",
                    tag: describe_tag(tag),
                    allowed: ElementTag::allowed(),
                },
                path,
            )));
        };

        let node = match tag {
            ElementTag::Div => self.compile_div(object, path)?,
            ElementTag::Hr => OutputNode::element(NodeKind::Hr),
            ElementTag::Img => self.compile_img(object, path)?,
            ElementTag::Note => self.compile_note(object, path)?,
            ElementTag::ColumnSet => self.compile_column_set(object, path, depth)?,
            ElementTag::Actions | ElementTag::Markdown => {
                self.validator
                    .notice(CompileError::NotImplemented(tag.to_string()), path);
                return Ok(None);
            }
        };
        Ok(Some(node))
    }

    fn compile_div(&mut self, object: &Map<String, Value>, path: &str) -> Step<OutputNode> {
        let text = self.require(
            object.get("text").and_then(Value::as_object),
            "div.text is required",
            path,
        )?;
        self.ensure(
            text.get("tag").and_then(Value::as_str) == Some("plain_text"),
            "div.text.tag must be plain_text",
            path,
        )?;
        let content = self.require(
            non_empty_str(text, "content"),
            "div.text.content is required",
            path,
        )?;
        Ok(OutputNode::element(NodeKind::Div).with_text(content))
    }

    fn compile_img(&mut self, object: &Map<String, Value>, path: &str) -> Step<OutputNode> {
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

        let compact = is_truthy(object.get("compact_width"));
        let custom_width = match object.get("custom_width").filter(|w| is_truthy(Some(*w))) {
            Some(raw) => {
                let width = self.require(as_number(raw), "img.custom_width must be number", path)?;
                Some(image::clamp_custom_width(width))
            }
            None => None,
        };

        let mut node = OutputNode::element(NodeKind::Img)
            .with_locator(image::resolve(img_key))
            .with_attrs(NodeAttrs {
                compact,
                custom_width,
                alt: Some(self.alt_text(alt)),
                ..NodeAttrs::default()
            });
        if compact {
            node = node.with_class(style::COMPACT);
        }
        Ok(node)
    }

    fn compile_note(&mut self, object: &Map<String, Value>, path: &str) -> Step<OutputNode> {
        let elements = self.require(
            non_empty_array(object, "elements"),
            "note.elements is required",
            path,
        )?;
        let mut children = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let child_path = format!("{}.elements[{}]", path, index);
            children.push(self.compile_embedded(element, &child_path)?);
        }
        Ok(OutputNode::element(NodeKind::Note).with_children(children))
    }

    fn compile_column_set(&mut self, object: &Map<String, Value>, path: &str, depth: usize) -> Step<OutputNode> {
        let columns = self.require(
            non_empty_array(object, "columns"),
            "column_set.columns is required",
            path,
        )?;
        let mut children = Vec::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            let column_path = format!("{}.columns[{}]", path, index);
            children.push(self.compile_column(column, &column_path, depth)?);
        }
        Ok(OutputNode::element(NodeKind::ColumnSet).with_children(children))
    }

    /// A column's own `elements` go back through the element pipeline one
    /// level deeper. An empty column occupies no deeper level.
    fn compile_column(&mut self, column: &Value, path: &str, depth: usize) -> Step<OutputNode> {
        let column = self.require(column.as_object(), "column must be an object", path)?;
        let elements: &[Value] = match column.get("elements") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                self.ensure(false, "column.elements must be an array", path)?;
                &[]
            }
        };
        let children = if elements.is_empty() {
            Vec::new()
        } else {
            self.compile_elements(elements, &format!("{}.elements", path), depth + 1)?
        };
        Ok(OutputNode::new(NodeKind::Column, &[style::COLUMN]).with_children(children))
    }

    /// Display text for an `alt` field given either as a string or as a
    /// text object.
    pub(crate) fn alt_text(&self, alt: &Value) -> String {
        match alt {
            Value::String(s) => s.clone(),
            Value::Object(object) => Text::from_object(object).resolve(self.locale()),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::options::{CompileOptions, ValidationLevel};
    use crate::{Compilation, Compiler};

    fn compile(elements: serde_json::Value, level: ValidationLevel) -> Result<Compilation, crate::DiagnosticError> {
        let source = json!({ "elements": elements }).to_string();
        Compiler::new(CompileOptions::default().with_validate(level)).compile(&source)
    }

    fn body(compilation: &Compilation) -> &[card::output::OutputNode] {
        compilation.tree.children().last().map(|c| c.children()).unwrap_or(&[])
    }

    #[test]
    fn custom_width_accepts_numbers_and_numeric_strings() {
        let out = compile(
            json!([
                {"tag": "img", "img_key": "k", "alt": "a", "custom_width": 300},
                {"tag": "img", "img_key": "k", "alt": "a", "custom_width": " 450 "},
            ]),
            ValidationLevel::Error,
        )
        .expect("compile");
        let widths: Vec<_> = body(&out).iter().map(|n| n.attrs.custom_width).collect();
        assert_eq!(widths, vec![Some(300.0), Some(450.0)]);
    }

    #[test]
    fn zero_custom_width_is_ignored() {
        let out = compile(
            json!([{"tag": "img", "img_key": "k", "alt": "a", "custom_width": 0}]),
            ValidationLevel::Error,
        )
        .expect("compile");
        assert_eq!(body(&out)[0].attrs.custom_width, None);
    }

    #[test]
    fn alt_may_be_a_text_object() {
        let out = compile(
            json!([{"tag": "img", "img_key": "k", "alt": {"tag": "plain_text", "content": ""}}]),
            ValidationLevel::Error,
        )
        .expect("compile");
        assert_eq!(body(&out)[0].attrs.alt.as_deref(), Some(""));
    }

    #[test]
    fn div_requires_plain_text() {
        let out = compile(
            json!([{"tag": "div", "text": {"tag": "lark_md", "content": "x"}}]),
            ValidationLevel::Warning,
        )
        .expect("compile");
        assert!(body(&out).is_empty());
        assert_eq!(out.warnings[0].to_string(), "div.text.tag must be plain_text");
    }

    #[test]
    fn non_object_elements_are_validation_failures() {
        let out = compile(json!([null, 3, {"tag": "hr"}]), ValidationLevel::Warning).expect("compile");
        assert_eq!(body(&out).len(), 1);
        let messages: Vec<_> = out.warnings.iter().map(|w| w.to_string()).collect();
        assert_eq!(messages, vec!["element is required", "element must be an object"]);
    }

    #[test]
    fn missing_tag_is_a_validation_failure_not_an_unknown_tag() {
        let out = compile(json!([{"text": "no tag"}]), ValidationLevel::Warning).expect("compile");
        assert!(body(&out).is_empty());
        assert_eq!(out.warnings[0].to_string(), "element.tag is required");
    }

    #[test]
    fn falsy_tag_counts_as_missing() {
        let out = compile(
            json!([{"tag": ""}, {"tag": false}, {"tag": 0}, {"tag": "hr"}]),
            ValidationLevel::Warning,
        )
        .expect("compile");
        assert_eq!(body(&out).len(), 1);
        assert_eq!(body(&out)[0].kind, card::output::NodeKind::Hr);
        assert_eq!(out.warnings.len(), 3);
        for (index, warning) in out.warnings.iter().enumerate() {
            assert_eq!(warning.to_string(), "element.tag is required");
            assert_eq!(warning.path, Some(format!("elements[{}]", index)));
        }

        let err = compile(json!([{"tag": ""}]), ValidationLevel::Error).unwrap_err();
        assert_eq!(
            err.error,
            crate::CompileError::SchemaViolation("element.tag is required".to_string())
        );
    }

    #[test]
    fn non_string_tag_is_unknown() {
        let err = compile(json!([{"tag": 7}]), ValidationLevel::Off).unwrap_err();
        assert!(matches!(err.error, crate::CompileError::UnknownTag { .. }));
        assert_eq!(err.path.as_deref(), Some("elements[0]"));
    }

    #[test]
    fn columns_must_be_objects() {
        let out = compile(
            json!([{"tag": "column_set", "columns": ["nope"]}, {"tag": "hr"}]),
            ValidationLevel::Warning,
        )
        .expect("compile");
        assert_eq!(body(&out).len(), 1);
        assert_eq!(out.warnings[0].path.as_deref(), Some("elements[0].columns[0]"));
    }
}
