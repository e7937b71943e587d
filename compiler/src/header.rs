use serde_json::Value;

use card::element::json_kind;
use card::header::HeaderTemplate;
use card::output::{NodeAttrs, NodeKind, OutputNode};
use card::style;
use card::text::Text;

use crate::compiler::Session;
use crate::error::DiagnosticError;
use crate::validator::{Flow, Step};

const PATH: &str = "header";

impl Session<'_> {
    /// Build the header node. An absent header is not an error; a header
    /// that fails validation below `error` level is dropped.
    pub(crate) fn compile_header(&mut self, header: Option<&Value>) -> Result<Option<OutputNode>, DiagnosticError> {
        let Some(header) = header else {
            return Ok(None);
        };
        match self.build_header(header) {
            Ok(node) => Ok(Some(node)),
            Err(Flow::Skip) => Ok(None),
            Err(Flow::Abort(error)) => Err(error),
        }
    }

    fn build_header(&mut self, header: &Value) -> Step<OutputNode> {
        let header = self.require(header.as_object(), "header must be an object", PATH)?;
        let title = self.require(
            header.get("title").and_then(Value::as_object),
            "header.title is required",
            PATH,
        )?;

        let template = match header.get("template") {
            None | Some(Value::Null) => Some(HeaderTemplate::default()),
            Some(value) => value.as_str().and_then(HeaderTemplate::parse),
        };
        let template = self.require(
            template,
            format!(
                "header.template should be one of {}, but got {}",
                HeaderTemplate::allowed(),
                describe(header.get("template"))
            ),
            PATH,
        )?;

        let tag = title.get("tag").and_then(Value::as_str);
        let text = Text::from_object(title);
        self.ensure_all(
            [
                (tag.is_some(), "header.title.tag is required"),
                (tag == Some("plain_text"), "header.title.tag must be plain_text"),
                (text.is_populated(), "header.title.content or header.title.i18n is required"),
            ],
            PATH,
        )?;

        Ok(OutputNode::new(NodeKind::Header, &[style::HEADER, template.as_str()])
            .with_text(text.resolve(self.locale()))
            .with_attrs(NodeAttrs {
                template: Some(template),
                ..NodeAttrs::default()
            }))
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => json_kind(other).to_string(),
        None => "nothing".to_string(),
    }
}
