use serde_json::Value;

use card::CardDocument;
use card::output::{NodeKind, OutputNode};
use card::parser::Parser;
use card::style;

use crate::error::DiagnosticError;
use crate::options::CompileOptions;
use crate::validator::{FieldValidator, Flow, Step};

/// A compiled card and the warnings collected while compiling it.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub tree: OutputNode,
    pub warnings: Vec<DiagnosticError>,
}

/// Compiles card documents with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Compiler { options }
    }

    pub fn compile(&self, source: &str) -> Result<Compilation, DiagnosticError> {
        self.compile_source(source, 0)
    }

    /// Compile raw card text registered under `source_id` in the host's
    /// file database.
    pub fn compile_source(&self, source: &str, source_id: usize) -> Result<Compilation, DiagnosticError> {
        let document = Parser::new(source, source_id).parse()?;
        self.compile_document(&document)
    }

    /// Entry point for hosts whose document text changed. Each call starts
    /// from scratch; nothing from earlier compilations is reused.
    pub fn recompile(&self, source: &str) -> Result<Compilation, DiagnosticError> {
        self.compile(source)
    }

    pub fn compile_document(&self, document: &CardDocument) -> Result<Compilation, DiagnosticError> {
        let mut session = Session::new(&self.options, document.source_id);

        let header = session.compile_header(document.header.as_ref())?;
        let elements = session.compile_body(document.elements.as_ref())?;

        let mut children = Vec::with_capacity(2);
        children.extend(header);
        children.push(
            OutputNode::new(NodeKind::ElementsContainer, &[style::ELEMENTS]).with_children(elements),
        );
        let tree = OutputNode::new(NodeKind::Root, &[style::CARD]).with_children(children);

        Ok(Compilation {
            tree,
            warnings: session.validator.into_diagnostics(),
        })
    }
}

/// Compile `source` with one-off options.
pub fn compile(source: &str, options: &CompileOptions) -> Result<Compilation, DiagnosticError> {
    Compiler::new(options.clone()).compile(source)
}

/// State for one compilation.
pub(crate) struct Session<'o> {
    pub(crate) options: &'o CompileOptions,
    pub(crate) validator: FieldValidator,
}

impl<'o> Session<'o> {
    fn new(options: &'o CompileOptions, source_id: usize) -> Self {
        Session {
            options,
            validator: FieldValidator::new(options.validate, source_id),
        }
    }

    pub(crate) fn locale(&self) -> Option<&str> {
        self.options.locale.as_deref()
    }

    /// Assert `condition`; a failure skips the current subtree.
    pub(crate) fn ensure(&mut self, condition: bool, message: impl Into<String>, path: &str) -> Step<()> {
        if self.validator.assert(condition, message, path)? {
            Ok(())
        } else {
            Err(Flow::Skip)
        }
    }

    pub(crate) fn ensure_all<M: Into<String>>(
        &mut self,
        checks: impl IntoIterator<Item = (bool, M)>,
        path: &str,
    ) -> Step<()> {
        if self.validator.assert_all(checks, path)? {
            Ok(())
        } else {
            Err(Flow::Skip)
        }
    }

    /// Unwrap a required value; `None` is a failed assertion.
    pub(crate) fn require<T>(&mut self, value: Option<T>, message: impl Into<String>, path: &str) -> Step<T> {
        match value {
            Some(value) => Ok(value),
            None => {
                self.validator.assert(false, message, path)?;
                Err(Flow::Skip)
            }
        }
    }

    /// The top-level `elements` array; anything else compiles to no nodes.
    fn compile_body(&mut self, elements: Option<&Value>) -> Result<Vec<OutputNode>, DiagnosticError> {
        let items: &[Value] = match elements {
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                self.validator.assert(false, "elements must be an array", "elements")?;
                &[]
            }
            None => {
                self.validator.assert(false, "elements is required", "elements")?;
                &[]
            }
        };
        self.compile_elements(items, "elements", 1)
    }
}
