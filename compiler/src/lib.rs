pub mod compiler;
pub mod elements;
pub mod embedded;
pub mod error;
pub mod header;
pub mod image;
pub mod options;
pub mod validator;

pub use compiler::{Compilation, Compiler, compile};
pub use error::{CompileError, DiagnosticError};
pub use options::{CompileOptions, ValidationLevel};
pub use validator::FieldValidator;
