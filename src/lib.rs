//! Translates single-function pseudo-code into a compilable C++ program.
//!
//! The pipeline runs lexer → parser → type checker → compiler once per call.
//! When a variable's type cannot be inferred the call ends with
//! [`ConvertError::MissingType`]; the caller obtains a type however it likes
//! and calls [`convert`] again with the enlarged hint map.
//!
//! ```
//! use pseudocpp::{convert, Type, TypeHints};
//!
//! let source = "\\Fn F() { b gets a + 1; \\KwRet b; }";
//! let err = convert(source, &TypeHints::new()).unwrap_err();
//! assert_eq!(err.missing_variable(), Some("a"));
//!
//! let hints = TypeHints::from([("a".to_string(), Type::Int)]);
//! let code = convert(source, &hints).unwrap();
//! assert!(code.contains("int b = a + 1;"));
//! ```

pub mod ast;
pub mod compiler;
pub mod console;
pub mod error;
pub mod lexer;
pub mod measurement;
pub mod parser;
pub mod program;
pub mod token;
pub mod typecheck;
mod util;

pub use ast::Type;
pub use console::Console;
pub use error::ConvertError;
pub use measurement::Timer;
pub use program::CompiledProgram;
pub use typecheck::TypeHints;

/// Runs the full pipeline. Holds no state between calls, so a single
/// converter can serve any number of concurrent requests.
#[derive(Debug, Default, Copy, Clone)]
pub struct Converter {
    console: Console,
}

impl Converter {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    pub fn convert(&self, source: &str, hints: &TypeHints) -> Result<CompiledProgram, ConvertError> {
        self.convert_timed(source, hints, &mut Timer::new())
    }

    /// Like [`Converter::convert`], recording each stage in `timer`.
    pub fn convert_timed(
        &self,
        source: &str,
        hints: &TypeHints,
        timer: &mut Timer,
    ) -> Result<CompiledProgram, ConvertError> {
        let console = self.console;
        let tokens = timer.measure("Lexer", || lexer::tokenize(source, console))?;
        let program = timer.measure("Parser", || parser::parse(tokens, console))?;
        let typed = timer.measure("Type Checker", || typecheck::check(program, hints, console))?;
        timer.measure("Compiler", || compiler::compile(&typed, console))
    }
}

/// Converts `source` into C++ source text using `hints` for variables whose
/// type cannot be inferred.
pub fn convert(source: &str, hints: &TypeHints) -> Result<String, ConvertError> {
    Converter::default()
        .convert(source, hints)
        .map(CompiledProgram::into_source)
}
