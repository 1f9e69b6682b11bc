use std::fmt::{Display, Formatter};

use crate::ast::Type;
use crate::error::ConvertError;

/// Generated C++ translation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledProgram {
    source: String,
    function_name: String,
    return_type: Option<Type>,
}

impl CompiledProgram {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// `None` for a function rendered as `void`.
    pub fn return_type(&self) -> Option<Type> {
        self.return_type
    }
}

impl Display for CompiledProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

pub struct ProgramBuilder {
    headers: Vec<String>,
    function: Option<(String, Option<Type>, String)>,
    entry_point: Option<String>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self {
            headers: vec![],
            function: None,
            entry_point: None,
        }
    }

    pub fn add_header(&mut self, line: &str) -> &mut Self {
        self.headers.push(line.to_string());
        self
    }

    pub fn add_function(&mut self, name: &str, return_type: Option<Type>, code: String) -> &mut Self {
        self.function = Some((name.to_string(), return_type, code));
        self
    }

    pub fn add_entry_point(&mut self, code: String) -> &mut Self {
        self.entry_point = Some(code);
        self
    }

    pub fn build(self) -> Result<CompiledProgram, ConvertError> {
        let (function_name, return_type, function) = self
            .function
            .ok_or_else(|| ConvertError::internal("program has no function"))?;
        let entry_point = self
            .entry_point
            .ok_or_else(|| ConvertError::internal("program has no entry point"))?;

        let mut source = String::new();
        for header in &self.headers {
            source.push_str(header);
            source.push('\n');
        }
        if !self.headers.is_empty() {
            source.push('\n');
        }
        source.push_str(&function);
        source.push('\n');
        source.push_str(&entry_point);

        Ok(CompiledProgram {
            source,
            function_name,
            return_type,
        })
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
