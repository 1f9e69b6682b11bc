use ansi_term::Color;
use thiserror::Error;

use crate::util::INTERNAL_ERROR;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("LexError at line {row}: {error_type}")]
pub struct LexError {
    pub error_type: LexErrorType,
    pub row: usize,
    pub col: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexErrorType {
    #[error("Unexpected character: '{0}'")]
    UnexpectedCharacter(char),
    #[error("Unknown keyword: '\\{0}'")]
    UnknownKeyword(String),
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Malformed character literal")]
    MalformedChar,
    #[error("Unterminated block comment")]
    UnterminatedComment,
    #[error("Integer literal out of range: {0}")]
    IntegerOutOfRange(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("SyntaxError at line {row}: {error_type}")]
pub struct SyntaxError {
    pub error_type: SyntaxErrorType,
    pub row: usize,
    pub col: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxErrorType {
    #[error("Expected {0}, found '{1}'")]
    UnexpectedToken(String, String),
    #[error("Missing ';' after '{0}'")]
    MissingSemicolon(String),
    #[error("Not a primary expression: '{0}'")]
    NoPrimaryExpression(String),
    #[error("Expected a relational operator, found '{0}'")]
    MissingRelationalOperator(String),
    #[error("Function parameters are not supported, found '{0}'")]
    ParametersNotSupported(String),
    #[error("Block opened here is never closed")]
    UnclosedBlock,
    #[error("Only one function is allowed per program, found '{0}' after it")]
    TrailingInput(String),
    #[error("Function name '{0}' is reserved")]
    ReservedName(String),
    #[error("Unexpected end of file")]
    UnexpectedEOF,
}

/// Everything a conversion attempt can end with besides generated code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Not a failure: the caller has to supply a type for `variable` and retry.
    #[error("MissingType: no type known for variable '{variable}'")]
    MissingType { variable: String },
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl LexError {
    fn new(error_type: LexErrorType, pos: (usize, usize)) -> Self {
        Self {
            error_type,
            row: pos.0,
            col: pos.1,
        }
    }

    pub fn unexpected_character(c: char, pos: (usize, usize)) -> Self {
        Self::new(LexErrorType::UnexpectedCharacter(c), pos)
    }

    pub fn unknown_keyword(word: &str, pos: (usize, usize)) -> Self {
        Self::new(LexErrorType::UnknownKeyword(word.to_string()), pos)
    }

    pub fn unterminated_string(pos: (usize, usize)) -> Self {
        Self::new(LexErrorType::UnterminatedString, pos)
    }

    pub fn malformed_char(pos: (usize, usize)) -> Self {
        Self::new(LexErrorType::MalformedChar, pos)
    }

    pub fn unterminated_comment(pos: (usize, usize)) -> Self {
        Self::new(LexErrorType::UnterminatedComment, pos)
    }

    pub fn integer_out_of_range(literal: &str, pos: (usize, usize)) -> Self {
        Self::new(LexErrorType::IntegerOutOfRange(literal.to_string()), pos)
    }
}

impl SyntaxError {
    pub fn new(error_type: SyntaxErrorType) -> Self {
        Self {
            error_type,
            row: 0,
            col: 0,
        }
    }

    pub fn unexpected_token(expected: &str, found: String) -> Self {
        Self::new(SyntaxErrorType::UnexpectedToken(expected.to_string(), found))
    }

    pub fn missing_semicolon(after: String) -> Self {
        Self::new(SyntaxErrorType::MissingSemicolon(after))
    }

    pub fn no_primary_expression(found: String) -> Self {
        Self::new(SyntaxErrorType::NoPrimaryExpression(found))
    }

    pub fn missing_relational_operator(found: String) -> Self {
        Self::new(SyntaxErrorType::MissingRelationalOperator(found))
    }

    pub fn parameters_not_supported(found: String) -> Self {
        Self::new(SyntaxErrorType::ParametersNotSupported(found))
    }

    pub fn unclosed_block() -> Self {
        Self::new(SyntaxErrorType::UnclosedBlock)
    }

    pub fn trailing_input(found: String) -> Self {
        Self::new(SyntaxErrorType::TrailingInput(found))
    }

    pub fn reserved_name(name: &str) -> Self {
        Self::new(SyntaxErrorType::ReservedName(name.to_string()))
    }

    pub fn unexpected_eof() -> Self {
        Self::new(SyntaxErrorType::UnexpectedEOF)
    }

    pub fn with_pos(mut self, pos: (usize, usize)) -> Self {
        self.row = pos.0;
        self.col = pos.1;
        self
    }
}

impl ConvertError {
    pub fn missing_type(variable: &str) -> Self {
        ConvertError::MissingType {
            variable: variable.to_string(),
        }
    }

    pub fn internal(msg: impl std::fmt::Display) -> Self {
        ConvertError::InternalInvariantViolation(format!("{}: {}", INTERNAL_ERROR, msg))
    }

    /// The variable a retry needs a type for, if this is a `MissingType` signal.
    pub fn missing_variable(&self) -> Option<&str> {
        match self {
            ConvertError::MissingType { variable } => Some(variable),
            _ => None,
        }
    }

    /// Source line the error points at. Only lex and syntax errors have one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConvertError::Lex(err) => Some(err.row),
            ConvertError::Syntax(err) => Some(err.row),
            _ => None,
        }
    }

    /// The bare message, without the error kind and line prefix.
    pub fn message(&self) -> String {
        match self {
            ConvertError::Lex(err) => err.error_type.to_string(),
            ConvertError::Syntax(err) => err.error_type.to_string(),
            other => other.to_string(),
        }
    }

    /// Terminal rendering: the message in red, followed by the offending
    /// source line with a caret under the reported column.
    pub fn render(&self, source: &str) -> String {
        let (row, col) = match self {
            ConvertError::Lex(err) => (err.row, err.col),
            ConvertError::Syntax(err) => (err.row, err.col),
            _ => return Color::Red.paint(self.to_string()).to_string(),
        };

        let mut display = Color::Red.paint(self.to_string()).to_string();
        if let Some(line) = source.lines().nth(row.saturating_sub(1)) {
            display.push_str(&format!("\n{:>4} | {}", row, line));
            display.push_str(&format!(
                "\n     | {}{}",
                " ".repeat(col.saturating_sub(1)),
                Color::Red.bold().paint("^")
            ));
        }
        display
    }
}
