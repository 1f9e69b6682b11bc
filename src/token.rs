use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub pos: (usize, usize),
    pub token_type: TokenType,
    pub lexeme: String,
}

impl Token {
    pub fn new(pos: (usize, usize), token_type: TokenType, lexeme: impl Into<String>) -> Self {
        Self {
            pos,
            token_type,
            lexeme: lexeme.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.pos.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    Eof,

    // Keywords
    Fn,
    If,
    While,
    For,
    Return,
    Gets,

    Identifier(String),

    // Literals
    Integer(i64),
    Float(f64),
    Str(String),
    Char(String),
    Bool(bool),

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Relational
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    EqualEqual,
    NotEqual,

    // Logical
    And,
    Or,
    Not,

    // Punctuation
    LeftParen,
    RightParen,
    LeftCurly,
    RightCurly,
    Semicolon,
    Comma,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Eof => f.write_str("<EOF>"),
            TokenType::Fn => f.write_str("\\Fn"),
            TokenType::If => f.write_str("\\If"),
            TokenType::While => f.write_str("\\While"),
            TokenType::For => f.write_str("\\For"),
            TokenType::Return => f.write_str("\\KwRet"),
            TokenType::Gets => f.write_str("gets"),
            TokenType::Identifier(name) => write!(f, "Identifier({})", name),
            TokenType::Integer(n) => write!(f, "Integer({})", n),
            TokenType::Float(n) => write!(f, "Float({:?})", n),
            TokenType::Str(s) => write!(f, "String(\"{}\")", s),
            TokenType::Char(c) => write!(f, "Char('{}')", c),
            TokenType::Bool(b) => write!(f, "Bool({})", b),
            TokenType::Plus => f.write_str("+"),
            TokenType::Minus => f.write_str("-"),
            TokenType::Star => f.write_str("*"),
            TokenType::Slash => f.write_str("/"),
            TokenType::Percent => f.write_str("%"),
            TokenType::Less => f.write_str("<"),
            TokenType::Greater => f.write_str(">"),
            TokenType::LessEqual => f.write_str("<="),
            TokenType::GreaterEqual => f.write_str(">="),
            TokenType::EqualEqual => f.write_str("=="),
            TokenType::NotEqual => f.write_str("!="),
            TokenType::And => f.write_str("&&"),
            TokenType::Or => f.write_str("||"),
            TokenType::Not => f.write_str("!"),
            TokenType::LeftParen => f.write_str("("),
            TokenType::RightParen => f.write_str(")"),
            TokenType::LeftCurly => f.write_str("{"),
            TokenType::RightCurly => f.write_str("}"),
            TokenType::Semicolon => f.write_str(";"),
            TokenType::Comma => f.write_str(","),
        }
    }
}

impl TokenType {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            TokenType::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenType::Less
                | TokenType::Greater
                | TokenType::LessEqual
                | TokenType::GreaterEqual
                | TokenType::EqualEqual
                | TokenType::NotEqual
        )
    }

    fn get_precedence(&self) -> i32 {
        match self {
            TokenType::Plus | TokenType::Minus => 20,
            TokenType::Star | TokenType::Slash | TokenType::Percent => 40,
            _ => -1,
        }
    }
}

pub fn get_token_precedence(token: &Token) -> i32 {
    token.token_type.get_precedence()
}
