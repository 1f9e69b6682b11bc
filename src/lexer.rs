use crate::console::Console;
use crate::error::LexError;
use crate::token::{Token, TokenType};

#[derive(Clone)]
pub struct Lexer {
    input: Vec<char>,
    idx: usize,
    idx_token_start: usize,
    row: usize,
    col: usize,

    console: Console,
}

impl Lexer {
    pub fn new(source: &str, console: Console) -> Self {
        let input = source.chars().collect();
        Self {
            input,
            idx: 0,
            idx_token_start: 0,
            row: 1,
            col: 1,
            console,
        }
    }

    /// Lexes the whole input. The returned sequence always ends with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![];
        loop {
            let token = self.next_token()?;
            let done = token.token_type == TokenType::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        self.console
            .println(format!("[Lexer] Produced {} tokens", tokens.len()));
        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let pos = self.get_token_pos();
        self.idx_token_start = self.idx;
        if !self.has_more_tokens() {
            return Ok(Token::new(pos, TokenType::Eof, ""));
        }

        let token_type = self.identify_token(pos)?;
        let token = Token::new(pos, token_type, self.lexeme());

        self.console.println_verbose(format!(
            "[Lexer] Parsed token: {} at:({}:{})",
            token.token_type, token.pos.0, token.pos.1
        ));
        Ok(token)
    }

    /*========== Private Functions ==========*/
    fn get_token_pos(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn lexeme(&self) -> String {
        self.input[self.idx_token_start..self.idx].iter().collect()
    }

    fn identify_token(&mut self, pos: (usize, usize)) -> Result<TokenType, LexError> {
        let start = self.get_current_char();

        if start.is_ascii_alphabetic() || start == '_' {
            let word = self.parse_identifier();
            return Ok(match word.as_str() {
                "fn" => TokenType::Fn,
                "if" => TokenType::If,
                "while" => TokenType::While,
                "for" => TokenType::For,
                "return" => TokenType::Return,
                "gets" => TokenType::Gets,
                "true" => TokenType::Bool(true),
                "false" => TokenType::Bool(false),
                _ => TokenType::Identifier(word),
            });
        }
        if start.is_ascii_digit() {
            return self.parse_number(pos);
        }

        let two = |lexer: &mut Self, next: char, long: TokenType, short: TokenType| {
            lexer.advance_index();
            if lexer.peek(0) == Some(next) {
                lexer.advance_index();
                long
            } else {
                short
            }
        };

        let token_type = match start {
            '\\' => return self.parse_keyword(pos),
            '"' => return self.parse_string(pos),
            '\'' => return self.parse_char(pos),
            '<' => two(self, '=', TokenType::LessEqual, TokenType::Less),
            '>' => two(self, '=', TokenType::GreaterEqual, TokenType::Greater),
            '=' => two(self, '=', TokenType::EqualEqual, TokenType::Gets),
            '!' => two(self, '=', TokenType::NotEqual, TokenType::Not),
            '&' | '|' => {
                if self.peek(1) != Some(start) {
                    return Err(LexError::unexpected_character(start, pos));
                }
                self.advance_index();
                self.advance_index();
                if start == '&' {
                    TokenType::And
                } else {
                    TokenType::Or
                }
            }
            _ => {
                let token_type = match start {
                    '+' => TokenType::Plus,
                    '-' => TokenType::Minus,
                    '*' => TokenType::Star,
                    '/' => TokenType::Slash,
                    '%' => TokenType::Percent,
                    '(' => TokenType::LeftParen,
                    ')' => TokenType::RightParen,
                    '{' => TokenType::LeftCurly,
                    '}' => TokenType::RightCurly,
                    ';' => TokenType::Semicolon,
                    ',' => TokenType::Comma,
                    other => return Err(LexError::unexpected_character(other, pos)),
                };
                self.advance_index();
                token_type
            }
        };
        Ok(token_type)
    }

    fn parse_keyword(&mut self, pos: (usize, usize)) -> Result<TokenType, LexError> {
        self.advance_index(); // eat '\'
        let word = self.parse_identifier();
        match word.as_str() {
            "Fn" => Ok(TokenType::Fn),
            "If" => Ok(TokenType::If),
            "While" => Ok(TokenType::While),
            "For" => Ok(TokenType::For),
            "KwRet" | "Return" => Ok(TokenType::Return),
            "" => Err(LexError::unexpected_character('\\', pos)),
            _ => Err(LexError::unknown_keyword(&word, pos)),
        }
    }

    fn parse_number(&mut self, pos: (usize, usize)) -> Result<TokenType, LexError> {
        let mut number = self.take_digits();
        let is_float = self.peek(0) == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance_index(); // eat '.'
            number.push('.');
            number.push_str(&self.take_digits());
            // digits '.' digits always parses
            let value = number.parse::<f64>().unwrap_or_default();
            return Ok(TokenType::Float(value));
        }
        number
            .parse()
            .map(TokenType::Integer)
            .map_err(|_| LexError::integer_out_of_range(&number, pos))
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.peek(0).filter(|c| c.is_ascii_digit()) {
            digits.push(c);
            self.advance_index();
        }
        digits
    }

    fn parse_identifier(&mut self) -> String {
        let mut identifier = String::new();
        while let Some(c) = self.peek(0).filter(|c| c.is_ascii_alphanumeric() || *c == '_') {
            identifier.push(c);
            self.advance_index();
        }
        identifier
    }

    fn parse_string(&mut self, pos: (usize, usize)) -> Result<TokenType, LexError> {
        self.advance_index(); // eat '"'
        let mut content = String::new();
        loop {
            match self.peek(0) {
                Some('"') => {
                    self.advance_index();
                    return Ok(TokenType::Str(content));
                }
                Some('\\') if self.peek(1).is_some_and(|c| c != '\n') => {
                    content.push('\\');
                    self.advance_index();
                    content.push(self.get_current_char());
                    self.advance_index();
                }
                Some('\n') | None => return Err(LexError::unterminated_string(pos)),
                Some(c) => {
                    content.push(c);
                    self.advance_index();
                }
            }
        }
    }

    fn parse_char(&mut self, pos: (usize, usize)) -> Result<TokenType, LexError> {
        self.advance_index(); // eat '\''
        let mut content = String::new();
        match self.peek(0) {
            Some('\\') => {
                content.push('\\');
                self.advance_index();
                match self.peek(0) {
                    Some(c) if c != '\n' => {
                        content.push(c);
                        self.advance_index();
                    }
                    _ => return Err(LexError::malformed_char(pos)),
                }
            }
            Some(c) if c != '\'' && c != '\n' => {
                content.push(c);
                self.advance_index();
            }
            _ => return Err(LexError::malformed_char(pos)),
        }
        if self.peek(0) != Some('\'') {
            return Err(LexError::malformed_char(pos));
        }
        self.advance_index();
        Ok(TokenType::Char(content))
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.peek(0) {
            if c.is_whitespace() {
                self.skip_whitespace();
            } else if c == '/' && self.peek(1) == Some('/') {
                self.skip_comment();
            } else if c == '/' && self.peek(1) == Some('*') {
                self.skip_block_comment()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek(0).filter(|c| c.is_whitespace()) {
            self.advance_index();
            if c == '\n' {
                self.next_line();
            }
        }
    }

    fn skip_comment(&mut self) {
        let pos = self.get_token_pos();
        let mut comment = String::new();
        while let Some(c) = self.peek(0).filter(|c| *c != '\n') {
            comment.push(c);
            self.advance_index();
        }
        self.console.println_verbose(format!(
            "[Lexer] Skipped comment: {} at:({}:{})",
            comment, pos.0, pos.1
        ));
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let pos = self.get_token_pos();
        self.advance_index();
        self.advance_index();
        loop {
            match self.peek(0) {
                None => return Err(LexError::unterminated_comment(pos)),
                Some('*') if self.peek(1) == Some('/') => {
                    self.advance_index();
                    self.advance_index();
                    return Ok(());
                }
                Some(c) => {
                    self.advance_index();
                    if c == '\n' {
                        self.next_line();
                    }
                }
            }
        }
    }

    fn has_more_tokens(&self) -> bool {
        self.idx < self.input.len()
    }

    fn advance_index(&mut self) {
        self.idx += 1;
        self.col += 1;
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.input.get(self.idx + n).copied()
    }

    fn get_current_char(&self) -> char {
        self.input[self.idx]
    }

    fn next_line(&mut self) {
        self.row += 1;
        self.col = 1;
    }
}

pub fn tokenize(source: &str, console: Console) -> Result<Vec<Token>, LexError> {
    Lexer::new(source, console).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorType;

    fn types(source: &str) -> Vec<TokenType> {
        tokenize(source, Console::quiet())
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn keywords_in_both_spellings() {
        assert_eq!(
            types("\\Fn fn \\If if \\While while \\For for \\KwRet \\Return return gets ="),
            vec![
                TokenType::Fn,
                TokenType::Fn,
                TokenType::If,
                TokenType::If,
                TokenType::While,
                TokenType::While,
                TokenType::For,
                TokenType::For,
                TokenType::Return,
                TokenType::Return,
                TokenType::Return,
                TokenType::Gets,
                TokenType::Gets,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn literals() {
        assert_eq!(
            types(r#"42 2.5 "hi \"there\"" 'c' '\n' true false"#),
            vec![
                TokenType::Integer(42),
                TokenType::Float(2.5),
                TokenType::Str("hi \\\"there\\\"".to_string()),
                TokenType::Char("c".to_string()),
                TokenType::Char("\\n".to_string()),
                TokenType::Bool(true),
                TokenType::Bool(false),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            types("< <= > >= == != && || ! + - * / %"),
            vec![
                TokenType::Less,
                TokenType::LessEqual,
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::EqualEqual,
                TokenType::NotEqual,
                TokenType::And,
                TokenType::Or,
                TokenType::Not,
                TokenType::Plus,
                TokenType::Minus,
                TokenType::Star,
                TokenType::Slash,
                TokenType::Percent,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_stripped_but_lines_counted() {
        let source = "// header\nx /* spans\ntwo lines */ gets\n  1;";
        let tokens = tokenize(source, Console::quiet()).unwrap();
        let lines: Vec<_> = tokens.iter().map(|t| (t.lexeme.as_str(), t.line())).collect();
        assert_eq!(lines, vec![("x", 2), ("gets", 3), ("1", 4), (";", 4), ("", 4)]);
        assert_eq!(tokens[2].pos, (4, 3));
    }

    #[test]
    fn identifiers_keep_underscores_and_digits() {
        assert_eq!(
            types("_tmp1 gets1"),
            vec![
                TokenType::Identifier("_tmp1".to_string()),
                TokenType::Identifier("gets1".to_string()),
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn unexpected_character_reports_position() {
        let err = tokenize("x gets 1;\ny gets $;", Console::quiet()).unwrap_err();
        assert_eq!(err.error_type, LexErrorType::UnexpectedCharacter('$'));
        assert_eq!((err.row, err.col), (2, 8));
    }

    #[test]
    fn unknown_backslash_keyword() {
        let err = tokenize("\\Loop", Console::quiet()).unwrap_err();
        assert_eq!(err.error_type, LexErrorType::UnknownKeyword("Loop".to_string()));
    }

    #[test]
    fn unterminated_constructs() {
        let err = tokenize("s gets \"open\n\";", Console::quiet()).unwrap_err();
        assert_eq!(err.error_type, LexErrorType::UnterminatedString);

        let err = tokenize("/* never closed", Console::quiet()).unwrap_err();
        assert_eq!(err.error_type, LexErrorType::UnterminatedComment);

        let err = tokenize("c gets 'ab';", Console::quiet()).unwrap_err();
        assert_eq!(err.error_type, LexErrorType::MalformedChar);
    }

    #[test]
    fn single_ampersand_is_rejected() {
        let err = tokenize("a & b", Console::quiet()).unwrap_err();
        assert_eq!(err.error_type, LexErrorType::UnexpectedCharacter('&'));
    }

    #[test]
    fn huge_integer_is_rejected() {
        let err = tokenize("99999999999999999999", Console::quiet()).unwrap_err();
        assert!(matches!(err.error_type, LexErrorType::IntegerOutOfRange(_)));
    }
}
