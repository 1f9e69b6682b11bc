use std::collections::HashSet;

use crate::ast::{Assignment, BinOp, Condition, Expr, Function, LogicOp, Program, RelOp, Stmt};
use crate::console::Console;
use crate::error::SyntaxError;
use crate::token::{self, Token, TokenType};

/// Name given to the function when the source is a bare statement list.
pub const IMPLICIT_FUNCTION_NAME: &str = "program";

/// Taken by the generated entry point.
const RESERVED_FUNCTION_NAME: &str = "main";

type Result<T> = std::result::Result<T, SyntaxError>;

macro_rules! parse {
    ($self: ident, $tk: pat, $desc: literal) => {{
        match $self.curr_token_type() {
            $tk => {
                $self.advance_token();
                Ok(())
            }
            _ => Err($self.unexpected($desc)),
        }
    }};
}

pub struct Parser {
    tokens: Vec<Token>,
    idx: usize,
    /// Every identifier read or written so far in the current function.
    mentioned: HashSet<String>,
    free_variables: Vec<String>,
    /// Names declared in each open C++ scope, innermost last.
    scopes: Vec<Vec<String>>,
    /// Declared in a scope that has since closed.
    expired: HashSet<String>,
    /// Used again after their scope closed, so declared at function level.
    hoisted: HashSet<String>,

    console: Console,
}

/// Parser state to rewind to when a parenthesised condition turns out to be
/// an arithmetic group, e.g. `(a + 1) < b`.
struct Checkpoint {
    idx: usize,
    mentioned: HashSet<String>,
    free_variables: usize,
    expired: HashSet<String>,
    hoisted: HashSet<String>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>, console: Console) -> Self {
        if tokens.last().map(|t| &t.token_type) != Some(&TokenType::Eof) {
            let pos = tokens.last().map(|t| t.pos).unwrap_or((1, 1));
            tokens.push(Token::new(pos, TokenType::Eof, ""));
        }
        Self {
            tokens,
            idx: 0,
            mentioned: HashSet::new(),
            free_variables: vec![],
            scopes: vec![vec![]],
            expired: HashSet::new(),
            hoisted: HashSet::new(),
            console,
        }
    }

    pub fn parse(mut self) -> Result<Program> {
        let function = match self.curr_token_type() {
            TokenType::Fn => self.parse_function()?,
            _ => self.parse_implicit_function()?,
        };

        if self.curr_token_type() != &TokenType::Eof {
            return Err(SyntaxError::trailing_input(self.current_token().lexeme.clone())
                .with_pos(self.current_token().pos));
        }

        self.console.println(format!(
            "[Parser] Parsed function '{}' with {} top-level statements",
            function.name,
            function.body.len()
        ));
        Ok(Program { function })
    }

    /*========== Private Functions ==========*/
    fn advance_token(&mut self) {
        if self.idx + 1 < self.tokens.len() {
            self.idx += 1;
        }
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.idx]
    }

    fn previous_token(&self) -> &Token {
        &self.tokens[self.idx.saturating_sub(1)]
    }

    fn curr_token_type(&self) -> &TokenType {
        &self.current_token().token_type
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.current_token();
        let err = match token.token_type {
            TokenType::Eof => SyntaxError::unexpected_eof(),
            _ => SyntaxError::unexpected_token(expected, token.lexeme.clone()),
        };
        err.with_pos(token.pos)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            idx: self.idx,
            mentioned: self.mentioned.clone(),
            free_variables: self.free_variables.len(),
            expired: self.expired.clone(),
            hoisted: self.hoisted.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.idx = checkpoint.idx;
        self.mentioned = checkpoint.mentioned;
        self.free_variables.truncate(checkpoint.free_variables);
        self.expired = checkpoint.expired;
        self.hoisted = checkpoint.hoisted;
    }

    fn record_read(&mut self, name: &str) {
        if self.mentioned.insert(name.to_string()) {
            self.free_variables.push(name.to_string());
        } else {
            self.reuse(name);
        }
    }

    fn open_scope(&mut self) {
        self.scopes.push(vec![]);
    }

    fn close_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            self.expired.extend(scope);
        }
    }

    /// A name mentioned before. If its declaration went out of scope it
    /// moves to the top of the function.
    fn reuse(&mut self, name: &str) {
        if self.expired.remove(name) {
            self.hoist(name);
        }
    }

    fn hoist(&mut self, name: &str) {
        self.hoisted.insert(name.to_string());
        self.free_variables.push(name.to_string());
    }

    /// Free variables of the function just parsed. Assignments to hoisted
    /// names stop declaring them.
    fn finish_function(&mut self, body: &mut [Stmt]) -> Vec<String> {
        let hoisted = std::mem::take(&mut self.hoisted);
        if !hoisted.is_empty() {
            clear_declarations(body, &hoisted);
        }
        std::mem::take(&mut self.free_variables)
    }

    fn parse_function(&mut self) -> Result<Function> {
        let pos = self.current_token().pos;
        parse!(self, TokenType::Fn, "'\\Fn'")?;
        let name = self.expect_identifier("function name")?;
        if name == RESERVED_FUNCTION_NAME {
            return Err(SyntaxError::reserved_name(&name).with_pos(pos));
        }
        parse!(self, TokenType::LeftParen, "'('")?;
        if self.curr_token_type() != &TokenType::RightParen {
            if let TokenType::Identifier(_) = self.curr_token_type() {
                return Err(SyntaxError::parameters_not_supported(
                    self.current_token().lexeme.clone(),
                )
                .with_pos(self.current_token().pos));
            }
            return Err(self.unexpected("')'"));
        }
        self.advance_token(); // eat ')'

        let mut body = self.parse_block()?;
        let free_variables = self.finish_function(&mut body);
        Ok(Function::new(name, body, free_variables, pos))
    }

    fn parse_implicit_function(&mut self) -> Result<Function> {
        let pos = self.current_token().pos;
        let mut body = vec![];
        while self.curr_token_type() != &TokenType::Eof {
            body.push(self.parse_statement()?);
        }
        let free_variables = self.finish_function(&mut body);
        Ok(Function::new(IMPLICIT_FUNCTION_NAME.to_string(), body, free_variables, pos))
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        let open = self.current_token().pos;
        parse!(self, TokenType::LeftCurly, "'{'")?;
        self.open_scope();
        let mut statements = vec![];
        loop {
            match self.curr_token_type() {
                TokenType::RightCurly => {
                    self.advance_token(); // eat '}'
                    self.close_scope();
                    return Ok(statements);
                }
                TokenType::Eof => return Err(SyntaxError::unclosed_block().with_pos(open)),
                _ => statements.push(self.parse_statement()?),
            }
        }
    }

    fn parse_statement(&mut self) -> Result<Stmt> {
        match self.curr_token_type() {
            TokenType::Identifier(_) => {
                let assignment = self.parse_assignment()?;
                self.expect_semicolon()?;
                Ok(Stmt::Assign(assignment))
            }
            TokenType::If => {
                let pos = self.current_token().pos;
                self.advance_token(); // eat 'if'
                let condition = self.parse_paren_condition()?;
                let then_branch = self.parse_block()?;
                Ok(Stmt::If {
                    condition,
                    then_branch,
                    pos,
                })
            }
            TokenType::While => {
                let pos = self.current_token().pos;
                self.advance_token(); // eat 'while'
                let condition = self.parse_paren_condition()?;
                let body = self.parse_block()?;
                Ok(Stmt::While {
                    condition,
                    body,
                    pos,
                })
            }
            TokenType::For => self.parse_for(),
            TokenType::Return => {
                let pos = self.current_token().pos;
                self.advance_token(); // eat 'return'
                let value = self.parse_expression()?;
                self.expect_semicolon()?;
                Ok(Stmt::Return { value, pos })
            }
            _ => Err(self.unexpected("statement")),
        }
    }

    fn parse_for(&mut self) -> Result<Stmt> {
        let pos = self.current_token().pos;
        self.advance_token(); // eat 'for'
        parse!(self, TokenType::LeftParen, "'('")?;
        // a variable declared in the init clause lives until the end of the loop
        self.open_scope();
        let init = self.parse_assignment()?;
        self.expect_semicolon()?;
        let condition = self.parse_condition()?;
        self.expect_semicolon()?;
        let mut update = self.parse_assignment()?;
        if update.declares_new_variable {
            // the update clause never declares
            update.declares_new_variable = false;
            if let Some(scope) = self.scopes.last_mut() {
                scope.retain(|name| *name != update.target);
            }
            self.hoist(&update.target);
        }
        parse!(self, TokenType::RightParen, "')'")?;
        let body = self.parse_block()?;
        self.close_scope();
        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            pos,
        })
    }

    fn parse_assignment(&mut self) -> Result<Assignment> {
        let pos = self.current_token().pos;
        let target = self.expect_identifier("assignment target")?;
        parse!(self, TokenType::Gets, "'gets'")?;
        let value = self.parse_expression()?;

        // the value is evaluated before the target exists
        let declares_new_variable = self.mentioned.insert(target.clone());
        if declares_new_variable {
            if let Some(scope) = self.scopes.last_mut() {
                scope.push(target.clone());
            }
        } else {
            self.reuse(&target);
        }
        Ok(Assignment {
            target,
            value,
            declares_new_variable,
            pos,
        })
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<String> {
        match self.curr_token_type().identifier() {
            Some(name) => {
                let name = name.to_string();
                self.advance_token();
                Ok(name)
            }
            None => Err(self.unexpected(expected)),
        }
    }

    /// A missing `;` belongs to the line of the token it should follow.
    fn expect_semicolon(&mut self) -> Result<()> {
        if self.curr_token_type() == &TokenType::Semicolon {
            self.advance_token();
            return Ok(());
        }
        let previous = self.previous_token();
        Err(SyntaxError::missing_semicolon(previous.lexeme.clone()).with_pos(previous.pos))
    }

    fn parse_paren_condition(&mut self) -> Result<Condition> {
        parse!(self, TokenType::LeftParen, "'('")?;
        let condition = self.parse_condition()?;
        parse!(self, TokenType::RightParen, "')'")?;
        Ok(condition)
    }

    fn parse_condition(&mut self) -> Result<Condition> {
        let mut lhs = self.parse_and_condition()?;
        while self.curr_token_type() == &TokenType::Or {
            self.advance_token(); // eat '||'
            let rhs = self.parse_and_condition()?;
            lhs = Condition::new_logical(LogicOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and_condition(&mut self) -> Result<Condition> {
        let mut lhs = self.parse_unary_condition()?;
        while self.curr_token_type() == &TokenType::And {
            self.advance_token(); // eat '&&'
            let rhs = self.parse_unary_condition()?;
            lhs = Condition::new_logical(LogicOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary_condition(&mut self) -> Result<Condition> {
        match self.curr_token_type() {
            TokenType::Not => {
                self.advance_token(); // eat '!'
                let inner = self.parse_unary_condition()?;
                Ok(Condition::Not(Box::new(inner)))
            }
            TokenType::LeftParen => match self.try_group_condition() {
                Some(group) => Ok(group),
                None => self.parse_comparison(),
            },
            _ => self.parse_comparison(),
        }
    }

    /// `( condition )` unless the parenthesis opens an arithmetic operand.
    fn try_group_condition(&mut self) -> Option<Condition> {
        let checkpoint = self.checkpoint();
        self.advance_token(); // eat '('
        if let Ok(inner) = self.parse_condition() {
            if self.curr_token_type() == &TokenType::RightParen {
                self.advance_token(); // eat ')'
                let next = self.current_token();
                if !next.token_type.is_relational() && token::get_token_precedence(next) < 0 {
                    return Some(Condition::Group(Box::new(inner)));
                }
            }
        }
        self.restore(checkpoint);
        None
    }

    fn parse_comparison(&mut self) -> Result<Condition> {
        let lhs = self.parse_expression()?;
        let op = match self.curr_token_type() {
            TokenType::Less => RelOp::Less,
            TokenType::Greater => RelOp::Greater,
            TokenType::LessEqual => RelOp::LessEqual,
            TokenType::GreaterEqual => RelOp::GreaterEqual,
            TokenType::EqualEqual => RelOp::Equal,
            TokenType::NotEqual => RelOp::NotEqual,
            TokenType::Eof => return Err(self.unexpected("relational operator")),
            _ => {
                let token = self.current_token();
                return Err(SyntaxError::missing_relational_operator(token.lexeme.clone())
                    .with_pos(token.pos));
            }
        };
        self.advance_token(); // eat relop
        let rhs = self.parse_expression()?;
        Ok(Condition::new_compare(op, lhs, rhs))
    }

    fn parse_expression(&mut self) -> Result<Expr> {
        let lhs = self.parse_unary()?;
        self.parse_binop_rhs(0, lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.curr_token_type() == &TokenType::Minus {
            self.advance_token(); // eat '-'
            let inner = self.parse_unary()?;
            return Ok(Expr::Negate(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let expr = match self.curr_token_type().clone() {
            TokenType::Identifier(name) => {
                self.record_read(&name);
                Expr::Variable(name)
            }
            TokenType::Integer(n) => Expr::Integer(n),
            TokenType::Float(n) => Expr::Float(n),
            TokenType::Str(s) => Expr::Str(s),
            TokenType::Char(c) => Expr::Char(c),
            TokenType::Bool(b) => Expr::Bool(b),
            TokenType::LeftParen => return self.parse_paren_expr(),
            TokenType::Eof => return Err(self.unexpected("expression")),
            _ => {
                let token = self.current_token();
                return Err(SyntaxError::no_primary_expression(token.lexeme.clone())
                    .with_pos(token.pos));
            }
        };
        self.advance_token();
        Ok(expr)
    }

    fn parse_paren_expr(&mut self) -> Result<Expr> {
        parse!(self, TokenType::LeftParen, "'('")?; // eat '('
        let expr = self.parse_expression()?;
        parse!(self, TokenType::RightParen, "')'")?; // eat ')'
        Ok(Expr::Group(Box::new(expr)))
    }

    fn parse_binop_rhs(&mut self, expr_prec: i32, mut lhs: Expr) -> Result<Expr> {
        loop {
            let token_prec = token::get_token_precedence(self.current_token());

            // If this is a binop that binds at least as tightly as the current binop,
            // consume it, otherwise we are done.
            if token_prec < 0 || token_prec < expr_prec {
                return Ok(lhs);
            }

            let binop = match self.curr_token_type() {
                TokenType::Plus => BinOp::Add,
                TokenType::Minus => BinOp::Sub,
                TokenType::Star => BinOp::Mul,
                TokenType::Slash => BinOp::Div,
                TokenType::Percent => BinOp::Mod,
                _ => return Err(self.unexpected("binary operator")),
            };
            self.advance_token(); // eat binop

            let mut rhs = self.parse_unary()?;

            let next_prec = token::get_token_precedence(self.current_token());
            if token_prec < next_prec {
                rhs = self.parse_binop_rhs(token_prec + 1, rhs)?;
            }

            lhs = Expr::new_binary_expr(binop, lhs, rhs);
        }
    }
}

fn clear_declarations(statements: &mut [Stmt], names: &HashSet<String>) {
    let clear = |assignment: &mut Assignment| {
        if names.contains(&assignment.target) {
            assignment.declares_new_variable = false;
        }
    };
    for stmt in statements {
        match stmt {
            Stmt::Assign(assignment) => clear(assignment),
            Stmt::If {
                then_branch: body, ..
            }
            | Stmt::While { body, .. } => clear_declarations(body, names),
            Stmt::For {
                init, update, body, ..
            } => {
                clear(init);
                clear(update);
                clear_declarations(body, names);
            }
            Stmt::Return { .. } => {}
        }
    }
}

pub fn parse(tokens: Vec<Token>, console: Console) -> Result<Program> {
    Parser::new(tokens, console).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxErrorType;
    use crate::lexer;

    fn parse_source(source: &str) -> Result<Program> {
        let tokens = lexer::tokenize(source, Console::quiet()).unwrap();
        parse(tokens, Console::quiet())
    }

    fn assignment(stmt: &Stmt) -> &Assignment {
        match stmt {
            Stmt::Assign(a) => a,
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    fn var(name: &str) -> Expr {
        Expr::new_variable(name)
    }

    #[test]
    fn first_mention_declares() {
        let program = parse_source("\\Fn F() { x gets 1; x gets 2; y gets x; }").unwrap();
        let body = &program.function.body;
        assert!(assignment(&body[0]).declares_new_variable);
        assert!(!assignment(&body[1]).declares_new_variable);
        assert!(assignment(&body[2]).declares_new_variable);
        assert!(program.function.free_variables.is_empty());
    }

    #[test]
    fn reads_before_assignment_are_free() {
        let program = parse_source("\\Fn F() { b gets a + 1; a gets 2; c gets c + 1; }").unwrap();
        let function = &program.function;
        assert_eq!(function.free_variables, vec!["a".to_string(), "c".to_string()]);
        assert!(assignment(&function.body[0]).declares_new_variable);
        assert!(!assignment(&function.body[1]).declares_new_variable);
        assert!(!assignment(&function.body[2]).declares_new_variable);
    }

    #[test]
    fn precedence_and_associativity() {
        let program = parse_source("x gets 1 + 2 * 3 - 4;").unwrap();
        let expected = Expr::new_binary_expr(
            BinOp::Sub,
            Expr::new_binary_expr(
                BinOp::Add,
                Expr::Integer(1),
                Expr::new_binary_expr(BinOp::Mul, Expr::Integer(2), Expr::Integer(3)),
            ),
            Expr::Integer(4),
        );
        assert_eq!(assignment(&program.function.body[0]).value, expected);

        let program = parse_source("x gets (1 + 2) % -y;").unwrap();
        let expected = Expr::new_binary_expr(
            BinOp::Mod,
            Expr::Group(Box::new(Expr::new_binary_expr(
                BinOp::Add,
                Expr::Integer(1),
                Expr::Integer(2),
            ))),
            Expr::Negate(Box::new(var("y"))),
        );
        assert_eq!(assignment(&program.function.body[0]).value, expected);
    }

    #[test]
    fn for_loop_update_never_declares() {
        let program =
            parse_source("\\Fn F() { for (i gets 0; i < 10; i gets i + 1) { s gets i; } }").unwrap();
        match &program.function.body[0] {
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                assert!(init.declares_new_variable);
                assert!(!update.declares_new_variable);
                assert_eq!(*condition, Condition::new_compare(RelOp::Less, var("i"), Expr::Integer(10)));
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected for loop, got {:?}", other),
        }
    }

    #[test]
    fn fresh_for_update_target_is_hoisted() {
        let program =
            parse_source("\\For (i gets 0; i < 3; j gets 1) { }").unwrap();
        assert_eq!(program.function.free_variables, vec!["j".to_string()]);
    }

    #[test]
    fn loop_variable_reused_by_a_second_loop_is_hoisted() {
        let source = "\\Fn F() { \\For (i gets 0; i < 3; i gets i + 1) { } \\For (i gets 0; i < 5; i gets i + 1) { } }";
        let program = parse_source(source).unwrap();
        let function = &program.function;
        assert_eq!(function.free_variables, vec!["i".to_string()]);
        for stmt in &function.body {
            match stmt {
                Stmt::For { init, .. } => assert!(!init.declares_new_variable),
                other => panic!("expected for loop, got {:?}", other),
            }
        }
    }

    #[test]
    fn variable_read_after_its_block_is_hoisted() {
        let program = parse_source("\\If (1 < 2) { x gets 1; } \\KwRet x;").unwrap();
        let function = &program.function;
        assert_eq!(function.free_variables, vec!["x".to_string()]);
        match &function.body[0] {
            Stmt::If { then_branch, .. } => {
                assert!(!assignment(&then_branch[0]).declares_new_variable)
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn block_local_variables_stay_declared() {
        let source = "\\Fn F() { n gets 0; \\While (n < 3) { t gets n; n gets t + 1; } \\If (n > 1) { t2 gets n; } }";
        let program = parse_source(source).unwrap();
        let function = &program.function;
        assert!(function.free_variables.is_empty());
        match &function.body[1] {
            Stmt::While { body, .. } => {
                assert!(assignment(&body[0]).declares_new_variable);
                assert!(!assignment(&body[1]).declares_new_variable);
            }
            other => panic!("expected while, got {:?}", other),
        }
    }

    #[test]
    fn has_return_through_nested_blocks() {
        let source = "\\Fn F() { b gets a + 1; \\While (a < b) { \\If (a < 5) { \\KwRet b; } } }";
        let program = parse_source(source).unwrap();
        assert!(program.function.has_return);
        assert_eq!(program.function.name, "F");

        let program = parse_source("\\Fn G() { x gets 1; }").unwrap();
        assert!(!program.function.has_return);
    }

    #[test]
    fn logical_conditions() {
        let program = parse_source("\\If (!(a < 1) && b > 2 || (a + 1) == b) { }").unwrap();
        let expected = Condition::new_logical(
            LogicOp::Or,
            Condition::new_logical(
                LogicOp::And,
                Condition::Not(Box::new(Condition::Group(Box::new(Condition::new_compare(
                    RelOp::Less,
                    var("a"),
                    Expr::Integer(1),
                ))))),
                Condition::new_compare(RelOp::Greater, var("b"), Expr::Integer(2)),
            ),
            Condition::new_compare(
                RelOp::Equal,
                Expr::Group(Box::new(Expr::new_binary_expr(BinOp::Add, var("a"), Expr::Integer(1)))),
                var("b"),
            ),
        );
        match &program.function.body[0] {
            Stmt::If { condition, .. } => assert_eq!(*condition, expected),
            other => panic!("expected if, got {:?}", other),
        }
        assert_eq!(program.function.free_variables, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn missing_semicolon_points_at_statement_line() {
        let err = parse_source("\\Fn F() {\n  a gets 1\n  b gets 2;\n}").unwrap_err();
        assert_eq!(err.error_type, SyntaxErrorType::MissingSemicolon("1".to_string()));
        assert_eq!(err.row, 2);
    }

    #[test]
    fn unclosed_block_points_at_brace() {
        let err = parse_source("\\Fn F() {\n  \\If (a < 1) {\n    a gets 1;\n}\n").unwrap_err();
        assert_eq!(err.error_type, SyntaxErrorType::UnclosedBlock);
        assert_eq!(err.row, 1);
    }

    #[test]
    fn extra_closing_brace_is_trailing_input() {
        let err = parse_source("\\Fn F() {\n  a gets 1;\n}\n}").unwrap_err();
        assert_eq!(err.error_type, SyntaxErrorType::TrailingInput("}".to_string()));
        assert_eq!(err.row, 4);
    }

    #[test]
    fn parameters_are_rejected() {
        let err = parse_source("\\Fn F(a) { }").unwrap_err();
        assert_eq!(err.error_type, SyntaxErrorType::ParametersNotSupported("a".to_string()));
    }

    #[test]
    fn main_is_reserved() {
        let err = parse_source("\\Fn main() { }").unwrap_err();
        assert_eq!(err.error_type, SyntaxErrorType::ReservedName("main".to_string()));
    }

    #[test]
    fn condition_requires_relational_operator() {
        let err = parse_source("\\While (a + 1) { }").unwrap_err();
        assert_eq!(err.error_type, SyntaxErrorType::MissingRelationalOperator(")".to_string()));
    }

    #[test]
    fn bare_statements_form_implicit_function() {
        let program = parse_source("b gets a + 1;").unwrap();
        assert_eq!(program.function.name, IMPLICIT_FUNCTION_NAME);
        assert_eq!(program.function.body.len(), 1);
    }

    #[test]
    fn unexpected_eof() {
        let err = parse_source("\\Fn F() { x gets").unwrap_err();
        assert_eq!(err.error_type, SyntaxErrorType::UnexpectedEOF);
    }
}
