use std::collections::{BTreeMap, HashMap};

use crate::ast::{Assignment, Condition, Expr, Program, Stmt, Type};
use crate::console::Console;
use crate::error::ConvertError;

/// Caller-supplied variable types, consulted when inference has nothing to go on.
pub type TypeHints = HashMap<String, Type>;

type Result<T> = std::result::Result<T, ConvertError>;

/// Types resolved during one conversion. Built fresh for every request and
/// dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeContext {
    variables: BTreeMap<String, Type>,
    hints: TypeHints,
}

impl TypeContext {
    pub fn new(hints: &TypeHints) -> Self {
        Self {
            variables: BTreeMap::new(),
            hints: hints.clone(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Type> {
        self.variables.get(name).copied()
    }

    pub fn variables(&self) -> &BTreeMap<String, Type> {
        &self.variables
    }

    pub fn hints(&self) -> &TypeHints {
        &self.hints
    }

    /// Binds `name` unless it is already resolved. Returns the type the name
    /// ends up with; an existing binding is never changed.
    fn bind(&mut self, name: &str, ty: Type) -> Type {
        *self.variables.entry(name.to_string()).or_insert(ty)
    }

    /// Type of a variable that is being read: resolved earlier, or hinted.
    fn require(&mut self, name: &str) -> Result<Type> {
        if let Some(ty) = self.get(name) {
            return Ok(ty);
        }
        match self.hints.get(name) {
            Some(ty) => Ok(self.bind(name, *ty)),
            None => Err(ConvertError::missing_type(name)),
        }
    }
}

/// A program whose every variable has a type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedProgram {
    pub program: Program,
    pub context: TypeContext,
    pub return_type: Option<Type>,
}

pub struct TypeChecker {
    context: TypeContext,
    return_type: Option<Type>,
    console: Console,
}

impl TypeChecker {
    pub fn new(hints: &TypeHints, console: Console) -> Self {
        Self {
            context: TypeContext::new(hints),
            return_type: None,
            console,
        }
    }

    pub fn run(mut self, program: Program) -> Result<TypedProgram> {
        self.console
            .println("[Type Checker] Starting Type Resolution Process");
        self.resolve_block(&program.function.body)?;

        // free variables are all read somewhere, so this only re-checks them
        for name in &program.function.free_variables {
            self.context.require(name)?;
        }

        self.console.println(format!(
            "[Type Checker] Resolved {} variables",
            self.context.variables.len()
        ));
        Ok(TypedProgram {
            program,
            context: self.context,
            return_type: self.return_type,
        })
    }

    fn resolve_block(&mut self, statements: &[Stmt]) -> Result<()> {
        for stmt in statements {
            match stmt {
                Stmt::Assign(assignment) => self.resolve_assignment(assignment)?,
                Stmt::If {
                    condition,
                    then_branch: body,
                    ..
                }
                | Stmt::While {
                    condition, body, ..
                } => {
                    self.resolve_condition(condition)?;
                    self.resolve_block(body)?;
                }
                Stmt::For {
                    init,
                    condition,
                    update,
                    body,
                    ..
                } => {
                    self.resolve_assignment(init)?;
                    self.resolve_condition(condition)?;
                    self.resolve_assignment(update)?;
                    self.resolve_block(body)?;
                }
                Stmt::Return { value, .. } => {
                    let ty = self.resolve_expr(value)?;
                    // the first return decides the function's type
                    self.return_type.get_or_insert(ty);
                }
            }
        }
        Ok(())
    }

    fn resolve_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        let value_type = self.resolve_expr(&assignment.value)?;
        let ty = match assignment.value.literal_type() {
            Some(literal) => literal,
            None => value_type,
        };
        let bound = self.context.bind(&assignment.target, ty);
        self.console.println_verbose(format!(
            "[Type Checker] '{}' is {} at:({}:{})",
            assignment.target, bound, assignment.pos.0, assignment.pos.1
        ));
        Ok(())
    }

    fn resolve_condition(&mut self, condition: &Condition) -> Result<()> {
        match condition {
            Condition::Compare { lhs, rhs, .. } => {
                self.resolve_expr(lhs)?;
                self.resolve_expr(rhs)?;
            }
            Condition::Logical { lhs, rhs, .. } => {
                self.resolve_condition(lhs)?;
                self.resolve_condition(rhs)?;
            }
            Condition::Not(inner) | Condition::Group(inner) => self.resolve_condition(inner)?,
        }
        Ok(())
    }

    /// Resolves every variable in `expr` left to right and returns the type of
    /// the whole expression.
    fn resolve_expr(&mut self, expr: &Expr) -> Result<Type> {
        match expr {
            Expr::Variable(name) => self.context.require(name),
            Expr::Binary { lhs, rhs, .. } => {
                let lhs = self.resolve_expr(lhs)?;
                let rhs = self.resolve_expr(rhs)?;
                Ok(lhs.join(rhs))
            }
            Expr::Negate(inner) | Expr::Group(inner) => self.resolve_expr(inner),
            literal => literal
                .literal_type()
                .ok_or_else(|| ConvertError::internal("literal without a type")),
        }
    }
}

pub fn check(program: Program, hints: &TypeHints, console: Console) -> Result<TypedProgram> {
    TypeChecker::new(hints, console).run(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    fn resolve(source: &str, hints: &[(&str, Type)]) -> Result<TypedProgram> {
        let tokens = lexer::tokenize(source, Console::quiet()).unwrap();
        let program = parser::parse(tokens, Console::quiet()).unwrap();
        let hints = hints
            .iter()
            .map(|(name, ty)| (name.to_string(), *ty))
            .collect::<TypeHints>();
        check(program, &hints, Console::quiet())
    }

    #[test]
    fn literals_need_no_hints() {
        let typed = resolve(
            "i gets 1; f gets 2.5; s gets \"x\"; c gets 'y'; b gets true; n gets -3;",
            &[],
        )
        .unwrap();
        let vars = typed.context.variables();
        assert_eq!(vars["i"], Type::Int);
        assert_eq!(vars["f"], Type::Float);
        assert_eq!(vars["s"], Type::String);
        assert_eq!(vars["c"], Type::Char);
        assert_eq!(vars["b"], Type::Int);
        assert_eq!(vars["n"], Type::Int);
    }

    #[test]
    fn unknown_operand_is_reported() {
        let err = resolve("b gets a + 1;", &[]).unwrap_err();
        assert_eq!(err, ConvertError::missing_type("a"));
    }

    #[test]
    fn operand_type_flows_to_target() {
        let typed = resolve("b gets a + 1;", &[("a", Type::Long)]).unwrap();
        assert_eq!(typed.context.get("a"), Some(Type::Long));
        assert_eq!(typed.context.get("b"), Some(Type::Long));
    }

    #[test]
    fn mixed_operands_widen() {
        let typed = resolve("x gets 1; y gets x * 2.0;", &[]).unwrap();
        assert_eq!(typed.context.get("y"), Some(Type::Float));
    }

    #[test]
    fn existing_type_is_kept() {
        let typed = resolve("x gets 1; x gets 2.5;", &[]).unwrap();
        assert_eq!(typed.context.get("x"), Some(Type::Int));
    }

    #[test]
    fn hints_are_ignored_for_inferable_variables() {
        let typed = resolve("x gets 1;", &[("x", Type::String), ("unused", Type::Char)]).unwrap();
        assert_eq!(typed.context.get("x"), Some(Type::Int));
        assert_eq!(typed.context.get("unused"), None);
        assert_eq!(typed.context.hints().len(), 2);
    }

    #[test]
    fn condition_variables_must_resolve() {
        let err = resolve("\\While (n > 0) { }", &[]).unwrap_err();
        assert_eq!(err.missing_variable(), Some("n"));

        let typed = resolve("\\While (n > 0) { }", &[("n", Type::Int)]).unwrap();
        assert_eq!(typed.context.get("n"), Some(Type::Int));
    }

    #[test]
    fn missing_types_are_reported_in_source_order() {
        let source = "\\Fn F() { \\If (p < q) { r gets p; } }";
        assert_eq!(resolve(source, &[]).unwrap_err().missing_variable(), Some("p"));
        assert_eq!(
            resolve(source, &[("p", Type::Int)]).unwrap_err().missing_variable(),
            Some("q")
        );
        let typed = resolve(source, &[("p", Type::Int), ("q", Type::Int)]).unwrap();
        assert_eq!(typed.context.get("r"), Some(Type::Int));
    }

    #[test]
    fn return_type_comes_from_first_return() {
        let source = "\\Fn F() { b gets a + 1; \\While (a < b) { \\If (a < 5) { \\KwRet b; } } \\KwRet 1.5; }";
        let typed = resolve(source, &[("a", Type::Int)]).unwrap();
        assert_eq!(typed.return_type, Some(Type::Int));

        let typed = resolve("\\Fn G() { x gets 1; }", &[]).unwrap();
        assert_eq!(typed.return_type, None);
    }

    #[test]
    fn for_loop_variables() {
        let typed = resolve("for (i gets 0; i < 10; i gets i + 1) { s gets i * 2; }", &[]).unwrap();
        assert_eq!(typed.context.get("i"), Some(Type::Int));
        assert_eq!(typed.context.get("s"), Some(Type::Int));
    }
}
