use crate::ast::{Assignment, Condition, Expr, Function, Stmt, Type};
use crate::console::Console;
use crate::error::ConvertError;
use crate::program::{CompiledProgram, ProgramBuilder};
use crate::typecheck::{TypeContext, TypedProgram};
use crate::util::indentation;

type Result<T> = std::result::Result<T, ConvertError>;

const HEADERS: [&str; 2] = ["#include <bits/stdc++.h>", "using namespace std;"];

/// Renders a typed program as C++.
pub struct Compiler<'a> {
    types: &'a TypeContext,
    console: Console,
}

impl<'a> Compiler<'a> {
    pub fn new(types: &'a TypeContext, console: Console) -> Self {
        Self { types, console }
    }

    pub fn compile(&self, typed: &TypedProgram) -> Result<CompiledProgram> {
        let function = &typed.program.function;
        let return_type = match (function.has_return, typed.return_type) {
            (false, _) => None,
            (true, Some(ty)) => Some(ty),
            (true, None) => {
                return Err(ConvertError::internal(format!(
                    "function '{}' returns but has no return type",
                    function.name
                )))
            }
        };

        let mut program_builder = ProgramBuilder::new();
        for header in HEADERS {
            program_builder.add_header(header);
        }
        program_builder.add_function(
            &function.name,
            return_type,
            self.compile_fn(function, return_type)?,
        );
        program_builder.add_entry_point(self.compile_entry_point(&function.name, return_type));

        self.console.println(format!(
            "[Compiler] Generated function '{}' returning {}",
            function.name,
            return_type.map(cpp_type).unwrap_or("void")
        ));
        program_builder.build()
    }

    fn compile_fn(&self, function: &Function, return_type: Option<Type>) -> Result<String> {
        let ret = return_type.map(cpp_type).unwrap_or("void");
        let mut code = format!("{} {}() {{\n", ret, function.name);
        for name in &function.free_variables {
            let ty = self.type_of(name)?;
            code.push_str(&format!("{}{} {}{{}};\n", indentation(1), cpp_type(ty), name));
        }
        self.compile_block(&function.body, 1, &mut code)?;
        code.push_str("}\n");
        Ok(code)
    }

    fn compile_entry_point(&self, name: &str, return_type: Option<Type>) -> String {
        let call = match return_type {
            Some(ty) if ty.is_printable() => format!("cout << {}() << endl;", name),
            _ => format!("{}();", name),
        };
        format!(
            "int main() {{\n{indent}{}\n{indent}return 0;\n}}\n",
            call,
            indent = indentation(1)
        )
    }

    fn compile_block(&self, statements: &[Stmt], level: usize, code: &mut String) -> Result<()> {
        let indent = indentation(level);
        for stmt in statements {
            match stmt {
                Stmt::Assign(assignment) => {
                    let line = self.compile_assignment(assignment, assignment.declares_new_variable)?;
                    code.push_str(&format!("{}{};\n", indent, line));
                }
                Stmt::If {
                    condition,
                    then_branch,
                    ..
                } => {
                    let header = format!("if ({})", self.compile_condition(condition)?);
                    self.compile_nested(&header, then_branch, level, code)?;
                }
                Stmt::While {
                    condition, body, ..
                } => {
                    let header = format!("while ({})", self.compile_condition(condition)?);
                    self.compile_nested(&header, body, level, code)?;
                }
                Stmt::For {
                    init,
                    condition,
                    update,
                    body,
                    ..
                } => {
                    // the update clause never declares, init already did
                    let header = format!(
                        "for ({}; {}; {})",
                        self.compile_assignment(init, init.declares_new_variable)?,
                        self.compile_condition(condition)?,
                        self.compile_assignment(update, false)?
                    );
                    self.compile_nested(&header, body, level, code)?;
                }
                Stmt::Return { value, .. } => {
                    code.push_str(&format!("{}return {};\n", indent, self.compile_expr(value)?));
                }
            }
        }
        Ok(())
    }

    fn compile_nested(&self, header: &str, body: &[Stmt], level: usize, code: &mut String) -> Result<()> {
        let indent = indentation(level);
        code.push_str(&format!("{}{} {{\n", indent, header));
        self.compile_block(body, level + 1, code)?;
        code.push_str(&format!("{}}}\n", indent));
        Ok(())
    }

    fn compile_assignment(&self, assignment: &Assignment, declare: bool) -> Result<String> {
        let value = self.compile_expr(&assignment.value)?;
        if declare {
            let ty = self.type_of(&assignment.target)?;
            Ok(format!("{} {} = {}", cpp_type(ty), assignment.target, value))
        } else {
            self.type_of(&assignment.target)?;
            Ok(format!("{} = {}", assignment.target, value))
        }
    }

    fn compile_condition(&self, condition: &Condition) -> Result<String> {
        Ok(match condition {
            Condition::Compare { op, lhs, rhs } => format!(
                "{} {} {}",
                self.compile_expr(lhs)?,
                op.as_str(),
                self.compile_expr(rhs)?
            ),
            Condition::Logical { op, lhs, rhs } => format!(
                "{} {} {}",
                self.compile_condition(lhs)?,
                op.as_str(),
                self.compile_condition(rhs)?
            ),
            Condition::Not(inner) => format!("!{}", self.compile_operand_condition(inner)?),
            Condition::Group(inner) => format!("({})", self.compile_condition(inner)?),
        })
    }

    /// `!` binds tighter than a comparison, so its operand keeps parentheses.
    fn compile_operand_condition(&self, condition: &Condition) -> Result<String> {
        match condition {
            Condition::Group(_) | Condition::Not(_) => self.compile_condition(condition),
            other => Ok(format!("({})", self.compile_condition(other)?)),
        }
    }

    fn compile_expr(&self, expr: &Expr) -> Result<String> {
        let value = match expr {
            Expr::Variable(name) => {
                self.type_of(name)?;
                name.clone()
            }
            Expr::Integer(n) => n.to_string(),
            Expr::Float(n) => format!("{:?}", n),
            Expr::Str(s) => format!("\"{}\"", s),
            Expr::Char(c) => format!("'{}'", c),
            Expr::Bool(b) => b.to_string(),
            Expr::Binary { op, lhs, rhs } => format!(
                "{} {} {}",
                self.compile_operand(lhs)?,
                op.as_str(),
                self.compile_operand(rhs)?
            ),
            // `--y` would be a pre-decrement
            Expr::Negate(inner) if matches!(**inner, Expr::Negate(_)) => {
                format!("-({})", self.compile_expr(inner)?)
            }
            Expr::Negate(inner) => format!("-{}", self.compile_expr(inner)?),
            Expr::Group(inner) => format!("({})", self.compile_expr(inner)?),
        };
        Ok(value)
    }

    /// Operand of an arithmetic operator. String literals are `const char*`
    /// in C++, so they are lifted to `string` before `+` applies.
    fn compile_operand(&self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Str(s) => Ok(format!("string(\"{}\")", s)),
            other => self.compile_expr(other),
        }
    }

    /// A missing type here means the resolver let something through.
    fn type_of(&self, name: &str) -> Result<Type> {
        self.types.get(name).ok_or_else(|| {
            ConvertError::internal(format!("variable '{}' reached code generation without a type", name))
        })
    }
}

pub fn cpp_type(ty: Type) -> &'static str {
    match ty {
        Type::Int => "int",
        Type::Float => "float",
        Type::String => "string",
        Type::Char => "char",
        Type::Long => "long",
        Type::Array | Type::Vector => "vector<int>",
    }
}

pub fn compile(typed: &TypedProgram, console: Console) -> Result<CompiledProgram> {
    Compiler::new(&typed.context, console).compile(typed)
}
