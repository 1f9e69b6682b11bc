use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub function: Function,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub body: Vec<Stmt>,
    pub has_return: bool,
    /// Variables whose first mention in the function is a read. They have no
    /// declaring assignment before use and are declared up front.
    pub free_variables: Vec<String>,
    pub pos: (usize, usize),
}

impl Function {
    pub fn new(name: String, body: Vec<Stmt>, free_variables: Vec<String>, pos: (usize, usize)) -> Self {
        let has_return = body.iter().any(Stmt::contains_return);
        Self {
            name,
            body,
            has_return,
            free_variables,
            pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: String,
    pub value: Expr,
    pub declares_new_variable: bool,
    pub pos: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(Assignment),
    If {
        condition: Condition,
        then_branch: Vec<Stmt>,
        pos: (usize, usize),
    },
    While {
        condition: Condition,
        body: Vec<Stmt>,
        pos: (usize, usize),
    },
    For {
        init: Assignment,
        condition: Condition,
        update: Assignment,
        body: Vec<Stmt>,
        pos: (usize, usize),
    },
    Return {
        value: Expr,
        pos: (usize, usize),
    },
}

impl Stmt {
    pub fn contains_return(&self) -> bool {
        match self {
            Stmt::Return { .. } => true,
            Stmt::Assign(_) => false,
            Stmt::If { then_branch: body, .. }
            | Stmt::While { body, .. }
            | Stmt::For { body, .. } => body.iter().any(Stmt::contains_return),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(String),
    Integer(i64),
    Float(f64),
    Str(String),
    Char(String),
    Bool(bool),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Negate(Box<Expr>),
    Group(Box<Expr>),
}

impl Expr {
    pub fn new_binary_expr(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn new_variable(name: &str) -> Self {
        Self::Variable(name.to_string())
    }

    /// Type of the value if the expression is a plain literal, looking
    /// through negation and parentheses. `true`/`false` count as `int`.
    pub fn literal_type(&self) -> Option<Type> {
        match self {
            Expr::Integer(_) | Expr::Bool(_) => Some(Type::Int),
            Expr::Float(_) => Some(Type::Float),
            Expr::Str(_) => Some(Type::String),
            Expr::Char(_) => Some(Type::Char),
            Expr::Negate(inner) | Expr::Group(inner) => inner.literal_type(),
            Expr::Variable(_) | Expr::Binary { .. } => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelOp {
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl RelOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelOp::Less => "<",
            RelOp::Greater => ">",
            RelOp::LessEqual => "<=",
            RelOp::GreaterEqual => ">=",
            RelOp::Equal => "==",
            RelOp::NotEqual => "!=",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicOp::And => "&&",
            LogicOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        op: RelOp,
        lhs: Expr,
        rhs: Expr,
    },
    Logical {
        op: LogicOp,
        lhs: Box<Condition>,
        rhs: Box<Condition>,
    },
    Not(Box<Condition>),
    Group(Box<Condition>),
}

impl Condition {
    pub fn new_compare(op: RelOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Compare { op, lhs, rhs }
    }

    pub fn new_logical(op: LogicOp, lhs: Condition, rhs: Condition) -> Self {
        Self::Logical {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// The types a variable can resolve to. Callers name them by their C++-ish
/// spelling (`int`, `float`, `string`, ...).
#[derive(PartialEq, Eq, Hash, Copy, Clone)]
pub enum Type {
    Int,
    Float,
    String,
    Char,
    Long,
    Array,
    Vector,
}

impl Type {
    pub const ALL: [Type; 7] = [
        Type::Int,
        Type::Float,
        Type::String,
        Type::Char,
        Type::Long,
        Type::Array,
        Type::Vector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Char => "char",
            Type::Long => "long",
            Type::Array => "array",
            Type::Vector => "vector",
        }
    }

    /// Whether a value of this type can be streamed with `cout <<`.
    pub fn is_printable(&self) -> bool {
        !matches!(self, Type::Array | Type::Vector)
    }

    /// Type of `lhs op rhs`: string wins, then float, then long; int and char
    /// promote to int. Anything else keeps the left operand's type.
    pub fn join(self, other: Type) -> Type {
        match (self, other) {
            (a, b) if a == b => a,
            (Type::String, _) | (_, Type::String) => Type::String,
            (Type::Float, _) | (_, Type::Float) => Type::Float,
            (Type::Long, _) | (_, Type::Long) => Type::Long,
            (Type::Int | Type::Char, Type::Int | Type::Char) => Type::Int,
            (a, _) => a,
        }
    }
}

impl Debug for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown type '{0}', expected one of: int, float, string, char, long, array, vector")]
pub struct UnknownType(pub String);

impl FromStr for Type {
    type Err = UnknownType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Type::ALL
            .into_iter()
            .find(|ty| ty.as_str() == value)
            .ok_or_else(|| UnknownType(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_round_trip() {
        for ty in Type::ALL {
            assert_eq!(ty.as_str().parse::<Type>(), Ok(ty));
        }
        assert_eq!(" int ".parse::<Type>(), Ok(Type::Int));
        assert!("double".parse::<Type>().is_err());
    }

    #[test]
    fn join_prefers_wider_types() {
        assert_eq!(Type::Int.join(Type::Float), Type::Float);
        assert_eq!(Type::Long.join(Type::Int), Type::Long);
        assert_eq!(Type::Char.join(Type::Int), Type::Int);
        assert_eq!(Type::Char.join(Type::String), Type::String);
        assert_eq!(Type::Vector.join(Type::Int), Type::Vector);
    }

    #[test]
    fn literal_type_looks_through_groups() {
        let expr = Expr::Group(Box::new(Expr::Negate(Box::new(Expr::Float(1.5)))));
        assert_eq!(expr.literal_type(), Some(Type::Float));
        assert_eq!(Expr::Bool(true).literal_type(), Some(Type::Int));
        assert_eq!(
            Expr::new_binary_expr(BinOp::Add, Expr::Integer(1), Expr::Integer(2)).literal_type(),
            None
        );
    }

    #[test]
    fn has_return_is_transitive() {
        let nested = Stmt::While {
            condition: Condition::new_compare(RelOp::Less, Expr::new_variable("a"), Expr::Integer(1)),
            body: vec![Stmt::If {
                condition: Condition::new_compare(RelOp::Less, Expr::new_variable("a"), Expr::Integer(5)),
                then_branch: vec![Stmt::Return {
                    value: Expr::new_variable("a"),
                    pos: (3, 1),
                }],
                pos: (2, 1),
            }],
            pos: (1, 1),
        };
        let function = Function::new("F".into(), vec![nested], vec!["a".into()], (1, 1));
        assert!(function.has_return);

        let function = Function::new("G".into(), vec![], vec![], (1, 1));
        assert!(!function.has_return);
    }
}
