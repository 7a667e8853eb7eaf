//! Core AST definitions for the Lox programming language.
//!
//! This crate contains the syntax tree shared between the parser, the static
//! resolver and the interpreter: tokens, expressions, statements and the
//! declarations for functions and classes. Runtime-specific components like
//! values and environments live in `lox_interpreter`.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

// --- Tokens ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    Break,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Maps a reserved word to its keyword kind.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "and" => TokenKind::And,
            "break" => TokenKind::Break,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => return None,
        };
        Some(kind)
    }
}

/// A lexical token. Runtime errors point back at the token that caused them,
/// so the lexeme and line travel with every operator and name in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn identifier(name: impl Into<String>, line: usize) -> Self {
        Token::new(TokenKind::Identifier, name, line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.lexeme)
    }
}

// --- AST (Abstract Syntax Tree) Nodes ---

/// Represents a literal value in the source code.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

/// Identity of a variable-like expression node.
///
/// The resolver records scope depths keyed by this id, so ids must stay
/// unique across every parse fed to the same interpreter (a REPL session
/// parses many times). They are drawn from a process-wide counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

static NEXT_EXPR_ID: AtomicUsize = AtomicUsize::new(0);

impl ExprId {
    pub fn fresh() -> Self {
        ExprId(NEXT_EXPR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Represents an expression that can be evaluated to a runtime value.
#[derive(Debug, Clone)]
pub enum Expr {
    // Atoms
    Literal(Literal),
    Grouping(Box<Expr>),
    Variable {
        id: ExprId,
        name: Token,
    },

    // Operations
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// The closing parenthesis, used to locate call errors.
        paren: Token,
        arguments: Vec<Expr>,
    },

    // Objects
    Get {
        object: Box<Expr>,
        name: Token,
    },
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
    This {
        id: ExprId,
        keyword: Token,
    },
    Super {
        id: ExprId,
        keyword: Token,
        method: Token,
    },
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(Expr),
    Print {
        keyword: Token,
        value: Expr,
    },
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Break(Token),
    Return {
        keyword: Token,
        value: Option<Expr>,
    },
    Function(Rc<FunctionDecl>),
    Class(ClassDecl),
}

/// A named function or method. Shared by reference with every closure
/// created from it.
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    /// Methods declared without a parameter list run on property access.
    pub is_getter: bool,
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: Token,
    pub superclass: Option<Expr>,
    pub methods: Vec<Rc<FunctionDecl>>,
}

impl Expr {
    pub fn literal(literal: Literal) -> Self {
        Expr::Literal(literal)
    }

    pub fn variable(name: Token) -> Self {
        Expr::Variable {
            id: ExprId::fresh(),
            name,
        }
    }

    pub fn assign(name: Token, value: Expr) -> Self {
        Expr::Assign {
            id: ExprId::fresh(),
            name,
            value: Box::new(value),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

// --- S-expression rendering ---

fn symbol(name: &str) -> lexpr::Value {
    lexpr::Value::symbol(name)
}

fn form(head: &str, rest: Vec<lexpr::Value>) -> lexpr::Value {
    let mut items = Vec::with_capacity(rest.len() + 1);
    items.push(symbol(head));
    items.extend(rest);
    lexpr::Value::list(items)
}

impl Literal {
    pub fn to_sexpr(&self) -> lexpr::Value {
        match self {
            Literal::Nil => symbol("nil"),
            Literal::Bool(b) => symbol(if *b { "true" } else { "false" }),
            Literal::Number(n) => lexpr::Value::from(*n),
            Literal::String(s) => lexpr::Value::string(s.as_str()),
        }
    }
}

impl Expr {
    /// Renders the expression as a parenthesized prefix form, e.g.
    /// `(* (- 123) (group 45.67))`.
    pub fn to_sexpr(&self) -> lexpr::Value {
        match self {
            Expr::Literal(lit) => lit.to_sexpr(),
            Expr::Grouping(inner) => form("group", vec![inner.to_sexpr()]),
            Expr::Variable { name, .. } => symbol(&name.lexeme),
            Expr::Unary { operator, right } => form(&operator.lexeme, vec![right.to_sexpr()]),
            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => form(&operator.lexeme, vec![left.to_sexpr(), right.to_sexpr()]),
            Expr::Assign { name, value, .. } => {
                form("=", vec![symbol(&name.lexeme), value.to_sexpr()])
            }
            Expr::Call {
                callee, arguments, ..
            } => form(
                "call",
                std::iter::once(callee.to_sexpr())
                    .chain(arguments.iter().map(Expr::to_sexpr))
                    .collect(),
            ),
            Expr::Get { object, name } => form("get", vec![object.to_sexpr(), symbol(&name.lexeme)]),
            Expr::Set {
                object,
                name,
                value,
            } => form(
                "set",
                vec![object.to_sexpr(), symbol(&name.lexeme), value.to_sexpr()],
            ),
            Expr::This { .. } => symbol("this"),
            Expr::Super { method, .. } => form("super", vec![symbol(&method.lexeme)]),
        }
    }
}

impl Stmt {
    pub fn to_sexpr(&self) -> lexpr::Value {
        match self {
            Stmt::Expression(expr) => form("expr", vec![expr.to_sexpr()]),
            Stmt::Print { value, .. } => form("print", vec![value.to_sexpr()]),
            Stmt::Var { name, initializer } => {
                let mut rest = vec![symbol(&name.lexeme)];
                if let Some(init) = initializer {
                    rest.push(init.to_sexpr());
                }
                form("var", rest)
            }
            Stmt::Block(stmts) => form("block", stmts.iter().map(Stmt::to_sexpr).collect()),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut rest = vec![condition.to_sexpr(), then_branch.to_sexpr()];
                if let Some(other) = else_branch {
                    rest.push(other.to_sexpr());
                }
                form("if", rest)
            }
            Stmt::While { condition, body } => {
                form("while", vec![condition.to_sexpr(), body.to_sexpr()])
            }
            Stmt::Break(_) => form("break", vec![]),
            Stmt::Return { value, .. } => {
                form("return", value.iter().map(Expr::to_sexpr).collect())
            }
            Stmt::Function(decl) => decl.to_sexpr("fun"),
            Stmt::Class(decl) => {
                let mut rest = vec![symbol(&decl.name.lexeme)];
                if let Some(superclass) = &decl.superclass {
                    rest.push(form("<", vec![superclass.to_sexpr()]));
                }
                rest.extend(decl.methods.iter().map(|m| m.to_sexpr("method")));
                form("class", rest)
            }
        }
    }
}

impl FunctionDecl {
    fn to_sexpr(&self, head: &str) -> lexpr::Value {
        let mut rest = vec![symbol(&self.name.lexeme)];
        if !self.is_getter {
            rest.push(lexpr::Value::list(
                self.params.iter().map(|p| symbol(&p.lexeme)).collect::<Vec<_>>(),
            ));
        }
        rest.extend(self.body.iter().map(Stmt::to_sexpr));
        form(head, rest)
    }
}
