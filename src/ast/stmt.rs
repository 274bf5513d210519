//! Statement nodes for the program AST.

/// Raw expression text captured by the parser, deferred to [`crate::expr`]
/// for tree-building and evaluation at the point the interpreter needs a
/// value. Stored instead of a pre-built tree so loop conditions and similar
/// re-evaluated expressions are always evaluated against their literal
/// source text, matching the separation between parser and expression
/// evaluator described in the design.
#[derive(Debug, Clone)]
pub struct ExprSrc {
    /// The expression's surface text, already trimmed.
    pub text: String,
    /// The 1-based source line the expression appears on.
    pub line: usize,
}

impl ExprSrc {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        ExprSrc {
            text: text.into(),
            line,
        }
    }
}

/// The arithmetic mutation performed by a `MathMut` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Which loop-control signal a `LoopCtrl` statement raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCtrlKind {
    Break,
    Continue,
}

/// One conditional branch: a condition expression and its body.
#[derive(Debug, Clone)]
pub struct IfBranch {
    pub condition: ExprSrc,
    pub body: Vec<Stmt>,
}

/// The kind of a statement, without its line number.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `set X to E` and all its aliases.
    Assign { target: String, expr: ExprSrc },

    /// `say E` and all its aliases.
    Say { expr: ExprSrc },

    /// `ask E and set X to it`-style prompt, binding the typed response to `target`.
    Ask { prompt: ExprSrc, target: String },

    /// `add/subtract/multiply/divide` mutation of a named variable.
    MathMut {
        op: MathOp,
        target: String,
        operand: ExprSrc,
    },

    /// `create list X`.
    ListCreate { target: String },

    /// `remove E from X`.
    ListRemove { target: String, value: ExprSrc },

    /// `if … then` / `otherwise if … then` / `otherwise` chain.
    If {
        branches: Vec<IfBranch>,
        else_body: Option<Vec<Stmt>>,
    },

    /// `repeat N times`.
    RepeatCount { count: ExprSrc, body: Vec<Stmt> },

    /// `repeat while C`.
    RepeatWhile { condition: ExprSrc, body: Vec<Stmt> },

    /// `for each X in E`.
    ForEach {
        var: String,
        iterable: ExprSrc,
        body: Vec<Stmt>,
    },

    /// `define F [with params]` ... `end define`.
    DefineFn {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },

    /// `call F [with args]` used as a statement (return value discarded).
    CallStmt { name: String, args: Vec<ExprSrc> },

    /// `return [E]`.
    Return { expr: Option<ExprSrc> },

    /// `stop` / `skip` (and their aliases).
    LoopCtrl { kind: LoopCtrlKind },

    /// A bare expression used for its side effects (e.g. a built-in call
    /// whose result is unused but isn't written as `call ... with ...`).
    ExprStmt { expr: ExprSrc },
}

/// A statement with its originating line number.
///
/// The line is always the line of the statement's opening keyword, even for
/// block-opening statements whose body spans many following lines.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: usize,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: usize) -> Self {
        Stmt { kind, line }
    }
}

/// A parsed program: an ordered sequence of top-level statements.
pub type Program = Vec<Stmt>;
