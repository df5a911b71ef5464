use std::{fmt, rc::Rc};

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the source text.
///
/// Every AST node carries one of these so that editor tooling can highlight
/// the exact text that produced a node or a runtime value. It serializes as a
/// two element array, `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceRange(pub [usize; 2]);

impl SourceRange {
    /// Creates a range from its start and end byte offsets.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self([start, end])
    }

    /// Start byte offset (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        self.0[0]
    }

    /// End byte offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.0[1]
    }

    /// Returns `true` if the cursor position `pos` touches this range.
    ///
    /// The end offset counts as inside so that a cursor placed right after
    /// the last character still selects the node.
    ///
    /// ## Example
    /// ```
    /// use partscript::ast::SourceRange;
    ///
    /// let range = SourceRange::new(4, 9);
    /// assert!(range.contains(4));
    /// assert!(range.contains(9));
    /// assert!(!range.contains(10));
    /// ```
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        pos >= self.start() && pos <= self.end()
    }

    /// Returns `true` if `other` lies completely inside `self`.
    #[must_use]
    pub const fn encloses(&self, other: Self) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Builds the range spanning from the start of `self` to the end of
    /// `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self::new(self.start(), other.end())
    }

    /// Slices the text covered by this range out of `source`.
    ///
    /// Ranges that do not fall on valid character boundaries of `source`
    /// yield an empty string.
    ///
    /// ## Example
    /// ```
    /// use partscript::ast::SourceRange;
    ///
    /// let source = "const a = 3";
    /// assert_eq!(SourceRange::new(6, 7).slice(source), "a");
    /// ```
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start()..self.end()).unwrap_or_default()
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start(), self.end())
    }
}

/// Ordered child indices that re-locate a node starting from the program
/// root.
///
/// `[i]` is the `i`-th top level statement. The value of a declaration, the
/// expression of an expression statement and the argument of a `return` are
/// child `0` of their statement. Binary operands are `0` (left) and `1`
/// (right), a unary operand is `0`, call argument `j` is `j`, and statement
/// `k` of a function body is `k`.
pub type PathToNode = Vec<usize>;

/// Represents a literal value in the language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    /// A 64-bit floating-point literal. All numbers are floats.
    Number(f64),
    /// A string literal with escapes already resolved.
    String(String),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// A name together with the range it was written at.
///
/// Used for declaration targets and function parameters, where the editor
/// needs the position of the name itself rather than of the whole statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    /// The identifier text.
    pub name:  String,
    /// Where the identifier was written.
    pub range: SourceRange,
}

impl Identifier {
    /// Creates an identifier with the given name and range.
    #[must_use]
    pub fn new(name: &str, range: SourceRange) -> Self {
        Self { name: name.to_string(),
               range }
    }
}

/// A function literal of the form `(a, b) => { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionExpression {
    /// Parameter names in declaration order.
    pub params: Vec<Identifier>,
    /// The statements of the function body.
    pub body:   Vec<Statement>,
    /// Range from the opening parenthesis to the closing brace.
    pub range:  SourceRange,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Each variant models a distinct syntactic construct. Every variant carries
/// the exact source range of its constituent tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    /// A literal value (number, string or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Source range of the literal token.
        range: SourceRange,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name:  String,
        /// Source range of the name.
        range: SourceRange,
    },
    /// A binary operation (addition, comparison, etc.).
    BinaryExpression {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Range from the first token of `left` to the last token of `right`.
        range: SourceRange,
    },
    /// A unary operation (negation or logical not).
    UnaryExpression {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        argument: Box<Self>,
        /// Range from the operator to the end of the operand.
        range:    SourceRange,
    },
    /// Function call expression (e.g. `extrude(5, sketch)`).
    CallExpression {
        /// The called name and its range.
        callee:    Identifier,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Range from the callee to the closing parenthesis.
        range:     SourceRange,
    },
    /// A function literal. Shared so that function values can hold on to it
    /// without copying the body.
    FunctionExpression(Rc<FunctionExpression>),
}

impl Expr {
    /// Gets the source range of the expression.
    ///
    /// ## Example
    /// ```
    /// use partscript::ast::{Expr, SourceRange};
    ///
    /// let expr = Expr::Identifier { name:  "x".to_string(),
    ///                               range: SourceRange::new(5, 6), };
    ///
    /// assert_eq!(expr.range(), SourceRange::new(5, 6));
    /// ```
    #[must_use]
    pub fn range(&self) -> SourceRange {
        match self {
            Self::Literal { range, .. }
            | Self::Identifier { range, .. }
            | Self::BinaryExpression { range, .. }
            | Self::UnaryExpression { range, .. }
            | Self::CallExpression { range, .. } => *range,
            Self::FunctionExpression(function) => function.range,
        }
    }

    /// Builds a number literal.
    #[must_use]
    pub const fn number(value: f64, range: SourceRange) -> Self {
        Self::Literal { value: LiteralValue::Number(value),
                        range }
    }

    /// Builds an identifier reference.
    #[must_use]
    pub fn identifier(name: &str, range: SourceRange) -> Self {
        Self::Identifier { name: name.to_string(),
                           range }
    }

    /// Wraps `argument` in a negation spanning the argument's range.
    #[must_use]
    pub fn negate(argument: Self) -> Self {
        let range = argument.range();
        Self::UnaryExpression { op: UnaryOperator::Neg,
                                argument: Box::new(argument),
                                range }
    }

    /// Height of the expression tree below and including this node.
    ///
    /// A function literal counts as one level above the deepest expression
    /// of its body.
    ///
    /// ## Example
    /// ```
    /// use partscript::ast::{Expr, SourceRange};
    ///
    /// let one = Expr::number(1.0, SourceRange::new(0, 1));
    /// assert_eq!(one.depth(), 1);
    /// assert_eq!(Expr::negate(Expr::negate(one)).depth(), 3);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let below = match self {
            Self::Literal { .. } | Self::Identifier { .. } => 0,
            Self::BinaryExpression { left, right, .. } => left.depth().max(right.depth()),
            Self::UnaryExpression { argument, .. } => argument.depth(),
            Self::CallExpression { arguments, .. } => {
                arguments.iter().map(Self::depth).max().unwrap_or(0)
            },
            Self::FunctionExpression(function) => {
                function.body
                        .iter()
                        .map(|statement| statement.expression().depth())
                        .max()
                        .unwrap_or(0)
            },
        };
        below + 1
    }

    /// Renames every identifier reference and call to `old_name`.
    ///
    /// Function literals that declare a parameter called `old_name` shadow
    /// it, so their bodies are left untouched. A local declaration of
    /// `old_name` shadows it from the next body statement on; its own
    /// initializer still sees the outer name.
    pub fn rename_identifiers(&mut self, old_name: &str, new_name: &str) {
        match self {
            Self::Literal { .. } => {},
            Self::Identifier { name, .. } => {
                if name == old_name {
                    *name = new_name.to_string();
                }
            },
            Self::BinaryExpression { left, right, .. } => {
                left.rename_identifiers(old_name, new_name);
                right.rename_identifiers(old_name, new_name);
            },
            Self::UnaryExpression { argument, .. } => {
                argument.rename_identifiers(old_name, new_name);
            },
            Self::CallExpression { callee, arguments, .. } => {
                if callee.name == old_name {
                    callee.name = new_name.to_string();
                }
                for argument in arguments {
                    argument.rename_identifiers(old_name, new_name);
                }
            },
            Self::FunctionExpression(function) => {
                if function.params.iter().any(|p| p.name == old_name) {
                    return;
                }
                let function = Rc::make_mut(function);
                for statement in &mut function.body {
                    statement.rename_identifiers(old_name, new_name);
                    if matches!(statement,
                                Statement::VariableDeclaration { name, .. } if name.name == old_name)
                    {
                        break;
                    }
                }
            },
        }
    }

    /// Replaces the expression whose range is exactly `range` with
    /// `new_value`. Returns `true` if a replacement happened.
    pub fn replace_value(&mut self, range: SourceRange, new_value: &Self) -> bool {
        if self.range() == range {
            *self = new_value.clone();
            return true;
        }
        if !self.range().encloses(range) {
            return false;
        }
        match self {
            Self::Literal { .. } | Self::Identifier { .. } => false,
            Self::BinaryExpression { left, right, .. } => {
                left.replace_value(range, new_value) || right.replace_value(range, new_value)
            },
            Self::UnaryExpression { argument, .. } => argument.replace_value(range, new_value),
            Self::CallExpression { arguments, .. } => {
                arguments.iter_mut()
                         .any(|argument| argument.replace_value(range, new_value))
            },
            Self::FunctionExpression(function) => {
                Rc::make_mut(function).body
                                      .iter_mut()
                                      .any(|statement| statement.replace_value(range, new_value))
            },
        }
    }

    /// Finds the innermost expression whose range touches `pos`.
    #[must_use]
    pub fn expr_for_position(&self, pos: usize) -> Option<&Self> {
        if !self.range().contains(pos) {
            return None;
        }
        let inner = match self {
            Self::Literal { .. } | Self::Identifier { .. } => None,
            Self::BinaryExpression { left, right, .. } => {
                left.expr_for_position(pos)
                    .or_else(|| right.expr_for_position(pos))
            },
            Self::UnaryExpression { argument, .. } => argument.expr_for_position(pos),
            Self::CallExpression { arguments, .. } => {
                arguments.iter()
                         .find_map(|argument| argument.expr_for_position(pos))
            },
            Self::FunctionExpression(function) => {
                function.body
                        .iter()
                        .find_map(|statement| statement.expr_for_position(pos))
            },
        };
        inner.or(Some(self))
    }
}

/// A statement of a program or of a function body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    /// A declaration such as `const a = 3`.
    VariableDeclaration {
        /// The declaring keyword.
        kind:  VariableKind,
        /// The declared name.
        name:  Identifier,
        /// The initializer expression.
        value: Expr,
        /// Range from the keyword to the end of the initializer.
        range: SourceRange,
    },
    /// A standalone expression evaluated for its side effects or result.
    Expression {
        /// The expression to evaluate.
        expr:  Expr,
        /// Same as the expression's range.
        range: SourceRange,
    },
    /// `return <expr>` inside a function body.
    Return {
        /// The returned expression.
        value: Expr,
        /// Range from the keyword to the end of the value.
        range: SourceRange,
    },
}

impl Statement {
    /// Gets the source range of the statement.
    #[must_use]
    pub const fn range(&self) -> SourceRange {
        match self {
            Self::VariableDeclaration { range, .. }
            | Self::Expression { range, .. }
            | Self::Return { range, .. } => *range,
        }
    }

    /// The single expression child of this statement (path index `0`).
    #[must_use]
    pub const fn expression(&self) -> &Expr {
        match self {
            Self::VariableDeclaration { value, .. } | Self::Return { value, .. } => value,
            Self::Expression { expr, .. } => expr,
        }
    }

    fn expression_mut(&mut self) -> &mut Expr {
        match self {
            Self::VariableDeclaration { value, .. } | Self::Return { value, .. } => value,
            Self::Expression { expr, .. } => expr,
        }
    }

    /// Renames identifier references inside this statement.
    ///
    /// Declared names are not touched; see [`Program::rename_symbol`].
    pub fn rename_identifiers(&mut self, old_name: &str, new_name: &str) {
        self.expression_mut().rename_identifiers(old_name, new_name);
    }

    /// Replaces the expression with the exact range `range` inside this
    /// statement.
    pub fn replace_value(&mut self, range: SourceRange, new_value: &Expr) -> bool {
        self.expression_mut().replace_value(range, new_value)
    }

    /// Finds the innermost expression of this statement touching `pos`.
    #[must_use]
    pub fn expr_for_position(&self, pos: usize) -> Option<&Expr> {
        self.expression().expr_for_position(pos)
    }
}

/// The keyword that introduced a declaration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// `const`
    Const,
    /// `let`
    Let,
    /// `var`
    Var,
    /// `fn`
    Fn,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Const => "const",
                        Self::Let => "let",
                        Self::Var => "var",
                        Self::Fn => "fn",
                    })
    }
}

/// The root of a parsed script.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Top level statements in source order.
    pub body:  Vec<Statement>,
    /// Range covering the whole source text.
    pub range: SourceRange,
}

/// A borrowed view of either kind of AST node, as reached through a
/// [`PathToNode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// A statement.
    Statement(&'a Statement),
    /// An expression.
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    /// Source range of the node.
    #[must_use]
    pub fn range(&self) -> SourceRange {
        match self {
            Self::Statement(statement) => statement.range(),
            Self::Expr(expr) => expr.range(),
        }
    }

    /// Steps to child number `index`, following the [`PathToNode`] rules.
    #[must_use]
    pub fn child(self, index: usize) -> Option<Self> {
        match self {
            Self::Statement(statement) => (index == 0).then(|| Self::Expr(statement.expression())),
            Self::Expr(expr) => match expr {
                Expr::Literal { .. } | Expr::Identifier { .. } => None,
                Expr::BinaryExpression { left, right, .. } => match index {
                    0 => Some(Self::Expr(left)),
                    1 => Some(Self::Expr(right)),
                    _ => None,
                },
                Expr::UnaryExpression { argument, .. } => {
                    (index == 0).then(|| Self::Expr(argument))
                },
                Expr::CallExpression { arguments, .. } => arguments.get(index).map(Self::Expr),
                Expr::FunctionExpression(function) => {
                    function.body.get(index).map(Self::Statement)
                },
            },
        }
    }
}

impl Program {
    /// Re-locates a node from its path.
    ///
    /// ## Example
    /// ```
    /// use partscript::{ast::Node, parse};
    ///
    /// let source = "const a = 1 + 2";
    /// let program = parse(source).unwrap();
    ///
    /// let node = program.node_at_path(&[0, 0, 1]).unwrap();
    /// assert_eq!(node.range().slice(source), "2");
    /// ```
    #[must_use]
    pub fn node_at_path(&self, path: &[usize]) -> Option<Node<'_>> {
        let (first, rest) = path.split_first()?;
        let mut node = Node::Statement(self.body.get(*first)?);
        for index in rest {
            node = node.child(*index)?;
        }
        Some(node)
    }

    /// Returns the top level statement touching `pos` with its body index.
    #[must_use]
    pub fn body_item_for_position(&self, pos: usize) -> Option<(usize, &Statement)> {
        self.body
            .iter()
            .enumerate()
            .find(|(_, statement)| statement.range().contains(pos))
    }

    /// Returns the innermost expression touching `pos`.
    #[must_use]
    pub fn expr_for_position(&self, pos: usize) -> Option<&Expr> {
        let (_, statement) = self.body_item_for_position(pos)?;
        statement.expr_for_position(pos)
    }

    /// Returns the top level declaration of `name`, if any.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Statement> {
        self.body.iter().find(|statement| {
                            matches!(statement,
                                     Statement::VariableDeclaration { name: declared, .. }
                                     if declared.name == name)
                        })
    }

    /// Renames the top level declaration whose name touches `pos`, together
    /// with every reference to it.
    ///
    /// Returns the old name when a declaration was found.
    ///
    /// ## Example
    /// ```
    /// use partscript::parse;
    ///
    /// let mut program = parse("const a = 1\nconst b = a * 2").unwrap();
    /// assert_eq!(program.rename_symbol("width", 6), Some("a".to_string()));
    /// assert_eq!(program.to_string(), "const width = 1\nconst b = width * 2");
    /// ```
    pub fn rename_symbol(&mut self, new_name: &str, pos: usize) -> Option<String> {
        let old_name = self.body.iter_mut().find_map(|statement| match statement {
                                               Statement::VariableDeclaration { name, .. }
                                                   if name.range.contains(pos) =>
                                               {
                                                   let old = name.name.clone();
                                                   name.name = new_name.to_string();
                                                   Some(old)
                                               },
                                               _ => None,
                                           })?;
        for statement in &mut self.body {
            statement.rename_identifiers(&old_name, new_name);
        }
        Some(old_name)
    }

    /// Replaces the expression whose range is exactly `range`.
    pub fn replace_value(&mut self, range: SourceRange, new_value: &Expr) -> bool {
        self.body
            .iter_mut()
            .any(|statement| statement.replace_value(range, new_value))
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// Addition (`+`), also string concatenation.
    #[serde(rename = "+")]
    Add,
    /// Subtraction (`-`)
    #[serde(rename = "-")]
    Sub,
    /// Multiplication (`*`)
    #[serde(rename = "*")]
    Mul,
    /// Division (`/`)
    #[serde(rename = "/")]
    Div,
    /// Remainder (`%`)
    #[serde(rename = "%")]
    Mod,
    /// Exponentiation (`^`)
    #[serde(rename = "^")]
    Pow,
    /// Equal to (`==`)
    #[serde(rename = "==")]
    Eq,
    /// Not equal to (`!=`)
    #[serde(rename = "!=")]
    Neq,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    Gte,
    /// Less than (`<`)
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    Lte,
}

impl BinaryOperator {
    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Eq | Self::Neq | Self::Gt | Self::Gte | Self::Lt | Self::Lte => 1,
            Self::Add | Self::Sub => 2,
            Self::Mul | Self::Div | Self::Mod => 3,
            Self::Pow => 4,
        }
    }

    /// `^` is the only right associative operator.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    #[serde(rename = "-")]
    Neg,
    /// Logical NOT (e.g. `!x`).
    #[serde(rename = "!")]
    Not,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neg => f.write_str("-"),
            Self::Not => f.write_str("!"),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write_number(f, *n),
            Self::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            },
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Writes whole numbers without a trailing `.0`.
pub(crate) fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{n:.0}")
    } else {
        write!(f, "{n}")
    }
}

/// Recasts an expression back into source text, adding parentheses only where
/// precedence requires them.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Identifier { name, .. } => f.write_str(name),
            Self::BinaryExpression { op, left, right, .. } => {
                write_operand(f, left, *op, false)?;
                write!(f, " {op} ")?;
                write_operand(f, right, *op, true)
            },
            Self::UnaryExpression { op, argument, .. } => match argument.as_ref() {
                Self::BinaryExpression { .. } => write!(f, "{op}({argument})"),
                _ => write!(f, "{op}{argument}"),
            },
            Self::CallExpression { callee, arguments, .. } => {
                write!(f, "{}(", callee.name)?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            },
            Self::FunctionExpression(function) => {
                f.write_str("(")?;
                for (index, param) in function.params.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&param.name)?;
                }
                f.write_str(") => {")?;
                for statement in &function.body {
                    write!(f, "\n  {statement}")?;
                }
                f.write_str("\n}")
            },
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>,
                 operand: &Expr,
                 parent: BinaryOperator,
                 is_right: bool)
                 -> fmt::Result {
    let needs_parens = match operand {
        Expr::BinaryExpression { op, .. } => {
            op.precedence() < parent.precedence()
            || (op.precedence() == parent.precedence()
                && is_right != parent.is_right_associative())
        },
        Expr::FunctionExpression(_) => true,
        _ => false,
    };
    if needs_parens {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VariableDeclaration { kind, name, value, .. } => {
                write!(f, "{kind} {} = {value}", name.name)
            },
            Self::Expression { expr, .. } => write!(f, "{expr}"),
            Self::Return { value, .. } => write!(f, "return {value}"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, statement) in self.body.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
