use std::rc::Rc;

use tracing::{debug, info};

use crate::{
    ast::{Expr, PathToNode, Program, SourceRange, Statement},
    engine::command::EngineCommandManager,
    error::RuntimeError,
    interpreter::{
        evaluator::utils::child_path,
        memory::{ProgramMemory, ScopeId},
        settings::ExecutorSettings,
        value::core::{FunctionValue, MemoryItem, Metadata, Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// What a completed pass leaves behind.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    /// Program Memory after the last statement.
    pub memory: ProgramMemory,
    /// Value of the trailing top level statement, if it produced one.
    pub last:   Option<MemoryItem>,
    /// Every value passed to `show`, in call order.
    pub shown:  Vec<Value>,
}

/// How a statement finished.
pub(crate) enum Completion {
    /// Execution continues with the next statement.
    Normal(Option<MemoryItem>),
    /// A `return` was executed.
    Return(MemoryItem),
}

/// Stores the runtime evaluation context of one pass.
///
/// This struct holds the interpreter state: Program Memory, the engine that
/// receives modeling commands, and the step and call depth budgets.
///
/// ## Usage
///
/// A `Context` lives for exactly one pass. [`execute`] creates one, walks the
/// program in source order and hands the memory back in an [`ExecOutcome`].
pub struct Context<'a> {
    /// Complete source text, hashed into command ids.
    pub(crate) code:       &'a str,
    /// Program Memory of the pass.
    pub(crate) memory:     ProgramMemory,
    /// Receives every modeling command.
    pub(crate) engine:     &'a mut dyn EngineCommandManager,
    /// Budgets.
    pub(crate) settings:   ExecutorSettings,
    /// Statements and expressions evaluated so far.
    pub(crate) steps:      usize,
    /// Number of user function frames currently active.
    pub(crate) call_depth: usize,
    /// Number of expressions currently being evaluated.
    pub(crate) depth:      usize,
    /// Values recorded by `show`.
    pub(crate) shown:      Vec<Value>,
}

/// Runs `program` against `memory`.
///
/// Statements execute strictly in source order. The first failure aborts the
/// pass; the memory is dropped together with the error, so a later pass never
/// sees half-defined bindings.
///
/// # Parameters
/// - `program`: The parsed program.
/// - `code`: The source text `program` was parsed from.
/// - `memory`: Initial memory, possibly seeded by the host.
/// - `engine`: Receives every modeling command.
/// - `settings`: Step, call depth and expression depth budgets.
///
/// # Returns
/// The final memory, the value of the trailing statement, and the values
/// recorded by `show`.
///
/// # Example
/// ```
/// use partscript::{
///     engine::CommandLog,
///     interpreter::{
///         evaluator::core::execute, memory::ProgramMemory, settings::ExecutorSettings,
///         value::core::Value,
///     },
///     parse,
/// };
///
/// let code = "const a = 3\nconst b = a + 4\nshow(b)";
/// let program = parse(code).unwrap();
/// let mut engine = CommandLog::default();
///
/// let outcome = execute(&program,
///                       code,
///                       ProgramMemory::new(),
///                       &mut engine,
///                       ExecutorSettings::default()).unwrap();
///
/// assert_eq!(outcome.shown, vec![Value::Number(7.0)]);
/// ```
pub fn execute(program: &Program,
               code: &str,
               memory: ProgramMemory,
               engine: &mut dyn EngineCommandManager,
               settings: ExecutorSettings)
               -> EvalResult<ExecOutcome> {
    let mut context = Context { code,
                                memory,
                                engine,
                                settings,
                                steps: 0,
                                call_depth: 0,
                                depth: 0,
                                shown: Vec::new() };
    info!(statements = program.body.len(), "execution started");

    let root = context.memory.root();
    let mut last = None;
    for (index, statement) in program.body.iter().enumerate() {
        match context.execute_statement(statement, root, &[index])? {
            Completion::Normal(item) => last = item,
            Completion::Return(item) => {
                last = Some(item);
                break;
            },
        }
    }

    info!(steps = context.steps, "execution finished");
    Ok(ExecOutcome { memory: context.memory,
                     last,
                     shown: context.shown })
}

impl Context<'_> {
    /// Charges one step against the budget.
    ///
    /// # Errors
    /// `ResourceExhausted` carrying `range` once the budget is spent.
    pub(crate) fn step(&mut self, range: SourceRange) -> EvalResult<()> {
        self.steps += 1;
        if self.steps > self.settings.max_steps {
            return Err(RuntimeError::ResourceExhausted { details: format!("step limit of {} exceeded",
                                                                          self.settings
                                                                              .max_steps),
                                                         range });
        }
        Ok(())
    }

    /// Evaluates a single statement.
    ///
    /// Handles variable declarations, `return` and plain expression
    /// statements.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    /// - `scope`: Scope to resolve names in and to bind declarations into.
    /// - `path`: AST path of the statement.
    ///
    /// # Returns
    /// A [`Completion`] carrying the statement's value.
    pub(crate) fn execute_statement(&mut self,
                                    statement: &Statement,
                                    scope: ScopeId,
                                    path: &[usize])
                                    -> EvalResult<Completion> {
        self.step(statement.range())?;
        debug!(range = %statement.range(), ?path, "statement");

        match statement {
            Statement::VariableDeclaration { name, value, range, .. } => {
                self.memory.ensure_unbound(scope, &name.name, *range)?;
                let item = self.eval(value, scope, child_path(path, 0))?;
                self.memory.define(scope, &name.name, item.clone(), *range)?;
                Ok(Completion::Normal(Some(item)))
            },
            Statement::Expression { expr, .. } => {
                let item = self.eval(expr, scope, child_path(path, 0))?;
                Ok(Completion::Normal(Some(item)))
            },
            Statement::Return { value, .. } => {
                Ok(Completion::Return(self.eval(value, scope, child_path(path, 0))?))
            },
        }
    }

    /// Runs the body of `function` in `scope` until a `return`.
    ///
    /// Returns `None` if the body ends without returning.
    pub(crate) fn execute_function_body(&mut self,
                                        function: &FunctionValue,
                                        scope: ScopeId)
                                        -> EvalResult<Option<MemoryItem>> {
        for (index, statement) in function.expression.body.iter().enumerate() {
            let path = child_path(&function.path, index);
            if let Completion::Return(item) = self.execute_statement(statement, scope, &path)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Evaluates an expression and returns the resulting value together with
    /// its metadata.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: literals,
    /// identifiers, unary and binary operations, calls and function literals.
    /// Operands and arguments are always evaluated left to right.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `scope`: Scope to resolve identifiers in.
    /// - `path`: AST path of `expr`.
    ///
    /// # Returns
    /// The value and at least one metadata entry linking it to the source.
    ///
    /// # Errors
    /// `ResourceExhausted` once the step budget or the depth budget is spent.
    pub(crate) fn eval(&mut self,
                       expr: &Expr,
                       scope: ScopeId,
                       path: PathToNode)
                       -> EvalResult<MemoryItem> {
        self.step(expr.range())?;
        if self.depth >= self.settings.max_depth {
            return Err(RuntimeError::ResourceExhausted { details: format!("expression depth limit of {} exceeded",
                                                                          self.settings
                                                                              .max_depth),
                                                         range:   expr.range(), });
        }

        self.depth += 1;
        let result = self.eval_expr(expr, scope, path);
        self.depth -= 1;
        result
    }

    fn eval_expr(&mut self,
                 expr: &Expr,
                 scope: ScopeId,
                 path: PathToNode)
                 -> EvalResult<MemoryItem> {
        match expr {
            Expr::Literal { value, range } => {
                Ok(MemoryItem::new(value.into(), Metadata::new(*range, path)))
            },
            Expr::Identifier { name, range } => {
                let mut item = self.memory.lookup(scope, name, *range)?.clone();
                // Host seeded bindings may arrive without a source.
                if item.meta.is_empty() {
                    item.meta.push(Metadata::new(*range, path));
                }
                Ok(item)
            },
            Expr::BinaryExpression { op,
                                     left,
                                     right,
                                     range, } => {
                let left = self.eval(left, scope, child_path(&path, 0))?;
                let right = self.eval(right, scope, child_path(&path, 1))?;
                let value = Self::eval_binary(*op, &left.value, &right.value, *range)?;
                Ok(MemoryItem::new(value, Metadata::new(*range, path)))
            },
            Expr::UnaryExpression { op, argument, range } => {
                let argument = self.eval(argument, scope, child_path(&path, 0))?;
                let value = Self::eval_unary(*op, &argument.value, *range)?;
                Ok(MemoryItem::new(value, Metadata::new(*range, path)))
            },
            Expr::CallExpression { callee,
                                   arguments,
                                   range, } => self.eval_call(callee, arguments, *range, scope, path),
            Expr::FunctionExpression(function) => {
                let meta = Metadata::new(function.range, path.clone());
                let value = FunctionValue { expression: Rc::clone(function),
                                            path,
                                            scope };
                Ok(MemoryItem::new(Value::Function(Rc::new(value)), meta))
            },
        }
    }
}
