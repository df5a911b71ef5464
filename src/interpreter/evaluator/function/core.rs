use std::{fmt, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, Identifier, PathToNode, SourceRange},
    engine::{
        command::{EngineCommandManager, ModelingCmd, ModelingCommand},
        id::{CommandId, SemanticInput, command_id},
    },
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, extrude, min_max, show, sketch},
            utils::{child_path, extend_lineage, item_for},
        },
        memory::ScopeId,
        value::core::{FunctionValue, MemoryItem, Metadata, Value},
    },
};

/// Type alias for standard library function handlers.
///
/// A handler receives the call context and the evaluated arguments, each with
/// its metadata, and returns the resulting value.
pub type BuiltinFn = fn(&mut CallContext<'_>, &[MemoryItem]) -> EvalResult<Value>;

/// Argument counts a standard library function accepts.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

/// Expands `"name" => { arity, func }` entries into `BUILTIN_TABLE`, which
/// call resolution searches, and `BUILTIN_FUNCTIONS`, the exported name list
/// that `find_unique_name` treats as taken.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "show"                    => { arity: Arity::AtLeast(1), func: show::show },
    "startSketchAt"           => { arity: Arity::Exact(2), func: sketch::start_sketch_at },
    "lineTo"                  => { arity: Arity::OneOf(&[3, 4]), func: sketch::line_to },
    "line"                    => { arity: Arity::OneOf(&[3, 4]), func: sketch::line },
    "close"                   => { arity: Arity::OneOf(&[1, 2]), func: sketch::close },
    "extrude"                 => { arity: Arity::Exact(2), func: extrude::extrude },
    "getExtrudeWallTransform" => { arity: Arity::Exact(2), func: extrude::get_extrude_wall_transform },
    "sqrt"                    => { arity: Arity::Exact(1), func: builtin::sqrt },
    "sin"                     => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"                     => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"                     => { arity: Arity::Exact(1), func: builtin::tan },
    "asin"                    => { arity: Arity::Exact(1), func: builtin::asin },
    "acos"                    => { arity: Arity::Exact(1), func: builtin::acos },
    "atan"                    => { arity: Arity::Exact(1), func: builtin::atan },
    "ln"                      => { arity: Arity::Exact(1), func: builtin::ln },
    "exp"                     => { arity: Arity::Exact(1), func: builtin::exp },
    "abs"                     => { arity: Arity::Exact(1), func: builtin::abs },
    "floor"                   => { arity: Arity::Exact(1), func: builtin::floor },
    "ceil"                    => { arity: Arity::Exact(1), func: builtin::ceil },
    "round"                   => { arity: Arity::Exact(1), func: builtin::round },
    "min"                     => { arity: Arity::Exact(2), func: |call, args| min_max::min_max("min", call, args) },
    "max"                     => { arity: Arity::Exact(2), func: |call, args| min_max::min_max("max", call, args) },
    "pi"                      => { arity: Arity::Exact(0), func: builtin::pi },
}

impl Arity {
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::OneOf(arr) => {
                let options = arr.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}", options.join(" or "))
            },
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Returns `true` if `name` is a standard library function.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

/// Everything a standard library function may touch while it runs.
pub struct CallContext<'a> {
    /// Complete source text of the pass.
    pub code:            &'a str,
    /// Name the function was called by.
    pub name:            &'a str,
    /// Range of the call expression.
    pub source_range:    SourceRange,
    /// AST path of the call expression.
    pub path_to_node:    &'a [usize],
    /// Ranges of the argument expressions, in order.
    pub argument_ranges: &'a [SourceRange],
    /// Receives modeling commands.
    pub engine:          &'a mut dyn EngineCommandManager,
    /// Values recorded by `show`.
    pub shown:           &'a mut Vec<Value>,
}

impl CallContext<'_> {
    /// Metadata entry for the call itself.
    #[must_use]
    pub fn meta(&self) -> Metadata {
        Metadata::new(self.source_range, self.path_to_node.to_vec())
    }

    /// Range of argument `index`, or of the whole call if there is no such
    /// argument. Type errors about an argument point here.
    #[must_use]
    pub fn argument_range(&self, index: usize) -> SourceRange {
        self.argument_ranges
            .get(index)
            .copied()
            .unwrap_or(self.source_range)
    }

    /// Deterministic id for a command issued by this call.
    #[must_use]
    pub fn command_id(&self, inputs: &[SemanticInput<'_>]) -> CommandId {
        command_id(self.code, self.source_range, inputs)
    }

    /// Submits one command tagged with this call's range.
    pub fn submit(&mut self, id: CommandId, cmd: ModelingCmd) {
        debug!(function = self.name, %id, "submitting command");
        self.engine
            .send_modeling_command(ModelingCommand { id,
                                                     range: self.source_range,
                                                     cmd });
    }

    /// Lineage of a value derived from `args`.
    ///
    /// The call's own entry comes first, then the chains of geometry
    /// arguments, then the entries of the remaining arguments. Repeated
    /// entries are kept once.
    #[must_use]
    pub fn lineage(&self, args: &[MemoryItem]) -> Vec<Metadata> {
        let mut chain = vec![self.meta()];
        for arg in args.iter().filter(|arg| !arg.value.geometry_meta().is_empty()) {
            extend_lineage(&mut chain, &arg.meta);
        }
        for arg in args.iter().filter(|arg| arg.value.geometry_meta().is_empty()) {
            extend_lineage(&mut chain, &arg.meta);
        }
        chain
    }

    /// Error for an argument with an unusable value.
    #[must_use]
    pub fn invalid_argument(&self, details: String) -> RuntimeError {
        RuntimeError::InvalidArgument { details,
                                        range: self.source_range }
    }
}

/// A resolved call target.
enum Callee {
    User(Rc<FunctionValue>),
    Builtin(&'static BuiltinDef),
}

impl Context<'_> {
    /// Evaluates a call expression.
    ///
    /// The callee is resolved first: a function value bound in memory wins,
    /// otherwise the standard library table is consulted. Arguments are then
    /// evaluated left to right and the call executes.
    ///
    /// # Errors
    /// - `UnknownFunction` if neither memory nor the standard library has
    ///   the name.
    /// - `TypeMismatch` if memory binds the name to a non-function and no
    ///   standard library function shares it.
    /// - `ArgumentCountMismatch` for a wrong number of arguments.
    pub(crate) fn eval_call(&mut self,
                            callee: &Identifier,
                            arguments: &[Expr],
                            range: SourceRange,
                            scope: ScopeId,
                            path: PathToNode)
                            -> EvalResult<MemoryItem> {
        let target = self.resolve_callee(callee, scope)?;

        let mut args = Vec::with_capacity(arguments.len());
        for (index, argument) in arguments.iter().enumerate() {
            args.push(self.eval(argument, scope, child_path(&path, index))?);
        }

        let meta = Metadata::new(range, path);
        match target {
            Callee::User(function) => self.call_user_function(&callee.name, &function, args, meta),
            Callee::Builtin(builtin) => {
                if !builtin.arity.check(args.len()) {
                    return Err(RuntimeError::ArgumentCountMismatch { name:     callee.name.clone(),
                                                                     expected: builtin.arity
                                                                                      .to_string(),
                                                                     found:    args.len(),
                                                                     range, });
                }
                debug!(function = builtin.name, args = args.len(), "standard library call");

                let argument_ranges = arguments.iter().map(Expr::range).collect::<Vec<_>>();
                let mut call = CallContext { code: self.code,
                                             name: builtin.name,
                                             source_range: range,
                                             path_to_node: &meta.path_to_node,
                                             argument_ranges: &argument_ranges,
                                             engine: &mut *self.engine,
                                             shown: &mut self.shown };
                let value = (builtin.func)(&mut call, &args)?;
                Ok(item_for(value, meta))
            },
        }
    }

    fn resolve_callee(&self, callee: &Identifier, scope: ScopeId) -> EvalResult<Callee> {
        let builtin = BUILTIN_TABLE.iter().find(|b| b.name == callee.name);

        match (self.memory.get(scope, &callee.name), builtin) {
            (Some(MemoryItem { value: Value::Function(function),
                               .. }),
             _) => Ok(Callee::User(Rc::clone(function))),
            (_, Some(builtin)) => Ok(Callee::Builtin(builtin)),
            (Some(item), None) => {
                Err(RuntimeError::TypeMismatch { details: format!("'{}' is a {}, not a function",
                                                                  callee.name,
                                                                  item.value.type_name()),
                                                 range:   callee.range, })
            },
            (None, None) => Err(RuntimeError::UnknownFunction { name:  callee.name.clone(),
                                                                range: callee.range, }),
        }
    }

    /// Executes a user-defined function.
    ///
    /// A fresh scope is created as a child of the scope the function literal
    /// was evaluated in, the parameters are bound there and the body runs
    /// until its `return`.
    ///
    /// # Errors
    /// - Wrong number of arguments.
    /// - Call depth budget exceeded.
    /// - Body finished without `return`.
    fn call_user_function(&mut self,
                          name: &str,
                          function: &FunctionValue,
                          args: Vec<MemoryItem>,
                          meta: Metadata)
                          -> EvalResult<MemoryItem> {
        let range = meta.source_range;
        let params = &function.expression.params;
        if params.len() != args.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: params.len().to_string(),
                                                             found: args.len(),
                                                             range });
        }
        if self.call_depth >= self.settings.max_call_depth {
            return Err(RuntimeError::ResourceExhausted { details: format!("call depth limit of {} exceeded",
                                                                          self.settings
                                                                              .max_call_depth),
                                                         range });
        }

        let scope = self.memory.child_scope(function.scope);
        for (param, arg) in params.iter().zip(args) {
            self.memory.define(scope, &param.name, arg, param.range)?;
        }

        self.call_depth += 1;
        let result = self.execute_function_body(function, scope);
        self.call_depth -= 1;

        let returned = result?.ok_or_else(|| RuntimeError::MissingValue { name: name.to_string(),
                                                                          range })?;
        if !returned.value.geometry_meta().is_empty() {
            return Ok(returned);
        }
        let mut chain = vec![meta];
        extend_lineage(&mut chain, &returned.meta);
        Ok(MemoryItem { value: returned.value,
                        meta:  chain, })
    }
}
