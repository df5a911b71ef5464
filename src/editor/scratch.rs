use tracing::debug;

use crate::{
    ast::{Expr, PathToNode, Program, Statement},
    editor::query::PreviousVariable,
    engine::CommandLog,
    interpreter::{
        evaluator::{core::execute, utils::child_path},
        memory::ProgramMemory,
        settings::ExecutorSettings,
        value::core::{MemoryItem, Metadata, Value},
    },
    parse,
};

/// Name the scratch pass binds the expression to.
const RESULT_NAME: &str = "__result__";

/// Outcome of a scratch calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// The computed number, `NaN` if the expression failed or is not numeric.
    pub result:     f64,
    /// The parsed expression, `None` if it failed to parse or run.
    pub value_node: Option<Expr>,
}

/// Evaluates `expression` in an isolated pass.
///
/// The expression is bound to a hidden name in a fresh root scope seeded with
/// `variables` as numbers. The authoritative memory is never touched, and
/// any modeling commands issued by the expression are discarded.
///
/// A seed's metadata points at its first reference in the expression, or at
/// the whole expression if it is never referenced.
///
/// # Example
/// ```
/// use partscript::editor::{PreviousVariable, calculate};
///
/// let variables = [PreviousVariable { key:   "a".to_string(),
///                                     value: 3.0, }];
///
/// assert_eq!(calculate("a * 2 + 1", &variables).result, 7.0);
/// assert!(calculate("b * 2", &variables).result.is_nan());
/// ```
#[must_use]
pub fn calculate(expression: &str, variables: &[PreviousVariable]) -> Calculation {
    let code = format!("const {RESULT_NAME} = {expression}\nshow({RESULT_NAME})");
    let failed = Calculation { result:     f64::NAN,
                               value_node: None, };

    let program = match parse(&code) {
        Ok(program) => program,
        Err(e) => {
            debug!(error = %e, "scratch expression did not parse");
            return failed;
        },
    };

    let Some(value_node) = result_node(&program).cloned() else {
        debug!("scratch expression was not bound");
        return failed;
    };

    let memory = ProgramMemory::with_bindings(variables.iter().map(|variable| {
        let meta = first_reference(&value_node, &variable.key, vec![0, 0])
            .unwrap_or_else(|| Metadata::new(value_node.range(), vec![0, 0]));
        (variable.key.clone(), MemoryItem::new(Value::Number(variable.value), meta))
    }));
    let mut engine = CommandLog::default();
    let outcome = match execute(&program, &code, memory, &mut engine, ExecutorSettings::default()) {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(error = %e, "scratch expression failed");
            return failed;
        },
    };

    let result = match outcome.memory.get(outcome.memory.root(), RESULT_NAME) {
        Some(MemoryItem { value: Value::Number(n),
                          .. }) => *n,
        _ => f64::NAN,
    };

    Calculation { result,
                  value_node: Some(value_node) }
}

/// The initializer bound to the hidden result name.
fn result_node(program: &Program) -> Option<&Expr> {
    program.body.iter().find_map(|statement| match statement {
                           Statement::VariableDeclaration { name, value, .. } if name.name == RESULT_NAME => {
                               Some(value)
                           },
                           _ => None,
                       })
}

/// Metadata for the first reference to `name` inside `expr`, whose path is
/// `path`. Function bodies are not searched.
fn first_reference(expr: &Expr, name: &str, path: PathToNode) -> Option<Metadata> {
    match expr {
        Expr::Identifier { name: found, range } if found == name => Some(Metadata::new(*range, path)),
        Expr::BinaryExpression { left, right, .. } => {
            first_reference(left, name, child_path(&path, 0))
                .or_else(|| first_reference(right, name, child_path(&path, 1)))
        },
        Expr::UnaryExpression { argument, .. } => first_reference(argument, name, child_path(&path, 0)),
        Expr::CallExpression { arguments, .. } => {
            arguments.iter()
                     .enumerate()
                     .find_map(|(index, argument)| first_reference(argument, name, child_path(&path, index)))
        },
        _ => None,
    }
}
