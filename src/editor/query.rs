use std::collections::HashSet;

use serde::Serialize;

use crate::{
    ast::{Expr, Program, Statement},
    interpreter::{evaluator::function::core::is_builtin, memory::ProgramMemory, value::core::Value},
};

/// A numeric top level binding that precedes the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviousVariable {
    /// The bound name.
    pub key:   String,
    /// Its current value.
    pub value: f64,
}

/// Result of [`find_all_previous_variables`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousVariables {
    /// Bindings in declaration order.
    pub variables:    Vec<PreviousVariable>,
    /// Body index a new declaration should be inserted at so that it can be
    /// used at the cursor.
    pub insert_index: usize,
}

/// Enumerates the numeric variables a value at `selection` may refer to.
///
/// The insertion index is the body item containing `selection`, or the first
/// item starting after it, or the end of the program. Every top level
/// declaration before that index whose binding in `memory` is a number is
/// reported. The executor is not re-run.
///
/// # Example
/// ```
/// use partscript::{editor::find_all_previous_variables, run_recorded};
///
/// let code = "const a = 3\nconst s = \"text\"\nconst b = a + 4\nshow(b)";
/// let run = run_recorded(code, Default::default()).unwrap();
/// let program = partscript::parse(code).unwrap();
///
/// let found = find_all_previous_variables(&program, &run.outcome.memory, code.find("show").unwrap());
/// assert_eq!(found.insert_index, 3);
/// assert_eq!(found.variables.iter().map(|v| v.key.as_str()).collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[must_use]
pub fn find_all_previous_variables(program: &Program,
                                   memory: &ProgramMemory,
                                   selection: usize)
                                   -> PreviousVariables {
    let insert_index = program.body_item_for_position(selection)
                              .map(|(index, _)| index)
                              .or_else(|| {
                                  program.body
                                         .iter()
                                         .position(|statement| statement.range().start() >= selection)
                              })
                              .unwrap_or(program.body.len());

    let root = memory.root();
    let variables = program.body[..insert_index].iter()
                                                .filter_map(|statement| match statement {
                                                    Statement::VariableDeclaration { name, .. } => {
                                                        let item = memory.get(root, &name.name)?;
                                                        numeric(&item.value).map(|value| {
                                                                                PreviousVariable { key: name.name.clone(),
                                                                                                   value }
                                                                            })
                                                    },
                                                    _ => None,
                                                })
                                                .collect();

    PreviousVariables { variables,
                        insert_index }
}

/// Numbers, and opaque host values holding a number.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::UserVal(json) => json.as_f64(),
        _ => None,
    }
}

/// Suggests a name starting with `prefix` that nothing in `program` uses.
///
/// Returns `prefix` itself when free, otherwise the first free name of
/// `prefix001`, `prefix002`, ... . Standard library names count as taken. An
/// empty prefix is treated as `value`.
///
/// # Example
/// ```
/// use partscript::{editor::find_unique_name, parse};
///
/// let program = parse("const len = 3\nconst len001 = len * 2").unwrap();
/// assert_eq!(find_unique_name(&program, "len"), "len002");
/// assert_eq!(find_unique_name(&program, "width"), "width");
/// ```
#[must_use]
pub fn find_unique_name(program: &Program, prefix: &str) -> String {
    let prefix = if prefix.is_empty() { "value" } else { prefix };

    let mut taken = HashSet::new();
    for statement in &program.body {
        collect_statement_names(statement, &mut taken);
    }
    let is_free = |name: &str| !taken.contains(name) && !is_builtin(name);

    if is_free(prefix) {
        return prefix.to_string();
    }
    (1_usize..).map(|index| format!("{prefix}{index:03}"))
               .find(|name| is_free(name))
               .unwrap_or_else(|| prefix.to_string())
}

/// Returns `true` if `name` is neither bound in the root of `memory` nor a
/// standard library function.
#[must_use]
pub fn is_unique_name(memory: &ProgramMemory, name: &str) -> bool {
    memory.get(memory.root(), name).is_none() && !is_builtin(name)
}

fn collect_statement_names(statement: &Statement, names: &mut HashSet<String>) {
    if let Statement::VariableDeclaration { name, .. } = statement {
        names.insert(name.name.clone());
    }
    collect_expr_names(statement.expression(), names);
}

fn collect_expr_names(expr: &Expr, names: &mut HashSet<String>) {
    match expr {
        Expr::Literal { .. } => {},
        Expr::Identifier { name, .. } => {
            names.insert(name.clone());
        },
        Expr::BinaryExpression { left, right, .. } => {
            collect_expr_names(left, names);
            collect_expr_names(right, names);
        },
        Expr::UnaryExpression { argument, .. } => collect_expr_names(argument, names),
        Expr::CallExpression { callee, arguments, .. } => {
            names.insert(callee.name.clone());
            for argument in arguments {
                collect_expr_names(argument, names);
            }
        },
        Expr::FunctionExpression(function) => {
            names.extend(function.params.iter().map(|param| param.name.clone()));
            for statement in &function.body {
                collect_statement_names(statement, names);
            }
        },
    }
}
