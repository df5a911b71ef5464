use std::fs;

use partscript::{
    ast::SourceRange,
    engine::CommandLog,
    error::{Error, RuntimeError},
    interpreter::{settings::ExecutorSettings, value::core::Value},
    run, run_recorded,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run_recorded(&code, Default::default()) {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {:?}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```partscript") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn shown(src: &str) -> Vec<Value> {
    match run_recorded(src, Default::default()) {
        Ok(run) => run.outcome.shown,
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_shows(src: &str, expected: impl Into<Value>) {
    assert_eq!(shown(src), vec![expected.into()], "script: {src}");
}

fn runtime_error(src: &str) -> RuntimeError {
    match run_recorded(src, Default::default()) {
        Err(Error::Runtime(e)) => e,
        Err(e) => panic!("Expected a runtime error, got: {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

#[test]
fn declaration_and_basic_arithmetic() {
    assert_shows("const x = 1 + 2\nshow(x)", 3.0);
    assert_shows("const x = 7 * 9\nshow(x)", 63.0);
    assert_shows("const x = 8 - 5\nshow(x)", 3.0);
    assert_shows("const x = 10 / 4\nshow(x)", 2.5);
    assert_shows("let x = 10 % 4\nshow(x)", 2.0);
    assert_shows("var x = 2 ^ 3 ^ 2\nshow(x)", 512.0);
}

#[test]
fn precedence_and_grouping() {
    assert_shows("show(1 + 2 * 3)", 7.0);
    assert_shows("show((1 + 2) * 3)", 9.0);
    assert_shows("show(-2 ^ 2)", 4.0);
    assert_shows("show(10 - 4 - 3)", 3.0);
    assert_shows("show(2 * 3 > 5)", true);
}

#[test]
fn strings_and_comparisons() {
    assert_shows(r#"show("part" + '-' + "a")"#, "part-a".to_string());
    assert_shows(r#"show("a" == 'a')"#, true);
    assert_shows("show(2 <= 2)", true);
    assert_shows("show(3 != 3)", false);
    assert_shows("show(!false)", true);
    assert_shows("show(true == false)", false);
}

#[test]
fn show_records_every_argument() {
    assert_eq!(shown("show(1, 2, 3)"),
               vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
    assert_shows("const a = show(4)\nconst b = a * 2\nshow(b)", 8.0);
}

#[test]
fn builtin_math_functions() {
    assert_shows("show(sqrt(9))", 3.0);
    assert_shows("show(sin(0))", 0.0);
    assert_shows("show(abs(-5))", 5.0);
    assert_shows("show(round(3.7))", 4.0);
    assert_shows("show(floor(3.7) + ceil(3.2))", 7.0);
    assert_shows("show(min(2, 5) + max(2, 5))", 7.0);
    assert_shows("show(pi() > 3.14)", true);
}

#[test]
fn user_defined_functions() {
    assert_shows("fn square = (x) => { return x * x }\nshow(square(3))", 9.0);
    assert_shows("const add = (a, b) => {\n  const sum = a + b\n  return sum\n}\nshow(add(2, 5))",
                 7.0);
}

#[test]
fn functions_capture_their_defining_scope() {
    let src = "const offset = 10\n\
               const makeAdder = (n) => {\n  \
                 return (x) => { return x + n + offset }\n\
               }\n\
               const addTwo = makeAdder(2)\n\
               show(addTwo(1))";
    assert_shows(src, 13.0);
}

#[test]
fn function_parameters_shadow_outer_bindings() {
    assert_shows("const x = 100\nconst f = (x) => { return x + 1 }\nshow(f(1))", 2.0);
    assert_shows("const x = 100\nconst f = (y) => {\n  const x = 5\n  return x + y\n}\nshow(f(1) + x)",
                 106.0);
}

#[test]
fn function_locals_do_not_leak() {
    let e = runtime_error("const f = () => {\n  const inner = 1\n  return inner\n}\nf()\nshow(inner)");
    assert!(matches!(e, RuntimeError::UndefinedVariable { ref name, .. } if name == "inner"));
}

#[test]
fn function_value_shadows_standard_library() {
    assert_shows("const sqrt = (x) => { return 42 }\nshow(sqrt(4))", 42.0);
    assert_shows("const sqrt = 1\nshow(sqrt(4) + sqrt)", 3.0);
}

#[test]
fn test_script_file() {
    let script = fs::read_to_string("tests/example.part").expect("missing file");
    let run = run_recorded(&script, Default::default()).expect("script failed");
    assert!(!run.commands.is_empty());
}

#[test]
fn division_by_zero_is_error() {
    assert!(matches!(runtime_error("const x = 1 / 0"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn mismatched_types_are_errors() {
    assert!(matches!(runtime_error("const x = 1 + \"a\""), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("const x = -true"), RuntimeError::TypeMismatch { .. }));
    assert!(matches!(runtime_error("const x = 2\nx(1)"), RuntimeError::TypeMismatch { .. }));
}

#[test]
fn unknown_function_is_error() {
    let e = runtime_error("const x = frobnicate(1)");
    assert_eq!(e,
               RuntimeError::UnknownFunction { name:  "frobnicate".to_string(),
                                               range: SourceRange::new(10, 20), });
}

#[test]
fn wrong_argument_count_is_error() {
    assert!(matches!(runtime_error("sqrt(1, 2)"), RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(runtime_error("const f = (a) => { return a }\nf()"),
                     RuntimeError::ArgumentCountMismatch { .. }));
}

#[test]
fn function_without_return_is_error() {
    assert!(matches!(runtime_error("const f = () => { const a = 1 }\nf()"),
                     RuntimeError::MissingValue { .. }));
}

#[test]
fn step_budget_is_enforced() {
    let mut engine = CommandLog::default();
    let settings = ExecutorSettings { max_steps: 5,
                                      ..Default::default() };
    let result = run("const a = 1 + 2 + 3 + 4 + 5", &mut engine, settings);
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::ResourceExhausted { .. }))));
}

#[test]
fn runaway_recursion_is_stopped() {
    let e = runtime_error("const f = (n) => { return f(n + 1) }\nf(0)");
    assert!(matches!(e, RuntimeError::ResourceExhausted { .. }));
}

#[test]
fn expression_depth_budget_is_enforced() {
    let mut engine = CommandLog::default();
    let settings = ExecutorSettings { max_depth: 5,
                                      ..Default::default() };
    let src = "const a = -(-(-(-(-(-1)))))";
    let result = run(src, &mut engine, settings);

    match result {
        Err(Error::Runtime(RuntimeError::ResourceExhausted { range, .. })) => {
            assert_eq!(range.slice(src), "-1");
        },
        other => panic!("Expected the depth budget to run out, got: {other:?}"),
    }
}

#[test]
fn deep_expressions_within_the_budget_evaluate() {
    let src = format!("const a = {}1", "-".repeat(60));
    let run = run_recorded(&src, Default::default()).unwrap();

    assert_eq!(run.outcome.memory.get(run.outcome.memory.root(), "a").unwrap().value,
               Value::Number(1.0));
}

#[test]
fn deeply_nested_scripts_fail_without_crashing() {
    let src = format!("const a = {}1{}", "(".repeat(5_000), ")".repeat(5_000));
    assert!(matches!(run_recorded(&src, Default::default()), Err(Error::Parse(_))));
}

#[test]
fn scenario_simple_bindings() {
    let run = run_recorded("const a = 3\nconst b = a + 4\nshow(b)", Default::default()).unwrap();
    let memory = &run.outcome.memory;
    let root = memory.root();

    assert_eq!(memory.get(root, "a").unwrap().value, Value::Number(3.0));
    assert_eq!(memory.get(root, "b").unwrap().value, Value::Number(7.0));
    assert_eq!(run.outcome.shown, vec![Value::Number(7.0)]);
    assert!(run.commands.is_empty());
}

#[test]
fn scenario_duplicate_binding() {
    let src = "const a = 1\nconst a = 2\nshow(a)";
    let mut engine = CommandLog::default();
    let err = run(src, &mut engine, Default::default()).unwrap_err();

    assert_eq!(err,
               Error::Runtime(RuntimeError::DuplicateBinding { name:  "a".to_string(),
                                                               range: SourceRange::new(12, 23), }));
    assert_eq!(err.source_range().slice(src), "const a = 2");
}

#[test]
fn statements_after_a_failure_do_not_run() {
    let mut engine = CommandLog::default();
    let result = run("const a = 1\nconst a = 2\nstartSketchAt(0, 0)", &mut engine, Default::default());

    assert!(result.is_err());
    assert!(engine.is_empty());
}

#[test]
fn duplicate_declaration_does_not_reach_the_engine() {
    let src = "const s = startSketchAt(0, 0)
const s = startSketchAt(1, 1)";
    let mut engine = CommandLog::default();
    let err = run(src, &mut engine, Default::default()).unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::DuplicateBinding { .. })));
    assert_eq!(err.source_range().slice(src), "const s = startSketchAt(1, 1)");
    assert_eq!(engine.commands().len(), 2);
}

#[test]
fn scenario_undefined_variable() {
    let src = "show(unknown)";
    let e = runtime_error(src);

    assert_eq!(e,
               RuntimeError::UndefinedVariable { name:  "unknown".to_string(),
                                                 range: SourceRange::new(5, 12), });
    assert_eq!(e.source_range().slice(src), "unknown");
}

#[test]
fn re_execution_is_idempotent() {
    let src = "const s1 = startSketchAt(0, 0)\n\
               const s2 = lineTo(4, 0, s1, \"bottom\")\n\
               const s3 = line(0, 3, s2, \"right\")\n\
               const s4 = close(lineTo(0, 3, s3))\n\
               const part = extrude(2, s4)";
    let first = run_recorded(src, Default::default()).unwrap();
    let second = run_recorded(src, Default::default()).unwrap();

    assert_eq!(first.commands.len(), second.commands.len());
    for (a, b) in first.commands.iter().zip(&second.commands) {
        assert_eq!(a.id, b.id);
    }
}
