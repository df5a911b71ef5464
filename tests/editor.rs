use partscript::{
    ast::{Expr, SourceRange},
    editor::{
        NormalizeOptions, PreviousVariable, Sign, calculate, find_all_previous_variables,
        find_unique_name, is_unique_name, normalize_sign,
    },
    engine::CommandLog,
    interpreter::{
        evaluator::core::execute,
        memory::ProgramMemory,
        settings::ExecutorSettings,
        value::core::{MemoryItem, Metadata, Value},
    },
    parse, run_recorded,
};

fn expr(src: &str) -> Expr {
    parse(src).unwrap().body[0].expression().clone()
}

fn normalized(src: &str, sign: Sign) -> String {
    normalize_sign(expr(src), sign, None, NormalizeOptions::default()).to_string()
}

#[test]
fn negation_wraps_and_collapses() {
    assert_eq!(normalized("x", Sign::Negative), "-x");
    assert_eq!(normalized("-x", Sign::Negative), "x");
    assert_eq!(normalized("--x", Sign::Positive), "x");
    assert_eq!(normalized("a + b", Sign::Negative), "-(a + b)");
    assert_eq!(normalized("-(a + b)", Sign::Negative), "a + b");
}

#[test]
fn negative_literals_fold() {
    assert_eq!(normalized("5", Sign::Negative), "-5");
    assert_eq!(normalized("-5", Sign::Negative), "5");
    assert_eq!(normalized("--5", Sign::Positive), "5");

    let negative_literal = Expr::number(-5.0, SourceRange::new(0, 2));
    let folded = normalize_sign(negative_literal, Sign::Negative, None, NormalizeOptions::default());
    assert!(matches!(folded, Expr::Literal { .. }));
    assert_eq!(folded.to_string(), "5");
}

#[test]
fn normalization_reaches_nested_operands() {
    assert_eq!(normalized("1 + --x * 2", Sign::Positive), "1 + x * 2");
    assert_eq!(normalized("min(--a, b)", Sign::Positive), "min(a, b)");
}

#[test]
fn normalization_is_idempotent() {
    let options = NormalizeOptions::default();
    for src in ["x", "-x", "--x", "---x", "-5", "--5", "-(a + -(-b))", "min(-(-1), 2)"] {
        for sign in [Sign::Positive, Sign::Negative] {
            let once = normalize_sign(expr(src), sign, None, options);
            let twice = normalize_sign(once.clone(), Sign::Positive, None, options);
            assert_eq!(once, twice, "{src} with {sign:?}");
        }
    }
}

#[test]
fn variable_substitution_follows_the_same_rules() {
    let value = expr("-5");
    let range = value.range();

    let positive = normalize_sign(value.clone(), Sign::Positive, Some("len"), NormalizeOptions::default());
    assert_eq!(positive, Expr::identifier("len", range));

    let negative = normalize_sign(value, Sign::Negative, Some("len"), NormalizeOptions::default());
    assert_eq!(negative.to_string(), "-len");
    assert_eq!(negative.range(), range);
}

#[test]
fn options_disable_rewrites() {
    let keep_everything = NormalizeOptions { collapse_double_negation: false,
                                             fold_negative_literals:   false, };
    assert_eq!(normalize_sign(expr("-x"), Sign::Negative, None, keep_everything).to_string(),
               "--x");

    let fold_only = NormalizeOptions { collapse_double_negation: false,
                                       fold_negative_literals:   true, };
    assert_eq!(normalize_sign(expr("-5"), Sign::Negative, None, fold_only).to_string(), "5");
    assert_eq!(normalize_sign(expr("-x"), Sign::Negative, None, fold_only).to_string(), "--x");
}

#[test]
fn sign_from_multiplier() {
    assert_eq!(Sign::from(-1.0), Sign::Negative);
    assert_eq!(Sign::from(1.0), Sign::Positive);
}

#[test]
fn previous_variables_stop_at_the_selection() {
    let code = "const a = 3\nconst name = \"x\"\nconst b = a * 2\nconst c = b + 1\nshow(c)";
    let run = run_recorded(code, Default::default()).unwrap();
    let program = parse(code).unwrap();

    let found = find_all_previous_variables(&program, &run.outcome.memory, code.find("b + 1").unwrap());
    assert_eq!(found.insert_index, 3);
    assert_eq!(found.variables,
               vec![PreviousVariable { key:   "a".to_string(),
                                       value: 3.0, },
                    PreviousVariable { key:   "b".to_string(),
                                       value: 6.0, }]);

    let at_start = find_all_previous_variables(&program, &run.outcome.memory, 0);
    assert_eq!(at_start.insert_index, 0);
    assert!(at_start.variables.is_empty());

    let past_end = find_all_previous_variables(&program, &run.outcome.memory, code.len() + 10);
    assert_eq!(past_end.insert_index, 5);
    assert_eq!(past_end.variables.len(), 3);
}

#[test]
fn unique_names_skip_everything_in_use() {
    let program = parse("const len = 3\nconst f = (len001) => { return len001 }\nshow(len002)").unwrap();

    assert_eq!(find_unique_name(&program, "len"), "len003");
    assert_eq!(find_unique_name(&program, "sqrt"), "sqrt001");
    assert_eq!(find_unique_name(&program, "width"), "width");
    assert_eq!(find_unique_name(&program, ""), "value");
}

#[test]
fn unique_name_check_uses_memory() {
    let run = run_recorded("const a = 1", Default::default()).unwrap();

    assert!(!is_unique_name(&run.outcome.memory, "a"));
    assert!(!is_unique_name(&run.outcome.memory, "extrude"));
    assert!(is_unique_name(&run.outcome.memory, "b"));
}

#[test]
fn scratch_calculation() {
    let variables = [PreviousVariable { key:   "a".to_string(),
                                        value: 3.0, },
                     PreviousVariable { key:   "b".to_string(),
                                        value: 4.0, }];

    let calc = calculate("sqrt(a ^ 2 + b ^ 2)", &variables);
    assert_eq!(calc.result, 5.0);
    assert_eq!(calc.value_node.unwrap().to_string(), "sqrt(a ^ 2 + b ^ 2)");

    let not_a_number = calculate("\"text\"", &variables);
    assert!(not_a_number.result.is_nan());
    assert!(not_a_number.value_node.is_some());

    let broken = calculate("a +", &variables);
    assert!(broken.result.is_nan());
    assert!(broken.value_node.is_none());
}

#[test]
fn scratch_calculation_does_not_touch_authoritative_memory() {
    let code = "const a = 3";
    let run = run_recorded(code, Default::default()).unwrap();
    let before = run.outcome.memory.root_bindings().count();

    let program = parse(code).unwrap();
    let found = find_all_previous_variables(&program, &run.outcome.memory, code.len() + 1);
    let calc = calculate("a * 10", &found.variables);

    assert_eq!(calc.result, 30.0);
    assert_eq!(run.outcome.memory.root_bindings().count(), before);
}

#[test]
fn seeded_values_gain_a_use_site_entry() {
    let code = "const b = a\nconst c = b";
    let program = parse(code).unwrap();
    let memory = ProgramMemory::with_bindings([("a".to_string(),
                                                MemoryItem { value: Value::Number(3.0),
                                                             meta:  Vec::new(), })]);
    let mut engine = CommandLog::default();
    let outcome = execute(&program, code, memory, &mut engine, ExecutorSettings::default()).unwrap();
    let root = outcome.memory.root();

    let b = outcome.memory.get(root, "b").unwrap();
    assert_eq!(b.value, Value::Number(3.0));
    assert_eq!(b.meta, vec![Metadata::new(SourceRange::new(10, 11), vec![0, 0])]);
    assert_eq!(outcome.memory.get(root, "c").unwrap().meta, b.meta);
}

#[test]
fn scratch_calculation_of_a_bare_seed() {
    let variables = [PreviousVariable { key:   "a".to_string(),
                                        value: 3.0, }];
    let calc = calculate("a", &variables);

    assert_eq!(calc.result, 3.0);
    assert_eq!(calc.value_node.unwrap().to_string(), "a");
}
