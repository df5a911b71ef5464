use partscript::{
    ast::{BinaryOperator, Expr, Node, Program, SourceRange, Statement, UnaryOperator},
    error::{Error, LexError, ParseError},
    interpreter::parser::stream::{MAX_EXPRESSION_DEPTH, MAX_NESTING_DEPTH},
    parse,
};

fn parse_ok(src: &str) -> Program {
    parse(src).unwrap_or_else(|e| panic!("failed to parse {src:?}: {e}"))
}

/// Visits every expression of a statement list depth first.
fn walk_statements<'a>(body: &'a [Statement], visit: &mut dyn FnMut(&'a Expr)) {
    for statement in body {
        walk_expr(statement.expression(), visit);
    }
}

fn walk_expr<'a>(expr: &'a Expr, visit: &mut dyn FnMut(&'a Expr)) {
    visit(expr);
    match expr {
        Expr::Literal { .. } | Expr::Identifier { .. } => {},
        Expr::BinaryExpression { left, right, .. } => {
            walk_expr(left, visit);
            walk_expr(right, visit);
        },
        Expr::UnaryExpression { argument, .. } => walk_expr(argument, visit),
        Expr::CallExpression { arguments, .. } => {
            for argument in arguments {
                walk_expr(argument, visit);
            }
        },
        Expr::FunctionExpression(function) => walk_statements(&function.body, visit),
    }
}

const SAMPLE: &str = "const a = 3 // width\n\
                      let b = -(a + 4) * 2 ^ 3\n\
                      fn area = (w, h) => {\n  return w * h\n}\n\
                      /* call it */ show(area(a, b), \"done\", a >= b)";

#[test]
fn parsing_is_deterministic() {
    assert_eq!(parse_ok(SAMPLE), parse_ok(SAMPLE));
}

#[test]
fn every_range_reconstructs_its_source() {
    let program = parse_ok(SAMPLE);
    let mut count = 0;

    walk_statements(&program.body, &mut |expr| {
        count += 1;
        let text = expr.range().slice(SAMPLE);
        match expr {
            Expr::Literal { .. } => {
                assert!(text.parse::<f64>().is_ok() || text.starts_with('"'), "{text}")
            },
            Expr::Identifier { name, .. } => assert_eq!(text, name),
            Expr::CallExpression { callee, .. } => {
                assert!(text.starts_with(&callee.name) && text.ends_with(')'), "{text}");
                assert_eq!(callee.range.slice(SAMPLE), callee.name);
            },
            Expr::FunctionExpression(_) => {
                assert!(text.starts_with('(') && text.ends_with('}'), "{text}")
            },
            Expr::BinaryExpression { .. } | Expr::UnaryExpression { .. } => {
                assert_eq!(parse_ok(text).body.len(), 1, "{text}");
            },
        }
    });

    assert!(count > 15);
    assert_eq!(program.body[0].range().slice(SAMPLE), "const a = 3");
    assert_eq!(program.body[1].range().slice(SAMPLE), "let b = -(a + 4) * 2 ^ 3");
}

#[test]
fn parentheses_belong_to_the_enclosing_node() {
    let src = "(1 + 2) * 3";
    let program = parse_ok(src);
    let Expr::BinaryExpression { left, range, .. } = program.body[0].expression() else {
        panic!("expected a binary expression");
    };

    assert_eq!(range.slice(src), "(1 + 2) * 3");
    assert_eq!(left.range().slice(src), "1 + 2");
}

#[test]
fn operators_follow_precedence() {
    let program = parse_ok("1 + 2 * 3 == 7");
    let Expr::BinaryExpression { op, left, .. } = program.body[0].expression() else {
        panic!("expected a comparison");
    };
    assert_eq!(*op, BinaryOperator::Eq);

    let Expr::BinaryExpression { op, right, .. } = left.as_ref() else {
        panic!("expected an addition");
    };
    assert_eq!(*op, BinaryOperator::Add);
    assert!(matches!(right.as_ref(), Expr::BinaryExpression { op: BinaryOperator::Mul, .. }));
}

#[test]
fn exponent_is_right_associative() {
    let src = "2 ^ 3 ^ 2";
    let program = parse_ok(src);
    let Expr::BinaryExpression { left, right, .. } = program.body[0].expression() else {
        panic!("expected a power");
    };

    assert_eq!(left.range().slice(src), "2");
    assert_eq!(right.range().slice(src), "3 ^ 2");
}

#[test]
fn unary_operators_nest() {
    let program = parse_ok("--x");
    let Expr::UnaryExpression { op, argument, .. } = program.body[0].expression() else {
        panic!("expected a negation");
    };

    assert_eq!(*op, UnaryOperator::Neg);
    assert!(matches!(argument.as_ref(), Expr::UnaryExpression { op: UnaryOperator::Neg, .. }));
}

#[test]
fn paths_locate_nodes() {
    let program = parse_ok(SAMPLE);

    let Some(Node::Expr(Expr::Identifier { name, .. })) = program.node_at_path(&[1, 0, 0, 0, 0]) else {
        panic!("expected the identifier inside the negation");
    };
    assert_eq!(name, "a");

    let Some(Node::Statement(Statement::Return { range, .. })) = program.node_at_path(&[2, 0, 0]) else {
        panic!("expected the return statement of the function body");
    };
    assert_eq!(range.slice(SAMPLE), "return w * h");

    let node = program.node_at_path(&[3, 0, 0, 1]).unwrap();
    assert_eq!(node.range().slice(SAMPLE), "b");

    assert!(program.node_at_path(&[9]).is_none());
    assert!(program.node_at_path(&[0, 0, 0]).is_none());
}

#[test]
fn display_round_trips_through_the_parser() {
    let program = parse_ok(SAMPLE);
    let printed = program.to_string();

    let reparsed = parse_ok(&printed);
    assert_eq!(reparsed.to_string(), printed);
}

#[test]
fn position_queries() {
    let src = "const a = 1\nconst b = a * 2";
    let program = parse_ok(src);

    let (index, _) = program.body_item_for_position(src.find("a * 2").unwrap()).unwrap();
    assert_eq!(index, 1);

    let expr = program.expr_for_position(src.find("a * 2").unwrap()).unwrap();
    assert_eq!(expr.range().slice(src), "a");

    assert!(program.get_variable("b").is_some());
    assert!(program.get_variable("c").is_none());
}

#[test]
fn replace_value_swaps_exact_ranges() {
    let src = "const a = 1\nconst b = a * 2";
    let mut program = parse_ok(src);
    let start = src.find('2').unwrap();

    assert!(program.replace_value(SourceRange::new(start, start + 1), &Expr::number(5.0, SourceRange::default())));
    assert_eq!(program.to_string(), "const a = 1\nconst b = a * 5");
    assert!(!program.replace_value(SourceRange::new(0, 2), &Expr::number(5.0, SourceRange::default())));
}

#[test]
fn return_outside_function_is_error() {
    assert!(matches!(parse("return 1"),
                     Err(Error::Parse(ParseError::ReturnOutsideFunction { range })) if range == SourceRange::new(0, 8)));
}

#[test]
fn syntax_errors_carry_ranges() {
    assert!(matches!(parse("const = 3"), Err(Error::Parse(ParseError::ExpectedToken { .. }))));
    assert!(matches!(parse("const a = (1 + 2"),
                     Err(Error::Parse(ParseError::UnexpectedEndOfInput { .. }))));
    assert!(matches!(parse("const a = 1 +"), Err(Error::Parse(ParseError::UnexpectedEndOfInput { .. }))));
    assert!(matches!(parse("const a = )"), Err(Error::Parse(ParseError::UnexpectedToken { .. }))));
}

#[test]
fn lexing_errors_carry_ranges() {
    assert_eq!(parse("const a = #"),
               Err(Error::Lex(LexError::InvalidCharacter { character: '#',
                                                           range:     SourceRange::new(10, 11), })));
    assert!(matches!(parse("const a = \"open"), Err(Error::Lex(LexError::UnterminatedString { .. }))));
}

#[test]
fn rename_stops_at_a_local_redeclaration() {
    let mut program = parse_ok("const a = 1\n\
                                const f = (x) => {\n  const y = a + x\n  const a = y * 2\n  return a\n}");
    assert_eq!(program.rename_symbol("width", 6), Some("a".to_string()));

    let Statement::VariableDeclaration { value: Expr::FunctionExpression(function), .. } = &program.body[1] else {
        panic!("expected a function declaration");
    };
    let mut names = Vec::new();
    walk_statements(&function.body, &mut |expr| {
        if let Expr::Identifier { name, .. } = expr {
            names.push(name.clone());
        }
    });
    assert_eq!(names, ["width", "x", "y", "a"]);
    assert!(matches!(&function.body[1], Statement::VariableDeclaration { name, .. } if name.name == "a"));
}

fn nesting_error(src: &str) -> (usize, SourceRange) {
    match parse(src) {
        Err(Error::Parse(ParseError::NestingTooDeep { limit, range })) => (limit, range),
        other => panic!("expected a nesting error, got {other:?}"),
    }
}

#[test]
fn deeply_nested_parentheses_are_rejected() {
    let src = format!("const a = {}1{}", "(".repeat(5_000), ")".repeat(5_000));
    let (limit, range) = nesting_error(&src);

    assert_eq!(limit, MAX_NESTING_DEPTH);
    assert_eq!(range.slice(&src), "(");
}

#[test]
fn long_runs_of_prefix_operators_are_rejected() {
    nesting_error(&format!("const a = {}1", "-".repeat(200_000)));
    nesting_error(&format!("const a = {}true", "!".repeat(200_000)));
}

#[test]
fn long_exponent_chains_are_rejected() {
    nesting_error(&format!("const a = 2{}", " ^ 2".repeat(100_000)));
}

#[test]
fn long_operator_chains_are_rejected() {
    let src = format!("const a = 1{}", " + 1".repeat(100_000));
    let (limit, range) = nesting_error(&src);

    assert_eq!(limit, MAX_EXPRESSION_DEPTH);
    assert_eq!(range.start(), 10);
}

#[test]
fn nesting_within_the_limits_parses() {
    let depth = MAX_NESTING_DEPTH / 2;
    let parens = parse_ok(&format!("const a = {}1{}", "(".repeat(depth), ")".repeat(depth)));
    let negations = parse_ok(&format!("const a = {}1", "-".repeat(depth)));
    let sum = parse_ok(&format!("const a = 1{}", " + 1".repeat(MAX_EXPRESSION_DEPTH / 2)));

    assert_eq!(parens.body[0].expression().depth(), 1);
    assert_eq!(negations.body[0].expression().depth(), depth + 1);
    assert_eq!(sum.body[0].expression().depth(), MAX_EXPRESSION_DEPTH / 2 + 1);
}
