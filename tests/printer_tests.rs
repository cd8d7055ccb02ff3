use guard_lang::ast::{Node, NodeKind, StructuralError};
use guard_lang::lexer::Lexer;
use guard_lang::parser::Parser;
use guard_lang::printer;

fn parse(input: &str) -> Node {
    Parser::new(Lexer::new(input)).unwrap().parse().unwrap()
}

fn canonical(input: &str) -> String {
    printer::canonical(&parse(input)).unwrap()
}

#[test]
fn test_canonical_forms() {
    let test_cases = vec![
        ("x", "x"),
        ("x'", "x'"),
        ("1 + 2 * 3", "(1+(2*3))"),
        ("!a && b", "(!(a)&&b)"),
        ("a != null", "(a!=null)"),
        ("'open' == status", "('open'==status)"),
        ("min(a, 1.5) <= max(b, 2)", "(min(a,1.5)<=max(b,2))"),
        ("-x / 2", "(-x/2)"),
        ("2.0 == 2", "(2.0==2)"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(canonical(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_canonical_round_trips_through_the_parser() {
    let guards = vec![
        "x",
        "1 + 2 * 3",
        "!a && b",
        "min(a, 1.5) <= max(b, 2)",
        "x' == y || !(z < 1)",
        "'str' != \"other\"",
        "-x / 2",
        "a && b || c && d",
        "f() == null",
    ];

    for guard in guards {
        let first = canonical(guard);
        let second = printer::canonical(&parse(&first)).unwrap();
        assert_eq!(first, second, "Round trip changed: {}", guard);
    }
}

#[test]
fn test_pretty_spacing() {
    let node = parse("x == 1 && y > 2");
    assert_eq!(printer::pretty(&node, 1).unwrap(), "(x == 1 && y > 2)");
    assert_eq!(printer::pretty(&node, 0).unwrap(), "(x==1&&y>2)");
    assert_eq!(printer::pretty(&node, 2).unwrap(), "(x  ==  1  &&  y  >  2)");
}

#[test]
fn test_pretty_parenthesizes_only_boolean_operators() {
    // A lone comparison has no parentheses
    assert_eq!(printer::pretty(&parse("x + 1 > 2"), 1).unwrap(), "x + 1 > 2");
    // Nested conjunctions keep their grouping visible
    assert_eq!(
        printer::pretty(&parse("a && b || c"), 1).unwrap(),
        "((a && b) || c)"
    );
    assert_eq!(
        printer::pretty(&parse("!(a == b)"), 1).unwrap(),
        "!(a == b)"
    );
}

#[test]
fn test_pretty_function_arguments() {
    assert_eq!(
        printer::pretty(&parse("min(a, 1) < 2"), 1).unwrap(),
        "min(a, 1) < 2"
    );
}

#[test]
fn test_pretty_output_reparses_to_the_same_guard() {
    let guards = vec![
        "x == 1 && y > 2",
        "a && b || c",
        "!(a == b)",
        "min(a, 1) < 2",
        "x' >= x + 1",
    ];

    for guard in guards {
        let node = parse(guard);
        let pretty = printer::pretty(&node, 1).unwrap();
        assert_eq!(
            printer::canonical(&parse(&pretty)).unwrap(),
            printer::canonical(&node).unwrap(),
            "Pretty form changed the guard: {}",
            guard
        );
    }
}

#[test]
fn test_tree_splits_boolean_operators() {
    let node = parse("x < 1 && (y || z)");
    let expected = "  x < 1\n&&\n    y\n  ||\n    z";
    assert_eq!(printer::tree(&node, 2).unwrap(), expected);

    let wider = "    x < 1\n&&\n        y\n    ||\n        z";
    assert_eq!(printer::tree(&node, 4).unwrap(), wider);
}

#[test]
fn test_tree_keeps_other_operators_inline() {
    assert_eq!(printer::tree(&parse("x < 1"), 2).unwrap(), "x < 1");
    assert_eq!(
        printer::tree(&parse("f(a,b) == 1 || c"), 2).unwrap(),
        "  f(a,b) == 1\n||\n  c"
    );
    assert_eq!(
        printer::tree(&parse("!a && b"), 2).unwrap(),
        "  !(a)\n&&\n  b"
    );
}

#[test]
fn test_renderers_reject_a_multi_child_root() {
    let bad = Node::new(
        NodeKind::Root,
        vec![
            Node::leaf(NodeKind::LitInteger(1)),
            Node::leaf(NodeKind::LitInteger(2)),
        ],
    );

    assert_eq!(
        printer::canonical(&bad),
        Err(StructuralError::RootArity { found: 2 })
    );
    assert_eq!(
        printer::pretty(&bad, 1),
        Err(StructuralError::RootArity { found: 2 })
    );
    assert_eq!(
        printer::tree(&bad, 2),
        Err(StructuralError::RootArity { found: 2 })
    );
}
