use math_parser::{
    Error, ErrorKind, MathParser, Operator, OperatorKind, RuntimeError, SemanticError, SyntaxError,
    Token,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn with_max() -> MathParser {
    let mut parser = MathParser::new();
    parser.register_operator("max", Operator::function(2, |args| args[0].max(args[1])));
    parser
}

#[test]
fn precedence() {
    init();
    let mut parser = MathParser::new();
    assert_eq!(parser.evaluate("2+2*2").unwrap(), 6.0);
    assert_eq!(parser.evaluate("2^3+3^2-2*2").unwrap(), 13.0);
    assert_eq!(parser.evaluate("(2.9+3.1)/3.0").unwrap(), 2.0);
}

#[test]
fn right_associativity() {
    init();
    let mut parser = MathParser::new();
    assert_eq!(parser.evaluate("2^3^2").unwrap(), 512.0);
    assert_eq!(parser.evaluate("---4.2").unwrap(), -4.2);
    assert_eq!(parser.evaluate("-1-2-3").unwrap(), -6.0);
}

#[test]
fn unary_minus() {
    init();
    let mut parser = MathParser::new();
    assert_eq!(parser.evaluate("5*(3+-3)").unwrap(), 0.0);
    assert_eq!(parser.evaluate("-2^4").unwrap(), -16.0);
    assert_eq!(parser.evaluate("(-2)^4").unwrap(), 16.0);
    assert_eq!(parser.evaluate("2^-1").unwrap(), 0.5);
}

#[test]
fn functions_and_constants() {
    init();
    let mut parser = MathParser::new();
    assert_eq!(parser.evaluate("sqrt(3^2+4^2)").unwrap(), 5.0);
    assert_eq!(parser.evaluate("cos(0) + sin(0)").unwrap(), 1.0);
    assert_eq!(parser.evaluate("tan(0)").unwrap(), 0.0);
    assert_eq!(parser.evaluate("PI").unwrap(), std::f64::consts::PI);
    assert_eq!(parser.evaluate("2 * e").unwrap(), 2.0 * std::f64::consts::E);
}

#[test]
fn error_classes() {
    init();
    let mut parser = MathParser::new();
    assert_eq!(
        parser.evaluate("1 / (2 - 2)").unwrap_err(),
        Error::Runtime(RuntimeError::DivisionByZero)
    );
    assert_eq!(parser.evaluate("(1 + 2").unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(parser.evaluate("1 + 2)").unwrap_err().kind(), ErrorKind::Syntax);
    assert_eq!(
        parser.evaluate("unset + 1").unwrap_err(),
        Error::Runtime(RuntimeError::UndefinedVariable("unset".to_string()))
    );
    assert_eq!(
        parser.evaluate("1 $ 2").unwrap_err(),
        Error::Syntax(SyntaxError::UnexpectedCharacter { ch: '$', offset: 2 })
    );
    assert_eq!(
        parser.evaluate("2 = 3").unwrap_err(),
        Error::Semantic(SemanticError::AssignmentTarget)
    );
}

#[test]
fn operands_out_of_place() {
    init();
    let mut parser = MathParser::new();
    for input in ["3 4 +", "1 + 2 3 *", "* 2", "2 3 ^ 4"] {
        assert_eq!(
            parser.evaluate(input).unwrap_err().kind(),
            ErrorKind::Syntax,
            "{}",
            input
        );
    }

    let mut parser = MathParser::empty();
    parser.register_operator("-", Operator::binary(1, false, |a, b| a - b));
    assert_eq!(
        parser.evaluate("-1").unwrap_err(),
        Error::Syntax(SyntaxError::UnexpectedOperator("-".to_string()))
    );
}

#[test]
fn variable_persistence() {
    init();
    let mut parser = MathParser::new();
    assert_eq!(parser.evaluate("x = 5").unwrap(), 5.0);
    assert_eq!(parser.evaluate("x + 1").unwrap(), 6.0);
    assert_eq!(parser.evaluate("y = (x = 3) + 1").unwrap(), 4.0);
    assert_eq!(parser.variable("x").unwrap(), 3.0);
    assert_eq!(parser.variable("y").unwrap(), 4.0);
}

#[test]
fn failed_assignment_does_not_write() {
    init();
    let mut parser = MathParser::new();
    parser.evaluate("x = 1").unwrap();
    assert!(parser.evaluate("x = 1 / 0").is_err());
    assert!(parser.evaluate("x = missing").is_err());
    assert_eq!(parser.variable("x").unwrap(), 1.0);
}

#[test]
fn compiled_program_rebinds() {
    init();
    let mut parser = MathParser::new();
    let program = parser.compile("2*x+1").unwrap();

    parser.evaluate("x=4").unwrap();
    assert_eq!(parser.evaluate_rpn(&program).unwrap(), 9.0);

    parser.evaluate("x=1").unwrap();
    assert_eq!(parser.evaluate_rpn(&program).unwrap(), 3.0);
}

#[test]
fn compiled_program_folds_literals() {
    init();
    let mut parser = MathParser::new();
    let program = parser.compile("x * (2 + 3) - sqrt(16)").unwrap();
    assert_eq!(program.to_string(), "x 5 * 4 -");

    parser.evaluate("x = 2").unwrap();
    assert_eq!(parser.evaluate_rpn(&program).unwrap(), 6.0);
}

#[test]
fn compiled_program_without_variables_matches_raw() {
    init();
    let mut parser = MathParser::new();
    let raw = parser.to_rpn("2^3+3^2-2*2").unwrap();
    let compiled = parser.compile("2^3+3^2-2*2").unwrap();
    assert_eq!(*compiled, vec![Token::Number(13.0)]);
    assert_eq!(
        parser.evaluate_rpn(&raw).unwrap(),
        parser.evaluate_rpn(&compiled).unwrap()
    );
}

#[test]
fn custom_function() {
    init();
    let mut parser = with_max();
    assert_eq!(parser.evaluate("max(3,5)").unwrap(), 5.0);
    assert_eq!(parser.evaluate("max(1,max(2,3))").unwrap(), 3.0);
    assert_eq!(parser.evaluate("max(2-2*2, 2^2-1)").unwrap(), 3.0);
    assert_eq!(
        parser.evaluate("max(1)").unwrap_err(),
        Error::Syntax(SyntaxError::NotEnoughOperands("max".to_string()))
    );
}

#[test]
fn custom_function_sees_variables() {
    init();
    let mut parser = with_max();
    parser.evaluate("a = 7").unwrap();
    let program = parser.compile("max(a, 2 * 3)").unwrap();
    assert_eq!(parser.evaluate_rpn(&program).unwrap(), 7.0);

    parser.evaluate("a = 1").unwrap();
    assert_eq!(parser.evaluate_rpn(&program).unwrap(), 6.0);
}

#[test]
fn overriding_builtins() {
    init();
    let mut parser = MathParser::new();
    parser.register_operator("+", Operator::binary(1, false, |a, b| a * b));
    assert_eq!(parser.evaluate("3 + 4").unwrap(), 12.0);

    parser.register_constant("pi", 3.0);
    assert_eq!(parser.evaluate("pi").unwrap(), 3.0);
}

#[test]
fn postfix_operator() {
    init();
    let mut parser = MathParser::new();
    parser.register_operator(
        "!",
        Operator::postfix(6, |n| (1..=n as u64).map(|i| i as f64).product()),
    );

    assert_eq!(parser.evaluate("3!").unwrap(), 6.0);
    assert_eq!(parser.evaluate("3! + 5!").unwrap(), 126.0);
    assert_eq!(parser.evaluate("3!-1").unwrap(), 5.0);
    assert_eq!(parser.evaluate("-3!").unwrap(), -6.0);
    assert_eq!(parser.evaluate("2^3!").unwrap(), 64.0);
    assert_eq!(parser.evaluate("(1+2)!*2").unwrap(), 12.0);
}

#[test]
fn word_operator() {
    init();
    let mut parser = MathParser::new();
    parser.register_operator(
        "mod",
        Operator::numeric(OperatorKind::Binary, 2, false, 2, |args| {
            if args[1] == 0.0 {
                return Err(RuntimeError::DivisionByZero.into());
            }
            Ok(args[0] % args[1])
        }),
    );

    assert_eq!(parser.evaluate("7 mod 4 + 1").unwrap(), 4.0);
    assert_eq!(parser.evaluate("1 + 7 mod 4").unwrap(), 4.0);
}

#[test]
fn token_level_operator() {
    init();
    let mut parser = MathParser::new();
    // Increments a variable in place and yields the new value.
    parser.register_operator(
        "inc",
        Operator::new(OperatorKind::Function, 5, false, 1, |args, bindings| {
            let Token::Variable(name) = &args[0] else {
                return Err(SemanticError::AssignmentTarget.into());
            };
            let value = bindings.value_of(&args[0])? + 1.0;
            bindings.assign(name, value);
            Ok(Token::Number(value))
        }),
    );

    parser.evaluate("n = 1").unwrap();
    let program = parser.compile("inc(n)").unwrap();
    assert_eq!(parser.evaluate_rpn(&program).unwrap(), 2.0);
    assert_eq!(parser.evaluate_rpn(&program).unwrap(), 3.0);
    assert_eq!(parser.variable("n").unwrap(), 3.0);
}
