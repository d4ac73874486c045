use pretty_assertions::assert_eq;
use showif::{
    Environment, Error, ExpressionCache, RuntimeError, SyntaxError, Value,
    ast::{BinaryOperator, Expr},
    compile, compile_binding, evaluate, evaluate_str,
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::MAX_DEPTH,
    },
};

fn run(env: &mut Environment, src: &str) -> Result<Value, Error> {
    let condition = compile(src)?;
    Ok(evaluate(&condition, env)?)
}

fn eval_in(env: &mut Environment, src: &str) -> Value {
    match run(env, src) {
        Ok(value) => value,
        Err(e) => panic!("Expression '{src}' failed: {e}"),
    }
}

fn assert_value(src: &str, expected: impl Into<Value>) {
    assert_eq!(eval_in(&mut Environment::new(), src), expected.into(), "source: {src}");
}

fn assert_failure(src: &str) -> Error {
    match run(&mut Environment::new(), src) {
        Ok(value) => panic!("Expression '{src}' succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn participant_env() -> Environment {
    let mut env = Environment::new();
    env.set("Participant_Age.answer", 25);
    env.define("age", 15);
    env.define("themes", Value::array(["dark", "contrast"]));
    env
}

#[test]
fn arithmetic_precedence() {
    assert_value("2 * 3 ^ 2", 18);
    assert_value("2 ^ 3 ^ 2", 512);
    assert_value("(2 ^ 3) ^ 2", 64);
    assert_value("1 + 2 * 3", 7);
    assert_value("(1 + 2) * 3", 9);
    assert_value("10 - 4 - 3", 3);
    assert_value("12 / 2 / 3", 2);
    assert_value("-2 ^ 2", 4);
    assert_value("- -2", 2);
    assert_value("7 / 2", 3.5);
}

#[test]
fn arithmetic_requires_numbers() {
    assert!(matches!(assert_failure("1 + 'a'"), Error::Runtime(RuntimeError::TypeError { .. })));
    assert!(matches!(assert_failure("-'a'"), Error::Runtime(RuntimeError::TypeError { .. })));
    assert!(matches!(assert_failure("true * 2"), Error::Runtime(RuntimeError::TypeError { .. })));
}

#[test]
fn division_by_zero_reports_operator_position() {
    assert_eq!(assert_failure("4 / 0"), Error::Runtime(RuntimeError::DivisionByZero { position: 2 }));
}

#[test]
fn short_circuit_skips_right_operand() {
    let mut env = participant_env();

    assert_eq!(eval_in(&mut env, "age > 20 and unknown < 18"), Value::Bool(false));
    assert_eq!(eval_in(&mut env, "age < 20 or unknown"), Value::Bool(true));

    let err = run(&mut env, "age < 20 and unknown").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::UndefinedVariable { ref name, position: 13 })
                     if name == "unknown"));
}

#[test]
fn logical_operators_return_booleans() {
    assert_value("1 and 'x'", true);
    assert_value("0 or ''", false);
    assert_value("TRUE AND NOT FALSE", true);
    assert_value("!true", false);
    assert_value("not ''", true);
}

#[test]
fn between_is_inclusive() {
    let mut env = participant_env();

    assert_eq!(eval_in(&mut env, "Participant_Age.answer is between 18 and 30"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "Participant_Age.answer is between 25 and 25"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "Participant_Age.answer is between 26 and 30"), Value::Bool(false));
    assert_eq!(eval_in(&mut env, "age is between 10 and 20 and age is between 14 and 16"),
               Value::Bool(true));
    assert_eq!(eval_in(&mut env, "Participant_Age.missing is between 18 and 30"),
               Value::Bool(false));
}

#[test]
fn array_membership() {
    let mut env = participant_env();

    assert_eq!(eval_in(&mut env, "'dark' in ['dark','contrast']"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "themes contains 'dark'"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "themes contains 'light'"), Value::Bool(false));
    assert_eq!(eval_in(&mut env, "'5' in [1, 5, 9]"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "age contains 1"), Value::Bool(false));
    assert_eq!(eval_in(&mut env, "'dark' in 'dark'"), Value::Bool(false));
}

#[test]
fn loose_equality_coercions() {
    assert_value("25 = '25'", true);
    assert_value("25 == ' 25 '", true);
    assert_value("0 = ''", true);
    assert_value("1 = 'one'", false);
    assert_value("true = 1", true);
    assert_value("false = '0'", true);
    assert_value("true = 'true'", false);
    assert_value("[1, 2] = '1,2'", true);
    assert_value("[1, 2] = [1, '2']", true);
    assert_value("[1, 2] = [1, 2, 3]", false);
    assert_value("'a' is 'a'", true);
    assert_value("'a' is not 'b'", true);
    assert_value("'a' != 'a'", false);
}

#[test]
fn ordering_rules() {
    assert_value("3 < 10", true);
    assert_value("'3' < '10'", false);
    assert_value("3 < '10'", true);
    assert_value("'b' >= 'a'", true);
    assert_value("2 <= 2", true);

    assert!(matches!(assert_failure("true < 1"), Error::Runtime(RuntimeError::TypeError { .. })));
    assert!(matches!(assert_failure("3 < 'three'"),
                     Error::Runtime(RuntimeError::TypeError { .. })));
    assert!(matches!(assert_failure("[1] < [2]"), Error::Runtime(RuntimeError::TypeError { .. })));
}

#[test]
fn missing_nested_property_policy() {
    let mut env = participant_env();

    assert_eq!(eval_in(&mut env, "Participant_Age.other"), Value::Missing);
    assert_eq!(eval_in(&mut env, "Participant_Age.answer.deeper"), Value::Missing);
    assert_eq!(eval_in(&mut env, "age.answer"), Value::Missing);
    assert_eq!(eval_in(&mut env, "not Participant_Age.other"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "Participant_Age.other = Participant_Age.another"),
               Value::Bool(true));
    assert_eq!(eval_in(&mut env, "Participant_Age.other = ''"), Value::Bool(false));
    assert_eq!(eval_in(&mut env, "Participant_Age.other = 0"), Value::Bool(false));
    assert_eq!(eval_in(&mut env, "Participant_Age.other < 100"), Value::Bool(false));
    assert_eq!(eval_in(&mut env, "Participant_Age.other > 100"), Value::Bool(false));

    let err = run(&mut env, "Unknown.answer = 'Yes'").unwrap_err();
    assert_eq!(err,
               Error::Runtime(RuntimeError::UndefinedVariable { name:     "Unknown".to_string(),
                                                                position: 0, }));
}

#[test]
fn condition_equals_sign_compares() {
    let mut env = participant_env();

    let condition = compile("age = 15").unwrap();
    assert_eq!(evaluate(&condition, &mut env).unwrap(), Value::Bool(true));
    assert_eq!(env.lookup("age"), Some(&Value::Number(15.0)));
}

#[test]
fn binding_writes_into_environment() {
    let mut env = participant_env();

    assert_eq!(evaluate_str("total = 2 * 3 ^ 2", &mut env).unwrap(), Value::Number(18.0));
    assert_eq!(env.lookup("total"), Some(&Value::Number(18.0)));

    let next = evaluate_str("Participant_Age.next = Participant_Age.answer + 1", &mut env);
    assert_eq!(next.unwrap(), Value::Number(26.0));
    assert_eq!(env.resolve_path("Participant_Age.next"), Some(Value::Number(26.0)));
    assert_eq!(env.resolve_path("Participant_Age.answer"), Some(Value::Number(25.0)));

    assert_eq!(evaluate_str("flag = age == 15", &mut env).unwrap(), Value::Bool(true));
    assert_eq!(env.lookup("flag"), Some(&Value::Bool(true)));

    assert_eq!(evaluate_str("age > 10", &mut env).unwrap(), Value::Bool(true));

    let names: Vec<&str> = env.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Participant_Age", "age", "flag", "themes", "total"]);
    assert_eq!(env.len(), 5);
}

#[test]
fn failed_binding_writes_nothing() {
    let mut env = Environment::new();
    assert!(evaluate_str("x = 1 / 0", &mut env).is_err());
    assert!(!env.contains("x"));
    assert!(env.is_empty());
}

#[test]
fn keywords_need_word_boundaries() {
    let tokens: Vec<Token> = tokenize("android or_else and-more").unwrap()
                                                                 .into_iter()
                                                                 .map(|(token, _)| token)
                                                                 .collect();
    assert_eq!(tokens,
               vec![Token::Identifier("android".to_string()),
                    Token::Identifier("or_else".to_string()),
                    Token::Identifier("and-more".to_string())]);
}

#[test]
fn hyphenated_names_and_subtraction() {
    let mut env = Environment::new();
    env.define("favorite-color", "blue");
    env.define("a", 5);
    env.define("b", 2);

    assert_eq!(eval_in(&mut env, "favorite-color = 'blue'"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "a - b"), Value::Number(3.0));
    assert_eq!(eval_in(&mut env, "a -b"), Value::Number(3.0));
}

#[test]
fn between_stays_a_usable_name() {
    let mut env = Environment::new();
    env.define("between", 3);

    assert_eq!(eval_in(&mut env, "between is between 1 and 5"), Value::Bool(true));
    assert_eq!(eval_in(&mut env, "between is 3"), Value::Bool(true));
}

#[test]
fn unrecognized_characters_are_skipped() {
    assert_value("1 $ + # 2", 3);
}

#[test]
fn syntax_errors() {
    assert_eq!(compile("A.answer = 'Yes").unwrap_err(),
               SyntaxError::UnterminatedString { position: 11 });

    let trailing = compile("a b").unwrap_err();
    assert!(matches!(trailing, SyntaxError::UnexpectedTrailingTokens { position: 2, .. }));

    let end = compile("a +").unwrap_err();
    assert!(matches!(end, SyntaxError::UnexpectedEndOfInput { .. }));
    assert_eq!(end.position(), None);

    assert!(matches!(compile("(a").unwrap_err(), SyntaxError::UnexpectedEndOfInput { .. }));
    assert!(matches!(compile("[1, 2").unwrap_err(), SyntaxError::UnexpectedEndOfInput { .. }));
    assert!(matches!(compile("[1 2]").unwrap_err(),
                     SyntaxError::UnexpectedToken { position: 3, .. }));
    assert!(matches!(compile("a is between 1 or 2").unwrap_err(),
                     SyntaxError::UnexpectedToken { position: 15, .. }));
    assert!(matches!(compile("a.").unwrap_err(), SyntaxError::UnexpectedEndOfInput { .. }));
    assert!(matches!(compile("").unwrap_err(), SyntaxError::UnexpectedEndOfInput { .. }));
}

fn nested(open: &str, inner: &str, close: &str, times: usize) -> String {
    format!("{}{inner}{}", open.repeat(times), close.repeat(times))
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let parens = compile(&nested("(", "1", ")", 10_000)).unwrap_err();
    assert_eq!(parens, SyntaxError::NestingTooDeep { position: MAX_DEPTH - 1 });

    let brackets = compile(&nested("[", "1", "]", 10_000)).unwrap_err();
    assert!(matches!(brackets, SyntaxError::NestingTooDeep { .. }));

    let negations = compile(&nested("not ", "true", "", 10_000)).unwrap_err();
    assert!(matches!(negations, SyntaxError::NestingTooDeep { .. }));

    let minus = compile(&nested("- ", "1", "", 10_000)).unwrap_err();
    assert!(matches!(minus, SyntaxError::NestingTooDeep { .. }));

    let powers = compile(&nested("", "2", " ^ 2", 10_000)).unwrap_err();
    assert!(matches!(powers, SyntaxError::NestingTooDeep { .. }));

    let path = format!("a{}", ".b".repeat(10_000));
    assert!(matches!(compile(&path).unwrap_err(), SyntaxError::NestingTooDeep { .. }));
}

#[test]
fn long_operator_chains_are_bounded() {
    let alternatives: Vec<String> = (0..10_000).map(|i| format!("x = {i}")).collect();
    let err = compile(&alternatives.join(" or ")).unwrap_err();
    assert!(matches!(err, SyntaxError::NestingTooDeep { .. }));

    let sum = vec!["1"; 10_000].join(" + ");
    assert!(matches!(compile(&sum).unwrap_err(), SyntaxError::NestingTooDeep { .. }));

    let mut env = Environment::new();
    env.define("x", 7);
    let within: Vec<String> = (0..20).map(|i| format!("x = {i}")).collect();
    assert_eq!(eval_in(&mut env, &within.join(" or ")), Value::Bool(true));
}

#[test]
fn nesting_up_to_the_limit_evaluates() {
    assert_value(&nested("(", "1", ")", MAX_DEPTH - 1), 1);
    assert_value(&nested("not ", "true", "", MAX_DEPTH - 1), false);

    let one_more = compile(&nested("(", "1", ")", MAX_DEPTH)).unwrap_err();
    assert_eq!(one_more, SyntaxError::NestingTooDeep { position: MAX_DEPTH - 1 });
}

#[test]
fn operators_outside_their_family_are_unsupported() {
    let one = Value::from(1);

    assert_eq!(Environment::eval_arithmetic(BinaryOperator::Equal, &one, &one, 4),
               Err(RuntimeError::UnsupportedOperator { operator: "==".to_string(),
                                                       position: 4, }));
    assert_eq!(Environment::eval_ordering(BinaryOperator::Add, &one, &one, 2),
               Err(RuntimeError::UnsupportedOperator { operator: "+".to_string(),
                                                       position: 2, }));

    let literal_target = Expr::Assignment { target:   Box::new(Expr::NumberLiteral { value:    1.0,
                                                                                     position: 0, }),
                                            value:    Box::new(Expr::NumberLiteral { value:    2.0,
                                                                                     position: 4, }),
                                            position: 2, };
    assert_eq!(Environment::new().eval(&literal_target),
               Err(RuntimeError::UnsupportedOperator { operator: "=".to_string(),
                                                       position: 0, }));
}

#[test]
fn printed_trees_parse_back() {
    let sources = ["A.answer = 'Yes'",
                   "2 * 3 ^ 2",
                   "2 ^ 3 ^ 2",
                   "(1 + 2) * -x",
                   "a - b - c",
                   "not a and b or !c",
                   "Participant_Age.answer is between 18 and 30 and ok",
                   "'dark' in ['dark', 'contrast']",
                   "themes contains \"it's\"",
                   "x is not 3",
                   "total = price * (1 + tax.rate)",
                   "flag = a == b",
                   "[] = []",
                   "a.b.c <= 2.5"];

    for source in sources {
        let original = compile_binding(source).unwrap();
        let printed = original.ast().to_string();
        let reparsed = compile_binding(&printed).unwrap_or_else(|e| {
                                                    panic!("'{printed}' (from '{source}') failed: {e}")
                                                });
        assert!(original.ast().structurally_eq(reparsed.ast()),
                "'{source}' printed as '{printed}' parsed to a different tree");
    }
}

#[test]
fn cache_compiles_each_source_once() {
    let mut cache = ExpressionCache::new();
    assert!(cache.is_empty());

    let first = cache.compile("A.answer = 'Yes'").unwrap();
    let again = cache.compile("A.answer = 'Yes'").unwrap();
    let other = cache.compile("B.answer = 'Yes'").unwrap();

    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(cache.len(), 2);

    assert!(cache.compile("A.answer = ").is_err());
    assert_eq!(cache.len(), 2);
}

#[test]
fn root_identifiers_ignore_assignment_target() {
    let binding = compile_binding("total = price * tax.rate + price").unwrap();
    let roots: Vec<&str> = binding.root_identifiers().into_iter().collect();
    assert_eq!(roots, vec!["price", "tax"]);
}
