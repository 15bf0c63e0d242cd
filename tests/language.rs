use std::rc::Rc;

use nirvana::{
    error::{Error, ErrorCategory, RuntimeError},
    interpreter::{evaluator::core::Evaluator, native::NativeRegistry},
    parse_source, run_source, standard_registry,
};
use pretty_assertions::assert_eq;

fn natives() -> Rc<NativeRegistry> {
    Rc::new(standard_registry().unwrap())
}

fn run(src: &str) -> Result<String, Error> {
    let mut out = Vec::new();
    run_source(src, natives(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(output) => assert_eq!(output, expected, "script: {src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match run(src) {
        Ok(output) => panic!("Script succeeded but was expected to fail, printed {output:?}"),
        Err(e) => e,
    }
}

#[test]
fn undeclared_variables_add_as_integers() {
    assert_output("x = 1; y = 2; echo x + y;", "3\n");
}

#[test]
fn concatenation_stringifies_every_operand() {
    assert_output("echo \"a\" . 1 . true;", "a1true\n");
}

#[test]
fn declared_type_rejects_other_kinds() {
    let error = assert_failure("integer n = 5;\nn = \"oops\";");
    assert_eq!(error.category(), ErrorCategory::Type);
    assert_eq!(error.to_string(),
               "Error on line 2: Type mismatch for variable 'n'. Expected integer, but got value of type string.");
}

#[test]
fn omitted_argument_uses_its_default() {
    assert_output("function add(integer a, integer b = 10): integer { return a + b; } echo add(5);",
                  "15\n");
}

#[test]
fn division_by_zero_is_reported_per_kind() {
    let error = assert_failure("echo 10 / 0;");
    assert!(matches!(error, Error::Runtime(RuntimeError::IntegerDivisionByZero { line: 1 })));

    let error = assert_failure("echo 10.0 / 0;");
    assert!(matches!(error, Error::Runtime(RuntimeError::FloatDivisionByZero { line: 1 })));
    assert_eq!(error.category(), ErrorCategory::Arithmetic);
}

#[test]
fn numeric_like_values_compare_across_kinds() {
    assert_output("echo 1 == true;", "true\n");
    assert_output("echo 1 == 1.0000001; echo \"1\" == 1;", "true\nfalse\n");
}

#[test]
fn operator_precedence() {
    assert_output("echo 1 + 2 * 3;", "7\n");
    assert_output("echo (1 + 2) * 3;", "9\n");
    assert_output("echo 1 + 2 . 3 * 4;", "312\n");
    assert_output("echo 1 < 2 == true;", "true\n");
    assert_output("echo -2 * -3;", "6\n");
    assert_output("echo not 0 and 1;", "true\n");
    assert_output("echo 1 | 2 == 3;", "1\n");
}

#[test]
fn integer_and_float_arithmetic() {
    assert_output("echo 7 / 2; echo -7 / 2; echo 7.0 / 2;", "3\n-3\n3.5\n");
    assert_output("echo 2 + true; echo 0.1 + 0.2;", "3\n0.3\n");
    assert_output("echo 10.0; echo 2.50;", "10.0\n2.5\n");
}

#[test]
fn floats_print_without_binary_noise() {
    assert_output("echo 100.1;", "100.1\n");
    assert_output("echo 1234.1; echo 12345.678;", "1234.1\n12345.678\n");
    assert_output("echo 1234.5 * 2;", "2469.0\n");
    assert_output("number n = 1000.3; echo n;", "1000.3\n");
    assert_output("echo \"total: \" . 250.75;", "total: 250.75\n");
}

#[test]
fn oversized_padding_fails_the_script() {
    let error = assert_failure("echo pad(\"x\", 9223372036854775807);");
    assert_eq!(error.category(), ErrorCategory::Native);
}

#[test]
fn integer_overflow_is_an_error() {
    let error = assert_failure("echo 9223372036854775807 + 1;");
    assert!(matches!(error, Error::Runtime(RuntimeError::IntegerOverflow { .. })));
    assert_eq!(error.category(), ErrorCategory::Arithmetic);
}

#[test]
fn declarations() {
    assert_output("integer i; number n; string s; boolean b; echo i . n . s . b;", "00.0false\n");
    assert_output("integer i = 4.0; boolean b = 1; number n = true; echo i . b . n;", "4true1\n");

    let error = assert_failure("integer i = 4.5;");
    assert_eq!(error.category(), ErrorCategory::Type);

    let error = assert_failure("string s; string s;");
    assert_eq!(error.category(), ErrorCategory::Name);
}

#[test]
fn functions_see_only_their_frame_and_globals() {
    assert_output("integer g = 1;\nfunction show(): integer { return g; }\necho show();", "1\n");

    let error = assert_failure("function peek(): integer { return local; }\n\
                                function outer(): integer { integer local = 3; return peek(); }\n\
                                echo outer();");
    assert!(matches!(error, Error::Runtime(RuntimeError::UndefinedVariable { ref name, line: 1 }) if name == "local"));
}

#[test]
fn public_declarations_are_global() {
    assert_output("function setup(): boolean { public string greeting = \"hi\"; return true; }\n\
                   setup();\n\
                   echo greeting;",
                  "hi\n");
}

#[test]
fn extensions_and_constants() {
    assert_output("echo trim(\"  a  b  \", \" \", MCL_TRIM_ALL);", "a b\n");
    assert_output("echo pad(\"7\", 3, \"0\", MCL_PAD_LEFT) . uppercase(\"x\");", "007X\n");
    assert_output("echo max(1, 2.5, 2); echo min(4, 2); echo pi(2);", "2.5\n2\n3.14\n");
    assert_output("echo reverse(\"ab\", \"cd\"); echo wrap(\"x\", \"<|>\");", "dcba\n<x>\n");

    let error = assert_failure("echo sqrt(-1);");
    assert_eq!(error.category(), ErrorCategory::Native);
    assert_eq!(error.to_string(), "Error on line 1: Function 'sqrt': Argument cannot be negative.");
}

#[test]
fn constants_cannot_be_redeclared() {
    let error = assert_failure("integer MCL_PAD_LEFT = 3;");
    assert_eq!(error.category(), ErrorCategory::Name);
}

#[test]
fn function_names_cannot_shadow_natives() {
    let error = assert_failure("function abs(integer n): integer { return n; }");
    assert!(matches!(error, Error::Runtime(RuntimeError::NativeFunctionRedefinition { .. })));
}

#[test]
fn parse_errors_abort_before_output() {
    let error = assert_failure("echo 1;\necho (2;");
    assert_eq!(error.category(), ErrorCategory::Syntax);

    let error = assert_failure("echo \"never closed;");
    assert_eq!(error.category(), ErrorCategory::Lexical);

    let error = assert_failure("return 1;");
    assert_eq!(error.category(), ErrorCategory::Syntax);

    let error = assert_failure("function f(): integer { function g(): integer { return 1; } return 1; }");
    assert_eq!(error.category(), ErrorCategory::Syntax);
}

#[test]
fn output_before_a_runtime_error_is_kept() {
    let mut out = Vec::new();
    let result = run_source("echo \"first\";\necho missing;", natives(), &mut out);
    assert!(result.is_err());
    assert_eq!(String::from_utf8(out).unwrap(), "first\n");
}

#[test]
fn scope_depth_returns_to_global_after_each_statement() {
    let program = parse_source("function inner(integer n): integer { return n * 2; }\n\
                                function outer(integer n): integer { integer m = inner(n); return inner(m); }\n\
                                echo outer(3);\n\
                                x = outer(1);")
                  .unwrap();
    let mut evaluator = Evaluator::new(natives(), Vec::new());
    evaluator.interpret(&program).unwrap();

    assert_eq!(evaluator.scope_depth(), 1);
    assert_eq!(String::from_utf8(evaluator.into_output()).unwrap(), "12\n");
}

#[test]
fn scope_depth_is_restored_after_a_failing_call() {
    let program = parse_source("function fail(): integer { return 1 / 0; }\necho fail();").unwrap();
    let mut evaluator = Evaluator::new(natives(), Vec::new());
    assert!(evaluator.interpret(&program).is_err());
    assert_eq!(evaluator.scope_depth(), 1);
}

#[test]
fn comments_are_ignored() {
    assert_output("// line\n# hash\n/* block\n spanning */ echo 1; // trailing", "1\n");
}
