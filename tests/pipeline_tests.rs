// tests/pipeline_tests.rs
//! Integration tests for the Crux pipeline
//!
//! These tests compile complete programs from `test_scripts/` and check the
//! stage that stops them, the diagnostics they produce, or the shape of the
//! generated assembly.


use crux::*;
use test_harness::{TestHarness, stack_delta, user_code};

#[test]
fn test_hello() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("hello.crx");
    let assembly = result.assert_success();

    let code = user_code(assembly);
    assert_eq!(code.first(), Some(&"main:"));
    assert!(code.contains(&"li $t0, 42"));
    assert!(code.contains(&"jal func.printInt"));
    assert!(code.contains(&"jal func.println"));
    assert_eq!(code.last(), Some(&"syscall"));
}

#[test]
fn test_assembly_layout() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("globals.crx");
    let assembly = result.assert_success();

    let data = assembly.find(".data").unwrap();
    let globals = assembly.find("cruxdata.count: .space 4").unwrap();
    let table = assembly.find("cruxdata.table: .space 40").unwrap();
    let runtime = assembly.find("func.printBool:").unwrap();
    let program = assembly.find("# BEGIN Crux Program").unwrap();
    assert!(data < globals && globals < table && table < runtime && runtime < program);

    for routine in ["printBool", "printFloat", "printInt", "println", "readFloat", "readInt"] {
        assert!(assembly.contains(&format!("func.{}:", routine)));
    }
}

#[test]
fn test_globals_are_stored_through_labels() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("globals.crx");
    let code = user_code(result.assert_success());

    assert!(code.contains(&"la $t0, cruxdata.ratio"));
    assert!(code.contains(&"swc1 $f0, 0($t0)"));
    assert!(code.contains(&"sgt $t2, $t0, $t1"));
}

#[test]
fn test_functions() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("functions.crx");
    let code = user_code(result.assert_success());

    for label in [
        "func.factorial:",
        "func.factorial.end:",
        "func.scale:",
        "func.scale.end:",
        "func.report:",
        "func.report.end:",
        "main:",
        "main.end:",
    ] {
        assert!(code.contains(&label), "missing {}", label);
    }

    // Three float-or-bool arguments are released after the call.
    let call = code.iter().position(|line| *line == "jal func.scale").unwrap();
    assert_eq!(code[call + 1], "addi $sp, $sp, 12");

    // Recursive call inside its own body.
    let start = code.iter().position(|line| *line == "func.factorial:").unwrap();
    let end = code.iter().position(|line| *line == "func.factorial.end:").unwrap();
    assert!(code[start..end].contains(&"jal func.factorial"));
}

#[test]
fn test_control_flow_labels() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("control_flow.crx");
    let code = user_code(result.assert_success());

    for label in [
        "main.while:",
        "main.while.end:",
        "main.else:",
        "main.ifelse.end:",
        "main.else.1:",
        "main.ifelse.end.1:",
    ] {
        assert!(code.contains(&label), "missing {}", label);
    }

    // Three locals, one of them declared inside the loop body.
    assert_eq!(code[5], "subu $sp, $sp, 12");
}

#[test]
fn test_function_bodies_balance_the_stack() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("matrix.crx");
    let code = user_code(result.assert_success());

    // `fill` has no returns, so its body is straight-line apart from branches
    // that each balance; prologue and epilogue cancel out.
    let start = code.iter().position(|line| *line == "func.fill:").unwrap();
    let end = code.iter().position(|line| *line == "jr $ra").unwrap();
    assert_eq!(stack_delta(&code[start..=end]), 0);
}

#[test]
fn test_matrix_indexing() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("matrix.crx");
    let assembly = result.assert_success();

    assert!(assembly.contains("cruxdata.grid: .space 48"));
    let code = user_code(assembly);
    assert!(code.contains(&"li $t2, 16"));
    assert!(code.contains(&"li $t2, 4"));
    assert!(code.contains(&"c.lt.s $f0, $f1"));
}

#[test]
fn test_type_errors_are_all_reported() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("type_errors.crx");
    let diagnostics = result.assert_failed_at(Stage::Check);

    assert_eq!(
        diagnostics.report(),
        "TypeError(2,14)[Cannot divide float by int.]\n\
         TypeError(6,18)[Cannot add int with float.]\n\
         TypeError(7,16)[Cannot call func(TypeList(float)):float using TypeList(int).]\n\
         TypeError(8,5)[IfElseBranch requires bool condition not int.]\n"
    );
}

#[test]
fn test_symbol_errors_do_not_abort() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("symbol_errors.crx");
    let diagnostics = result.assert_failed_at(Stage::Parse);

    let lines: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "DeclareSymbolError(2,5)[total already exists.]",
            "ResolveSymbolError(6,16)[Could not find missing.]",
        ]
    );

    // Each symbol error carries the scope chain.
    let report = diagnostics.report();
    assert!(report.contains("Symbol(readInt:func(TypeList()):int)"));
    assert!(report.contains("Symbol(total:int)"));
}

#[test]
fn test_every_unknown_use_is_reported() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("repeated_unknown.crx");
    let diagnostics = result.assert_failed_at(Stage::Parse);

    let lines: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "ResolveSymbolError(4,13)[Could not find ghost.]",
            "ResolveSymbolError(5,16)[Could not find ghost.]",
        ]
    );
    assert!(diagnostics.iter().all(|d| d.stage() == Stage::Parse && !d.is_fatal()));
}

#[test]
fn test_oversized_array_is_a_type_error() {
    let source = "array big : int[2000000000];\nfunc main() : void { }";
    let error = compile(source, &CompileOptions::default()).unwrap_err();

    assert_eq!(error.stage(), Stage::Check);
    assert_eq!(
        error.diagnostics().report(),
        "TypeError(1,1)[Array big of type array[2000000000,int] is too large.]\n"
    );
}

#[test]
fn test_syntax_error_is_terminal() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("syntax_error.crx");
    let diagnostics = result.assert_failed_at(Stage::Parse);

    let last = diagnostics.iter().last().unwrap();
    assert!(last.is_fatal());
    assert_eq!(
        last.to_string(),
        "SyntaxError(3,1)[Expected SEMICOLON but got CLOSE_BRACE.]"
    );
}

#[test]
fn test_missing_return() {
    let harness = TestHarness::new();
    let result = harness.load_and_compile("missing_return.crx");
    let diagnostics = result.assert_failed_at(Stage::Check);

    assert_eq!(
        diagnostics.report(),
        "TypeError(1,1)[Not all paths in function pick have a return.]\n"
    );
}

#[test]
fn test_check_only() {
    let harness = TestHarness::new().with_options(CompileOptions::new().check_only(true));
    let result = harness.load_and_compile("functions.crx");
    assert_eq!(result.assert_success(), "");
}

#[test]
fn test_custom_entry_point() {
    let source = "func start() : void { ::println(); } func main(x : int) : void { }";
    let options = CompileOptions::new().entry_point("start");
    let output = compile(source, &options).unwrap();
    let assembly = output.assembly.unwrap();

    let code = user_code(&assembly);
    assert!(code.contains(&"start:"));
    assert!(code.contains(&"func.main:"));
}

#[test]
fn test_token_buffer_source() {
    let harness = TestHarness::new();
    let source = harness.load("hello.crx");
    let tokens = Lexer::new(&source).tokenize();

    let from_tokens = compile_tokens(TokenBuffer::new(tokens), &CompileOptions::new()).unwrap();
    let from_text = compile(&source, &CompileOptions::new()).unwrap();
    assert_eq!(from_tokens, from_text);
}
