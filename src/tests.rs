/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Crate unit tests.

use super::*;

fn first_caret_column(pointer: &str) -> Option<usize> {
    pointer.chars().position(|ch| ch == '^').map(|idx| idx + 1)
}

fn compile(source: &str) -> Compilation {
    compile_element(source).expect("source should parse")
}

fn codes(compilation: &Compilation) -> Vec<ErrorCode> {
    compilation
        .diagnostics()
        .iter()
        .map(|error| error.code)
        .collect()
}

#[test]
fn zero_input_functions_are_memoised() {
    let mut c = compile("answer:Number = add(40, 2);\nns { k = mul(3, 5); }");
    let first = c.resolve("answer");
    let count = c.function_count();
    let second = c.resolve("answer");
    assert_eq!(first, Value::Constant(42.0));
    assert_eq!(first, second);
    assert_eq!(c.function_count(), count);

    let first = c.resolve("ns.k");
    let count = c.function_count();
    assert_eq!(c.resolve("ns.k"), first);
    assert_eq!(first, Value::Constant(15.0));
    assert_eq!(c.function_count(), count);
    assert!(c.diagnostics().is_empty());
}

#[test]
fn functions_with_inputs_get_a_fresh_frame_per_call() {
    let mut c = compile("twice(x:Number):Number = mul(x, 2);\na = twice(3);\nb = twice(4);");
    assert_eq!(c.resolve("a"), Value::Constant(6.0));
    assert_eq!(c.resolve("b"), Value::Constant(8.0));
    assert!(c.diagnostics().is_empty());
}

#[test]
fn namespaces_reject_arguments() {
    let mut c = compile(
        "ns { f(x:Number):Number = x; }\none = ns(1);\ntwo = ns(1, 2);\nnone = ns();",
    );
    assert_eq!(c.resolve("one"), Value::Error);
    assert_eq!(c.resolve("two"), Value::Error);
    assert_eq!(
        codes(&c),
        vec![
            ErrorCode::NamespaceNotConstructible,
            ErrorCode::NamespaceNotConstructible
        ]
    );
    assert!(matches!(c.resolve("none"), Value::Function(_)));
    assert_eq!(c.diagnostics().len(), 2);
}

#[test]
fn class_outputs_mirror_constructor_arguments() {
    let mut c = compile("Pair -> (first, second) { }\np = Pair(7, 9);");
    assert!(matches!(c.resolve("p"), Value::Applied { .. }));
    assert_eq!(c.resolve("p.first"), Value::Constant(7.0));
    assert_eq!(c.resolve("p.second"), Value::Constant(9.0));
    assert!(c.diagnostics().is_empty());
}

#[test]
fn host_evaluates_class_constructors() {
    let mut c = compile("P -> (a:Number, b:Number) { }\nns { }");
    assert_eq!(c.evaluate_and_serialize("P", &[1.0, 2.0]).expect("evaluate"), vec![1.0, 2.0]);
    assert!(matches!(
        c.evaluate_and_serialize("P", &[1.0]),
        Err(EvaluateError::ArgumentCount { expected: 2, found: 1, .. })
    ));
    assert!(matches!(
        c.evaluate_and_serialize("ns", &[1.0]),
        Err(EvaluateError::ArgumentCount { expected: 0, found: 1, .. })
    ));
}

#[test]
fn class_constructor_checks_arity() {
    let mut c = compile("Pair -> (first, second) { }\np = Pair(7);");
    assert_eq!(c.resolve("p"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::ArgumentCount]);
}

#[test]
fn unresolved_identifier_reports_location() {
    let mut c = compile("f = missing;");
    assert_eq!(c.resolve("f"), Value::Error);
    let [err] = c.diagnostics() else {
        panic!("expected exactly one diagnostic, got {:?}", c.diagnostics());
    };
    assert_eq!(err.code, ErrorCode::UnresolvedIdentifier);
    assert!(err.message.contains("missing"));
    assert_eq!((err.line, err.column), (1, 5));
    assert_eq!(err.snippet, "f = missing;");
    assert_eq!(first_caret_column(&err.pointer), Some(err.column));
    assert!(err.to_string().contains("ELE0007"));
}

#[test]
fn diagnostics_carry_a_traceback_through_user_functions() {
    let mut c = compile("f(x:Number):Number = add(x, missing);\nr = f(1);");
    assert_eq!(c.resolve("r"), Value::Error);
    let [err] = c.diagnostics() else {
        panic!("expected exactly one diagnostic, got {:?}", c.diagnostics());
    };
    assert_eq!(err.code, ErrorCode::UnresolvedIdentifier);
    assert_eq!(err.line, 1);
    let functions: Vec<&str> = err.traceback.iter().map(|site| site.function.as_str()).collect();
    assert_eq!(functions, vec!["r", "f"]);
    assert_eq!(err.traceback[0].line, 2);
    assert!(err.to_string().contains("trace:"));
}

#[test]
fn propagated_errors_are_reported_once() {
    let mut c = compile("f(x:Number):Number = x;\ng = f(missing);");
    assert_eq!(c.resolve("g"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::UnresolvedIdentifier]);
}

#[test]
fn locate_counts_crlf_once_and_tabs_as_four() {
    let src = "a\r\nb\n\tc\rd";
    assert_eq!(locate(src, 0), Position { line: 1, column: 1 });
    assert_eq!(locate(src, 3), Position { line: 2, column: 1 });
    assert_eq!(locate(src, 6), Position { line: 3, column: 5 });
    assert_eq!(locate(src, 8), Position { line: 4, column: 1 });
}

#[test]
fn call_site_columns_expand_tabs() {
    let mut c = compile("ok = 1;\r\nf =\tmissing;");
    assert_eq!(c.resolve("f"), Value::Error);
    let err = &c.diagnostics()[0];
    assert_eq!((err.line, err.column), (2, 8));
    assert_eq!(err.snippet, "f =    missing;");
    assert_eq!(first_caret_column(&err.pointer), Some(8));
}

#[test]
fn namespace_member_is_a_function_value() {
    let mut c = compile("ns { f(x:Number):Number = x; }");
    let f = c.resolve("ns.f");
    assert!(matches!(f, Value::Function(_)));
    assert_eq!(c.display_value(&f), "ns.f");
    assert_eq!(c.evaluate_and_serialize("ns.f", &[3.0]).expect("evaluate"), vec![3.0]);
}

const VEC2: &str = "
Vec2 -> (x:Number, y:Number)
{
    length(this:Vec2):Number = sqrt(add(mul(this.x, this.x), mul(this.y, this.y)));
}
sugar = Vec2(3, 4).length();
direct = Vec2.length(Vec2(3, 4));
bound = Vec2(3, 4).length;
";

#[test]
fn method_call_sugar_matches_direct_call() {
    let mut c = compile(VEC2);
    assert_eq!(c.resolve("sugar"), Value::Constant(5.0));
    assert_eq!(c.resolve("direct"), Value::Constant(5.0));
    assert!(matches!(c.resolve("bound"), Value::Method { .. }));
    assert!(c.diagnostics().is_empty());
}

#[test]
fn method_receiver_must_match_the_class() {
    let mut c = compile(&format!("{VEC2}\nwrong = Vec2.length(5);"));
    assert_eq!(c.resolve("wrong"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::ArgumentType]);
}

#[test]
fn integer_output_rejects_fractions() {
    let mut c = compile("f():Integer = 3.5;\ng():Int = 3;");
    assert_eq!(c.resolve("f"), Value::Error);
    let [err] = c.diagnostics() else {
        panic!("expected exactly one diagnostic, got {:?}", c.diagnostics());
    };
    assert_eq!(err.code, ErrorCode::OutputNotSatisfied);
    assert_eq!((err.line, err.column), (1, 5));
    assert_eq!(c.resolve("g"), Value::Constant(3.0));
    assert_eq!(c.diagnostics().len(), 1);
}

#[test]
fn duplicate_definitions_are_reported_and_first_wins() {
    let mut c = compile("a = 1;\na = 2;\nf(x, x) = x;\nns { k = 1; k = 2; }");
    assert_eq!(
        codes(&c),
        vec![
            ErrorCode::DuplicateDefinition,
            ErrorCode::DuplicateDefinition,
            ErrorCode::DuplicateDefinition
        ]
    );
    assert_eq!(c.diagnostics()[0].line, 2);
    assert_eq!(c.resolve("a"), Value::Constant(1.0));
    assert_eq!(c.resolve("ns.k"), Value::Constant(1.0));
}

#[test]
fn duplicate_top_level_names_across_sources() {
    let sources = [
        ElementSource::new("one.ele", "k = 1;"),
        ElementSource::new("two.ele", "k = 2;"),
    ];
    let c = compile_element_sources(&sources, CompileOptions::default()).expect("parse");
    let [err] = c.diagnostics() else {
        panic!("expected exactly one diagnostic, got {:?}", c.diagnostics());
    };
    assert_eq!(err.code, ErrorCode::DuplicateDefinition);
    assert_eq!(err.file, "two.ele");
}

#[test]
fn self_reference_hits_the_depth_limit() {
    let sources = [ElementSource::new("loop.ele", "loop = loop;")];
    let mut c = compile_element_sources(&sources, CompileOptions::new().with_max_depth(64))
        .expect("parse");
    assert_eq!(c.resolve("loop"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::RecursionLimit]);
}

#[test]
fn recursive_call_reports_the_limit_once_per_resolution() {
    let src = "f(x:Number, y:Number, z:Number):Number = f(x, y, z);\n\
               r = f(1, 2, 3);\ns = f(4, 5, 6);";
    let sources = [ElementSource::new("rec.ele", src)];
    let mut c = compile_element_sources(&sources, CompileOptions::new().with_max_depth(64))
        .expect("parse");
    assert_eq!(c.resolve("r"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::RecursionLimit]);
    assert_eq!(c.resolve("s"), Value::Error);
    assert_eq!(
        codes(&c),
        vec![ErrorCode::RecursionLimit, ErrorCode::RecursionLimit]
    );
}

#[test]
fn nested_functions_close_over_their_definition_frame() {
    let src = "
outer(a:Number):Number
{
    inner(b:Number):Number = add(a, b);
    return = inner(10);
}
make(a:Number)
{
    adder(b:Number):Number = add(a, b);
    return = adder;
}
later = make(5)(3);
";
    let mut c = compile(src);
    assert_eq!(c.evaluate_and_serialize("outer", &[5.0]).expect("evaluate"), vec![15.0]);
    assert_eq!(c.resolve("later"), Value::Constant(8.0));
    assert!(c.diagnostics().is_empty());
}

#[test]
fn type_statements_build_records() {
    let src = "
type Point(x:Number, y:Number);
p = Point(1, 2);
px = p.x;
short = Point(1);
nope = p.z;
";
    let mut c = compile(src);
    assert_eq!(c.resolve("px"), Value::Constant(1.0));
    assert_eq!(c.evaluate_and_serialize("p", &[]).expect("evaluate"), vec![1.0, 2.0]);
    assert_eq!(c.resolve("short"), Value::Error);
    assert_eq!(c.resolve("nope"), Value::Error);
    assert_eq!(
        codes(&c),
        vec![ErrorCode::ArgumentCount, ErrorCode::UnknownMember]
    );
}

#[test]
fn unknown_types_are_reported() {
    let mut c = compile("f(x:Vec9):Number = x;\nr = f(1);\nq = f(2);");
    assert_eq!(c.resolve("r"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::UnknownType]);
    assert_eq!(c.resolve("q"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::UnknownType]);
}

#[test]
fn calling_values_that_are_not_functions() {
    let mut c = compile("c = 3;\nd = c(1);\ne = c();\nn { k = 1; }\nm = n.nothing;");
    assert_eq!(c.resolve("e"), Value::Constant(3.0));
    assert_eq!(c.resolve("d"), Value::Error);
    assert_eq!(c.resolve("m"), Value::Error);
    assert_eq!(
        codes(&c),
        vec![ErrorCode::NotCallable, ErrorCode::UnknownMember]
    );
}

#[test]
fn intrinsics_check_their_arguments() {
    let mut c = compile("a = sqrt(1, 2);\nb = pow(2, 10);\nns { }\nd = abs(ns);");
    assert_eq!(c.resolve("a"), Value::Error);
    assert_eq!(c.resolve("b"), Value::Constant(1024.0));
    assert_eq!(c.resolve("d"), Value::Error);
    assert_eq!(
        codes(&c),
        vec![ErrorCode::ArgumentCount, ErrorCode::ArgumentType]
    );
}

#[test]
fn prelude_provides_constants_and_vectors() {
    let src = "v = Vector2(3, 4).length();\nw = lerp(0.5, 2, 4);\nu = Vector3(1, 2, 2).length();";
    let mut c = compile_element_with_prelude(src).expect("parse");
    assert_eq!(c.resolve("v"), Value::Constant(5.0));
    assert_eq!(c.resolve("w"), Value::Constant(3.0));
    assert_eq!(c.resolve("u"), Value::Constant(3.0));
    assert_eq!(c.resolve("tau"), Value::Constant(std::f64::consts::TAU));
    assert_eq!(
        c.evaluate_and_serialize("Vector2.plus", &[1.0, 2.0, 3.0, 4.0])
            .expect("evaluate"),
        vec![4.0, 6.0]
    );
    assert_eq!(
        c.evaluate_and_serialize("Vector2", &[1.0, 2.0]).expect("evaluate"),
        vec![1.0, 2.0]
    );
    assert_eq!(
        c.evaluate_and_serialize("Vector2.zero", &[]).expect("evaluate"),
        vec![0.0, 0.0]
    );
    assert!(c.diagnostics().is_empty(), "{:?}", c.diagnostics());
}

#[test]
fn prelude_is_opt_in() {
    let mut c = compile("v = pi;");
    assert_eq!(c.resolve("v"), Value::Error);
    assert_eq!(codes(&c), vec![ErrorCode::UnresolvedIdentifier]);
}

#[test]
fn format_results_spells_out_special_values() {
    let text = format_results(&[1.0, 2.5, f64::INFINITY, f64::NEG_INFINITY, f64::NAN]);
    assert_eq!(text, "1, 2.5, Infinity, -Infinity, NaN");
    assert_eq!(format_results(&[]), "");
}

#[test]
fn evaluate_reports_host_errors() {
    let mut c = compile("f(x:Number) = x;\ng(x:Integer):Number = x;");
    assert!(matches!(
        c.evaluate_and_serialize("nothing", &[]),
        Err(EvaluateError::FunctionNotFound(name)) if name == "nothing"
    ));
    assert!(matches!(
        c.evaluate_and_serialize("f", &[]),
        Err(EvaluateError::ArgumentCount { expected: 1, found: 0, .. })
    ));
    let Err(EvaluateError::Compile(errors)) = c.evaluate_and_serialize("g", &[2.5]) else {
        panic!("expected compile errors");
    };
    assert_eq!(errors[0].code, ErrorCode::ArgumentType);
    assert_eq!(c.evaluate_and_serialize("g", &[2.0]).expect("evaluate"), vec![2.0]);
    assert_eq!(c.evaluate_and_serialize("sqrt", &[9.0]).expect("evaluate"), vec![3.0]);
}

#[test]
fn evaluate_element_parses_and_runs() {
    let results = evaluate_element("f(a:Number, b:Number):Number = sub(a, b);", "f", &[5.0, 7.0])
        .expect("evaluate");
    assert_eq!(format_results(&results), "-2");
    assert!(matches!(
        evaluate_element("f = ;", "f", &[]),
        Err(EvaluateError::Parse(err)) if err.code == ErrorCode::SyntaxError
    ));
}

#[test]
fn reports_syntax_errors_with_caret() {
    let src = "ok = 1;\nbad(x = 2;";
    let err = parse_element(src).expect_err("parse should fail");
    assert_eq!(err.code, ErrorCode::SyntaxError);
    assert_eq!(err.line, 2);
    assert!(err.message.contains("Syntax error"));
    assert!(err.pointer.contains('^'));
    assert_eq!(first_caret_column(&err.pointer), Some(err.column));
}

#[test]
fn parser_classifies_function_shapes() {
    let program = parse_element(
        "f(x) = x;\ng(x) { return = x; }\nns { }\nC -> (a, b) { }\ntype T(a:Number);",
    )
    .expect("parse");
    let shapes: Vec<Option<FunctionShape>> = program
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::Function(decl) => Some(decl.shape()),
            Statement::Type(_) => None,
        })
        .collect();
    assert_eq!(
        shapes,
        vec![
            Some(FunctionShape::Assignment),
            Some(FunctionShape::Function),
            Some(FunctionShape::Namespace),
            Some(FunctionShape::Class),
            None
        ]
    );
}

#[test]
fn parser_marks_self_ports() {
    let program = parse_element("len(this:V, other):Number = 1;").expect("parse");
    let Statement::Function(decl) = &program.statements[0] else {
        panic!("expected a function");
    };
    let inputs = decl.inputs.as_ref().expect("inputs");
    assert!(inputs[0].is_self);
    assert!(!inputs[1].is_self);
    let outputs = decl.outputs.as_ref().expect("outputs");
    assert_eq!(outputs[0].name, RETURN);
}
