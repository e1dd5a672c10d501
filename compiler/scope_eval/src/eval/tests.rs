use super::*;
use crate::symbols::Frame;
use pretty_assertions::assert_eq;
use scope_ir::Location;

struct Analysis {
    interner: StringInterner,
    table: SymbolTable,
    diagnostics: DiagnosticBag,
}

impl Analysis {
    fn run(source: &str, options: &EngineOptions) -> Self {
        let mut ast = Ast::new();
        let mut interner = StringInterner::new();
        let root = scope_parse::parse(source, &mut ast, &mut interner).unwrap();
        let reserved = ReservedRegistry::new();
        let natives = NativeRegistry::with_builtins();
        let mut table = SymbolTable::new();
        let mut diagnostics = DiagnosticBag::new();
        let context = EvalContext {
            ast: &ast,
            reserved: &reserved,
            natives: &natives,
            options,
        };
        evaluate_program(context, &mut interner, &mut table, &mut diagnostics, root);
        Analysis {
            interner,
            table,
            diagnostics,
        }
    }

    fn name(&self, id: SymbolId) -> &str {
        self.table
            .symbol(id)
            .id
            .map_or("", |name| self.interner.lookup(name))
    }

    fn main(&self) -> FrameId {
        self.table.main_frame().unwrap()
    }

    fn symbol_names(&self, frame: FrameId) -> Vec<&str> {
        self.table
            .frame(frame)
            .symbols()
            .map(|id| self.name(id))
            .collect()
    }

    fn global(&self, name: &str) -> &SymbolEntry {
        let main = self.main();
        let id = self
            .table
            .frame(main)
            .symbols()
            .find(|&id| self.name(id) == name)
            .unwrap();
        self.table.symbol(id)
    }

    fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }
}

/// Analyze `source`, then hand the evaluator that built it to `test`.
fn with_evaluator(source: &str, test: impl FnOnce(&mut Evaluator<'_>, NodeId)) {
    let mut ast = Ast::new();
    let mut interner = StringInterner::new();
    let root = scope_parse::parse(source, &mut ast, &mut interner).unwrap();
    let reserved = ReservedRegistry::new();
    let natives = NativeRegistry::new();
    let options = EngineOptions::default();
    let mut table = SymbolTable::new();
    let mut diagnostics = DiagnosticBag::new();
    let context = EvalContext {
        ast: &ast,
        reserved: &reserved,
        natives: &natives,
        options: &options,
    };
    let mut evaluator = Evaluator::new(context, &mut interner, &mut table, &mut diagnostics);
    let main = evaluator.table.alloc_frame(Frame::new(
        Some(evaluator.names.main),
        None,
        None,
        ast.location(root),
    ));
    evaluator.table.set_main_frame(main);
    evaluator.eval(root, Mode::Rvalue, &mut EvalState::active(main));
    test(&mut evaluator, root);
}

#[test]
fn test_speculative_lookup_falls_back_to_globals() {
    with_evaluator("var x = 1;", |evaluator, root| {
        let x = evaluator.interner.intern("x");
        let detached = evaluator
            .table
            .alloc_frame(Frame::new(None, None, None, Location::default()));

        let speculative = EvalState::speculative(detached);
        let found = evaluator.eval_identifier(root, x, Mode::Rvalue, &speculative);
        let entry = evaluator.entry(found).clone();
        assert!(entry.is_global);
        assert_eq!(entry.value, Value::Number(1.0));

        // The declaration itself is not marked.
        let main = evaluator.table.main_frame().unwrap();
        let stored = evaluator.table.frame(main).symbols().next().unwrap();
        assert!(!evaluator.entry(stored).is_global);

        let active = EvalState::active(detached);
        let missing = evaluator.eval_identifier(root, x, Mode::Rvalue, &active);
        assert!(!evaluator.entry(missing).is_resolved());
    });
}

#[test]
fn test_lvalue_identifier_is_a_bare_name() {
    with_evaluator("var x = 1;", |evaluator, root| {
        let x = evaluator.interner.intern("x");
        let main = evaluator.table.main_frame().unwrap();
        let id = evaluator.eval_identifier(root, x, Mode::Lvalue, &EvalState::active(main));
        let entry = evaluator.entry(id);
        assert_eq!(entry.ty, Some(ValueType::Identifier));
        assert_eq!(entry.value, Value::Name(x));
        assert_eq!(entry.kind, None);
    });
}

#[test]
fn test_member_read_materializes_property() {
    with_evaluator("var o = null;", |evaluator, _| {
        let main = evaluator.table.main_frame().unwrap();
        let o = evaluator.table.frame(main).symbols().next().unwrap();
        assert!(evaluator.entry(o).value.is_empty());

        let k = evaluator.interner.intern("k");
        let created = evaluator.materialize_object(o, NodeId::new(0), k);
        let Value::Object(map) = &evaluator.entry(o).value else {
            panic!("object expected");
        };
        assert_eq!(map.get(&k), Some(&created));
        assert_eq!(evaluator.entry(created).kind, Some(SymbolKind::Property));
        assert_eq!(evaluator.entry(created).ty, None);
        assert!(evaluator.diagnostics.is_empty());
    });
}

#[test]
fn test_expression_body_call_leaves_caller_frame_untouched() {
    let analysis = Analysis::run("const g = (a) => a; g(1);", &EngineOptions::default());
    assert_eq!(analysis.symbol_names(analysis.main()), vec!["g"]);
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_returned_arrow_sees_its_arguments_and_closure() {
    let analysis = Analysis::run(
        "function mk(k) { return (a) => a + k; } var r = mk(1)(2);",
        &EngineOptions::default(),
    );
    assert!(analysis.diagnostics.is_empty());
    assert_eq!(analysis.global("r").value, Value::Number(3.0));
}

#[test]
fn test_block_body_call_binds_arguments_in_new_frame() {
    let analysis = Analysis::run("function f(a) { return a; } f(1);", &EngineOptions::default());
    let main = analysis.main();
    assert_eq!(analysis.symbol_names(main), vec!["f"]);

    let frames = analysis.table.frames_below(main);
    assert_eq!(frames.len(), 2);
    let block = frames[1];
    assert_eq!(analysis.table.frame(block).parent, Some(main));

    let arguments: Vec<&SymbolEntry> = analysis
        .table
        .frame(block)
        .symbols()
        .map(|id| analysis.table.symbol(id))
        .collect();
    assert_eq!(arguments.len(), 1);
    assert_eq!(arguments[0].kind, Some(SymbolKind::Argument));
    assert_eq!(arguments[0].value, Value::Number(1.0));
}

#[test]
fn test_last_return_wins() {
    let analysis = Analysis::run(
        "function f() { return 1; return 2; } var r = f();",
        &EngineOptions::default(),
    );
    let r = analysis.global("r");
    assert_eq!(r.ty, Some(ValueType::Number));
    assert_eq!(r.value, Value::Number(2.0));
}

#[test]
fn test_missing_return_yields_call_result_name() {
    let analysis = Analysis::run("function f() { } var r = f();", &EngineOptions::default());
    let r = analysis.global("r");
    assert_eq!(r.ty, None);
    assert_eq!(r.kind, Some(SymbolKind::Var));
}

#[test]
fn test_recursive_call_terminates() {
    let analysis = Analysis::run(
        "function f(n) { return f(n); } f(1);",
        &EngineOptions::default(),
    );
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_recursive_result_in_arithmetic_is_not_reported() {
    let uncalled = Analysis::run(
        "function fact(n) { return n * fact(n - 1); }",
        &EngineOptions::default(),
    );
    assert!(uncalled.diagnostics.is_empty());

    let called = Analysis::run(
        "function fact(n) { return n * fact(n - 1); } var r = fact(3);",
        &EngineOptions::default(),
    );
    assert!(called.diagnostics.is_empty());
}

#[test]
fn test_function_declarations_are_hoisted() {
    let analysis = Analysis::run("var r = f(); function f() { return 2; }", &EngineOptions::default());
    assert!(analysis.diagnostics.is_empty());
    assert_eq!(analysis.global("r").value, Value::Number(2.0));
    assert_eq!(analysis.symbol_names(analysis.main()), vec!["f", "r"]);
}

#[test]
fn test_call_only_skips_uncalled_bodies() {
    let source = "function f() { missing(); }";
    let eager = Analysis::run(source, &EngineOptions::default());
    assert_eq!(eager.messages(), vec!["missing is not found in current scope"]);

    let lazy = Analysis::run(source, &EngineOptions::default().evaluate_on_call_only(true));
    assert!(lazy.diagnostics.is_empty());
}

#[test]
fn test_labelled_break_revisits_body_once() {
    let analysis = Analysis::run(
        "var n = 0; outer: for (;;) { n++; break outer; }",
        &EngineOptions::default(),
    );
    assert!(analysis.diagnostics.is_empty());
    // Once for the loop and once for the revisit.
    assert_eq!(analysis.global("n").value, Value::Number(2.0));
}

#[test]
fn test_missing_label_is_an_error() {
    let analysis = Analysis::run("for (;;) { break nowhere; }", &EngineOptions::default());
    assert_eq!(analysis.messages(), vec!["label nowhere is not found"]);
    assert!(analysis.diagnostics.has_errors());
}

#[test]
fn test_loop_test_that_is_not_boolean() {
    let options = EngineOptions::default().always_evaluate_values(true);
    let analysis = Analysis::run("var i = 0; while (i) { i = 1; }", &options);
    assert_eq!(analysis.messages(), vec!["0 is not a boolean type"]);
}

#[test]
fn test_call_depth_limit() {
    let source = "
        function a() { return b(); }
        function b() { return 1; }
        var r = a();
    ";
    let shallow = Analysis::run(source, &EngineOptions::default().max_call_depth(1));
    assert_eq!(shallow.global("r").ty, None);

    let deep = Analysis::run(source, &EngineOptions::default());
    assert_eq!(deep.global("r").value, Value::Number(1.0));
}
