use super::*;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn check(list: &[&str]) -> CliArgs {
    match parse_args(&args(list)).unwrap() {
        Command::Check(parsed) => parsed,
        other => panic!("expected a check command, got {other:?}"),
    }
}

#[test]
fn test_defaults() {
    let parsed = check(&["main.js"]);
    assert_eq!(parsed.options, EngineOptions::default());
    assert_eq!(parsed.color, ColorMode::Auto);
    assert!(!parsed.json);
    assert!(!parsed.merge);
    assert_eq!(parsed.files, vec!["main.js".to_string()]);
}

#[test]
fn test_engine_switches() {
    let parsed = check(&[
        "--call-only",
        "--eval-values",
        "--check-native-arity",
        "--max-depth=4",
        "a.js",
    ]);
    let expected = EngineOptions::default()
        .evaluate_on_call_only(true)
        .always_evaluate_values(true)
        .check_native_arity(true)
        .max_call_depth(4);
    assert_eq!(parsed.options, expected);
}

#[test]
fn test_output_switches() {
    let parsed = check(&["--no-color", "--json", "--merge", "a.js", "b.js"]);
    assert_eq!(parsed.color, ColorMode::Never);
    assert!(parsed.json);
    assert!(parsed.merge);
    assert_eq!(parsed.files.len(), 2);
}

#[test]
fn test_reserved_flag() {
    let parsed = check(&["--reserved=print:function", "--reserved=VERSION:string", "a.js"]);
    assert_eq!(
        parsed.reserved,
        vec![
            ReservedSymbol::declared("print", ValueType::Function),
            ReservedSymbol::declared("VERSION", ValueType::String),
        ]
    );
}

#[test]
fn test_invalid_flags() {
    assert_eq!(
        parse_args(&args(&["--reserved=print", "a.js"])),
        Err(UsageError::InvalidReserved("print".to_string()))
    );
    assert_eq!(
        parse_args(&args(&["--reserved=x:widget", "a.js"])),
        Err(UsageError::InvalidReserved("x:widget".to_string()))
    );
    assert_eq!(
        parse_args(&args(&["--max-depth=deep", "a.js"])),
        Err(UsageError::InvalidDepth("deep".to_string()))
    );
    assert_eq!(
        parse_args(&args(&["--frobnicate", "a.js"])),
        Err(UsageError::UnknownFlag("--frobnicate".to_string()))
    );
    assert_eq!(parse_args(&args(&["--json"])), Err(UsageError::NoInput));
}

#[test]
fn test_help_wins() {
    assert_eq!(parse_args(&args(&["a.js", "--help"])), Ok(Command::Help));
    assert_eq!(parse_args(&args(&["-V"])), Ok(Command::Version));
}
