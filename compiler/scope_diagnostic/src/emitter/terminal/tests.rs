use super::*;
use pretty_assertions::assert_eq;
use scope_ir::{LineCol, Location, Span};

fn sample() -> Diagnostic {
    Diagnostic::warning(
        "x is not defined",
        Location::new(LineCol::new(3, 4), LineCol::new(3, 5), Span::new(20, 21)),
    )
}

fn render(mode: ColorMode, name: Option<&str>) -> String {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, mode, false);
        if let Some(name) = name {
            emitter = emitter.with_source_name(name);
        }
        emitter.emit(&sample());
        emitter.flush();
    }
    String::from_utf8(output).unwrap()
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.enabled(true));
    assert!(!ColorMode::Auto.enabled(false));
    assert!(ColorMode::Always.enabled(false));
    assert!(!ColorMode::Never.enabled(true));
    assert_eq!(ColorMode::default(), ColorMode::Auto);
}

#[test]
fn test_plain_output() {
    assert_eq!(
        render(ColorMode::Never, None),
        "warning: x is not defined\n  --> 3:4\n"
    );
}

#[test]
fn test_output_with_source_name() {
    assert_eq!(
        render(ColorMode::Never, Some("app.js")),
        "warning: x is not defined\n  --> app.js:3:4\n"
    );
}

#[test]
fn test_colored_output_contains_escape_codes() {
    let text = render(ColorMode::Always, None);
    assert!(text.starts_with("\x1b[1;33mwarning\x1b[0m"));
}

#[test]
fn test_summary() {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        emitter.emit_summary(1, 2, 0);
        emitter.emit_summary(0, 0, 0);
    }
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "error: 1 error, 2 warnings, 0 notes emitted\n"
    );
}
