//! Scopewise CLI
//!
//! Analyzes script files and prints what looks wrong.
//!
//! Logging is off unless `SCOPEWISE_LOG` is set (same syntax as `RUST_LOG`).
//! Setting `SCOPEWISE_LOG_TREE` as well renders spans as an indented tree,
//! which is the easiest way to follow nested calls.

mod args;
mod globals;

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use std::sync::Once;

use scope_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use scope_diagnostic::{Diagnostic, Severity};
use scope_eval::Engine;
use tracing::debug;

use args::{parse_args, CliArgs, Command};

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter =
            EnvFilter::try_from_env("SCOPEWISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
        let tree = std::env::var_os("SCOPEWISE_LOG_TREE").is_some();
        let registry = tracing_subscriber::registry().with(filter);
        if tree {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(io::stderr)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        } else {
            registry
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .init();
        }
    });
}

fn main() -> ExitCode {
    init_tracing();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&argv) {
        Ok(Command::Help) => {
            print_usage();
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("scopewise {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Ok(Command::Check(cli)) => check(&cli),
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!();
            print_usage();
            ExitCode::from(2)
        }
    }
}

fn print_usage() {
    eprintln!("Usage: scopewise [options] <file>...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --call-only                Analyze function bodies only where they are called");
    eprintln!("  --eval-values              Report unresolved values on declared names too");
    eprintln!("  --check-native-arity       Check argument counts of native methods and callbacks");
    eprintln!("  --max-depth=<n>            Deepest call nesting to follow (default: 32)");
    eprintln!("  --reserved=<name>:<type>   Declare a host-provided name (repeatable)");
    eprintln!("  --merge                    Analyze all files as one program");
    eprintln!("  --json                     Print diagnostics as JSON");
    eprintln!("  --no-color                 Disable colored output");
    eprintln!("  -h, --help                 Print this help");
    eprintln!("  -V, --version              Print the version");
    eprintln!();
    eprintln!("Use '-' to read a program from standard input.");
}

/// Read a source file, or standard input for `-`.
fn read_source(path: &str) -> Result<String, String> {
    let result = if path == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content).map(|_| content)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

fn new_engine(cli: &CliArgs) -> Engine {
    let mut engine = Engine::new(cli.options.clone());
    let mut reserved = globals::default_reserved();
    reserved.extend(cli.reserved.iter().cloned());
    engine.set_reserved_symbols(reserved);
    engine
}

/// One analyzed unit: a file, or every file when merging.
struct Report {
    source_name: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

fn check(cli: &CliArgs) -> ExitCode {
    let mut sources = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match read_source(path) {
            Ok(content) => sources.push((path.as_str(), content)),
            Err(message) => {
                eprintln!("error: {message}");
                return ExitCode::from(2);
            }
        }
    }

    let reports = if cli.merge {
        let mut engine = new_engine(cli);
        let mut parsed_any = false;
        // Each parse clears the syntax errors of the one before.
        let mut syntax_errors = Vec::new();
        for (path, content) in &sources {
            debug!(path, "merging");
            if engine.parse(content, parsed_any) {
                parsed_any = true;
            } else {
                syntax_errors.extend(engine.diagnostics().cloned());
                engine.reset_diagnostics();
            }
        }
        engine.build();
        let mut diagnostics: Vec<Diagnostic> = engine.diagnostics().cloned().collect();
        diagnostics.extend(syntax_errors);
        vec![Report {
            source_name: None,
            diagnostics,
        }]
    } else {
        sources
            .iter()
            .map(|(path, content)| {
                let mut engine = new_engine(cli);
                if engine.parse(content, false) {
                    engine.build();
                }
                Report {
                    source_name: Some((*path).to_string()),
                    diagnostics: engine.diagnostics().cloned().collect(),
                }
            })
            .collect()
    };

    let errors = reports
        .iter()
        .flat_map(|report| &report.diagnostics)
        .filter(|d| d.severity == Severity::Error)
        .count();

    if cli.json {
        emit_json(&reports);
    } else {
        emit_terminal(cli, &reports);
    }

    if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn emit_json(reports: &[Report]) {
    let mut emitter = JsonEmitter::new(io::stdout());
    emitter.begin();
    for report in reports {
        emitter.emit_all(&report.diagnostics);
    }
    emitter.end();
    emitter.flush();
}

fn emit_terminal(cli: &CliArgs, reports: &[Report]) {
    let is_tty = io::stderr().is_terminal();
    let (mut errors, mut warnings, mut infos) = (0, 0, 0);
    let mut last = None;

    for report in reports {
        let emitter = TerminalEmitter::with_color_mode(io::stderr(), cli.color, is_tty);
        let mut emitter = match &report.source_name {
            Some(name) => emitter.with_source_name(name.clone()),
            None => emitter,
        };
        for diagnostic in &report.diagnostics {
            match diagnostic.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
                Severity::Info => infos += 1,
            }
            emitter.emit(diagnostic);
        }
        emitter.flush();
        last = Some(emitter);
    }

    if let Some(mut emitter) = last {
        emitter.emit_summary(errors, warnings, infos);
        emitter.flush();
    }
}
