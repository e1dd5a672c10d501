//! Command-line flags.

use scope_diagnostic::emitter::ColorMode;
use scope_eval::{EngineOptions, ReservedSymbol, ValueType};

/// Everything the command line asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct CliArgs {
    pub options: EngineOptions,
    /// Extra reserved names, added after the default catalogue.
    pub reserved: Vec<ReservedSymbol>,
    pub color: ColorMode,
    pub json: bool,
    /// Analyze all files as one program instead of one by one.
    pub merge: bool,
    pub files: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
    #[error("invalid call depth '{0}', expected a non-negative integer")]
    InvalidDepth(String),
    #[error("invalid reserved symbol '{0}', expected <name>:<type>")]
    InvalidReserved(String),
    #[error("no input files")]
    NoInput,
}

/// What the process should do.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Help,
    Version,
    Check(CliArgs),
}

/// Parse everything after the program name.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut parsed = CliArgs {
        options: EngineOptions::default(),
        reserved: Vec::new(),
        color: ColorMode::Auto,
        json: false,
        merge: false,
        files: Vec::new(),
    };

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--call-only" => parsed.options.evaluate_on_call_only = true,
            "--eval-values" => parsed.options.always_evaluate_values = true,
            "--check-native-arity" => parsed.options.check_native_arity = true,
            "--no-color" => parsed.color = ColorMode::Never,
            "--json" => parsed.json = true,
            "--merge" => parsed.merge = true,
            _ => {
                if let Some(depth) = arg.strip_prefix("--max-depth=") {
                    parsed.options.max_call_depth = depth
                        .parse()
                        .map_err(|_| UsageError::InvalidDepth(depth.to_string()))?;
                } else if let Some(entry) = arg.strip_prefix("--reserved=") {
                    parsed.reserved.push(parse_reserved(entry)?);
                } else if arg.starts_with('-') && arg != "-" {
                    return Err(UsageError::UnknownFlag(arg.clone()));
                } else {
                    parsed.files.push(arg.clone());
                }
            }
        }
    }

    if parsed.files.is_empty() {
        return Err(UsageError::NoInput);
    }
    Ok(Command::Check(parsed))
}

/// `name:type`, e.g. `print:function`.
fn parse_reserved(entry: &str) -> Result<ReservedSymbol, UsageError> {
    let invalid = || UsageError::InvalidReserved(entry.to_string());
    let (name, ty) = entry.split_once(':').ok_or_else(invalid)?;
    if name.is_empty() {
        return Err(invalid());
    }
    let ty = ValueType::from_name(ty).ok_or_else(invalid)?;
    Ok(ReservedSymbol::declared(name, ty))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
