//! Public surface of the analyzer.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use scope_diagnostic::{Diagnostic, DiagnosticBag};
use scope_ir::{Ast, NodeId, NodeKind, StringInterner};
use tracing::debug;

use crate::errors::EngineError;
use crate::eval::{evaluate_program, EvalContext};
use crate::host::NativeRegistry;
use crate::options::EngineOptions;
use crate::reserved::{ReservedRegistry, ReservedSymbol};
use crate::resolver::{self, QueryRange};
use crate::symbols::{SymbolEntry, SymbolTable};

/// Parses programs and analyzes them.
///
/// One engine owns one program tree. Every [`Engine::build`] discards the
/// previous symbol table and analysis diagnostics and starts over.
pub struct Engine {
    options: EngineOptions,
    reserved: ReservedRegistry,
    natives: NativeRegistry,
    interner: StringInterner,
    ast: Ast,
    root: Option<NodeId>,
    table: SymbolTable,
    diagnostics: DiagnosticBag,
    parse_diagnostics: DiagnosticBag,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl Engine {
    /// Engine with the built-in native methods and no reserved symbols.
    pub fn new(options: EngineOptions) -> Self {
        Engine {
            options,
            reserved: ReservedRegistry::new(),
            natives: NativeRegistry::with_builtins(),
            interner: StringInterner::new(),
            ast: Ast::new(),
            root: None,
            table: SymbolTable::new(),
            diagnostics: DiagnosticBag::new(),
            parse_diagnostics: DiagnosticBag::new(),
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// Parse `source`. With `merge`, its statements are appended to the
    /// program parsed before; otherwise it replaces it.
    ///
    /// Returns `false` on a syntax error, which is recorded as a diagnostic
    /// and replaces any syntax error of an earlier parse. A failed parse
    /// keeps the previous program.
    pub fn parse(&mut self, source: &str, merge: bool) -> bool {
        self.try_parse(source, merge).is_ok()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len(), merge))]
    pub fn try_parse(&mut self, source: &str, merge: bool) -> Result<(), EngineError> {
        self.parse_diagnostics.reset();

        // A replacing parse builds a fresh tree; the current one stays until
        // the new source is known to be a program.
        let existing = if merge { self.root } else { None };
        let mut fresh = Ast::new();
        let ast = if existing.is_some() {
            &mut self.ast
        } else {
            &mut fresh
        };

        let root = match scope_parse::parse(source, ast, &mut self.interner) {
            Ok(root) => root,
            Err(error) => {
                let message = format!("SyntaxError: {}", error.message);
                self.parse_diagnostics
                    .push(Diagnostic::error(message, error.location));
                return Err(error.into());
            }
        };

        if !matches!(ast.kind(root), NodeKind::Program { .. }) {
            let error = EngineError::NotAProgram;
            self.parse_diagnostics
                .push(Diagnostic::error(error.to_string(), ast.location(root)));
            return Err(error);
        }

        match existing {
            Some(existing) => {
                if self.ast.merge_programs(existing, root) {
                    debug!("merged into the existing program");
                } else {
                    self.root = Some(root);
                }
            }
            None => {
                self.ast = fresh;
                self.root = Some(root);
            }
        }
        Ok(())
    }

    /// Analyze the current program.
    ///
    /// Returns `false` when there is no program or analysis hit an internal
    /// fault. Findings about the program itself never fail a build.
    pub fn build(&mut self) -> bool {
        self.try_build().is_ok()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn try_build(&mut self) -> Result<(), EngineError> {
        let root = self.root.ok_or(EngineError::NoProgram)?;
        self.diagnostics.reset();
        self.table = SymbolTable::new();

        let context = EvalContext {
            ast: &self.ast,
            reserved: &self.reserved,
            natives: &self.natives,
            options: &self.options,
        };
        let interner = &mut self.interner;
        let table = &mut self.table;
        let diagnostics = &mut self.diagnostics;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            evaluate_program(context, interner, table, diagnostics, root)
        }));

        match outcome {
            Ok(_) => {
                debug!(
                    symbols = self.table.symbol_count(),
                    frames = self.table.frame_count(),
                    diagnostics = self.diagnostics.len(),
                    "build finished"
                );
                Ok(())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                debug!(%message, "analysis aborted");
                Err(EngineError::Internal(message))
            }
        }
    }

    /// Analysis diagnostics in push order, then syntax errors.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().chain(self.parse_diagnostics.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors() || self.parse_diagnostics.has_errors()
    }

    pub fn reset_diagnostics(&mut self) {
        self.diagnostics.reset();
        self.parse_diagnostics.reset();
    }

    // Reserved symbols

    pub fn add_reserved_symbol(&mut self, symbol: ReservedSymbol) {
        self.reserved.register(symbol);
    }

    pub fn set_reserved_symbols(&mut self, symbols: Vec<ReservedSymbol>) {
        self.reserved.replace_all(symbols);
    }

    pub fn reserved_symbols(&self) -> &[ReservedSymbol] {
        self.reserved.list()
    }

    /// Native methods reachable through member access.
    pub fn natives_mut(&mut self) -> &mut NativeRegistry {
        &mut self.natives
    }

    // Queries against the last build

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Declaration of `name` visible from `range`, searched from the root
    /// frame.
    pub fn find_symbol(&self, name: &str, range: Option<QueryRange>) -> Option<&SymbolEntry> {
        let name = self.interner.get(name)?;
        let main = self.table.main_frame()?;
        resolver::find_symbol(&self.table, name, range, main).map(|id| self.table.symbol(id))
    }

    /// Declarations whose name starts with `prefix`, innermost first.
    pub fn find_symbols_with_prefix(
        &self,
        prefix: &str,
        range: Option<QueryRange>,
    ) -> Vec<&SymbolEntry> {
        let Some(main) = self.table.main_frame() else {
            return Vec::new();
        };
        resolver::find_symbols_with_prefix(&self.table, &self.interner, prefix, range, main)
            .into_iter()
            .map(|id| self.table.symbol(id))
            .collect()
    }

    /// Text of an interned name held by an entry.
    pub fn name_of(&self, entry: &SymbolEntry) -> Option<&str> {
        entry.id.map(|name| self.interner.lookup(name))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "analysis panicked".to_string()
    }
}
