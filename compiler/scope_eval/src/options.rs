//! Engine configuration.

/// Switches that change how much the engine evaluates and reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineOptions {
    /// Analyze function bodies only when a call is found.
    pub evaluate_on_call_only: bool,
    /// Report unresolved operands even for declared entries and
    /// speculative call arguments.
    pub always_evaluate_values: bool,
    /// Compare argument counts of native methods and callbacks.
    pub check_native_arity: bool,
    /// Maximum nesting of call bodies entered during one build.
    pub max_call_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            evaluate_on_call_only: false,
            always_evaluate_values: false,
            check_native_arity: false,
            max_call_depth: 32,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn evaluate_on_call_only(mut self, enabled: bool) -> Self {
        self.evaluate_on_call_only = enabled;
        self
    }

    #[must_use]
    pub fn always_evaluate_values(mut self, enabled: bool) -> Self {
        self.always_evaluate_values = enabled;
        self
    }

    #[must_use]
    pub fn check_native_arity(mut self, enabled: bool) -> Self {
        self.check_native_arity = enabled;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
