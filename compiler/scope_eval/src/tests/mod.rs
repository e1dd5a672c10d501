//! Tests for the coercion rules and the native built-ins.
