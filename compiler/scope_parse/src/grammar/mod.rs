//! Grammar productions, one file per syntactic family.

mod expr;
mod function;
mod pattern;
mod stmt;
