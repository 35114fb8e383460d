//! Sandboxed condition compiler and evaluator (§4.2, C2).
//!
//! No host `eval` exists anywhere in this module: expressions are
//! tokenized, parsed into an [`ast::Expr`] tree, and walked directly.

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod sandbox;

use crate::error::ConditionError;
pub use evaluator::EvalOutcome;
use std::collections::HashMap;

/// A compiled, cacheable condition. Carries its source text for
/// logging/debugging but never re-parses it after [`compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCondition {
    source: String,
    ast: ast::Expr,
}

impl CompiledCondition {
    pub fn compile(expr: &str) -> Result<Self, ConditionError> {
        let ast = parser::parse(expr)?;
        Ok(Self {
            source: expr.to_string(),
            ast,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate(&self, bindings: &HashMap<&str, f64>) -> EvalOutcome {
        evaluator::evaluate(&self.ast, bindings)
    }
}
