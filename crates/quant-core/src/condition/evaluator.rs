use super::ast::{BinOp, Expr, UnOp};
use std::collections::HashMap;

/// Outcome of evaluating a compiled condition against one bar's
/// bindings. `RuntimeError` is distinct from `False` so the engine can
/// count it toward the "three consecutive runtime errors disables the
/// signal" rule (§4.2) instead of silently treating it as a no-trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalOutcome {
    True,
    False,
    RuntimeError,
}

impl EvalOutcome {
    pub fn is_true(self) -> bool {
        matches!(self, EvalOutcome::True)
    }
}

/// Evaluates `expr` against `bindings`. An identifier absent from
/// `bindings` resolves to `NaN`; every comparison involving a `NaN`
/// operand is forced to `false` rather than following raw IEEE-754
/// rules (which would make `NaN != x` evaluate `true`).
pub fn evaluate(expr: &Expr, bindings: &HashMap<&str, f64>) -> EvalOutcome {
    match eval_numeric(expr, bindings) {
        Some(v) => {
            if v.is_nan() {
                EvalOutcome::False
            } else if v != 0.0 {
                EvalOutcome::True
            } else {
                EvalOutcome::False
            }
        }
        None => EvalOutcome::RuntimeError,
    }
}

fn eval_numeric(expr: &Expr, bindings: &HashMap<&str, f64>) -> Option<f64> {
    match expr {
        Expr::Lit(v) => Some(*v),
        Expr::Var(name) => Some(bindings.get(name.as_str()).copied().unwrap_or(f64::NAN)),
        Expr::UnOp(UnOp::Neg, inner) => eval_numeric(inner, bindings).map(|v| -v),
        Expr::UnOp(UnOp::Not, inner) => {
            let v = eval_numeric(inner, bindings)?;
            Some(if v.is_nan() || v == 0.0 { 1.0 } else { 0.0 })
        }
        Expr::BinOp(lhs, op, rhs) => {
            let a = eval_numeric(lhs, bindings)?;
            let b = eval_numeric(rhs, bindings)?;
            eval_binop(a, *op, b)
        }
    }
}

fn eval_binop(a: f64, op: BinOp, b: f64) -> Option<f64> {
    let nan_forced_false = a.is_nan() || b.is_nan();
    let bool_f = |b: bool| if b { 1.0 } else { 0.0 };
    Some(match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return None;
            }
            a / b
        }
        BinOp::Mod => {
            if b == 0.0 {
                return None;
            }
            a % b
        }
        BinOp::Lt => bool_f(!nan_forced_false && a < b),
        BinOp::Le => bool_f(!nan_forced_false && a <= b),
        BinOp::Gt => bool_f(!nan_forced_false && a > b),
        BinOp::Ge => bool_f(!nan_forced_false && a >= b),
        BinOp::Eq => bool_f(!nan_forced_false && a == b),
        BinOp::Ne => bool_f(!nan_forced_false && a != b),
        BinOp::And => bool_f(a != 0.0 && b != 0.0),
        BinOp::Or => bool_f(a != 0.0 || b != 0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::parser::parse;

    fn bindings() -> HashMap<&'static str, f64> {
        let mut m = HashMap::new();
        m.insert("RSI", 25.0);
        m.insert("close", 105.0);
        m.insert("SMA_20", 100.0);
        m
    }

    #[test]
    fn true_when_both_sides_hold() {
        let ast = parse("RSI < 30 && close > SMA_20").unwrap();
        assert_eq!(evaluate(&ast, &bindings()), EvalOutcome::True);
    }

    #[test]
    fn false_when_one_side_fails() {
        let ast = parse("RSI > 30 && close > SMA_20").unwrap();
        assert_eq!(evaluate(&ast, &bindings()), EvalOutcome::False);
    }

    #[test]
    fn absent_identifier_forces_comparison_false_including_not_equal() {
        let b = bindings();
        let eq_ast = parse("MACD == 0").unwrap();
        let ne_ast = parse("MACD != 0").unwrap();
        assert_eq!(evaluate(&eq_ast, &b), EvalOutcome::False);
        assert_eq!(evaluate(&ne_ast, &b), EvalOutcome::False);
    }

    #[test]
    fn division_by_zero_is_runtime_error() {
        let ast = parse("close / 0 > 1").unwrap();
        assert_eq!(evaluate(&ast, &bindings()), EvalOutcome::RuntimeError);
    }

    #[test]
    fn negation_flips_result() {
        let ast = parse("!(RSI > 70)").unwrap();
        assert_eq!(evaluate(&ast, &bindings()), EvalOutcome::True);
    }
}
