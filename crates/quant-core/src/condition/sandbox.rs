use crate::error::ConditionError;

/// Characters a condition expression may contain. Anything else —
/// including brackets, braces, backticks, quotes, backslashes, and
/// `;` — is rejected before the expression is tokenized at all.
fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || c == ' '
        || matches!(
            c,
            '(' | ')' | '.' | ',' | '!' | '<' | '>' | '=' | '&' | '|' | '+' | '-' | '*' | '/' | '%'
        )
}

/// Identifiers that must never appear, even though every character in
/// them is individually legal — these are the names an interpreter
/// built on a host `eval` would reach for to escape the sandbox. This
/// system has no host eval (§9 Design Notes), but the deny-list is
/// still enforced structurally so a condition can never reference
/// anything beyond the bound `EnrichedBar` fields.
const DENIED_IDENTIFIERS: &[&str] = &[
    "constructor",
    "prototype",
    "process",
    "global",
    "require",
    "import",
    "function",
    "new",
];

pub fn check_charset(expr: &str) -> Result<(), ConditionError> {
    for c in expr.chars() {
        if !is_allowed_char(c) {
            return Err(ConditionError::IllegalCharacter(c));
        }
    }
    Ok(())
}

pub fn check_identifier(ident: &str) -> Result<(), ConditionError> {
    if DENIED_IDENTIFIERS.contains(&ident.to_lowercase().as_str()) {
        return Err(ConditionError::DeniedIdentifier(ident.to_string()));
    }
    Ok(())
}
