use super::ast::{BinOp, Expr, UnOp};
use super::lexer::{self, Token};
use super::sandbox;
use crate::error::ConditionError;

/// Recursive-descent parser over the precedence chain
/// `or -> and -> not -> comparison -> arith -> term -> factor`,
/// matching the grammar in §4.2.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn eat(&mut self, expected: &Token) -> Result<(), ConditionError> {
        match self.advance() {
            Some(ref t) if t == expected => Ok(()),
            Some(t) => Err(ConditionError::UnexpectedToken(format!("{t:?}"))),
            None => Err(ConditionError::UnexpectedEof),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ConditionError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(Token::OrOr)) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expr::BinOp(Box::new(lhs), BinOp::Or, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ConditionError> {
        let mut lhs = self.parse_not()?;
        while matches!(self.peek(), Some(Token::AndAnd)) {
            self.advance();
            let rhs = self.parse_not()?;
            lhs = Expr::BinOp(Box::new(lhs), BinOp::And, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expr, ConditionError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.advance();
            let inner = self.parse_not()?;
            return Ok(Expr::UnOp(UnOp::Not, Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ConditionError> {
        let lhs = self.parse_arith()?;
        let op = match self.peek() {
            Some(Token::Lt) => Some(BinOp::Lt),
            Some(Token::Le) => Some(BinOp::Le),
            Some(Token::Gt) => Some(BinOp::Gt),
            Some(Token::Ge) => Some(BinOp::Ge),
            Some(Token::EqEq) => Some(BinOp::Eq),
            Some(Token::Ne) => Some(BinOp::Ne),
            _ => None,
        };
        match op {
            Some(op) => {
                self.advance();
                let rhs = self.parse_arith()?;
                Ok(Expr::BinOp(Box::new(lhs), op, Box::new(rhs)))
            }
            None => Ok(lhs),
        }
    }

    fn parse_arith(&mut self) -> Result<Expr, ConditionError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::BinOp(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, ConditionError> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            lhs = Expr::BinOp(Box::new(lhs), op, Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr, ConditionError> {
        match self.advance() {
            Some(Token::Minus) => {
                let inner = self.parse_factor()?;
                Ok(Expr::UnOp(UnOp::Neg, Box::new(inner)))
            }
            Some(Token::Not) => {
                let inner = self.parse_factor()?;
                Ok(Expr::UnOp(UnOp::Not, Box::new(inner)))
            }
            Some(Token::Number(n)) => Ok(Expr::Lit(n)),
            Some(Token::Ident(name)) => {
                for segment in name.split('.') {
                    sandbox::check_identifier(segment)?;
                }
                let name = name.strip_prefix("data.").unwrap_or(&name).to_string();
                Ok(Expr::Var(name))
            }
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                self.eat(&Token::RParen)?;
                Ok(inner)
            }
            Some(t) => Err(ConditionError::UnexpectedToken(format!("{t:?}"))),
            None => Err(ConditionError::UnexpectedEof),
        }
    }
}

/// Compiles a condition expression into an [`Expr`] AST, enforcing the
/// sandbox charset/identifier rules before tokenizing.
pub fn parse(expr: &str) -> Result<Expr, ConditionError> {
    sandbox::check_charset(expr)?;
    let tokens = lexer::tokenize(expr).map_err(ConditionError::UnexpectedToken)?;
    if tokens.is_empty() {
        return Err(ConditionError::UnexpectedEof);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let ast = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(ConditionError::UnbalancedParens);
    }
    Ok(ast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_precedence_correctly() {
        let ast = parse("RSI < 30 && close > SMA_20").unwrap();
        assert_eq!(
            ast,
            Expr::BinOp(
                Box::new(Expr::BinOp(
                    Box::new(Expr::Var("RSI".into())),
                    BinOp::Lt,
                    Box::new(Expr::Lit(30.0)),
                )),
                BinOp::And,
                Box::new(Expr::BinOp(
                    Box::new(Expr::Var("close".into())),
                    BinOp::Gt,
                    Box::new(Expr::Var("SMA_20".into())),
                )),
            )
        );
    }

    #[test]
    fn strips_data_prefix() {
        let ast = parse("data.close >= 100").unwrap();
        assert_eq!(
            ast,
            Expr::BinOp(
                Box::new(Expr::Var("close".into())),
                BinOp::Ge,
                Box::new(Expr::Lit(100.0)),
            )
        );
    }

    #[test]
    fn arithmetic_binds_tighter_than_comparison() {
        let ast = parse("close - SMA_20 > 0").unwrap();
        assert_eq!(
            ast,
            Expr::BinOp(
                Box::new(Expr::BinOp(
                    Box::new(Expr::Var("close".into())),
                    BinOp::Sub,
                    Box::new(Expr::Var("SMA_20".into())),
                )),
                BinOp::Gt,
                Box::new(Expr::Lit(0.0)),
            )
        );
    }

    #[test]
    fn rejects_denied_identifier() {
        assert!(matches!(
            parse("process.exit()"),
            Err(ConditionError::DeniedIdentifier(_))
        ));
    }

    #[test]
    fn rejects_denied_identifier_in_dotted_segment() {
        assert!(matches!(
            parse("constructor.prototype > 0"),
            Err(ConditionError::DeniedIdentifier(_))
        ));
    }

    #[test]
    fn rejects_unbalanced_parens() {
        assert!(parse("(close > 1").is_err());
        assert!(parse("close > 1)").is_err());
    }

    #[test]
    fn parses_negation_and_parens() {
        let ast = parse("!(RSI > 70)").unwrap();
        assert_eq!(
            ast,
            Expr::UnOp(
                UnOp::Not,
                Box::new(Expr::BinOp(
                    Box::new(Expr::Var("RSI".into())),
                    BinOp::Gt,
                    Box::new(Expr::Lit(70.0)),
                )),
            )
        );
    }
}
