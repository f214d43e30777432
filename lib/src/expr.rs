//! Integer arithmetic over decimal and hex literals.
//!
//! Accepts `+ - * / ^` and parentheses. `^` is exponentiation and binds
//! tighter than unary minus, so `-2^2` is `-4`; it associates to the right.
//! Division truncates toward zero. Results are unbounded integers; callers
//! map them into a width.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Upper bound on the bit length of any power computed.
pub const MAX_RESULT_BITS: u64 = 1 << 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("Empty expression")]
    Empty,

    #[error("Unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unexpected {0}")]
    UnexpectedToken(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Negative exponent")]
    NegativeExponent,

    #[error("Result too large")]
    TooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(BigInt),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {n}"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::Caret => "'^'".into(),
            Token::Open => "'('".into(),
            Token::Close => "')'".into(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::Open,
            ')' => Token::Close,
            '0'..='9' => {
                let (radix, start) = match chars.get(i + 1) {
                    Some('x') | Some('X') if c == '0' => (16, i + 2),
                    _ => (10, i),
                };
                let mut end = start;
                while end < chars.len() && chars[end].is_digit(radix) {
                    end += 1;
                }
                if let Some(next) = chars.get(end).filter(|n| n.is_ascii_alphanumeric()) {
                    return Err(ExprError::UnexpectedChar(*next));
                }
                let digits: String = chars[start..end].iter().collect();
                let value = BigInt::parse_bytes(digits.as_bytes(), radix).ok_or(ExprError::UnexpectedEnd)?;
                tokens.push(Token::Number(value));
                i = end;
                continue;
            }
            other => return Err(ExprError::UnexpectedChar(other)),
        };
        tokens.push(token);
        i += 1;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expression(&mut self) -> Result<BigInt, ExprError> {
        let mut acc = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    acc += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    acc -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<BigInt, ExprError> {
        let mut acc = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    acc *= self.unary()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor.is_zero() {
                        return Err(ExprError::DivisionByZero);
                    }
                    acc /= divisor;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<BigInt, ExprError> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            return Ok(-self.unary()?);
        }
        self.power()
    }

    fn power(&mut self) -> Result<BigInt, ExprError> {
        let base = self.atom()?;
        if self.peek() != Some(&Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        let exponent = self.unary()?;
        if exponent.is_negative() {
            return Err(ExprError::NegativeExponent);
        }
        let exponent = exponent.to_u32().ok_or(ExprError::TooLarge)?;
        if base.bits().saturating_mul(u64::from(exponent)) > MAX_RESULT_BITS {
            return Err(ExprError::TooLarge);
        }
        Ok(base.pow(exponent))
    }

    fn atom(&mut self) -> Result<BigInt, ExprError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Open) => {
                let inner = self.expression()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    Some(other) => Err(ExprError::UnexpectedToken(other.describe())),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(other) => Err(ExprError::UnexpectedToken(other.describe())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

pub fn evaluate(text: &str) -> Result<BigInt, ExprError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    match parser.next() {
        None => Ok(value),
        Some(token) => Err(ExprError::UnexpectedToken(token.describe())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use num_traits::One;

    fn eval(text: &str) -> BigInt {
        evaluate(text).unwrap()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(eval("1 + 2 * 3"), BigInt::from(7));
        assert_eq!(eval("(1 + 2) * 3"), BigInt::from(9));
        assert_eq!(eval("2^3^2"), BigInt::from(512));
        assert_eq!(eval("-2^2"), BigInt::from(-4));
        assert_eq!(eval("10 - 4 - 3"), BigInt::from(3));
        assert_eq!(eval("-7 / 2"), BigInt::from(-3));
    }

    #[test]
    fn hex_literals() {
        assert_eq!(eval("0xff + 1"), BigInt::from(256));
        assert_eq!(eval("0XFF"), BigInt::from(255));
    }

    #[test]
    fn big_powers() {
        let expected = (BigUint::one() << 255u32) + BigUint::from(31u32);
        assert_eq!(eval("2^255 + 2^5 - 1"), BigInt::from(expected));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(evaluate("   "), Err(ExprError::Empty));
        assert_eq!(evaluate("1 +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(evaluate("12ab"), Err(ExprError::UnexpectedChar('a')));
        assert_eq!(evaluate("abc"), Err(ExprError::UnexpectedChar('a')));
        assert_eq!(evaluate("1 / 0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("2^-1"), Err(ExprError::NegativeExponent));
        assert_eq!(evaluate("(1"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(evaluate("1 2"), Err(ExprError::UnexpectedToken(_))));
        assert_eq!(evaluate("1 % 2"), Err(ExprError::UnexpectedChar('%')));
    }

    #[test]
    fn caps_power_size() {
        assert_eq!(evaluate("2^65536^2"), Err(ExprError::TooLarge));
    }
}
