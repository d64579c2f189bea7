//! Call-style expression tree: `3(2(1), 1)`.

use crate::error::ExprSyntaxError;
use crate::graph::VertexId;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A vertex with no incoming edges.
    Leaf(VertexId),
    /// A vertex applied to its sources, in order-key order.
    Call { head: VertexId, args: Vec<Expr> },
}

impl Expr {
    pub fn head(&self) -> &VertexId {
        match self {
            Expr::Leaf(id) | Expr::Call { head: id, .. } => id,
        }
    }

    pub fn args(&self) -> &[Expr] {
        match self {
            Expr::Leaf(_) => &[],
            Expr::Call { args, .. } => args,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Leaf(id) => write!(f, "{}", id),
            Expr::Call { head, args } => {
                write!(f, "{}(", head)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for Expr {
    type Err = ExprSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor { text: s, pos: 0 };
        let expr = cursor.expr()?;
        cursor.skip_ws();
        if cursor.pos != s.len() {
            return Err(cursor.error("trailing input"));
        }
        Ok(expr)
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek().filter(|c| c.is_whitespace()) {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, message: &str) -> ExprSyntaxError {
        ExprSyntaxError {
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn expr(&mut self) -> Result<Expr, ExprSyntaxError> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '(' | ')' | ',') || c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
        if start == self.pos {
            return Err(self.error("expected a vertex name"));
        }
        let head = VertexId::new(&self.text[start..self.pos]);

        self.skip_ws();
        if self.peek() != Some('(') {
            return Ok(Expr::Leaf(head));
        }
        self.pos += 1;

        let mut args = Vec::new();
        loop {
            args.push(self.expr()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.error("expected ',' or ')'")),
            }
        }
        Ok(Expr::Call { head, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(id: &str) -> Expr {
        Expr::Leaf(VertexId::new(id))
    }

    #[test]
    fn renders_nested_calls() {
        let e = Expr::Call {
            head: VertexId::new("3"),
            args: vec![
                Expr::Call {
                    head: VertexId::new("2"),
                    args: vec![leaf("1")],
                },
                leaf("1"),
            ],
        };
        assert_eq!(e.to_string(), "3(2(1), 1)");
        assert_eq!("3(2(1), 1)".parse::<Expr>().unwrap(), e);
    }

    #[test]
    fn parses_loose_spacing() {
        let e: Expr = " 4 ( 1 ,2(0)) ".parse().unwrap();
        assert_eq!(e.head().as_str(), "4");
        assert_eq!(e.args().len(), 2);
        assert_eq!(e.args()[1].to_string(), "2(0)");
    }

    #[test]
    fn rejects_broken_input() {
        for bad in ["", "3(", "3(1,", "3(1))", "(1)", "3(1 2)"] {
            assert!(bad.parse::<Expr>().is_err(), "accepted {:?}", bad);
        }
    }
}
