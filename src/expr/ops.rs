//! Operation table: vertex name -> numeric literal or operator.
//!
//! File shape (one entry per line, trailing commas optional):
//! {
//!   1: 2.5,
//!   2: 3,
//!   3: add
//! }

use crate::Result;
use crate::error::EvalError;
use crate::graph::VertexId;

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, error, warn};

/// The closed operator vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Variadic sum, at least one operand.
    Add,
    /// Variadic product; no operands gives 1.
    Multiply,
    /// Natural exponential of exactly one operand.
    Exp,
}

impl Operator {
    /// Accepts the names and the `+` / `*` symbols.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "add" | "+" => Some(Operator::Add),
            "multiply" | "*" => Some(Operator::Multiply),
            "exp" => Some(Operator::Exp),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Multiply => "multiply",
            Operator::Exp => "exp",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operator::Add => Arity::AtLeast(1),
            Operator::Multiply => Arity::AtLeast(0),
            Operator::Exp => Arity::Exactly(1),
        }
    }

    /// `WrongOperatorArity` at `vertex` unless `found` operands are accepted.
    pub fn check_operands(
        self,
        vertex: &VertexId,
        found: usize,
    ) -> std::result::Result<(), EvalError> {
        if self.arity().admits(found) {
            Ok(())
        } else {
            Err(EvalError::WrongOperatorArity {
                vertex: vertex.clone(),
                operator: self,
                expected: self.arity(),
                found,
            })
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of operands an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn admits(self, n: usize) -> bool {
        match self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(k) => write!(f, "exactly {}", k),
            Arity::AtLeast(k) => write!(f, "at least {}", k),
        }
    }
}

/// One table entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Literal(f64),
    Operator(Operator),
    /// Any other token; kept verbatim, only fatal when evaluated.
    Symbol(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationTable {
    entries: HashMap<VertexId, Operation>,
}

impl OperationTable {
    /// Later entries for the same name replace earlier ones.
    pub fn insert(&mut self, vertex: VertexId, operation: Operation) -> Option<Operation> {
        self.entries.insert(vertex, operation)
    }

    pub fn get(&self, vertex: &str) -> Option<&Operation> {
        self.entries.get(vertex)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A skipped line, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDiagnostic {
    pub line: usize,
    pub raw: String,
}

impl fmt::Display for OperationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: malformed entry {:?}, skipped", self.line, self.raw)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedOperations {
    pub table: OperationTable,
    pub diagnostics: Vec<OperationDiagnostic>,
}

/// Parse the operation table text. Malformed lines are reported, not fatal.
pub fn parse_operation_table(text: &str) -> Result<ParsedOperations> {
    const NUMBER_RE: &str = r"^-?\d+(?:\.\d+)?$";
    let number = Regex::new(NUMBER_RE)?;

    let mut out = ParsedOperations::default();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line == "{" || line == "}" {
            continue;
        }

        let Some((name, value)) = split_entry(line) else {
            out.diagnostics.push(OperationDiagnostic {
                line: lineno + 1,
                raw: line.to_string(),
            });
            continue;
        };

        let operation = if number.is_match(value) {
            match value.parse::<f64>() {
                Ok(v) => Operation::Literal(v),
                Err(_) => Operation::Symbol(value.to_string()),
            }
        } else if let Some(op) = Operator::from_token(value) {
            Operation::Operator(op)
        } else {
            Operation::Symbol(value.to_string())
        };

        if out.table.insert(VertexId::new(name), operation).is_some() {
            debug!("operation for {} redefined at line {}", name, lineno + 1);
        }
    }
    Ok(out)
}

/// `name: value[,]` with exactly one colon and both sides non-empty.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    if value.contains(':') {
        return None;
    }
    let name = name.trim();
    let value = value.trim().trim_end_matches(',').trim_end();
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name, value))
}

/// Load an operation table file, best effort.
///
/// Console diagnostics only: a missing file gives an empty table, malformed
/// lines are skipped.
pub fn load_operation_file(path: &Path) -> OperationTable {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            error!("operation file not found: {}", path.display());
            return OperationTable::default();
        }
        Err(err) => {
            error!("cannot read operation file {}: {}", path.display(), err);
            return OperationTable::default();
        }
    };

    match parse_operation_table(&text) {
        Ok(parsed) => {
            for diag in &parsed.diagnostics {
                warn!("{}: {}", path.display(), diag);
            }
            parsed.table
        }
        Err(err) => {
            error!("cannot parse operation file {}: {}", path.display(), err);
            OperationTable::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_literals_and_operators() {
        let parsed = parse_operation_table("{\n  x: 2,\n  y: -3.5,\n  s: add,\n  p: *,\n  e: exp\n}\n")
            .unwrap();
        let t = &parsed.table;

        assert_eq!(t.len(), 5);
        assert_eq!(t.get("x"), Some(&Operation::Literal(2.0)));
        assert_eq!(t.get("y"), Some(&Operation::Literal(-3.5)));
        assert_eq!(t.get("s"), Some(&Operation::Operator(Operator::Add)));
        assert_eq!(t.get("p"), Some(&Operation::Operator(Operator::Multiply)));
        assert_eq!(t.get("e"), Some(&Operation::Operator(Operator::Exp)));
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let parsed = parse_operation_table("{\n1: sin,\n2: 1e5\n}").unwrap();
        assert_eq!(parsed.table.get("1"), Some(&Operation::Symbol("sin".into())));
        assert_eq!(parsed.table.get("2"), Some(&Operation::Symbol("1e5".into())));
    }

    #[test]
    fn malformed_lines_are_skipped_with_line_numbers() {
        let parsed = parse_operation_table("{\nx: 1,\nno colon here\na: b: c\n: 4\ny: 2\n}").unwrap();
        assert_eq!(parsed.table.len(), 2);
        assert_eq!(
            parsed.diagnostics.iter().map(|d| d.line).collect::<Vec<_>>(),
            vec![3, 4, 5]
        );
    }

    #[test]
    fn later_entry_wins() {
        let parsed = parse_operation_table("x: 1\nx: 2").unwrap();
        assert_eq!(parsed.table.get("x"), Some(&Operation::Literal(2.0)));
    }

    #[test]
    fn arity_rules() {
        assert!(!Operator::Add.arity().admits(0));
        assert!(Operator::Add.arity().admits(3));
        assert!(Operator::Multiply.arity().admits(0));
        assert!(Operator::Exp.arity().admits(1));
        assert!(!Operator::Exp.arity().admits(2));
        assert_eq!(Operator::Exp.arity().to_string(), "exactly 1");

        let v = VertexId::new("e");
        assert_eq!(Operator::Exp.check_operands(&v, 1), Ok(()));
        assert!(matches!(
            Operator::Exp.check_operands(&v, 0),
            Err(EvalError::WrongOperatorArity { found: 0, .. })
        ));
    }

    #[test]
    fn missing_file_gives_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_operation_file(&dir.path().join("nope.txt")).is_empty());
    }
}
