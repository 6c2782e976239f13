//! DIMACS CNF format.
//!
//! Standard format used in SAT competitions:
//!
//! ```text
//! c comment
//! p cnf <num_vars> <num_clauses>
//! 1 -2 0
//! 2 3 0
//! ```

use std::fmt::Write;

use tracing::warn;

use crate::error::{SatError, SatResult};
use crate::formula::{Clause, Cnf};
use crate::literal::Lit;

/// Parse a DIMACS CNF document.
///
/// Clauses may span lines; a trailing clause without its terminating `0` is
/// accepted. A `%` line ends the document (SATLIB convention). The result
/// is validated against the header's variable count.
pub fn parse(source: &str) -> SatResult<Cnf> {
    let mut header: Option<(u32, usize)> = None;
    let mut clauses = Vec::new();
    let mut current: Vec<Lit> = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }

        if line.starts_with('p') {
            if header.is_some() {
                return Err(dimacs_error(lineno, "duplicate 'p cnf' header"));
            }
            header = Some(parse_header(line, lineno)?);
            continue;
        }

        if header.is_none() {
            return Err(dimacs_error(lineno, "clause before 'p cnf' header"));
        }

        for token in line.split_whitespace() {
            let value: i64 = token
                .parse()
                .map_err(|e| dimacs_error(lineno, format!("invalid literal '{token}': {e}")))?;
            if value == 0 {
                clauses.push(Clause::new(current.drain(..)));
            } else {
                let lit = Lit::from_dimacs(value)
                    .ok_or_else(|| dimacs_error(lineno, format!("literal {value} out of range")))?;
                current.push(lit);
            }
        }
    }

    if !current.is_empty() {
        clauses.push(Clause::new(current));
    }

    let (num_vars, declared) =
        header.ok_or_else(|| dimacs_error(1, "missing 'p cnf' header"))?;
    if declared != clauses.len() {
        warn!(
            declared,
            found = clauses.len(),
            "DIMACS header clause count does not match body"
        );
    }

    Cnf::from_clauses(num_vars, clauses)
}

/// Render a formula as DIMACS, with optional leading comment lines.
pub fn to_dimacs(cnf: &Cnf, comments: &[&str]) -> String {
    let mut out = String::new();
    for comment in comments {
        let _ = writeln!(out, "c {comment}");
    }
    let _ = writeln!(out, "p cnf {} {}", cnf.num_vars(), cnf.num_clauses());
    for clause in cnf.clauses() {
        for lit in clause {
            let _ = write!(out, "{} ", lit.to_dimacs());
        }
        out.push_str("0\n");
    }
    out
}

fn parse_header(line: &str, lineno: usize) -> SatResult<(u32, usize)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 || parts[0] != "p" || parts[1] != "cnf" {
        return Err(dimacs_error(lineno, "expected 'p cnf <vars> <clauses>'"));
    }
    let num_vars = parts[2]
        .parse()
        .map_err(|e| dimacs_error(lineno, format!("invalid variable count: {e}")))?;
    let num_clauses = parts[3]
        .parse()
        .map_err(|e| dimacs_error(lineno, format!("invalid clause count: {e}")))?;
    Ok((num_vars, num_clauses))
}

fn dimacs_error(line: usize, message: impl Into<String>) -> SatError {
    SatError::Dimacs {
        line,
        message: message.into(),
    }
}

impl Cnf {
    /// Parse a DIMACS document. See [`parse`].
    pub fn from_dimacs(source: &str) -> SatResult<Self> {
        parse(source)
    }

    /// Render as DIMACS without comments.
    pub fn to_dimacs(&self) -> String {
        to_dimacs(self, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimacs() {
        let input = r"
c This is a comment
p cnf 3 2
1 -2 0
2 3 0
";
        let cnf = parse(input).unwrap();
        assert_eq!(cnf.num_vars(), 3);
        assert_eq!(cnf.num_clauses(), 2);
        assert_eq!(cnf.clauses()[0], Clause::from_dimacs(&[1, -2]).unwrap());
    }

    #[test]
    fn test_clause_spanning_lines_and_percent_terminator() {
        let input = "p cnf 3 1\n1 2\n3 0\n%\n0\n";
        let cnf = parse(input).unwrap();
        assert_eq!(cnf.num_clauses(), 1);
        assert_eq!(cnf.clauses()[0].len(), 3);
    }

    #[test]
    fn test_unterminated_trailing_clause() {
        let cnf = parse("p cnf 2 1\n1 -2").unwrap();
        assert_eq!(cnf.num_clauses(), 1);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse("1 2 0\n"), Err(SatError::Dimacs { line: 1, .. })));
        assert!(matches!(parse(""), Err(SatError::Dimacs { .. })));
    }

    #[test]
    fn test_bad_header() {
        assert!(parse("p dnf 2 1\n").is_err());
        assert!(parse("p cnf -2 1\n").is_err());
    }

    #[test]
    fn test_bad_literal() {
        let err = parse("p cnf 2 1\n1 x 0\n").unwrap_err();
        assert!(matches!(err, SatError::Dimacs { line: 2, .. }));
    }

    #[test]
    fn test_literal_out_of_declared_range() {
        let err = parse("p cnf 2 1\n1 3 0\n").unwrap_err();
        assert!(matches!(err, SatError::InvalidFormula { literal: 3, .. }));
    }

    #[test]
    fn test_emit() {
        let cnf = Cnf::from_dimacs_clauses(2, &[&[1, 2], &[-1, -2]]).unwrap();
        assert_eq!(cnf.to_dimacs(), "p cnf 2 2\n1 2 0\n-1 -2 0\n");
        let with_comment = to_dimacs(&cnf, &["xor"]);
        assert!(with_comment.starts_with("c xor\np cnf 2 2\n"));
        assert_eq!(parse(&with_comment).unwrap(), cnf);
    }
}
