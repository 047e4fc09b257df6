use std::fmt;

use serde::Serialize;

/// Which of the three input files a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportSource {
    Edges,
    Articles,
    Types,
}

impl ImportSource {
    /// Number of TAB-separated fields a line of this file must have.
    pub fn expected_fields(self) -> usize {
        match self {
            ImportSource::Edges => 2,
            ImportSource::Articles => 3,
            ImportSource::Types => 2,
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportSource::Edges => "edges",
            ImportSource::Articles => "article-category",
            ImportSource::Types => "article-type",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    FieldCount { expected: usize, found: usize },
    InvalidArticleId { value: String },
    EmptyField { index: usize },
    InvalidUtf8,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::FieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            DiagnosticKind::InvalidArticleId { value } => {
                write!(f, "article id '{value}' is not an unsigned integer")
            }
            DiagnosticKind::EmptyField { index } => write!(f, "field {index} is empty"),
            DiagnosticKind::InvalidUtf8 => f.write_str("line is not valid UTF-8"),
        }
    }
}

/// A skipped input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiagnostic {
    pub source: ImportSource,
    /// 1-based line number.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line {}: {}", self.source, self.line, self.kind)
    }
}

/// Outcome of splitting one raw line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ParsedLine<'a> {
    Blank,
    Fields(Vec<&'a str>),
    Malformed(DiagnosticKind),
}

/// Split a line into exactly `source.expected_fields()` TAB-separated,
/// non-empty fields. A trailing `\r` is ignored.
pub(crate) fn split_fields(line: &str, source: ImportSource) -> ParsedLine<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    let expected = source.expected_fields();
    if fields.len() != expected {
        return ParsedLine::Malformed(DiagnosticKind::FieldCount {
            expected,
            found: fields.len(),
        });
    }
    if let Some(index) = fields.iter().position(|f| f.is_empty()) {
        return ParsedLine::Malformed(DiagnosticKind::EmptyField { index });
    }
    ParsedLine::Fields(fields)
}

pub(crate) fn parse_article_id(value: &str) -> Result<u64, DiagnosticKind> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| DiagnosticKind::InvalidArticleId {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_exact_fields() {
        assert_eq!(
            split_fields("Physics\tScience\r", ImportSource::Edges),
            ParsedLine::Fields(vec!["Physics", "Science"])
        );
        assert_eq!(
            split_fields("12\tGravity\tPhysics", ImportSource::Articles),
            ParsedLine::Fields(vec!["12", "Gravity", "Physics"])
        );
    }

    #[test]
    fn test_blank_and_malformed() {
        assert_eq!(split_fields("   ", ImportSource::Edges), ParsedLine::Blank);
        assert_eq!(
            split_fields("only-one", ImportSource::Edges),
            ParsedLine::Malformed(DiagnosticKind::FieldCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            split_fields("1\ta\tb\tc", ImportSource::Articles),
            ParsedLine::Malformed(DiagnosticKind::FieldCount {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(
            split_fields("\tPerson", ImportSource::Types),
            ParsedLine::Malformed(DiagnosticKind::EmptyField { index: 0 })
        );
    }

    #[test]
    fn test_article_id_parsing() {
        assert_eq!(parse_article_id("42"), Ok(42));
        assert!(matches!(
            parse_article_id("-1"),
            Err(DiagnosticKind::InvalidArticleId { .. })
        ));
    }
}
