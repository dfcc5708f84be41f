use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: QmParseErrorKind },
}

#[derive(Debug, Error)]
pub enum QmParseErrorKind {
    #[error("Expected at least 10 whitespace-delimited fields, found {found}")]
    FieldCount { found: usize },
    #[error("Invalid integer in field {field} (value: '{value}')")]
    InvalidInt { field: usize, value: String },
    #[error("Invalid float in field {field} (value: '{value}')")]
    InvalidFloat { field: usize, value: String },
    #[error("Chain label in field {field} must be a single character (value: '{value}')")]
    InvalidChain { field: usize, value: String },
}

/// One quantum-mechanical pairwise interaction record.
///
/// Carries the raw parsed values; acceptance cutoffs and the energy cap are
/// applied by the graph builder.
#[derive(Debug, Clone, PartialEq)]
pub struct QmRecord {
    pub chain1: char,
    pub res1: isize,
    pub chain2: char,
    pub res2: isize,
    pub distance: f64,
    pub energy: f64,
}

/// Reads whitespace-delimited QM interaction records.
///
/// Field positions are fixed: the chain labels sit in fields 2 and 6, the
/// residue numbers in fields 4 and 8 (with a trailing colon), and the last
/// two fields hold the energy and the distance. Trailing comma and colon
/// characters are stripped before numeric parsing. Blank lines are skipped;
/// any other malformed line is a fatal error.
pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<QmRecord>, QmError> {
    let mut records = Vec::new();
    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            return Err(QmError::Parse {
                line: line_num,
                kind: QmParseErrorKind::FieldCount {
                    found: fields.len(),
                },
            });
        }
        let last = fields.len() - 1;
        let chain1 = parse_chain(fields[1], 1, line_num)?;
        let res1 = parse_int(fields[3], 3, line_num)?;
        let chain2 = parse_chain(fields[5], 5, line_num)?;
        let res2 = parse_int(fields[7], 7, line_num)?;
        let energy = parse_float(fields[last - 1], last - 1, line_num)?;
        let distance = parse_float(fields[last], last, line_num)?;
        records.push(QmRecord {
            chain1,
            res1,
            chain2,
            res2,
            distance,
            energy,
        });
    }
    Ok(records)
}

fn strip_punctuation(field: &str) -> String {
    field.replace([':', ','], "")
}

fn parse_chain(field: &str, index: usize, line: usize) -> Result<char, QmError> {
    let cleaned = strip_punctuation(field);
    let mut chars = cleaned.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(QmError::Parse {
            line,
            kind: QmParseErrorKind::InvalidChain {
                field: index + 1,
                value: field.into(),
            },
        }),
    }
}

fn parse_int(field: &str, index: usize, line: usize) -> Result<isize, QmError> {
    strip_punctuation(field).parse().map_err(|_| QmError::Parse {
        line,
        kind: QmParseErrorKind::InvalidInt {
            field: index + 1,
            value: field.into(),
        },
    })
}

fn parse_float(field: &str, index: usize, line: usize) -> Result<f64, QmError> {
    strip_punctuation(field).parse().map_err(|_| QmError::Parse {
        line,
        kind: QmParseErrorKind::InvalidFloat {
            field: index + 1,
            value: field.into(),
        },
    })
}
