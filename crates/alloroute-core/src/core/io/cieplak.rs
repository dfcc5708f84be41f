use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::warn;

/// Exact header line that opens the contact block of a Cieplak contact-map
/// report. Only the rows between this header and the next blank line are read.
const CONTACT_BLOCK_HEADER: &str = "    I1  AA  C I(PDB)    I2  AA  C I(PDB)    DISTANCE       CMs    rCSU    aSurf    rSurf    nSurf";

#[derive(Debug, Error)]
pub enum CieplakError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: CieplakParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum CieplakParseErrorKind {
    #[error("Expected at least 16 whitespace-delimited fields, found {found}")]
    FieldCount { found: usize },
    #[error("Invalid integer in field {field} (value: '{value}')")]
    InvalidInt { field: usize, value: String },
    #[error("Invalid float in field {field} (value: '{value}')")]
    InvalidFloat { field: usize, value: String },
    #[error("Chain label in field {field} must be a single character (value: '{value}')")]
    InvalidChain { field: usize, value: String },
}

/// One surviving statistical contact: residue pair plus distance.
///
/// Rows returned by [`read_from`] have already passed the classifier-flag
/// rule, the residue-separation exclusion, the symmetry requirement for
/// weaker-evidence rows, and unordered-pair deduplication; the
/// weaker-evidence marker is internal bookkeeping and is not exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct CieplakContact {
    pub res1: isize,
    pub chain1: char,
    pub res2: isize,
    pub chain2: char,
    pub distance: f64,
}

struct RawRow {
    contact: CieplakContact,
    // Set for rows whose only supporting classifier is rCSU; such rows must
    // have a symmetric counterpart elsewhere in the block.
    rcsu_only: bool,
}

/// Reads the statistical Go-contact block of a Cieplak contact-map report.
///
/// The block is located by an exact header-line match (one column-ruler line
/// after the header is skipped) and terminated by a blank line. A row is kept
/// only if at least one of its two classifier flags (CMs "OV" and rCSU)
/// equals 1. Residue pairs on the same chain separated by fewer than
/// `exclude` residues are dropped as trivially-connected backbone neighbors.
/// Rows supported only by rCSU must have a symmetric counterpart row (same
/// pair, opposite order); rows are then deduplicated by unordered pair,
/// keeping the first encountered.
///
/// A file without the header yields an empty list.
pub fn read_from(
    reader: &mut impl BufRead,
    exclude: isize,
) -> Result<Vec<CieplakContact>, CieplakError> {
    let mut rows: Vec<RawRow> = Vec::new();
    let mut lines = reader.lines().enumerate();
    let mut reading = false;

    while let Some((line_num, line_res)) = lines.next() {
        let line = line_res?;
        let line_num = line_num + 1;

        if !reading {
            if line.contains(CONTACT_BLOCK_HEADER) {
                // Skip the column-ruler line that follows the header.
                if let Some((_, ruler)) = lines.next() {
                    ruler?;
                }
                reading = true;
            }
            continue;
        }
        if line.trim().is_empty() {
            break;
        }

        if let Some(row) = parse_row(&line, line_num, exclude)? {
            rows.push(row);
        }
    }

    let mut kept: Vec<CieplakContact> = Vec::new();
    let mut seen_pairs: HashSet<((isize, char), (isize, char))> = HashSet::new();
    for (i, row) in rows.iter().enumerate() {
        if row.rcsu_only && !has_symmetric_counterpart(i, &rows) {
            warn!(
                "Excluding non-symmetric rCSU-only contact {}{} -- {}{}",
                row.contact.res1, row.contact.chain1, row.contact.res2, row.contact.chain2,
            );
            continue;
        }
        let a = (row.contact.res1, row.contact.chain1);
        let b = (row.contact.res2, row.contact.chain2);
        let key = if a <= b { (a, b) } else { (b, a) };
        if !seen_pairs.insert(key) {
            continue;
        }
        kept.push(row.contact.clone());
    }
    Ok(kept)
}

fn parse_row(line: &str, line_num: usize, exclude: isize) -> Result<Option<RawRow>, CieplakError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let l = fields.len();
    if l < 16 {
        return Err(CieplakError::Parse {
            line: line_num,
            kind: CieplakParseErrorKind::FieldCount { found: l },
        });
    }

    // The classifier flags decide acceptance before anything else is parsed,
    // so a rejected row can never produce a parse error from its other fields.
    let ov = parse_int(fields[l - 8], l - 8, line_num)?;
    let rcsu = parse_int(fields[l - 5], l - 5, line_num)?;
    if ov != 1 && rcsu != 1 {
        return Ok(None);
    }

    let res1 = parse_int(fields[5], 5, line_num)? as isize;
    let res2 = parse_int(fields[9], 9, line_num)? as isize;
    let chain1 = parse_chain(fields[l - 15], l - 15, line_num)?;
    let chain2 = parse_chain(fields[l - 11], l - 11, line_num)?;
    let distance = parse_float(fields[l - 9], l - 9, line_num)?;

    if chain1 == chain2 && (res1 - res2).abs() < exclude {
        return Ok(None);
    }

    Ok(Some(RawRow {
        contact: CieplakContact {
            res1,
            chain1,
            res2,
            chain2,
            distance,
        },
        rcsu_only: ov != 1,
    }))
}

fn has_symmetric_counterpart(j: usize, rows: &[RawRow]) -> bool {
    let target = &rows[j].contact;
    rows.iter().enumerate().any(|(i, other)| {
        i != j
            && target.res1 == other.contact.res2
            && target.chain1 == other.contact.chain2
            && target.res2 == other.contact.res1
            && target.chain2 == other.contact.chain1
    })
}

fn parse_int(field: &str, index: usize, line: usize) -> Result<i64, CieplakError> {
    field.parse().map_err(|_| CieplakError::Parse {
        line,
        kind: CieplakParseErrorKind::InvalidInt {
            field: index + 1,
            value: field.into(),
        },
    })
}

fn parse_float(field: &str, index: usize, line: usize) -> Result<f64, CieplakError> {
    field.parse().map_err(|_| CieplakError::Parse {
        line,
        kind: CieplakParseErrorKind::InvalidFloat {
            field: index + 1,
            value: field.into(),
        },
    })
}

fn parse_chain(field: &str, index: usize, line: usize) -> Result<char, CieplakError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CieplakError::Parse {
            line,
            kind: CieplakParseErrorKind::InvalidChain {
                field: index + 1,
                value: field.into(),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    // Row layout mirrors the report:
    //   R  n  I1 AA C I(PDB)  I2 AA C I(PDB)  DISTANCE  OV . . rCSU  aSurf rSurf nSurf .
    fn row(res1: isize, chain1: char, res2: isize, chain2: char, ov: i32, rcsu: i32) -> String {
        format!(
            "R     1 {:>5} GLY {} {:>5} {:>5} ALA {} {:>5}     5.100 {} 0 0 {}   10.0   10.0   10.0 0",
            res1, chain1, res1, res2, chain2, res2, ov, rcsu
        )
    }

    fn read(rows: &[String], exclude: isize) -> Result<Vec<CieplakContact>, CieplakError> {
        let content = format!(
            "some preamble\n{}\n==========\n{}\n\ntrailing text\n",
            CONTACT_BLOCK_HEADER,
            rows.join("\n")
        );
        read_from(&mut BufReader::new(content.as_bytes()), exclude)
    }

    #[test]
    fn reads_only_the_block_after_the_header() {
        let contacts = read(&[row(10, 'A', 50, 'A', 1, 1)], 2).unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].res1, 10);
        assert_eq!(contacts[0].res2, 50);
    }

    #[test]
    fn missing_header_yields_empty_list() {
        let content = "no block here\njust text\n";
        let contacts = read_from(&mut BufReader::new(content.as_bytes()), 2).unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn rejects_rows_failing_both_classifier_flags() {
        let contacts = read(
            &[row(10, 'A', 50, 'A', 0, 0), row(11, 'A', 60, 'A', 1, 0)],
            2,
        )
        .unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].res1, 11);
    }

    #[test]
    fn rejected_rows_tolerate_garbled_other_fields() {
        // Both flags are 0, so the unparsable distance is never reached.
        let garbled =
            "R     1    10 GLY A    10    50 ALA A    50      xxxx 0 0 0 0   10.0   10.0   10.0 0"
                .to_string();
        let contacts = read(&[garbled], 2).unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn drops_near_neighbors_on_the_same_chain() {
        let contacts = read(
            &[row(10, 'A', 11, 'A', 1, 1), row(10, 'A', 11, 'B', 1, 1)],
            2,
        )
        .unwrap();
        // Same-chain |10-11| < 2 is excluded; the cross-chain pair survives.
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].chain2, 'B');
    }

    #[test]
    fn rcsu_only_rows_require_a_symmetric_counterpart() {
        let asymmetric = read(&[row(10, 'A', 50, 'A', 0, 1)], 2).unwrap();
        assert!(asymmetric.is_empty());

        let symmetric = read(
            &[row(10, 'A', 50, 'A', 0, 1), row(50, 'A', 10, 'A', 0, 1)],
            2,
        )
        .unwrap();
        // Both directions pass the symmetry check, then dedup keeps one.
        assert_eq!(symmetric.len(), 1);
    }

    #[test]
    fn deduplicates_by_unordered_pair_keeping_first() {
        let contacts = read(
            &[
                row(10, 'A', 50, 'A', 1, 1),
                row(50, 'A', 10, 'A', 1, 1),
                row(10, 'A', 50, 'A', 1, 0),
            ],
            2,
        )
        .unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].res1, 10);
    }

    #[test]
    fn accepted_row_with_bad_field_count_is_fatal() {
        let err = read(&["R 1 2 3".to_string()], 2).unwrap_err();
        assert!(matches!(
            err,
            CieplakError::Parse {
                kind: CieplakParseErrorKind::FieldCount { found: 4 },
                ..
            }
        ));
    }
}
