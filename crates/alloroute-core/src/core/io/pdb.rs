use super::slice_and_trim;
use crate::core::models::atom::CaAtom;
use crate::core::utils::residues::is_standard_residue;
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for an ATOM record (must be at least 54 chars)")]
    LineTooShort,
}

/// Reads the alpha-carbon atoms of a PDB structure, one per residue.
///
/// Only `ATOM` records with atom name `CA` and a standard amino-acid residue
/// name are kept; this excludes calcium ions, whose atom name is also `CA`
/// but which appear as `HETATM` with residue name `CA`. Alternate locations
/// other than blank or `A` are skipped, and only the first CA per
/// (residue number, chain) is used. Reading stops at `END`/`ENDMDL`, so only
/// the first model of a multi-model file is considered.
pub fn read_ca_from(reader: &mut impl BufRead) -> Result<Vec<CaAtom>, PdbError> {
    let mut atoms: Vec<CaAtom> = Vec::new();
    let mut seen_residues: HashSet<(isize, char)> = HashSet::new();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;

        let record_type = slice_and_trim(&line, 0, 6);
        match record_type {
            "ATOM" => {}
            "END" | "ENDMDL" => break,
            _ => continue,
        }

        let name = slice_and_trim(&line, 12, 16);
        if name != "CA" {
            continue;
        }
        let altloc = slice_and_trim(&line, 16, 17);
        if !altloc.is_empty() && altloc != "A" {
            continue;
        }
        let res_name = slice_and_trim(&line, 17, 20);
        if !is_standard_residue(res_name) {
            continue;
        }

        if line.len() < 54 {
            return Err(PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::LineTooShort,
            });
        }

        let serial_str = slice_and_trim(&line, 6, 11);
        let serial: usize = serial_str.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: "7-11".into(),
                value: serial_str.into(),
            },
        })?;
        let chain_id: char = slice_and_trim(&line, 21, 22).chars().next().unwrap_or('A');
        let res_id_str = slice_and_trim(&line, 22, 26);
        let res_id: isize = res_id_str.parse().map_err(|_| PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::InvalidInt {
                columns: "23-26".into(),
                value: res_id_str.into(),
            },
        })?;

        let mut coords = [0.0_f64; 3];
        for (i, (start, end)) in [(30, 38), (38, 46), (46, 54)].into_iter().enumerate() {
            let value = slice_and_trim(&line, start, end);
            coords[i] = value.parse().map_err(|_| PdbError::Parse {
                line: line_num,
                kind: PdbParseErrorKind::InvalidFloat {
                    columns: format!("{}-{}", start + 1, end),
                    value: value.into(),
                },
            })?;
        }

        if !seen_residues.insert((res_id, chain_id)) {
            continue;
        }
        atoms.push(CaAtom {
            index: atoms.len(),
            serial,
            res_name: res_name.to_string(),
            res_id,
            chain_id,
            position: Point3::new(coords[0], coords[1], coords[2]),
        });
    }

    if atoms.is_empty() {
        return Err(PdbError::MissingRecord("ATOM records with CA atoms".into()));
    }
    Ok(atoms)
}
