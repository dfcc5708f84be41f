use crate::core::io::cieplak::{self, CieplakError};
use crate::core::io::pdb::{self, PdbError};
use crate::core::io::qm::{self, QmError};
use crate::core::models::atom::ResidueSpec;
use crate::core::models::builder::{BuildError, TopologyBuilder};
use crate::core::models::topology::Topology;
use crate::engine::config::SearchConfig;
use crate::engine::enumerate::{FoundPath, enumerate_paths};
use crate::engine::error::EngineError;
use crate::engine::penalty::make_policy;
use crate::engine::rank::sort_by_hops;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("File error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Structure error: {0}")]
    Pdb(#[from] PdbError),
    #[error("QM contact file error: {0}")]
    Qm(#[from] QmError),
    #[error("Statistical contact file error: {0}")]
    Cieplak(#[from] CieplakError),
    #[error("Topology error: {0}")]
    Build(#[from] BuildError),
    #[error("Search error: {0}")]
    Engine(#[from] EngineError),
}

/// Parameters for contact ingestion and topology assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    /// QM records farther apart than this (in Å) are dropped.
    pub distance_cutoff: f64,
    /// QM records with `|energy|` below this are dropped.
    pub energy_cutoff: f64,
    /// Energy assigned to every synthesized backbone contact.
    pub backbone_energy: f64,
    /// Energy assigned to every statistical contact; non-positive selects
    /// the built-in default.
    pub statistical_energy: f64,
    /// Statistical contacts between same-chain residues closer than this
    /// many positions in sequence are dropped.
    pub exclude_near_sequence: isize,
    /// Keep contacts whose endpoints lie on different chains.
    pub allow_cross_chains: bool,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            distance_cutoff: 2.8,
            energy_cutoff: 0.6,
            backbone_energy: 1.0,
            statistical_energy: 2.87,
            exclude_near_sequence: 2,
            allow_cross_chains: false,
        }
    }
}

/// A full description of one pathway-finding job.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    /// PDB structure providing the alpha-carbon trace.
    pub structure: PathBuf,
    /// Optional QM pairwise-interaction file.
    pub qm_contacts: Option<PathBuf>,
    /// Optional statistical (Cieplak-style) contact-map file.
    pub statistical_contacts: Option<PathBuf>,
    pub source: ResidueSpec,
    pub target: ResidueSpec,
    pub contacts: ContactConfig,
    pub search: SearchConfig,
    /// Reorder the output by ascending hop count instead of discovery order.
    pub sort_by_length: bool,
}

#[derive(Debug, Clone)]
pub struct RouteResult {
    pub paths: Vec<FoundPath>,
}

fn open(path: &Path) -> Result<BufReader<File>, RouteError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| RouteError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Runs a complete pathway search described by `request`.
#[instrument(skip_all, name = "route_workflow")]
pub fn run(request: &RouteRequest) -> Result<RouteResult, RouteError> {
    // === Phase 1: Load the structure ===
    info!(structure = %request.structure.display(), "Reading alpha-carbon trace");
    let atoms = pdb::read_ca_from(&mut open(&request.structure)?)?;
    info!(residues = atoms.len(), "Structure loaded");

    // === Phase 2: Assemble the contact topology ===
    let mut builder = TopologyBuilder::new(atoms);
    if let Some(path) = &request.qm_contacts {
        let records = qm::read_from(&mut open(path)?)?;
        let accepted = builder.add_qm_contacts(
            &records,
            request.contacts.distance_cutoff,
            request.contacts.energy_cutoff,
        )?;
        info!(
            read = records.len(),
            accepted, "Ingested QM interaction records"
        );
    }
    if let Some(path) = &request.statistical_contacts {
        let rows = cieplak::read_from(
            &mut open(path)?,
            request.contacts.exclude_near_sequence,
        )?;
        let added = builder.add_statistical_contacts(&rows, request.contacts.statistical_energy)?;
        info!(read = rows.len(), added, "Ingested statistical contacts");
    }
    let backbone = builder.add_backbone_contacts(request.contacts.backbone_energy);
    info!(backbone, "Synthesized backbone contacts");

    let mut topology = builder.build();
    if !request.contacts.allow_cross_chains {
        let before = topology.contacts().len();
        topology.retain_intra_chain();
        info!(
            removed = before - topology.contacts().len(),
            "Removed cross-chain contacts"
        );
    }
    info!(contacts = topology.contacts().len(), "Topology assembled");

    // === Phase 3: Resolve the endpoints ===
    let source = resolve_endpoint(&topology, request.source)?;
    let target = resolve_endpoint(&topology, request.target)?;

    // === Phase 4: Enumerate and order the pathways ===
    let mut policy = make_policy(request.search.penalty, request.search.seed);
    let mut paths = enumerate_paths(&topology, source, target, &request.search, policy.as_mut());
    if request.sort_by_length {
        sort_by_hops(&mut paths);
    }
    info!(found = paths.len(), "Pathway search complete");
    Ok(RouteResult { paths })
}

fn resolve_endpoint(topology: &Topology, spec: ResidueSpec) -> Result<usize, EngineError> {
    topology
        .ca_index(spec)
        .ok_or(EngineError::ResidueNotFound { spec })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{PenaltyKind, SearchConfigBuilder};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn atom_line(serial: usize, res_name: &str, chain: char, res_id: isize) -> String {
        format!(
            "ATOM  {:>5} {:<4} {:<3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00",
            serial,
            "CA",
            res_name,
            chain,
            res_id,
            1.5 * serial as f64,
            0.0,
            0.0
        )
    }

    fn write_temp(lines: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", lines.join("\n")).unwrap();
        file
    }

    fn chain_a_structure() -> NamedTempFile {
        write_temp(&[
            atom_line(1, "GLY", 'A', 1),
            atom_line(2, "ALA", 'A', 2),
            atom_line(3, "HIS", 'A', 3),
            atom_line(4, "TRP", 'A', 4),
        ])
    }

    fn request(structure: &NamedTempFile) -> RouteRequest {
        RouteRequest {
            structure: structure.path().to_path_buf(),
            qm_contacts: None,
            statistical_contacts: None,
            source: ResidueSpec {
                res_id: 1,
                chain_id: 'A',
            },
            target: ResidueSpec {
                res_id: 4,
                chain_id: 'A',
            },
            contacts: ContactConfig::default(),
            search: SearchConfigBuilder::new()
                .penalty(PenaltyKind::Wedge)
                .max_paths(1)
                .build()
                .unwrap(),
            sort_by_length: false,
        }
    }

    #[test]
    fn backbone_only_structure_routes_along_the_chain() {
        let structure = chain_a_structure();
        let result = run(&request(&structure)).unwrap();
        assert_eq!(result.paths.len(), 1);
        assert_eq!(result.paths[0].label, "GLY1A-->ALA2A-->HIS3A-->TRP4A");
        assert_eq!(result.paths[0].hops, 3);
    }

    #[test]
    fn strong_qm_contact_shortcuts_the_backbone() {
        let structure = chain_a_structure();
        let qm_file = write_temp(&["pair: A GLY 1: -- A TRP 4: E: -3.25, 2.40".to_string()]);
        let mut req = request(&structure);
        req.qm_contacts = Some(qm_file.path().to_path_buf());
        let result = run(&req).unwrap();
        assert_eq!(result.paths[0].label, "GLY1A-->TRP4A");
        assert_eq!(result.paths[0].hops, 1);
    }

    #[test]
    fn cross_chain_bridge_is_honored_only_when_allowed() {
        let structure = write_temp(&[
            atom_line(1, "GLY", 'A', 1),
            atom_line(2, "ALA", 'A', 2),
            atom_line(3, "HIS", 'B', 1),
            atom_line(4, "TRP", 'B', 2),
        ]);
        let qm_file = write_temp(&["pair: A ALA 2: -- B HIS 1: E: -3.25, 2.40".to_string()]);
        let mut req = request(&structure);
        req.qm_contacts = Some(qm_file.path().to_path_buf());
        req.target = ResidueSpec {
            res_id: 2,
            chain_id: 'B',
        };

        let blocked = run(&req).unwrap();
        assert!(blocked.paths.is_empty());

        req.contacts.allow_cross_chains = true;
        let bridged = run(&req).unwrap();
        assert_eq!(bridged.paths[0].label, "GLY1A-->ALA2A-->HIS1B-->TRP2B");
    }

    #[test]
    fn unknown_endpoint_is_reported_as_a_search_error() {
        let structure = chain_a_structure();
        let mut req = request(&structure);
        req.target = ResidueSpec {
            res_id: 99,
            chain_id: 'Z',
        };
        let err = run(&req).unwrap_err();
        assert!(matches!(
            err,
            RouteError::Engine(EngineError::ResidueNotFound { .. })
        ));
    }

    #[test]
    fn missing_structure_file_is_an_io_error() {
        let structure = chain_a_structure();
        let mut req = request(&structure);
        req.structure = PathBuf::from("/nonexistent/structure.pdb");
        assert!(matches!(run(&req).unwrap_err(), RouteError::Io { .. }));
    }
}
