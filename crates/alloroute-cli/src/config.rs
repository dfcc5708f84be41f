use crate::cli::Cli;
use crate::error::{CliError, Result};
use alloroute::core::models::atom::ResidueSpec;
use alloroute::engine::config::SearchConfigBuilder;
use alloroute::workflows::route::{ContactConfig, RouteRequest};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The subset of run parameters that may come from a TOML file.
///
/// Every field is optional; precedence is built-in defaults, then the file,
/// then command-line flags.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialRouteConfig {
    // Contact ingestion
    qm_file: Option<PathBuf>,
    cieplak_file: Option<PathBuf>,
    distance_cutoff: Option<f64>,
    energy_cutoff: Option<f64>,
    backbone_energy: Option<f64>,
    statistical_energy: Option<f64>,
    exclude: Option<isize>,
    cross_chains: Option<bool>,

    // Search
    penalty: Option<String>,
    undo: Option<bool>,
    max_paths: Option<usize>,
    worst: Option<f64>,
    least: Option<f64>,
    must_include: Option<Vec<String>>,
    max_stalls: Option<usize>,
    seed: Option<u64>,

    // Output
    sort_by_length: Option<bool>,
}

impl PartialRouteConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

/// Merges defaults, the optional configuration file, and command-line flags
/// into a complete workflow request.
pub fn build_request(cli: &Cli) -> Result<RouteRequest> {
    let partial = match &cli.config {
        Some(path) => PartialRouteConfig::from_file(path)?,
        None => PartialRouteConfig::default(),
    };

    let mut contacts = ContactConfig::default();
    apply(&mut contacts.distance_cutoff, partial.distance_cutoff);
    apply(&mut contacts.energy_cutoff, partial.energy_cutoff);
    apply(&mut contacts.backbone_energy, partial.backbone_energy);
    apply(&mut contacts.statistical_energy, partial.statistical_energy);
    apply(&mut contacts.exclude_near_sequence, partial.exclude);
    apply(&mut contacts.allow_cross_chains, partial.cross_chains);
    apply(&mut contacts.distance_cutoff, cli.dcutoff);
    apply(&mut contacts.energy_cutoff, cli.ecutoff);
    apply(&mut contacts.backbone_energy, cli.bbenergy);
    apply(&mut contacts.statistical_energy, cli.cieplake);
    apply(&mut contacts.exclude_near_sequence, cli.exclude);
    if cli.crosschains {
        contacts.allow_cross_chains = true;
    }

    let mut builder = SearchConfigBuilder::new();
    if let Some(name) = &partial.penalty {
        builder = builder.penalty(
            name.parse()
                .map_err(|_| CliError::Argument(format!("Unknown penalty policy '{name}'")))?,
        );
    }
    if let Some(undo) = partial.undo {
        builder = builder.undo(undo);
    }
    if let Some(n) = partial.max_paths {
        builder = builder.max_paths(n);
    }
    if let Some(worst) = partial.worst {
        builder = builder.worst(worst);
    }
    if let Some(least) = partial.least {
        builder = builder.least(least);
    }
    if let Some(labels) = &partial.must_include {
        builder = builder.must_include(labels.clone());
    }
    if let Some(n) = partial.max_stalls {
        builder = builder.max_stalls(n);
    }
    if let Some(seed) = partial.seed {
        builder = builder.seed(Some(seed));
    }

    if let Some(kind) = cli.pen {
        builder = builder.penalty(kind);
    }
    if cli.undo {
        builder = builder.undo(true);
    }
    if let Some(n) = cli.maxpath {
        builder = builder.max_paths(n);
    }
    if let Some(worst) = cli.worst {
        builder = builder.worst(worst);
    }
    if let Some(least) = cli.least {
        builder = builder.least(least);
    }
    if !cli.mustbe.is_empty() {
        builder = builder.must_include(cli.mustbe.clone());
    }
    if let Some(n) = cli.max_stalls {
        builder = builder.max_stalls(n);
    }
    if let Some(seed) = cli.seed {
        builder = builder.seed(Some(seed));
    }
    let search = builder.build()?;

    let qm_contacts = cli.qmfile.clone().or(partial.qm_file);
    let statistical_contacts = cli.cieplakfile.clone().or(partial.cieplak_file);
    let sort_by_length = cli.sort || partial.sort_by_length.unwrap_or(false);

    Ok(RouteRequest {
        structure: cli.structure.clone(),
        qm_contacts,
        statistical_contacts,
        source: ResidueSpec {
            res_id: cli.res1,
            chain_id: cli.chain1,
        },
        target: ResidueSpec {
            res_id: cli.res2,
            chain_id: cli.chain2,
        },
        contacts,
        search,
        sort_by_length,
    })
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}
