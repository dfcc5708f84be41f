use super::config::SearchConfig;
use super::penalty::PenaltyPolicy;
use super::search::ContactGraph;
use crate::core::models::topology::Topology;
use crate::core::utils::constants::PATH_SEPARATOR;
use std::collections::HashMap;
use tracing::{debug, warn};

/// One accepted route: its rendered label sequence, the total traversal
/// weight reported by the search that found it, and its hop count.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    pub label: String,
    pub weight: f64,
    pub hops: usize,
}

/// Runs the search/penalize/repeat loop between two atoms.
///
/// Each iteration finds the shortest path under the current energy table,
/// then multiplies the energies of the edges it used by the policy's
/// factors, biasing the next search toward a different route. A path whose
/// rendered label sequence differs from the immediately preceding one
/// consumes one iteration toward `max_paths` and is kept iff every
/// `must_include` label occurs in it; an identical sequence consumes
/// nothing. With `undo` enabled, the previous iteration's factors are
/// divided back out after each application, so only the latest path's edges
/// stay penalized.
///
/// Terminates at `max_paths` consumed iterations, when no path remains, or
/// after `max_stalls` consecutive identical rediscoveries (a warning is
/// logged and whatever was collected is returned).
pub fn enumerate_paths(
    topology: &Topology,
    source: usize,
    target: usize,
    config: &SearchConfig,
    policy: &mut dyn PenaltyPolicy,
) -> Vec<FoundPath> {
    let graph = ContactGraph::new(topology);
    let mut energies = topology.base_energies();
    let mut results: Vec<FoundPath> = Vec::new();
    let mut previous_label = String::new();
    let mut previous_penalties: HashMap<usize, f64> = HashMap::new();
    let mut consumed = 0;
    let mut stalls = 0;

    while consumed < config.max_paths {
        let Some((path, weight)) = graph.shortest_path(source, target, &energies) else {
            debug!(consumed, "No path remains between the endpoints");
            break;
        };
        let label = render_label(topology, &path);
        let factors = policy.factors(path.len().saturating_sub(1), config.worst, config.least);

        let applied = apply_penalties(topology, &mut energies, &path, &factors);
        if config.undo {
            revert_penalties(&mut energies, &previous_penalties);
        }
        previous_penalties = applied;

        if label == previous_label {
            stalls += 1;
            if stalls >= config.max_stalls {
                warn!(
                    stalls,
                    "Penalty policy failed to change the discovered path; stopping early"
                );
                break;
            }
            continue;
        }
        stalls = 0;
        if matches_must_include(&label, &config.must_include) {
            debug!(%label, weight, "Accepted path");
            results.push(FoundPath {
                hops: label.matches(PATH_SEPARATOR).count(),
                label: label.clone(),
                weight,
            });
        }
        previous_label = label;
        consumed += 1;
    }
    results
}

/// Renders a path as its ordered residue labels joined by the separator.
fn render_label(topology: &Topology, path: &[usize]) -> String {
    path.iter()
        .filter_map(|&i| topology.atom(i))
        .map(|a| a.label())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

// Multiplies each used edge's energy by its positional factor, recording
// (contact index -> factor) for possible reversal.
fn apply_penalties(
    topology: &Topology,
    energies: &mut [f64],
    path: &[usize],
    factors: &[f64],
) -> HashMap<usize, f64> {
    let mut applied = HashMap::new();
    for (pos, pair) in path.windows(2).enumerate() {
        if let Some(contact) = topology.contact_between(pair[0], pair[1]) {
            energies[contact.index] *= factors[pos];
            applied.insert(contact.index, factors[pos]);
        }
    }
    applied
}

// Divides each touched energy back by the factor that was applied to it.
fn revert_penalties(energies: &mut [f64], penalties: &HashMap<usize, f64>) {
    for (&index, &factor) in penalties {
        energies[index] /= factor;
    }
}

fn matches_must_include(label: &str, required: &[String]) -> bool {
    required.iter().all(|needle| label.contains(needle))
}
