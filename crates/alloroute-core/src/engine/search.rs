use crate::core::models::topology::Topology;
use petgraph::Undirected;
use petgraph::algo::astar;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;

/// The shortest-path primitive over a contact topology.
///
/// Built once per enumeration; edge payloads are contact indices so that the
/// traversal cost can be read from the caller's mutable energy table on
/// every query, keeping the topology itself immutable during the search
/// loop.
pub struct ContactGraph {
    graph: Graph<usize, usize, Undirected>,
    nodes: Vec<NodeIndex>,
}

impl ContactGraph {
    pub fn new(topology: &Topology) -> Self {
        let mut graph = Graph::new_undirected();
        let nodes: Vec<NodeIndex> = topology
            .atoms()
            .iter()
            .map(|atom| graph.add_node(atom.index))
            .collect();
        for contact in topology.contacts() {
            graph.add_edge(nodes[contact.atom1], nodes[contact.atom2], contact.index);
        }
        Self { graph, nodes }
    }

    /// Shortest path from `source` to `target` under the given energies,
    /// as (atom indices, total weight). Edge weight is `1 / |energy|`, so a
    /// zero energy makes an edge untraversable. Returns `None` when no path
    /// exists.
    pub fn shortest_path(
        &self,
        source: usize,
        target: usize,
        energies: &[f64],
    ) -> Option<(Vec<usize>, f64)> {
        let goal = self.nodes[target];
        let (cost, path) = astar(
            &self.graph,
            self.nodes[source],
            |node| node == goal,
            |edge| 1.0 / energies[*edge.weight()].abs(),
            |_| 0.0,
        )?;
        let atoms = path.into_iter().map(|node| self.graph[node]).collect();
        Some((atoms, cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::CaAtom;
    use crate::core::models::contact::{Contact, ContactSource};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn ca(index: usize, res_id: isize) -> CaAtom {
        CaAtom {
            index,
            serial: index + 1,
            res_name: "GLY".to_string(),
            res_id,
            chain_id: 'A',
            position: Point3::origin(),
        }
    }

    fn diamond() -> Topology {
        // 0 -- 1 -- 3 (strong) and 0 -- 2 -- 3 (weak)
        let atoms = (0..4).map(|i| ca(i, i as isize + 1)).collect();
        let contacts = vec![
            Contact::new(0, 0, 1, 1.0, 4.0, ContactSource::Quantum),
            Contact::new(1, 1, 3, 1.0, 4.0, ContactSource::Quantum),
            Contact::new(2, 0, 2, 1.0, 2.0, ContactSource::Quantum),
            Contact::new(3, 2, 3, 1.0, 2.0, ContactSource::Quantum),
        ];
        Topology::from_parts(atoms, contacts)
    }

    #[test]
    fn finds_the_lightest_route_under_the_energy_table() {
        let top = diamond();
        let graph = ContactGraph::new(&top);
        let (path, cost) = graph.shortest_path(0, 3, &top.base_energies()).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
        assert_relative_eq!(cost, 0.5);
    }

    #[test]
    fn reacts_to_external_energy_mutation() {
        let top = diamond();
        let graph = ContactGraph::new(&top);
        let mut energies = top.base_energies();
        // Weaken the strong branch below the alternative.
        energies[0] = 0.5;
        let (path, cost) = graph.shortest_path(0, 3, &energies).unwrap();
        assert_eq!(path, vec![0, 2, 3]);
        assert_relative_eq!(cost, 1.0);
    }

    #[test]
    fn negative_energies_cost_by_magnitude() {
        let top = Topology::from_parts(
            vec![ca(0, 1), ca(1, 2)],
            vec![Contact::new(0, 0, 1, 1.0, -4.0, ContactSource::Quantum)],
        );
        let graph = ContactGraph::new(&top);
        let (_, cost) = graph.shortest_path(0, 1, &top.base_energies()).unwrap();
        assert_relative_eq!(cost, 0.25);
    }

    #[test]
    fn disconnected_endpoints_yield_none() {
        let top = Topology::from_parts(vec![ca(0, 1), ca(1, 2)], Vec::new());
        let graph = ContactGraph::new(&top);
        assert!(graph.shortest_path(0, 1, &[]).is_none());
    }

    #[test]
    fn source_equal_to_target_is_a_trivial_path() {
        let top = diamond();
        let graph = ContactGraph::new(&top);
        let (path, cost) = graph.shortest_path(2, 2, &top.base_energies()).unwrap();
        assert_eq!(path, vec![2]);
        assert_relative_eq!(cost, 0.0);
    }
}
