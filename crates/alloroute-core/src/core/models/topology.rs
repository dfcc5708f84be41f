use super::atom::{CaAtom, ResidueSpec};
use super::contact::Contact;
use std::collections::HashMap;

/// The finalized residue-contact graph.
///
/// Owns one alpha-carbon atom per residue and the deduplicated set of
/// contacts between them, together with per-atom adjacency lists and a
/// (residue number, chain) lookup map. Invariant: at most one contact exists
/// between any unordered pair of atoms.
///
/// The topology itself is immutable during path enumeration; the engine keeps
/// its mutable per-contact energies in an external table indexed by
/// `Contact::index`, seeded from [`Topology::base_energies`].
#[derive(Debug, Clone, Default)]
pub struct Topology {
    atoms: Vec<CaAtom>,
    contacts: Vec<Contact>,
    adjacency: Vec<Vec<usize>>,
    residue_index: HashMap<(isize, char), usize>,
}

impl Topology {
    pub(crate) fn from_parts(atoms: Vec<CaAtom>, contacts: Vec<Contact>) -> Self {
        let residue_index = atoms
            .iter()
            .map(|a| ((a.res_id, a.chain_id), a.index))
            .collect();
        let mut topology = Self {
            adjacency: vec![Vec::new(); atoms.len()],
            atoms,
            contacts,
            residue_index,
        };
        topology.rebuild_adjacency();
        topology
    }

    pub fn atoms(&self) -> &[CaAtom] {
        &self.atoms
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn atom(&self, index: usize) -> Option<&CaAtom> {
        self.atoms.get(index)
    }

    pub fn contact(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    /// The structure-derived atom index: maps a residue identity to its
    /// alpha-carbon handle. Returns `None` if the residue is absent.
    pub fn ca_index(&self, spec: ResidueSpec) -> Option<usize> {
        self.residue_index
            .get(&(spec.res_id, spec.chain_id))
            .copied()
    }

    /// Contact indices incident to the given atom.
    pub fn neighbors(&self, atom: usize) -> &[usize] {
        self.adjacency.get(atom).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds the contact linking `a` and `b` in either endpoint order.
    pub fn contact_between(&self, a: usize, b: usize) -> Option<&Contact> {
        self.neighbors(a)
            .iter()
            .map(|&ci| &self.contacts[ci])
            .find(|c| c.connects(a, b))
    }

    /// Base energies indexed by contact index, the seed for the engine's
    /// mutable weight table.
    pub fn base_energies(&self) -> Vec<f64> {
        self.contacts.iter().map(|c| c.energy).collect()
    }

    /// Removes every contact whose endpoints lie on different chains.
    ///
    /// Applied once before enumeration when cross-chain routes are
    /// disallowed. Contact indices are re-compacted so they stay dense for
    /// the external energy table.
    pub fn retain_intra_chain(&mut self) {
        let atoms = &self.atoms;
        self.contacts
            .retain(|c| atoms[c.atom1].chain_id == atoms[c.atom2].chain_id);
        for (i, contact) in self.contacts.iter_mut().enumerate() {
            contact.index = i;
        }
        self.rebuild_adjacency();
    }

    fn rebuild_adjacency(&mut self) {
        self.adjacency = vec![Vec::new(); self.atoms.len()];
        for contact in &self.contacts {
            self.adjacency[contact.atom1].push(contact.index);
            self.adjacency[contact.atom2].push(contact.index);
        }
    }
}
