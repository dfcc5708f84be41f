use super::atom::{CaAtom, ResidueSpec};
use super::contact::{Contact, ContactSource};
use super::topology::Topology;
use crate::core::io::cieplak::CieplakContact;
use crate::core::io::qm::QmRecord;
use crate::core::utils::constants::{DEFAULT_STATISTICAL_ENERGY, QM_ENERGY_CAP};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Residue {spec} not found in the structure")]
    ResidueNotFound { spec: ResidueSpec },
}

/// Builds a [`Topology`] from up to three contact sources.
///
/// Sources are ingested in order QM → statistical → backbone; contact indices
/// increase globally, each source continuing from the highest index assigned
/// so far. At most one contact is kept per unordered atom pair: when a later
/// source reports an already-known pair, the stored contact is replaced in
/// place (keeping its index) only if the new source ranks higher in the
/// priority order backbone > QM > statistical, so statistical contacts never
/// override an existing contact.
pub struct TopologyBuilder {
    atoms: Vec<CaAtom>,
    contacts: Vec<Contact>,

    // --- Builder-specific state for efficient construction ---
    residue_map: HashMap<(isize, char), usize>,
    pair_map: HashMap<(usize, usize), usize>,
}

impl TopologyBuilder {
    /// Starts from a finished atom list, assumed to be in structure-file
    /// order with `index` matching each atom's position.
    pub fn new(atoms: Vec<CaAtom>) -> Self {
        let residue_map = atoms
            .iter()
            .map(|a| ((a.res_id, a.chain_id), a.index))
            .collect();
        Self {
            atoms,
            contacts: Vec::new(),
            residue_map,
            pair_map: HashMap::new(),
        }
    }

    fn resolve(&self, res_id: isize, chain_id: char) -> Result<usize, BuildError> {
        self.residue_map
            .get(&(res_id, chain_id))
            .copied()
            .ok_or(BuildError::ResidueNotFound {
                spec: ResidueSpec { res_id, chain_id },
            })
    }

    /// Ingests QM interaction records, returning the number accepted.
    ///
    /// A record is accepted only if `distance <= distance_cutoff` and
    /// `|energy| >= energy_cutoff`; anything else is silently dropped.
    /// Accepted positive energies are clipped to [`QM_ENERGY_CAP`]; negative
    /// energies are never clipped. A record naming a residue absent from the
    /// structure is a fatal error.
    pub fn add_qm_contacts(
        &mut self,
        records: &[QmRecord],
        distance_cutoff: f64,
        energy_cutoff: f64,
    ) -> Result<usize, BuildError> {
        let mut accepted = 0;
        for record in records {
            if record.distance > distance_cutoff || record.energy.abs() < energy_cutoff {
                continue;
            }
            let a1 = self.resolve(record.res1, record.chain1)?;
            let a2 = self.resolve(record.res2, record.chain2)?;
            let energy = if record.energy > QM_ENERGY_CAP {
                QM_ENERGY_CAP
            } else {
                record.energy
            };
            if self.add_contact(a1, a2, record.distance, energy, ContactSource::Quantum) {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Merges statistical (Cieplak) contacts, returning the number added.
    ///
    /// The rows have already been filtered and deduplicated by the reader;
    /// here they only need residue resolution and the single fixed bonding
    /// energy. A non-positive `energy` selects the default. Pairs that
    /// already have a contact are left untouched.
    pub fn add_statistical_contacts(
        &mut self,
        rows: &[CieplakContact],
        energy: f64,
    ) -> Result<usize, BuildError> {
        let energy = if energy <= 0.0 {
            DEFAULT_STATISTICAL_ENERGY
        } else {
            energy
        };
        let mut added = 0;
        for r in rows {
            let a1 = self.resolve(r.res1, r.chain1)?;
            let a2 = self.resolve(r.res2, r.chain2)?;
            if self.add_contact(a1, a2, r.distance, energy, ContactSource::Statistical) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Synthesizes backbone contacts between sequence-adjacent residues.
    ///
    /// Atoms are traversed in file order; two consecutive alpha carbons are
    /// linked iff they share a chain and the residue number increases, so
    /// chain boundaries (label change or sequence reset) never produce a
    /// contact. Returns the number of backbone contacts created or upgraded.
    pub fn add_backbone_contacts(&mut self, energy: f64) -> usize {
        let pairs: Vec<(usize, usize)> = self
            .atoms
            .windows(2)
            .filter(|w| w[0].chain_id == w[1].chain_id && w[1].res_id > w[0].res_id)
            .map(|w| (w[0].index, w[1].index))
            .collect();
        let mut added = 0;
        for (a1, a2) in pairs {
            if self.add_contact(a1, a2, 1.0, energy, ContactSource::Backbone) {
                added += 1;
            }
        }
        added
    }

    // Returns true if the contact was appended or replaced an existing one.
    fn add_contact(
        &mut self,
        a1: usize,
        a2: usize,
        distance: f64,
        energy: f64,
        source: ContactSource,
    ) -> bool {
        let key = (a1.min(a2), a1.max(a2));
        if let Some(&pos) = self.pair_map.get(&key) {
            let existing = &mut self.contacts[pos];
            if source.priority() > existing.source.priority() {
                existing.distance = distance;
                existing.energy = energy;
                existing.source = source;
                return true;
            }
            return false;
        }
        let index = self.contacts.len();
        self.contacts
            .push(Contact::new(index, a1, a2, distance, energy, source));
        self.pair_map.insert(key, index);
        true
    }

    pub fn build(self) -> Topology {
        Topology::from_parts(self.atoms, self.contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn ca(index: usize, res_id: isize, chain_id: char) -> CaAtom {
        CaAtom {
            index,
            serial: index + 1,
            res_name: "GLY".to_string(),
            res_id,
            chain_id,
            position: Point3::origin(),
        }
    }

    fn qm(
        chain1: char,
        res1: isize,
        chain2: char,
        res2: isize,
        distance: f64,
        energy: f64,
    ) -> QmRecord {
        QmRecord {
            chain1,
            res1,
            chain2,
            res2,
            distance,
            energy,
        }
    }

    fn two_chain_atoms() -> Vec<CaAtom> {
        vec![
            ca(0, 1, 'A'),
            ca(1, 2, 'A'),
            ca(2, 3, 'A'),
            ca(3, 1, 'B'),
            ca(4, 2, 'B'),
            ca(5, 3, 'B'),
        ]
    }

    #[test]
    fn qm_records_failing_either_cutoff_are_dropped() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let records = vec![
            qm('A', 1, 'A', 3, 2.0, 1.5),  // accepted
            qm('A', 1, 'B', 1, 5.0, 1.5),  // distance too large
            qm('A', 2, 'B', 2, 2.0, 0.1),  // energy too weak
            qm('A', 2, 'B', 3, 2.0, -0.9), // accepted, negative energy
        ];
        let accepted = builder.add_qm_contacts(&records, 2.8, 0.6).unwrap();
        assert_eq!(accepted, 2);
        let top = builder.build();
        assert_eq!(top.contacts().len(), 2);
        assert!(top.contact_between(0, 2).is_some());
        assert!(top.contact_between(1, 5).is_some());
    }

    #[test]
    fn qm_energy_cap_clips_positive_energies_only() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let records = vec![
            qm('A', 1, 'A', 3, 2.0, 80.0),
            qm('A', 1, 'B', 3, 2.0, -80.0),
        ];
        builder.add_qm_contacts(&records, 2.8, 0.6).unwrap();
        let top = builder.build();
        assert_relative_eq!(top.contact_between(0, 2).unwrap().energy, QM_ENERGY_CAP);
        assert_relative_eq!(top.contact_between(0, 5).unwrap().energy, -80.0);
    }

    #[test]
    fn qm_record_with_unknown_residue_is_fatal() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let records = vec![qm('A', 1, 'C', 99, 2.0, 1.5)];
        let err = builder.add_qm_contacts(&records, 2.8, 0.6).unwrap_err();
        assert_eq!(
            err,
            BuildError::ResidueNotFound {
                spec: ResidueSpec {
                    res_id: 99,
                    chain_id: 'C'
                }
            }
        );
    }

    #[test]
    fn backbone_synthesis_links_consecutive_residues_within_chains() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let added = builder.add_backbone_contacts(1.0);
        // Two chains of three residues each: 2 * (3 - 1) contacts.
        assert_eq!(added, 4);
        let top = builder.build();
        assert_eq!(top.contacts().len(), 4);
        for c in top.contacts() {
            let (c1, c2) = (
                top.atoms()[c.atom1].chain_id,
                top.atoms()[c.atom2].chain_id,
            );
            assert_eq!(c1, c2, "backbone contact must not cross the chain break");
            assert_eq!(c.source, ContactSource::Backbone);
        }
    }

    #[test]
    fn backbone_skips_sequence_resets_within_a_chain() {
        // Residue numbering drops from 50 back to 10: no link across the gap.
        let atoms = vec![ca(0, 49, 'A'), ca(1, 50, 'A'), ca(2, 10, 'A'), ca(3, 11, 'A')];
        let mut builder = TopologyBuilder::new(atoms);
        assert_eq!(builder.add_backbone_contacts(1.0), 2);
    }

    #[test]
    fn statistical_contacts_never_override_existing_pairs() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let records = vec![qm('A', 1, 'A', 3, 2.0, 5.0)];
        builder.add_qm_contacts(&records, 2.8, 0.6).unwrap();
        let rows = vec![
            CieplakContact {
                res1: 1,
                chain1: 'A',
                res2: 3,
                chain2: 'A',
                distance: 6.0,
            },
            CieplakContact {
                res1: 1,
                chain1: 'A',
                res2: 3,
                chain2: 'B',
                distance: 6.0,
            },
        ];
        let added = builder.add_statistical_contacts(&rows, 2.87).unwrap();
        assert_eq!(added, 1);
        let top = builder.build();
        let kept = top.contact_between(0, 2).unwrap();
        assert_eq!(kept.source, ContactSource::Quantum);
        assert_relative_eq!(kept.energy, 5.0);
        assert_relative_eq!(top.contact_between(0, 5).unwrap().energy, 2.87);
    }

    #[test]
    fn non_positive_statistical_energy_selects_the_default() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let rows = vec![CieplakContact {
            res1: 1,
            chain1: 'A',
            res2: 3,
            chain2: 'A',
            distance: 6.0,
        }];
        builder.add_statistical_contacts(&rows, 0.0).unwrap();
        let top = builder.build();
        assert_relative_eq!(
            top.contact_between(0, 2).unwrap().energy,
            DEFAULT_STATISTICAL_ENERGY
        );
    }

    #[test]
    fn backbone_replaces_lower_priority_contacts_in_place() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let records = vec![qm('A', 1, 'A', 2, 2.0, 5.0)];
        builder.add_qm_contacts(&records, 2.8, 0.6).unwrap();
        builder.add_backbone_contacts(1.0);
        let top = builder.build();
        let contact = top.contact_between(0, 1).unwrap();
        assert_eq!(contact.source, ContactSource::Backbone);
        assert_relative_eq!(contact.energy, 1.0);
        // The stable penalty-bookkeeping key survives the replacement.
        assert_eq!(contact.index, 0);
    }

    #[test]
    fn contact_indices_increase_globally_across_sources() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let records = vec![qm('A', 1, 'A', 3, 2.0, 5.0)];
        builder.add_qm_contacts(&records, 2.8, 0.6).unwrap();
        builder.add_backbone_contacts(1.0);
        let top = builder.build();
        let indices: Vec<usize> = top.contacts().iter().map(|c| c.index).collect();
        assert_eq!(indices, (0..top.contacts().len()).collect::<Vec<_>>());
    }

    #[test]
    fn no_two_contacts_share_an_unordered_pair() {
        let mut builder = TopologyBuilder::new(two_chain_atoms());
        let records = vec![
            qm('A', 1, 'A', 3, 2.0, 5.0),
            qm('A', 3, 'A', 1, 2.0, 4.0), // same pair, opposite order
        ];
        let accepted = builder.add_qm_contacts(&records, 2.8, 0.6).unwrap();
        assert_eq!(accepted, 1);
        let top = builder.build();
        assert_eq!(top.contacts().len(), 1);
        assert_relative_eq!(top.contact_between(0, 2).unwrap().energy, 5.0);
    }
}
