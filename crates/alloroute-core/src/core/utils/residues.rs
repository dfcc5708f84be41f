use phf::{Set, phf_set};

static STANDARD_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    // Common protonation/modification variants that still carry a CA.
    "MSE", "HSD", "HSE", "HSP", "HID", "HIE", "HIP", "CYX",
};

/// Whether a residue name belongs to a standard amino acid.
///
/// Guards the CA extraction against non-protein records that also carry an
/// atom named "CA", notably calcium ions.
pub fn is_standard_residue(res_name: &str) -> bool {
    STANDARD_RESIDUE_NAMES.contains(res_name.trim())
}
