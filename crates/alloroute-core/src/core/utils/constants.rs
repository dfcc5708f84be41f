//! Physical constants and fixed parameters of the contact graph.

/// Conversion factor from kcal/mol to kJ/mol.
pub const KCAL_TO_KJ: f64 = 4.184;

/// Conversion factor from kJ/mol to kcal/mol.
pub const KJ_TO_KCAL: f64 = 1.0 / KCAL_TO_KJ;

/// Cap on the magnitude of accepted QM interaction energies (kJ/mol).
///
/// A single very strong contact would otherwise dominate the graph. Only
/// positive energies exceeding the cap are clipped; the cap never raises a
/// magnitude.
pub const QM_ENERGY_CAP: f64 = 12.0 * KCAL_TO_KJ;

/// Default bonding energy assigned to statistical (Cieplak) contacts when no
/// positive override is given (kcal/mol).
pub const DEFAULT_STATISTICAL_ENERGY: f64 = 12.0 * KJ_TO_KCAL;

/// Separator between residue labels in a rendered path.
pub const PATH_SEPARATOR: &str = "-->";
