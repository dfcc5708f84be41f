use crate::core::models::atom::ResidueSpec;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Residue {spec} has no alpha carbon in the structure")]
    ResidueNotFound { spec: ResidueSpec },
}
