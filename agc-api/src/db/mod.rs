//! Data access for agc-api
//!
//! One module per entity. Lookups return `Ok(None)` when no row
//! matches; listings return an empty vec. Store failures bubble up as
//! errors for the handler layer to log and mask.

pub mod analyses;
pub mod assessments;
pub mod model_cards;
pub mod remediation;
pub mod systems;
