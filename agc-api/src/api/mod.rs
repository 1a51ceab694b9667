//! HTTP API handlers
//!
//! One module per resource; each exposes a `*_routes()` builder merged
//! into the application router.

pub mod analyses;
pub mod assessments;
pub mod dashboard;
pub mod health;
pub mod model_cards;
pub mod remediation;

pub use analyses::analysis_routes;
pub use assessments::assessment_routes;
pub use dashboard::dashboard_routes;
pub use health::health_routes;
pub use model_cards::model_card_routes;
pub use remediation::remediation_routes;
