pub mod clock;
pub mod engine;
pub mod factors;
pub mod label;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{calculate_lead_score, score_breakdown, score_listing, FactorContribution, ScoreResult};
pub use factors::{compute_factors, CityTier, Factor, ScoreFactors};
pub use label::{score_label, LabelColor, ScoreLabel};
pub use validation::validate_listing;
