//! Company and founder data from the people directory.

pub mod activities;
pub mod ranking;

pub use activities::{company_profile, founders_with_details, person_details};
pub use ranking::{FounderRanker, LlmRanker, SeniorityRanker};
