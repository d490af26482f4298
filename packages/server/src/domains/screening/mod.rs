//! TGN screening notes (Team, Growth, Network).
//!
//! The scoring rubric lives entirely in the system prompt; this domain only
//! assembles the company and founder data into the user prompt and returns
//! whatever note the model writes.

pub mod activities;
pub mod models;
pub mod prompt;

pub use activities::generate_note;
pub use models::NoteRequest;
pub use prompt::{build_user_prompt, TGN_SYSTEM_PROMPT};
