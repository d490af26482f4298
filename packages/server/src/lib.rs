// TGN Screening - API Core
//
// HTTP handlers that assemble startup screening notes from three upstream
// providers: OpenAI for the note itself, Specter for company and founder
// records, and Bright Data for scraped LinkedIn profiles.
//
// Domains live in domains/*; provider clients are injected through kernel::ServerDeps.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
