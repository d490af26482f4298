//! Founder profile enrichment through asynchronous scraping jobs.
//!
//! Two ways in: start a job and poll it later (`start_profile_collection` +
//! `check_profile_collection`), or wait for it within one request
//! (`collect_profiles`).

pub mod activities;

pub use activities::{
    check_profile_collection, collect_profiles, start_profile_collection, CollectionStatus,
};
