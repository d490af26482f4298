use brightdata_client::{
    normalize_profiles, wait_for_results, EnrichedProfile, JobHandle, JobStatus, PollOutcome,
};
use tracing::info;

use crate::common::AppError;
use crate::kernel::ServerDeps;

/// Result of checking on a collection once.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionStatus {
    /// Still running, or finished without records so far
    Processing,
    Complete(Vec<EnrichedProfile>),
}

/// Start a scraping job for the given profile URLs and return its handle.
pub async fn start_profile_collection(
    deps: &ServerDeps,
    items: Vec<String>,
) -> Result<JobHandle, AppError> {
    let items = validate_items(items)?;
    let scraper = deps.scraper()?;

    let handle = scraper.trigger(&items).await?;
    info!(handle = %handle, count = items.len(), "Profile collection started");
    Ok(handle)
}

/// Poll a job once. Empty results count as still processing.
pub async fn check_profile_collection(
    deps: &ServerDeps,
    handle: &str,
) -> Result<CollectionStatus, AppError> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(AppError::InvalidInput("A handle is required.".into()));
    }
    let scraper = deps.scraper()?;

    match scraper.poll(&JobHandle::new(handle)).await? {
        JobStatus::Ready(records) => {
            let profiles = normalize_profiles(&records);
            info!(
                handle,
                records = records.len(),
                profiles = profiles.len(),
                "Profile collection complete"
            );
            Ok(CollectionStatus::Complete(profiles))
        }
        JobStatus::Pending | JobStatus::Empty => Ok(CollectionStatus::Processing),
    }
}

/// Start a job and wait for it within the caller's request.
///
/// Blocks for up to the configured poll budget. A job that only ever
/// returns empty results yields an empty list; one that never finishes is
/// a timeout.
pub async fn collect_profiles(
    deps: &ServerDeps,
    items: Vec<String>,
) -> Result<Vec<EnrichedProfile>, AppError> {
    let items = validate_items(items)?;
    let scraper = deps.scraper()?;

    let handle = scraper.trigger(&items).await?;
    info!(handle = %handle, count = items.len(), "Waiting for profile collection");

    match wait_for_results(&**scraper, &handle, &deps.poll_policy).await? {
        PollOutcome::Ready(records) => Ok(normalize_profiles(&records)),
        PollOutcome::Empty => Ok(Vec::new()),
    }
}

fn validate_items(items: Vec<String>) -> Result<Vec<String>, AppError> {
    let items: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .collect();

    if items.is_empty() {
        return Err(AppError::InvalidInput(
            "An array of LinkedIn URLs is required.".into(),
        ));
    }
    if items.iter().any(String::is_empty) {
        return Err(AppError::InvalidInput(
            "LinkedIn URLs must not be blank.".into(),
        ));
    }
    Ok(items)
}
