//! Company lookups and the founder fan-out.

use futures::future::join_all;
use serde_json::Value;
use specter_client::PersonSummary;
use tracing::{info, warn};

use crate::common::AppError;
use crate::kernel::{BasePeopleDirectory, ServerDeps};

/// Company record as the directory returns it.
pub async fn company_profile(deps: &ServerDeps, company_id: &str) -> Result<Value, AppError> {
    let company_id = require_id(company_id, "Company ID")?;
    let people = deps.people()?;
    Ok(people.company(company_id).await?)
}

/// Person record as the directory returns it.
pub async fn person_details(deps: &ServerDeps, person_id: &str) -> Result<Value, AppError> {
    let person_id = require_id(person_id, "Person ID")?;
    let people = deps.people()?;
    Ok(people.person(person_id).await?)
}

/// Full records for the most senior founders of a company.
///
/// The founder listing is the primary call and its failure fails the request.
/// Detail lookups run concurrently; any that fail are logged and left out, so
/// the result may be shorter than the ranking.
pub async fn founders_with_details(
    deps: &ServerDeps,
    company_id: &str,
) -> Result<Vec<Value>, AppError> {
    let company_id = require_id(company_id, "Company ID")?;
    let people = deps.people()?;

    let founders = people.founders(company_id).await?;
    if founders.is_empty() {
        info!(company_id, "No founders listed");
        return Ok(Vec::new());
    }

    let total = founders.len();
    let top = deps.ranker.rank(founders, deps.founder_limit).await;
    info!(company_id, total, selected = top.len(), "Fetching founder details");

    let lookups = top
        .iter()
        .map(|person| fetch_details(people.as_ref(), person));
    let details: Vec<Value> = join_all(lookups).await.into_iter().flatten().collect();

    if details.len() < top.len() {
        warn!(
            company_id,
            requested = top.len(),
            returned = details.len(),
            "Some founder lookups failed"
        );
    }

    Ok(details)
}

fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidInput(format!("{what} is required")));
    }
    Ok(id)
}

async fn fetch_details(people: &dyn BasePeopleDirectory, person: &PersonSummary) -> Option<Value> {
    let Some(person_id) = person.person_id.as_deref() else {
        warn!(name = ?person.full_name, "Founder has no person_id, skipping");
        return None;
    };

    match people.person(person_id).await {
        Ok(details) => Some(details),
        Err(e) => {
            warn!(person_id, error = %e, "Founder detail lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockPeopleDirectory, TestDependencies};
    use serde_json::json;

    fn directory() -> MockPeopleDirectory {
        MockPeopleDirectory::new()
            .with_founders(
                "acme",
                vec![
                    PersonSummary::new("p1", "Sam", "Engineer"),
                    PersonSummary::new("p2", "Ada", "Co-Founder & CEO"),
                    PersonSummary::new("p3", "Bo", "VP Sales"),
                    PersonSummary::new("p4", "Cy", "Founder, CTO"),
                ],
            )
            .with_founders("empty", vec![])
            .with_person("p2", json!({"id": "p2", "full_name": "Ada"}))
            .with_person("p4", json!({"id": "p4", "full_name": "Cy"}))
    }

    #[tokio::test]
    async fn test_failed_lookups_are_dropped() {
        // p3 has no detail record, so its lookup 404s
        let test_deps = TestDependencies::new().mock_people(directory());
        let deps = test_deps.server_deps();

        let details = founders_with_details(&deps, "acme").await.unwrap();

        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["id"], "p2");
        assert_eq!(details[1]["id"], "p4");

        let calls = test_deps.people.as_ref().unwrap().calls();
        assert!(calls.contains(&"person:p3".to_string()));
        assert!(!calls.contains(&"person:p1".to_string()));
    }

    #[tokio::test]
    async fn test_no_founders_is_an_empty_answer() {
        let deps = TestDependencies::new().mock_people(directory()).server_deps();
        assert!(founders_with_details(&deps, "empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_fails_the_request() {
        let deps = TestDependencies::new().mock_people(directory()).server_deps();

        let err = founders_with_details(&deps, "unknown").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamRejected { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_blank_id_is_rejected_before_configuration() {
        let deps = TestDependencies::new().server_deps();

        let err = company_profile(&deps, " ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == "Company ID is required"));

        let err = person_details(&deps, "").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_pass_through_lookups() {
        let test_deps = TestDependencies::new().mock_people(
            directory().with_company("acme", json!({"id": "acme", "name": "Acme"})),
        );
        let deps = test_deps.server_deps();

        assert_eq!(company_profile(&deps, "acme").await.unwrap()["name"], "Acme");
        assert_eq!(person_details(&deps, "p2").await.unwrap()["full_name"], "Ada");
        assert_eq!(
            test_deps.people.as_ref().unwrap().calls(),
            vec!["company:acme", "person:p2"]
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_lookup() {
        let deps = TestDependencies::new().server_deps();

        let err = founders_with_details(&deps, "acme").await.unwrap_err();
        assert!(matches!(err, AppError::ConfigurationMissing("SPECTER_API_KEY")));
    }
}
