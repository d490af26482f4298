use chrono::NaiveDate;
use tracing::info;

use super::models::NoteRequest;
use super::prompt::{build_user_prompt, TGN_SYSTEM_PROMPT};
use crate::common::AppError;
use crate::kernel::ServerDeps;

/// Write a TGN note for the company and founders in `request`.
pub async fn generate_note(
    deps: &ServerDeps,
    request: NoteRequest,
    today: NaiveDate,
) -> Result<String, AppError> {
    let NoteRequest {
        initials,
        growth_metrics,
        company_data: Some(company),
        founder_data: Some(founders),
    } = request
    else {
        return Err(missing_fields());
    };
    let Some(initials) = initials.as_deref().map(str::trim).filter(|i| !i.is_empty()) else {
        return Err(missing_fields());
    };

    let ai = deps.ai()?;
    let user_prompt = build_user_prompt(
        initials,
        growth_metrics.as_deref(),
        &company,
        &founders,
        today,
    );

    info!(
        initials,
        company = company.name.as_deref().unwrap_or("N/A"),
        founders = founders.len(),
        "Generating TGN note"
    );

    let note = ai.complete(TGN_SYSTEM_PROMPT, &user_prompt).await?;
    if note.trim().is_empty() {
        return Err(AppError::UpstreamMalformedResponse {
            provider: "OpenAI",
            detail: "Received an empty response from OpenAI".to_string(),
        });
    }

    Ok(note)
}

fn missing_fields() -> AppError {
    AppError::InvalidInput(
        "Missing required data: initials, companyData, or founderData.".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockAI, TestDependencies};
    use openai_client::OpenAIError;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    fn request() -> NoteRequest {
        serde_json::from_value(json!({
            "initials": "LS",
            "companyData": {"name": "Acme"},
            "founderData": [{"full_name": "Ada"}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_returns_model_note() {
        let test_deps =
            TestDependencies::new().mock_ai(MockAI::new().with_response("[LS] 31/01/25 TGN 1.25"));
        let deps = test_deps.server_deps();

        let note = generate_note(&deps, request(), today()).await.unwrap();

        assert_eq!(note, "[LS] 31/01/25 TGN 1.25");
        let calls = test_deps.ai.as_ref().unwrap().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt, TGN_SYSTEM_PROMPT);
        assert!(calls[0].user_prompt.contains("- User Initials: LS"));
        assert!(calls[0].user_prompt.contains("#### Founder 1: Ada"));
    }

    #[tokio::test]
    async fn test_missing_fields_fail_before_the_model() {
        let test_deps = TestDependencies::new().mock_ai(MockAI::new());
        let deps = test_deps.server_deps();

        for body in [
            json!({"companyData": {}, "founderData": []}),
            json!({"initials": " ", "companyData": {}, "founderData": []}),
            json!({"initials": "LS", "founderData": []}),
            json!({"initials": "LS", "companyData": {}}),
        ] {
            let request: NoteRequest = serde_json::from_value(body).unwrap();
            let err = generate_note(&deps, request, today()).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
        assert!(test_deps.ai.as_ref().unwrap().calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_a_configuration_error() {
        let deps = TestDependencies::new().server_deps();

        let err = generate_note(&deps, request(), today()).await.unwrap_err();
        assert!(matches!(err, AppError::ConfigurationMissing("OPENAI_API_KEY")));
    }

    #[tokio::test]
    async fn test_empty_or_failed_completion() {
        let deps = TestDependencies::new()
            .mock_ai(
                MockAI::new()
                    .with_response("  ")
                    .with_error(OpenAIError::Api {
                        status: 429,
                        message: "Rate limit".into(),
                    }),
            )
            .server_deps();

        let err = generate_note(&deps, request(), today()).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamMalformedResponse { .. }));

        let err = generate_note(&deps, request(), today()).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamRejected { status: 429, .. }));
    }
}
