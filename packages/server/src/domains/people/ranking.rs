//! Picking the most senior people out of a company's founder listing.

use async_trait::async_trait;
use openai_client::strip_code_blocks;
use serde_json::{json, Value};
use specter_client::PersonSummary;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::kernel::BaseAI;

/// Keyword tiers, matched on whole words of the lowercased title.
/// A title scores the sum of every tier it hits.
const SENIORITY_TIERS: &[(&[&str], u32)] = &[
    (&["founder", "cofounder"], 100),
    (&["ceo", "chief executive"], 90),
    (&["cto", "coo", "cfo", "cpo", "cmo", "chief"], 80),
    (&["president"], 75),
    (&["managing director", "partner", "owner"], 70),
    (&["vp", "svp", "evp", "vice president"], 60),
    (&["head"], 50),
    (&["director"], 40),
    (&["lead", "principal"], 30),
    (&["manager"], 20),
];

#[async_trait]
pub trait FounderRanker: Send + Sync {
    /// The `k` most senior candidates, most senior first. Never fails:
    /// implementations degrade rather than error.
    async fn rank(&self, candidates: Vec<PersonSummary>, k: usize) -> Vec<PersonSummary>;
}

/// Deterministic title heuristic. Ties keep their listing order.
pub struct SeniorityRanker;

impl SeniorityRanker {
    pub fn score(title: &str) -> u32 {
        let words: String = title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let padded = format!(" {} ", words.split_whitespace().collect::<Vec<_>>().join(" "));

        SENIORITY_TIERS
            .iter()
            .filter(|(keywords, _)| {
                keywords
                    .iter()
                    .any(|kw| padded.contains(&format!(" {kw} ")))
            })
            .map(|(_, points)| points)
            .sum()
    }

    fn sorted(mut candidates: Vec<PersonSummary>) -> Vec<PersonSummary> {
        candidates.sort_by_key(|p| std::cmp::Reverse(Self::score(p.title.as_deref().unwrap_or(""))));
        candidates
    }
}

#[async_trait]
impl FounderRanker for SeniorityRanker {
    async fn rank(&self, candidates: Vec<PersonSummary>, k: usize) -> Vec<PersonSummary> {
        let mut ranked = Self::sorted(candidates);
        ranked.truncate(k);
        ranked
    }
}

const RANKING_PROMPT: &str = "You rank members of a startup's team by seniority. \
You will receive a JSON array of people with person_id, full_name and title. \
Reply with ONLY a JSON array of the person_id strings of the most senior people, \
most senior first. Founders and C-level executives come before everyone else.";

/// Asks the LLM for the top-k, falling back to [`SeniorityRanker`] whenever
/// the answer is unusable.
pub struct LlmRanker {
    ai: Arc<dyn BaseAI>,
}

impl LlmRanker {
    pub fn new(ai: Arc<dyn BaseAI>) -> Self {
        Self { ai }
    }
}

#[async_trait]
impl FounderRanker for LlmRanker {
    async fn rank(&self, candidates: Vec<PersonSummary>, k: usize) -> Vec<PersonSummary> {
        if candidates.len() <= k {
            return SeniorityRanker.rank(candidates, k).await;
        }

        let listing: Vec<Value> = candidates
            .iter()
            .map(|p| {
                json!({
                    "person_id": p.person_id,
                    "full_name": p.full_name,
                    "title": p.title,
                })
            })
            .collect();
        let user_prompt = format!(
            "Return the {k} most senior people.\n\n{}",
            Value::Array(listing)
        );

        let ids = match self.ai.complete(RANKING_PROMPT, &user_prompt).await {
            Ok(answer) => parse_ranked_ids(&answer),
            Err(e) => {
                warn!(error = %e, "LLM ranking failed, using title heuristic");
                return SeniorityRanker.rank(candidates, k).await;
            }
        };

        let Some(ids) = ids else {
            warn!("LLM ranking answer was not a JSON array, using title heuristic");
            return SeniorityRanker.rank(candidates, k).await;
        };

        debug!(?ids, "LLM ranking");
        merge_ranking(candidates, &ids, k)
    }
}

/// Ids from a JSON array answer (strings or numbers); `None` if it is not one.
fn parse_ranked_ids(answer: &str) -> Option<Vec<String>> {
    let parsed: Value = serde_json::from_str(strip_code_blocks(answer)).ok()?;
    let ids = parsed
        .as_array()?
        .iter()
        .filter_map(|id| match id {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect();
    Some(ids)
}

/// Candidates named by the LLM first, in its order, ignoring unknown and
/// repeated ids; then heuristic order fills the remaining slots.
fn merge_ranking(candidates: Vec<PersonSummary>, ids: &[String], k: usize) -> Vec<PersonSummary> {
    let mut remaining = SeniorityRanker::sorted(candidates);
    let mut ranked = Vec::with_capacity(k);

    for id in ids {
        if ranked.len() == k {
            break;
        }
        if let Some(pos) = remaining
            .iter()
            .position(|p| p.person_id.as_deref() == Some(id.as_str()))
        {
            ranked.push(remaining.remove(pos));
        }
    }

    let missing = k.saturating_sub(ranked.len());
    ranked.extend(remaining.into_iter().take(missing));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;
    use openai_client::OpenAIError;

    fn team() -> Vec<PersonSummary> {
        vec![
            PersonSummary::new("p1", "Sam Engineer", "Software Engineer"),
            PersonSummary::new("p2", "Ada Founder", "Co-Founder & CEO"),
            PersonSummary::new("p3", "Bo Sales", "VP Sales"),
            PersonSummary::new("p4", "Cy Tech", "Founder, CTO"),
            PersonSummary::new("p5", "Di Ops", "Head of Operations"),
        ]
    }

    fn ids(people: &[PersonSummary]) -> Vec<&str> {
        people.iter().filter_map(|p| p.person_id.as_deref()).collect()
    }

    #[test]
    fn test_seniority_scores() {
        assert!(SeniorityRanker::score("Co-Founder & CEO") > SeniorityRanker::score("Founder"));
        assert!(SeniorityRanker::score("CTO") > SeniorityRanker::score("VP Engineering"));
        assert!(SeniorityRanker::score("Head of Growth") > SeniorityRanker::score("Director"));
        assert_eq!(SeniorityRanker::score("Software Engineer"), 0);
        // whole words only
        assert_eq!(SeniorityRanker::score("Leadership Coach"), 0);
    }

    #[tokio::test]
    async fn test_seniority_ranker_takes_top_k() {
        let ranked = SeniorityRanker.rank(team(), 3).await;
        assert_eq!(ids(&ranked), vec!["p2", "p4", "p3"]);
    }

    #[tokio::test]
    async fn test_seniority_ranker_keeps_listing_order_on_ties() {
        let people = vec![
            PersonSummary::new("a", "A", "Engineer"),
            PersonSummary::new("b", "B", "Designer"),
        ];
        let ranked = SeniorityRanker.rank(people, 3).await;
        assert_eq!(ids(&ranked), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_llm_ranker_follows_answer() {
        let ai = Arc::new(MockAI::new().with_response("```json\n[\"p4\", \"p5\", \"p2\"]\n```"));
        let ranker = LlmRanker::new(ai.clone());

        let ranked = ranker.rank(team(), 3).await;

        assert_eq!(ids(&ranked), vec!["p4", "p5", "p2"]);
        assert_eq!(ai.calls().len(), 1);
        assert!(ai.calls()[0].user_prompt.contains("Co-Founder & CEO"));
    }

    #[tokio::test]
    async fn test_llm_ranker_ignores_unknown_ids_and_fills_up() {
        let ai = Arc::new(MockAI::new().with_response(r#"["zz", "p5", "p5"]"#));
        let ranked = LlmRanker::new(ai).rank(team(), 3).await;

        assert_eq!(ids(&ranked), vec!["p5", "p2", "p4"]);
    }

    #[tokio::test]
    async fn test_llm_ranker_falls_back_on_failure() {
        let ai = Arc::new(MockAI::new().with_error(OpenAIError::Network("reset".into())));
        let ranked = LlmRanker::new(ai).rank(team(), 3).await;
        assert_eq!(ids(&ranked), vec!["p2", "p4", "p3"]);

        let ai = Arc::new(MockAI::new().with_response("The CEO is most senior."));
        let ranked = LlmRanker::new(ai).rank(team(), 3).await;
        assert_eq!(ids(&ranked), vec!["p2", "p4", "p3"]);
    }

    #[tokio::test]
    async fn test_llm_ranker_skips_call_for_small_teams() {
        let ai = Arc::new(MockAI::new());
        let people = team().into_iter().take(2).collect();

        let ranked = LlmRanker::new(ai.clone()).rank(people, 3).await;

        assert_eq!(ranked.len(), 2);
        assert!(ai.calls().is_empty());
    }
}
