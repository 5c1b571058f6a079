//! RAG + LLM gateway for safety-sheet questions.
//!
//! Public API: [`ChatCore::answer_question`]. It embeds the question,
//! retrieves top-K context per selected substance (or unscoped), assembles
//! the annotated context block, builds the fixed two-message prompt, calls
//! the answer model, and returns the turn outcome. The core holds no state
//! between turns; conversation history belongs to the caller.

mod api_types;
mod cfg;
mod error;

pub mod context;
pub mod prompt;
pub mod retrieve;

pub use api_types::{TurnKind, TurnOutcome};
pub use cfg::ChatConfig;
pub use error::ChatError;

use std::sync::Arc;

use ai_llm_service::{AiLlmError, ProviderError, service_profiles::LlmServiceProfiles};
use sds_store::{SdsStore, SheetHit, embed::LlmEmbedder};
use tracing::{debug, info};

/// Fixed answer for turns where retrieval found nothing.
pub const NO_INFORMATION_ANSWER: &str =
    "No relevant information was found in the documents.";

/// Long-lived gateway over the store, the embedder and the answer model.
pub struct ChatCore {
    store: SdsStore,
    svc: Arc<LlmServiceProfiles>,
    embedder: LlmEmbedder,
    rerank_across_filters: bool,
}

impl ChatCore {
    /// Wires the store and the shared LLM service together.
    ///
    /// # Errors
    /// Returns `ChatError::Store` when the store configuration is invalid.
    pub fn new(cfg: ChatConfig, svc: Arc<LlmServiceProfiles>) -> Result<Self, ChatError> {
        let embedder = LlmEmbedder::new(svc.clone(), cfg.store.embedding_dim);
        let store = SdsStore::new(cfg.store)?;
        Ok(Self {
            store,
            svc,
            embedder,
            rerank_across_filters: cfg.rerank_across_filters,
        })
    }

    /// The underlying store (substance snapshot).
    pub fn store(&self) -> &SdsStore {
        &self.store
    }

    /// Runs one full pipeline turn for a question and the selected substance
    /// filters.
    ///
    /// Empty retrieval short-circuits with the fixed no-information answer
    /// and never reaches the model. A failed model call becomes the visible
    /// answer (status and raw body included) with an empty retrieved-files
    /// list; both cases are normal outcomes, not errors.
    ///
    /// # Errors
    /// Propagates store and query-embedding failures.
    pub async fn answer_question(
        &self,
        question: &str,
        filters: &[String],
    ) -> Result<TurnOutcome, ChatError> {
        let hits = retrieve::retrieve_scoped(
            &self.store,
            &self.embedder,
            question,
            filters,
            self.rerank_across_filters,
        )
        .await?;

        let Some(plan) = plan_turn(question, &hits) else {
            info!("retrieval returned no hits; skipping model call");
            return Ok(TurnOutcome {
                kind: TurnKind::NoInformation,
                answer: NO_INFORMATION_ANSWER.to_string(),
                retrieved_files: Vec::new(),
            });
        };

        debug!(
            "asking model with {} context blocks, {} files",
            hits.len(),
            plan.retrieved_files.len()
        );

        match self.svc.answer(prompt::SYSTEM_PROMPT, &plan.user_prompt).await {
            Ok(answer) => Ok(TurnOutcome {
                kind: TurnKind::Answered,
                answer,
                retrieved_files: plan.retrieved_files,
            }),
            Err(e) => Ok(TurnOutcome {
                kind: TurnKind::LlmFailed,
                answer: llm_failure_answer(&e),
                retrieved_files: Vec::new(),
            }),
        }
    }
}

/// Everything the model call needs for one answered turn.
struct TurnPlan {
    user_prompt: String,
    retrieved_files: Vec<String>,
}

/// Builds the prompt plan, or `None` when there is no context to ground an
/// answer; in that case no prompt is constructed at all.
fn plan_turn(question: &str, hits: &[SheetHit]) -> Option<TurnPlan> {
    if hits.is_empty() {
        return None;
    }
    let context = context::assemble_context(hits);
    Some(TurnPlan {
        user_prompt: prompt::build_user_prompt(question, &context),
        retrieved_files: context::retrieved_files(hits),
    })
}

/// The visible answer for a failed model call: literally includes the
/// numeric status and the raw response body when available.
fn llm_failure_answer(err: &AiLlmError) -> String {
    match err {
        AiLlmError::Provider(ProviderError::HttpStatus { status, body, .. }) => {
            format!("Model call failed: {}, {}", status.as_u16(), body)
        }
        other => format!("Model call failed: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_retrieval_builds_no_prompt() {
        assert!(plan_turn("any question", &[]).is_none());
    }

    #[test]
    fn plan_embeds_context_and_collects_files() {
        let hits = vec![SheetHit {
            score: 0.9,
            text: "Highly flammable.".into(),
            substance: Some("ACETONE".into()),
            origin_file: Some("X123.HTM".into()),
        }];
        let plan = plan_turn("Is acetone flammable?", &hits).unwrap();
        assert!(plan.user_prompt.contains("[SUBSTANCE: ACETONE, FILE: X123.HTM]"));
        assert!(plan.user_prompt.contains("Is acetone flammable?"));
        assert_eq!(plan.retrieved_files, vec!["X123.HTM"]);
    }

    #[test]
    fn http_failure_answer_includes_status_and_body() {
        let err = AiLlmError::Provider(ProviderError::HttpStatus {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            url: "https://openrouter.ai/api/v1/chat/completions".into(),
            body: "{\"error\":\"rate limited\"}".into(),
        });
        let answer = llm_failure_answer(&err);
        assert_eq!(answer, "Model call failed: 429, {\"error\":\"rate limited\"}");
    }
}
