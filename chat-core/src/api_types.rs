//! Public API types re-used by the caller (the chat session).

/// How the turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnKind {
    /// Retrieval found context and the model produced an answer.
    Answered,
    /// Retrieval came back empty; the model was never called.
    NoInformation,
    /// The model call failed; the error text is the visible answer.
    LlmFailed,
}

/// Result of one pipeline turn.
///
/// `retrieved_files` preserves retrieval order and is empty for
/// [`TurnKind::NoInformation`] and [`TurnKind::LlmFailed`] turns.
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    pub kind: TurnKind,
    pub answer: String,
    pub retrieved_files: Vec<String>,
}
