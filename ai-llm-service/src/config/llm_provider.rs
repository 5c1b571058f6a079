/// Represents the provider (backend) used for LLM inference and embeddings.
///
/// Adding more providers in the future (e.g., Anthropic, Mistral API) can be
/// done by extending this enum and the matching service dispatch in
/// [`crate::service_profiles::LlmServiceProfiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// An OpenAI-compatible chat-completions API (OpenRouter, OpenAI).
    OpenAi,
}
