//! Prompt builder: fixed persona + context-grounded user message.

/// Fixed domain-expert persona for the system message.
pub const SYSTEM_PROMPT: &str =
    "You are an expert in chemical safety and international chemical safety cards.";

/// Builds the user message embedding the assembled context and the literal
/// question, with the instruction to cite the originating file and to prefer
/// verbatim phrasing from the documents.
pub fn build_user_prompt(question: &str, context: &str) -> String {
    format!(
        "Using these documents:\n{context}\n\nAnswer: {question}, \
         also naming the file where you find the information. \
         Use phrases taken from the documents."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_context_and_question_literally() {
        let prompt = build_user_prompt(
            "Is acetone flammable?",
            "[SUBSTANCE: ACETONE, FILE: X123.HTM]\nHighly flammable.",
        );
        assert!(prompt.starts_with("Using these documents:\n[SUBSTANCE: ACETONE"));
        assert!(prompt.contains("Highly flammable."));
        assert!(prompt.contains("Answer: Is acetone flammable?,"));
        assert!(prompt.contains("naming the file"));
        assert!(prompt.contains("phrases taken from the documents"));
    }
}
