//! The demo feedback table shipped with the app.
//!
//! Hand-authored ratings for seven readers. Callers own the returned value
//! and pass it to the ranking engine explicitly.

use crate::types::UserFeedback;

/// The reader the demo ranks papers for
pub const ACTIVE_USER_ID: &str = "demo-owner";

/// Build the demo feedback table
pub fn demo_feedback() -> Vec<UserFeedback> {
    vec![
        UserFeedback::new(
            ACTIVE_USER_ID,
            [
                ("attention-is-all-you-need", 4.9),
                ("retrieval-augmented-generation", 4.7),
                ("graph-rag", 4.6),
                ("toolformer", 4.3),
                ("promptbreeder", 3.9),
                ("sparse-autoencoders", 4.2),
            ],
        ),
        UserFeedback::new(
            "systems-li",
            [
                ("attention-is-all-you-need", 4.8),
                ("flashattention", 4.5),
                ("jamba-hybrid", 4.6),
                ("megatron-turing-nlg", 4.4),
                ("mixtral-8x7b", 4.2),
            ],
        ),
        UserFeedback::new(
            "retrieval-wang",
            [
                ("retrieval-augmented-generation", 4.9),
                ("atlas-retrieval", 4.5),
                ("graph-rag", 4.8),
                ("retro-retrieval", 4.6),
                ("speculative-decoding", 4.1),
            ],
        ),
        UserFeedback::new(
            "agent-qa",
            [
                ("react-reasoning", 4.7),
                ("toolformer", 4.4),
                ("agentbench", 4.8),
                ("wizardlm", 4.3),
                ("promptbreeder", 4.2),
            ],
        ),
        UserFeedback::new(
            "safety-luo",
            [
                ("sparse-autoencoders", 4.9),
                ("claude-3", 4.4),
                ("self-consistency", 4.1),
                ("llama-2", 4.0),
                ("chain-of-thought", 4.2),
            ],
        ),
        UserFeedback::new(
            "prompting-niu",
            [
                ("promptbreeder", 4.7),
                ("chain-of-thought", 4.5),
                ("self-consistency", 4.6),
                ("alpaca-52k", 4.0),
                ("flan-zero-shot", 4.3),
            ],
        ),
        UserFeedback::new(
            "modeling-zhang",
            [
                ("jamba-hybrid", 4.5),
                ("mamba-ssm", 4.4),
                ("mixtral-8x7b", 4.3),
                ("deepseek-v2", 4.2),
                ("qwen2-72b", 4.1),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_feedback_shape() {
        let feedback = demo_feedback();
        assert_eq!(feedback.len(), 7);
        assert_eq!(feedback[0].user_id, ACTIVE_USER_ID);
        assert!(feedback.iter().all(|entry| entry.ratings.len() == 5 || entry.user_id == ACTIVE_USER_ID));
        assert_eq!(feedback[0].ratings.len(), 6);
    }
}
