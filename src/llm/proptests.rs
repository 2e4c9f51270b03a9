//! Property-based tests for the Gemini translation layer
//!
//! These tests verify that the translation between our internal types
//! and the Gemini wire format preserves key invariants:
//! - One wire content per message, in order
//! - Roles map user -> user, assistant -> model
//! - Text survives translation byte for byte
//! - Responses without text are rejected

use super::gemini::{
    GeminiCandidate, GeminiContent, GeminiPart, GeminiResponse, GeminiService,
};
use super::types::{LlmMessage, LlmRequest, MessageRole};
use super::LlmErrorKind;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_role() -> impl Strategy<Value = MessageRole> {
    prop_oneof![Just(MessageRole::User), Just(MessageRole::Assistant)]
}

/// Arbitrary message, including non-ASCII persona text
fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (arb_role(), "[a-zA-Z0-9 _.!?,\u{00C0}-\u{00FF}\u{1F300}-\u{1F5FF}]{1,80}")
        .prop_map(|(role, text)| LlmMessage { role, text })
}

fn arb_request() -> impl Strategy<Value = LlmRequest> {
    (
        proptest::collection::vec(arb_message(), 0..12),
        proptest::option::of("[a-zA-Z ]{1,40}"),
        proptest::option::of(1u32..8192),
    )
        .prop_map(|(messages, system, max_tokens)| LlmRequest {
            system,
            messages,
            max_tokens,
        })
}

fn response_with_parts(parts: Vec<Option<String>>, finish_reason: Option<&str>) -> GeminiResponse {
    GeminiResponse {
        candidates: vec![GeminiCandidate {
            content: Some(GeminiContent {
                role: Some("model".to_string()),
                parts: parts.into_iter().map(|text| GeminiPart { text }).collect(),
            }),
            finish_reason: finish_reason.map(str::to_string),
        }],
        prompt_feedback: None,
        usage_metadata: None,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn translation_preserves_order_roles_and_text(request in arb_request()) {
        let wire = GeminiService::translate_request(&request);

        prop_assert_eq!(wire.contents.len(), request.messages.len());
        for (content, msg) in wire.contents.iter().zip(&request.messages) {
            let expected_role = match msg.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            prop_assert_eq!(content.role.as_deref(), Some(expected_role));
            prop_assert_eq!(content.parts.len(), 1);
            prop_assert_eq!(content.parts[0].text.as_deref(), Some(msg.text.as_str()));
        }

        prop_assert_eq!(wire.system_instruction.is_some(), request.system.is_some());
        prop_assert_eq!(
            wire.generation_config.and_then(|c| c.max_output_tokens),
            request.max_tokens
        );
    }

    #[test]
    fn translation_serializes_to_valid_json(request in arb_request()) {
        let wire = GeminiService::translate_request(&request);
        let value = serde_json::to_value(&wire).unwrap();
        let contents = value["contents"].as_array().unwrap();
        prop_assert_eq!(contents.len(), request.messages.len());
        for content in contents {
            let role = content["role"].as_str().unwrap();
            prop_assert!(role == "user" || role == "model");
        }
    }

    #[test]
    fn normalize_concatenates_text_parts(
        parts in proptest::collection::vec("[a-zA-Z0-9 ]{0,20}", 1..5)
    ) {
        let joined: String = parts.concat();
        prop_assume!(!joined.trim().is_empty());

        let resp = response_with_parts(parts.into_iter().map(Some).collect(), Some("STOP"));
        let normalized = GeminiService::normalize_response(resp).unwrap();
        prop_assert_eq!(normalized.text, joined);
        prop_assert!(normalized.end_turn);
    }

    #[test]
    fn normalize_rejects_whitespace_only(ws in "[ \t\n]{0,10}", reason in "(STOP|SAFETY|MAX_TOKENS)") {
        let resp = response_with_parts(vec![Some(ws), None], Some(reason.as_str()));
        let err = GeminiService::normalize_response(resp).unwrap_err();
        prop_assert_eq!(err.kind, LlmErrorKind::Unknown);
        prop_assert!(err.message.contains(&reason));
    }
}
