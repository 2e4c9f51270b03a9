//! Property-based tests for session lifecycle
//!
//! Drives random sequences of submissions (succeeding or failing) and
//! resets against a scripted model and checks the session shape after
//! every step.

use super::*;
use crate::llm::testing::MockLlmClient;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn seed() -> PersonaSeed {
    PersonaSeed::new("persona instruction", "opening line")
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

#[derive(Debug, Clone)]
enum Step {
    Submit {
        text: String,
        outcome: Result<String, LlmError>,
    },
    Reset,
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_error() -> impl Strategy<Value = LlmError> {
    (
        prop_oneof![
            Just(LlmErrorKind::Network),
            Just(LlmErrorKind::RateLimit),
            Just(LlmErrorKind::ServerError),
            Just(LlmErrorKind::Auth),
            Just(LlmErrorKind::InvalidRequest),
            Just(LlmErrorKind::Unknown),
        ],
        "[a-zA-Z0-9 :()]{1,40}",
    )
        .prop_map(|(kind, message)| LlmError::new(kind, message))
}

fn arb_outcome() -> impl Strategy<Value = Result<String, LlmError>> {
    prop_oneof![
        3 => "[a-zA-Z0-9 !?]{0,20}[a-zA-Z!]".prop_map(Ok),
        1 => arb_error().prop_map(Err),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => ("[a-zA-Z0-9 ]{1,30}", arb_outcome())
            .prop_map(|(text, outcome)| Step::Submit { text, outcome }),
        1 => Just(Step::Reset),
    ]
}

fn assert_seeded(session: &Session) -> Result<(), TestCaseError> {
    prop_assert!(session.turns().len() >= SEED_TURNS);
    prop_assert_eq!(&session.turns()[0], &Turn::user("persona instruction"));
    prop_assert_eq!(&session.turns()[1], &Turn::assistant("opening line"));
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn submissions_append_exactly_one_pair(steps in proptest::collection::vec(arb_step(), 0..20)) {
        block_on(async {
            let llm = MockLlmClient::new("mock");
            let mut session = start_new_session(&seed());

            for step in steps {
                match step {
                    Step::Submit { text, outcome } => {
                        let before = session.turns().len();
                        match &outcome {
                            Ok(reply) => llm.queue_text(reply),
                            Err(e) => llm.queue_error(e.clone()),
                        }

                        let (next, reply) = submit_message(session, &text, &llm).await;
                        session = next;

                        prop_assert_eq!(session.turns().len(), before + 2);
                        let user = &session.turns()[before];
                        let assistant = &session.turns()[before + 1];
                        prop_assert_eq!(user, &Turn::user(text.clone()));
                        prop_assert_eq!(assistant.role, Role::Assistant);
                        prop_assert!(!assistant.text.is_empty());
                        prop_assert_eq!(&assistant.text, &reply.display_text());

                        match outcome {
                            Ok(expected) => {
                                prop_assert_eq!(reply, Reply::Generated(expected));
                                prop_assert!(!assistant.is_failed());
                            }
                            Err(e) => {
                                prop_assert!(assistant.text.contains(&e.message));
                                prop_assert_eq!(
                                    assistant.failure.as_ref().map(|f| f.kind),
                                    Some(e.kind)
                                );
                            }
                        }
                    }
                    Step::Reset => {
                        session = reset_session(session, &seed());
                        prop_assert_eq!(session.turns().len(), SEED_TURNS);
                    }
                }
                assert_seeded(&session)?;
            }
            Ok(())
        })?;
    }

    #[test]
    fn user_turns_follow_submission_order(texts in proptest::collection::vec("[a-z]{1,10}", 1..15)) {
        block_on(async {
            let llm = MockLlmClient::new("mock");
            let mut session = start_new_session(&seed());

            for (i, text) in texts.iter().enumerate() {
                // Alternate success and failure; order must hold either way
                if i % 3 == 2 {
                    llm.queue_error(LlmError::network("down"));
                } else {
                    llm.queue_text("ok");
                }
                session = submit_message(session, text, &llm).await.0;
            }

            let recorded: Vec<&str> = session.exchanges().map(|(u, _)| u.text.as_str()).collect();
            let expected: Vec<&str> = texts.iter().map(String::as_str).collect();
            prop_assert_eq!(recorded, expected);

            let view = session.transcript();
            prop_assert_eq!(view.entries.len(), 1 + texts.len());
            prop_assert_eq!(view.entries[0].user.as_deref(), None);
            Ok(())
        })?;
    }

    #[test]
    fn reset_is_idempotent(prior in 0usize..10, resets in 1usize..5) {
        block_on(async {
            let llm = MockLlmClient::new("mock");
            let mut session = start_new_session(&seed());
            let fresh_turns = session.turns().to_vec();

            for i in 0..prior {
                llm.queue_text("reply");
                session = submit_message(session, &format!("m{i}"), &llm).await.0;
            }

            for _ in 0..resets {
                session = reset_session(session, &seed());
                prop_assert_eq!(session.turns(), fresh_turns.as_slice());
            }
            Ok(())
        })?;
    }

    #[test]
    fn model_request_never_replays_apologies(
        outcomes in proptest::collection::vec(arb_outcome(), 1..12),
        next in "[a-z]{1,10}",
    ) {
        let mut session = start_new_session(&seed());
        for (i, outcome) in outcomes.iter().enumerate() {
            let reply = match outcome {
                Ok(text) => Reply::Generated(text.clone()),
                Err(e) => Reply::Failed(e.clone().into()),
            };
            session = session.record(format!("m{i}"), reply);
        }

        let request = session.model_request(&next);
        let successes = outcomes.iter().filter(|o| o.is_ok()).count();

        prop_assert_eq!(request.messages.len(), SEED_TURNS + 2 * successes + 1);
        let expected_last = LlmMessage::user(next.clone());
        prop_assert_eq!(request.messages.last(), Some(&expected_last));
        prop_assert!(request.messages.iter().all(|m| !m.text.starts_with("😵")));
        for pair in request.messages.chunks(2) {
            prop_assert_eq!(pair[0].role, MessageRole::User);
            if let Some(second) = pair.get(1) {
                prop_assert_eq!(second.role, MessageRole::Assistant);
            }
        }
    }
}
