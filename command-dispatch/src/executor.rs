//! The execution and feedback loop: one turn in, one visible reply out.

use tracing::{info, warn};

use intent_classification::{parse_reply, ClassifierResult, Command};

use crate::context::resolve_patient;
use crate::conversation::Conversation;
use crate::endpoints::Specialist;
use crate::outcome::DispatchOutcome;
use crate::router::DispatchRouter;
use crate::specialist::{detect_call_prompt, CallPrompt};

/// Everything a turn produced beyond the conversation transcript itself.
#[derive(Debug)]
pub struct TurnReport {
    pub outcome: DispatchOutcome,
    pub call_prompt: Option<CallPrompt>,
}

/// Owns the conversation transcript and drives one turn end to end:
/// parse the classifier reply, resolve context, dispatch, and append exactly
/// one assistant feedback turn. No failure path is silent; the dispatch
/// router folds every error into the outcome, so a reply always lands.
pub struct TurnExecutor {
    router: DispatchRouter,
    conversation: Conversation,
    roster: Vec<Specialist>,
}

impl TurnExecutor {
    pub fn new(router: DispatchRouter, roster: Vec<Specialist>) -> Self {
        Self {
            router,
            conversation: Conversation::new(),
            roster,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run one turn.
    ///
    /// `transcript` is the finalized dictation shown as the user turn,
    /// `classification` is the classifier call's result (the raw untrusted
    /// model text, or the network/service error it failed with), and
    /// `location` is the navigation path the command applies to. Context is
    /// resolved fresh every turn; the user may have navigated since the last
    /// utterance. A failed classification degrades to the not-understood
    /// path; it never aborts the turn.
    pub async fn run_turn(
        &mut self,
        transcript: &str,
        classification: ClassifierResult<String>,
        location: &str,
    ) -> TurnReport {
        self.conversation.push_user(transcript);

        let command = match classification {
            Ok(raw_reply) => parse_reply(&raw_reply),
            Err(error) => {
                warn!(%error, "Classification failed; treating utterance as not understood");
                Command::Unknown {
                    message: error.to_string(),
                }
            }
        };
        let context = resolve_patient(location);
        info!(
            action = command.action_name(),
            patient = ?context,
            "Executing turn"
        );

        self.conversation.begin_assistant();
        let outcome = self.router.dispatch(command, context).await;
        let feedback = outcome.feedback();
        self.conversation.update_assistant(&feedback);
        self.conversation.end_assistant();

        let call_prompt = detect_call_prompt(&feedback, &self.roster);

        TurnReport {
            outcome,
            call_prompt,
        }
    }

    /// Append a free-text assistant reply (e.g. streamed conversational
    /// output that bypassed the action protocol) and scan it for a call
    /// affordance.
    pub fn record_assistant_reply(&mut self, text: &str) -> Option<CallPrompt> {
        self.conversation.push_assistant(text);
        detect_call_prompt(text, &self.roster)
    }
}
