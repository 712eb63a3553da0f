//! Chat request orchestration: classify, then FAQ, live data and AI in turn.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::chat::{NewChatExchange, ResolutionSource};
use crate::models::membership::MembershipPlan;
use crate::models::schedule::ScheduleSlot;

use super::classifier::DomainClassifier;
use super::faq::match_faq;
use super::live_data::{
    detect_intents, summarize_coaches, summarize_plans, summarize_schedule, LiveDataIntent,
};
use super::responder::AiResponder;
use super::sources::{ExchangeLog, KnowledgeSource};

/// Reply for messages outside boxing, fitness and the gym.
pub const OUT_OF_DOMAIN_REPLY: &str = "I'm a boxing specialist assistant. I can only help with boxing-related questions like training, techniques, schedules, and equipment. Please ask me about boxing! 🥊";

/// Errors surfaced to the caller. Everything past input validation degrades
/// to a fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("Empty message")]
    EmptyMessage,
}

/// Who is asking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller {
    /// Authenticated member, if any.
    pub user_id: Option<Uuid>,
    /// Visitor session, if any.
    pub session_id: Option<Uuid>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            session_id: None,
        }
    }
}

/// Result of a resolved chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub response: String,
    pub in_domain: bool,
    pub resolved_by: ResolutionSource,
}

/// The chatbot resolution waterfall.
#[derive(Clone)]
pub struct ChatbotPipeline {
    classifier: DomainClassifier,
    responder: AiResponder,
    knowledge: Arc<dyn KnowledgeSource>,
    log: Arc<dyn ExchangeLog>,
    log_anonymous: bool,
}

impl ChatbotPipeline {
    pub fn new(
        classifier: DomainClassifier,
        responder: AiResponder,
        knowledge: Arc<dyn KnowledgeSource>,
        log: Arc<dyn ExchangeLog>,
    ) -> Self {
        Self {
            classifier,
            responder,
            knowledge,
            log,
            log_anonymous: true,
        }
    }

    /// Whether exchanges without an authenticated user are logged.
    pub fn with_anonymous_logging(mut self, enabled: bool) -> Self {
        self.log_anonymous = enabled;
        self
    }

    /// Resolves one message.
    pub async fn handle(&self, message: &str, caller: &Caller) -> Result<ChatOutcome, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let outcome = if self.classifier.is_in_domain(message).await {
            let (response, resolved_by) = self.resolve_in_domain(message).await;
            ChatOutcome {
                response,
                in_domain: true,
                resolved_by,
            }
        } else {
            ChatOutcome {
                response: OUT_OF_DOMAIN_REPLY.to_string(),
                in_domain: false,
                resolved_by: ResolutionSource::OutOfDomain,
            }
        };

        tracing::debug!(
            resolved_by = %outcome.resolved_by,
            in_domain = outcome.in_domain,
            "Chat message resolved"
        );

        self.record(message, caller, &outcome).await;
        Ok(outcome)
    }

    async fn resolve_in_domain(&self, message: &str) -> (String, ResolutionSource) {
        if let Some(answer) = self.faq_stage(message).await {
            return (answer, ResolutionSource::Faq);
        }
        if let Some(answer) = self.live_data_stage(message).await {
            return (answer, ResolutionSource::LiveData);
        }
        (self.responder.respond(message).await, ResolutionSource::Ai)
    }

    async fn faq_stage(&self, message: &str) -> Option<String> {
        match self.knowledge.active_faqs().await {
            Ok(faqs) => {
                let answer = match_faq(message, &faqs).map(str::to_string);
                tracing::debug!(hit = answer.is_some(), "FAQ stage");
                answer
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load FAQ entries, skipping stage");
                None
            }
        }
    }

    async fn live_data_stage(&self, message: &str) -> Option<String> {
        let intents = detect_intents(message);
        if intents.is_empty() {
            tracing::debug!("Live-data stage: no intent");
            return None;
        }

        // Loaded at most once, and only when an intent needs it.
        let mut schedule: Option<Vec<ScheduleSlot>> = None;
        let mut plans: Option<Vec<MembershipPlan>> = None;

        for intent in intents {
            let answer = match intent {
                LiveDataIntent::Schedule => {
                    summarize_schedule(self.schedule_cached(&mut schedule).await)
                }
                LiveDataIntent::Membership => {
                    summarize_plans(self.plans_cached(&mut plans).await)
                }
                LiveDataIntent::Coach => {
                    summarize_coaches(self.schedule_cached(&mut schedule).await)
                }
            };
            if answer.is_some() {
                tracing::debug!(?intent, "Live-data stage hit");
                return answer;
            }
        }
        None
    }

    async fn schedule_cached<'a>(
        &self,
        cache: &'a mut Option<Vec<ScheduleSlot>>,
    ) -> &'a [ScheduleSlot] {
        if cache.is_none() {
            let slots = self.knowledge.active_schedule().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load schedule");
                Vec::new()
            });
            *cache = Some(slots);
        }
        cache.as_deref().unwrap_or_default()
    }

    async fn plans_cached<'a>(
        &self,
        cache: &'a mut Option<Vec<MembershipPlan>>,
    ) -> &'a [MembershipPlan] {
        if cache.is_none() {
            let plans = self.knowledge.active_plans().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to load membership plans");
                Vec::new()
            });
            *cache = Some(plans);
        }
        cache.as_deref().unwrap_or_default()
    }

    async fn record(&self, message: &str, caller: &Caller, outcome: &ChatOutcome) {
        if caller.user_id.is_none() && !self.log_anonymous {
            return;
        }

        let exchange = NewChatExchange {
            user_id: caller.user_id,
            session_id: caller.session_id,
            user_message: message.to_string(),
            bot_response: outcome.response.clone(),
            in_domain: outcome.in_domain,
            resolved_by: outcome.resolved_by,
        };

        if let Err(e) = self.log.append(exchange).await {
            tracing::warn!(error = %e, "Failed to append chat exchange");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::faq::FaqEntry;
    use crate::models::schedule::Weekday;
    use crate::services::chatbot::completion::{
        CompletionClient, CompletionError, ScriptedCompletionClient,
    };
    use crate::services::chatbot::live_data::fixtures::{plan, slot};
    use crate::services::chatbot::responder::{NO_CREDENTIAL_REPLY, SERVICE_FAILURE_REPLY};
    use crate::services::chatbot::sources::{InMemoryKnowledgeSource, RecordingExchangeLog};
    use chrono::Utc;

    fn jab_faq() -> FaqEntry {
        FaqEntry {
            id: 1,
            question: "What is a jab?".to_string(),
            answer: "A jab is a straight punch.".to_string(),
            keywords: vec!["jab".to_string(), "cross".to_string()],
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct Harness {
        pipeline: ChatbotPipeline,
        log: Arc<RecordingExchangeLog>,
    }

    fn harness(
        knowledge: InMemoryKnowledgeSource,
        client: Option<Arc<ScriptedCompletionClient>>,
    ) -> Harness {
        let log = Arc::new(RecordingExchangeLog::new());
        let client = client.map(|c| c as Arc<dyn CompletionClient>);
        let pipeline = ChatbotPipeline::new(
            DomainClassifier::new(client.clone()),
            AiResponder::new(client),
            Arc::new(knowledge),
            log.clone(),
        );
        Harness { pipeline, log }
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_and_not_logged() {
        let h = harness(InMemoryKnowledgeSource::new(), None);
        for message in ["", "   ", "\n\t"] {
            assert_eq!(
                h.pipeline.handle(message, &Caller::user(Uuid::new_v4())).await,
                Err(ChatError::EmptyMessage)
            );
        }
        assert!(h.log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_domain_redirect_logged_for_user() {
        let h = harness(InMemoryKnowledgeSource::new(), None);
        let user = Uuid::new_v4();

        let outcome = h.pipeline.handle("What's the weather?", &Caller::user(user)).await.unwrap();

        assert_eq!(outcome.response, OUT_OF_DOMAIN_REPLY);
        assert!(!outcome.in_domain);
        let entries = h.log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, Some(user));
        assert!(!entries[0].in_domain);
        assert_eq!(entries[0].resolved_by, ResolutionSource::OutOfDomain);
    }

    #[tokio::test]
    async fn test_faq_stage_wins_over_live_data() {
        let knowledge = InMemoryKnowledgeSource {
            faqs: vec![jab_faq()],
            schedule: vec![slot(1, Weekday::Monday, "6pm", "Boxing", "Ana")],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        let outcome = h
            .pipeline
            .handle("  What time is jab class?  ", &Caller::anonymous())
            .await
            .unwrap();

        assert_eq!(outcome.response, "A jab is a straight punch.");
        assert_eq!(outcome.resolved_by, ResolutionSource::Faq);
        // Stored message is the trimmed text.
        assert_eq!(h.log.entries()[0].user_message, "What time is jab class?");
    }

    #[tokio::test]
    async fn test_live_schedule_answer() {
        let knowledge = InMemoryKnowledgeSource {
            schedule: vec![
                slot(2, Weekday::Wednesday, "7pm", "Sparring", "Leo"),
                slot(1, Weekday::Monday, "6pm", "Boxing", "Ana"),
            ],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        let outcome = h.pipeline.handle("what's the schedule", &Caller::anonymous()).await.unwrap();

        assert_eq!(outcome.resolved_by, ResolutionSource::LiveData);
        let text = &outcome.response;
        assert!(text.find("Monday").unwrap() < text.find("Wednesday").unwrap());
        assert!(text.contains("Ana") && text.contains("Leo"));
    }

    #[tokio::test]
    async fn test_no_plans_falls_through_to_ai_without_credential() {
        let h = harness(InMemoryKnowledgeSource::new(), None);

        let outcome = h
            .pipeline
            .handle("how much does the gym membership cost", &Caller::anonymous())
            .await
            .unwrap();

        assert_eq!(outcome.resolved_by, ResolutionSource::Ai);
        assert_eq!(outcome.response, NO_CREDENTIAL_REPLY);
        assert!(!outcome.response.contains("Membership Plans:"));
    }

    #[tokio::test]
    async fn test_membership_answer() {
        let knowledge = InMemoryKnowledgeSource {
            plans: vec![plan(1, "Starter", 4999, "Open gym")],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        let outcome = h.pipeline.handle("membership price?", &Caller::anonymous()).await.unwrap();
        assert!(outcome.response.starts_with("💳 Membership Plans:"));
        assert!(outcome.response.contains("Starter: $49.99/1 Month"));
    }

    #[tokio::test]
    async fn test_empty_schedule_falls_through_to_membership() {
        let knowledge = InMemoryKnowledgeSource {
            plans: vec![plan(1, "Starter", 4999, "Open gym")],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        let outcome = h
            .pipeline
            .handle("what time is the class and the price?", &Caller::anonymous())
            .await
            .unwrap();

        assert_eq!(outcome.resolved_by, ResolutionSource::LiveData);
        assert!(outcome.response.starts_with("💳 Membership Plans:"));
    }

    #[tokio::test]
    async fn test_coach_answer_lists_distinct_names() {
        let knowledge = InMemoryKnowledgeSource {
            schedule: vec![
                slot(1, Weekday::Monday, "6pm", "Boxing", "Ana"),
                slot(2, Weekday::Tuesday, "6pm", "Boxing", "Leo"),
                slot(3, Weekday::Thursday, "6pm", "Boxing", "Ana"),
                slot(4, Weekday::Friday, "6pm", "Open Gym", " "),
            ],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        let outcome = h
            .pipeline
            .handle("who is the trainer?", &Caller::anonymous())
            .await
            .unwrap();

        assert_eq!(outcome.resolved_by, ResolutionSource::LiveData);
        assert!(outcome
            .response
            .starts_with("👨‍🏫 Our certified coaches: Ana, Leo\n\n"));
    }

    #[tokio::test]
    async fn test_no_coaches_falls_through_to_ai() {
        let knowledge = InMemoryKnowledgeSource {
            plans: vec![plan(1, "Starter", 4999, "Open gym")],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        let outcome = h
            .pipeline
            .handle("who is the coach?", &Caller::anonymous())
            .await
            .unwrap();

        assert_eq!(outcome.resolved_by, ResolutionSource::Ai);
        assert_eq!(outcome.response, NO_CREDENTIAL_REPLY);
    }

    #[tokio::test]
    async fn test_live_answers_are_repeatable() {
        let knowledge = InMemoryKnowledgeSource {
            schedule: vec![
                slot(2, Weekday::Wednesday, "7pm", "Sparring", "Leo"),
                slot(1, Weekday::Monday, "6pm", "Boxing", "Ana"),
            ],
            plans: vec![plan(1, "Starter", 4999, "Open gym")],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        for message in ["schedule?", "membership fee", "coach names"] {
            let first = h.pipeline.handle(message, &Caller::anonymous()).await.unwrap();
            let second = h.pipeline.handle(message, &Caller::anonymous()).await.unwrap();
            assert_eq!(first.resolved_by, ResolutionSource::LiveData);
            assert_eq!(first, second);
        }
    }

    #[tokio::test]
    async fn test_faq_keywords_match_regardless_of_case() {
        let mut faq = jab_faq();
        faq.keywords = vec!["Jab".to_string()];
        let knowledge = InMemoryKnowledgeSource {
            faqs: vec![faq],
            ..Default::default()
        };
        let h = harness(knowledge, None);

        let outcome = h
            .pipeline
            .handle("What's a JAB?", &Caller::anonymous())
            .await
            .unwrap();

        assert_eq!(outcome.resolved_by, ResolutionSource::Faq);
    }

    #[tokio::test]
    async fn test_data_access_failure_degrades_to_ai() {
        let client = Arc::new(ScriptedCompletionClient::new(vec![
            Ok("yes".to_string()),
            Ok("Keep your guard up! 🥊".to_string()),
        ]));
        let h = harness(InMemoryKnowledgeSource::unavailable(), Some(client.clone()));

        let outcome = h
            .pipeline
            .handle("when is the jab class?", &Caller::anonymous())
            .await
            .unwrap();

        assert_eq!(outcome.resolved_by, ResolutionSource::Ai);
        assert_eq!(outcome.response, "Keep your guard up! 🥊");
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn test_credential_present_but_failing() {
        let client = Arc::new(ScriptedCompletionClient::new(vec![
            Err(CompletionError::Timeout),
            Err(CompletionError::Timeout),
        ]));
        let h = harness(InMemoryKnowledgeSource::new(), Some(client));

        let outcome = h.pipeline.handle("uppercut drills", &Caller::anonymous()).await.unwrap();

        assert!(outcome.in_domain);
        assert_eq!(outcome.response, SERVICE_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_resolved_locally_makes_one_external_call() {
        let client = Arc::new(ScriptedCompletionClient::new(vec![Ok("yes".to_string())]));
        let knowledge = InMemoryKnowledgeSource {
            faqs: vec![jab_faq()],
            ..Default::default()
        };
        let h = harness(knowledge, Some(client.clone()));

        h.pipeline.handle("jab basics", &Caller::anonymous()).await.unwrap();
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_logging_toggle() {
        let session = Uuid::new_v4();
        let caller = Caller {
            user_id: None,
            session_id: Some(session),
        };

        let h = harness(InMemoryKnowledgeSource::new(), None);
        h.pipeline.handle("boxing gloves?", &caller).await.unwrap();
        let entries = h.log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, None);
        assert_eq!(entries[0].session_id, Some(session));

        let h = harness(InMemoryKnowledgeSource::new(), None);
        let pipeline = h.pipeline.clone().with_anonymous_logging(false);
        pipeline.handle("boxing gloves?", &caller).await.unwrap();
        assert!(h.log.entries().is_empty());

        pipeline.handle("boxing gloves?", &Caller::user(Uuid::new_v4())).await.unwrap();
        assert_eq!(h.log.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_log_failure_does_not_fail_request() {
        let pipeline = ChatbotPipeline::new(
            DomainClassifier::new(None),
            AiResponder::new(None),
            Arc::new(InMemoryKnowledgeSource::new()),
            Arc::new(RecordingExchangeLog::failing()),
        );
        let outcome = pipeline.handle("sparring", &Caller::user(Uuid::new_v4())).await;
        assert!(outcome.is_ok());
    }
}
