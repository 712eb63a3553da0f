//! Chatbot resolution pipeline.
//!
//! A message is classified as in or out of domain. In-domain messages are
//! answered by the first stage that produces text: FAQ keyword match, live
//! schedule/plan data, then the completion service with fixed fallbacks.

pub mod classifier;
pub mod completion;
pub mod faq;
pub mod live_data;
pub mod pipeline;
pub mod responder;
pub mod sources;

pub use classifier::DomainClassifier;
pub use completion::{
    CompletionClient, CompletionError, CompletionRequest, PromptMessage, Role,
    ScriptedCompletionClient,
};
pub use pipeline::{Caller, ChatError, ChatOutcome, ChatbotPipeline, OUT_OF_DOMAIN_REPLY};
pub use responder::AiResponder;
pub use sources::{
    DataAccessError, ExchangeLog, InMemoryKnowledgeSource, KnowledgeSource, RecordingExchangeLog,
};
