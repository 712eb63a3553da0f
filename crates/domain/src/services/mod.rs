//! Domain services for the Boxing Academy backend.
//!
//! Services contain business logic that operates on domain models.

pub mod catalog;
pub mod chatbot;

pub use chatbot::{Caller, ChatError, ChatOutcome, ChatbotPipeline};
