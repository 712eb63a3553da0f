//! Data seams the chatbot reads from and writes to.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::models::chat::NewChatExchange;
use crate::models::faq::FaqEntry;
use crate::models::membership::MembershipPlan;
use crate::models::schedule::ScheduleSlot;

/// Failure reading or writing chatbot data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataAccessError {
    #[error("data access failed: {0}")]
    Backend(String),
}

/// Read access to the records the chatbot answers from.
///
/// Implementations return active records only. FAQ entries come in
/// creation order, schedule slots in weekday order and plans in display
/// order.
#[async_trait::async_trait]
pub trait KnowledgeSource: Send + Sync {
    async fn active_faqs(&self) -> Result<Vec<FaqEntry>, DataAccessError>;
    async fn active_schedule(&self) -> Result<Vec<ScheduleSlot>, DataAccessError>;
    async fn active_plans(&self) -> Result<Vec<MembershipPlan>, DataAccessError>;
}

/// Append-only chat exchange log.
#[async_trait::async_trait]
pub trait ExchangeLog: Send + Sync {
    async fn append(&self, exchange: NewChatExchange) -> Result<(), DataAccessError>;
}

/// Knowledge source backed by vectors, for development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgeSource {
    pub faqs: Vec<FaqEntry>,
    pub schedule: Vec<ScheduleSlot>,
    pub plans: Vec<MembershipPlan>,
    /// When set, every read fails.
    pub unavailable: bool,
}

impl InMemoryKnowledgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), DataAccessError> {
        if self.unavailable {
            Err(DataAccessError::Backend("source unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl KnowledgeSource for InMemoryKnowledgeSource {
    async fn active_faqs(&self) -> Result<Vec<FaqEntry>, DataAccessError> {
        self.check()?;
        let mut faqs: Vec<FaqEntry> = self.faqs.iter().filter(|f| f.is_active).cloned().collect();
        faqs.sort_by_key(|f| (f.created_at, f.id));
        Ok(faqs)
    }

    async fn active_schedule(&self) -> Result<Vec<ScheduleSlot>, DataAccessError> {
        self.check()?;
        let mut slots: Vec<ScheduleSlot> =
            self.schedule.iter().filter(|s| s.is_active).cloned().collect();
        crate::models::schedule::sort_by_weekday(&mut slots);
        Ok(slots)
    }

    async fn active_plans(&self) -> Result<Vec<MembershipPlan>, DataAccessError> {
        self.check()?;
        Ok(self.plans.iter().filter(|p| p.is_active).cloned().collect())
    }
}

/// Exchange log that keeps entries in memory.
#[derive(Debug, Default)]
pub struct RecordingExchangeLog {
    entries: Mutex<Vec<NewChatExchange>>,
    failing: bool,
}

impl RecordingExchangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log whose appends always fail.
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn entries(&self) -> Vec<NewChatExchange> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl ExchangeLog for RecordingExchangeLog {
    async fn append(&self, exchange: NewChatExchange) -> Result<(), DataAccessError> {
        if self.failing {
            return Err(DataAccessError::Backend("log unavailable".to_string()));
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(exchange);
        Ok(())
    }
}
