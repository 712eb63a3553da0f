//! Database-backed knowledge source for the chatbot.

use async_trait::async_trait;
use domain::models::{FaqEntry, MembershipPlan, ScheduleSlot};
use domain::services::chatbot::{DataAccessError, KnowledgeSource};
use sqlx::PgPool;

use super::{FaqEntryRepository, MembershipPlanRepository, ScheduleSlotRepository};

/// Reads FAQ entries, schedule slots and plans for the chatbot.
#[derive(Clone)]
pub struct PgKnowledgeSource {
    faqs: FaqEntryRepository,
    schedule: ScheduleSlotRepository,
    plans: MembershipPlanRepository,
}

impl PgKnowledgeSource {
    pub fn new(pool: PgPool) -> Self {
        Self {
            faqs: FaqEntryRepository::new(pool.clone()),
            schedule: ScheduleSlotRepository::new(pool.clone()),
            plans: MembershipPlanRepository::new(pool),
        }
    }
}

fn backend(err: sqlx::Error) -> DataAccessError {
    DataAccessError::Backend(err.to_string())
}

#[async_trait]
impl KnowledgeSource for PgKnowledgeSource {
    async fn active_faqs(&self) -> Result<Vec<FaqEntry>, DataAccessError> {
        let rows = self.faqs.list_active().await.map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn active_schedule(&self) -> Result<Vec<ScheduleSlot>, DataAccessError> {
        let rows = self.schedule.list_active().await.map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn active_plans(&self) -> Result<Vec<MembershipPlan>, DataAccessError> {
        let rows = self.plans.list_active().await.map_err(backend)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
