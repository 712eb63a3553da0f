//! Chatbot endpoints.

use axum::{extract::State, Json};
use domain::models::chat::{ChatRequest, ChatResponse};
use domain::models::membership::{MembershipPlan, MembershipPlanSummary};
use domain::models::schedule::{ScheduleSlot, ScheduleSlotSummary};
use domain::services::chatbot::Caller;
use persistence::repositories::{MembershipPlanRepository, ScheduleSlotRepository};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, OptionalUserAuth, VisitorSession};
use crate::middleware::metrics::record_chatbot_response;

/// Works out who is asking.
///
/// A `user_id` in the body only counts when it matches the bearer token;
/// without a token it is ignored.
pub fn resolve_caller(
    auth: Option<Uuid>,
    claimed: Option<Uuid>,
    session: Option<Uuid>,
) -> Caller {
    let user_id = match (auth, claimed) {
        (Some(auth), Some(claimed)) if auth != claimed => {
            tracing::debug!("Ignoring chat user_id that does not match the bearer token");
            Some(auth)
        }
        (Some(auth), _) => Some(auth),
        (None, _) => None,
    };

    Caller {
        user_id,
        session_id: session,
    }
}

/// POST /api/v1/chatbot
pub async fn chat(
    State(state): State<AppState>,
    OptionalUserAuth(user): OptionalUserAuth,
    session: Option<VisitorSession>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let caller = resolve_caller(
        user.map(|u| u.user_id),
        request.user_id,
        session.map(|s| s.id),
    );

    let outcome = state.chatbot.handle(&request.message, &caller).await?;
    record_chatbot_response(outcome.resolved_by);

    Ok(Json(ChatResponse {
        response: outcome.response,
    }))
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub schedules: Vec<ScheduleSlotSummary>,
}

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub plans: Vec<MembershipPlanSummary>,
}

/// GET /api/v1/chatbot/schedule: active slots in weekday order.
pub async fn schedule(State(state): State<AppState>) -> Result<Json<ScheduleResponse>, ApiError> {
    let slots: Vec<ScheduleSlot> = ScheduleSlotRepository::new(state.pool.clone())
        .list_active()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ScheduleResponse {
        schedules: slots.iter().map(ScheduleSlotSummary::from).collect(),
    }))
}

/// GET /api/v1/chatbot/plans
pub async fn plans(State(state): State<AppState>) -> Result<Json<PlansResponse>, ApiError> {
    let plans: Vec<MembershipPlan> = MembershipPlanRepository::new(state.pool.clone())
        .list_active()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(PlansResponse {
        plans: plans.iter().map(MembershipPlanSummary::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_caller_body_id_needs_token() {
        let claimed = Uuid::new_v4();
        let caller = resolve_caller(None, Some(claimed), None);
        assert_eq!(caller.user_id, None);
    }

    #[test]
    fn test_resolve_caller_matching_body_id() {
        let id = Uuid::new_v4();
        let session = Uuid::new_v4();
        let caller = resolve_caller(Some(id), Some(id), Some(session));
        assert_eq!(caller.user_id, Some(id));
        assert_eq!(caller.session_id, Some(session));
    }

    #[test]
    fn test_resolve_caller_mismatched_body_id_uses_token() {
        let auth = Uuid::new_v4();
        let caller = resolve_caller(Some(auth), Some(Uuid::new_v4()), None);
        assert_eq!(caller.user_id, Some(auth));
    }
}
