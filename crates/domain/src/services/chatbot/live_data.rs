//! Answers built from live schedule and membership data.

use std::fmt::Write;

use shared::text::contains_any;

use crate::models::membership::MembershipPlan;
use crate::models::schedule::{ScheduleSlot, Weekday};

const SCHEDULE_TRIGGERS: &[&str] = &["schedule", "time", "when", "class", "training time"];
const MEMBERSHIP_TRIGGERS: &[&str] = &["membership", "price", "cost", "plan", "fee"];
const COACH_TRIGGERS: &[&str] = &["coach", "trainer", "instructor"];

/// Live-data question categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveDataIntent {
    Schedule,
    Membership,
    Coach,
}

impl LiveDataIntent {
    const ORDERED: [LiveDataIntent; 3] = [
        LiveDataIntent::Schedule,
        LiveDataIntent::Membership,
        LiveDataIntent::Coach,
    ];

    fn triggers(self) -> &'static [&'static str] {
        match self {
            LiveDataIntent::Schedule => SCHEDULE_TRIGGERS,
            LiveDataIntent::Membership => MEMBERSHIP_TRIGGERS,
            LiveDataIntent::Coach => COACH_TRIGGERS,
        }
    }
}

/// Intents triggered by the message, in evaluation order.
pub fn detect_intents(message: &str) -> Vec<LiveDataIntent> {
    let lower = message.to_lowercase();
    LiveDataIntent::ORDERED
        .into_iter()
        .filter(|intent| contains_any(&lower, intent.triggers()))
        .collect()
}

/// Day-grouped schedule listing, or `None` when there are no active slots.
///
/// Days follow the weekday order; slots within a day keep their given order.
pub fn summarize_schedule(slots: &[ScheduleSlot]) -> Option<String> {
    let mut active: Vec<&ScheduleSlot> = slots.iter().filter(|s| s.is_active).collect();
    if active.is_empty() {
        return None;
    }
    active.sort_by_key(|slot| slot.day);

    let mut out = String::from("📅 Current Training Schedule:\n\n");
    let mut current_day: Option<Weekday> = None;
    for slot in active {
        if current_day != Some(slot.day) {
            let _ = write!(out, "\n{}:\n", slot.day);
            current_day = Some(slot.day);
        }
        let _ = writeln!(
            out,
            "• {} - {} (Coach: {}) - {} slots available",
            slot.time_slot, slot.class_type, slot.coach, slot.available_slots
        );
    }
    out.push_str("\nBook your spot through our website or front desk!");
    Some(out)
}

/// Plan listing, or `None` when there are no active plans.
pub fn summarize_plans(plans: &[MembershipPlan]) -> Option<String> {
    let active: Vec<&MembershipPlan> = plans.iter().filter(|p| p.is_active).collect();
    if active.is_empty() {
        return None;
    }

    let mut out = String::from("💳 Membership Plans:\n\n");
    for plan in active {
        let _ = write!(
            out,
            "• {}: ${}/{}\n  Features: {}\n\n",
            plan.name,
            plan.price,
            plan.duration_display(),
            plan.features
        );
    }
    out.push_str("Visit us for a free trial class!");
    Some(out)
}

/// Distinct coach names from active slots in first-seen order, or `None`
/// when no slot names a coach.
pub fn summarize_coaches(slots: &[ScheduleSlot]) -> Option<String> {
    let mut coaches: Vec<&str> = Vec::new();
    for slot in slots.iter().filter(|s| s.is_active) {
        let coach = slot.coach.trim();
        if !coach.is_empty() && !coaches.contains(&coach) {
            coaches.push(coach);
        }
    }
    if coaches.is_empty() {
        return None;
    }

    Some(format!(
        "👨‍🏫 Our certified coaches: {}\n\nAll our coaches are experienced professionals with competitive backgrounds. Book a private session for personalized training!",
        coaches.join(", ")
    ))
}
