//! Charity events and their categories (read models).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{CategoryId, EventId, UserId};

/// Placeholder shown when an event has no image.
pub const DEFAULT_IMAGE: &str = "../img/default.jpg";

const LONG_DATE: &str = "%B %-d, %Y";
const LONG_DATE_WITH_WEEKDAY: &str = "%A, %B %-d, %Y";

/// Visibility flag of an event. Only `Active` events are searchable.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Active,
    Suspended,
}

impl EventStatus {
    /// Storage encoding (`1` active, `0` suspended).
    pub fn as_flag(self) -> i64 {
        match self {
            EventStatus::Active => 1,
            EventStatus::Suspended => 0,
        }
    }

    /// Any non-zero flag counts as active.
    pub fn from_flag(flag: i64) -> Self {
        if flag != 0 {
            EventStatus::Active
        } else {
            EventStatus::Suspended
        }
    }
}

/// A charity event as served to the frontend.
///
/// `current_attendees` may exceed `goal_attendees`; nothing clamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub image: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    pub description: Option<String>,
    pub ticket_price: f64,
    pub current_attendees: i64,
    pub goal_attendees: i64,
    /// Display name of the category, if the event has one.
    pub category: Option<String>,
    #[serde(skip_serializing, default)]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing, default)]
    pub organizer_id: Option<UserId>,
    #[serde(skip_serializing, default)]
    pub status: EventStatus,
}

impl Event {
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }

    pub fn is_free(&self) -> bool {
        self.ticket_price == 0.0
    }

    /// Percentage of the attendee goal reached, capped at 100.
    pub fn attendee_progress(&self) -> f64 {
        if self.goal_attendees <= 0 {
            return 0.0;
        }
        let pct = self.current_attendees as f64 / self.goal_attendees as f64 * 100.0;
        pct.min(100.0)
    }

    /// Ticket revenue so far (`current_attendees * ticket_price`).
    pub fn funds_raised(&self) -> f64 {
        self.current_attendees as f64 * self.ticket_price
    }

    /// Image path, or the shared placeholder when the event has none.
    pub fn image_or_default(&self) -> &str {
        self.image
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .unwrap_or(DEFAULT_IMAGE)
    }

    /// Long-form date: `November 15, 2025`, or `Saturday, November 15, 2025` with the weekday.
    pub fn display_date(&self, with_weekday: bool) -> String {
        let format = if with_weekday {
            LONG_DATE_WITH_WEEKDAY
        } else {
            LONG_DATE
        };
        self.date.format(format).to_string()
    }

    /// Card-sized description: cut at the last space before `max_chars` and suffixed with `...`.
    pub fn summary(&self, max_chars: usize) -> Option<String> {
        self.description
            .as_deref()
            .map(|text| truncate_at_word(text, max_chars))
    }
}

impl Entity for Event {
    type Id = EventId;

    fn id(&self) -> EventId {
        self.id
    }
}

fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars + 1).collect();
    let cut = head.rfind(' ').unwrap_or_else(|| {
        head.char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(head.len())
    });
    format!("{}...", &head[..cut])
}

/// Reference data used to build the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn event(id: i64, name: &str, date: &str) -> Event {
        Event {
            id: EventId::from_raw(id),
            name: name.to_string(),
            image: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            location: "Melbourne Park".to_string(),
            description: Some("A run to raise funds for cancer research.".to_string()),
            ticket_price: 25.0,
            current_attendees: 120,
            goal_attendees: 300,
            category: Some("Fun Run".to_string()),
            category_id: Some(CategoryId::from_raw(2)),
            organizer_id: Some(UserId::from_raw(3)),
            status: EventStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::event;
    use super::*;

    #[test]
    fn progress_is_capped_and_zero_for_missing_goal() {
        let mut ev = event(1, "Gala", "2025-11-15");
        ev.current_attendees = 45;
        ev.goal_attendees = 200;
        assert!((ev.attendee_progress() - 22.5).abs() < f64::EPSILON);

        ev.current_attendees = 500;
        assert_eq!(ev.attendee_progress(), 100.0);

        ev.goal_attendees = 0;
        assert_eq!(ev.attendee_progress(), 0.0);
    }

    #[test]
    fn funds_raised_and_free_flag() {
        let mut ev = event(2, "Sunrise Fun Run", "2025-10-20");
        assert_eq!(ev.funds_raised(), 3000.0);
        assert!(!ev.is_free());
        ev.ticket_price = 0.0;
        assert!(ev.is_free());
        assert_eq!(ev.funds_raised(), 0.0);
    }

    #[test]
    fn summary_cuts_on_word_boundary() {
        let mut ev = event(3, "Art", "2025-12-05");
        ev.description = Some("Featuring local artists with all proceeds".to_string());
        assert_eq!(ev.summary(100).as_deref(), Some("Featuring local artists with all proceeds"));
        assert_eq!(ev.summary(20).as_deref(), Some("Featuring local..."));
        ev.description = None;
        assert_eq!(ev.summary(20), None);
    }

    #[test]
    fn serialized_event_hides_internal_columns() {
        let ev = event(2, "Sunrise Fun Run", "2025-10-20");
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["date"], "2025-10-20");
        assert_eq!(json["category"], "Fun Run");
        assert!(json.get("status").is_none());
        assert!(json.get("organizer_id").is_none());
    }

    #[test]
    fn image_falls_back_to_placeholder() {
        let mut ev = event(1, "Gala", "2025-11-15");
        assert_eq!(ev.image_or_default(), DEFAULT_IMAGE);
        ev.image = Some("  ".to_string());
        assert_eq!(ev.image_or_default(), DEFAULT_IMAGE);
        ev.image = Some("../img/event_img/1.jpg".to_string());
        assert_eq!(ev.image_or_default(), "../img/event_img/1.jpg");
    }

    #[test]
    fn long_form_dates() {
        let ev = event(1, "Gala", "2025-11-15");
        assert_eq!(ev.display_date(false), "November 15, 2025");
        assert_eq!(ev.display_date(true), "Saturday, November 15, 2025");

        let ev = event(9, "Coding Workshop", "2025-08-05");
        assert_eq!(ev.display_date(false), "August 5, 2025");
    }

    #[test]
    fn status_flag_round_trips() {
        assert_eq!(EventStatus::from_flag(1), EventStatus::Active);
        assert_eq!(EventStatus::from_flag(0), EventStatus::Suspended);
        assert_eq!(EventStatus::Suspended.as_flag(), 0);
    }
}
