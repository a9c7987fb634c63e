use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A single payment made by one participant on behalf of a set of sharers.
///
/// Payer and sharers are stored as participant identifiers and resolved
/// through the owning [`Trip`](crate::domain::Trip). The payer does not have
/// to be one of the sharers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub paid_by: Uuid,
    #[serde(default)]
    pub shared_by: Vec<Uuid>,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense dated now.
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        paid_by: Uuid,
        shared_by: Vec<Uuid>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            paid_by,
            shared_by,
            category: category.into(),
            date: Utc::now(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn is_shared_by(&self, participant_id: Uuid) -> bool {
        self.shared_by.contains(&participant_id)
    }

    /// True when the participant paid for or shares this expense.
    pub fn involves(&self, participant_id: Uuid) -> bool {
        self.paid_by == participant_id || self.is_shared_by(participant_id)
    }

    /// Equal portion owed by each sharer; zero when nobody shares the expense.
    pub fn share(&self) -> f64 {
        if self.shared_by.is_empty() {
            0.0
        } else {
            self.amount / self.shared_by.len() as f64
        }
    }

    pub fn matches_category(&self, label: &str) -> bool {
        category_key(&self.category) == category_key(label)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({:.2}, {})", self.title, self.amount, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn share_splits_evenly_and_tolerates_no_sharers() {
        let payer = Uuid::new_v4();
        let expense = Expense::new("Dinner", 90.0, payer, vec![payer, Uuid::new_v4(), Uuid::new_v4()], "Food");
        assert_eq!(expense.share(), 30.0);

        let orphan = Expense::new("Tip", 10.0, payer, Vec::new(), "Food");
        assert_eq!(orphan.share(), 0.0);
    }

    #[test]
    fn involves_covers_payer_and_sharers() {
        let payer = Uuid::new_v4();
        let sharer = Uuid::new_v4();
        let expense = Expense::new("Taxi", 20.0, payer, vec![sharer], "Transport");
        assert!(expense.involves(payer));
        assert!(expense.involves(sharer));
        assert!(!expense.is_shared_by(payer));
        assert!(!expense.involves(Uuid::new_v4()));
    }

    #[test]
    fn category_match_ignores_case() {
        let expense = Expense::new("Snacks", 5.0, Uuid::new_v4(), Vec::new(), "Food");
        assert!(expense.matches_category("food"));
        assert!(expense.matches_category("FOOD"));
        assert!(!expense.matches_category("Fuel"));
    }

    #[test]
    fn with_date_overrides_creation_time() {
        let date = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let expense = Expense::new("Museum", 12.0, Uuid::new_v4(), Vec::new(), "Fun").with_date(date);
        assert_eq!(expense.date, date);
    }
}
