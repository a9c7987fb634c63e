use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A member of a trip. Identity is the generated `id`; two participants that
/// share a display name remain distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identifiable for Participant {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Participant {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Participant {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}
