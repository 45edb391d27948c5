use crate::geo::LatLng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A map coordinate attached to a todo together with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoLocation {
    pub position: LatLng,
    pub name: String,
}

/// Color copied onto a todo. `category` records where it was picked from and
/// is not checked against the color library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoColor {
    pub value: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub location: Option<TodoLocation>,
    pub color: Option<TodoColor>,
}

impl TodoItem {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            created_at: Utc::now(),
            location: None,
            color: None,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub fn position(&self) -> Option<LatLng> {
        self.location.as_ref().map(|loc| loc.position)
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location.as_ref().map(|loc| loc.name.as_str())
    }

    pub fn color_value(&self) -> Option<&str> {
        self.color.as_ref().map(|c| c.value.as_str())
    }

    pub fn color_category(&self) -> Option<&str> {
        self.color.as_ref().and_then(|c| c.category.as_deref())
    }
}
