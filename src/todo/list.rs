use super::{TodoColor, TodoItem, TodoLocation};
use crate::error::AppError;
use crate::geo::LatLng;
use uuid::Uuid;

/// In-memory todo store. Items keep insertion order.
///
/// Mutators that take an id return `false` (or `None`) when no todo has that
/// id and leave the list untouched.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) -> Result<Uuid, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input("todo"));
        }

        let item = TodoItem::new(text.to_string());
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn toggle(&mut self, id: Uuid) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.toggle();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<TodoItem> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn set_location(&mut self, id: Uuid, position: LatLng, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.location = Some(TodoLocation {
                    position,
                    name: name.into(),
                });
                true
            }
            None => false,
        }
    }

    pub fn clear_location(&mut self, id: Uuid) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.location = None;
                true
            }
            None => false,
        }
    }

    pub fn set_color(&mut self, id: Uuid, value: impl Into<String>, category: Option<String>) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.color = Some(TodoColor {
                    value: value.into(),
                    category,
                });
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().filter(|item| !item.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().filter(|item| item.completed)
    }

    /// Todos that currently have a map position.
    pub fn located(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.iter().filter(|item| item.location.is_some())
    }
}
