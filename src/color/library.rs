use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A named, categorized color the user saved for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorLibraryItem {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Read-side category selection. `All` is synthetic and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, item: &ColorLibraryItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => item.category == *name,
        }
    }

    /// Next filter in the cycle `all -> categories[0] -> ... -> all`.
    /// A filter whose category no longer exists goes back to `All`.
    pub fn next(&self, categories: &[String]) -> CategoryFilter {
        let next_index = match self {
            CategoryFilter::All => 0,
            CategoryFilter::Category(name) => match categories.iter().position(|c| c == name) {
                Some(idx) => idx + 1,
                None => return CategoryFilter::All,
            },
        };

        categories
            .get(next_index)
            .map(|c| CategoryFilter::Category(c.clone()))
            .unwrap_or(CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Category(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorLibrary {
    items: Vec<ColorLibraryItem>,
}

impl ColorLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, color: &str, category: &str) -> Result<Uuid, AppError> {
        let name = non_empty(name, "color name")?;
        let color = non_empty(color, "color value")?;
        let category = non_empty(category, "category")?;

        let item = ColorLibraryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
            category: category.to_string(),
            created_at: Utc::now(),
        };
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<ColorLibraryItem> {
        let idx = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: Uuid) -> Option<&ColorLibraryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[ColorLibraryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category) {
                seen.push(item.category.clone());
            }
        }
        seen
    }

    pub fn filtered<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a ColorLibraryItem> {
        self.items.iter().filter(move |item| filter.matches(item))
    }
}

fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input(field));
    }
    Ok(trimmed)
}
