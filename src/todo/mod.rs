pub mod item;
pub mod list;

pub use item::{TodoColor, TodoItem, TodoLocation};
pub use list::TodoList;
