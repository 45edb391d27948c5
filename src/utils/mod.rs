pub mod input;
pub mod paths;
