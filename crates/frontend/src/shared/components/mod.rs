pub mod placeholder;
pub mod ui;
