pub mod history;
pub mod save;
pub mod show;
pub mod ui;
