pub mod dashboard;
pub mod menu;
