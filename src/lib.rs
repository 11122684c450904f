pub mod api;
pub mod models;
pub mod ui;
pub mod view;
