pub mod config;
pub mod data;
pub mod events;
pub mod focus;
pub mod render;
pub mod sys;
pub mod theme;
