#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
