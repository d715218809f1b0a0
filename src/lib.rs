pub mod actions;
pub mod common;
pub mod launcher;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod settings;
pub mod toast_log;
