//! Command implementations

pub mod assess;
pub mod coach;
pub mod completions;
pub mod dashboard;
pub mod init;
pub mod quarterly;
pub mod settings;
pub mod weekly;
