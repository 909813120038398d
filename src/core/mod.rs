//! Core module - workspace, persistence, configuration, and events

pub mod config;
pub mod events;
pub mod speech;
pub mod store;
pub mod workspace;

pub use config::Config;
pub use events::{Event, EventBus, Topic};
pub use speech::Speech;
pub use store::{Store, StoreError, StoreKey};
pub use workspace::{Workspace, WorkspaceError};
