//! Editor UI

pub mod app;
pub mod message;

pub use app::{AppOptions, SublineApp};
pub use message::Message;
