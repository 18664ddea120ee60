pub mod config;
pub mod error;
pub mod extract;
pub mod mailbox;
pub mod osc;
pub mod pipeline;
pub mod sanitize;
pub mod skeleton;
