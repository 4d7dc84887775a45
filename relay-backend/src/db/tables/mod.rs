//! Database table modules - extend Database with domain-specific methods
//!
//! Each module adds `impl Database` blocks for a specific table group.

mod clients; // clients
mod messages; // messages
mod notifications; // notifications, notification_tokens
mod tokens; // tokens
