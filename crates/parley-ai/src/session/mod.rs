//! Conversation session management.
//!
//! A `ConversationSession` owns the ordered turn history, appends user and
//! assistant turns, and exposes a read-only projection for display. Turns
//! strictly alternate starting with User; an odd (user-terminated) history
//! only occurs after a reply failure.

mod chat;
mod display;
mod manager;
mod types;

pub use display::{copy_text, display_role};
pub use manager::ConversationSession;
