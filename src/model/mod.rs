//! Demo domain types (pure).

pub mod key_action;

pub use key_action::{KeyAction, ScrollContext};
