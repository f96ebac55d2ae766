//! Service layer module
//!
//! Contains the upstream client, Markdown rendering and the relay operation

pub mod client;
pub mod markdown;
pub mod relay;

pub use client::{ChatProvider, HttpChatClient};
pub use markdown::markdown_to_html;
pub use relay::RelayService;
