//! Data models module
//!
//! Defines the upstream chat-completion wire structures and the relay route table

pub mod chat;
pub mod relay;
