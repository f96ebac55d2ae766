//! HTTP middleware module

pub mod logging;
