//! UI module exports
pub mod bridge;
pub mod popup;
