//! HTTP request handlers

pub mod feedback;
pub mod health;
