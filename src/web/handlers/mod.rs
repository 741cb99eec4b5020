//! # Web API Request Handlers

pub mod activity;
pub mod health;
