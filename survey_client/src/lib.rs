//! Client-side plumbing for the AI usage survey.
//!
//! This library provides the HTTP API client, environment configuration and
//! logging used to run the `ai_survey` screens against a real backend.

pub mod api_client;
pub mod app;
pub mod config;
pub mod logging;
