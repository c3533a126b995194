//! Memoria — companion chat with a local template response engine.
//!
//! Memoria lets a user upload a photo, configure a companion (name,
//! description, personality, voice), and chat with it over a JSON/HTTP API.
//! Replies are delegated to an external OpenAI-compatible LLM when one is
//! configured; otherwise — or whenever the remote call fails — they come from
//! a local rule-based response engine that never fails.
//!
//! The engine classifies the user message by theme and sentiment, assembles
//! a candidate pool from canned theme prompts and personality responses,
//! scores the pool for word overlap with the message, and decorates the pick
//! with an optional follow-up question and name personalization.
//!
//! | Personality | Style |
//! |-------------|-------|
//! | **warm** | Empathic, affirming |
//! | **reflective** | Meaning-seeking |
//! | **balanced** | Neutral default |
//! | **humorous** | Lighthearted |
//! | **wise** | Measured, philosophical |
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`engine`] — The local response engine: templates, classification, selection
//! - [`storage`] — In-memory record store for users, companions, and conversations

pub mod config;
pub mod engine;
pub mod storage;
