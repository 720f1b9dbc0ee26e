// src/core/mod.rs — Conversation engine

pub mod engine;
pub mod resolver;
pub mod session;
pub mod store;
