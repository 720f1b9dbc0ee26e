// src/lib.rs — Library root for fovea

pub mod api;
pub mod cli;
pub mod core;
pub mod infra;
pub mod speech;
pub mod vision;
