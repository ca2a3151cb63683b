//! Renderer boundary.
//!
//! This module provides:
//! - Backend-agnostic draw instructions and color type
//! - The `RenderBackend` trait implemented by actual output backends
//! - A recording backend for tests and JSON dumps

pub mod backend;

pub use backend::{Color, DrawInstruction, InstructionLog, RenderBackend};
