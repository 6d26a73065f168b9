//! Thin LLM generation service over a local Ollama server.
//!
//! One model, loaded by the Ollama daemon, reused for every call:
//! - [`OllamaGenerator::generate`] — synchronous (non-streaming) completion
//!   with deterministic decoding
//! - [`health::probe_model`] — strict startup gate: the process must not
//!   serve requests until the configured model is actually available
//! - [`health::check`] — resilient status snapshot for a `/health` endpoint

pub mod config;
pub mod error_handler;
pub mod generator;
pub mod health;

pub use config::GeneratorConfig;
pub use error_handler::{AiLlmError, Result};
pub use generator::OllamaGenerator;
pub use health::HealthStatus;
