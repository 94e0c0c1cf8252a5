//! Quiz Generator Utility Functions
//!
//! ## Current API
//!
//! - Validate quiz requests
//! - Build generation prompts
//! - Clean and validate generated quizzes
//! - Take a quiz (session controller)
//! - Client form / screen state
//!
pub mod client;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod quiz;
pub mod session;
