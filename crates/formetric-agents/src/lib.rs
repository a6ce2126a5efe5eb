//! # Formetric-Agents
//!
//! Narrative ("coach feedback") generation for completed form analyses.
//!
//! The scoring core hands a finished [`formetric_core::ScoreReport`] to a
//! [`NarrativeGenerator`]; the report never depends on the narrative's
//! content or success.

pub mod agent;
pub mod coach;
pub mod prompts;

pub use agent::*;
pub use coach::*;
pub use prompts::*;
