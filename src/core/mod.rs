//! Core wizard types.
//!
//! This module contains the pure data of the wizard:
//! - The value-like `Configuration` being built
//! - Step declarations and their visibility predicates
//! - Immutable answer history
//!
//! Nothing here holds mutable state; the store and guard build on top.

mod config;
mod history;
mod step;
mod visibility;

pub use config::Configuration;
pub use history::{AnswerChange, AnswerLog};
pub use step::{StepDefinition, StepKind};
pub use visibility::Visibility;
