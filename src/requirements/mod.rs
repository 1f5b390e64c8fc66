//! Readiness check before handing a configuration to generation.
//!
//! Uses Stillwater's `Validation` type so that every unanswered required
//! step is reported at once instead of stopping at the first miss. This is
//! a client-side readiness check, not server-side validation.
//!
//! # Example
//!
//! ```rust
//! use stepwise::graph::catalog::model_steps;
//! use stepwise::requirements::{check_required, missing_answers};
//!
//! let graph = model_steps()?;
//! let config = graph.empty_configuration();
//!
//! let readiness = check_required(&graph, &config);
//! assert!(readiness.is_failure());
//! assert!(missing_answers(&readiness).len() > 1);
//! # Ok::<(), stepwise::builder::BuildError>(())
//! ```

pub mod missing;
pub mod rules;

pub use missing::MissingAnswer;
pub use rules::{check_required, missing_answers, Readiness};
