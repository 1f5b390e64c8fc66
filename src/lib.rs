//! Stepwise: a dependent multi-step configuration wizard
//!
//! Stepwise builds a composite model configuration through a sequence of
//! single-choice steps. Later steps appear, disappear or become mandatory
//! depending on earlier answers, and changing a pivot answer invalidates
//! everything derived from it.
//!
//! # Core Concepts
//!
//! - **StepGraph**: Fixed, ordered step declarations with visibility predicates
//! - **ConfigStore**: Owner of the configuration; applies cascading resets
//! - **FlowGuard**: Redirects deep links and reloads back to the first step
//! - **Wizard**: Drives the three the way a step screen does
//!
//! # Example
//!
//! ```rust
//! use stepwise::graph::catalog::{self, model_steps};
//! use stepwise::store::ConfigStore;
//! use std::sync::Arc;
//!
//! let graph = Arc::new(model_steps()?);
//! let mut store = ConfigStore::new(Arc::clone(&graph));
//!
//! store.update(catalog::GENDER, "Male")?;
//! store.update(catalog::ETHNICITY, "Asian")?;
//! store.update(catalog::GENDER, "Female")?;
//!
//! let visible: Vec<_> = store.visible_steps().iter().map(|s| s.id()).collect();
//! assert!(visible.contains(&catalog::COVERAGE));
//! assert!(!visible.contains(&catalog::BEARD));
//! assert_eq!(store.configuration().value(catalog::ETHNICITY), "");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod flow;
pub mod graph;
pub mod requirements;
pub mod settings;
pub mod snapshot;
pub mod store;
pub mod submit;
pub mod wizard;

// Re-export commonly used types
pub use crate::core::{Configuration, StepDefinition, Visibility};
pub use crate::flow::{Admission, FlowGuard, FlowPhase};
pub use crate::graph::StepGraph;
pub use crate::settings::WizardSettings;
pub use crate::store::{ConfigStore, Destination};
pub use crate::wizard::{Selection, Wizard};
