//! Hand-off of a finished configuration to generation, using Stillwater effects.
//!
//! This module is the imperative shell around the pure wizard core: the
//! only place where the configuration leaves the process. The submission
//! is described as an effect over an environment implementing
//! [`GenerationService`], so callers decide when and against what it runs.

mod service;

pub use service::{GenerationService, SubmissionReceipt, SubmitError};

use std::collections::BTreeMap;
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Describe the submission of `fields` to the environment's generation service.
///
/// Nothing happens until the returned effect is run.
pub fn submit_configuration<Env>(
    fields: BTreeMap<String, String>,
) -> BoxedEffect<SubmissionReceipt, SubmitError, Env>
where
    Env: GenerationService + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| {
        let receipt = env.submit(&fields)?;
        tracing::info!(job = %receipt.job_id, fields = fields.len(), "configuration submitted");
        Ok(receipt)
    })
    .boxed()
}
