//! Readiness check over the visible projection using Validation.

use crate::core::{Configuration, StepDefinition, StepKind};
use crate::graph::StepGraph;
use crate::requirements::missing::MissingAnswer;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a readiness check.
pub type Readiness = Validation<(), NonEmptyVec<MissingAnswer>>;

/// Check every visible required step, accumulating ALL misses.
///
/// Hidden steps are skipped even when flagged required.
pub fn check_required(graph: &StepGraph, config: &Configuration) -> Readiness {
    let checks: Vec<Readiness> = graph
        .visible_steps(config)
        .into_iter()
        .filter(|step| step.is_required())
        .flat_map(|step| check_step(step, config))
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

fn check_step(step: &StepDefinition, config: &Configuration) -> Vec<Readiness> {
    match step.kind() {
        StepKind::Field => vec![if config.is_answered(step.id()) {
            Validation::success(())
        } else {
            Validation::fail(MissingAnswer::Unanswered {
                step: step.id().to_string(),
            })
        }],
        StepKind::Aggregate { sub_fields } => sub_fields
            .iter()
            .map(|sub_field| {
                if config.is_answered(sub_field) {
                    Validation::success(())
                } else {
                    Validation::fail(MissingAnswer::IncompleteAggregate {
                        step: step.id().to_string(),
                        sub_field: sub_field.clone(),
                    })
                }
            })
            .collect(),
    }
}

/// Flatten a readiness result into the list of misses.
pub fn missing_answers(readiness: &Readiness) -> Vec<MissingAnswer> {
    match readiness {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}
