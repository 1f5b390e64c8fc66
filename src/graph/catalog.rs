//! The model-configuration wizard's canonical steps.

use crate::builder::{BuildError, StepBuilder, StepGraphBuilder};
use crate::core::Visibility;
use crate::graph::StepGraph;

pub const GENDER: &str = "gender";
pub const ETHNICITY: &str = "ethnicity";
pub const AGE: &str = "age";
pub const COVERAGE: &str = "coverage";
pub const HAIR_STYLE: &str = "hair_style";
pub const HAIR_COLOR: &str = "hair_color";
pub const BEARD: &str = "beard";
pub const EYE_COLOR: &str = "eye_color";
pub const BODY_TYPE: &str = "body_type";
pub const POSE: &str = "pose";
pub const BACKGROUND: &str = "background";
pub const CLOTHING: &str = "clothing";

pub const CLOTHING_TOP: &str = "clothing_top";
pub const CLOTHING_BOTTOM: &str = "clothing_bottom";
pub const CLOTHING_FOOTWEAR: &str = "clothing_footwear";

pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";
pub const COVERED: &str = "Covered";

fn route(id: &str) -> String {
    format!("/create/{}", id.replace('_', "-"))
}

fn step(id: &str, label: &str) -> StepBuilder {
    StepBuilder::new().id(id).path(route(id)).label(label)
}

/// Build the model-configuration step graph.
///
/// `gender` is the primary pivot and `coverage` (shown for female models)
/// the secondary one. Hair steps disappear once a covered style is chosen.
/// The final `clothing` step is an aggregate of three garments.
pub fn model_steps() -> Result<StepGraph, BuildError> {
    StepGraphBuilder::new()
        .step(step(GENDER, "Gender").required().pivot())?
        .step(step(ETHNICITY, "Ethnicity").required())?
        .step(step(AGE, "Age").required())?
        .step(
            step(COVERAGE, "Coverage")
                .required()
                .pivot()
                .visibility(Visibility::field_equals(GENDER, FEMALE)),
        )?
        .step(
            step(HAIR_STYLE, "Hair style")
                .visibility(Visibility::field_not_equals(COVERAGE, COVERED)),
        )?
        .step(
            step(HAIR_COLOR, "Hair color")
                .visibility(Visibility::field_not_equals(COVERAGE, COVERED)),
        )?
        .step(step(BEARD, "Beard").visibility(Visibility::field_equals(GENDER, MALE)))?
        .step(step(EYE_COLOR, "Eye color"))?
        .step(step(BODY_TYPE, "Body type").required())?
        .step(step(POSE, "Pose").required())?
        .step(step(BACKGROUND, "Background"))?
        .step(
            step(CLOTHING, "Clothing")
                .required()
                .aggregate([CLOTHING_TOP, CLOTHING_BOTTOM, CLOTHING_FOOTWEAR]),
        )?
        .build()
}
