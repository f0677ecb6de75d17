//! Behaviour tests for the background job pipeline.

#[path = "job_pipeline_steps/mod.rs"]
mod job_pipeline_steps_defs;

use job_pipeline_steps_defs::world::{PipelineWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/job_pipeline.feature",
    name = "Build a site end to end"
)]
#[tokio::test(flavor = "multi_thread")]
async fn build_site_end_to_end(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/job_pipeline.feature",
    name = "Resubmitting the same task is not queued again"
)]
#[tokio::test(flavor = "multi_thread")]
async fn resubmission_is_not_queued_again(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/job_pipeline.feature",
    name = "Revising a site without a primary artifact fails"
)]
#[tokio::test(flavor = "multi_thread")]
async fn revision_without_artifact_fails(world: PipelineWorld) {
    let _ = world;
}
