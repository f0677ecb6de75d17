//! When steps for job pipeline BDD scenarios.

use super::world::{EVALUATION_URL, PipelineWorld, run_async};
use eyre::WrapErr;
use pagewright::job::domain::{Nonce, Round, TaskDescriptor, TaskName};
use rstest_bdd_macros::when;

#[when(r#"task "{task}" round {round:u64} with nonce "{nonce}" is submitted"#)]
fn submit_task(
    world: &mut PipelineWorld,
    task: String,
    round: u64,
    nonce: String,
) -> Result<(), eyre::Report> {
    let descriptor = TaskDescriptor::new(
        "dev@example.com",
        TaskName::new(task)?,
        Round::try_from(round)?,
        Nonce::new(nonce)?,
        "Build a calculator with basic arithmetic",
    )
    .with_evaluation_url(EVALUATION_URL);
    let scheduler = world
        .scheduler
        .as_ref()
        .ok_or_else(|| eyre::eyre!("scheduler has not been started"))?;

    let outcome = run_async(scheduler.submit(descriptor)).wrap_err("submit task in scenario")?;
    world.outcomes.push(outcome);
    Ok(())
}
