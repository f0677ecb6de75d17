//! Then steps for job pipeline BDD scenarios.

use super::world::{PipelineWorld, run_async};
use pagewright::job::{
    domain::{JobId, JobStage, JobStatus},
    ports::JobStore,
    services::SubmissionOutcome,
};
use rstest_bdd_macros::then;

fn last_job(world: &PipelineWorld) -> Result<&pagewright::job::domain::Job, eyre::Report> {
    world
        .last_job
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no finished job recorded"))
}

#[then(r#"job "{job_id}" finishes with status "{status}""#)]
fn job_finishes(world: &mut PipelineWorld, job_id: String, status: String) -> Result<(), eyre::Report> {
    let expected = JobStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let job = run_async(world.wait_for_terminal(&JobId::from_raw(job_id)))?;
    if job.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {} ({:?})",
            job.status(),
            job.error()
        ));
    }
    world.last_job = Some(job);
    Ok(())
}

#[then(r#"the job stage is "{stage}" at {percent:u8} percent"#)]
fn job_stage_is(world: &PipelineWorld, stage: String, percent: u8) -> Result<(), eyre::Report> {
    let job = last_job(world)?;
    if job.stage().as_str() != stage || job.progress().percent() != percent {
        return Err(eyre::eyre!(
            "expected {stage} at {percent}, found {} at {}",
            job.stage(),
            job.progress().percent()
        ));
    }
    if stage == JobStage::Completed.as_str() && job.result().commit_sha().is_none() {
        return Err(eyre::eyre!("completed job has no commit sha"));
    }
    Ok(())
}

#[then(r#"the pages URL is "{url}""#)]
fn pages_url_is(world: &PipelineWorld, url: String) -> Result<(), eyre::Report> {
    let job = last_job(world)?;
    if job.result().pages_url() != Some(url.as_str()) {
        return Err(eyre::eyre!(
            "expected pages URL {url}, found {:?}",
            job.result().pages_url()
        ));
    }
    Ok(())
}

#[then("the evaluation webhook received round {round:u8}")]
fn webhook_received(world: &PipelineWorld, round: u8) -> Result<(), eyre::Report> {
    let attempts = world.sink.attempts();
    let [attempt] = attempts.as_slice() else {
        return Err(eyre::eyre!("expected one delivery, found {}", attempts.len()));
    };
    if attempt.payload.round != round {
        return Err(eyre::eyre!(
            "expected round {round}, found {}",
            attempt.payload.round
        ));
    }
    Ok(())
}

#[then("the submission is reported as already known")]
fn submission_already_known(world: &PipelineWorld) -> Result<(), eyre::Report> {
    let [first, second] = world.outcomes.as_slice() else {
        return Err(eyre::eyre!("expected two submissions, found {}", world.outcomes.len()));
    };
    if !first.is_queued() || !matches!(second, SubmissionOutcome::AlreadyKnown { .. }) {
        return Err(eyre::eyre!("unexpected outcomes {first:?} then {second:?}"));
    }
    if first.job_id() != second.job_id() {
        return Err(eyre::eyre!("duplicate submission changed the job id"));
    }
    Ok(())
}

#[then("the queue holds {count:usize} job")]
fn queue_holds(world: &PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let health = run_async(world.store.health_summary())?;
    if health.total() != count {
        return Err(eyre::eyre!("expected {count} jobs, found {}", health.total()));
    }
    Ok(())
}

#[then(r#"the job error is "{message}""#)]
fn job_error_is(world: &PipelineWorld, message: String) -> Result<(), eyre::Report> {
    let job = last_job(world)?;
    if job.error() != Some(message.as_str()) {
        return Err(eyre::eyre!("expected error {message}, found {:?}", job.error()));
    }
    Ok(())
}
