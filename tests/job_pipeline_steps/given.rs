//! Given steps for job pipeline BDD scenarios.

use super::world::PipelineWorld;
use rstest_bdd_macros::given;

#[given(r#"a running scheduler publishing as "{owner}""#)]
fn running_scheduler(world: &mut PipelineWorld, owner: String) {
    world.start(&owner);
}

#[given(r#"an existing repository "{name}" without an index page"#)]
fn repository_without_index(world: &mut PipelineWorld, name: String) -> Result<(), eyre::Report> {
    let host = world
        .host
        .as_ref()
        .ok_or_else(|| eyre::eyre!("scheduler has not been started"))?;
    host.seed_repository(&name, [("README.md", "# Old")])?;
    Ok(())
}
