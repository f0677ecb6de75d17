//! Domain model for hosted repositories.

mod license;
mod paths;
mod repository;

pub use license::{LicenseError, render_mit_license};
pub use paths::{DEFAULT_BRANCH, INDEX_PATH, LICENSE_PATH, README_PATH};
pub use repository::{CommitSha, HostedRepository, PagesActivation, pages_url};
