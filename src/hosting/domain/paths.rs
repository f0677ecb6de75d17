//! Well-known repository paths.

/// Branch every file is committed to.
pub const DEFAULT_BRANCH: &str = "main";

/// Primary artifact served by the published site.
pub const INDEX_PATH: &str = "index.html";

/// Description document.
pub const README_PATH: &str = "README.md";

/// License file.
pub const LICENSE_PATH: &str = "LICENSE";
