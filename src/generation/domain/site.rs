//! Generated artifact set and completion parsing.

use chrono::NaiveDate;
use tracing::warn;

/// Line separating the primary content from the description document in a
/// model completion.
pub const DESCRIPTION_SEPARATOR: &str = "---README.md---";

const FENCE: &str = "```";
const LANGUAGE_TAGS: [&str; 3] = ["html", "markdown", "md"];

/// Primary content plus its description document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSite {
    content: String,
    description: String,
}

impl GeneratedSite {
    /// Creates an artifact set.
    #[must_use]
    pub fn new(content: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            description: description.into(),
        }
    }

    /// Parses a raw model completion.
    ///
    /// The completion is expected to carry the content and the description
    /// separated by [`DESCRIPTION_SEPARATOR`]. When the separator is
    /// missing the whole completion becomes the content and a minimal
    /// description is synthesised from the brief.
    #[must_use]
    pub fn from_completion(completion: &str, brief: &str, generated_on: NaiveDate) -> Self {
        let mut parts = completion.split(DESCRIPTION_SEPARATOR);
        let content_part = parts.next().unwrap_or_default();
        match parts.next() {
            Some(description_part) => {
                Self::new(strip_code_fence(content_part), strip_code_fence(description_part))
            }
            None => {
                warn!("completion has no description separator, synthesising description");
                Self::new(
                    strip_code_fence(completion),
                    fallback_description(brief, generated_on),
                )
            }
        }
    }

    /// Returns the primary content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the description document.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Strips the first fenced block down to its body, dropping a leading
/// language tag.
fn strip_code_fence(text: &str) -> String {
    let mut segments = text.split(FENCE);
    segments.next();
    let Some(inner) = segments.next() else {
        return text.trim().to_owned();
    };

    let inner = inner.trim();
    if let Some((first_line, rest)) = inner.split_once('\n') {
        let tag = first_line.trim().to_ascii_lowercase();
        if LANGUAGE_TAGS.contains(&tag.as_str()) {
            return rest.trim().to_owned();
        }
    }
    inner.to_owned()
}

fn fallback_description(brief: &str, generated_on: NaiveDate) -> String {
    format!(
        "# Application\n\n## Summary\n{brief}\n\n## Setup\nOpen `index.html` in a web browser.\n\n## License\nMIT License\n\n---\n*Generated on {}*\n",
        generated_on.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 2).expect("valid date")
    }

    #[rstest]
    fn splits_content_and_description(today: NaiveDate) {
        let completion = "<html>app</html>\n\n---README.md---\n# App\nDetails";

        let site = GeneratedSite::from_completion(completion, "brief", today);

        assert_eq!(site.content(), "<html>app</html>");
        assert_eq!(site.description(), "# App\nDetails");
    }

    #[rstest]
    fn strips_fences_and_language_tags(today: NaiveDate) {
        let completion =
            "```html\n<html>app</html>\n```\n---README.md---\n```markdown\n# App\n```";

        let site = GeneratedSite::from_completion(completion, "brief", today);

        assert_eq!(site.content(), "<html>app</html>");
        assert_eq!(site.description(), "# App");
    }

    #[rstest]
    fn keeps_unrecognised_first_line_inside_fence(today: NaiveDate) {
        let completion = "```\n<!DOCTYPE html>\n<html></html>\n```---README.md---readme";

        let site = GeneratedSite::from_completion(completion, "brief", today);

        assert_eq!(site.content(), "<!DOCTYPE html>\n<html></html>");
        assert_eq!(site.description(), "readme");
    }

    #[rstest]
    fn missing_separator_synthesises_description(today: NaiveDate) {
        let completion = "```html\n<html>only</html>\n```";

        let site = GeneratedSite::from_completion(completion, "Build a clock", today);

        assert_eq!(site.content(), "<html>only</html>");
        assert!(site.description().starts_with("# Application\n\n## Summary\nBuild a clock\n"));
        assert!(site.description().contains("Open `index.html` in a web browser."));
        assert!(site.description().contains("*Generated on 2026-01-02*"));
    }
}
