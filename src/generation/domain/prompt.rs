//! Prompt construction for build and revision requests.

use super::{DESCRIPTION_SEPARATOR, GenerationRequest};
use chrono::NaiveDate;
use minijinja::{Environment, context};
use thiserror::Error;

const BUILD_TEMPLATE: &str = r"You are a professional web developer assistant.

### Task: Round 1 - New Application
Create a fully functional single-file HTML web application based on this brief:

{{ brief }}
{% if attachments %}
Attachments:
{% for attachment in attachments %}- {{ attachment.name }}: {{ attachment.url }}
{% endfor %}{% endif %}
### Requirements:
- Create a complete, self-contained HTML file (index.html)
- Include all HTML, CSS (in <style> tags), and JavaScript (in <script> tags) in one file
- The application should be fully functional and ready to deploy
- Use modern web standards and best practices
- Make it visually appealing and user-friendly

### Output Format (CRITICAL):
You must output TWO parts separated by exactly this line: {{ separator }}

1. First part: Complete HTML file (index.html)
2. Separator: {{ separator }}
3. Second part: Professional README.md

The README must include:
- Project title
- Summary of what the app does (based on actual code you wrote)
- Key features (list what you actually implemented)
- Setup instructions
- Usage instructions
- Technical details (HTML/CSS/JS structure)
- Deployment info (GitHub Pages)
- License (MIT)
- Generated date: {{ generated_on }}

Output format:
<your complete HTML code here>

{{ separator }}
<your complete README.md here>
";

const REVISION_TEMPLATE: &str = r"You are a professional web developer assistant.

### Task: Round 2 - Code Revision
Update the existing application to satisfy this new requirement: {{ brief }}

### Current Code:
{{ existing_content }}
{% if attachments %}
Attachments:
{% for attachment in attachments %}- {{ attachment.name }}: {{ attachment.url }}
{% endfor %}{% endif %}
### Output Format (CRITICAL):
You must output TWO parts separated by exactly this line: {{ separator }}

1. First part: Complete updated HTML file (index.html) with all HTML, CSS, and JavaScript
2. Separator: {{ separator }}
3. Second part: Updated README.md that describes the NEW features and changes made in Round 2

The README must include:
- Project title
- Summary of what the app does (based on actual code)
- Key features (list what's actually implemented)
- Setup instructions
- Usage instructions
- Technical details (HTML/CSS/JS structure)
- Changes made in Round 2
- Deployment info (GitHub Pages)
- License (MIT)

Output format:
<your complete HTML code here>

{{ separator }}
<your complete README.md here>
";

/// Error returned when a prompt template cannot be rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render generation prompt: {0}")]
pub struct PromptError(pub String);

/// Renders the language-model prompt for a request.
///
/// Revision requests embed the existing content; fresh builds carry the
/// generation date.
///
/// # Errors
///
/// Returns [`PromptError`] when template rendering fails.
pub fn render_prompt(
    request: &GenerationRequest,
    generated_on: NaiveDate,
) -> Result<String, PromptError> {
    let environment = Environment::new();
    let template = if request.is_revision() {
        REVISION_TEMPLATE
    } else {
        BUILD_TEMPLATE
    };
    let ctx = context! {
        brief => request.brief(),
        attachments => request.attachments(),
        existing_content => request.existing_content().unwrap_or_default(),
        separator => DESCRIPTION_SEPARATOR,
        generated_on => generated_on.format("%Y-%m-%d").to_string(),
    };
    environment
        .render_str(template, ctx)
        .map_err(|error| PromptError(error.to_string()))
}
