//! MIT license text.

use minijinja::{Environment, context};
use thiserror::Error;

const MIT_TEMPLATE: &str = r#"MIT License

Copyright (c) {{ year }} {{ owner }}

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
"#;

/// Error returned when the license template cannot be rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render license: {0}")]
pub struct LicenseError(pub String);

/// Renders the MIT license for `owner` in `year`.
///
/// # Errors
///
/// Returns [`LicenseError`] when template rendering fails.
pub fn render_mit_license(year: i32, owner: &str) -> Result<String, LicenseError> {
    let mut environment = Environment::new();
    environment.set_keep_trailing_newline(true);
    environment
        .render_str(MIT_TEMPLATE, context! { year, owner })
        .map_err(|error| LicenseError(error.to_string()))
}
