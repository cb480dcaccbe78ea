use std::path::Path;

use crate::error::CheckError;
use crate::locator::{Locator, Role};

/// One assertion inside a page check. Steps run strictly in declared order
/// and the first failure aborts the page.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// The document title must equal this text exactly.
    Title { equals: String },
    /// An element matching the locator must be visible.
    Visible {
        #[serde(flatten)]
        locator: Locator,
    },
}

/// An ordered verification routine for a single page.
///
/// The runner navigates to `path` (joined onto the base URL), executes the
/// steps in order, and only when every step held writes the `screenshot`
/// file into the output directory, overwriting any previous capture.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageCheck {
    /// Human-readable routine name used in logs and failure messages.
    pub name: String,
    /// URL path relative to the base URL, e.g. `index.html`.
    pub path: String,
    pub steps: Vec<Step>,
    /// Screenshot file name written under the output directory.
    pub screenshot: String,
}

/// The built-in suite for the All-in-one Pocket hub: the homepage and the
/// unit-converter tool page.
pub fn pocket_hub_suite() -> Vec<PageCheck> {
    vec![
        PageCheck {
            name: "homepage".to_string(),
            path: "index.html".to_string(),
            steps: vec![
                Step::Title {
                    equals: "All-in-one Pocket | Modern Multi-Tool Hub".to_string(),
                },
                Step::Visible {
                    locator: Locator::css("#searchInput"),
                },
                Step::Visible {
                    locator: Locator::role(Role::Button, "Converters"),
                },
                Step::Visible {
                    locator: Locator::text("h3", "Converters"),
                },
                Step::Visible {
                    locator: Locator::css("#themeToggle"),
                },
            ],
            screenshot: "homepage.png".to_string(),
        },
        PageCheck {
            name: "unit converter".to_string(),
            path: "tools/unit-converter.html".to_string(),
            steps: vec![
                Step::Visible {
                    locator: Locator::css(".app-header"),
                },
                Step::Visible {
                    locator: Locator::role(Role::Link, "Back to Hub"),
                },
                Step::Visible {
                    locator: Locator::role(Role::Heading, "Unit Converter"),
                },
            ],
            screenshot: "unit_converter.png".to_string(),
        },
    ]
}

/// Load a custom suite from a JSON file.
///
/// The file holds an array of page checks, e.g.:
///
/// ```json
/// [
///   {
///     "name": "homepage",
///     "path": "index.html",
///     "steps": [
///       { "type": "title", "equals": "All-in-one Pocket | Modern Multi-Tool Hub" },
///       { "type": "visible", "by": "css", "selector": "#searchInput" },
///       { "type": "visible", "by": "role", "role": "button", "name": "Converters" }
///     ],
///     "screenshot": "homepage.png"
///   }
/// ]
/// ```
pub fn load_suite(path: &Path) -> Result<Vec<PageCheck>, CheckError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CheckError::SuiteFile(format!("{}: {e}", path.display())))?;

    let suite: Vec<PageCheck> = serde_json::from_str(&raw)
        .map_err(|e| CheckError::SuiteFile(format!("{}: {e}", path.display())))?;

    if suite.is_empty() {
        return Err(CheckError::SuiteFile(format!(
            "{}: suite defines no pages",
            path.display()
        )));
    }

    Ok(suite)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_suite_shape() {
        let suite = pocket_hub_suite();
        assert_eq!(suite.len(), 2);

        let homepage = &suite[0];
        assert_eq!(homepage.path, "index.html");
        assert_eq!(homepage.steps.len(), 5);
        assert_eq!(homepage.screenshot, "homepage.png");
        // The title check must come first so a wrong title wins over any
        // missing element.
        assert!(matches!(homepage.steps[0], Step::Title { .. }));

        let tool = &suite[1];
        assert_eq!(tool.path, "tools/unit-converter.html");
        assert_eq!(tool.steps.len(), 3);
        assert_eq!(tool.screenshot, "unit_converter.png");
    }

    #[test]
    fn test_load_suite_round_trip() {
        let suite = pocket_hub_suite();
        let json = serde_json::to_string_pretty(&suite).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_suite(file.path()).unwrap();
        assert_eq!(loaded, suite);
    }

    #[test]
    fn test_load_suite_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_suite(file.path()).unwrap_err();
        assert!(matches!(err, CheckError::SuiteFile(_)));
    }

    #[test]
    fn test_load_suite_rejects_empty_suite() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();

        let err = load_suite(file.path()).unwrap_err();
        assert!(err.to_string().contains("no pages"));
    }

    #[test]
    fn test_load_suite_missing_file() {
        let err = load_suite(Path::new("/nonexistent/suite.json")).unwrap_err();
        assert!(matches!(err, CheckError::SuiteFile(_)));
    }

    #[test]
    fn test_step_json_format() {
        let step: Step = serde_json::from_str(
            r#"{ "type": "visible", "by": "text", "selector": "h3", "text": "Converters" }"#,
        )
        .unwrap();
        assert_eq!(
            step,
            Step::Visible {
                locator: Locator::text("h3", "Converters")
            }
        );
    }
}
