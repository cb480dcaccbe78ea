use std::fmt;

/// Accessible roles the verifier can target, mirroring how a user (or a
/// screen reader) would identify the element rather than its markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Button,
    Link,
    /// Any heading level (`h1`–`h6` or `role="heading"`).
    Heading,
}

impl Role {
    /// CSS selector matching every element that carries this role.
    fn selector(self) -> &'static str {
        match self {
            Role::Button => r#"button, [role="button"], input[type="button"], input[type="submit"]"#,
            Role::Link => r#"a[href], [role="link"]"#,
            Role::Heading => r#"h1, h2, h3, h4, h5, h6, [role="heading"]"#,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Button => write!(f, "button"),
            Role::Link => write!(f, "link"),
            Role::Heading => write!(f, "heading"),
        }
    }
}

/// How to find an element on the page.
///
/// Each variant renders to a JavaScript predicate (see
/// [`visibility_predicate`](Self::visibility_predicate)) that is evaluated
/// inside the page and reports whether a matching element is currently
/// visible: present in the DOM, not `display:none` / `visibility:hidden`,
/// and with a non-zero bounding rect.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// Plain CSS selector, e.g. `#searchInput` or `.app-header`.
    Css { selector: String },
    /// Accessible role plus exact accessible name, e.g. a button named
    /// "Converters" or a heading named "Unit Converter".
    Role { role: Role, name: String },
    /// CSS selector filtered by text containment, e.g. an `h3` whose text
    /// contains "Converters".
    Text { selector: String, text: String },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
        }
    }

    pub fn role(role: Role, name: impl Into<String>) -> Self {
        Locator::Role {
            role,
            name: name.into(),
        }
    }

    pub fn text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Locator::Text {
            selector: selector.into(),
            text: text.into(),
        }
    }

    /// Render the JavaScript expression evaluated in the page.
    ///
    /// The expression is a self-contained IIFE returning `true` when at
    /// least one matching element is visible. All user-supplied strings are
    /// embedded as JSON literals, which is also valid JavaScript, so
    /// selector and name text cannot break out of the expression.
    pub fn visibility_predicate(&self) -> String {
        let (candidates, filter) = match self {
            Locator::Css { selector } => (js_string(selector), "() => true".to_string()),
            Locator::Role { role, name } => (
                js_string(role.selector()),
                format!(
                    "(el) => ((el.getAttribute('aria-label') || el.value || el.textContent || '').trim() === {})",
                    js_string(name)
                ),
            ),
            Locator::Text { selector, text } => (
                js_string(selector),
                format!(
                    "(el) => ((el.textContent || '').includes({}))",
                    js_string(text)
                ),
            ),
        };

        format!(
            "(() => {{\n\
             const visible = (el) => {{\n\
               const style = window.getComputedStyle(el);\n\
               if (style.display === 'none' || style.visibility === 'hidden') return false;\n\
               const rect = el.getBoundingClientRect();\n\
               return rect.width > 0 && rect.height > 0;\n\
             }};\n\
             return Array.from(document.querySelectorAll({candidates}))\n\
               .filter({filter})\n\
               .some(visible);\n\
             }})()"
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css { selector } => write!(f, "element {selector}"),
            Locator::Role { role, name } => write!(f, "{role} {name:?}"),
            Locator::Text { selector, text } => write!(f, "{selector} containing {text:?}"),
        }
    }
}

/// Encode a string as a JSON literal, safe to splice into JavaScript.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}
