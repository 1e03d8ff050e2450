//! Resource-backed prompt templates with `{{variable}}` substitution.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

/// Variables supplied when rendering a [`PromptTemplate`].
#[derive(Clone, Debug, Default)]
pub struct TemplateVars {
    values: HashMap<String, String>,
}

impl TemplateVars {
    /// Creates an empty variable set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable, returning the set for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a variable value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        self.values.insert(name.into(), value.to_string());
    }

    /// Returns the value of a variable if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A named prompt template.
///
/// Resource files end with a newline that is not part of the template, so
/// [`PromptTemplate::resource`] drops exactly one trailing `\n`. A fragment
/// that must end in a newline is stored with two.
///
/// # Examples
///
/// ```
/// use studio_prompts::template::{PromptTemplate, TemplateVars};
///
/// let template = PromptTemplate::new("greeting", "Olá, {{name}}!");
/// let rendered = template.render(&TemplateVars::new().with("name", "Maria"));
/// assert_eq!(rendered, "Olá, Maria!");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    template: String,
}

impl PromptTemplate {
    /// Creates a template from literal text.
    #[must_use]
    pub fn new(name: &'static str, template: impl Into<String>) -> Self {
        Self {
            name,
            template: template.into(),
        }
    }

    /// Creates a template from an embedded resource file.
    #[must_use]
    pub fn resource(name: &'static str, text: &str) -> Self {
        let text = text.strip_suffix('\n').unwrap_or(text);
        Self::new(name, text)
    }

    /// Returns the template name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the raw template string.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns every placeholder name referenced by the template, in order of
    /// first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = Vec::new();
        for name in extract_variable_refs(&self.template) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Returns the placeholders that `vars` leaves unset.
    #[must_use]
    pub fn missing(&self, vars: &TemplateVars) -> Vec<String> {
        self.placeholders()
            .into_iter()
            .filter(|name| vars.get(name).is_none())
            .collect()
    }

    /// Renders the template in a single pass.
    ///
    /// Substituted values are never rescanned, so user text containing `{{`
    /// is inserted verbatim. Unset variables render as empty strings.
    #[must_use]
    pub fn render(&self, vars: &TemplateVars) -> String {
        let mut output = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let Some(end) = after_open.find("}}") else {
                output.push_str(&rest[start..]);
                return output;
            };

            let name = after_open[..end].trim();
            if let Some(value) = vars.get(name) {
                output.push_str(value);
            } else {
                warn!(template = self.name, variable = name, "template variable not supplied");
            }
            rest = &after_open[end + 2..];
        }

        output.push_str(rest);
        output
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Extracts variable names from a template string.
fn extract_variable_refs(template: &str) -> Vec<String> {
    let mut vars = Vec::new();
    let mut chars = template.chars().peekable();
    let mut in_var = false;
    let mut current_var = String::new();

    while let Some(ch) = chars.next() {
        if ch == '{' && chars.peek() == Some(&'{') {
            chars.next();
            in_var = true;
            current_var.clear();
        } else if ch == '}' && in_var && chars.peek() == Some(&'}') {
            chars.next();
            in_var = false;
            let name = current_var.trim();
            if !name.is_empty() {
                vars.push(name.to_owned());
            }
            current_var.clear();
        } else if in_var {
            current_var.push(ch);
        }
    }

    vars
}
