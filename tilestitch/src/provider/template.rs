//! Tile URL templates with `{z}`, `{x}`, `{y}` placeholders.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::plan::TileRequest;

/// Errors that can occur while parsing a URL template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template lacks one of the required placeholders.
    #[error("URL template '{template}' is missing the {placeholder} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: &'static str,
    },
}

/// A tile server URL template such as `https://tile.example.org/{z}/{x}/{y}.png`.
///
/// Substitution is purely textual; nothing is URL-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
}

impl UrlTemplate {
    const PLACEHOLDERS: [&'static str; 3] = ["{z}", "{x}", "{y}"];

    /// Parses a template, requiring all three placeholders.
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();

        for placeholder in Self::PLACEHOLDERS {
            if !template.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder {
                    template,
                    placeholder,
                });
            }
        }

        Ok(Self { template })
    }

    /// Renders the URL for `request` at `zoom`.
    pub fn render(&self, zoom: u8, request: TileRequest) -> String {
        self.template
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &request.x.to_string())
            .replace("{y}", &request.y.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl FromStr for UrlTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
