//! Dashboard identity metadata.

use serde::Serialize;
use thiserror::Error;

/// Identity card a dashboard presents to the registry and the launcher.
///
/// `name` is the registry key; the rest is display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardDescriptor {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub author: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("descriptor field `{0}` must not be empty")]
    EmptyField(&'static str),
}

impl DashboardDescriptor {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
            version: version.into(),
            author: author.into(),
        }
    }

    /// Every field must carry non-whitespace content.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        let fields = [
            ("name", &self.name),
            ("display_name", &self.display_name),
            ("description", &self.description),
            ("version", &self.version),
            ("author", &self.author),
        ];
        for (label, value) in fields {
            if value.trim().is_empty() {
                return Err(DescriptorError::EmptyField(label));
            }
        }
        Ok(())
    }
}
