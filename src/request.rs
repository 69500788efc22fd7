//! The template request record and its field-level operations.
//!
//! Edits are modelled as a tagged [`FieldUpdate`] so a boolean field can never
//! receive text and the framework can never leave its enumerated set. The
//! untyped `(name, raw value, input kind)` triple coming from an input event is
//! parsed into a `FieldUpdate` by [`FieldUpdate::parse`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::AppError;
use crate::types::{Framework, InputKind};

/// Suffix appended to the engine name for the saved archive
pub const DOWNLOAD_SUFFIX: &str = "-game-engine.zip";

/// Record submitted to the template service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub engine_name: String,
    pub version: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_include_examples")]
    pub include_examples: bool,
    #[serde(default)]
    pub framework: Framework,
}

fn default_include_examples() -> bool {
    true
}

impl Default for TemplateRequest {
    fn default() -> Self {
        Self {
            engine_name: String::new(),
            version: String::new(),
            author: String::new(),
            description: String::new(),
            include_examples: default_include_examples(),
            framework: Framework::default(),
        }
    }
}

/// Identity of each field in the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FieldId {
    EngineName,
    Version,
    Author,
    Description,
    IncludeExamples,
    Framework,
}

impl FieldId {
    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Self::EngineName => "Engine Name",
            Self::Version => "Version",
            Self::Author => "Author",
            Self::Description => "Description",
            Self::IncludeExamples => "Include Example Files",
            Self::Framework => "Framework",
        }
    }

    /// Example value shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::EngineName => "awesome-game-engine",
            Self::Version => "1.0.0",
            Self::Author => "Game Developer",
            Self::Description => "An awesome 3D game engine",
            Self::IncludeExamples | Self::Framework => "",
        }
    }

    /// Whether submission requires a non-empty value
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Self::EngineName | Self::Version | Self::Author | Self::Framework
        )
    }

    /// Whether the field holds free text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::EngineName | Self::Version | Self::Author | Self::Description
        )
    }

    /// Required text fields, in form order
    pub fn required_text_fields() -> impl Iterator<Item = FieldId> {
        Self::iter().filter(|f| f.is_required() && f.is_text())
    }
}

/// A single typed edit to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    EngineName(String),
    Version(String),
    Author(String),
    Description(String),
    IncludeExamples(bool),
    Framework(Framework),
}

impl FieldUpdate {
    /// Parse an untyped input event into a typed update.
    ///
    /// Checkbox events are coerced to a boolean regardless of field; every
    /// other kind stores the raw text. Field identity picks the target.
    pub fn parse(
        field_name: &str,
        raw_value: &str,
        input_kind: InputKind,
    ) -> std::result::Result<Self, AppError> {
        let field: FieldId = field_name
            .parse()
            .map_err(|_| AppError::validation(format!("Unknown field: {}", field_name)))?;

        if input_kind == InputKind::Checkbox {
            let checked = matches!(
                raw_value.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "checked"
            );
            return match field {
                FieldId::IncludeExamples => Ok(Self::IncludeExamples(checked)),
                other => Err(AppError::validation(format!(
                    "Field {} is not a checkbox",
                    other
                ))),
            };
        }

        let value = raw_value.to_string();
        match field {
            FieldId::EngineName => Ok(Self::EngineName(value)),
            FieldId::Version => Ok(Self::Version(value)),
            FieldId::Author => Ok(Self::Author(value)),
            FieldId::Description => Ok(Self::Description(value)),
            FieldId::Framework => raw_value
                .parse::<Framework>()
                .map(Self::Framework)
                .map_err(|_| {
                    AppError::validation(format!("Unsupported framework: {}", raw_value))
                }),
            FieldId::IncludeExamples => Err(AppError::validation(
                "include_examples can only be changed by a checkbox",
            )),
        }
    }

    /// The field this update targets
    pub fn field(&self) -> FieldId {
        match self {
            Self::EngineName(_) => FieldId::EngineName,
            Self::Version(_) => FieldId::Version,
            Self::Author(_) => FieldId::Author,
            Self::Description(_) => FieldId::Description,
            Self::IncludeExamples(_) => FieldId::IncludeExamples,
            Self::Framework(_) => FieldId::Framework,
        }
    }
}

/// Validation result for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub message: String,
}

impl FieldValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

impl TemplateRequest {
    /// Apply one typed update. Only the targeted field changes.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::EngineName(v) => self.engine_name = v,
            FieldUpdate::Version(v) => self.version = v,
            FieldUpdate::Author(v) => self.author = v,
            FieldUpdate::Description(v) => self.description = v,
            FieldUpdate::IncludeExamples(v) => self.include_examples = v,
            FieldUpdate::Framework(v) => self.framework = v,
        }
    }

    /// Current text of a text field, `None` for non-text fields
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::EngineName => Some(&self.engine_name),
            FieldId::Version => Some(&self.version),
            FieldId::Author => Some(&self.author),
            FieldId::Description => Some(&self.description),
            FieldId::IncludeExamples | FieldId::Framework => None,
        }
    }

    /// Build an update replacing a text field's content
    pub fn text_update(field: FieldId, value: String) -> Option<FieldUpdate> {
        match field {
            FieldId::EngineName => Some(FieldUpdate::EngineName(value)),
            FieldId::Version => Some(FieldUpdate::Version(value)),
            FieldId::Author => Some(FieldUpdate::Author(value)),
            FieldId::Description => Some(FieldUpdate::Description(value)),
            FieldId::IncludeExamples | FieldId::Framework => None,
        }
    }

    /// Validate a single field
    pub fn validate_field(&self, field: FieldId) -> FieldValidation {
        match self.text(field) {
            Some(value) if field.is_required() && value.trim().is_empty() => {
                FieldValidation::invalid(format!("{} is required", field.label()))
            }
            _ => FieldValidation::valid(),
        }
    }

    /// Required fields that are currently empty, in form order
    pub fn missing_fields(&self) -> Vec<FieldId> {
        FieldId::required_text_fields()
            .filter(|f| !self.validate_field(*f).is_valid)
            .collect()
    }

    /// Check required-field presence
    pub fn validate(&self) -> std::result::Result<(), AppError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
        Err(AppError::validation(format!(
            "Missing required fields: {}",
            names.join(", ")
        )))
    }

    /// Filename the returned archive is saved under
    pub fn download_filename(&self) -> String {
        format!("{}{}", self.engine_name, DOWNLOAD_SUFFIX)
    }

    /// Serialize to the JSON request body
    pub fn to_body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Save the request to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize request to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write request to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a request from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request from {:?}", path.as_ref()))?;

        let request: Self =
            serde_json::from_str(&content).context("Failed to parse request JSON")?;

        Ok(request)
    }
}
