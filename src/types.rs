//! Type-safe form value types
//!
//! Closed enums for every value the form can select, so out-of-set values
//! cannot reach the request body.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Target framework for the generated engine template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Framework {
    #[default]
    Unity,
    Unreal,
    Custom,
}

impl Framework {
    /// Wire value sent to the template service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unity => "unity",
            Self::Unreal => "unreal",
            Self::Custom => "custom",
        }
    }

    /// Human-readable label shown in the form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unity => "Unity",
            Self::Unreal => "Unreal Engine",
            Self::Custom => "Custom",
        }
    }

    /// Next option, wrapping around
    pub fn next(&self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Previous option, wrapping around
    pub fn previous(&self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Kind of input control an edit came from.
///
/// Only checkboxes change how the raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Textarea,
    Select,
    Checkbox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_default_is_unity() {
        assert_eq!(Framework::default(), Framework::Unity);
    }

    #[test]
    fn test_framework_parse_is_case_insensitive() {
        assert_eq!("Unreal".parse::<Framework>().ok(), Some(Framework::Unreal));
        assert_eq!("CUSTOM".parse::<Framework>().ok(), Some(Framework::Custom));
        assert!("godot".parse::<Framework>().is_err());
    }

    #[test]
    fn test_framework_serializes_lowercase() {
        let json = serde_json::to_string(&Framework::Unreal).unwrap();
        assert_eq!(json, "\"unreal\"");
    }

    #[test]
    fn test_framework_cycling_wraps() {
        assert_eq!(Framework::Custom.next(), Framework::Unity);
        assert_eq!(Framework::Unity.previous(), Framework::Custom);
        assert_eq!(Framework::Unity.next().previous(), Framework::Unity);
    }

    #[test]
    fn test_input_kind_parse() {
        assert_eq!("checkbox".parse::<InputKind>().ok(), Some(InputKind::Checkbox));
        assert_eq!("text".parse::<InputKind>().ok(), Some(InputKind::Text));
    }
}
