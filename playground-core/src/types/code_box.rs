//! Code box types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Program seeded into a fresh collection.
pub const DEFAULT_CODE: &str = r#"#include <iostream>

int main() {
    std::cout << "Hello, World!" << std::endl;
    return 0;
}
"#;

/// Placeholder content for boxes created through the add operation.
pub const NEW_BOX_CODE: &str = "// New code block\n";

/// Color tag of a code box.
///
/// One attribute serving three roles: visual grouping, view filtering, and
/// submission grouping. Serialized as the lowercase color name.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BoxColor {
    /// Default color for new boxes
    #[default]
    Blue,
    Green,
    Orange,
    Purple,
}

impl BoxColor {
    /// All colors, in display order.
    pub const ALL: [Self; 4] = [Self::Blue, Self::Green, Self::Orange, Self::Purple];

    /// Lowercase color name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Purple => "purple",
        }
    }
}

impl fmt::Display for BoxColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoxColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "Invalid color: '{s}'. Must be one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }
}

/// A single user-editable unit of source text tagged with a color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeBox {
    /// Box ID (UUID), stable for the box's lifetime and never reused
    pub id: String,
    /// Editable source text
    pub code: String,
    /// Color tag
    pub color: BoxColor,
}

impl CodeBox {
    /// Create a box with a freshly generated identifier.
    #[must_use]
    pub fn new(code: impl Into<String>, color: BoxColor) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code: code.into(),
            color,
        }
    }

    /// The seed box of a fresh collection.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(DEFAULT_CODE, BoxColor::Blue)
    }

    /// A box created through the add operation.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(NEW_BOX_CODE, BoxColor::default())
    }
}
