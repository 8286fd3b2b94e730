//! Data models
//!
//! Records mirrored from the canteen admin API. Every field is optional and
//! decoded leniently (see [`crate::util`]); display code supplies placeholders.
//! Write payloads (`*Create`, `*Update`, `*Write`) are strict.

pub mod canteen;
pub mod category;
pub mod company;
pub mod menu_item;
pub mod order;
pub mod role;
pub mod subcategory;
pub mod subcategory_type;
pub mod user;

// Re-exports
pub use canteen::*;
pub use category::*;
pub use company::*;
pub use menu_item::*;
pub use order::*;
pub use role::*;
pub use subcategory::*;
pub use subcategory_type::*;
pub use user::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display availability shared by most entities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Active,
    Inactive,
}

impl Availability {
    /// From an `is_available`-style flag; missing means active
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(false) => Self::Inactive,
            _ => Self::Active,
        }
    }

    /// From a free-form status string; anything not clearly inactive is active
    pub fn from_status(status: Option<&str>) -> Self {
        match status.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "inactive" || s == "disabled" || s == "false" => Self::Inactive,
            _ => Self::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown status '{other}' (expected active|inactive)")),
        }
    }
}
