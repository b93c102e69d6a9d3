//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::territory::validate_hex_color;

/// Default territory color for new players.
pub const DEFAULT_TERRITORY_COLOR: &str = "#EF4444";

/// User profile stored in Firestore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub id: String,
    /// Email address, unique across users
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub preferences: UserPreferences,
    /// When the user signed up (RFC 3339)
    pub created_at: String,
}

/// Display and tracking preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserPreferences {
    #[serde(default)]
    pub unit: DistanceUnit,
    #[serde(default)]
    pub activity_type: ActivityType,
    #[serde(default = "default_territory_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub territory_color: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            unit: DistanceUnit::default(),
            activity_type: ActivityType::default(),
            territory_color: default_territory_color(),
        }
    }
}

fn default_territory_color() -> String {
    DEFAULT_TERRITORY_COLOR.to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Run,
    Walk,
}

/// Request body for signing up.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
    pub preferences: Option<UserPreferences>,
}
