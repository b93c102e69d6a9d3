// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod brand;
pub mod leaderboard;
pub mod territory;
pub mod user;

pub use brand::BrandTerritory;
pub use leaderboard::{LeaderboardEntry, OwnerTotals};
pub use territory::{Territory, TerritoryRecord};
pub use user::{User, UserPreferences};
