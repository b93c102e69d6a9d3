// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod brand;
pub mod claim;
pub mod leaderboard;
pub mod territory;

pub use brand::BrandService;
pub use claim::{resolve_claim, ClaimError, ClaimPolicy, ClaimRequest};
pub use territory::TerritoryService;
