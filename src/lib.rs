// SPDX-License-Identifier: MIT

//! Capture: claim the ground you run around.
//!
//! This crate provides the backend API for the territory capture game:
//! recorded loops become owned polygons, measured from their GPS trace,
//! and can be over-captured by other players.

pub mod config;
pub mod db;
pub mod error;
pub mod geometry;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{BrandService, TerritoryService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub territory_service: TerritoryService,
    pub brand_service: BrandService,
}
