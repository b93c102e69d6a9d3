// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles and preferences)
//! - Territories (create, list, delete, atomic claim)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Territory, TerritoryRecord, User, UserPreferences};
use crate::services::claim::{resolve_claim, ClaimPolicy, ClaimRequest};
use firestore::{paths, FirestoreConsistencySelector, FirestoreWritePrecondition};
use futures_util::{stream, StreamExt};
use std::collections::HashMap;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by email address.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let email = email.to_string();
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field("email").eq(email.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(users.into_iter().next())
    }

    /// Create or replace a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Replace a user's preferences. Returns `false` if the user is unknown.
    pub async fn update_preferences(
        &self,
        user_id: &str,
        preferences: &UserPreferences,
    ) -> Result<bool, AppError> {
        let Some(mut user) = self.get_user(user_id).await? else {
            return Ok(false);
        };
        user.preferences = preferences.clone();
        self.upsert_user(&user).await?;
        Ok(true)
    }

    /// Fetch several users by ID. Unknown IDs are simply absent from the map.
    ///
    /// Uses concurrent reads with a limit to avoid overloading Firestore.
    pub async fn get_users(&self, user_ids: &[String]) -> Result<HashMap<String, User>, AppError> {
        let this = self;
        let found = stream::iter(user_ids.iter().cloned())
            .map(|id| async move { this.get_user(&id).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<User>, AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Option<User>>, AppError>>()?;

        Ok(found
            .into_iter()
            .flatten()
            .map(|user| (user.id.clone(), user))
            .collect())
    }

    // ─── Territory Operations ────────────────────────────────────

    /// Get a territory by ID.
    pub async fn get_territory(&self, territory_id: &str) -> Result<Option<Territory>, AppError> {
        let record: Option<TerritoryRecord> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TERRITORIES)
            .obj()
            .one(territory_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(record.map(Territory::from))
    }

    /// List territories, optionally only those owned by `user_id`.
    pub async fn list_territories(
        &self,
        user_id: Option<&str>,
    ) -> Result<Vec<Territory>, AppError> {
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::TERRITORIES);

        let query = if let Some(user_id) = user_id {
            let user_id = user_id.to_string();
            query.filter(move |q| q.field("user_id").eq(user_id.clone()))
        } else {
            query
        };

        let records: Vec<TerritoryRecord> = query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(records.into_iter().map(Territory::from).collect())
    }

    /// Store a territory.
    pub async fn set_territory(&self, territory: &Territory) -> Result<(), AppError> {
        let record = TerritoryRecord::from(territory);
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TERRITORIES)
            .document_id(&record.id)
            .object(&record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a territory. Returns `false` if it did not exist.
    pub async fn delete_territory(&self, territory_id: &str) -> Result<bool, AppError> {
        if self.get_territory(territory_id).await?.is_none() {
            return Ok(false);
        }

        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TERRITORIES)
            .document_id(territory_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(true)
    }

    // ─── Atomic Claim ────────────────────────────────────────────

    /// Atomically claim a territory: read, resolve, and write back.
    ///
    /// The read and the write share one transaction: if the territory is
    /// changed or deleted before the commit, the commit fails and nothing
    /// is written. Only `user_id` and `color` are written back. Unknown
    /// targets fail before anything is written.
    pub async fn claim_territory_atomic(
        &self,
        request: &ClaimRequest,
        policy: ClaimPolicy,
    ) -> Result<Territory, AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        // 1. Read the target inside the transaction so a concurrent write
        //    or delete makes the commit fail instead of being overwritten
        let tx_client = client.clone_with_consistency_selector(
            FirestoreConsistencySelector::Transaction(transaction.transaction_id().clone()),
        );
        let current: Option<TerritoryRecord> = tx_client
            .fluent()
            .select()
            .by_id_in(collections::TERRITORIES)
            .obj()
            .one(&request.territory_id)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to read territory in transaction: {}", e))
            })?;

        // 2. Decide
        let claimed = match resolve_claim(current.map(Territory::from), request, policy) {
            Ok(claimed) => claimed,
            Err(e) => {
                let _ = transaction.rollback().await;
                return Err(e.into());
            }
        };

        // 3. Write owner and color back; the document must still exist
        let record = TerritoryRecord::from(&claimed);
        client
            .fluent()
            .update()
            .fields(paths!(TerritoryRecord::{user_id, color}))
            .in_col(collections::TERRITORIES)
            .precondition(FirestoreWritePrecondition::Exists(true))
            .document_id(&record.id)
            .object(&record)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add claim to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            territory_id = %claimed.id,
            new_owner = %claimed.user_id,
            "Territory claimed"
        );

        Ok(claimed)
    }
}
