use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{map_db_err, ApiError};
use crate::models::{Role, Store};

#[derive(Debug, Deserialize)]
pub struct CreateStoreDto {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStoreDto {
    pub name: String,
    pub description: String,
}

/// Store CRUD plus the membership-role lookup the authorization guard runs
/// against.
#[derive(Clone)]
pub struct StoreService {
    pool: PgPool,
}

impl StoreService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<Store>, ApiError> {
        sqlx::query_as::<_, Store>(
            r#"
            SELECT s.*
            FROM stores s
            JOIN store_members m ON m.store_id = s.id
            WHERE m.user_id = $1
            ORDER BY s.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Store"))
    }

    pub async fn find_by_id(&self, store_id: Uuid) -> Result<Store, ApiError> {
        sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err(e, "Store"))?
            .ok_or(ApiError::NotFound("Store"))
    }

    /// Fresh membership lookup; absence of a row means no role. An
    /// unrecognized role value in storage is treated the same way.
    pub async fn get_user_role(
        &self,
        store_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Role>, ApiError> {
        let role: Option<String> = sqlx::query_scalar(
            "SELECT role FROM store_members WHERE store_id = $1 AND user_id = $2",
        )
        .bind(store_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Store"))?;

        Ok(role.and_then(|value| {
            let parsed = Role::parse(&value);
            if parsed.is_none() {
                tracing::warn!(%store_id, %user_id, role = %value, "unknown role in store_members");
            }
            parsed
        }))
    }

    /// Creating a store and recording the creator as OWNER is one unit of
    /// work; a failure on either insert rolls back both.
    pub async fn create(&self, user_id: Uuid, dto: CreateStoreDto) -> Result<Store, ApiError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_err(e, "Store"))?;

        let store = sqlx::query_as::<_, Store>(
            "INSERT INTO stores (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_err(e, "Store"))?;

        sqlx::query("INSERT INTO store_members (user_id, store_id, role) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(store.id)
            .bind(Role::Owner.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_err(e, "Store"))?;

        tx.commit().await.map_err(|e| map_db_err(e, "Store"))?;

        Ok(store)
    }

    pub async fn update(&self, store_id: Uuid, dto: UpdateStoreDto) -> Result<Store, ApiError> {
        sqlx::query_as::<_, Store>(
            r#"
            UPDATE stores
            SET name = $2, description = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Store"))?
        .ok_or(ApiError::NotFound("Store"))
    }

    pub async fn delete(&self, store_id: Uuid) -> Result<(), ApiError> {
        let deleted: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM stores WHERE id = $1 RETURNING id")
                .bind(store_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_err(e, "Store"))?;

        deleted.map(|_| ()).ok_or(ApiError::NotFound("Store"))
    }
}
