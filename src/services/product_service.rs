use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{map_db_err, ApiError};
use crate::models::Product;

#[derive(Debug, Deserialize)]
pub struct CreateProductDto {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

/// Product CRUD. Every query is scoped by store id; a product belonging to a
/// different store is indistinguishable from a missing one.
#[derive(Clone)]
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, store_id: Uuid) -> Result<Vec<Product>, ApiError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE store_id = $1 ORDER BY id")
            .bind(store_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_err(e, "Product"))
    }

    pub async fn find_by_id(&self, store_id: Uuid, id: i64) -> Result<Product, ApiError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND store_id = $2")
            .bind(id)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err(e, "Product"))?
            .ok_or(ApiError::NotFound("Product"))
    }

    pub async fn create(&self, store_id: Uuid, dto: CreateProductDto) -> Result<Product, ApiError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (store_id, name, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Product"))
    }

    pub async fn update(
        &self,
        store_id: Uuid,
        id: i64,
        dto: UpdateProductDto,
    ) -> Result<Product, ApiError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                updated_at = now()
            WHERE id = $1 AND store_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(store_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Product"))?
        .ok_or(ApiError::NotFound("Product"))
    }

    pub async fn delete(&self, store_id: Uuid, id: i64) -> Result<(), ApiError> {
        let deleted: Option<i64> = sqlx::query_scalar(
            "DELETE FROM products WHERE id = $1 AND store_id = $2 RETURNING id",
        )
        .bind(id)
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Product"))?;

        deleted.map(|_| ()).ok_or(ApiError::NotFound("Product"))
    }
}
