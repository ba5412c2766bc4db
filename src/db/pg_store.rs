// src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::{
    db::store::{Store, StoreError},
    models::Entity,
};

// O store do Postgres. Todo SQL é montado a partir do descritor da entidade,
// então cada tabela usa exatamente as mesmas consultas.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ---
// Montagem das consultas
// ---

fn select_sql<E: Entity>(filter: &str) -> String {
    let mut columns = vec!["t.id".to_string(), "t.active".to_string()];
    columns.extend(E::COLUMNS.iter().map(|c| format!("t.{c}")));

    let joins: String = E::JOINS
        .iter()
        .enumerate()
        .map(|(i, j)| format!(" INNER JOIN {} j{i} ON t.{} = j{i}.id", j.table, j.column))
        .collect();

    format!(
        "SELECT {} FROM {} t{} WHERE {} ORDER BY t.id",
        columns.join(", "),
        E::TABLE,
        joins,
        filter
    )
}

pub(crate) fn select_active_sql<E: Entity>() -> String {
    select_sql::<E>("t.active = TRUE")
}

pub(crate) fn select_by_id_sql<E: Entity>() -> String {
    select_sql::<E>("t.id = $1")
}

pub(crate) fn insert_sql<E: Entity>() -> String {
    let columns: Vec<&str> = E::COLUMNS.iter().copied().chain(["active"]).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
        E::TABLE,
        columns.join(", "),
        placeholders.join(", ")
    )
}

pub(crate) fn update_sql<E: Entity>() -> String {
    let assignments: Vec<String> = E::COLUMNS
        .iter()
        .copied()
        .chain(["active"])
        .enumerate()
        .map(|(i, c)| format!("{c} = ${}", i + 1))
        .collect();

    format!(
        "UPDATE {} SET {} WHERE id = ${}",
        E::TABLE,
        assignments.join(", "),
        E::COLUMNS.len() + 2
    )
}

pub(crate) fn deactivate_sql<E: Entity>() -> String {
    format!("UPDATE {} SET active = FALSE WHERE id = $1 AND active = TRUE", E::TABLE)
}

pub(crate) fn delete_sql<E: Entity>() -> String {
    format!("DELETE FROM {} WHERE id = $1", E::TABLE)
}

#[async_trait]
impl Store for PgStore {
    async fn fetch_active<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        let sql = select_active_sql::<E>();
        let rows = sqlx::query_as::<_, E>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_by_id<E: Entity>(&self, id: i32) -> Result<Option<E>, StoreError> {
        let sql = select_by_id_sql::<E>();
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert<E: Entity>(&self, entity: &E) -> Result<i32, StoreError> {
        let sql = insert_sql::<E>();
        let row = entity
            .bind_columns(sqlx::query(&sql))
            .bind(entity.is_active())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("id")?)
    }

    async fn update<E: Entity>(&self, entity: &E) -> Result<bool, StoreError> {
        let sql = update_sql::<E>();
        let result = entity
            .bind_columns(sqlx::query(&sql))
            .bind(entity.is_active())
            .bind(entity.id())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn deactivate<E: Entity>(&self, id: i32) -> Result<bool, StoreError> {
        let sql = deactivate_sql::<E>();
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete<E: Entity>(&self, id: i32) -> Result<bool, StoreError> {
        let sql = delete_sql::<E>();
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
