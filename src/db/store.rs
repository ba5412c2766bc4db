// src/db/store.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Entity;

/// Falhas vindas da camada de dados. O serviço embrulha qualquer uma delas
/// num `AppError::ExternalService`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("erro de banco de dados: {0}")]
    Database(#[from] sqlx::Error),

    #[error("armazenamento indisponível: {0}")]
    Unavailable(String),
}

/// O adaptador de acesso a dados, genérico sobre qualquer `Entity`.
///
/// Os métodos de escrita devolvem `true` quando pelo menos uma linha foi
/// afetada. Nada aqui tenta de novo: a falha sobe como está.
#[async_trait]
pub trait Store: Clone + Send + Sync + 'static {
    /// Todas as linhas com `active = true`.
    async fn fetch_active<E: Entity>(&self) -> Result<Vec<E>, StoreError>;

    /// Busca por id, sem filtrar por `active`.
    async fn fetch_by_id<E: Entity>(&self, id: i32) -> Result<Option<E>, StoreError>;

    /// Insere e devolve o id gerado pelo banco.
    async fn insert<E: Entity>(&self, entity: &E) -> Result<i32, StoreError>;

    async fn update<E: Entity>(&self, entity: &E) -> Result<bool, StoreError>;

    /// Marca como inativa. Uma linha que já estava inativa não conta como alterada.
    async fn deactivate<E: Entity>(&self, id: i32) -> Result<bool, StoreError>;

    async fn delete<E: Entity>(&self, id: i32) -> Result<bool, StoreError>;
}
