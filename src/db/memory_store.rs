// src/db/memory_store.rs

use async_trait::async_trait;
use std::{
    any::Any,
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use crate::{
    db::store::{Store, StoreError},
    models::Entity,
};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Box<dyn Any + Send + Sync>>,
}

/// Store em memória com a mesma semântica do `PgStore`: ids gerados pelo
/// store, filtro de `active` na listagem e booleano de "linha afetada".
///
/// Não verifica chaves estrangeiras (no Postgres isso é papel do banco).
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<&'static str, Table>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simula o banco fora do ar: toda operação passa a falhar.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Quantidade de linhas guardadas (ativas ou não) para a entidade.
    /// Falha como as demais operações quando o store está fora do ar.
    pub fn row_count<E: Entity>(&self) -> Result<usize, StoreError> {
        let tables = self.lock()?;
        Ok(tables.get(E::TABLE).map_or(0, |t| t.rows.len()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<&'static str, Table>>, StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("conexão recusada".into()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("tabela envenenada".into()))
    }
}

fn row_as<E: Entity>(row: &(dyn Any + Send + Sync)) -> Option<E> {
    row.downcast_ref::<E>().cloned()
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch_active<E: Entity>(&self) -> Result<Vec<E>, StoreError> {
        let tables = self.lock()?;
        let rows = tables
            .get(E::TABLE)
            .map(|t| {
                t.rows
                    .values()
                    .filter_map(|row| row_as::<E>(&**row))
                    .filter(|e| e.is_active())
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn fetch_by_id<E: Entity>(&self, id: i32) -> Result<Option<E>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .get(E::TABLE)
            .and_then(|t| t.rows.get(&id))
            .and_then(|row| row_as::<E>(&**row)))
    }

    async fn insert<E: Entity>(&self, entity: &E) -> Result<i32, StoreError> {
        let mut tables = self.lock()?;
        let table = tables.entry(E::TABLE).or_default();
        table.last_id += 1;

        let id = table.last_id;
        let mut row = entity.clone();
        row.set_id(id);
        table.rows.insert(id, Box::new(row));
        Ok(id)
    }

    async fn update<E: Entity>(&self, entity: &E) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let Some(slot) = tables
            .get_mut(E::TABLE)
            .and_then(|t| t.rows.get_mut(&entity.id()))
        else {
            return Ok(false);
        };
        *slot = Box::new(entity.clone());
        Ok(true)
    }

    async fn deactivate<E: Entity>(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let Some(row) = tables
            .get_mut(E::TABLE)
            .and_then(|t| t.rows.get_mut(&id))
            .and_then(|row| row.downcast_mut::<E>())
        else {
            return Ok(false);
        };
        if !row.is_active() {
            return Ok(false);
        }
        row.set_active(false);
        Ok(true)
    }

    async fn delete<E: Entity>(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        Ok(tables
            .get_mut(E::TABLE)
            .and_then(|t| t.rows.remove(&id))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::Category;
    use assert_matches::assert_matches;

    fn category(name: &str) -> Category {
        Category { id: 0, name: name.into(), description: None, active: true }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_sequence() {
        let store = MemoryStore::new();
        assert_eq!(store.insert(&category("A")).await.unwrap(), 1);
        assert_eq!(store.insert(&category("B")).await.unwrap(), 2);

        let stored: Category = store.fetch_by_id(2).await.unwrap().unwrap();
        assert_eq!(stored.id, 2);
        assert_eq!(stored.name, "B");
    }

    #[tokio::test]
    async fn deactivate_changes_a_row_only_once() {
        let store = MemoryStore::new();
        let id = store.insert(&category("A")).await.unwrap();

        assert!(store.deactivate::<Category>(id).await.unwrap());
        assert!(!store.deactivate::<Category>(id).await.unwrap());
        assert!(store.fetch_active::<Category>().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_and_update_report_missing_rows() {
        let store = MemoryStore::new();
        assert!(!store.delete::<Category>(40).await.unwrap());

        let mut ghost = category("ghost");
        ghost.id = 40;
        assert!(!store.update(&ghost).await.unwrap());
        assert_eq!(store.row_count::<Category>().unwrap(), 0);
    }

    #[tokio::test]
    async fn failing_store_surfaces_unavailable() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert_matches!(
            store.fetch_active::<Category>().await,
            Err(StoreError::Unavailable(_))
        );
        assert_matches!(store.row_count::<Category>(), Err(StoreError::Unavailable(_)));
    }
}
