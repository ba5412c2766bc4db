// src/services/crud_service.rs

use std::marker::PhantomData;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{Store, StoreError},
    models::Entity,
};

/// A regra de negócio comum a todas as entidades.
///
/// O serviço não guarda estado: o store é injetado em cada chamada.
pub struct CrudService<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for CrudService<E> {}

impl<E> Default for CrudService<E> {
    fn default() -> Self {
        Self { _entity: PhantomData }
    }
}

// Converte uma falha do store no erro externo, registrando a causa original.
fn external(entity: &'static str, message: String, source: StoreError) -> AppError {
    tracing::error!(entity, error = %source, "{}", message);
    AppError::ExternalService {
        resource: "database",
        message,
        source,
    }
}

fn require_positive_id(entity: &'static str, id: i32) -> Result<(), AppError> {
    if id <= 0 {
        tracing::warn!(entity, id, "id inválido");
        return Err(AppError::invalid_field("id", "positive_id", "O id deve ser maior que zero."));
    }
    Ok(())
}

impl<E: Entity> CrudService<E> {
    pub const fn new() -> Self {
        Self { _entity: PhantomData }
    }

    // --- GET ALL ---
    pub async fn get_all<S: Store>(&self, store: &S) -> Result<Vec<E::Dto>, AppError> {
        let rows = store
            .fetch_active::<E>()
            .await
            .map_err(|e| external(E::NAME, format!("Erro ao listar {}", E::NAME), e))?;

        tracing::info!(entity = E::NAME, count = rows.len(), "listagem concluída");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    // --- GET BY ID ---
    // Não filtra por `active`: uma linha removida logicamente continua acessível pelo id.
    pub async fn get_by_id<S: Store>(&self, store: &S, id: i32) -> Result<E::Dto, AppError> {
        require_positive_id(E::NAME, id)?;

        let entity = self.load(store, id).await?;
        Ok(entity.into())
    }

    // --- CREATE ---
    pub async fn create<S: Store>(&self, store: &S, dto: E::Dto) -> Result<E::Dto, AppError> {
        Self::validate(&dto)?;

        let mut entity: E = dto.into();
        entity.set_id(0);
        entity.set_active(true);

        let id = store
            .insert(&entity)
            .await
            .map_err(|e| external(E::NAME, format!("Erro ao criar {}", E::NAME), e))?;
        entity.set_id(id);

        tracing::info!(entity = E::NAME, id, "registro criado");
        Ok(entity.into())
    }

    // --- UPDATE ---
    // Substitui o registro inteiro, inclusive `active`. Campos `keep` omitidos
    // (a senha do usuário) continuam com o valor gravado.
    pub async fn update<S: Store>(&self, store: &S, dto: E::Dto) -> Result<bool, AppError> {
        Self::validate(&dto)?;

        let id = E::dto_id(&dto);
        let stored = self.load(store, id).await?;

        let mut entity: E = dto.into();
        entity.fill_unset_from(&stored);
        let changed = store
            .update(&entity)
            .await
            .map_err(|e| external(E::NAME, format!("Erro ao atualizar {} {}", E::NAME, id), e))?;

        tracing::info!(entity = E::NAME, id, changed, "registro atualizado");
        Ok(changed)
    }

    // --- DELETE LÓGICO ---
    pub async fn delete_logical<S: Store>(&self, store: &S, id: i32) -> Result<bool, AppError> {
        require_positive_id(E::NAME, id)?;
        self.load(store, id).await?;

        let changed = store.deactivate::<E>(id).await.map_err(|e| {
            external(E::NAME, format!("Erro ao remover logicamente {} {}", E::NAME, id), e)
        })?;

        tracing::info!(entity = E::NAME, id, changed, "remoção lógica");
        Ok(changed)
    }

    // --- DELETE PERSISTENTE ---
    pub async fn delete_persistent<S: Store>(&self, store: &S, id: i32) -> Result<bool, AppError> {
        require_positive_id(E::NAME, id)?;
        self.load(store, id).await?;

        let changed = store.delete::<E>(id).await.map_err(|e| {
            external(E::NAME, format!("Erro ao remover permanentemente {} {}", E::NAME, id), e)
        })?;

        tracing::info!(entity = E::NAME, id, changed, "remoção permanente");
        Ok(changed)
    }

    async fn load<S: Store>(&self, store: &S, id: i32) -> Result<E, AppError> {
        store
            .fetch_by_id::<E>(id)
            .await
            .map_err(|e| external(E::NAME, format!("Erro ao buscar {} {}", E::NAME, id), e))?
            .ok_or_else(|| {
                tracing::info!(entity = E::NAME, id, "registro não encontrado");
                AppError::EntityNotFound { entity: E::NAME, id }
            })
    }

    fn validate(dto: &E::Dto) -> Result<(), AppError> {
        dto.validate().map_err(|errors| {
            tracing::warn!(entity = E::NAME, %errors, "validação falhou");
            AppError::ValidationError(errors)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MemoryStore,
        models::{
            auth::{User, UserDto},
            entity::now_micros,
            rbac::{RolUser, RolUserDto},
            tenancy::{Branch, BranchDto},
        },
    };
    use assert_matches::assert_matches;

    const BRANCHES: CrudService<Branch> = CrudService::new();
    const ROL_USERS: CrudService<RolUser> = CrudService::new();
    const USERS: CrudService<User> = CrudService::new();

    fn hq() -> BranchDto {
        BranchDto {
            id: 0,
            company_id: 1,
            name: "HQ".into(),
            address: None,
            phone: None,
            email: None,
            incharge: 0,
            location_furrow: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_the_input() {
        let store = MemoryStore::new();
        let input = BranchDto { id: 99, active: false, ..hq() };

        let created = BRANCHES.create(&store, input.clone()).await.unwrap();
        assert!(created.id > 0);
        assert_ne!(created.id, 99);
        assert!(created.active);

        let fetched = BRANCHES.get_by_id(&store, created.id).await.unwrap();
        assert_eq!(fetched, BranchDto { id: created.id, active: true, ..input });
    }

    #[tokio::test]
    async fn invalid_link_is_rejected_before_touching_the_store() {
        let store = MemoryStore::new();
        let dto = RolUserDto { id: 0, rol_id: 0, user_id: 5, active: true };

        let err = ROL_USERS.create(&store, dto.clone()).await.unwrap_err();
        assert_matches!(err, AppError::ValidationError(ref e) if e.field_errors().contains_key("rol_id"));
        assert_eq!(store.row_count::<RolUser>().unwrap(), 0);

        let err = ROL_USERS.update(&store, dto).await.unwrap_err();
        assert_matches!(err, AppError::ValidationError(_));
    }

    #[tokio::test]
    async fn non_positive_ids_fail_validation() {
        let store = MemoryStore::new();
        assert_matches!(BRANCHES.get_by_id(&store, 0).await, Err(AppError::ValidationError(_)));
        assert_matches!(BRANCHES.delete_logical(&store, -3).await, Err(AppError::ValidationError(_)));
        assert_matches!(BRANCHES.delete_persistent(&store, 0).await, Err(AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn logical_delete_hides_from_list_but_not_from_lookup() {
        let store = MemoryStore::new();
        let created = BRANCHES.create(&store, hq()).await.unwrap();

        assert!(BRANCHES.delete_logical(&store, created.id).await.unwrap());
        assert!(BRANCHES.get_all(&store).await.unwrap().is_empty());

        let fetched = BRANCHES.get_by_id(&store, created.id).await.unwrap();
        assert!(!fetched.active);

        // segunda chamada: a linha já estava inativa
        assert!(!BRANCHES.delete_logical(&store, created.id).await.unwrap());
    }

    #[tokio::test]
    async fn persistent_delete_removes_the_row() {
        let store = MemoryStore::new();
        let created = BRANCHES.create(&store, hq()).await.unwrap();

        assert!(BRANCHES.delete_persistent(&store, created.id).await.unwrap());
        assert_matches!(
            BRANCHES.get_by_id(&store, created.id).await,
            Err(AppError::EntityNotFound { entity: "Branch", id }) if id == created.id
        );
        assert_matches!(
            BRANCHES.delete_persistent(&store, created.id).await,
            Err(AppError::EntityNotFound { .. })
        );
    }

    #[tokio::test]
    async fn update_replaces_every_field_and_can_reactivate() {
        let store = MemoryStore::new();
        let created = BRANCHES.create(&store, hq()).await.unwrap();
        BRANCHES.delete_logical(&store, created.id).await.unwrap();

        let changes = BranchDto {
            name: "Sede Norte".into(),
            email: Some("norte@example.com".into()),
            active: true,
            ..created.clone()
        };
        assert!(BRANCHES.update(&store, changes.clone()).await.unwrap());
        assert_eq!(BRANCHES.get_by_id(&store, created.id).await.unwrap(), changes);
        assert_eq!(BRANCHES.get_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let ghost = BranchDto { id: 41, ..hq() };
        assert_matches!(
            BRANCHES.update(&store, ghost).await,
            Err(AppError::EntityNotFound { id: 41, .. })
        );
        assert_eq!(store.row_count::<Branch>().unwrap(), 0);
    }

    #[tokio::test]
    async fn store_faults_become_external_service_errors() {
        let store = MemoryStore::new();
        store.set_failing(true);

        assert_matches!(BRANCHES.get_all(&store).await, Err(AppError::ExternalService { .. }));
        assert_matches!(BRANCHES.create(&store, hq()).await, Err(AppError::ExternalService { .. }));
        assert_matches!(BRANCHES.get_by_id(&store, 1).await, Err(AppError::ExternalService { .. }));
    }

    #[tokio::test]
    async fn store_faults_on_writes_become_external_service_errors() {
        let store = MemoryStore::new();
        let created = BRANCHES.create(&store, hq()).await.unwrap();
        store.set_failing(true);

        let changes = BranchDto { name: "Sede Sul".into(), ..created.clone() };
        assert_matches!(BRANCHES.update(&store, changes).await, Err(AppError::ExternalService { .. }));
        assert_matches!(
            BRANCHES.delete_logical(&store, created.id).await,
            Err(AppError::ExternalService { .. })
        );
        assert_matches!(
            BRANCHES.delete_persistent(&store, created.id).await,
            Err(AppError::ExternalService { .. })
        );

        store.set_failing(false);
        assert_eq!(BRANCHES.get_by_id(&store, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_without_password_keeps_the_stored_one() {
        let store = MemoryStore::new();
        let created = USERS
            .create(
                &store,
                UserDto {
                    id: 0,
                    username: "ana".into(),
                    password: Some("segredo".into()),
                    creation_date: now_micros(),
                    person_id: 1,
                    active: true,
                },
            )
            .await
            .unwrap();

        let changes = UserDto { username: "ana.souza".into(), password: None, ..created.clone() };
        assert!(USERS.update(&store, changes).await.unwrap());

        let stored: User = store.fetch_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.username, "ana.souza");
        assert_eq!(stored.password.as_deref(), Some("segredo"));
    }
}
