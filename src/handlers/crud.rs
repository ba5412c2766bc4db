// src/handlers/crud.rs

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    db::Store,
    middleware::i18n::Locale,
    models::Entity,
    services::CrudService,
};

// ---
// Extração do corpo e do id da rota
// ---
// Corpo ausente, nulo ou malformado vira erro de validação em "body".
fn body<E: Entity>(payload: Result<Json<E::Dto>, JsonRejection>) -> Result<E::Dto, AppError> {
    payload.map(|Json(dto)| dto).map_err(|rejection| {
        tracing::warn!(entity = E::NAME, error = %rejection, "corpo inválido");
        AppError::invalid_field("body", "invalid_body", "O corpo da requisição está ausente ou inválido.")
    })
}

fn path_id<E: Entity>(path: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::warn!(entity = E::NAME, error = %rejection, "id de rota inválido");
        AppError::invalid_field("id", "invalid_path", "O id da rota deve ser um número inteiro.")
    })
}

// ---
// Handler: get_all
// ---
pub async fn get_all<E: Entity, S: Store>(
    State(app_state): State<AppState<S>>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let rows = CrudService::<E>::new()
        .get_all(&app_state.store)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(rows))
}

// ---
// Handler: get_by_id
// ---
pub async fn get_by_id<E: Entity, S: Store>(
    State(app_state): State<AppState<S>>,
    locale: Locale,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let result = async {
        let id = path_id::<E>(path)?;
        CrudService::<E>::new().get_by_id(&app_state.store, id).await
    }
    .await;

    let dto = result.map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(dto))
}

// ---
// Handler: create
// ---
pub async fn create<E: Entity, S: Store>(
    State(app_state): State<AppState<S>>,
    locale: Locale,
    payload: Result<Json<E::Dto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let result = async {
        let dto = body::<E>(payload)?;
        CrudService::<E>::new().create(&app_state.store, dto).await
    }
    .await;

    let created = result.map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    let location = format!("/api/{}/{}", E::NAME, E::dto_id(&created));

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

// ---
// Handler: update
// ---
// O id da rota precisa bater com o do corpo.
pub async fn update<E: Entity, S: Store>(
    State(app_state): State<AppState<S>>,
    locale: Locale,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<E::Dto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let result = async {
        let id = path_id::<E>(path)?;
        let dto = body::<E>(payload)?;

        if E::dto_id(&dto) != id {
            tracing::warn!(entity = E::NAME, id, body_id = E::dto_id(&dto), "ids divergentes");
            return Err(AppError::invalid_field(
                "id",
                "route_id_mismatch",
                "O id da rota não corresponde ao id do corpo.",
            ));
        }

        let changed = CrudService::<E>::new().update(&app_state.store, dto.clone()).await?;
        if !changed {
            return Err(AppError::EntityNotFound { entity: E::NAME, id });
        }
        Ok::<_, AppError>(dto)
    }
    .await;

    let updated = result.map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    Ok(Json(updated))
}

// ---
// Handlers: delete lógico e persistente
// ---
pub async fn delete_logical<E: Entity, S: Store>(
    State(app_state): State<AppState<S>>,
    locale: Locale,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let result = async {
        let id = path_id::<E>(path)?;
        let changed = CrudService::<E>::new().delete_logical(&app_state.store, id).await?;
        if !changed {
            return Err(AppError::EntityNotFound { entity: E::NAME, id });
        }
        Ok::<_, AppError>(())
    }
    .await;

    result.map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    let message = app_state
        .i18n_store
        .entity_message(&locale.0, "deleted_logical", E::NAME);

    Ok(Json(json!({ "message": message })))
}

pub async fn delete_persistent<E: Entity, S: Store>(
    State(app_state): State<AppState<S>>,
    locale: Locale,
    path: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let result = async {
        let id = path_id::<E>(path)?;
        let changed = CrudService::<E>::new().delete_persistent(&app_state.store, id).await?;
        if !changed {
            return Err(AppError::EntityNotFound { entity: E::NAME, id });
        }
        Ok::<_, AppError>(())
    }
    .await;

    result.map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    let message = app_state
        .i18n_store
        .entity_message(&locale.0, "deleted_persistent", E::NAME);

    Ok(Json(json!({ "message": message })))
}

// ---
// Handler: health
// ---
pub async fn health() -> &'static str {
    "OK"
}
