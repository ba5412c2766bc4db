// src/routes.rs

use axum::{
    routing::{delete, get},
    Router,
};

use crate::{
    config::AppState,
    db::Store,
    handlers::crud,
    models::{
        activity::LogActivity,
        auth::{Person, User},
        inventory::{Category, ImagenItem, InventaryDetails, Item},
        rbac::{Form, FormModule, Module, Permission, Rol, RolFormPermission, RolUser},
        tenancy::{Branch, Company, Zone},
        Entity,
    },
};

/// As cinco rotas de CRUD de uma entidade, em `/api/{NAME}`.
pub fn entity_routes<E: Entity, S: Store>() -> Router<AppState<S>> {
    let base = format!("/api/{}", E::NAME);

    Router::new()
        .route(
            &base,
            get(crud::get_all::<E, S>).post(crud::create::<E, S>),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(crud::get_by_id::<E, S>)
                .put(crud::update::<E, S>)
                .delete(crud::delete_logical::<E, S>),
        )
        .route(
            &format!("{base}/persistent/{{id}}"),
            delete(crud::delete_persistent::<E, S>),
        )
}

pub fn app_router<S: Store>(app_state: AppState<S>) -> Router {
    Router::new()
        .route("/api/health", get(crud::health))
        // Cadastro da empresa
        .merge(entity_routes::<Company, S>())
        .merge(entity_routes::<Branch, S>())
        .merge(entity_routes::<Zone, S>())
        // Inventário
        .merge(entity_routes::<Category, S>())
        .merge(entity_routes::<Item, S>())
        .merge(entity_routes::<ImagenItem, S>())
        .merge(entity_routes::<InventaryDetails, S>())
        .merge(entity_routes::<LogActivity, S>())
        // Acesso
        .merge(entity_routes::<Form, S>())
        .merge(entity_routes::<Module, S>())
        .merge(entity_routes::<Permission, S>())
        .merge(entity_routes::<Rol, S>())
        .merge(entity_routes::<RolFormPermission, S>())
        .merge(entity_routes::<RolUser, S>())
        .merge(entity_routes::<FormModule, S>())
        .merge(entity_routes::<Person, S>())
        .merge(entity_routes::<User, S>())
        .with_state(app_state)
}
