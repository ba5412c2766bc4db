// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::{common::i18n::I18nStore, db::StoreError, middleware::i18n::Locale};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("{entity} com id {id} não encontrado")]
    EntityNotFound { entity: &'static str, id: i32 },

    // Falha do banco (conexão, constraint, timeout), já com contexto
    #[error("Falha em serviço externo ({resource}): {message}")]
    ExternalService {
        resource: &'static str,
        message: String,
        #[source]
        source: StoreError,
    },

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Erro de validação de um único campo, no mesmo formato do `validator`.
    /// O `code` escolhe a tradução; `message` fica como texto de reserva.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());

        let mut errors = ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ExternalService { .. } | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Traduz o erro para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        let status = self.status();

        match self {
            AppError::ValidationError(errors) => {
                let mut details = Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            let fallback = e.message.as_deref().unwrap_or(&*e.code);
                            Value::String(i18n.validation_message(lang, &e.code, fallback))
                        })
                        .collect();
                    details.insert(to_camel_case(&field), Value::Array(messages));
                }
                ApiError {
                    status,
                    error: i18n.message(lang, "validation_failed"),
                    details: Some(Value::Object(details)),
                }
            }
            AppError::EntityNotFound { entity, id } => ApiError {
                status,
                error: i18n
                    .message(lang, "entity_not_found")
                    .replace("{entity}", entity)
                    .replace("{id}", &id.to_string()),
                details: None,
            },
            // A causa fica só no log; o cliente recebe a mensagem genérica.
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                ApiError {
                    status,
                    error: i18n.message(lang, "unexpected"),
                    details: None,
                }
            }
        }
    }
}

// "rol_id" -> "rolId", para bater com o JSON dos DTOs
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// O corpo de erro devolvido ao cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Sem extrator de idioma disponível, responde no idioma padrão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), I18nStore::global())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_kind() {
        assert_eq!(AppError::invalid_field("id", "positive_id", "x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::EntityNotFound { entity: "Zone", id: 3 }.status(),
            StatusCode::NOT_FOUND
        );
        let external = AppError::ExternalService {
            resource: "database",
            message: "Erro ao listar Zone".into(),
            source: StoreError::Unavailable("down".into()),
        };
        assert_eq!(external.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let api = AppError::EntityNotFound { entity: "Branch", id: 8 }
            .to_api_error(&Locale("en".into()), I18nStore::global());
        assert_eq!(api.error, "Branch with id 8 was not found.");
        assert!(api.details.is_none());
    }

    #[test]
    fn validation_details_use_json_field_names() {
        let api = AppError::invalid_field("rol_id", "range", "O campo deve ser maior que zero.")
            .to_api_error(&Locale("es".into()), I18nStore::global());
        let details = api.details.unwrap();
        assert!(details.get("rolId").is_some());
        assert!(details.get("rol_id").is_none());
        assert_eq!(details["rolId"][0], "El campo debe ser mayor a cero.");
    }

    #[test]
    fn external_failures_hide_the_cause() {
        let api = AppError::ExternalService {
            resource: "database",
            message: "Erro ao criar Item".into(),
            source: StoreError::Unavailable("password authentication failed".into()),
        }
        .to_api_error(&Locale("en".into()), I18nStore::global());
        assert!(!api.error.contains("password"));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("permission_id"), "permissionId");
        assert_eq!(to_camel_case("name"), "name");
    }
}
