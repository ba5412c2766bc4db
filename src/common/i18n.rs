// src/common/i18n.rs

use std::{collections::HashMap, sync::LazyLock};

pub const DEFAULT_LANG: &str = "en";

// (idioma, chave, mensagem)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("en", "validation_failed", "One or more fields are invalid."),
    ("en", "entity_not_found", "{entity} with id {id} was not found."),
    ("en", "unexpected", "An unexpected error occurred."),
    ("en", "validation.route_id_mismatch", "The route id does not match the body id."),
    ("en", "validation.invalid_body", "The request body is missing or malformed."),
    ("en", "validation.invalid_path", "The id in the route must be an integer."),
    ("en", "deleted_logical", "{entity} deactivated successfully."),
    ("en", "deleted_persistent", "{entity} permanently deleted."),
    ("en", "validation.required", "This field is required."),
    ("en", "validation.range", "This field must be greater than zero."),
    ("en", "validation.positive_id", "The id must be greater than zero."),
    ("es", "validation_failed", "Uno o más campos no son válidos."),
    ("es", "entity_not_found", "No se encontró {entity} con ID {id}."),
    ("es", "unexpected", "Ocurrió un error inesperado."),
    ("es", "validation.route_id_mismatch", "El ID de la ruta no coincide con el ID del objeto."),
    ("es", "validation.invalid_body", "El cuerpo de la solicitud falta o es inválido."),
    ("es", "validation.invalid_path", "El ID de la ruta debe ser un número entero."),
    ("es", "deleted_logical", "{entity} eliminado exitosamente."),
    ("es", "deleted_persistent", "{entity} eliminado permanentemente."),
    ("es", "validation.required", "El campo es obligatorio."),
    ("es", "validation.range", "El campo debe ser mayor a cero."),
    ("es", "validation.positive_id", "El ID debe ser mayor a cero."),
    ("pt", "validation_failed", "Um ou mais campos são inválidos."),
    ("pt", "entity_not_found", "{entity} com id {id} não encontrado."),
    ("pt", "unexpected", "Ocorreu um erro inesperado."),
    ("pt", "validation.route_id_mismatch", "O id da rota não corresponde ao id do corpo."),
    ("pt", "validation.invalid_body", "O corpo da requisição está ausente ou inválido."),
    ("pt", "validation.invalid_path", "O id da rota deve ser um número inteiro."),
    ("pt", "deleted_logical", "{entity} desativado com sucesso."),
    ("pt", "deleted_persistent", "{entity} removido permanentemente."),
    ("pt", "validation.required", "O campo é obrigatório."),
    ("pt", "validation.range", "O campo deve ser maior que zero."),
    ("pt", "validation.positive_id", "O id deve ser maior que zero."),
];

static GLOBAL: LazyLock<I18nStore> = LazyLock::new(I18nStore::new);

/// Catálogo de mensagens por idioma. Idiomas desconhecidos caem no inglês.
#[derive(Debug, Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: HashMap<_, HashMap<_, _>> = HashMap::new();
        for &(lang, key, text) in MESSAGES {
            messages.entry(lang).or_default().insert(key, text);
        }
        Self { messages }
    }

    /// Instância compartilhada, usada quando não há `AppState` à mão.
    pub fn global() -> &'static I18nStore {
        &GLOBAL
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.messages.get(lang)?.get(key).copied()
    }

    pub fn message(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANG, key))
            .unwrap_or(key)
            .to_string()
    }

    /// Mensagem para um código do `validator`; sem tradução usa o texto de reserva.
    pub fn validation_message(&self, lang: &str, code: &str, fallback: &str) -> String {
        let key = format!("validation.{code}");
        self.lookup(lang, &key)
            .or_else(|| self.lookup(DEFAULT_LANG, &key))
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn entity_message(&self, lang: &str, key: &str, entity: &str) -> String {
        self.message(lang, key).replace("{entity}", entity)
    }
}
