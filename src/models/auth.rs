// src/models/auth.rs

use chrono::{DateTime, Utc};

use super::entity::{define_entity, validate_not_blank};

define_entity! {
    Person / PersonDto {
        name: "Person",
        table: "person",
        joins: [],
        fields: {
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            last_name: Option<String>,
            #[serde(default)]
            number_identification: i64,
            #[serde(default)]
            phone: Option<String>,
        }
    }
}

define_entity! {
    /// Usuário do back office, sempre ligado a uma pessoa.
    User / UserDto {
        name: "User",
        table: "users",
        joins: [("person_id" => "person")],
        keep: [password],
        fields: {
            #[validate(custom(function = "validate_not_blank"))]
            username: String,
            // Aceito na entrada, nunca devolvido nas respostas
            #[serde(default, skip_serializing)]
            password: Option<String>,
            #[serde(default = "crate::models::entity::now_micros")]
            creation_date: DateTime<Utc>,
            person_id: i32,
        }
    }
}
