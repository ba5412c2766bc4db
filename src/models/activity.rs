// src/models/activity.rs

use chrono::{DateTime, Utc};

use super::entity::define_entity;

define_entity! {
    /// Registro de auditoria. Não é alimentado automaticamente pelas outras entidades.
    LogActivity / LogActivityDto {
        name: "LogActivity",
        table: "log_activity",
        joins: [],
        fields: {
            #[serde(default)]
            action: Option<String>,
            #[serde(default)]
            data_previous: Option<String>,
            #[serde(default)]
            data_new: Option<String>,
            #[serde(default = "crate::models::entity::now_micros")]
            data: DateTime<Utc>,
        }
    }
}
