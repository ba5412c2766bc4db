// src/models/inventory.rs

use chrono::{DateTime, Utc};

use super::entity::{define_entity, validate_not_blank};

define_entity! {
    Category / CategoryDto {
        name: "Category",
        table: "category",
        joins: [],
        fields: {
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            description: Option<String>,
        }
    }
}

define_entity! {
    /// Item do inventário. Pertence a uma categoria e está guardado numa zona.
    Item / ItemDto {
        name: "Item",
        table: "item",
        joins: [("category_id" => "category"), ("zone_id" => "zone")],
        fields: {
            #[serde(default)]
            code: Option<String>,
            #[serde(default)]
            code_qr: Option<String>,
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            description: Option<String>,
            #[serde(default = "crate::models::entity::now_micros")]
            created_at: DateTime<Utc>,
            category_id: i32,
            zone_id: i32,
        }
    }
}

define_entity! {
    ImagenItem / ImagenItemDto {
        name: "ImagenItem",
        table: "imagen_item",
        joins: [("item_id" => "item")],
        fields: {
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            item_id: i32,
            #[validate(custom(function = "validate_not_blank"))]
            url_image: String,
            #[serde(default = "crate::models::entity::now_micros")]
            date_registry: DateTime<Utc>,
        }
    }
}

define_entity! {
    /// Registro de mudança de estado do inventário de uma zona.
    InventaryDetails / InventaryDetailsDto {
        name: "InventaryDetails",
        table: "inventary_details",
        joins: [("zone_id" => "zone")],
        fields: {
            #[serde(default)]
            status_previous: Option<String>,
            #[serde(default)]
            status_new: Option<String>,
            #[serde(default)]
            observations: Option<String>,
            #[serde(default = "crate::models::entity::now_micros")]
            date: DateTime<Utc>,
            #[serde(default)]
            description: Option<String>,
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            zone_id: i32,
        }
    }
}
