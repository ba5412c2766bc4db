// src/models/tenancy.rs

use chrono::{DateTime, Utc};

use super::entity::{define_entity, validate_not_blank};

define_entity! {
    /// Empresa dona das sucursais.
    Company / CompanyDto {
        name: "Company",
        table: "company",
        joins: [],
        fields: {
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            address: Option<String>,
            #[serde(default)]
            phone: Option<String>,
            #[serde(default)]
            email: Option<String>,
            #[serde(default)]
            logo: Option<String>,
            #[serde(default = "crate::models::entity::now_micros")]
            data_registry: DateTime<Utc>,
        }
    }
}

define_entity! {
    /// Sucursal de uma empresa.
    Branch / BranchDto {
        name: "Branch",
        table: "branch",
        joins: [("company_id" => "company")],
        fields: {
            company_id: i32,
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            address: Option<String>,
            #[serde(default)]
            phone: Option<String>,
            #[serde(default)]
            email: Option<String>,
            // Id da pessoa responsável (não é chave estrangeira no banco)
            #[serde(default)]
            incharge: i32,
            #[serde(default)]
            location_furrow: Option<String>,
        }
    }
}

define_entity! {
    /// Zona física dentro de uma sucursal.
    Zone / ZoneDto {
        name: "Zone",
        table: "zone",
        joins: [("branch_id" => "branch")],
        fields: {
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            branch_id: i32,
        }
    }
}
