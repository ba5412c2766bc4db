// src/models/rbac.rs

use chrono::{DateTime, Utc};

use super::entity::{define_entity, validate_not_blank};

define_entity! {
    /// Formulário (tela) do sistema.
    Form / FormDto {
        name: "Form",
        table: "form",
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
    /// Agrupador de formulários.
    Module / ModuleDto {
        name: "Module",
        table: "module",
        joins: [],
        fields: {
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            description: Option<String>,
            #[serde(default = "crate::models::entity::now_micros")]
            creation_date: DateTime<Utc>,
        }
    }
}

define_entity! {
    Permission / PermissionDto {
        name: "Permission",
        table: "permission",
        joins: [],
        fields: {
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            code: Option<String>,
            #[serde(default)]
            description: Option<String>,
        }
    }
}

define_entity! {
    /// Cargo (papel) atribuível a usuários.
    Rol / RolDto {
        name: "Rol",
        table: "rol",
        joins: [],
        fields: {
            #[validate(custom(function = "validate_not_blank"))]
            name: String,
            #[serde(default)]
            code: i32,
            #[serde(default)]
            description: Option<String>,
        }
    }
}

// ---
// Tabelas-ponte
// ---

define_entity! {
    RolFormPermission / RolFormPermissionDto {
        name: "RolFormPermission",
        table: "rol_form_permission",
        joins: [("rol_id" => "rol"), ("form_id" => "form"), ("permission_id" => "permission")],
        fields: {
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            rol_id: i32,
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            form_id: i32,
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            permission_id: i32,
        }
    }
}

define_entity! {
    RolUser / RolUserDto {
        name: "RolUser",
        table: "rol_user",
        joins: [("rol_id" => "rol"), ("user_id" => "users")],
        fields: {
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            rol_id: i32,
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            user_id: i32,
        }
    }
}

define_entity! {
    FormModule / FormModuleDto {
        name: "FormModule",
        table: "form_module",
        joins: [("form_id" => "form"), ("module_id" => "module")],
        fields: {
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            form_id: i32,
            #[validate(range(min = 1, message = "O campo deve ser maior que zero."))]
            module_id: i32,
        }
    }
}
