// src/models/entity.rs

use chrono::{DateTime, SubsecRound, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{postgres::{PgArguments, PgRow}, Postgres};
use std::fmt::Debug;
use validator::{Validate, ValidationError};

/// Query do SQLx com os argumentos do Postgres (usado pelo bind das colunas).
pub type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Relação de chave estrangeira usada nos `INNER JOIN` das leituras.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub column: &'static str,
    pub table: &'static str,
}

/// O contrato que toda entidade do back office implementa.
///
/// Não é escrito à mão: a macro `define_entity!` gera a entidade, o DTO,
/// os dois `From` e este impl a partir de uma única lista de campos.
pub trait Entity:
    for<'r> sqlx::FromRow<'r, PgRow> + Debug + Clone + PartialEq + Send + Sync + Unpin + 'static
{
    /// O objeto de transferência exposto na API.
    type Dto: Serialize
        + DeserializeOwned
        + Validate
        + Debug
        + Clone
        + PartialEq
        + Send
        + Sync
        + From<Self>
        + Into<Self>
        + 'static;

    /// Nome público (rota `/api/{NAME}` e mensagens de erro).
    const NAME: &'static str;
    const TABLE: &'static str;
    /// Colunas mutáveis, na mesma ordem do `bind_columns` (sem `id` e `active`).
    const COLUMNS: &'static [&'static str];
    const JOINS: &'static [Join];

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);
    fn dto_id(dto: &Self::Dto) -> i32;

    /// Completa os campos omitidos no update com os valores já gravados.
    fn fill_unset_from(&mut self, stored: &Self);

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;
}

pub(crate) fn default_active() -> bool {
    true
}

// Precisão de microssegundos, a mesma do TIMESTAMPTZ do Postgres.
pub(crate) fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

// ---
// Validação Customizada
// ---
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("O campo é obrigatório.".into());
        return Err(err);
    }
    Ok(())
}

/// Declara uma entidade e o seu DTO a partir de uma única lista de campos.
///
/// Atributos nos campos (`#[validate(..)]`, `#[serde(..)]`) vão apenas para o DTO.
/// Os campos listados em `keep` (sempre `Option`) mantêm o valor gravado quando
/// o update chega com `None`.
macro_rules! define_entity {
    (
        $(#[$meta:meta])*
        $entity:ident / $dto:ident {
            name: $name:literal,
            table: $table:literal,
            joins: [$(($fk:literal => $parent:literal)),* $(,)?],
            $(keep: [$($keep:ident),* $(,)?],)?
            fields: {
                $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
            } $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
        pub struct $entity {
            pub id: i32,
            $( pub $field: $ty, )*
            pub active: bool,
        }

        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, validator::Validate)]
        #[serde(rename_all = "camelCase")]
        pub struct $dto {
            #[serde(default)]
            pub id: i32,
            $( $(#[$field_meta])* pub $field: $ty, )*
            #[serde(default = "crate::models::entity::default_active")]
            pub active: bool,
        }

        impl From<$dto> for $entity {
            fn from(dto: $dto) -> Self {
                Self {
                    id: dto.id,
                    $( $field: dto.$field, )*
                    active: dto.active,
                }
            }
        }

        impl From<$entity> for $dto {
            fn from(entity: $entity) -> Self {
                Self {
                    id: entity.id,
                    $( $field: entity.$field, )*
                    active: entity.active,
                }
            }
        }

        impl crate::models::entity::Entity for $entity {
            type Dto = $dto;

            const NAME: &'static str = $name;
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[$( stringify!($field) ),*];
            const JOINS: &'static [crate::models::entity::Join] = &[
                $( crate::models::entity::Join { column: $fk, table: $parent } ),*
            ];

            fn id(&self) -> i32 {
                self.id
            }

            fn set_id(&mut self, id: i32) {
                self.id = id;
            }

            fn is_active(&self) -> bool {
                self.active
            }

            fn set_active(&mut self, active: bool) {
                self.active = active;
            }

            fn dto_id(dto: &$dto) -> i32 {
                dto.id
            }

            #[allow(unused_variables)]
            fn fill_unset_from(&mut self, stored: &Self) {
                $($(
                    if self.$keep.is_none() {
                        self.$keep = stored.$keep.clone();
                    }
                )*)?
            }

            fn bind_columns<'q>(
                &'q self,
                query: crate::models::entity::PgQuery<'q>,
            ) -> crate::models::entity::PgQuery<'q> {
                query $( .bind(&self.$field) )*
            }
        }
    };
}

pub(crate) use define_entity;
