pub mod entity;
pub mod activity;
pub mod auth;
pub mod inventory;
pub mod rbac;
pub mod tenancy;

pub use entity::Entity;
