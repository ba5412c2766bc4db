pub mod crud_service;

pub use crud_service::CrudService;
