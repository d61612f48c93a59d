//! Services: generic CRUD over the gateway.

mod crud;
pub use crud::CrudService;
