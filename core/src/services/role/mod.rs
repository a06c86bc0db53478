//! Role catalog and role assignment

mod service;


pub use service::RoleService;
