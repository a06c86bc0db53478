//! User administration and self-service profile operations

mod service;


pub use service::UserService;
