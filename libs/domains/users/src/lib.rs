//! Users Domain
//!
//! Account management for the sharing service: every item owner, booker and
//! commenter is a `User`. Emails are unique across the system.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{CreateUser, UpdateUser, User};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
