//! # Advertisement - classified adverts with image uploads
//!
//! An advert is a relational row plus one to seven image files on local
//! disk. The database and the filesystem share no transaction, so every
//! workflow that touches both runs the database step as the single commit
//! point and repairs the filesystem around it:
//!
//! - create writes image files first, inserts rows in one transaction, and
//!   deletes the files it wrote when anything after the first write fails;
//! - delete soft-deletes rows in one transaction and only then removes files.
//!
//! ## Architecture Layers
//!
//! - **Domain**: entities, value objects, validation rules
//! - **Application**: use cases, ports (interfaces), compensation
//! - **Infrastructure**: Postgres repositories, filesystem image store, credentials
//! - **API**: axum handlers and middleware

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
