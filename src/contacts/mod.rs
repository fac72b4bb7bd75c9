//! Contact management subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (business rules, id assignment, queries)
//!     → validation.rs (name/email/phone shape checks)
//!     → storage (whole collection loaded, mutated, saved back)
//! ```
//!
//! # Design Decisions
//! - No cross-call caching: every operation reloads the collection
//! - Every load/mutate/save sequence runs under one lock
//! - Email and phone are optional; an empty string means "absent"

pub mod service;
pub mod types;
pub mod validation;

pub use service::ContactService;
pub use types::{Contact, ContactError, ContactResult, ContactSummary, ValidationError};
pub use validation::validate_contact;
