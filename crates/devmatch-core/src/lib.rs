//! Domain model and gateway seam for the devmatch feed engine.
//!
//! This crate holds the pieces with no I/O of their own: the candidate and
//! identity records exchanged with the backend, the ordered-unique candidate
//! queue, the random selection policy, field validation for the auth and
//! profile forms, and the [`MatchGateway`] trait that the HTTP client
//! implements and the engine consumes.

pub mod error;
pub mod model;
pub mod queue;
pub mod select;
pub mod service;
pub mod validate;

pub use error::{GatewayError, GatewayResult};
pub use model::{
    Candidate, Credentials, Decision, FetchStatus, Gender, Identity, ImageUpload, PageCursor,
    ProfileId, ProfileUpdate, Registration,
};
pub use queue::CandidateQueue;
pub use select::select_next;
pub use service::MatchGateway;
pub use validate::{FieldError, ValidationResult};
