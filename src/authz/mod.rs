//! Header authorization core.
//!
//! # Data Flow
//! ```text
//! host request headers
//!     → request.rs (AuthorizationRequest, name → value)
//!     → authorizer.rs (required header lookup + allow-list test)
//!     → decision.rs (CheckOutcome → AuthorizationDecision)
//!     → back to host, extra headers spliced upstream on allow
//! ```
//!
//! # Design Decisions
//! - The decision is a pure function of (headers, config)
//! - Config is immutable and shared via Arc across all calls
//! - Header names and values compare exactly: no case folding, no trimming
//! - Missing header and wrong value both deny; they differ only in what gets logged

pub mod authorizer;
pub mod decision;
pub mod request;

pub use authorizer::{AuthorizerConfig, HeaderAuthorizer, MATCHED_ALLOWED_HEADERS};
pub use decision::{AuthorizationDecision, CheckOutcome, HeaderValueOption};
pub use request::AuthorizationRequest;
