//! Aggregation core - domain model and pure services
//!
//! Everything here is transient value state: identifiers, records and
//! verdicts created and discarded within a single poll or resolve
//! invocation. The I/O-driving engines live in `application`.

pub mod domain;
pub mod services;
