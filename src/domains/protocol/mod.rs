//! Gateway protocol: request parsing, dispatch, filters, and the response
//! envelope.

pub mod envelope;
pub mod error;
pub mod filter;
pub mod request;
pub mod router;

pub use envelope::{Envelope, Pagination, Reply};
pub use error::ApiError;
pub use filter::{FilterClause, FilterOp, FilterValue, QueryFilter};
pub use request::{IncomingRequest, RawRequest};
pub use router::dispatch;
