//! Result type aliases

use crate::error::{QueryError, TwError};

/// Standard Result type for Tenderwatch operations
pub type TwResult<T> = Result<T, TwError>;

/// Result of building or running a query
pub type QueryResult<T> = Result<T, QueryError>;
