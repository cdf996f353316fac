pub mod request_id;

pub use request_id::{request_id_middleware, CorrelationId, X_REQUEST_ID};
