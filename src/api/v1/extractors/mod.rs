mod csrf_request;

pub use csrf_request::{CsrfRequest, csrf_input_from_parts, query_value};
