// Core modules implementing option resolution, request execution, and error modeling.
pub mod error;
pub mod options;
pub mod request;
pub mod transport;
