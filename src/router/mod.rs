mod options;
mod service;

pub use options::{RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use service::Router;
pub(crate) use service::RouterShared;
