mod link;
mod navigator;
mod request;

pub use link::{DEFAULT_CURRENT_CLASS, Link, ResolvedLink, resolve_href};
pub use navigator::{Listener, Navigator, RenderGuard};
pub use request::{Location, NavigateOptions, NavigationRequest};
