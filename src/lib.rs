//! Nested client-side routing.
//!
//! Templates such as `/hello/:world` are compiled once and matched against
//! the part of the URL that enclosing routes have not consumed yet. Every
//! level produces a fresh [`MatchContext`] for its children, reports its
//! outcome into a [`SubrouteTree`](subroute::SubrouteTree), and can navigate
//! through the single [`Navigator`] that owns the history resource.

pub mod context;
pub mod errors;
pub mod history;
pub mod navigation;
pub mod pattern;
pub mod query;
pub mod render;
pub mod route;
pub mod router;
pub mod subroute;
pub mod types;

pub use context::{MatchContext, NamedMatch};
pub use errors::{RouterError, RouterResult};
pub use history::{History, HistorySubscription, MemoryHistory};
pub use navigation::{Link, Location, NavigateOptions, NavigationRequest, Navigator};
pub use render::{Element, RenderOutcome, render};
pub use route::{Route, RouteFlags};
pub use router::{Router, RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use subroute::{SubrouteData, is_not_found};
pub use types::{QueryMap, RouteParams};
