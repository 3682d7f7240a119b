mod flags;
mod resolve;

pub use flags::RouteFlags;
pub use resolve::Route;
