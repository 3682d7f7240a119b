mod match_context;

pub use match_context::{MatchContext, NamedMatch};
