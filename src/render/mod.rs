//! Binds route resolution to a declarative element tree.
//!
//! A pass threads [`MatchContext`](crate::context::MatchContext) explicitly
//! from parent to child and defers navigation until the pass is over.

mod element;
mod pass;

pub use element::{ContentFn, Element};
pub use pass::{RenderOutcome, render};
