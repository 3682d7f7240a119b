use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RouteFlags: u8 {
        /// The template must consume the whole remaining path.
        const EXACT = 1 << 0;
        /// Render only when the template does not match.
        const NOT_MATCHING = 1 << 1;
    }
}
