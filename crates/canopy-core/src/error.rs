use thiserror::Error;

/// Rejected configuration. Runtime operations never fail; everything that can
/// go wrong is caught when a coordinator is built.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("header heights must be non-negative (collapsed {collapsed}, expanded {expanded})")]
    NegativeHeaderHeight { collapsed: f32, expanded: f32 },

    #[error("collapsed header height {collapsed} exceeds expanded height {expanded}")]
    InvertedHeaderBounds { collapsed: f32, expanded: f32 },

    #[error("at least one page is required")]
    NoPages,

    #[error("initial page {index} is out of range for {count} pages")]
    InitialPageOutOfRange { index: usize, count: usize },

    #[error("row height must be positive, got {0}")]
    InvalidRowHeight(f32),

    #[error("swipe threshold must be within (0, 1], got {0}")]
    InvalidSwipeThreshold(f32),

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
