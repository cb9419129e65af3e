//! Collapsible header over a horizontal pager of scrolling lists.
//!
//! The crate is headless: a host toolkit feeds layout, safe-area, pan and
//! frame events into a [`Coordinator`] and draws whatever the header, pages
//! and gesture host report back.
//!
//! - [`page`]: one vertically scrolling list and its observer traits.
//! - [`header`]: the header surface and the offset → extent mapping.
//! - [`pager`]: ordered pages, page turns and transition events.
//! - [`gestures`]: which page's pan gesture sits on the container.
//! - [`refresh`]: the self-ending pull-to-refresh indicator.
//! - [`coordinator`]: keeps all of the above consistent.

pub mod config;
pub mod coordinator;
pub mod gestures;
pub mod header;
pub mod page;
pub mod pager;
pub mod refresh;

pub use config::{CoordinatorConfig, HeaderConfig, PageSpec, PagerConfig, ReconcilePolicy};
pub use coordinator::{Coordinator, bottom_inset};
pub use gestures::{GestureHost, GestureOwner, PanGesture};
pub use header::{HeaderSurface, header_extent};
pub use page::{ContentPage, PageId, PageLifecycleObserver, ScrollAxes, ScrollObserver};
pub use pager::{Direction, PageNavigationSource, Pager, Transition, TransitionObserver};
pub use refresh::RefreshControl;
