//! # Core primitives
//!
//! Canopy's coordination layer is built from a handful of small,
//! single-threaded primitives:
//!
//! - `Signal<T>`: observable value; `subscribe` hands back a
//!   `Subscription` that unsubscribes when dropped.
//! - `AnimatedValue<T>`: a value easing towards a target, read against the
//!   per-thread frame clock.
//! - Geometry (`Vec2`, `Size`, `Rect`, `EdgeInsets`) in logical pixels, with
//!   y growing downwards.
//!
//! ## Signals
//!
//! ```rust
//! use canopy_core::*;
//!
//! let height = signal(180.0f32);
//! let sub = height.subscribe(|h| assert!(*h >= 0.0));
//! height.set(120.0);
//! drop(sub); // no more callbacks
//! assert_eq!(height.get(), 120.0);
//! ```
//!
//! Subscriptions are the way observers hold on to an observable they do not
//! own. Keep the `Subscription` next to whatever the callback refers to, and
//! let it drop with it.
//!
//! ## Deterministic time
//!
//! Animations read `animation::now()`. The platform leaves the system clock in
//! place; tests install a `TestClock` and advance it by hand:
//!
//! ```rust
//! use canopy_core::*;
//! use web_time::Duration;
//!
//! let clock = TestClock::install();
//! let mut v = AnimatedValue::new(0.0f32, AnimationSpec::tween(Duration::from_millis(100), Easing::Linear));
//! v.set_target(1.0);
//! clock.advance(Duration::from_millis(50));
//! v.update();
//! assert!((*v.get() - 0.5).abs() < 1e-4);
//! ```

pub mod animation;
pub mod error;
pub mod geometry;
pub mod prelude;
pub mod signal;
pub mod tests;

pub use animation::*;
pub use error::*;
pub use geometry::*;
pub use signal::*;
