pub use crate::animation::{AnimatedValue, AnimationSpec, Clock, Easing, TestClock, set_clock};
pub use crate::error::ConfigError;
pub use crate::geometry::{EdgeInsets, Rect, Size, Vec2};
pub use crate::signal::{Signal, Subscription, signal};
