//! Coordinator configuration.
//!
//! Every field has a default, so a JSON document only needs to name what it
//! overrides:
//!
//! ```rust
//! use canopy_pager::config::CoordinatorConfig;
//!
//! let cfg = CoordinatorConfig::from_json(r#"{ "header": { "expanded_height": 240.0 } }"#).unwrap();
//! assert_eq!(cfg.header.expanded_height, 240.0);
//! assert_eq!(cfg.header.collapsed_height, 44.0);
//! ```

use canopy_core::{AnimationSpec, ConfigError, Easing};
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Height bounds of the header, excluding the safe area above it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub expanded_height: f32,
    pub collapsed_height: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            expanded_height: 180.0,
            collapsed_height: 44.0,
        }
    }
}

impl HeaderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (collapsed, expanded) = (self.collapsed_height, self.expanded_height);
        if collapsed.is_nan() || expanded.is_nan() || collapsed < 0.0 || expanded < 0.0 {
            return Err(ConfigError::NegativeHeaderHeight {
                collapsed,
                expanded,
            });
        }
        if collapsed > expanded {
            return Err(ConfigError::InvertedHeaderBounds {
                collapsed,
                expanded,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Fraction of the viewport width a released drag must cover to complete
    /// the page turn.
    pub swipe_threshold: f32,
    pub transition_ms: u64,
    pub easing: Easing,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 0.5,
            transition_ms: 300,
            easing: Easing::EaseOut,
        }
    }
}

impl PagerConfig {
    pub fn transition_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(Duration::from_millis(self.transition_ms), self.easing)
    }
}

/// How a page's offset is corrected when it is about to become visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Snap to the header's bottom edge when the offset lies above
    /// `-max_y` or below `+max_y`.
    #[default]
    ClampBothDirections,
    /// Snap only when the page would ask for a taller header than shown.
    SnapIfTaller,
    /// Snap whenever the header extent implied by the page differs from the
    /// displayed one.
    MatchHeaderExtent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub item_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub header: HeaderConfig,
    pub pager: PagerConfig,
    pub reconcile: ReconcilePolicy,
    pub row_height: f32,
    pub refresh_delay_ms: u64,
    pub pages: Vec<PageSpec>,
    pub initial_page: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            header: HeaderConfig::default(),
            pager: PagerConfig::default(),
            reconcile: ReconcilePolicy::default(),
            row_height: 44.0,
            refresh_delay_ms: 2000,
            pages: [200, 5, 60]
                .into_iter()
                .map(|item_count| PageSpec { item_count })
                .collect(),
            initial_page: 1,
        }
    }
}

impl CoordinatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.header.validate()?;
        if self.pages.is_empty() {
            return Err(ConfigError::NoPages);
        }
        if self.initial_page >= self.pages.len() {
            return Err(ConfigError::InitialPageOutOfRange {
                index: self.initial_page,
                count: self.pages.len(),
            });
        }
        if self.row_height.is_nan() || self.row_height <= 0.0 {
            return Err(ConfigError::InvalidRowHeight(self.row_height));
        }
        let threshold = self.pager.swipe_threshold;
        if threshold.is_nan() || threshold <= 0.0 || threshold > 1.0 {
            return Err(ConfigError::InvalidSwipeThreshold(threshold));
        }
        Ok(())
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}
