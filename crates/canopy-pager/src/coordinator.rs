//! # Coordinator
//!
//! Ties one [`HeaderSurface`] to a [`Pager`] full of [`ContentPage`]s:
//!
//! - the active page's scroll offset drives the header extent;
//! - every loaded page reserves the header's expanded height (plus the safe
//!   area) as top inset, and enough bottom inset to collapse the header even
//!   when its content is short;
//! - a page about to be shown has its offset pulled in line with the header
//!   that is currently visible, so nothing jumps when it takes over;
//! - only the visible page's pan gesture is attached to the container.
//!
//! Pages and the pager talk back through `Weak` observers, so the
//! coordinator can be dropped at any time. Content-size subscriptions are
//! released on drop as well.
//!
//! ```rust
//! use canopy_core::{EdgeInsets, Size};
//! use canopy_pager::{Coordinator, CoordinatorConfig};
//!
//! let coordinator = Coordinator::new(CoordinatorConfig::default()).unwrap();
//! coordinator.layout(Size::new(390.0, 844.0));
//! coordinator.set_safe_area(EdgeInsets::top(47.0));
//!
//! coordinator.pan(canopy_core::Vec2::new(0.0, 40.0));
//! assert_eq!(coordinator.header().extent(), 140.0);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use canopy_core::*;
use slotmap::SecondaryMap;

use crate::config::{CoordinatorConfig, ReconcilePolicy};
use crate::gestures::GestureHost;
use crate::header::{HeaderSurface, header_extent};
use crate::page::{ContentPage, PageId, PageLifecycleObserver, ScrollAxes, ScrollObserver};
use crate::pager::{Direction, Pager, TransitionObserver};

/// Bottom inset that lets content of `content_height` scroll far enough to
/// collapse the header inside a viewport of `viewport_height`.
pub fn bottom_inset(
    viewport_height: f32,
    collapsed_height: f32,
    safe_top: f32,
    content_height: f32,
) -> f32 {
    ((viewport_height - (collapsed_height + safe_top)) - content_height).max(0.0)
}

pub struct Coordinator {
    inner: Rc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: CoordinatorConfig,
    header: HeaderSurface,
    pager: Pager,
    gestures: GestureHost,
    safe_area: Cell<EdgeInsets>,
    content_size_subs: RefCell<SecondaryMap<PageId, Subscription>>,
    this: Weak<CoordinatorInner>,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut pager = Pager::new(config.pager);
        let ids: Vec<PageId> = config
            .pages
            .iter()
            .map(|spec| {
                pager.push(|id| {
                    ContentPage::new(id, spec.item_count, config.row_height)
                        .with_refresh_delay(config.refresh_delay())
                })
            })
            .collect();
        let initial = ids
            .get(config.initial_page)
            .copied()
            .ok_or(ConfigError::InitialPageOutOfRange {
                index: config.initial_page,
                count: ids.len(),
            })?;

        let inner = Rc::new_cyclic(|this| CoordinatorInner {
            header: HeaderSurface::new(config.header),
            config,
            pager,
            gestures: GestureHost::new(),
            safe_area: Cell::new(EdgeInsets::ZERO),
            content_size_subs: RefCell::new(SecondaryMap::new()),
            this: this.clone(),
        });

        let scroll: Weak<dyn ScrollObserver> = Rc::<CoordinatorInner>::downgrade(&inner);
        let lifecycle: Weak<dyn PageLifecycleObserver> = Rc::<CoordinatorInner>::downgrade(&inner);
        let transitions: Weak<dyn TransitionObserver> = Rc::<CoordinatorInner>::downgrade(&inner);
        for page in inner.pager.pages() {
            page.set_scroll_observer(scroll.clone());
            page.set_lifecycle_observer(lifecycle.clone());
        }
        inner.pager.set_observer(transitions);

        inner.pager.set_active(initial);
        inner.update_gesture_ownership();
        log::debug!(
            "coordinator ready: {} pages, initial {}",
            inner.pager.len(),
            inner.config.initial_page
        );

        Ok(Self { inner })
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    pub fn header(&self) -> &HeaderSurface {
        &self.inner.header
    }

    pub fn pager(&self) -> &Pager {
        &self.inner.pager
    }

    pub fn gestures(&self) -> &GestureHost {
        &self.inner.gestures
    }

    pub fn safe_area(&self) -> EdgeInsets {
        self.inner.safe_area.get()
    }

    pub fn page(&self, id: PageId) -> Option<Rc<ContentPage>> {
        self.inner.pager.page(id)
    }

    pub fn page_ids(&self) -> &[PageId] {
        self.inner.pager.page_ids()
    }

    pub fn active_page(&self) -> Option<Rc<ContentPage>> {
        self.inner.pager.active_page()
    }

    /// The container was laid out at `size`.
    pub fn layout(&self, size: Size) {
        let inner = &self.inner;
        inner.pager.set_viewport(size);
        inner.header.set_width(size.width);
        inner.update_bottom_insets(None);
    }

    /// The environment's safe area changed, e.g. on rotation.
    pub fn set_safe_area(&self, insets: EdgeInsets) {
        self.inner.set_safe_area(insets);
    }

    /// Route a pan delta (offset space) to the page owning the container's
    /// pan gesture; horizontal leftover drives the pager. Returns what nobody
    /// consumed.
    ///
    /// Once a page turn has started the gesture is locked to the horizontal
    /// axis: vertical motion is handed back until the turn settles.
    pub fn pan(&self, delta: Vec2) -> Vec2 {
        let inner = &self.inner;
        if inner.pager.is_transitioning() {
            let x = if inner.pager.drag_by(delta.x) { 0.0 } else { delta.x };
            return Vec2::new(x, delta.y);
        }
        let target = inner.gestures.owner().and_then(|id| inner.pager.page(id));
        let leftover = match target {
            Some(page) => page.scroll_by(delta),
            None => delta,
        };
        if leftover.x != 0.0 && inner.pager.drag_by(leftover.x) {
            Vec2::new(0.0, leftover.y)
        } else {
            leftover
        }
    }

    pub fn end_pan(&self) {
        self.inner.pager.release();
    }

    pub fn navigate(&self, direction: Direction) -> bool {
        self.inner.pager.navigate(direction)
    }

    /// Show `id` immediately, keeping the header steady.
    pub fn show_page(&self, id: PageId) -> bool {
        let inner = &self.inner;
        if inner.pager.active() == Some(id) {
            return true;
        }
        if inner.pager.is_transitioning() {
            return false;
        }
        let Some(page) = inner.pager.load(id) else {
            log::warn!("show_page: unknown page {id:?}");
            return false;
        };
        inner.reconcile_offset(&page);
        if !inner.pager.set_active(id) {
            return false;
        }
        inner.update_gesture_ownership();
        true
    }

    /// Advance animations and timers. Returns true while another frame is
    /// needed.
    pub fn tick(&self) -> bool {
        let mut animating = self.inner.pager.tick();
        // A refresh can begin before its page is ever shown.
        for page in self.inner.pager.pages() {
            animating |= page.refresh_control().tick();
        }
        animating
    }

    /// Live content-size subscriptions, one per loaded page.
    pub fn subscription_count(&self) -> usize {
        self.inner.content_size_subs.borrow().len()
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        let subs = std::mem::take(&mut *self.inner.content_size_subs.borrow_mut());
        log::debug!("coordinator teardown: releasing {} subscriptions", subs.len());
        drop(subs);
    }
}

impl CoordinatorInner {
    fn safe_top(&self) -> f32 {
        self.safe_area.get().top
    }

    /// Top inset every page keeps at rest, whatever the header shows.
    fn top_inset(&self) -> f32 {
        self.config.header.expanded_height + self.safe_top()
    }

    fn extent_for(&self, offset_y: f32) -> f32 {
        header_extent(&self.config.header, offset_y, self.safe_top())
    }

    fn update_bottom_insets(&self, only: Option<PageId>) {
        let collapsed = self.config.header.collapsed_height;
        let safe_top = self.safe_top();
        for page in self.pager.loaded_pages() {
            if only.is_some_and(|id| id != page.id()) {
                continue;
            }
            let bottom = bottom_inset(
                page.viewport().height,
                collapsed,
                safe_top,
                page.content_size().height,
            );
            page.set_content_inset(page.content_inset().with_bottom(bottom));
        }
    }

    fn set_safe_area(&self, insets: EdgeInsets) {
        let previous = self.safe_area.replace(insets);
        if previous == insets {
            return;
        }
        log::debug!("safe area top {} -> {}", previous.top, insets.top);
        self.header.set_safe_area_top(insets.top);

        let top = self.top_inset();
        for page in self.pager.loaded_pages() {
            let was_at_rest = page.is_at_rest_top();
            page.set_content_inset(page.content_inset().with_top(top));
            page.set_scroll_indicator_inset(page.scroll_indicator_inset().with_top(top));
            if was_at_rest {
                page.set_offset(Vec2::new(page.offset().x, -top));
            }
        }

        self.update_bottom_insets(None);
        self.sync_header_to_active();
    }

    fn sync_header_to_active(&self) {
        if let Some(page) = self.pager.active_page() {
            self.header.set_height(self.extent_for(page.offset().y));
        }
    }

    /// Pull `page`'s offset in line with the header currently on screen.
    fn reconcile_offset(&self, page: &ContentPage) {
        let max_y = self.header.max_y();
        let y = page.offset().y;
        let snap = match self.config.reconcile {
            ReconcilePolicy::ClampBothDirections => y < -max_y || y > max_y,
            ReconcilePolicy::SnapIfTaller => y < -max_y,
            ReconcilePolicy::MatchHeaderExtent => self.extent_for(y) != self.header.extent(),
        };
        if snap {
            log::debug!("page {:?}: offset {y} -> {} to match header", page.id(), -max_y);
            page.set_offset(Vec2::new(page.offset().x, -max_y));
        }
    }

    fn update_gesture_ownership(&self) {
        let active = self.pager.active();
        for page in self.pager.loaded_pages() {
            if Some(page.id()) == active {
                self.gestures.attach(page);
            } else {
                self.gestures.detach(page);
            }
        }
        log::debug!("pan gesture now owned by {active:?}");
    }
}

impl ScrollObserver for CoordinatorInner {
    fn page_did_scroll(&self, page: &ContentPage) {
        // Offset corrections on pages that are not on screen must not move
        // the header.
        if self.pager.active() != Some(page.id()) {
            return;
        }
        let extent = self.extent_for(page.offset().y);
        log::trace!("page {:?} at {} -> header {extent}", page.id(), page.offset().y);
        self.header.set_height(extent);
    }
}

impl PageLifecycleObserver for CoordinatorInner {
    fn page_did_load(&self, page: &ContentPage) {
        let top = self.top_inset();
        page.set_content_inset(page.content_inset().with_top(top));
        page.set_scroll_indicator_inset(page.scroll_indicator_inset().with_top(top));
        page.set_offset(Vec2::new(page.offset().x, -top));
        page.set_allowed_axes(ScrollAxes::VERTICAL);

        let this = self.this.clone();
        let id = page.id();
        let sub = page.content_size_signal().subscribe(move |_| {
            if let Some(coordinator) = this.upgrade() {
                coordinator.update_bottom_insets(Some(id));
            }
        });
        self.content_size_subs.borrow_mut().insert(id, sub);
        self.update_bottom_insets(Some(id));
    }
}

impl TransitionObserver for CoordinatorInner {
    fn will_transition_to(&self, page: PageId) {
        match self.pager.page(page) {
            Some(page) => self.reconcile_offset(&page),
            None => log::warn!("transition to unknown page {page:?}"),
        }
    }

    fn did_finish_transition(&self, completed: bool) {
        log::debug!("transition finished (completed: {completed})");
        self.update_gesture_ownership();
    }
}
