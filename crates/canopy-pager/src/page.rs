//! # Content pages
//!
//! A `ContentPage` is one vertically scrolling list inside the pager. It
//! keeps its own scroll geometry and knows nothing about the header: it only
//! reports what happens to it.
//!
//! - Scroll offset changes go to the registered [`ScrollObserver`], for user
//!   scrolling and programmatic writes alike.
//! - Content size lives in an observable `Signal<Size>`; anything that needs
//!   to react to it subscribes and keeps the returned `Subscription`.
//! - The first [`ContentPage::load`] reports to the [`PageLifecycleObserver`].
//!
//! Offsets follow the usual scroll-view convention: `offset.y == 0` puts the
//! top of the content at the top of the viewport, and a negative `offset.y`
//! reveals inset space above the content. At rest below a header of height
//! `h` the offset is `-h`.

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use bitflags::bitflags;
use canopy_core::*;
use web_time::Duration;

use crate::gestures::PanGesture;
use crate::refresh::RefreshControl;

slotmap::new_key_type! {
    /// Stable identity of a page inside its pager.
    pub struct PageId;
}

bitflags! {
    /// Axes a page is allowed to scroll along.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ScrollAxes: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL   = 0b10;
    }
}

/// Receives scroll-offset changes.
pub trait ScrollObserver {
    fn page_did_scroll(&self, page: &ContentPage);
}

/// Receives one-time page setup notifications.
pub trait PageLifecycleObserver {
    fn page_did_load(&self, page: &ContentPage);
}

pub struct ContentPage {
    id: PageId,
    item_count: Cell<usize>,
    row_height: f32,

    offset: Cell<Vec2>,
    content_size: Signal<Size>,
    viewport: Cell<Size>,
    content_inset: Cell<EdgeInsets>,
    indicator_inset: Cell<EdgeInsets>,
    axes: Cell<ScrollAxes>,
    loaded: Cell<bool>,

    pan: PanGesture,
    refresh: RefreshControl,

    scroll_observer: RefCell<Option<Weak<dyn ScrollObserver>>>,
    lifecycle_observer: RefCell<Option<Weak<dyn PageLifecycleObserver>>>,
}

impl ContentPage {
    pub fn new(id: PageId, item_count: usize, row_height: f32) -> Self {
        Self {
            id,
            item_count: Cell::new(item_count),
            row_height,
            offset: Cell::new(Vec2::ZERO),
            content_size: signal(Size::new(0.0, item_count as f32 * row_height)),
            viewport: Cell::new(Size::default()),
            content_inset: Cell::new(EdgeInsets::ZERO),
            indicator_inset: Cell::new(EdgeInsets::ZERO),
            axes: Cell::new(ScrollAxes::all()),
            loaded: Cell::new(false),
            pan: PanGesture::new(),
            refresh: RefreshControl::new(Duration::from_secs(2)),
            scroll_observer: RefCell::new(None),
            lifecycle_observer: RefCell::new(None),
        }
    }

    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh = RefreshControl::new(delay);
        self
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn set_scroll_observer(&self, observer: Weak<dyn ScrollObserver>) {
        *self.scroll_observer.borrow_mut() = Some(observer);
    }

    pub fn set_lifecycle_observer(&self, observer: Weak<dyn PageLifecycleObserver>) {
        *self.lifecycle_observer.borrow_mut() = Some(observer);
    }

    /// Load the page on first use. Later calls are no-ops.
    pub fn load(&self) -> bool {
        if self.loaded.replace(true) {
            return false;
        }
        log::debug!("page {:?} loaded ({} items)", self.id, self.item_count.get());
        let observer = self
            .lifecycle_observer
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade);
        if let Some(observer) = observer {
            observer.page_did_load(self);
        }
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub fn item_count(&self) -> usize {
        self.item_count.get()
    }

    pub fn set_item_count(&self, count: usize) {
        self.item_count.set(count);
        self.update_content_size();
    }

    pub fn offset(&self) -> Vec2 {
        self.offset.get()
    }

    /// Programmatic offset write. Not clamped; observers are notified.
    pub fn set_offset(&self, offset: Vec2) {
        self.offset.set(offset);
        let observer = self.scroll_observer.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(observer) = observer {
            observer.page_did_scroll(self);
        }
    }

    pub fn content_size(&self) -> Size {
        self.content_size.get()
    }

    /// Observable content size, for subscribers that react to size changes.
    pub fn content_size_signal(&self) -> &Signal<Size> {
        &self.content_size
    }

    pub fn viewport(&self) -> Size {
        self.viewport.get()
    }

    pub fn set_viewport(&self, size: Size) {
        self.viewport.set(Size::new(size.width.max(0.0), size.height.max(0.0)));
        self.update_content_size();
    }

    pub fn content_inset(&self) -> EdgeInsets {
        self.content_inset.get()
    }

    pub fn set_content_inset(&self, insets: EdgeInsets) {
        self.content_inset.set(insets);
    }

    pub fn scroll_indicator_inset(&self) -> EdgeInsets {
        self.indicator_inset.get()
    }

    pub fn set_scroll_indicator_inset(&self, insets: EdgeInsets) {
        self.indicator_inset.set(insets);
    }

    pub fn allowed_axes(&self) -> ScrollAxes {
        self.axes.get()
    }

    pub fn set_allowed_axes(&self, axes: ScrollAxes) {
        self.axes.set(axes);
    }

    pub fn pan(&self) -> &PanGesture {
        &self.pan
    }

    pub fn refresh_control(&self) -> &RefreshControl {
        &self.refresh
    }

    /// Start the pull-to-refresh indicator.
    pub fn refresh(&self) -> bool {
        self.refresh.begin()
    }

    /// `true` when the content top sits exactly at the top inset.
    pub fn is_at_rest_top(&self) -> bool {
        self.offset.get().y == -self.content_inset.get().top
    }

    /// Vertical offset range `(min, max)` given the current insets.
    pub fn vertical_range(&self) -> (f32, f32) {
        let inset = self.content_inset.get();
        let min = -inset.top;
        let max = self.content_size.get().height + inset.bottom - self.viewport.get().height;
        (min, max.max(min))
    }

    /// Horizontal offset range `(min, max)` given the current insets.
    pub fn horizontal_range(&self) -> (f32, f32) {
        let inset = self.content_inset.get();
        let min = -inset.left;
        let max = self.content_size.get().width + inset.right - self.viewport.get().width;
        (min, max.max(min))
    }

    /// Consume a user scroll delta (offset space), clamp to bounds and return
    /// the leftover for the enclosing container.
    pub fn scroll_by(&self, delta: Vec2) -> Vec2 {
        let axes = self.axes.get();
        let before = self.offset.get();
        let mut next = before;

        if axes.contains(ScrollAxes::VERTICAL) {
            let (min, max) = self.vertical_range();
            next.y = (before.y + delta.y).clamp(min, max);
        }
        if axes.contains(ScrollAxes::HORIZONTAL) {
            let (min, max) = self.horizontal_range();
            next.x = (before.x + delta.x).clamp(min, max);
        }

        if next != before {
            self.set_offset(next);
        }
        delta - (next - before)
    }

    fn update_content_size(&self) {
        let size = Size::new(
            self.viewport.get().width,
            self.item_count.get() as f32 * self.row_height,
        );
        self.content_size.set_if_changed(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;
    use std::rc::Rc;

    fn page(items: usize) -> ContentPage {
        let mut ids: SlotMap<PageId, ()> = SlotMap::with_key();
        ContentPage::new(ids.insert(()), items, 10.0)
    }

    #[derive(Default)]
    struct Recorder {
        scrolls: RefCell<Vec<f32>>,
        loads: Cell<usize>,
    }

    impl ScrollObserver for Recorder {
        fn page_did_scroll(&self, page: &ContentPage) {
            self.scrolls.borrow_mut().push(page.offset().y);
        }
    }

    impl PageLifecycleObserver for Recorder {
        fn page_did_load(&self, _page: &ContentPage) {
            self.loads.set(self.loads.get() + 1);
        }
    }

    #[test]
    fn test_content_size_follows_items_and_viewport() {
        let p = page(5);
        assert_eq!(p.content_size(), Size::new(0.0, 50.0));

        p.set_viewport(Size::new(320.0, 480.0));
        assert_eq!(p.content_size(), Size::new(320.0, 50.0));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = p
            .content_size_signal()
            .subscribe(move |s| seen_clone.borrow_mut().push(s.height));
        p.set_item_count(8);
        p.set_viewport(Size::new(320.0, 480.0)); // unchanged, no event
        assert_eq!(*seen.borrow(), vec![80.0]);
    }

    #[test]
    fn test_load_notifies_once() {
        let p = page(1);
        let rec = Rc::new(Recorder::default());
        let weak: Weak<dyn PageLifecycleObserver> = Rc::<Recorder>::downgrade(&rec);
        p.set_lifecycle_observer(weak);

        assert!(p.load());
        assert!(!p.load());
        assert!(p.is_loaded());
        assert_eq!(rec.loads.get(), 1);
    }

    #[test]
    fn test_scroll_by_clamps_and_returns_leftover() {
        let p = page(100); // 1000 tall
        p.set_viewport(Size::new(300.0, 400.0));
        p.set_content_inset(EdgeInsets::top(100.0));
        p.set_allowed_axes(ScrollAxes::VERTICAL);
        p.set_offset(Vec2::new(0.0, -100.0));

        let left = p.scroll_by(Vec2::new(12.0, 50.0));
        assert_eq!(p.offset(), Vec2::new(0.0, -50.0));
        // Horizontal motion is locked out and handed back whole.
        assert_eq!(left, Vec2::new(12.0, 0.0));

        let left = p.scroll_by(Vec2::new(0.0, -80.0));
        assert_eq!(p.offset().y, -100.0);
        assert_eq!(left.y, -30.0);

        let left = p.scroll_by(Vec2::new(0.0, 1000.0));
        assert_eq!(p.offset().y, 600.0);
        assert_eq!(left.y, 300.0);
    }

    #[test]
    fn test_short_content_range_uses_bottom_inset() {
        let p = page(2); // 20 tall
        p.set_viewport(Size::new(300.0, 400.0));
        p.set_content_inset(EdgeInsets::top(100.0));
        assert_eq!(p.vertical_range(), (-100.0, -100.0));

        p.set_content_inset(EdgeInsets::top(100.0).with_bottom(330.0));
        assert_eq!(p.vertical_range(), (-100.0, -50.0));
    }

    #[test]
    fn test_scroll_observer_sees_user_and_programmatic_changes() {
        let p = page(100);
        p.set_viewport(Size::new(300.0, 400.0));
        let rec = Rc::new(Recorder::default());
        let weak: Weak<dyn ScrollObserver> = Rc::<Recorder>::downgrade(&rec);
        p.set_scroll_observer(weak);

        p.set_offset(Vec2::new(0.0, 10.0));
        p.scroll_by(Vec2::new(0.0, 5.0));
        p.scroll_by(Vec2::new(0.0, -100.0)); // clamps to 0
        p.scroll_by(Vec2::new(0.0, -5.0)); // already at min: no event
        assert_eq!(*rec.scrolls.borrow(), vec![10.0, 15.0, 0.0]);
    }

    #[test]
    fn test_dropped_observer_is_skipped() {
        let p = page(1);
        {
            let rec = Rc::new(Recorder::default());
            let weak: Weak<dyn ScrollObserver> = Rc::<Recorder>::downgrade(&rec);
            p.set_scroll_observer(weak);
        }
        p.set_offset(Vec2::new(0.0, 1.0));
        assert_eq!(p.offset().y, 1.0);
    }

    #[test]
    fn test_rest_top() {
        let p = page(1);
        p.set_content_inset(EdgeInsets::top(64.0));
        p.set_offset(Vec2::new(0.0, -64.0));
        assert!(p.is_at_rest_top());
        p.set_offset(Vec2::new(0.0, -63.0));
        assert!(!p.is_at_rest_top());
    }
}
