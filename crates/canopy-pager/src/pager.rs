//! # Horizontal pager
//!
//! `Pager` holds an ordered, fixed set of pages and shows one at a time.
//! Page turns happen in two ways:
//!
//! - Interactive: `drag_by` follows a horizontal drag and `release` decides
//!   whether the turn completes (the drag covered at least
//!   `swipe_threshold` of the viewport width) or springs back.
//! - Programmatic: `navigate` animates straight to the neighbouring page.
//!
//! Either way the [`TransitionObserver`] hears `will_transition_to` before
//! anything moves, and `did_finish_transition(completed)` once the animation
//! driven by `tick` settles. `set_active` switches without animation and
//! without events.
//!
//! Drag deltas are in offset space: positive moves towards the page after.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use canopy_core::*;
use slotmap::SlotMap;

use crate::config::PagerConfig;
use crate::page::{ContentPage, PageId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Before => -1.0,
            Direction::After => 1.0,
        }
    }
}

/// Answers "which page is next to this one".
pub trait PageNavigationSource {
    /// `None` at the first page or for a page this source does not know.
    fn page_before(&self, page: PageId) -> Option<PageId>;
    /// `None` at the last page or for a page this source does not know.
    fn page_after(&self, page: PageId) -> Option<PageId>;
}

pub trait TransitionObserver {
    fn will_transition_to(&self, page: PageId);
    fn did_finish_transition(&self, completed: bool);
}

/// Snapshot of a running page turn, for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub from: PageId,
    pub to: PageId,
    pub direction: Direction,
    /// 0 shows `from`, 1 shows `to`.
    pub progress: f32,
}

struct PendingTransition {
    from: PageId,
    to: PageId,
    direction: Direction,
    progress: AnimatedValue<f32>,
    /// `None` while the finger is down, then whether the turn completes.
    settle: Option<bool>,
}

pub struct Pager {
    pages: SlotMap<PageId, Rc<ContentPage>>,
    order: Vec<PageId>,
    active: Cell<Option<PageId>>,
    viewport: Cell<Size>,
    drag: Cell<f32>,
    transition: RefCell<Option<PendingTransition>>,
    config: PagerConfig,
    observer: RefCell<Option<Weak<dyn TransitionObserver>>>,
}

impl Pager {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            pages: SlotMap::with_key(),
            order: Vec::new(),
            active: Cell::new(None),
            viewport: Cell::new(Size::default()),
            drag: Cell::new(0.0),
            transition: RefCell::new(None),
            config,
            observer: RefCell::new(None),
        }
    }

    /// Append a page built by `make` for its freshly assigned id.
    pub fn push(&mut self, make: impl FnOnce(PageId) -> ContentPage) -> PageId {
        let id = self.pages.insert_with_key(|id| Rc::new(make(id)));
        self.order.push(id);
        id
    }

    pub fn set_observer(&self, observer: Weak<dyn TransitionObserver>) {
        *self.observer.borrow_mut() = Some(observer);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn page(&self, id: PageId) -> Option<Rc<ContentPage>> {
        self.pages.get(id).cloned()
    }

    pub fn page_ids(&self) -> &[PageId] {
        &self.order
    }

    pub fn index_of(&self, id: PageId) -> Option<usize> {
        self.order.iter().position(|p| *p == id)
    }

    /// Pages in order.
    pub fn pages(&self) -> impl Iterator<Item = &Rc<ContentPage>> {
        self.order.iter().filter_map(|id| self.pages.get(*id))
    }

    pub fn loaded_pages(&self) -> impl Iterator<Item = &Rc<ContentPage>> {
        self.pages().filter(|p| p.is_loaded())
    }

    pub fn active(&self) -> Option<PageId> {
        self.active.get()
    }

    pub fn active_page(&self) -> Option<Rc<ContentPage>> {
        self.active.get().and_then(|id| self.page(id))
    }

    pub fn viewport(&self) -> Size {
        self.viewport.get()
    }

    /// Every page shares the container's frame.
    pub fn set_viewport(&self, size: Size) {
        self.viewport.set(size);
        for page in self.pages() {
            page.set_viewport(size);
        }
    }

    /// Load a page without showing it.
    pub fn load(&self, id: PageId) -> Option<Rc<ContentPage>> {
        let page = self.page(id)?;
        page.load();
        Some(page)
    }

    /// Switch pages without animation or transition events. Refused while a
    /// transition is running or for an unknown page.
    pub fn set_active(&self, id: PageId) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let Some(page) = self.load(id) else {
            log::warn!("set_active: unknown page {id:?}");
            return false;
        };
        self.active.set(Some(page.id()));
        true
    }

    pub fn neighbour(&self, id: PageId, direction: Direction) -> Option<PageId> {
        match direction {
            Direction::Before => self.page_before(id),
            Direction::After => self.page_after(id),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.borrow().is_some()
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition.borrow().as_ref().map(|t| Transition {
            from: t.from,
            to: t.to,
            direction: t.direction,
            progress: *t.progress.get(),
        })
    }

    /// Follow a horizontal drag. Returns whether the pager consumed it.
    pub fn drag_by(&self, dx: f32) -> bool {
        let width = self.viewport.get().width.max(1.0);
        {
            let mut transition = self.transition.borrow_mut();
            if let Some(t) = transition.as_mut() {
                if t.settle.is_some() {
                    return false;
                }
                let sign = t.direction.sign();
                // The drag cannot cross over into the opposite direction.
                let distance = ((self.drag.get() + dx) * sign).clamp(0.0, width);
                self.drag.set(distance * sign);
                t.progress.snap_to(distance / width);
                return true;
            }
        }

        if dx == 0.0 {
            return false;
        }
        let direction = if dx > 0.0 {
            Direction::After
        } else {
            Direction::Before
        };
        let progress = (dx.abs() / width).min(1.0);
        if !self.begin_transition(direction, progress, None) {
            return false;
        }
        self.drag.set(progress * width * direction.sign());
        true
    }

    /// End a drag: complete the turn if it went far enough, otherwise go back.
    pub fn release(&self) {
        self.drag.set(0.0);
        let mut transition = self.transition.borrow_mut();
        let Some(t) = transition.as_mut() else {
            return;
        };
        if t.settle.is_some() {
            return;
        }
        let complete = *t.progress.get() >= self.config.swipe_threshold;
        t.settle = Some(complete);
        t.progress.set_target(if complete { 1.0 } else { 0.0 });
    }

    /// Animated turn to the neighbouring page. False at a boundary or while
    /// another transition runs.
    pub fn navigate(&self, direction: Direction) -> bool {
        self.begin_transition(direction, 0.0, Some(true))
    }

    /// Advance the transition animation. Returns true while frames are still
    /// needed.
    pub fn tick(&self) -> bool {
        let (completed, from, to) = {
            let mut transition = self.transition.borrow_mut();
            let Some(t) = transition.as_mut() else {
                return false;
            };
            let Some(completed) = t.settle else {
                // Finger down: the drag drives progress.
                return false;
            };
            if t.progress.update() {
                return true;
            }
            let (from, to) = (t.from, t.to);
            *transition = None;
            (completed, from, to)
        };

        if completed {
            self.active.set(Some(to));
        }
        log::debug!("transition {from:?} -> {to:?} finished (completed: {completed})");
        if let Some(observer) = self.observer() {
            observer.did_finish_transition(completed);
        }
        false
    }

    fn begin_transition(&self, direction: Direction, progress: f32, settle: Option<bool>) -> bool {
        if self.is_transitioning() {
            return false;
        }
        let Some(from) = self.active.get() else {
            return false;
        };
        let Some(to) = self.neighbour(from, direction) else {
            return false;
        };

        let mut value = AnimatedValue::new(progress, self.config.transition_spec());
        if settle == Some(true) {
            value.set_target(1.0);
        }
        *self.transition.borrow_mut() = Some(PendingTransition {
            from,
            to,
            direction,
            progress: value,
            settle,
        });

        // The pending page must be set up before anyone looks at it.
        self.load(to);
        log::debug!("transition {from:?} -> {to:?} ({direction:?})");
        if let Some(observer) = self.observer() {
            observer.will_transition_to(to);
        }
        true
    }

    fn observer(&self) -> Option<Rc<dyn TransitionObserver>> {
        self.observer.borrow().as_ref().and_then(Weak::upgrade)
    }
}

impl PageNavigationSource for Pager {
    fn page_before(&self, page: PageId) -> Option<PageId> {
        let index = self.index_of(page)?;
        index.checked_sub(1).map(|i| self.order[i])
    }

    fn page_after(&self, page: PageId) -> Option<PageId> {
        let index = self.index_of(page)?;
        self.order.get(index + 1).copied()
    }
}
