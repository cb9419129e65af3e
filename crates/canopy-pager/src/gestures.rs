//! Pan gesture ownership.
//!
//! Every page carries a pan gesture. Left on the page, it competes with the
//! pager's horizontal paging; moved onto the container view (the
//! [`GestureHost`]) it receives pans anywhere over the container, header
//! included. Only the visible page's gesture should live on the host.

use std::cell::{Cell, RefCell};

use smallvec::SmallVec;

use crate::page::{ContentPage, PageId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOwner {
    /// Installed on the page's own scroll view.
    Page,
    /// Installed on the container view.
    Container,
}

pub struct PanGesture {
    owner: Cell<GestureOwner>,
}

impl Default for PanGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGesture {
    pub fn new() -> Self {
        Self {
            owner: Cell::new(GestureOwner::Page),
        }
    }

    pub fn owner(&self) -> GestureOwner {
        self.owner.get()
    }
}

/// The container-level view page gestures get attached to.
#[derive(Default)]
pub struct GestureHost {
    attached: RefCell<SmallVec<[PageId; 2]>>,
}

impl GestureHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `page`'s pan gesture onto the container. Idempotent.
    pub fn attach(&self, page: &ContentPage) {
        let mut attached = self.attached.borrow_mut();
        if !attached.contains(&page.id()) {
            attached.push(page.id());
        }
        page.pan().owner.set(GestureOwner::Container);
    }

    /// Give `page`'s pan gesture back to the page. Idempotent.
    pub fn detach(&self, page: &ContentPage) {
        self.attached.borrow_mut().retain(|id| *id != page.id());
        page.pan().owner.set(GestureOwner::Page);
    }

    pub fn is_attached(&self, id: PageId) -> bool {
        self.attached.borrow().contains(&id)
    }

    pub fn attached(&self) -> SmallVec<[PageId; 2]> {
        self.attached.borrow().clone()
    }

    /// The page whose pan gesture receives container pans.
    pub fn owner(&self) -> Option<PageId> {
        self.attached.borrow().first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_attach_detach() {
        let mut ids: SlotMap<PageId, ()> = SlotMap::with_key();
        let a = ContentPage::new(ids.insert(()), 1, 10.0);
        let b = ContentPage::new(ids.insert(()), 1, 10.0);
        let host = GestureHost::new();
        assert_eq!(host.owner(), None);

        host.attach(&a);
        host.attach(&a);
        assert_eq!(host.attached().as_slice(), &[a.id()]);
        assert_eq!(a.pan().owner(), GestureOwner::Container);
        assert_eq!(b.pan().owner(), GestureOwner::Page);

        host.detach(&a);
        host.attach(&b);
        host.detach(&a);
        assert_eq!(host.owner(), Some(b.id()));
        assert!(!host.is_attached(a.id()));
        assert_eq!(a.pan().owner(), GestureOwner::Page);
    }
}
