//! Touch surfaces and their listener registries

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::touch::{EventResponse, TouchEvent};

/// Handle returned by [`TouchSurface::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback invoked for every touch event on a surface
pub type TouchListener = Rc<dyn Fn(&TouchEvent) -> EventResponse>;

/// An element that receives platform touch events
pub trait TouchSurface {
    fn add_listener(&mut self, listener: TouchListener) -> ListenerId;

    /// Detach a listener; `false` if it was not attached
    fn remove_listener(&mut self, id: ListenerId) -> bool;

    fn listener_count(&self) -> usize;
}

/// Shared handle to a surface
pub type SurfaceHandle = Rc<RefCell<dyn TouchSurface>>;

/// In-memory surface that fans events out to its listeners
#[derive(Default)]
pub struct TouchArea {
    listeners: Vec<(ListenerId, TouchListener)>,
    next_id: u64,
}

impl TouchArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared surface ready to be bound to a recognizer
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Deliver an event to every listener
    ///
    /// The registry is snapshotted first and no borrow is held while
    /// listeners run, so a listener may detach itself or others.
    pub fn dispatch(area: &RefCell<Self>, event: &TouchEvent) -> EventResponse {
        let listeners: Vec<TouchListener> = area
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        listeners
            .iter()
            .fold(EventResponse::Pass, |response, listener| {
                response.merge(listener(event))
            })
    }
}

impl TouchSurface for TouchArea {
    fn add_listener(&mut self, listener: TouchListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for TouchArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchArea")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_merges_responses() {
        let area = TouchArea::shared();
        area.borrow_mut()
            .add_listener(Rc::new(|_| EventResponse::Pass));
        let veto = area
            .borrow_mut()
            .add_listener(Rc::new(|_| EventResponse::PreventDefault));

        let event = TouchEvent::moved(Vec::new());
        assert_eq!(TouchArea::dispatch(&area, &event), EventResponse::PreventDefault);

        assert!(area.borrow_mut().remove_listener(veto));
        assert!(!area.borrow_mut().remove_listener(veto));
        assert_eq!(TouchArea::dispatch(&area, &event), EventResponse::Pass);
    }

    #[test]
    fn test_listener_can_detach_during_dispatch() {
        let area = TouchArea::shared();
        let calls = Rc::new(Cell::new(0));
        let id = Rc::new(Cell::new(None));

        let listener_area = Rc::clone(&area);
        let listener_calls = Rc::clone(&calls);
        let listener_id = Rc::clone(&id);
        let registered = area.borrow_mut().add_listener(Rc::new(move |_| {
            listener_calls.set(listener_calls.get() + 1);
            if let Some(own) = listener_id.get() {
                listener_area.borrow_mut().remove_listener(own);
            }
            EventResponse::Pass
        }));
        id.set(Some(registered));

        let event = TouchEvent::moved(Vec::new());
        TouchArea::dispatch(&area, &event);
        TouchArea::dispatch(&area, &event);
        assert_eq!(calls.get(), 1);
        assert_eq!(area.borrow().listener_count(), 0);
    }
}
