//! Binding of the gesture state machine to a touch surface
//!
//! The recognizer owns exactly one listener on at most one surface. Each
//! gesture kind has a single callback slot; registering again replaces the
//! previous callback. Callbacks run synchronously inside the surface's
//! dispatch, pinch before rotate.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::{
    sample::{GestureKind, GestureSample, Pan, Pinch, Rotate},
    surface::{ListenerId, SurfaceHandle, TouchListener},
    touch::{EventResponse, TouchEvent},
    tracker::{GestureTracker, TrackingPhase},
};

type Slot<T> = Option<Box<dyn FnMut(T)>>;

#[derive(Default)]
struct Callbacks {
    pinch: Slot<Pinch>,
    rotate: Slot<Rotate>,
    pan: Slot<Pan>,
    // Bumped on every clear so a callback taken out for a call is not put
    // back after `cleanup` ran inside it.
    epoch: u64,
}

impl Callbacks {
    fn clear(&mut self) {
        self.pinch = None;
        self.rotate = None;
        self.pan = None;
        self.epoch += 1;
    }
}

#[derive(Default)]
struct Shared {
    tracker: RefCell<GestureTracker>,
    callbacks: RefCell<Callbacks>,
}

impl Shared {
    fn handle(&self, event: &TouchEvent) -> EventResponse {
        let output = self.tracker.borrow_mut().process(event);
        for sample in output.samples {
            self.deliver(sample);
        }
        output.response
    }

    fn deliver(&self, sample: GestureSample) {
        match sample {
            GestureSample::Pinch(p) => self.invoke(|c| &mut c.pinch, p),
            GestureSample::Rotate(r) => self.invoke(|c| &mut c.rotate, r),
            GestureSample::Pan(p) => self.invoke(|c| &mut c.pan, p),
        }
    }

    /// Run one slot's callback without holding any borrow, so the callback
    /// may re-register or clear callbacks
    fn invoke<T>(&self, slot: impl Fn(&mut Callbacks) -> &mut Slot<T>, value: T) {
        let (callback, epoch) = {
            let mut callbacks = self.callbacks.borrow_mut();
            let taken = slot(&mut *callbacks).take();
            (taken, callbacks.epoch)
        };
        let Some(mut callback) = callback else {
            return;
        };

        callback(value);

        let mut callbacks = self.callbacks.borrow_mut();
        if callbacks.epoch == epoch {
            let current = slot(&mut *callbacks);
            if current.is_none() {
                *current = Some(callback);
            }
        }
    }
}

struct Binding {
    surface: SurfaceHandle,
    listener: ListenerId,
}

/// Fuses touch events on a bound surface into pinch, rotate and pan samples
///
/// # Example
///
/// ```
/// use std::{cell::Cell, rc::Rc};
/// use arplace_gesture::*;
///
/// let surface = TouchArea::shared();
/// let mut recognizer = GestureRecognizer::new();
/// recognizer.initialize(surface.clone());
///
/// let scale = Rc::new(Cell::new(1.0));
/// let sink = Rc::clone(&scale);
/// recognizer.on_pinch(move |pinch| sink.set(pinch.scale));
///
/// TouchArea::dispatch(&surface, &TouchEvent::start(vec![
///     TouchPoint::new(0, 0.0, 0.0),
///     TouchPoint::new(1, 10.0, 0.0),
/// ]));
/// TouchArea::dispatch(&surface, &TouchEvent::moved(vec![
///     TouchPoint::new(0, 0.0, 0.0),
///     TouchPoint::new(1, 20.0, 0.0),
/// ]));
/// assert_eq!(scale.get(), 2.0);
///
/// recognizer.cleanup();
/// ```
pub struct GestureRecognizer {
    shared: Rc<Shared>,
    binding: Option<Binding>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(Shared::default()),
            binding: None,
        }
    }

    /// Attach to `surface`, first detaching from any previous one
    ///
    /// Registered callbacks survive rebinding; tracking state does not.
    pub fn initialize(&mut self, surface: SurfaceHandle) {
        self.detach();
        self.shared.tracker.borrow_mut().reset();

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let listener: TouchListener = Rc::new(move |event: &TouchEvent| {
            weak.upgrade()
                .map_or(EventResponse::Pass, |shared| shared.handle(event))
        });

        let listener = surface.borrow_mut().add_listener(listener);
        debug!(?listener, "gesture recognizer attached");
        self.binding = Some(Binding { surface, listener });
    }

    /// Register the pinch callback, replacing any previous one
    pub fn on_pinch(&mut self, callback: impl FnMut(Pinch) + 'static) {
        self.shared.callbacks.borrow_mut().pinch = Some(Box::new(callback));
    }

    /// Register the rotate callback, replacing any previous one
    pub fn on_rotate(&mut self, callback: impl FnMut(Rotate) + 'static) {
        self.shared.callbacks.borrow_mut().rotate = Some(Box::new(callback));
    }

    /// Register the pan callback, replacing any previous one
    pub fn on_pan(&mut self, callback: impl FnMut(Pan) + 'static) {
        self.shared.callbacks.borrow_mut().pan = Some(Box::new(callback));
    }

    /// Whether a callback is registered for `kind`
    pub fn has_callback(&self, kind: GestureKind) -> bool {
        let callbacks = self.shared.callbacks.borrow();
        match kind {
            GestureKind::Pinch => callbacks.pinch.is_some(),
            GestureKind::Rotate => callbacks.rotate.is_some(),
            GestureKind::Pan => callbacks.pan.is_some(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn phase(&self) -> TrackingPhase {
        self.shared.tracker.borrow().phase()
    }

    /// Detach from the surface and drop every callback. Idempotent.
    pub fn cleanup(&mut self) {
        self.detach();
        self.shared.callbacks.borrow_mut().clear();
        self.shared.tracker.borrow_mut().reset();
    }

    fn detach(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };
        // The listener holds only a weak reference, so if the surface is
        // busy it stays attached but inert once callbacks are cleared.
        match binding.surface.try_borrow_mut() {
            Ok(mut surface) => {
                surface.remove_listener(binding.listener);
                debug!(listener = ?binding.listener, "gesture recognizer detached");
            }
            Err(_) => warn!(
                listener = ?binding.listener,
                "surface busy during detach, listener left inert"
            ),
        };
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for GestureRecognizer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        surface::{TouchArea, TouchSurface},
        touch::TouchPoint,
    };
    use approx::assert_relative_eq;
    use std::cell::Cell;

    fn two(a: (f32, f32), b: (f32, f32)) -> Vec<TouchPoint> {
        vec![TouchPoint::new(0, a.0, a.1), TouchPoint::new(1, b.0, b.1)]
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let surface = TouchArea::shared();
        let mut recognizer = GestureRecognizer::new();
        recognizer.initialize(surface.clone());
        recognizer.initialize(surface.clone());
        assert_eq!(surface.borrow().listener_count(), 1);

        let other = TouchArea::shared();
        recognizer.initialize(other.clone());
        assert_eq!(surface.borrow().listener_count(), 0);
        assert_eq!(other.borrow().listener_count(), 1);
    }

    #[test]
    fn test_later_registration_replaces_earlier() {
        let surface = TouchArea::shared();
        let mut recognizer = GestureRecognizer::new();
        recognizer.initialize(surface.clone());

        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let f = Rc::clone(&first);
        let s = Rc::clone(&second);
        recognizer.on_pinch(move |_| f.set(f.get() + 1));
        recognizer.on_pinch(move |_| s.set(s.get() + 1));

        TouchArea::dispatch(&surface, &TouchEvent::start(two((0.0, 0.0), (10.0, 0.0))));
        TouchArea::dispatch(&surface, &TouchEvent::moved(two((0.0, 0.0), (15.0, 0.0))));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_move_is_claimed_while_tracking() {
        let surface = TouchArea::shared();
        let mut recognizer = GestureRecognizer::new();
        recognizer.initialize(surface.clone());

        let idle_move = TouchEvent::moved(vec![TouchPoint::new(0, 1.0, 1.0)]);
        assert_eq!(TouchArea::dispatch(&surface, &idle_move), EventResponse::Pass);

        TouchArea::dispatch(&surface, &TouchEvent::start(vec![TouchPoint::new(0, 0.0, 0.0)]));
        assert_eq!(recognizer.phase(), TrackingPhase::OneTouch);
        assert_eq!(
            TouchArea::dispatch(&surface, &idle_move),
            EventResponse::PreventDefault
        );
    }

    #[test]
    fn test_cleanup_twice_and_no_callbacks_after() {
        let surface = TouchArea::shared();
        let mut recognizer = GestureRecognizer::new();
        recognizer.initialize(surface.clone());

        let fired = Rc::new(Cell::new(0));
        let f = Rc::clone(&fired);
        recognizer.on_pan(move |_| f.set(f.get() + 1));

        recognizer.cleanup();
        recognizer.cleanup();
        assert!(!recognizer.is_bound());
        assert!(!recognizer.has_callback(GestureKind::Pan));
        assert_eq!(surface.borrow().listener_count(), 0);

        TouchArea::dispatch(&surface, &TouchEvent::start(vec![TouchPoint::new(0, 0.0, 0.0)]));
        TouchArea::dispatch(&surface, &TouchEvent::moved(vec![TouchPoint::new(0, 4.0, 0.0)]));
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let surface = TouchArea::shared();
        {
            let mut recognizer = GestureRecognizer::new();
            recognizer.initialize(surface.clone());
            assert_eq!(surface.borrow().listener_count(), 1);
        }
        assert_eq!(surface.borrow().listener_count(), 0);
    }

    #[test]
    fn test_pinch_then_rotate_order() {
        let surface = TouchArea::shared();
        let mut recognizer = GestureRecognizer::new();
        recognizer.initialize(surface.clone());

        let log = Rc::new(RefCell::new(Vec::new()));
        let pinch_log = Rc::clone(&log);
        let rotate_log = Rc::clone(&log);
        recognizer.on_rotate(move |r| rotate_log.borrow_mut().push(("rotate", r.rotation)));
        recognizer.on_pinch(move |p| pinch_log.borrow_mut().push(("pinch", p.scale)));

        TouchArea::dispatch(&surface, &TouchEvent::start(two((0.0, 0.0), (10.0, 0.0))));
        TouchArea::dispatch(&surface, &TouchEvent::moved(two((0.0, 0.0), (0.0, 20.0))));

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].0, "pinch");
        assert_relative_eq!(log[0].1, 2.0);
        assert_eq!(log[1].0, "rotate");
        assert_relative_eq!(log[1].1, std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_callback_may_replace_itself() {
        let surface = TouchArea::shared();
        let mut recognizer = GestureRecognizer::new();
        recognizer.initialize(surface.clone());

        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        recognizer.on_pan(move |_| c.set(c.get() + 1));

        TouchArea::dispatch(&surface, &TouchEvent::start(vec![TouchPoint::new(0, 0.0, 0.0)]));
        TouchArea::dispatch(&surface, &TouchEvent::moved(vec![TouchPoint::new(0, 1.0, 0.0)]));
        TouchArea::dispatch(&surface, &TouchEvent::moved(vec![TouchPoint::new(0, 2.0, 0.0)]));
        assert_eq!(calls.get(), 2);
        assert!(recognizer.has_callback(GestureKind::Pan));
    }
}
