use std::collections::VecDeque;

use crate::frame::Frame;

/// An event stamped with the frame it was emitted on.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    pub frame_index: u64,
    pub event: E,
}

/// FIFO queue of collaborator events (clicks, camera settles, fetch
/// completions) waiting to be fed to a consumer.
///
/// Delivery order is emission order; nothing is reordered or coalesced.
#[derive(Debug)]
pub struct EventBus<E> {
    events: VecDeque<Stamped<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame: Frame, event: E) {
        self.events.push_back(Stamped {
            frame_index: frame.index,
            event,
        });
    }

    pub fn pop(&mut self) -> Option<Stamped<E>> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Stamped<E>> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(2, 0.1), "clicked");
        assert_eq!(bus.len(), 1);
        let e = bus.pop().unwrap();
        assert_eq!(e.frame_index, 2);
        assert_eq!(e.event, "clicked");
    }

    #[test]
    fn delivers_in_emission_order() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(0, 1.0), 1);
        bus.emit(Frame::new(0, 1.0), 2);
        bus.emit(Frame::new(1, 1.0), 3);
        let order: Vec<i32> = bus.drain().into_iter().map(|s| s.event).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(bus.is_empty());
    }
}
