use std::collections::VecDeque;

/// Fixed-length history with FIFO shift-and-push semantics.
///
/// The window always holds exactly `size` slots. Slot 0 is the oldest and
/// slot `size - 1` the newest; slots that have never been written are `None`.
#[derive(Clone, Debug)]
pub struct RollingWindow<T> {
    slots: VecDeque<Option<T>>,
}

impl<T> RollingWindow<T> {
    pub fn new(size: usize) -> Self {
        let mut slots = VecDeque::with_capacity(size);
        slots.resize_with(size, || None);
        RollingWindow { slots }
    }

    /// Drop the oldest slot and append `value` as the newest.
    pub fn push(&mut self, value: Option<T>) {
        if self.is_empty() {
            return;
        }
        self.slots.pop_front();
        self.slots.push_back(value);
    }

    /// Slot by position, 0 being the oldest
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Slot counted back from the newest; `back(0)` is the latest push
    pub fn back(&self, steps: usize) -> Option<&T> {
        let len = self.len();
        if steps >= len {
            return None;
        }
        self.get(len - 1 - steps)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_keeps_fixed_length() {
        let mut window = RollingWindow::new(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window.back(0), None);

        for i in 0..5 {
            window.push(Some(i));
            assert_eq!(window.len(), 3);
        }

        assert!((0..3).all(|slot| window.get(slot).is_some()));
        assert_eq!(window.get(0), Some(&2));
        assert_eq!(window.get(2), Some(&4));
        assert_eq!(window.back(0), Some(&4));
        assert_eq!(window.back(2), Some(&2));
        assert_eq!(window.back(3), None);
    }

    #[test]
    fn test_empty_slots_shift_out() {
        let mut window: RollingWindow<u8> = RollingWindow::new(2);
        window.push(None);
        window.push(Some(1));
        assert_eq!(window.get(0), None);
        window.push(Some(2));
        assert_eq!(window.get(0), Some(&1));
    }
}
