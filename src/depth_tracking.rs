use crate::error::{Error, Result};

/// Tracks how deeply nested the element currently being bound is.
#[derive(Clone, Debug)]
pub struct DepthTracker {
    depth: usize,
    max: usize,
}

impl DepthTracker {
    /// Create a new depth tracker that fails once nesting exceeds `max`.
    pub fn new(max: usize) -> Self {
        Self { depth: 0, max }
    }

    /// Step into a nested element.
    pub fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        // Check to see if we hit the nesting limit
        if self.depth > self.max {
            return Err(Error::ParseLimit(format!(
                "Depth limit of {} exceeded",
                self.max
            )));
        }
        Ok(())
    }

    /// Step back out of a nested element.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn limit() {
        let mut tracker = DepthTracker::new(2);
        tracker.enter().unwrap();
        tracker.enter().unwrap();
        assert!(matches!(tracker.enter(), Err(Error::ParseLimit(_))));
        tracker.leave();
        tracker.leave();
        tracker.leave();
        assert_eq!(tracker.depth(), 0);
        tracker.enter().unwrap();
    }
}
