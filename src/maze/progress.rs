/// Tracks how far a generator is towards its goal.
///
/// What `count` measures is up to each generator: visited rooms for the walkers, processed
/// rooms for the row-by-row ones, merged sets for Kruskal's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    goal: usize,
    count: usize,
}

impl Progress {
    pub fn new(goal: usize) -> Self {
        Progress { goal, count: 0 }
    }

    pub fn goal(&self) -> usize {
        self.goal
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn increase(&mut self) {
        self.count += 1;
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    pub fn mark_complete(&mut self) {
        self.count = self.goal;
    }

    pub fn is_complete(&self) -> bool {
        self.count >= self.goal
    }

    /// Completion ratio clamped to `[0.0, 1.0]`.
    pub fn ratio(&self) -> f64 {
        if self.goal == 0 {
            return 1.0;
        }
        (self.count as f64 / self.goal as f64).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let mut progress = Progress::new(4);
        assert_eq!(progress.ratio(), 0.0);
        progress.increase();
        assert_eq!(progress.ratio(), 0.25);
        assert!(!progress.is_complete());
        progress.set_count(4);
        assert!(progress.is_complete());
        assert_eq!(progress.ratio(), 1.0);
        progress.set_count(9);
        assert_eq!(progress.ratio(), 1.0);
    }

    #[test]
    fn test_mark_complete() {
        let mut progress = Progress::new(10);
        progress.mark_complete();
        assert_eq!(progress.count(), progress.goal());
        assert!(progress.is_complete());
    }
}
