use std::path::{Path, PathBuf};

/// How the decks of one component are spread over numbered subdirectories.
///
/// A component with more declared decks than `size` is sharded: the deck with 0-based
/// write index `i` goes into `<component>/<floor(i / size) * size>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardPlan {
    declared: usize,
    size: usize,
}

impl ShardPlan {
    /// `size` must be non-zero; `OutputConfig` guarantees this.
    pub fn new(declared: usize, size: usize) -> Self {
        Self {
            declared,
            size: size.max(1),
        }
    }

    pub fn declared(&self) -> usize {
        self.declared
    }

    pub fn is_sharded(&self) -> bool {
        self.declared > self.size
    }

    pub fn shard_for(&self, index: usize) -> Option<usize> {
        self.is_sharded().then(|| index / self.size * self.size)
    }

    /// Shard directories pre-created for the declared count, in ascending order.
    pub fn shard_dirs(&self) -> Vec<usize> {
        if !self.is_sharded() {
            return Vec::new();
        }
        let last = (self.declared - 1) / self.size * self.size;
        (0..=last).step_by(self.size).collect()
    }

    /// Directory of the deck with write index `index`, relative to the output root.
    pub fn relative_dir(&self, component: &str, index: usize) -> PathBuf {
        let dir = PathBuf::from(component);
        match self.shard_for(index) {
            Some(shard) => dir.join(shard.to_string()),
            None => dir,
        }
    }
}

/// How a deck in `shard` (or directly in its component directory) refers to a file
/// placed at the output root. Absolute paths pass through unchanged.
pub fn relative_reference(shard: Option<usize>, file: &str) -> String {
    if Path::new(file).is_absolute() {
        return file.to_string();
    }
    match shard {
        Some(_) => format!("../../{}", file),
        None => format!("../{}", file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sweeps_are_not_sharded() {
        let plan = ShardPlan::new(1000, 1000);
        assert!(!plan.is_sharded());
        assert_eq!(plan.shard_for(999), None);
        assert!(plan.shard_dirs().is_empty());
        assert_eq!(plan.relative_dir("drift", 5), PathBuf::from("drift"));
    }

    #[test]
    fn large_sweeps_fill_each_shard_with_exactly_size_decks() {
        let plan = ShardPlan::new(2500, 1000);
        assert!(plan.is_sharded());
        assert_eq!(plan.shard_for(0), Some(0));
        assert_eq!(plan.shard_for(999), Some(0));
        assert_eq!(plan.shard_for(1000), Some(1000));
        assert_eq!(plan.shard_for(1500), Some(1000));
        assert_eq!(plan.shard_for(2499), Some(2000));
        assert_eq!(
            plan.relative_dir("sbend", 1500),
            PathBuf::from("sbend/1000")
        );
    }

    #[test]
    fn shard_dirs_cover_the_declared_count() {
        assert_eq!(ShardPlan::new(2500, 1000).shard_dirs(), vec![0, 1000, 2000]);
        assert_eq!(ShardPlan::new(2000, 1000).shard_dirs(), vec![0, 1000]);
        assert_eq!(ShardPlan::new(1001, 1000).shard_dirs(), vec![0, 1000]);
        assert_eq!(ShardPlan::new(7, 3).shard_dirs(), vec![0, 3, 6]);
    }

    #[test]
    fn sharded_decks_climb_one_extra_level() {
        assert_eq!(relative_reference(None, "beam.madx"), "../beam.madx");
        assert_eq!(
            relative_reference(Some(1000), "beam.madx"),
            "../../beam.madx"
        );
    }

    #[test]
    fn absolute_references_are_kept_verbatim() {
        assert_eq!(
            relative_reference(Some(0), "/data/beam.madx"),
            "/data/beam.madx"
        );
    }
}
