//! Merge rule: two distinct balls of equal level collapse into one ball of
//! `level.merged()` at their midpoint.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::Level;

/// Snapshot of one side of a collision, taken when the event is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeCandidate {
    pub entity: Entity,
    pub level: Level,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMerge {
    pub a: Entity,
    pub b: Entity,
    pub source_level: Level,
    pub position: Vec2,
}

impl PendingMerge {
    pub fn merged_level(&self) -> Level {
        self.source_level.merged()
    }

    /// Score credited for this merge: the pre-merge level's value.
    pub fn score(&self) -> u32 {
        self.source_level.score()
    }
}

/// Returns a merge plan when both sides are distinct balls of the same level.
/// Static boundaries never reach this point because they carry no level.
pub fn plan_merge(a: MergeCandidate, b: MergeCandidate) -> Option<PendingMerge> {
    if a.entity == b.entity || a.level != b.level {
        return None;
    }
    Some(PendingMerge {
        a: a.entity,
        b: b.entity,
        source_level: a.level,
        position: (a.position + b.position) * 0.5,
    })
}

/// Merges collected during one frame, applied after collision collection and
/// before the next physics step. A ball can be claimed by at most one merge.
#[derive(Resource, Debug, Default)]
pub struct MergeQueue {
    pending: Vec<PendingMerge>,
    claimed: HashSet<Entity>,
}

impl MergeQueue {
    /// Queues the pair if it is mergeable and neither ball is already claimed.
    pub fn offer(&mut self, a: MergeCandidate, b: MergeCandidate) -> bool {
        if self.claimed.contains(&a.entity) || self.claimed.contains(&b.entity) {
            return false;
        }
        let Some(plan) = plan_merge(a, b) else {
            return false;
        };
        self.claimed.insert(plan.a);
        self.claimed.insert(plan.b);
        self.pending.push(plan);
        true
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<PendingMerge> {
        self.claimed.clear();
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.claimed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: u32, level: u8, x: f32, y: f32) -> MergeCandidate {
        MergeCandidate {
            entity: Entity::from_raw(index),
            level: Level::new(level).unwrap(),
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn equal_levels_merge_at_midpoint() {
        let plan = plan_merge(candidate(1, 3, 0.0, 0.0), candidate(2, 3, 10.0, -4.0)).unwrap();
        assert_eq!(plan.position, Vec2::new(5.0, -2.0));
        assert_eq!(plan.merged_level().get(), 4);
        assert_eq!(plan.score(), Level::new(3).unwrap().score());
    }

    #[test]
    fn different_levels_do_not_merge() {
        assert!(plan_merge(candidate(1, 3, 0.0, 0.0), candidate(2, 4, 1.0, 0.0)).is_none());
    }

    #[test]
    fn a_ball_never_merges_with_itself() {
        let c = candidate(1, 5, 0.0, 0.0);
        assert!(plan_merge(c, c).is_none());
    }

    #[test]
    fn top_level_wraps_to_first() {
        let plan = plan_merge(candidate(1, 10, 0.0, 0.0), candidate(2, 10, 2.0, 0.0)).unwrap();
        assert_eq!(plan.merged_level(), Level::MIN);
        assert_eq!(plan.score(), Level::MAX.score());
    }

    #[test]
    fn claimed_ball_is_not_merged_twice_in_one_frame() {
        let mut queue = MergeQueue::default();
        let a = candidate(1, 2, 0.0, 0.0);
        let b = candidate(2, 2, 1.0, 0.0);
        let c = candidate(3, 2, 2.0, 0.0);
        assert!(queue.offer(a, b));
        assert!(!queue.offer(b, c));
        assert!(!queue.offer(b, a));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain().len(), 1);
        assert!(queue.is_empty());
        assert!(queue.offer(b, c), "claims reset after drain");
    }
}
