//! The single owned game session: score, preview levels, live ball list.

use std::collections::VecDeque;
use std::fmt;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::merge::PendingMerge;
use crate::{ArenaConfig, CapacityConfig, DropConfig, GameState, Level};

/// Next-level draw over the three lowest levels: (level, weight).
pub const NEXT_LEVEL_WEIGHTS: [(u8, u32); 3] = [(1, 50), (2, 30), (3, 20)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejected {
    GameOver,
    CoolingDown,
}

impl fmt::Display for DropRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropRejected::GameOver => write!(f, "game is over"),
            DropRejected::CoolingDown => write!(f, "drop cooldown active"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPlan {
    pub level: Level,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged_level: Level,
    pub score_gained: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub drops: u32,
    pub merges: u32,
    pub evicted: u32,
    pub highest_level: Option<Level>,
}

pub fn draw_next_level<R: rand::Rng + ?Sized>(rng: &mut R) -> Level {
    NEXT_LEVEL_WEIGHTS
        .choose_weighted(rng, |(_, weight)| *weight)
        .ok()
        .and_then(|(level, _)| Level::new(*level))
        .unwrap_or_default()
}

#[derive(Resource)]
pub struct GameSession {
    state: GameState,
    /// Live balls, oldest first.
    balls: VecDeque<Entity>,
    rng: StdRng,
    last_drop_at: Option<f32>,
    stats: SessionStats,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }
}

impl GameSession {
    /// Deterministic session for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let current = draw_next_level(&mut rng);
        let next = draw_next_level(&mut rng);
        Self {
            state: GameState::new(current, next),
            balls: VecDeque::new(),
            rng,
            last_drop_at: None,
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn score(&self) -> u64 {
        self.state.score
    }
    pub fn is_over(&self) -> bool {
        self.state.game_over
    }
    pub fn current_level(&self) -> Level {
        self.state.current_level
    }
    pub fn next_level(&self) -> Level {
        self.state.next_level
    }
    pub fn stats(&self) -> SessionStats {
        self.stats
    }
    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }
    pub fn balls(&self) -> impl Iterator<Item = Entity> + '_ {
        self.balls.iter().copied()
    }
    pub fn contains(&self, entity: Entity) -> bool {
        self.balls.contains(&entity)
    }

    /// Accepts a drop at `x`, rotating next -> current and drawing a new next.
    pub fn plan_drop(
        &mut self,
        x: f32,
        arena: &ArenaConfig,
        drop: &DropConfig,
        now: f32,
    ) -> Result<DropPlan, DropRejected> {
        if self.state.game_over {
            return Err(DropRejected::GameOver);
        }
        if let Some(last) = self.last_drop_at {
            if now - last < drop.cooldown_secs {
                return Err(DropRejected::CoolingDown);
            }
        }
        let level = self.state.current_level;
        let position = Vec2::new(arena.clamp_drop_x(x, level.radius()), arena.spawn_y());

        self.state.current_level = self.state.next_level;
        self.state.next_level = draw_next_level(&mut self.rng);
        self.last_drop_at = Some(now);
        self.stats.drops += 1;
        Ok(DropPlan { level, position })
    }

    pub fn track(&mut self, entity: Entity, level: Level) {
        self.balls.push_back(entity);
        if self.stats.highest_level.map_or(true, |h| level > h) {
            self.stats.highest_level = Some(level);
        }
    }

    pub fn forget(&mut self, entity: Entity) -> bool {
        match self.balls.iter().position(|e| *e == entity) {
            Some(index) => {
                self.balls.remove(index);
                true
            }
            None => false,
        }
    }

    /// Credits the pre-merge level's score. A finished game's score is frozen.
    pub fn record_merge(&mut self, merge: &PendingMerge) -> MergeOutcome {
        let merged_level = merge.merged_level();
        if self.state.game_over {
            return MergeOutcome { merged_level, score_gained: 0 };
        }
        let score_gained = merge.score();
        self.state.score += u64::from(score_gained);
        self.stats.merges += 1;
        MergeOutcome { merged_level, score_gained }
    }

    /// Removes and returns the oldest balls once the live count exceeds the cap.
    pub fn evict_overflow(&mut self, cfg: &CapacityConfig) -> Vec<Entity> {
        if self.balls.len() <= cfg.max_balls {
            return Vec::new();
        }
        let count = cfg.evict_count.min(self.balls.len());
        self.stats.evicted += count as u32;
        self.balls.drain(..count).collect()
    }

    /// Active -> Over. Returns false when the game had already ended.
    pub fn end_game(&mut self) -> bool {
        if self.state.game_over {
            return false;
        }
        self.state.game_over = true;
        true
    }

    /// Resets score, previews and statistics; returns the balls to despawn.
    pub fn restart(&mut self) -> Vec<Entity> {
        let current = draw_next_level(&mut self.rng);
        let next = draw_next_level(&mut self.rng);
        self.state = GameState::new(current, next);
        self.last_drop_at = None;
        self.stats = SessionStats::default();
        self.balls.drain(..).collect()
    }
}
