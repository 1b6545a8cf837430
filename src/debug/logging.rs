#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use game_core::GameSession;

#[cfg(feature = "debug")]
use crate::core::config::GameConfig;

#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default)]
pub struct DebugLogState {
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut state: ResMut<DebugLogState>,
    session: Res<GameSession>,
) {
    state.frame_counter += 1;
    state.time_accum += time.delta_secs();
    if state.time_accum >= cfg.debug.log_interval.max(0.1) {
        state.time_accum = 0.0;
        let stats = session.stats();
        info!(
            target: "stats",
            "SIM frame={} t={:.3}s balls={} score={} drops={} merges={} evicted={} best={} over={}",
            state.frame_counter,
            time.elapsed_secs(),
            session.ball_count(),
            session.score(),
            stats.drops,
            stats.merges,
            stats.evicted,
            stats.highest_level.map_or_else(|| "-".to_string(), |l| l.to_string()),
            session.is_over()
        );
    }
}
