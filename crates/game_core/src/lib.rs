//! game_core: ball catalog, session state and the merge / drop / game-over rules.
//! Nothing here touches the physics engine; `game_physics` adapts these rules to Rapier.

use bevy::prelude::*;

pub mod bundles;
pub mod catalog;
pub mod components;
pub mod events;
pub mod merge;
pub mod resources;
pub mod rules;
pub mod session;

pub use bundles::*;
pub use catalog::*;
pub use components::*;
pub use events::*;
pub use merge::{plan_merge, MergeCandidate, MergeQueue, PendingMerge};
pub use resources::*;
pub use rules::{any_resting_above, rests_above_boundary, BallSample};
pub use session::{DropPlan, DropRejected, GameSession, MergeOutcome, SessionStats};

pub struct GameCorePlugin;
impl Plugin for GameCorePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DropRequested>()
            .add_event::<BallDropped>()
            .add_event::<BallsMerged>()
            .add_event::<ShakeEffect>()
            .add_event::<BallsEvicted>()
            .add_event::<GameOver>()
            .add_event::<RestartRequested>()
            .add_event::<GameRestarted>()
            .init_resource::<GameSession>()
            .init_resource::<MergeQueue>()
            .init_resource::<ArenaConfig>()
            .init_resource::<DropConfig>()
            .init_resource::<GameOverConfig>()
            .init_resource::<CapacityConfig>();
    }
}

/// Run condition: gameplay systems stop once the session is over.
pub fn game_active(session: Res<GameSession>) -> bool {
    !session.is_over()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_registers_session_and_configs() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(GameCorePlugin);
        app.update();
        let session = app.world().resource::<GameSession>();
        assert_eq!(session.score(), 0);
        assert!(!session.is_over());
        assert_eq!(app.world().resource::<CapacityConfig>().max_balls, 180);
    }
}
