use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use game_core::{
    Ball, BallBundle, BallsEvicted, BallsMerged, Boundary, CapacityConfig, GameOver,
    GameRestarted, GameSession, MergeCandidate, MergeQueue, ShakeEffect,
};

use crate::PhysicsConfig;

const LOG_TARGET: &str = "merge";

/// Keep Rapier's gravity in step with `PhysicsConfig` (config may hot-change).
pub fn apply_gravity_config(config: Res<PhysicsConfig>, mut rapier: Query<&mut RapierConfiguration>) {
    for mut cfg in &mut rapier {
        if cfg.gravity != config.gravity {
            cfg.gravity = config.gravity;
        }
    }
}

/// Give every newly spawned ball its rigid body and collider.
pub fn attach_ball_bodies(
    mut commands: Commands,
    config: Res<PhysicsConfig>,
    new_balls: Query<(Entity, &Ball), Added<Ball>>,
) {
    for (entity, ball) in &new_balls {
        commands.entity(entity).insert((
            RigidBody::Dynamic,
            Collider::ball(ball.radius()),
            Restitution::coefficient(config.ball_restitution),
            Friction::coefficient(config.ball_friction),
            Damping {
                linear_damping: config.linear_damping,
                angular_damping: 0.5,
            },
            Velocity::zero(),
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

/// Turn collision-start notifications between equal-level balls into pending merges.
/// Boundaries are filtered out by the query; unknown entities are skipped.
pub fn collect_merge_candidates(
    mut collisions: EventReader<CollisionEvent>,
    balls: Query<(&Ball, &Transform), Without<Boundary>>,
    mut queue: ResMut<MergeQueue>,
) {
    for ev in collisions.read() {
        let CollisionEvent::Started(e1, e2, _flags) = ev else {
            continue;
        };
        let (Ok((a, ta)), Ok((b, tb))) = (balls.get(*e1), balls.get(*e2)) else {
            continue;
        };
        let offered = queue.offer(
            MergeCandidate {
                entity: *e1,
                level: a.level,
                position: ta.translation.truncate(),
            },
            MergeCandidate {
                entity: *e2,
                level: b.level,
                position: tb.translation.truncate(),
            },
        );
        if offered {
            debug!(target: LOG_TARGET, "queued merge {:?} + {:?} ({})", e1, e2, a.level);
        }
    }
}

/// Apply queued merges: remove both sources, then insert the merged ball.
/// Runs after collection and before the next physics step, so removals are
/// always visible before the replacement enters the world.
pub fn apply_pending_merges(
    mut commands: Commands,
    time: Res<Time>,
    mut queue: ResMut<MergeQueue>,
    mut session: ResMut<GameSession>,
    mut merged_events: EventWriter<BallsMerged>,
    mut shake_events: EventWriter<ShakeEffect>,
) {
    if queue.is_empty() {
        return;
    }
    let now = time.elapsed_secs();
    for merge in queue.drain() {
        commands.entity(merge.a).despawn();
        commands.entity(merge.b).despawn();
        session.forget(merge.a);
        session.forget(merge.b);

        let outcome = session.record_merge(&merge);
        let merged = commands
            .spawn(BallBundle::new(outcome.merged_level, merge.position, now))
            .id();
        session.track(merged, outcome.merged_level);

        info!(
            target: LOG_TARGET,
            "{} + {} -> {} (+{}, score={})",
            merge.source_level,
            merge.source_level,
            outcome.merged_level,
            outcome.score_gained,
            session.score()
        );
        merged_events.write(BallsMerged {
            merged,
            source_level: merge.source_level,
            position: merge.position,
            score_gained: outcome.score_gained,
        });
        shake_events.write(ShakeEffect::for_level(merge.source_level));
    }
}

/// Safety valve on simulation cost: evict the oldest balls past the cap.
pub fn enforce_capacity(
    mut commands: Commands,
    cfg: Res<CapacityConfig>,
    mut session: ResMut<GameSession>,
    mut evicted_events: EventWriter<BallsEvicted>,
) {
    let evicted = session.evict_overflow(&cfg);
    if evicted.is_empty() {
        return;
    }
    for entity in &evicted {
        commands.entity(*entity).despawn();
    }
    info!(
        target: LOG_TARGET,
        "capacity: evicted {} oldest balls ({} remain)",
        evicted.len(),
        session.ball_count()
    );
    evicted_events.write(BallsEvicted {
        count: evicted.len(),
    });
}

pub fn halt_on_game_over(
    mut events: EventReader<GameOver>,
    mut rapier: Query<&mut RapierConfiguration>,
) {
    if events.read().last().is_none() {
        return;
    }
    for mut cfg in &mut rapier {
        cfg.physics_pipeline_active = false;
    }
    info!(target: "physics", "physics stepping halted");
}

pub fn resume_on_restart(
    mut events: EventReader<GameRestarted>,
    mut rapier: Query<&mut RapierConfiguration>,
) {
    if events.read().last().is_none() {
        return;
    }
    for mut cfg in &mut rapier {
        cfg.physics_pipeline_active = true;
    }
    info!(target: "physics", "physics stepping resumed");
}
