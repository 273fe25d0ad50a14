use crate::config::StaminaSettings;
use crate::indicator::sync_indicator;
use crate::session::{GlideMotion, StaminaSessions};
use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::{Commands, Query, Res, ResMut, With};
use bevy_ecs::resource::Resource;
use bevy_math::DVec3;
use stamina_host::boss_bar::BossBar;
use stamina_host::entity::physics::{OnGround, Velocity};
use stamina_host::entity::player::{FallFlying, GameProfile, Player};
use tracing::debug;

/// Downward push given to a player whose elytra gives out, so they do not hang
/// in the air on the tick gliding stops.
pub const EXHAUSTED_VELOCITY: DVec3 = DVec3::new(0.0, -1.0, 0.0);

/// The stamina job runs while any online player is below max and idles
/// otherwise. A player starting to glide wakes it up.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StaminaTask {
    #[default]
    Idle,
    Running,
}

impl StaminaTask {
    pub fn is_running(&self) -> bool {
        *self == StaminaTask::Running
    }

    /// Returns `false` when the job was already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        *self = StaminaTask::Running;
        true
    }

    pub fn cancel(&mut self) {
        *self = StaminaTask::Idle;
    }
}

pub(crate) fn task_running(task: Res<StaminaTask>) -> bool {
    task.is_running()
}

pub(crate) fn stamina_tick(
    settings: Res<StaminaSettings>,
    mut task: ResMut<StaminaTask>,
    mut sessions: ResMut<StaminaSessions>,
    mut players: Query<
        (
            Entity,
            &GameProfile,
            &mut FallFlying,
            &OnGround,
            &mut Velocity,
        ),
        With<Player>,
    >,
    mut bars: Query<&mut BossBar>,
    mut commands: Commands,
) {
    let mut any_below_max = false;

    for (entity, profile, mut fall_flying, on_ground, mut velocity) in players.iter_mut() {
        let session = sessions.get_or_create(profile.id, &settings);
        let value = session.tick(GlideMotion::of(**fall_flying, **on_ground), &settings);

        if value < settings.max_stamina {
            any_below_max = true;
        }

        if value <= 0.0 && **fall_flying {
            **fall_flying = false;
            **velocity = EXHAUSTED_VELOCITY;
            debug!("{} ran out of stamina mid-glide", profile.username);
        }

        sync_indicator(session, entity, &settings, &mut bars, &mut commands);
    }

    if !any_below_max {
        task.cancel();
        debug!("All players at full stamina, stopping stamina task");
    }
}
