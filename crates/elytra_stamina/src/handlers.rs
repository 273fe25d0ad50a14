use crate::config::StaminaSettings;
use crate::session::StaminaSessions;
use crate::task::StaminaTask;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::{Commands, Query, Res, ResMut, With};
use stamina_host::entity::player::{
    EntityToggleGlideEvent, GameProfile, Player, PlayerInteractEvent, PlayerJoinEvent,
    PlayerQuitEvent,
};
use stamina_host::item::minecraft::FIREWORK_ROCKET;
use tracing::debug;

pub(crate) fn player_joined(
    event: On<PlayerJoinEvent>,
    profiles: Query<&GameProfile>,
    settings: Res<StaminaSettings>,
    mut sessions: ResMut<StaminaSessions>,
) {
    let Ok(profile) = profiles.get(event.player) else {
        return;
    };
    sessions.get_or_create(profile.id, &settings);
    debug!("Tracking stamina for {}", profile.username);
}

pub(crate) fn player_quit(
    event: On<PlayerQuitEvent>,
    profiles: Query<&GameProfile>,
    mut sessions: ResMut<StaminaSessions>,
    mut commands: Commands,
) {
    let Ok(profile) = profiles.get(event.player) else {
        return;
    };
    let Some(session) = sessions.remove(&profile.id) else {
        return;
    };
    if let Some(indicator) = session.indicator() {
        commands.entity(indicator).despawn();
    }
    debug!("Dropped stamina for {}", profile.username);
}

pub(crate) fn rocket_used(
    event: On<PlayerInteractEvent>,
    profiles: Query<&GameProfile>,
    settings: Res<StaminaSettings>,
    mut sessions: ResMut<StaminaSessions>,
) {
    if !event.item.as_ref().is_some_and(|item| item.is(FIREWORK_ROCKET)) {
        return;
    }
    let Ok(profile) = profiles.get(event.player) else {
        return;
    };
    let left = sessions
        .get_or_create(profile.id, &settings)
        .spend(settings.rocket_cost);
    debug!("{} used a rocket, {left} stamina left", profile.username);
}

pub(crate) fn glide_toggled(
    event: On<EntityToggleGlideEvent>,
    players: Query<(), With<Player>>,
    mut task: ResMut<StaminaTask>,
) {
    if !players.contains(event.entity) || !event.gliding {
        return;
    }
    if task.start() {
        debug!("Starting stamina task");
    }
}
