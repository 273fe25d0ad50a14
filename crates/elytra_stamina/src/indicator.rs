use crate::config::StaminaSettings;
use crate::session::StaminaSession;
use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::{Commands, Query};
use stamina_host::boss_bar::{BarColor, BarStyle, BossBar, BossBarCommands};

pub const INDICATOR_TITLE: &str = "Elytra Stamina";

/// Mirrors the session's stamina onto its boss bar, spawning the bar for
/// `player` the first time. A full bar is hidden.
pub(crate) fn sync_indicator(
    session: &mut StaminaSession,
    player: Entity,
    settings: &StaminaSettings,
    bars: &mut Query<&mut BossBar>,
    commands: &mut Commands,
) {
    let ratio = session.fill_ratio(settings);
    let visible = ratio < 1.0;

    if let Some(mut bar) = session.indicator().and_then(|e| bars.get_mut(e).ok()) {
        bar.set_progress(ratio as f32);
        bar.visible = visible;
        return;
    }

    let mut bar = BossBar::new(INDICATOR_TITLE, BarColor::Green, BarStyle::Segmented10);
    bar.set_progress(ratio as f32);
    bar.visible = visible;
    session.set_indicator(commands.spawn_boss_bar(bar, player));
}
