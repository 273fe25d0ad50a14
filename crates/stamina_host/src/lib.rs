pub mod boss_bar;
pub mod command;
pub mod console;
pub mod entity;
pub mod item;

use crate::command::{CommandIssued, SystemChat, TabCompleteRequest, TabCompleteSuggestions};
use bevy_app::{App, Plugin};
use bevy_time::{Fixed, Time, TimePlugin};
use std::num::NonZeroU32;

pub const DEFAULT_TPS: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Registers the host surface plugins build against: fixed tick rate and the
/// command and chat message channels.
pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<TimePlugin>() {
            app.add_plugins(TimePlugin);
        }
        app.insert_resource(Time::<Fixed>::from_hz(DEFAULT_TPS.get() as f64));
        app.add_message::<CommandIssued>();
        app.add_message::<TabCompleteRequest>();
        app.add_message::<TabCompleteSuggestions>();
        app.add_message::<SystemChat>();
    }
}
