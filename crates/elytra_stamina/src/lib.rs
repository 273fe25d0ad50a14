//! Stamina for elytra flight.
//!
//! Gliding drains a per-player stamina pool, standing on the ground refills
//! it and firing a rocket costs a fixed chunk. When the pool runs dry the
//! player is pulled out of the glide. A boss bar shows the pool while it is
//! not full.
//!
//! The per-tick work lives in a single system that only runs while
//! [`StaminaTask`] is [`StaminaTask::Running`]: the first player to start
//! gliding wakes it and it goes back to idle once everyone is full again.

pub mod command;
pub mod config;
mod handlers;
mod indicator;
pub mod session;
pub mod task;

pub use crate::command::{COMMAND_LABEL, SET_PERMISSION, StaminaCommandError};
pub use crate::config::{ConfigError, StaminaConfig, StaminaSettings};
pub use crate::indicator::INDICATOR_TITLE;
pub use crate::session::{GlideMotion, StaminaSession, StaminaSessions};
pub use crate::task::StaminaTask;

use bevy_app::{App, FixedUpdate, Plugin};
use bevy_ecs::schedule::IntoScheduleConfigs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const DEFAULT_DATA_DIR: &str = "plugins/ElytraStamina";

pub struct ElytraStaminaPlugin {
    data_dir: PathBuf,
    settings: Option<StaminaSettings>,
}

impl ElytraStaminaPlugin {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            settings: None,
        }
    }

    /// Uses `settings` as-is instead of reading the config file.
    pub fn with_settings(settings: StaminaSettings) -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            settings: Some(settings),
        }
    }
}

impl Default for ElytraStaminaPlugin {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl Plugin for ElytraStaminaPlugin {
    fn build(&self, app: &mut App) {
        let settings = self
            .settings
            .unwrap_or_else(|| load_settings(&self.data_dir));

        app.insert_resource(settings);
        app.init_resource::<StaminaSessions>();
        app.init_resource::<StaminaTask>();

        app.add_observer(handlers::player_joined);
        app.add_observer(handlers::player_quit);
        app.add_observer(handlers::rocket_used);
        app.add_observer(handlers::glide_toggled);

        app.add_systems(
            FixedUpdate,
            (
                command::handle_stamina_command,
                command::complete_stamina_command,
                task::stamina_tick.run_if(task::task_running),
            )
                .chain(),
        );
    }
}

fn load_settings(data_dir: &Path) -> StaminaSettings {
    match StaminaConfig::load_or_create(data_dir).and_then(StaminaSettings::try_from) {
        Ok(settings) => {
            info!(
                max_stamina = settings.max_stamina,
                glide_drain_per_tick = settings.glide_drain_per_tick,
                rocket_cost = settings.rocket_cost,
                regen_per_tick = settings.regen_per_tick,
                "Loaded stamina config"
            );
            settings
        }
        Err(e) => {
            error!("Failed to load stamina config from {}: {e}, using defaults", data_dir.display());
            StaminaSettings::default()
        }
    }
}
