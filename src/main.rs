use bevy_app::{
    App, AppExit, FixedLast, FixedPostUpdate, FixedPreUpdate, FixedUpdate, ScheduleRunnerPlugin,
    Update,
};
use bevy_ecs::schedule::ExecutorKind;
use bevy_log::LogPlugin;
use bevy_time::TimePlugin;
use elytra_stamina::{DEFAULT_DATA_DIR, ElytraStaminaPlugin};
use stamina_host::console::ConsolePlugin;
use stamina_host::{DEFAULT_TPS, HostPlugin};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let data_dir =
        std::env::var("ELYTRA_STAMINA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

    let exit = App::new()
        .add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / DEFAULT_TPS.get() as f64,
        )))
        .add_plugins(TimePlugin)
        .add_plugins(LogPlugin::default())
        .add_plugins(HostPlugin)
        .add_plugins(ConsolePlugin)
        .add_plugins(ElytraStaminaPlugin::new(data_dir))
        .edit_schedule(Update, |s| { s.set_executor_kind(ExecutorKind::SingleThreaded); })
        .edit_schedule(FixedPreUpdate, |s| { s.set_executor_kind(ExecutorKind::SingleThreaded); })
        .edit_schedule(FixedUpdate, |s| { s.set_executor_kind(ExecutorKind::SingleThreaded); })
        .edit_schedule(FixedPostUpdate, |s| { s.set_executor_kind(ExecutorKind::SingleThreaded); })
        .edit_schedule(FixedLast, |s| { s.set_executor_kind(ExecutorKind::SingleThreaded); })
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("server exited with code {code}"),
    }
}
