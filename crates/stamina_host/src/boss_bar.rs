use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::prelude::Commands;
use derive_more::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarColor {
    Pink,
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    #[default]
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarStyle {
    #[default]
    Solid,
    Segmented6,
    Segmented10,
    Segmented12,
    Segmented20,
}

/// A boss bar lives on its own entity and is shown to every entity listed in
/// its [`BossBarViewers`].
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BossBar {
    pub title: String,
    pub color: BarColor,
    pub style: BarStyle,
    /// Fill in `[0, 1]`.
    pub progress: f32,
    pub visible: bool,
}

impl BossBar {
    pub fn new(title: impl Into<String>, color: BarColor, style: BarStyle) -> Self {
        Self {
            title: title.into(),
            color,
            style,
            progress: 1.0,
            visible: true,
        }
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}

#[derive(Component, Debug, Default, Clone, Deref)]
pub struct BossBarViewers(Vec<Entity>);

impl BossBarViewers {
    pub fn add_viewer(&mut self, viewer: Entity) -> bool {
        if !self.0.contains(&viewer) {
            self.0.push(viewer);
            true
        } else {
            false
        }
    }
}

pub trait BossBarCommands {
    fn spawn_boss_bar(&mut self, bar: BossBar, viewer: Entity) -> Entity;
}

impl BossBarCommands for Commands<'_, '_> {
    fn spawn_boss_bar(&mut self, bar: BossBar, viewer: Entity) -> Entity {
        let mut viewers = BossBarViewers::default();
        viewers.add_viewer(viewer);
        self.spawn((bar, viewers)).id()
    }
}
