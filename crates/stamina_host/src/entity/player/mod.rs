use crate::command::Permissions;
use crate::entity::physics::{OnGround, Velocity};
use crate::item::ItemId;
use bevy_ecs::bundle::Bundle;
use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::event::EntityEvent;
use bevy_ecs::prelude::{Commands, World};
use derive_more::{Deref, DerefMut};
use tracing::info;
use uuid::Uuid;

#[derive(Component, Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Player;

#[derive(Debug, Clone, Component, PartialEq, Eq)]
pub struct GameProfile {
    pub id: Uuid,
    pub username: String,
}

impl GameProfile {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Elytra gliding. Written by the client's start-flying action and by plugins
/// that need to ground a player.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
pub struct FallFlying(pub bool);

#[derive(Bundle)]
pub struct PlayerBundle {
    pub profile: GameProfile,
    pub fall_flying: FallFlying,
    pub on_ground: OnGround,
    pub velocity: Velocity,
    pub permissions: Permissions,
    pub marker: Player,
}

impl PlayerBundle {
    pub fn new(profile: GameProfile) -> Self {
        Self {
            profile,
            fall_flying: FallFlying(false),
            on_ground: OnGround(true),
            velocity: Velocity::default(),
            permissions: Permissions::default(),
            marker: Player,
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }
}

#[derive(EntityEvent, Debug)]
pub struct PlayerJoinEvent {
    #[event_target]
    pub player: Entity,
}

/// Fired while the player entity is still alive, right before it is despawned.
#[derive(EntityEvent, Debug)]
pub struct PlayerQuitEvent {
    #[event_target]
    pub player: Entity,
}

/// Right click with an item (or an empty hand) in the main hand.
#[derive(EntityEvent, Debug)]
pub struct PlayerInteractEvent {
    #[event_target]
    pub player: Entity,
    pub item: Option<ItemId>,
}

/// Fired for any living entity that starts or stops gliding, players included.
#[derive(EntityEvent, Debug)]
pub struct EntityToggleGlideEvent {
    pub entity: Entity,
    pub gliding: bool,
}

pub trait PlayerCommands {
    fn join_player(&mut self, bundle: PlayerBundle) -> Entity;

    fn disconnect_player(&mut self, player: Entity);
}

impl PlayerCommands for Commands<'_, '_> {
    fn join_player(&mut self, bundle: PlayerBundle) -> Entity {
        info!("Player {:?} has joined the game.", bundle.profile.username);
        let player = self.spawn(bundle).id();
        self.trigger(PlayerJoinEvent { player });
        player
    }

    fn disconnect_player(&mut self, player: Entity) {
        self.trigger(PlayerQuitEvent { player });
        self.entity(player).despawn();
    }
}

impl PlayerCommands for World {
    fn join_player(&mut self, bundle: PlayerBundle) -> Entity {
        info!("Player {:?} has joined the game.", bundle.profile.username);
        let player = self.spawn(bundle).id();
        self.trigger(PlayerJoinEvent { player });
        player
    }

    fn disconnect_player(&mut self, player: Entity) {
        self.trigger(PlayerQuitEvent { player });
        self.despawn(player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::observer::On;
    use bevy_ecs::prelude::{Query, ResMut, Resource};

    #[derive(Resource, Default)]
    struct Seen(Vec<&'static str>);

    #[test]
    fn quit_event_sees_live_player() {
        let mut world = World::new();
        world.init_resource::<Seen>();
        world.add_observer(|_: On<PlayerJoinEvent>, mut seen: ResMut<Seen>| {
            seen.0.push("join");
        });
        world.add_observer(
            |event: On<PlayerQuitEvent>, profiles: Query<&GameProfile>, mut seen: ResMut<Seen>| {
                if profiles.get(event.player).is_ok() {
                    seen.0.push("quit");
                }
            },
        );

        let player =
            world.join_player(PlayerBundle::new(GameProfile::new(Uuid::from_u128(1), "Steve")));
        world.disconnect_player(player);

        assert_eq!(world.resource::<Seen>().0, vec!["join", "quit"]);
        assert!(world.get_entity(player).is_err());
    }
}
