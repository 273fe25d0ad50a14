use bevy_ecs::prelude::Component;
use bevy_math::DVec3;
use derive_more::{Deref, DerefMut};

#[derive(Copy, Clone, Debug, Default, PartialEq, Deref, DerefMut, Component)]
pub struct Velocity(pub DVec3);

/// Set by the movement pipeline from the client's move flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deref, DerefMut, Component)]
pub struct OnGround(pub bool);
