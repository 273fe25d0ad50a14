use crate::config::StaminaSettings;
use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// What a player is doing this tick, as far as stamina is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlideMotion {
    Gliding,
    Grounded,
    /// Falling, jumping or swimming without an elytra: stamina is left alone.
    Airborne,
}

impl GlideMotion {
    pub fn of(gliding: bool, on_ground: bool) -> Self {
        if gliding {
            GlideMotion::Gliding
        } else if on_ground {
            GlideMotion::Grounded
        } else {
            GlideMotion::Airborne
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaminaSession {
    stamina: f64,
    indicator: Option<Entity>,
}

impl StaminaSession {
    pub fn new(settings: &StaminaSettings) -> Self {
        Self {
            stamina: settings.max_stamina,
            indicator: None,
        }
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    pub fn indicator(&self) -> Option<Entity> {
        self.indicator
    }

    pub(crate) fn set_indicator(&mut self, indicator: Entity) {
        self.indicator = Some(indicator);
    }

    /// Advances one tick and returns the clamped value.
    pub fn tick(&mut self, motion: GlideMotion, settings: &StaminaSettings) -> f64 {
        let delta = match motion {
            GlideMotion::Gliding => -settings.glide_drain_per_tick,
            GlideMotion::Grounded => settings.regen_per_tick,
            GlideMotion::Airborne => 0.0,
        };
        self.stamina = settings.clamp(self.stamina + delta);
        self.stamina
    }

    pub fn spend(&mut self, cost: f64) -> f64 {
        self.stamina = (self.stamina - cost).max(0.0);
        self.stamina
    }

    pub fn set(&mut self, amount: f64, settings: &StaminaSettings) -> f64 {
        self.stamina = settings.clamp(amount);
        self.stamina
    }

    pub fn is_full(&self, settings: &StaminaSettings) -> bool {
        self.stamina >= settings.max_stamina
    }

    /// Indicator fill in `[0, 1]`.
    pub fn fill_ratio(&self, settings: &StaminaSettings) -> f64 {
        (self.stamina / settings.max_stamina).clamp(0.0, 1.0)
    }
}

/// Per-player stamina state, keyed by profile id. Entries are created on join
/// (or first use) and dropped on quit.
#[derive(Resource, Debug, Default)]
pub struct StaminaSessions {
    sessions: FxHashMap<Uuid, StaminaSession>,
}

impl StaminaSessions {
    pub fn get(&self, id: &Uuid) -> Option<&StaminaSession> {
        self.sessions.get(id)
    }

    pub fn stamina(&self, id: &Uuid) -> Option<f64> {
        self.sessions.get(id).map(StaminaSession::stamina)
    }

    pub fn get_or_create(&mut self, id: Uuid, settings: &StaminaSettings) -> &mut StaminaSession {
        self.sessions
            .entry(id)
            .or_insert_with(|| StaminaSession::new(settings))
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<StaminaSession> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn motion_priority() {
        assert_eq!(GlideMotion::of(true, true), GlideMotion::Gliding);
        assert_eq!(GlideMotion::of(true, false), GlideMotion::Gliding);
        assert_eq!(GlideMotion::of(false, true), GlideMotion::Grounded);
        assert_eq!(GlideMotion::of(false, false), GlideMotion::Airborne);
    }

    #[test]
    fn glide_then_regen() {
        let settings = StaminaSettings::default();
        let mut session = StaminaSession::new(&settings);

        for _ in 0..60 {
            session.tick(GlideMotion::Gliding, &settings);
        }
        assert!(approx(session.stamina(), 57.0));

        for _ in 0..200 {
            session.tick(GlideMotion::Grounded, &settings);
        }
        assert!(approx(session.stamina(), 60.0));
        assert!(session.stamina() <= settings.max_stamina);
    }

    #[test]
    fn airborne_is_unchanged() {
        let settings = StaminaSettings::default();
        let mut session = StaminaSession::new(&settings);
        session.set(30.0, &settings);
        assert_eq!(session.tick(GlideMotion::Airborne, &settings), 30.0);
    }

    #[test]
    fn stays_within_bounds_for_any_sequence() {
        let settings = StaminaSettings {
            max_stamina: 5.0,
            glide_drain_per_tick: 0.7,
            rocket_cost: 2.5,
            regen_per_tick: 0.4,
        };
        let mut session = StaminaSession::new(&settings);
        for _ in 0..10_000 {
            let value = match rand::random::<u8>() % 5 {
                0 => session.tick(GlideMotion::Gliding, &settings),
                1 => session.tick(GlideMotion::Grounded, &settings),
                2 => session.tick(GlideMotion::Airborne, &settings),
                3 => session.spend(settings.rocket_cost),
                _ => session.set((rand::random::<f64>() - 0.5) * 20.0, &settings),
            };
            assert!((0.0..=settings.max_stamina).contains(&value), "{value}");
            assert!((0.0..=1.0).contains(&session.fill_ratio(&settings)));
        }
    }

    #[test]
    fn spend_floors_at_zero() {
        let settings = StaminaSettings::default();
        let mut session = StaminaSession::new(&settings);
        assert_eq!(session.spend(10.0), 50.0);
        session.set(4.0, &settings);
        assert_eq!(session.spend(10.0), 0.0);
    }

    #[test]
    fn set_clamps() {
        let settings = StaminaSettings::default();
        let mut session = StaminaSession::new(&settings);
        assert_eq!(session.set(-5.0, &settings), 0.0);
        assert_eq!(session.set(settings.max_stamina * 2.0, &settings), 60.0);
        assert!(session.is_full(&settings));
    }

    #[test]
    fn sessions_are_created_once() {
        let settings = StaminaSettings::default();
        let mut sessions = StaminaSessions::default();
        let id = Uuid::from_u128(42);

        sessions.get_or_create(id, &settings).spend(10.0);
        assert_eq!(sessions.get_or_create(id, &settings).stamina(), 50.0);
        assert_eq!(sessions.len(), 1);

        assert!(sessions.remove(&id).is_some());
        assert!(sessions.stamina(&id).is_none());
    }
}
