use std::borrow::Cow;
use std::fmt;
use valence_ident::{Ident, IdentError};

/// Namespaced item identifier. Ids without a namespace are read as
/// `minecraft:<path>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId(Ident<Cow<'static, str>>);

impl ItemId {
    pub fn new(id: impl Into<Cow<'static, str>>) -> Result<Self, IdentError> {
        Ident::new(id).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn namespace(&self) -> &str {
        self.0.namespace()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub fn is(&self, id: &str) -> bool {
        Ident::new(id).is_ok_and(|other| other.as_str() == self.as_str())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod minecraft {
    pub const ELYTRA: &str = "minecraft:elytra";
    pub const FIREWORK_ROCKET: &str = "minecraft:firework_rocket";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_namespace_is_minecraft() {
        let id = ItemId::new("firework_rocket").unwrap();
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "firework_rocket");
        assert_eq!(id.as_str(), minecraft::FIREWORK_ROCKET);
        assert_eq!(id, ItemId::new(minecraft::FIREWORK_ROCKET).unwrap());
    }

    #[test]
    fn is_normalizes_both_sides() {
        let id = ItemId::new("minecraft:firework_rocket").unwrap();
        assert!(id.is("firework_rocket"));
        assert!(id.is(minecraft::FIREWORK_ROCKET));
        assert!(!id.is(minecraft::ELYTRA));
        assert!(!id.is("Not An Id"));
    }

    #[test]
    fn rejects_invalid_ids() {
        assert!(ItemId::new("Firework Rocket").is_err());
    }
}
