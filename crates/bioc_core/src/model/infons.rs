//! Free-form key/value metadata shared by every structural entity.

use std::collections::BTreeMap;

/// String key/value metadata. Ordering carries no meaning; a sorted map keeps
/// debug output and serialized form stable.
pub type Infons = BTreeMap<String, String>;

/// Accessors over an entity's infons.
///
/// Implementors only provide `infons` and `infons_mut`; the rest are derived.
pub trait HasInfons {
    fn infons(&self) -> &Infons;

    fn infons_mut(&mut self) -> &mut Infons;

    /// Returns the value mapped to `key`, if any.
    fn infon(&self, key: &str) -> Option<&str> {
        self.infons().get(key).map(String::as_str)
    }

    fn put_infon(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.infons_mut().insert(key.into(), value.into());
    }

    fn put_all_infons(&mut self, infons: &Infons) {
        self.infons_mut()
            .extend(infons.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Removes `key` and returns its previous value.
    fn remove_infon(&mut self, key: &str) -> Option<String> {
        self.infons_mut().remove(key)
    }

    fn clear_infons(&mut self) {
        self.infons_mut().clear();
    }

    /// Replaces all infons with a copy of `infons`.
    fn set_infons(&mut self, infons: &Infons) {
        self.clear_infons();
        self.put_all_infons(infons);
    }
}
