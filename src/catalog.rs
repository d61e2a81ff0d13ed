use crate::{
    display::{Adapter, DisplaySystem},
    error::Result,
    mode::{AdapterIndex, Mode},
};
use std::collections::BTreeMap;

/// Snapshot of every adapter's supported modes, in the order the OS reported them.
///
/// Built fresh for each operation since the adapter configuration may change between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeCatalog {
    adapters: BTreeMap<AdapterIndex, (Adapter, Vec<Mode>)>,
}

impl ModeCatalog {
    pub fn build(system: &dyn DisplaySystem) -> Result<Self> {
        let mut catalog = Self::default();

        for adapter in system.adapters()? {
            let modes = system.modes(&adapter)?;

            // Virtual and disabled adapters expose no modes.
            if modes.is_empty() {
                log::debug!("{}: no modes reported, skipping", adapter.name);
                continue;
            }

            catalog.insert(adapter, modes);
        }

        Ok(catalog)
    }

    pub fn insert(&mut self, adapter: Adapter, modes: Vec<Mode>) {
        self.adapters.insert(adapter.index, (adapter, modes));
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn adapter(&self, index: AdapterIndex) -> Option<&Adapter> {
        self.adapters.get(&index).map(|(adapter, _)| adapter)
    }

    pub fn modes(&self, index: AdapterIndex) -> Option<&[Mode]> {
        self.adapters.get(&index).map(|(_, modes)| modes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Adapter, &[Mode])> {
        self.adapters
            .values()
            .map(|(adapter, modes)| (adapter, modes.as_slice()))
    }
}

/// Number of adapters that report at least one mode.
pub fn adapter_count(system: &dyn DisplaySystem) -> Result<usize> {
    ModeCatalog::build(system).map(|catalog| catalog.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        display::fake::{mode, FakeDisplay},
        error::Error,
    };

    #[test]
    fn keeps_enumeration_order() {
        let modes = vec![
            mode(1024, 768, 32, 60),
            mode(640, 480, 16, 60),
            mode(1920, 1080, 32, 60),
            mode(640, 480, 16, 60),
        ];
        let system = FakeDisplay::with_adapters(vec![modes.clone()]);

        let catalog = ModeCatalog::build(&system).unwrap();

        assert_eq!(catalog.modes(0), Some(modes.as_slice()));
    }

    #[test]
    fn omits_adapters_without_modes() {
        let system = FakeDisplay::with_adapters(vec![
            vec![mode(1024, 768, 32, 60)],
            vec![],
            vec![mode(800, 600, 16, 60)],
        ]);

        let catalog = ModeCatalog::build(&system).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.modes(1).is_none());
        assert_eq!(catalog.adapter(2).map(|a| a.name.as_str()), Some("\\\\.\\DISPLAY3"));
        assert_eq!(adapter_count(&system).unwrap(), 2);
    }

    #[test]
    fn no_adapters_is_not_an_error() {
        let system = FakeDisplay::default();

        let catalog = ModeCatalog::build(&system).unwrap();

        assert!(catalog.is_empty());
    }

    #[test]
    fn unreachable_enumerator_fails() {
        let system = FakeDisplay {
            unreachable: true,
            ..FakeDisplay::default()
        };

        assert!(matches!(
            ModeCatalog::build(&system),
            Err(Error::Enumeration(_))
        ));
    }
}
