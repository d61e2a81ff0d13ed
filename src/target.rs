use crate::mode::{AdapterIndex, Mode, Orientation};
use std::{collections::BTreeMap, fmt};

/// Requested mode for one adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSpec {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u32,
    pub refresh_rate: u32,
    /// `None` keeps whatever orientation the matched mode has.
    pub orientation: Option<Orientation>,
    pub applied: bool,
}

impl TargetSpec {
    pub fn new(width: u32, height: u32, bit_depth: u32, refresh_rate: u32) -> Self {
        Self {
            width,
            height,
            bit_depth,
            refresh_rate,
            orientation: None,
            applied: false,
        }
    }

    /// Target that keeps the dimensions, depth and refresh rate of `mode`.
    pub fn from_mode(mode: &Mode) -> Self {
        Self::new(mode.width, mode.height, mode.bit_depth, mode.refresh_rate)
    }

    pub fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation: Some(orientation),
            ..self
        }
    }

    pub fn matches(&self, mode: &Mode) -> bool {
        mode.matches(self.width, self.height, self.bit_depth, self.refresh_rate)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {}, {} bits, {} Hz",
            self.width, self.height, self.bit_depth, self.refresh_rate
        )?;

        match self.orientation {
            Some(orientation) => write!(f, " (Orientation: {orientation:?})"),
            None => write!(f, " (Orientation: unchanged)"),
        }
    }
}

/// Targets keyed by adapter, processed in index order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSet {
    targets: BTreeMap<AdapterIndex, TargetSpec>,
}

impl TargetSet {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn get(&self, index: AdapterIndex) -> Option<&TargetSpec> {
        self.targets.get(&index)
    }

    pub fn insert(&mut self, index: AdapterIndex, target: TargetSpec) {
        self.targets.insert(index, target);
    }

    /// Overwrites the requested mode, keeping any rotation already set for the adapter.
    pub fn set_mode(
        &mut self,
        index: AdapterIndex,
        width: u32,
        height: u32,
        bit_depth: u32,
        refresh_rate: u32,
    ) {
        let target = self
            .targets
            .entry(index)
            .or_insert_with(|| TargetSpec::new(width, height, bit_depth, refresh_rate));

        target.width = width;
        target.height = height;
        target.bit_depth = bit_depth;
        target.refresh_rate = refresh_rate;
    }

    /// Sets the rotation of an adapter. A new target starts from `current`.
    pub fn set_rotation<E>(
        &mut self,
        index: AdapterIndex,
        orientation: Orientation,
        current: impl FnOnce() -> Result<TargetSpec, E>,
    ) -> Result<(), E> {
        match self.targets.get_mut(&index) {
            Some(target) => target.orientation = Some(orientation),
            None => {
                self.targets
                    .insert(index, current()?.with_orientation(orientation));
            }
        }

        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (AdapterIndex, &TargetSpec)> {
        self.targets.iter().map(|(index, target)| (*index, target))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AdapterIndex, &mut TargetSpec)> {
        self.targets.iter_mut().map(|(index, target)| (*index, target))
    }

    pub fn outcomes(&self) -> BTreeMap<AdapterIndex, bool> {
        self.iter().map(|(index, target)| (index, target.applied)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn rotation_then_mode_compose() {
        let mut targets = TargetSet::default();

        targets
            .set_rotation(0, Orientation::Clockwise, || {
                Ok::<_, Infallible>(TargetSpec::new(1024, 768, 32, 60))
            })
            .unwrap();
        targets.set_mode(0, 1920, 1080, 32, 75);

        assert_eq!(
            targets.get(0),
            Some(&TargetSpec::new(1920, 1080, 32, 75).with_orientation(Orientation::Clockwise))
        );
    }

    #[test]
    fn mode_then_rotation_compose() {
        let mut targets = TargetSet::default();

        targets.set_mode(1, 1920, 1080, 32, 75);
        targets
            .set_rotation(1, Orientation::UpsideDown, || -> Result<TargetSpec, Infallible> {
                panic!("existing target must not be rebuilt")
            })
            .unwrap();

        assert_eq!(
            targets.get(1),
            Some(&TargetSpec::new(1920, 1080, 32, 75).with_orientation(Orientation::UpsideDown))
        );
    }

    #[test]
    fn later_mode_overwrites() {
        let mut targets = TargetSet::default();

        targets.set_mode(0, 1920, 1080, 32, 75);
        targets.set_mode(0, 800, 600, 16, 60);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets.get(0), Some(&TargetSpec::new(800, 600, 16, 60)));
    }

    #[test]
    fn describes_unchanged_orientation() {
        let target = TargetSpec::new(800, 600, 16, 60);

        assert_eq!(target.to_string(), "800 x 600, 16 bits, 60 Hz (Orientation: unchanged)");
        assert_eq!(
            target.with_orientation(Orientation::AntiClockwise).to_string(),
            "800 x 600, 16 bits, 60 Hz (Orientation: AntiClockwise)"
        );
    }
}
