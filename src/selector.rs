use crate::{
    catalog::ModeCatalog,
    mode::{AdapterIndex, Mode},
};
use std::collections::BTreeMap;

/// Only modes at this depth and refresh rate are considered by [`highest_mode`].
pub const QUALITY_BIT_DEPTH: u32 = 32;
pub const QUALITY_REFRESH_RATE: u32 = 60;

/// Picks the largest 32 bit, 60 Hz mode of every adapter.
///
/// Among modes of equal area the last one enumerated wins. Adapters without an
/// eligible mode are left out.
pub fn highest_mode(catalog: &ModeCatalog) -> BTreeMap<AdapterIndex, Mode> {
    catalog
        .iter()
        .filter_map(|(adapter, modes)| {
            let mut highest: Option<&Mode> = None;

            for mode in modes.iter().filter(|mode| {
                mode.bit_depth == QUALITY_BIT_DEPTH && mode.refresh_rate == QUALITY_REFRESH_RATE
            }) {
                if highest.map_or(true, |best| mode.area() >= best.area()) {
                    highest = Some(mode);
                }
            }

            highest.map(|mode| (adapter.index, *mode))
        })
        .collect()
}

/// First mode of the adapter equal to the request in every field but orientation.
pub fn exact_match(
    catalog: &ModeCatalog,
    index: AdapterIndex,
    width: u32,
    height: u32,
    bit_depth: u32,
    refresh_rate: u32,
) -> Option<Mode> {
    catalog
        .modes(index)?
        .iter()
        .find(|mode| mode.matches(width, height, bit_depth, refresh_rate))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        display::fake::{mode, FakeDisplay},
        mode::Orientation,
    };

    fn catalog(modes: Vec<Vec<Mode>>) -> ModeCatalog {
        ModeCatalog::build(&FakeDisplay::with_adapters(modes)).unwrap()
    }

    #[test]
    fn highest_mode_filters_depth_and_refresh() {
        let catalog = catalog(vec![vec![
            mode(2560, 1440, 16, 60),
            mode(2560, 1440, 32, 75),
            mode(1920, 1080, 32, 60),
            mode(1280, 720, 32, 60),
        ]]);

        let highest = highest_mode(&catalog);

        assert_eq!(highest.get(&0), Some(&mode(1920, 1080, 32, 60)));
    }

    #[test]
    fn highest_mode_last_equal_area_wins() {
        let first = mode(1920, 1080, 32, 60);
        let last = Mode {
            orientation: Orientation::UpsideDown,
            ..first
        };
        let catalog = catalog(vec![vec![
            mode(800, 600, 32, 60),
            first,
            last,
            mode(640, 480, 32, 60),
        ]]);

        assert_eq!(highest_mode(&catalog).get(&0), Some(&last));
    }

    #[test]
    fn highest_mode_ties_by_area_not_shape() {
        let catalog = catalog(vec![vec![mode(1600, 900, 32, 60), mode(900, 1600, 32, 60)]]);

        assert_eq!(highest_mode(&catalog).get(&0), Some(&mode(900, 1600, 32, 60)));
    }

    #[test]
    fn highest_mode_omits_adapters_without_eligible_modes() {
        let catalog = catalog(vec![
            vec![mode(1024, 768, 16, 60)],
            vec![],
            vec![mode(1024, 768, 32, 60)],
        ]);

        let highest = highest_mode(&catalog);

        assert_eq!(highest.len(), 1);
        assert!(highest.contains_key(&2));
    }

    #[test]
    fn highest_mode_is_repeatable() {
        let catalog = catalog(vec![
            vec![mode(1920, 1080, 32, 60), mode(1920, 1200, 32, 60)],
            vec![mode(1024, 768, 32, 60)],
        ]);

        let first = highest_mode(&catalog);
        for _ in 0..3 {
            assert_eq!(highest_mode(&catalog), first);
        }
    }

    #[test]
    fn exact_match_first_duplicate_wins() {
        let first = mode(1280, 1024, 32, 75);
        let second = Mode {
            orientation: Orientation::Clockwise,
            ..first
        };
        let catalog = catalog(vec![vec![mode(1280, 1024, 32, 60), first, second]]);

        assert_eq!(exact_match(&catalog, 0, 1280, 1024, 32, 75), Some(first));
    }

    #[test]
    fn exact_match_requires_every_field() {
        let catalog = catalog(vec![vec![mode(1280, 1024, 32, 75)]]);

        assert_eq!(exact_match(&catalog, 0, 1280, 1024, 32, 60), None);
        assert_eq!(exact_match(&catalog, 0, 1280, 1024, 16, 75), None);
        assert_eq!(exact_match(&catalog, 0, 1024, 1280, 32, 75), None);
    }

    #[test]
    fn exact_match_misses_unknown_adapter() {
        let catalog = catalog(vec![vec![mode(1280, 1024, 32, 75)], vec![]]);

        assert_eq!(exact_match(&catalog, 1, 1280, 1024, 32, 75), None);
        assert_eq!(exact_match(&catalog, 7, 1280, 1024, 32, 75), None);
    }
}
