use crate::mode::{Mode, Orientation};

/// Physical dimensions and orientation to request from the OS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

impl Resolved {
    pub fn apply_to(self, mode: &Mode) -> Mode {
        Mode {
            width: self.width,
            height: self.height,
            orientation: self.orientation,
            ..*mode
        }
    }
}

/// Works out what to request when `current` is rotated to `desired`.
///
/// The OS expects width and height to be swapped manually when the display
/// changes from portrait to landscape or vice versa.
pub fn resolve(current: &Mode, desired: Orientation) -> Resolved {
    let (width, height) = if is_need_to_swap_dimensions(current.orientation, desired) {
        (current.height, current.width)
    } else {
        (current.width, current.height)
    };

    Resolved {
        width,
        height,
        orientation: desired,
    }
}

fn is_need_to_swap_dimensions(current: Orientation, desired: Orientation) -> bool {
    current.axis() != desired.axis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fake::mode;

    fn oriented(orientation: Orientation) -> Mode {
        Mode {
            orientation,
            ..mode(1920, 1080, 32, 60)
        }
    }

    #[test]
    fn landscape_to_portrait_swaps() {
        let resolved = resolve(&oriented(Orientation::Default), Orientation::Clockwise);

        assert_eq!(
            resolved,
            Resolved {
                width: 1080,
                height: 1920,
                orientation: Orientation::Clockwise,
            }
        );
    }

    #[test]
    fn portrait_to_portrait_keeps_dimensions() {
        let resolved = resolve(&oriented(Orientation::Clockwise), Orientation::AntiClockwise);

        assert_eq!((resolved.width, resolved.height), (1920, 1080));
        assert_eq!(resolved.orientation, Orientation::AntiClockwise);
    }

    #[test]
    fn half_turn_keeps_dimensions() {
        let resolved = resolve(&oriented(Orientation::Default), Orientation::UpsideDown);

        assert_eq!((resolved.width, resolved.height), (1920, 1080));
        assert_eq!(resolved.orientation, Orientation::UpsideDown);
    }

    #[test]
    fn portrait_to_landscape_swaps() {
        let resolved = resolve(&oriented(Orientation::AntiClockwise), Orientation::UpsideDown);

        assert_eq!((resolved.width, resolved.height), (1080, 1920));
    }

    #[test]
    fn every_pair_swaps_only_across_axes() {
        let all = [
            Orientation::Default,
            Orientation::Clockwise,
            Orientation::UpsideDown,
            Orientation::AntiClockwise,
        ];

        for current in all {
            for desired in all {
                let resolved = resolve(&oriented(current), desired);
                let swapped = resolved.width == 1080;

                assert_eq!(swapped, current.axis() != desired.axis(), "{current:?} -> {desired:?}");
                assert_eq!(resolved.orientation, desired);
            }
        }
    }

    #[test]
    fn apply_keeps_depth_and_refresh() {
        let current = Mode {
            refresh_rate: 75,
            ..oriented(Orientation::Default)
        };

        let requested = resolve(&current, Orientation::Clockwise).apply_to(&current);

        assert_eq!(
            requested,
            Mode {
                width: 1080,
                height: 1920,
                bit_depth: 32,
                refresh_rate: 75,
                orientation: Orientation::Clockwise,
            }
        );
    }
}
