use super::{Adapter, DisplaySystem};
use crate::{
    error::{Error, Result},
    mode::{Mode, Orientation, VALID_BIT_DEPTHS},
};
use std::{
    ffi::{CStr, CString},
    mem::{size_of, zeroed},
    ptr::null,
};
use windows_sys::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsExA, EnumDisplayDevicesA, EnumDisplaySettingsA, DEVMODEA,
    DEVMODE_DISPLAY_ORIENTATION, DISPLAY_DEVICEA, DISPLAY_DEVICE_PRIMARY_DEVICE,
    DISP_CHANGE_BADPARAM, DMDO_180, DMDO_270, DMDO_90, DMDO_DEFAULT, DM_BITSPERPEL,
    DM_DISPLAYFREQUENCY, DM_DISPLAYORIENTATION, DM_PELSHEIGHT, DM_PELSWIDTH,
    ENUM_CURRENT_SETTINGS,
};

/// Dynamic change, the OS decides what survives a reboot.
const COMMIT_FLAGS: u32 = 0;

pub struct Win32Display;

impl DisplaySystem for Win32Display {
    fn adapters(&self) -> Result<Vec<Adapter>> {
        let adapters = (0..)
            .map_while(get_display_device)
            .enumerate()
            .map(|(index, display_device)| {
                // SAFETY: `DISPLAY_DEVICEA.DeviceName` should be valid pointer
                // to nul-terminated string.
                let name =
                    unsafe { CStr::from_ptr(display_device.DeviceName.as_ptr().cast()) };

                Adapter {
                    index,
                    name: name.to_string_lossy().trim().to_owned(),
                    is_primary: display_device.StateFlags & DISPLAY_DEVICE_PRIMARY_DEVICE != 0,
                }
            })
            .collect();

        Ok(adapters)
    }

    fn modes(&self, adapter: &Adapter) -> Result<Vec<Mode>> {
        let device_name = device_name(adapter)?;

        let modes = (0..)
            .map_while(|mode_num| enum_display_settings(&device_name, mode_num))
            .filter_map(|display_mode| {
                let mode = mode_from_display_mode(&display_mode);
                if mode.is_none() {
                    log::warn!(
                        "{}: skipping mode with unsupported depth or orientation",
                        adapter.name
                    );
                }
                mode
            })
            .collect();

        Ok(modes)
    }

    fn current_mode(&self, adapter: &Adapter) -> Result<Option<Mode>> {
        let device_name = device_name(adapter)?;

        Ok(enum_display_settings(&device_name, ENUM_CURRENT_SETTINGS)
            .as_ref()
            .and_then(mode_from_display_mode))
    }

    fn commit(&self, adapter: &Adapter, mode: &Mode) -> i32 {
        let Ok(device_name) = device_name(adapter) else {
            return DISP_CHANGE_BADPARAM;
        };

        let mut display_mode = enum_display_settings(&device_name, ENUM_CURRENT_SETTINGS)
            .unwrap_or_else(empty_display_mode);

        display_mode.dmPelsWidth = mode.width;
        display_mode.dmPelsHeight = mode.height;
        display_mode.dmBitsPerPel = mode.bit_depth;
        display_mode.dmDisplayFrequency = mode.refresh_rate;
        display_mode.Anonymous1.Anonymous2.dmDisplayOrientation =
            orientation_to_display_mode(mode.orientation);
        display_mode.dmFields |= DM_PELSWIDTH
            | DM_PELSHEIGHT
            | DM_BITSPERPEL
            | DM_DISPLAYFREQUENCY
            | DM_DISPLAYORIENTATION;

        change_display_mode(&device_name, &display_mode)
    }
}

fn device_name(adapter: &Adapter) -> Result<CString> {
    CString::new(adapter.name.as_str()).map_err(|err| {
        Error::Enumeration(format!(
            "converting device name of display {}: {err}",
            adapter.index
        ))
    })
}

fn get_display_device(index: u32) -> Option<DISPLAY_DEVICEA> {
    let mut display_device = DISPLAY_DEVICEA {
        cb: size_of::<DISPLAY_DEVICEA>() as _,

        // SAFETY: structure can be zeroed because it will be filled correctly
        // by `EnumDisplayDevicesA`.
        ..unsafe { zeroed() }
    };

    // SAFETY: `EnumDisplayDevicesA` is safe when `lpdisplaydevice` is
    // valid structure pointer with initialized `cb` field.
    let status = unsafe { EnumDisplayDevicesA(null(), index, &mut display_device, 0) };

    // Zero means there is no device at this index, which ends the enumeration.
    (status != 0).then_some(display_device)
}

fn empty_display_mode() -> DEVMODEA {
    DEVMODEA {
        dmSize: size_of::<DEVMODEA>() as _,

        // SAFETY: structure can be zeroed because it will be filled correctly
        // by `EnumDisplaySettingsA`.
        ..unsafe { zeroed() }
    }
}

fn enum_display_settings(device_name: &CStr, mode_num: u32) -> Option<DEVMODEA> {
    let mut display_mode = empty_display_mode();

    // SAFETY: `EnumDisplaySettingsA` is safe when `lpszdevicename` is valid
    // pointer to nul-terminated string and `lpdevmode` is valid structure pointer.
    let status = unsafe {
        EnumDisplaySettingsA(device_name.as_ptr().cast(), mode_num, &mut display_mode)
    };

    (status != 0).then_some(display_mode)
}

fn mode_from_display_mode(display_mode: &DEVMODEA) -> Option<Mode> {
    // SAFETY: display devices always fill the display variant of the union.
    let orientation = unsafe { display_mode.Anonymous1.Anonymous2.dmDisplayOrientation };

    let bit_depth = display_mode.dmBitsPerPel;
    if !VALID_BIT_DEPTHS.contains(&bit_depth) {
        return None;
    }

    Some(Mode {
        width: display_mode.dmPelsWidth,
        height: display_mode.dmPelsHeight,
        bit_depth,
        refresh_rate: display_mode.dmDisplayFrequency,
        orientation: display_mode_to_orientation(orientation)?,
    })
}

fn orientation_to_display_mode(orientation: Orientation) -> DEVMODE_DISPLAY_ORIENTATION {
    match orientation {
        Orientation::Default => DMDO_DEFAULT,
        Orientation::AntiClockwise => DMDO_90,
        Orientation::UpsideDown => DMDO_180,
        Orientation::Clockwise => DMDO_270,
    }
}

fn display_mode_to_orientation(orientation: DEVMODE_DISPLAY_ORIENTATION) -> Option<Orientation> {
    match orientation {
        DMDO_DEFAULT => Some(Orientation::Default),
        DMDO_90 => Some(Orientation::AntiClockwise),
        DMDO_180 => Some(Orientation::UpsideDown),
        DMDO_270 => Some(Orientation::Clockwise),
        _ => None,
    }
}

fn change_display_mode(device_name: &CStr, display_mode: &DEVMODEA) -> i32 {
    // SAFETY: `ChangeDisplaySettingsExA` is safe when `lpszdevicename` is valid
    // pointer to nul-terminated string and `lpdevmode` is valid structure pointer.
    unsafe {
        ChangeDisplaySettingsExA(
            device_name.as_ptr().cast(),
            display_mode,
            0,
            COMMIT_FLAGS,
            null(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_codes_match_native_values() {
        for orientation in [
            Orientation::Default,
            Orientation::Clockwise,
            Orientation::UpsideDown,
            Orientation::AntiClockwise,
        ] {
            let code = orientation_to_display_mode(orientation);
            assert_eq!(code, orientation.native_code());
            assert_eq!(display_mode_to_orientation(code), Some(orientation));
        }

        assert_eq!(orientation_to_display_mode(Orientation::Clockwise), DMDO_270);
        assert_eq!(orientation_to_display_mode(Orientation::AntiClockwise), DMDO_90);
    }

    #[test]
    fn device_name_with_nul_is_an_enumeration_failure() {
        let adapter = Adapter {
            index: 1,
            name: "\\\\.\\DISPLAY\0".to_string(),
            is_primary: false,
        };

        assert!(matches!(device_name(&adapter), Err(Error::Enumeration(_))));
    }
}
