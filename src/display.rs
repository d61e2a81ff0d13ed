#[cfg(target_os = "windows")]
mod windows;

use crate::{
    error::{Error, Result},
    mode::{AdapterIndex, Mode},
};

/// Status the OS returns for an accepted mode change.
pub const COMMIT_SUCCESS: i32 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Adapter {
    pub index: AdapterIndex,
    pub name: String,
    pub is_primary: bool,
}

/// Boundary to the OS display configuration API.
///
/// Every call re-enumerates from scratch, nothing is cached between calls.
pub trait DisplaySystem {
    fn adapters(&self) -> Result<Vec<Adapter>>;

    fn modes(&self, adapter: &Adapter) -> Result<Vec<Mode>>;

    fn current_mode(&self, adapter: &Adapter) -> Result<Option<Mode>>;

    /// Requests the mode change and returns the raw OS status.
    fn commit(&self, adapter: &Adapter, mode: &Mode) -> i32;
}

pub fn system() -> Box<dyn DisplaySystem> {
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::Win32Display)
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(Unsupported)
    }
}

#[cfg(not(target_os = "windows"))]
struct Unsupported;

#[cfg(not(target_os = "windows"))]
impl Unsupported {
    fn error() -> Error {
        Error::Enumeration(format!(
            "display configuration is not available on {}",
            std::env::consts::OS
        ))
    }
}

#[cfg(not(target_os = "windows"))]
impl DisplaySystem for Unsupported {
    fn adapters(&self) -> Result<Vec<Adapter>> {
        Err(Self::error())
    }

    fn modes(&self, _adapter: &Adapter) -> Result<Vec<Mode>> {
        Err(Self::error())
    }

    fn current_mode(&self, _adapter: &Adapter) -> Result<Option<Mode>> {
        Err(Self::error())
    }

    fn commit(&self, _adapter: &Adapter, _mode: &Mode) -> i32 {
        -1
    }
}

pub fn find_adapter(system: &dyn DisplaySystem, index: AdapterIndex) -> Result<Adapter> {
    system
        .adapters()?
        .into_iter()
        .find(|adapter| adapter.index == index)
        .ok_or_else(|| Error::Enumeration(format!("display {index} is not connected")))
}
