use crate::error::{Error, Result};
use clap::ValueEnum;
use std::process::Command;

const DISPLAY_SWITCH: &str = "DisplaySwitch.exe";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicationMode {
    Internal,
    External,
    Extend,
    Duplicate,
}

impl DuplicationMode {
    fn switch_arg(self) -> &'static str {
        match self {
            DuplicationMode::Internal => "/internal",
            DuplicationMode::External => "/external",
            DuplicationMode::Extend => "/extend",
            DuplicationMode::Duplicate => "/clone",
        }
    }
}

/// Starts the OS helper that changes duplication. The helper is not awaited.
pub fn switch(mode: DuplicationMode) -> Result<()> {
    log::info!("Switching duplication mode to {mode:?}");

    Command::new(DISPLAY_SWITCH)
        .arg(mode.switch_arg())
        .spawn()
        .map_err(Error::Duplication)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_args() {
        assert_eq!(DuplicationMode::Internal.switch_arg(), "/internal");
        assert_eq!(DuplicationMode::External.switch_arg(), "/external");
        assert_eq!(DuplicationMode::Extend.switch_arg(), "/extend");
        assert_eq!(DuplicationMode::Duplicate.switch_arg(), "/clone");
    }
}
