use crate::{
    apply::ApplyPolicy,
    catalog::ModeCatalog,
    display::DisplaySystem,
    error::Result,
    mode::{AdapterIndex, Mode},
    selector::highest_mode,
};

/// Writes every mode each adapter supports.
pub fn query(system: &dyn DisplaySystem, policy: ApplyPolicy, bare: bool) -> Result<()> {
    let catalog = ModeCatalog::build(system)?;

    for (adapter, modes) in catalog.iter().filter(|(adapter, _)| policy.includes(adapter.index)) {
        log::info!("Display: {}", adapter.index);

        for mode in modes {
            println!("{}", mode_line(adapter.index, mode, bare));
        }
    }

    Ok(())
}

/// Writes the mode each adapter is running right now.
pub fn current(system: &dyn DisplaySystem, policy: ApplyPolicy, bare: bool) -> Result<()> {
    let catalog = ModeCatalog::build(system)?;

    for (adapter, _) in catalog.iter().filter(|(adapter, _)| policy.includes(adapter.index)) {
        match system.current_mode(adapter)? {
            Some(mode) => println!("{},{}", adapter.index, describe(&mode, bare, true)),
            None => log::warn!("Display {}: current mode unavailable", adapter.index),
        }
    }

    Ok(())
}

/// Writes the highest 32 bit, 60 Hz mode of each adapter.
pub fn detect(system: &dyn DisplaySystem, policy: ApplyPolicy, bare: bool) -> Result<()> {
    let catalog = ModeCatalog::build(system)?;

    for (index, mode) in highest_mode(&catalog) {
        if !policy.includes(index) {
            continue;
        }

        log::info!("Display: {index}");

        if bare {
            println!("{}", mode_line(index, &mode, true));
        } else {
            println!("Highest compatible screen mode: {}", mode.describe(true));
        }
    }

    Ok(())
}

fn describe(mode: &Mode, bare: bool, with_orientation: bool) -> String {
    if bare {
        mode.bare(with_orientation)
    } else {
        mode.describe(with_orientation)
    }
}

fn mode_line(index: AdapterIndex, mode: &Mode, bare: bool) -> String {
    if bare {
        format!("{index},{}", mode.bare(false))
    } else {
        mode.describe(true)
    }
}
