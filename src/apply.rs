use crate::{
    catalog::ModeCatalog,
    config::EMERGENCY_TARGET,
    display::{DisplaySystem, COMMIT_SUCCESS},
    error::{Error, Result},
    mode::AdapterIndex,
    orientation::resolve,
    selector::highest_mode,
    target::TargetSet,
};

pub const PRIMARY_ADAPTER: AdapterIndex = 0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyPolicy {
    /// Only touch adapter 0, other targets are skipped without a report.
    pub only_primary: bool,
}

impl ApplyPolicy {
    pub fn includes(&self, index: AdapterIndex) -> bool {
        !self.only_primary || index == PRIMARY_ADAPTER
    }
}

/// Commits every target whose mode the adapter supports.
///
/// The first rejected commit stops the whole batch. Targets that were processed
/// but never applied are logged afterwards, whatever the outcome.
pub fn apply(
    system: &dyn DisplaySystem,
    targets: &mut TargetSet,
    policy: ApplyPolicy,
) -> Result<()> {
    let result = apply_targets(system, targets, policy);

    for (index, target) in targets.iter() {
        if policy.includes(index) && !target.applied {
            log::error!("Display mode requested could not be matched: {target}");
        }
    }

    result
}

fn apply_targets(
    system: &dyn DisplaySystem,
    targets: &mut TargetSet,
    policy: ApplyPolicy,
) -> Result<()> {
    for (index, target) in targets.iter_mut() {
        if !policy.includes(index) {
            continue;
        }

        let catalog = ModeCatalog::build(system)?;
        let (Some(adapter), Some(modes)) = (catalog.adapter(index), catalog.modes(index)) else {
            log::debug!("Display {index} reports no modes");
            continue;
        };

        let spec = *target;

        // Every matching entry is committed, duplicates included.
        for candidate in modes.iter().filter(|mode| spec.matches(mode)) {
            let desired = spec.orientation.unwrap_or(candidate.orientation);
            let request = resolve(candidate, desired).apply_to(candidate);

            log::debug!("Display {index}: requesting {request}");

            let status = system.commit(adapter, &request);
            if status != COMMIT_SUCCESS {
                return Err(Error::Commit {
                    adapter: index,
                    status,
                });
            }

            target.applied = true;
        }
    }

    Ok(())
}

/// Commits the highest 32 bit, 60 Hz mode of every adapter as reported.
pub fn apply_highest(system: &dyn DisplaySystem, policy: ApplyPolicy) -> Result<()> {
    let catalog = ModeCatalog::build(system)?;

    for (index, mode) in highest_mode(&catalog) {
        if !policy.includes(index) {
            continue;
        }

        let Some(adapter) = catalog.adapter(index) else {
            continue;
        };

        log::info!("Display: {index}");
        log::info!("Highest compatible screen mode: {}", mode.describe(true));
        log::info!("Setting display mode...");

        let status = system.commit(adapter, &mode);
        if status != COMMIT_SUCCESS {
            return Err(Error::Commit {
                adapter: index,
                status,
            });
        }
    }

    Ok(())
}

/// Resets every adapter to the compatible emergency mode.
pub fn restore_emergency(system: &dyn DisplaySystem, policy: ApplyPolicy) -> Result<()> {
    let mut targets = TargetSet::default();

    for (adapter, _) in ModeCatalog::build(system)?.iter() {
        targets.insert(adapter.index, EMERGENCY_TARGET);
    }

    apply(system, &mut targets, policy)
}
