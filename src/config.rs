use crate::{
    apply::ApplyPolicy,
    catalog::ModeCatalog,
    cli::Cli,
    display::{find_adapter, DisplaySystem},
    duplication::DuplicationMode,
    error::{Error, Result, ValidationError},
    mode::{AdapterIndex, Orientation, VALID_BIT_DEPTHS},
    target::{TargetSet, TargetSpec},
};
use log::LevelFilter;

pub const WIDTH_MIN: u32 = 320;
pub const WIDTH_MAX: u32 = 4096;
pub const HEIGHT_MIN: u32 = 200;
pub const HEIGHT_MAX: u32 = 4096;
pub const REFRESH_RATE_MIN: u32 = 24;
pub const REFRESH_RATE_MAX: u32 = 180;

/// Mode every display is reset to by the emergency restore.
pub const EMERGENCY_TARGET: TargetSpec = TargetSpec {
    width: 800,
    height: 600,
    bit_depth: 16,
    refresh_rate: 60,
    orientation: Some(Orientation::Default),
    applied: false,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Help,
    Query,
    Current,
    Detect,
    DetectAndSet,
    SetModes,
    Duplication(DuplicationMode),
    Emergency,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    Bare,
    Info,
    Max,
}

impl Verbosity {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.silent {
            Verbosity::Silent
        } else if cli.bare || cli.current_bare || cli.query_bare {
            Verbosity::Bare
        } else if cli.verbose {
            Verbosity::Max
        } else {
            Verbosity::Info
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Silent => LevelFilter::Off,
            Verbosity::Bare => LevelFilter::Error,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Max => LevelFilter::Debug,
        }
    }

    pub fn is_bare(self) -> bool {
        self <= Verbosity::Bare
    }
}

/// Everything one invocation does, built once from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub operation: Operation,
    pub only_primary: bool,
    pub verbosity: Verbosity,
    pub targets: TargetSet,
}

impl Config {
    pub fn from_cli(cli: &Cli, system: &dyn DisplaySystem) -> Result<Self> {
        let operation = operation(cli)?;

        let mut targets = TargetSet::default();
        if operation == Operation::SetModes {
            let catalog = ModeCatalog::build(system)?;

            for list in &cli.modes {
                parse_modes(list, &catalog, &mut targets)?;
            }

            for list in &cli.rotations {
                parse_rotations(list, &catalog, &mut targets, system)?;
            }
        }

        Ok(Self {
            operation,
            only_primary: cli.only_primary,
            verbosity: Verbosity::from_cli(cli),
            targets,
        })
    }

    pub fn policy(&self) -> ApplyPolicy {
        ApplyPolicy {
            only_primary: self.only_primary,
        }
    }
}

fn operation(cli: &Cli) -> std::result::Result<Operation, ValidationError> {
    let set_modes = !cli.modes.is_empty() || !cli.rotations.is_empty();
    let set_flag = if cli.modes.is_empty() { "-r" } else { "-s" };

    let requested = [
        (cli.current, "-g", Operation::Current),
        (cli.current_bare, "-c", Operation::Current),
        (cli.emergency, "-e", Operation::Emergency),
        (cli.query, "-q", Operation::Query),
        (cli.query_bare, "-w", Operation::Query),
        (cli.detect, "-d", Operation::Detect),
        (cli.detect_and_set, "-x", Operation::DetectAndSet),
        (set_modes, set_flag, Operation::SetModes),
    ]
    .into_iter()
    .filter(|(enabled, ..)| *enabled)
    .map(|(_, flag, operation)| (flag, operation))
    .chain(
        cli.duplication
            .map(|mode| ("-l", Operation::Duplication(mode))),
    )
    .collect::<Vec<_>>();

    match requested.as_slice() {
        [] => Ok(Operation::Help),
        [(_, operation)] => Ok(*operation),
        [_, (flag, _), ..] => Err(ValidationError::Exclusive { flag: *flag }),
    }
}

fn parse_fields<const N: usize>(
    chunk: &[&str],
    syntax: ValidationError,
) -> std::result::Result<[u32; N], ValidationError> {
    let mut fields = [0; N];

    for (field, value) in fields.iter_mut().zip(chunk) {
        *field = value.trim().parse().map_err(|_| syntax.clone())?;
    }

    Ok(fields)
}

fn split_list(list: &str) -> Vec<&str> {
    if list.trim().is_empty() {
        Vec::new()
    } else {
        list.split(',').collect()
    }
}

/// Accepts only adapters that report modes. Indices are not dense: an adapter
/// without modes leaves a gap, so the catalog size is not an upper bound.
fn check_adapter(
    index: u32,
    catalog: &ModeCatalog,
) -> std::result::Result<AdapterIndex, ValidationError> {
    let index = index as AdapterIndex;

    if catalog.adapter(index).is_none() {
        return Err(ValidationError::AdapterOutOfRange {
            index,
            count: catalog.len(),
        });
    }

    Ok(index)
}

fn check_range(
    value: u32,
    min: u32,
    max: u32,
    error: fn(u32, u32, u32) -> ValidationError,
) -> std::result::Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(error(value, min, max))
    }
}

/// Parses `display,width,height,depth,refresh` groups into `targets`.
fn parse_modes(
    list: &str,
    catalog: &ModeCatalog,
    targets: &mut TargetSet,
) -> std::result::Result<(), ValidationError> {
    let fields = split_list(list);

    if fields.is_empty() {
        return Err(ValidationError::MissingModes);
    }
    if fields.len() % 5 != 0 {
        return Err(ValidationError::MalformedModes);
    }

    for chunk in fields.chunks(5) {
        let [index, width, height, bit_depth, refresh_rate] =
            parse_fields::<5>(chunk, ValidationError::ModeSyntax)?;

        let index = check_adapter(index, catalog)?;
        check_range(width, WIDTH_MIN, WIDTH_MAX, |value, min, max| {
            ValidationError::Width { value, min, max }
        })?;
        check_range(height, HEIGHT_MIN, HEIGHT_MAX, |value, min, max| {
            ValidationError::Height { value, min, max }
        })?;
        if !VALID_BIT_DEPTHS.contains(&bit_depth) {
            return Err(ValidationError::BitDepth { value: bit_depth });
        }
        check_range(
            refresh_rate,
            REFRESH_RATE_MIN,
            REFRESH_RATE_MAX,
            |value, min, max| ValidationError::RefreshRate { value, min, max },
        )?;

        targets.set_mode(index, width, height, bit_depth, refresh_rate);
    }

    Ok(())
}

/// Parses `display,degrees` pairs into `targets`.
///
/// An adapter without a mode target keeps its current mode and only rotates.
fn parse_rotations(
    list: &str,
    catalog: &ModeCatalog,
    targets: &mut TargetSet,
    system: &dyn DisplaySystem,
) -> Result<()> {
    let fields = split_list(list);

    if fields.is_empty() {
        return Err(ValidationError::MissingRotations.into());
    }
    if fields.len() % 2 != 0 {
        return Err(ValidationError::MalformedRotations.into());
    }

    for chunk in fields.chunks(2) {
        let [index, degrees] = parse_fields::<2>(chunk, ValidationError::RotationSyntax)?;

        let index = check_adapter(index, catalog)?;
        let orientation = Orientation::from_degrees(degrees)
            .ok_or(ValidationError::Rotation { value: degrees })?;

        targets.set_rotation(index, orientation, || current_target(system, index))?;
    }

    Ok(())
}

fn current_target(system: &dyn DisplaySystem, index: AdapterIndex) -> Result<TargetSpec> {
    let adapter = find_adapter(system, index)?;

    system
        .current_mode(&adapter)?
        .map(|mode| TargetSpec::from_mode(&mode))
        .ok_or_else(|| Error::Enumeration(format!("reading current mode of display {index}")))
}
