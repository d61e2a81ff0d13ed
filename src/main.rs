use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use dispmode::{
    apply, catalog,
    cli::Cli,
    config::{Config, Operation, Verbosity},
    display::{self, DisplaySystem},
    duplication,
    error::{self, Error},
    report,
};

const UNKNOWN_OPTION_EXIT_CODE: i32 = 10;
const USAGE_EXIT_CODE: i32 = 2;

fn main() {
    let code = match Cli::try_parse() {
        Ok(cli) => run(&cli),
        Err(err) => usage_error(err),
    };

    std::process::exit(code);
}

fn usage_error(err: clap::Error) -> i32 {
    // Printing only fails when stdout or stderr is gone.
    let _ = err.print();

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::UnknownArgument => UNKNOWN_OPTION_EXIT_CODE,
        _ => USAGE_EXIT_CODE,
    }
}

fn init_logger(verbosity: Verbosity) -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(verbosity.level_filter())
        .init()
        .context("initializing logger")
}

fn run(cli: &Cli) -> i32 {
    if let Err(err) = init_logger(Verbosity::from_cli(cli)) {
        eprintln!("{err:#}");
    }

    let system = display::system();

    match execute(cli, system.as_ref()) {
        Ok(()) => 0,
        Err(err) => {
            let code = err.exit_code();
            let usage = matches!(err, Error::Validation(_));

            log::error!("{:#}", anyhow::Error::new(err));
            if usage {
                log::error!("Use -? for help.");
            }

            code
        }
    }
}

fn execute(cli: &Cli, system: &dyn DisplaySystem) -> error::Result<()> {
    let config = Config::from_cli(cli, system)?;

    if config.operation == Operation::Help {
        println!("{}", Cli::command().render_help());
        return Ok(());
    }

    log::info!(
        "Detected display count: {}",
        catalog::adapter_count(system)?
    );
    if config.only_primary {
        log::warn!("Limiting to primary output device.");
    }

    let policy = config.policy();
    let bare = config.verbosity.is_bare();

    match config.operation {
        Operation::Help => Ok(()),
        Operation::Query => report::query(system, policy, bare),
        Operation::Current => report::current(system, policy, bare),
        Operation::Detect => report::detect(system, policy, bare),
        Operation::DetectAndSet => apply::apply_highest(system, policy),
        Operation::SetModes => {
            let mut targets = config.targets;
            apply::apply(system, &mut targets, policy)
        }
        Operation::Duplication(mode) => duplication::switch(mode),
        Operation::Emergency => apply::restore_emergency(system, policy),
    }
}
