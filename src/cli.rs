use crate::duplication::DuplicationMode;
use clap::{ArgAction, Parser};

const EXAMPLES: &str = "\
Notes: During set operation, monitors without a specified resolution will be
       unaltered. Output devices are enumerated beginning with 0.

Examples:
  Set the primary display to the highest mode it reports:
    dispmode -p -x

  Set display 0 to 1024x768, 32 bit, 60 Hz and display 1 to 1920x1200, 32 bit, 75 Hz:
    dispmode -s 0,1024,768,32,60,1,1920,1200,32,75

  Rotate display 0 by 90 degrees and display 1 by 180, and set display 0 to 1024x768x32x75:
    dispmode -r 0,90,1,180 -s 0,1024,768,32,75";

/// Detect, report and set display modes of every attached display.
#[derive(Debug, Parser)]
#[command(name = "dispmode", disable_help_flag = true, after_help = EXAMPLES)]
pub struct Cli {
    /// Display this help screen
    #[arg(short = '?', action = ArgAction::Help)]
    help: Option<bool>,

    /// Report current display modes on all available displays
    #[arg(short = 'g')]
    pub current: bool,

    /// Report current display modes on all available displays in bare format
    #[arg(short = 'c')]
    pub current_bare: bool,

    /// Emergency restore to compatible defaults:
    /// 800x600, 16 bit, 60 Hz, no rotation on all displays
    #[arg(short = 'e')]
    pub emergency: bool,

    /// Report all available screen modes on all available displays (long)
    #[arg(short = 'q')]
    pub query: bool,

    /// Report all available screen modes on all available displays in bare format
    #[arg(short = 'w')]
    pub query_bare: bool,

    /// Detect highest available mode on all available displays and report
    #[arg(short = 'd')]
    pub detect: bool,

    /// Detect and set highest available mode on all available displays.
    /// Some video cards misreport maximum resolutions on VGA outputs
    #[arg(short = 'x')]
    pub detect_and_set: bool,

    /// Set specific modes on displays: display,width,height,depth,refresh[,...]
    #[arg(short = 's', value_name = "MODES", action = ArgAction::Append)]
    pub modes: Vec<String>,

    /// Set specific rotations on displays: display,degrees[,...]
    #[arg(short = 'r', value_name = "ROTATIONS", action = ArgAction::Append)]
    pub rotations: Vec<String>,

    /// Set screen duplication mode
    #[arg(short = 'l', value_name = "MODE", value_enum, ignore_case = true)]
    pub duplication: Option<DuplicationMode>,

    /// Restrict operations to the primary output device
    #[arg(short = 'p')]
    pub only_primary: bool,

    /// Restrict console output to bare formats for piping
    #[arg(short = 'b')]
    pub bare: bool,

    /// Verbose output
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Silent, no console output besides reports
    #[arg(short = 't')]
    pub silent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn collects_repeated_lists() {
        let cli = Cli::try_parse_from([
            "dispmode",
            "-r",
            "0,90",
            "-s",
            "0,1024,768,32,75",
            "-s",
            "1,800,600,16,60",
            "-p",
        ])
        .unwrap();

        assert_eq!(cli.modes, vec!["0,1024,768,32,75", "1,800,600,16,60"]);
        assert_eq!(cli.rotations, vec!["0,90"]);
        assert!(cli.only_primary);
    }

    #[test]
    fn duplication_ignores_case() {
        let cli = Cli::try_parse_from(["dispmode", "-l", "Extend"]).unwrap();

        assert_eq!(cli.duplication, Some(DuplicationMode::Extend));
    }

    #[test]
    fn help_and_unknown_flags() {
        let help = Cli::try_parse_from(["dispmode", "-?"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let unknown = Cli::try_parse_from(["dispmode", "-z"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);

        let missing = Cli::try_parse_from(["dispmode", "-s"]).unwrap_err();
        assert_ne!(missing.kind(), ErrorKind::UnknownArgument);
    }
}
