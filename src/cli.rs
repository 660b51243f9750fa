use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Print tracklists, repair tag encoding and rename files by medium sides.
#[derive(Debug, Parser)]
#[command(name = "musicbrain", version, about)]
pub struct Cli {
    /// Output all messages including debug level.
    #[arg(short, long, global = true, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Limit message output to warnings and errors.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// The release directory (defaults to the file manager selection, then the current directory).
    #[arg(short, long, global = true)]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the tracklist of the release (default).
    Tracklist {
        /// Fix tag encoding if required and write the fixed tags back.
        #[arg(long)]
        fix_tag_encoding: bool,

        /// Only print medium number MEDIUM.
        #[arg(short, long)]
        medium: Option<u32>,
    },

    /// Rename the tracks of one medium after their side positions.
    RenameSides {
        /// Select medium number MEDIUM.
        #[arg(short, long, default_value_t = 1)]
        medium: u32,

        /// Number of tracks on the first side.
        #[arg(short, long, conflicts_with = "by_length")]
        first_side_tracks: Option<u32>,

        /// Names of the two sides (default: letters derived from the medium number).
        #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"])]
        side_names: Option<Vec<String>>,

        /// Split the sides by track length instead of track count.
        #[arg(long)]
        by_length: bool,

        /// Always include the track artist in file names.
        #[arg(long)]
        include_artist: bool,

        /// Prefix file names with the medium number.
        #[arg(long)]
        include_medium: bool,

        /// Only show what would be renamed.
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print the effective configuration as TOML.
    Config,
}

impl Default for Command {
    fn default() -> Self {
        Command::Tracklist {
            fix_tag_encoding: false,
            medium: None,
        }
    }
}

/// Exit status after clap reported `e`: 0 for help and version output, 1 for
/// usage errors.
pub fn parse_error_status(e: &clap::Error) -> u8 {
    u8::from(e.use_stderr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tracklist_flags() {
        let cli = Cli::try_parse_from(["musicbrain", "tracklist", "-d", "/music/x", "--fix-tag-encoding"])
            .unwrap();
        assert_eq!(cli.directory, Some(PathBuf::from("/music/x")));
        assert!(matches!(
            cli.command,
            Some(Command::Tracklist {
                fix_tag_encoding: true,
                medium: None
            })
        ));
    }

    #[test]
    fn command_is_optional() {
        let cli = Cli::try_parse_from(["musicbrain", "--directory", "."]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Command::Tracklist {
                fix_tag_encoding: false,
                ..
            }
        ));
    }

    #[test]
    fn rename_sides_defaults_to_first_medium() {
        let cli = Cli::try_parse_from(["musicbrain", "rename-sides", "-f", "4", "-n"]).unwrap();
        match cli.command {
            Some(Command::RenameSides {
                medium,
                first_side_tracks,
                dry_run,
                by_length,
                ..
            }) => {
                assert_eq!(medium, 1);
                assert_eq!(first_side_tracks, Some(4));
                assert!(dry_run);
                assert!(!by_length);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn side_names_take_two_values() {
        let cli = Cli::try_parse_from(["musicbrain", "rename-sides", "--side-names", "X", "Y"]).unwrap();
        match cli.command {
            Some(Command::RenameSides { side_names, .. }) => {
                assert_eq!(side_names, Some(vec!["X".to_string(), "Y".to_string()]));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["musicbrain", "rename-sides", "--side-names", "X"]).is_err());
    }

    #[test]
    fn first_side_tracks_conflicts_with_by_length() {
        assert!(Cli::try_parse_from(["musicbrain", "rename-sides", "-f", "4", "--by-length"]).is_err());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["musicbrain", "-v", "-q"]).is_err());
    }

    #[test]
    fn usage_errors_exit_with_one() {
        let err = Cli::try_parse_from(["musicbrain", "--no-such-flag"]).unwrap_err();
        assert_eq!(parse_error_status(&err), 1);
        let err = Cli::try_parse_from(["musicbrain", "rename-sides", "-m", "one"]).unwrap_err();
        assert_eq!(parse_error_status(&err), 1);
    }

    #[test]
    fn help_and_version_exit_with_zero() {
        let err = Cli::try_parse_from(["musicbrain", "--help"]).unwrap_err();
        assert_eq!(parse_error_status(&err), 0);
        let err = Cli::try_parse_from(["musicbrain", "--version"]).unwrap_err();
        assert_eq!(parse_error_status(&err), 0);
    }
}
