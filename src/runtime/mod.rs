use std::error::Error;
use std::io::{self, Write};

use crate::cli::{Cli, Command};

mod directory;
mod logging;
mod rename_sides;
mod settings;
mod tracklist;

pub use tracklist::is_broken_pipe;

pub fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    logging::init(logging::level(cli.verbose, cli.quiet));

    let settings = settings::load_settings();
    let mut out = io::stdout().lock();

    match cli.command.unwrap_or_default() {
        Command::Tracklist {
            fix_tag_encoding,
            medium,
        } => {
            let dir = directory::resolve(cli.directory)?;
            tracklist::run(&dir, &settings, fix_tag_encoding, medium, &mut out)?;
        }
        Command::RenameSides {
            medium,
            first_side_tracks,
            side_names,
            by_length,
            include_artist,
            include_medium,
            dry_run,
        } => {
            let dir = directory::resolve(cli.directory)?;
            let request = rename_sides::RenameRequest {
                medium,
                first_side_tracks,
                side_names: side_names.and_then(|names| names.try_into().ok()),
                by_length,
                include_artist,
                include_medium,
                dry_run,
            };
            rename_sides::run(&dir, &settings, &request, &mut out)?;
        }
        Command::Config => {
            write!(out, "{}", settings.to_toml()?)?;
        }
    }
    out.flush()?;
    Ok(())
}
