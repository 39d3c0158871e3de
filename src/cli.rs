use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

/// What the program was asked to do on the command line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Run(Arguments),
    Help,
    Version,
}

/// Options for a normal run
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    /// Configuration file given with `--config`
    pub(crate) config: Option<PathBuf>,

    pub(crate) width: Option<u16>,

    pub(crate) height: Option<u16>,
}

impl Command {
    pub(crate) fn from_env() -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_env())
    }

    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("width") => args.width = Some(parser.value()?.parse()?),
                Arg::Long("height") => args.height = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    #[cfg(test)]
    fn from_args<I, S>(args: I) -> Result<Command, lexopt::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<std::ffi::OsString>,
    {
        Command::from_parser(Parser::from_args(args))
    }
}

pub(crate) const USAGE: &str = "\
Usage: termsnake [<options>]

Play Snake in the terminal.

Options:
  -c, --config <PATH>   Read configuration from the given file
      --width <N>       Width of the grid [default: 20]
      --height <N>      Height of the grid [default: 20]
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";
