//! The one and only error type for docarg.

use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};
use std::result;

use serde::de;

/// Any failure the parser, matcher or deserializer can produce.
///
/// The variants fall into three families. `Usage` means the *doc string* is
/// malformed and is always a programmer mistake. `Argv` and `NoMatch` mean
/// the *command line* did not conform to the usage and are end-user mistakes;
/// they arrive wrapped in `WithProgramUsage` so the usage section can be
/// printed next to the message. `Help` and `Version` are not failures at all:
/// they signal that the user asked for the help screen or the version string.
///
/// In the common case you don't care which it was and just want to quit with
/// a sensible message and exit code, which is what `exit` does:
///
/// ```no_run
/// use docarg::Docarg;
///
/// const USAGE: &str = "
/// Usage: prog [-v] <file>
/// ";
///
/// let args = Docarg::new(USAGE)
///                   .and_then(|d| d.parse())
///                   .unwrap_or_else(|e| e.exit());
/// ```
#[derive(Debug)]
pub enum Error {
    /// The usage string could not be parsed into a grammar.
    ///
    /// Missing or duplicated `usage:` sections, unmatched brackets and
    /// unexpected tokens in a pattern all land here. Argv parsing never
    /// produces this variant.
    Usage(String),

    /// The given argv could not be parsed against the known options.
    ///
    /// The payload describes the offence: an option given an argument it
    /// does not take, a missing option argument, or an ambiguous prefix.
    Argv(String),

    /// The argv parsed cleanly but matched no usage alternative, or left
    /// tokens unconsumed.
    NoMatch,

    /// A successful match could not be deserialized into the caller's type.
    Deserialize(String),

    /// Wraps `Argv` and `NoMatch` (and `Help`) with the text that should be
    /// printed alongside the message, usually the usage section.
    WithProgramUsage(Box<Error>, String),

    /// The command line asked for the help screen (`-h` / `--help`).
    Help,

    /// The command line asked for the version (`--version`); the payload is
    /// the version string given to `Docarg::version`.
    Version(String),
}

impl Error {
    /// Whether this error should terminate the program unsuccessfully.
    ///
    /// `Help` and `Version` are normal terminations and not fatal; every
    /// other variant is.
    pub fn fatal(&self) -> bool {
        match self {
            Self::Help | Self::Version(..) => false,
            Self::Usage(..) | Self::Argv(..) | Self::NoMatch | Self::Deserialize(..) => true,
            Self::WithProgramUsage(ref b, _) => b.fatal(),
        }
    }

    /// Print this error and immediately exit the program.
    ///
    /// Non-fatal errors go to stdout with exit status `0`; fatal errors go
    /// to stderr with exit status `1`.
    pub fn exit(&self) -> ! {
        if self.fatal() {
            werr!("{}\n", self);
            ::std::process::exit(1)
        } else {
            let _ = writeln!(&mut io::stdout(), "{}", self);
            ::std::process::exit(0)
        }
    }
}

/// Short result type alias.
pub type Result<T> = result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithProgramUsage(ref other, ref usage) => {
                let other = other.to_string();
                if other.is_empty() {
                    write!(f, "{}", usage)
                } else {
                    write!(f, "{}\n\n{}", other, usage)
                }
            }
            Self::Help => write!(f, ""),
            Self::NoMatch => write!(f, "Invalid arguments."),
            Self::Usage(ref s)
            | Self::Argv(ref s)
            | Self::Deserialize(ref s)
            | Self::Version(ref s) => write!(f, "{}", s),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::WithProgramUsage(ref cause, _) => Some(&**cause),
            _ => None,
        }
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Deserialize(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn help_and_version_are_not_fatal() {
        assert!(!Error::Help.fatal());
        assert!(!Error::Version("0.1.0".into()).fatal());
        assert!(Error::NoMatch.fatal());
        assert!(Error::Usage("bad".into()).fatal());
    }

    #[test]
    fn fatality_peers_through_usage_wrapper() {
        let wrapped = Error::WithProgramUsage(Box::new(Error::Help), "Usage: prog".into());
        assert!(!wrapped.fatal());
        let wrapped = Error::WithProgramUsage(Box::new(Error::NoMatch), "Usage: prog".into());
        assert!(wrapped.fatal());
    }

    #[test]
    fn display_appends_usage() {
        let wrapped = Error::WithProgramUsage(Box::new(Error::NoMatch), "Usage: prog".into());
        assert_eq!(wrapped.to_string(), "Invalid arguments.\n\nUsage: prog");
        // An empty inner message prints the usage alone.
        let wrapped = Error::WithProgramUsage(Box::new(Error::Help), "Usage: prog".into());
        assert_eq!(wrapped.to_string(), "Usage: prog");
    }
}
