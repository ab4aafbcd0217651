use crate::test::get_error;
use crate::Error;

macro_rules! test_suggest(
    ($name:ident, $doc:expr, $args:expr, $expected:expr) => (
        #[test]
        fn $name() {
            let err = get_error($doc, $args);
            match err {
                Error::WithProgramUsage(inner, _) => {
                    match *inner {
                        Error::Argv(msg) => assert_eq!(msg, $expected),
                        other => panic!("Error other than argv: {:?}", other),
                    }
                }
                other => panic!("Error without program usage: {:?}", other),
            }
        }
    );
);

test_suggest!(test_suggest_transposed_long, "Usage: prog [--release]",
              &["--relaese"],
              "Unknown flag: '--relaese'. Did you mean '--release'?");

test_suggest!(test_suggest_nothing_for_shorts,
              "Usage: prog [-a] <source> <dest>
       prog [-a] <source>... <dir>
       prog [-e]

Options:
    -a, --archive  Copy everything.
",
              &["-d"],
              "Unknown flag: '-d'");

test_suggest!(test_suggest_among_several,
              "Usage: prog [-a] <source> <dest>

Options:
    -a, --archive  Copy everything.
    -e, --export   Export all the things.
",
              &["--expotr", "x", "y"],
              "Unknown flag: '--expotr'. Did you mean '--export'?");

test_suggest!(test_suggest_first_unknown,
              "Usage: prog [--import] [--complete]",
              &["--mport", "--cmplete"],
              "Unknown flag: '--mport'. Did you mean '--import'?");

test_suggest!(test_suggest_later_unknown,
              "Usage: prog [--import] [--complete]",
              &["--import", "--cmplete"],
              "Unknown flag: '--cmplete'. Did you mean '--complete'?");
