use serde_derive::Deserialize;

use crate::{Docarg, Error};

fn deserialize<'de, D: serde::Deserialize<'de>>(doc: &str, argv: &[&str]) -> Result<D, Error> {
    Docarg::new(doc).and_then(|d| {
        d.argv(vec!["prog"].iter().chain(argv.iter()).cloned())
            .deserialize()
    })
}

const NAVAL: &str = "
Usage: prog ship new <name>...
       prog mine (set|remove) <x> <y> [--speed=<kn>]

Options:
  --speed=<kn>  Speed in knots [default: 10].
";

#[derive(Debug, Deserialize)]
struct NavalArgs {
    cmd_ship: bool,
    cmd_new: bool,
    cmd_mine: bool,
    cmd_set: bool,
    cmd_remove: bool,
    arg_name: Vec<String>,
    arg_x: Option<String>,
    arg_y: Option<String>,
    flag_speed: String,
}

#[test]
fn structs_bind_by_prefix() {
    let args: NavalArgs = deserialize(NAVAL, &["ship", "new", "a", "b"]).unwrap();
    assert!(args.cmd_ship && args.cmd_new);
    assert!(!args.cmd_mine && !args.cmd_set && !args.cmd_remove);
    assert_eq!(args.arg_name, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(args.arg_x, None);
    assert_eq!(args.flag_speed, "10");
}

#[test]
fn present_arguments_become_some() {
    let args: NavalArgs =
        deserialize(NAVAL, &["mine", "set", "1", "2", "--speed=20"]).unwrap();
    assert_eq!(args.arg_x.as_deref(), Some("1"));
    assert_eq!(args.arg_y.as_deref(), Some("2"));
    assert_eq!(args.flag_speed, "20");
}

#[test]
fn numbers_parse_from_strings_and_counts() {
    const DOC: &str = "
Usage: prog [-v...] <n> <ratio>

Options:
  -v  Verbose.
";
    #[derive(Debug, Deserialize)]
    struct Args {
        flag_v: u64,
        arg_n: i32,
        arg_ratio: f64,
    }
    let args: Args = deserialize(DOC, &["-vvv", "7", "0.25"]).unwrap();
    assert_eq!(args.flag_v, 3);
    assert_eq!(args.arg_n, 7);
    assert!((args.arg_ratio - 0.25).abs() < 1e-9);
}

#[test]
fn absent_number_reads_as_zero() {
    #[derive(Debug, Deserialize)]
    struct Args {
        arg_n: u32,
    }
    let args: Args = deserialize("Usage: prog [<n>]", &[]).unwrap();
    assert_eq!(args.arg_n, 0);
}

#[test]
fn enums_match_case_insensitively() {
    #[derive(Debug, Deserialize, PartialEq)]
    enum Direction {
        Left,
        Right,
    }
    #[derive(Debug, Deserialize)]
    struct Args {
        arg_dir: Direction,
    }
    let args: Args = deserialize("Usage: prog <dir>", &["left"]).unwrap();
    assert_eq!(args.arg_dir, Direction::Left);
    let err = deserialize::<Args>("Usage: prog <dir>", &["up"]).unwrap_err();
    assert!(matches!(err, Error::Deserialize(_)));
}

#[test]
fn chars_require_a_single_character() {
    #[derive(Debug, Deserialize)]
    struct Args {
        arg_sep: char,
    }
    let args: Args = deserialize("Usage: prog <sep>", &[","]).unwrap();
    assert_eq!(args.arg_sep, ',');
    let err = deserialize::<Args>("Usage: prog <sep>", &["ab"]).unwrap_err();
    assert!(matches!(err, Error::Deserialize(_)));
}

#[test]
fn unknown_fields_are_reported() {
    #[derive(Debug, Deserialize)]
    struct Args {
        #[allow(dead_code)]
        flag_nope: bool,
    }
    let err = deserialize::<Args>("Usage: prog", &[]).unwrap_err();
    match err {
        Error::Deserialize(msg) => assert!(msg.contains("--nope"), "{}", msg),
        other => panic!("expected Deserialize, got {:?}", other),
    }
}

#[test]
fn dashes_map_to_underscores() {
    #[derive(Debug, Deserialize)]
    struct Args {
        flag_dry_run: bool,
    }
    let args: Args = deserialize("Usage: prog [--dry-run]", &["--dry-run"]).unwrap();
    assert!(args.flag_dry_run);
}
