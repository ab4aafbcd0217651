use docarg::Docarg;
use serde_derive::Deserialize;

const USAGE: &str = "
Naval Fate.

Usage:
  naval_fate ship new <name>...
  naval_fate ship <name> move <x> <y> [--speed=<kn>]
  naval_fate ship shoot <x> <y>
  naval_fate mine (set|remove) <x> <y> [--moored | --drifting]
  naval_fate (-h | --help)
  naval_fate --version

Options:
  -h --help     Show this screen.
  --version     Show version.
  --speed=<kn>  Speed in knots [default: 10].
  --moored      Moored (anchored) mine.
  --drifting    Drifting mine.
";

#[derive(Debug, Deserialize)]
struct Args {
    cmd_ship: bool,
    cmd_new: bool,
    cmd_move: bool,
    cmd_shoot: bool,
    cmd_mine: bool,
    cmd_set: bool,
    cmd_remove: bool,
    arg_name: Vec<String>,
    arg_x: Option<String>,
    arg_y: Option<String>,
    flag_speed: String,
    flag_moored: bool,
    flag_drifting: bool,
}

fn main() {
    let args: Args = Docarg::new(USAGE)
        .and_then(|d| d.version(Some("2.0".to_string())).deserialize())
        .unwrap_or_else(|e| e.exit());
    println!("{:#?}", args);
}
