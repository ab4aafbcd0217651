use docarg::Docarg;

const USAGE: &str = "
Usage: wc [options] [<file>...]

Options:
  -c, --bytes  Print the byte counts.
  -w, --words  Print the word counts.
  -l, --lines  Print the newline counts.
";

fn main() {
    let args = Docarg::new(USAGE)
        .and_then(|d| d.parse())
        .unwrap_or_else(|e| e.exit());

    // Values are reached by their usage spelling; short flags resolve
    // through their long synonyms.
    println!("files: {:?}", args.get_vec("<file>"));
    println!("bytes: {}", args.get_bool("-c"));
    println!("words: {}", args.get_bool("--words"));
    println!("lines: {}", args.get_bool("--lines"));
}
