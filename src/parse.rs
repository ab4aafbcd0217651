//! Turning a help text into a grammar, and an argv into a token list.
//!
//! Three parsers live here. The section parser finds `usage:` and
//! `options:` blocks in the free-form doc text. The pattern parser is a
//! recursive descent over the tokenized usage expression, producing a
//! `Pattern` tree with its leaves interned in a `Leaves` arena. The argv
//! parser consumes a command line against the known option set, producing
//! the flat `ArgvItem` list the matcher works on.
//!
//! The pattern and argv parsers share `parse_long`/`parse_shorts`; the
//! `Ctx` argument keeps the two contexts explicit, because some behavior
//! (unique-prefix expansion of long flags, filling in user values) belongs
//! to the command line only.

use std::fmt;

use crate::dopt::Value;
use crate::matcher::match_pattern;
use crate::pattern::{ArgvItem, Leaf, Leaves, OptSpec, Pattern};
use crate::synonym::SynonymMap;

macro_rules! err(
    ($($arg:tt)*) => (return Err(format!($($arg)*)))
);

decl_regex! {
    DELIMITERS: r"\.\.\.|\[|\]|\(|\)|\|";
    PATTERN_WORD: r"\S*<[^>]*>|\S+";
    OPTION_LINE: r"\n[ \t]*(-\S)";
    DEFAULT_VALUE: r"(?i)\[default: (.*)\]";
}

/// The parsed grammar of one doc string: the usage section, the pattern
/// tree (normalized and ready to match) and the option prototypes known
/// from the doc.
#[derive(Clone, Debug)]
pub struct Parser {
    pub program: String,
    pub full_doc: String,
    pub usage: String,
    pub(crate) leaves: Leaves,
    pub(crate) pattern: Pattern,
    pub(crate) options: Vec<OptSpec>,
}

impl Parser {
    pub fn new(doc: &str) -> Result<Parser, String> {
        let mut usage_sections = parse_section("usage:", doc);
        if usage_sections.is_empty() {
            err!(r#""usage:" (case-insensitive) not found."#);
        }
        if usage_sections.len() > 1 {
            err!(r#"More than one "usage:" (case-insensitive)."#);
        }
        let usage = usage_sections.remove(0);
        let (program, formal) = formal_usage(&usage)?;

        let mut options = parse_defaults(doc);
        let mut leaves = Leaves::default();
        let mut pattern = {
            let parser = PatParser {
                tokens: Tokens::from_pattern(&formal),
                options: &mut options,
                leaves: &mut leaves,
            };
            parser.parse()?
        };

        // `[options]` stands for every option of the `options:` sections
        // that the usage pattern does not already mention. Doc order is
        // kept so matching stays deterministic.
        let mentioned: Vec<Leaf> = pattern
            .flat()
            .into_iter()
            .filter(|&id| matches!(leaves[id], Leaf::Option(_)))
            .map(|id| leaves[id].clone())
            .collect();
        let shortcut: Vec<Pattern> = parse_defaults(doc)
            .into_iter()
            .filter(|o| !mentioned.iter().any(|m| m == &Leaf::Option(o.clone())))
            .map(|o| Pattern::Leaf(leaves.push(Leaf::Option(o))))
            .collect();
        pattern.expand_options_shortcut(&shortcut);

        pattern.fix(&mut leaves);
        log::debug!("fixed usage pattern: {:?}", pattern);

        Ok(Parser {
            program,
            full_doc: doc.to_string(),
            usage,
            leaves,
            pattern,
            options,
        })
    }

    /// Parses an argv against the known options. The result is a flat
    /// list; no matching has happened yet.
    pub fn parse_argv(
        &self,
        argv: &[String],
        options_first: bool,
    ) -> Result<Vec<ArgvItem>, String> {
        // The command line may mention flags the doc does not know; they
        // are added to a local copy so later occurrences parse uniformly.
        let mut options = self.options.clone();
        let mut tokens = Tokens::from_argv(argv);
        let mut parsed = Vec::new();
        while let Some(current) = tokens.current().map(str::to_string) {
            if current == "--" {
                parsed.extend(tokens.remainder().into_iter().map(ArgvItem::Positional));
            } else if current.starts_with("--") {
                let spec = parse_long(&mut tokens, &mut options, Ctx::Argv)?;
                parsed.push(ArgvItem::Flag(spec));
            } else if current.starts_with('-') && current != "-" {
                let specs = parse_shorts(&mut tokens, &mut options, Ctx::Argv)?;
                parsed.extend(specs.into_iter().map(ArgvItem::Flag));
            } else if options_first {
                parsed.extend(tokens.remainder().into_iter().map(ArgvItem::Positional));
            } else {
                parsed.push(ArgvItem::Positional(tokens.next_tok().unwrap()));
            }
        }
        log::debug!("parsed argv: {:?}", parsed);
        Ok(parsed)
    }

    /// Matches a parsed argv against the pattern tree and assembles the
    /// result map: every leaf contributes its default, overlaid with what
    /// the match collected.
    pub fn matches(&self, argv: &[ArgvItem]) -> Option<SynonymMap<String, Value>> {
        let (left, collected) = match_pattern(&self.pattern, &self.leaves, argv, &[])?;
        if !left.is_empty() {
            return None;
        }
        let mut map = SynonymMap::new();
        for id in self.pattern.flat() {
            let leaf = &self.leaves[id];
            map.insert(leaf.name().to_string(), leaf.value().clone());
        }
        for binding in collected {
            map.insert(binding.name, binding.value);
        }
        for id in self.pattern.flat() {
            if let Leaf::Option(spec) = &self.leaves[id] {
                if let (Some(short), Some(long)) = (&spec.short, &spec.long) {
                    if map.contains_key(long) && !map.contains_key(short) {
                        map.insert_synonym(short.clone(), long.clone());
                    }
                }
            }
        }
        Some(map)
    }

    /// Whether any doc or usage option answers to this spelling.
    pub(crate) fn knows_flag(&self, name: &str) -> bool {
        self.options.iter().any(|o| {
            o.short.as_deref() == Some(name) || o.long.as_deref() == Some(name)
        })
    }

    /// Every long flag the doc and usage define. Suggestions only draw on
    /// these; short flags are one letter apart from each other and would
    /// suggest nonsense.
    pub(crate) fn long_flag_names(&self) -> Vec<&str> {
        self.options.iter().filter_map(|o| o.long.as_deref()).collect()
    }
}

impl fmt::Display for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.usage)
    }
}

/// Extracts every section introduced by `name` (case-insensitive): the
/// introducing line plus all directly following indented lines.
pub(crate) fn parse_section(name: &str, source: &str) -> Vec<String> {
    let re = regex::Regex::new(&format!(
        r"(?mi)^[^\n]*{}[^\n]*\n?(?:[ \t].*(?:\n|$))*",
        regex::escape(name)
    ))
    .unwrap();
    re.find_iter(source)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Rewrites a usage section into a single pattern expression. The first
/// word after the colon is the program name; later occurrences of it
/// separate alternative usage lines, which become `) | (`.
pub(crate) fn formal_usage(section: &str) -> Result<(String, String), String> {
    let contents = section
        .split_once(':')
        .map(|(_, rest)| rest)
        .unwrap_or(section);
    let mut words = contents.split_whitespace();
    let program = match words.next() {
        Some(p) => p.to_string(),
        None => err!("Could not find program name in usage section."),
    };
    let rewritten: Vec<&str> = words
        .map(|w| if w == program { ") | (" } else { w })
        .collect();
    Ok((program, format!("( {} )", rewritten.join(" "))))
}

/// Reads every `options:` section into option prototypes. A new option
/// starts at a line beginning (after indentation) with `-`.
pub(crate) fn parse_defaults(doc: &str) -> Vec<OptSpec> {
    let mut defaults = Vec::new();
    for section in parse_section("options:", doc) {
        let contents = section
            .split_once(':')
            .map(|(_, rest)| rest)
            .unwrap_or(&section);
        let padded = format!("\n{}", contents);
        let splits: Vec<(usize, usize)> = OPTION_LINE
            .captures_iter(&padded)
            .map(|c| (c.get(0).unwrap().start(), c.get(1).unwrap().start()))
            .collect();
        for (i, &(_, start)) in splits.iter().enumerate() {
            let end = splits.get(i + 1).map_or(padded.len(), |&(m, _)| m);
            defaults.push(parse_option_description(&padded[start..end]));
        }
    }
    defaults
}

/// Parses one option description chunk, e.g.
/// `-s, --speed=<kn>  Speed in knots [default: 10].`
///
/// The option spelling and the description must be separated by at least
/// two spaces; with a single space the description words would read as an
/// option argument.
fn parse_option_description(chunk: &str) -> OptSpec {
    let chunk = chunk.trim();
    let (options, description) = match chunk.split_once("  ") {
        Some((o, d)) => (o, d),
        None => (chunk, ""),
    };
    let mut spec = OptSpec::new(None, None, 0);
    let options = options.replace(',', " ").replace('=', " ");
    for word in options.split_whitespace() {
        if word.starts_with("--") {
            spec.long = Some(word.to_string());
        } else if word.starts_with('-') {
            spec.short = Some(word.to_string());
        } else {
            spec.arg_count = 1;
        }
    }
    if spec.arg_count == 1 {
        spec.value = match DEFAULT_VALUE.captures(description) {
            Some(caps) => Value::Plain(Some(caps[1].to_string())),
            None => Value::Plain(None),
        };
    }
    spec
}

/// An index cursor over tokens; the pattern and argv parsers advance it
/// with `next_tok` and peek with `current`.
pub(crate) struct Tokens {
    toks: Vec<String>,
    cur: usize,
}

impl Tokens {
    /// Tokenizes a usage expression: brackets, parens, pipes and ellipses
    /// become their own tokens, while `<angle args>` stay whole.
    fn from_pattern(source: &str) -> Tokens {
        let spaced = DELIMITERS.replace_all(source, " $0 ");
        let toks = PATTERN_WORD
            .find_iter(&spaced)
            .map(|m| m.as_str().to_string())
            .collect();
        Tokens { toks, cur: 0 }
    }

    fn from_argv(argv: &[String]) -> Tokens {
        Tokens {
            toks: argv.to_vec(),
            cur: 0,
        }
    }

    fn current(&self) -> Option<&str> {
        self.toks.get(self.cur).map(|s| s.as_str())
    }

    fn next_tok(&mut self) -> Option<String> {
        let tok = self.toks.get(self.cur).cloned();
        if tok.is_some() {
            self.cur += 1;
        }
        tok
    }

    /// Everything from the current token on, consuming it all.
    fn remainder(&mut self) -> Vec<String> {
        let rest = self.toks[self.cur..].to_vec();
        self.cur = self.toks.len();
        rest
    }
}

/// Whether long-flag prefix expansion and user values apply.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Ctx {
    UsagePattern,
    Argv,
}

struct PatParser<'a> {
    tokens: Tokens,
    options: &'a mut Vec<OptSpec>,
    leaves: &'a mut Leaves,
}

impl<'a> PatParser<'a> {
    fn parse(mut self) -> Result<Pattern, String> {
        let seq = self.expr()?;
        if self.tokens.current().is_some() {
            err!("unexpected ending: '{}'", self.tokens.remainder().join(" "));
        }
        Ok(Pattern::Required(seq))
    }

    /// expr ::= seq ( '|' seq )*
    fn expr(&mut self) -> Result<Vec<Pattern>, String> {
        let first = self.seq()?;
        if self.tokens.current() != Some("|") {
            return Ok(first);
        }
        let mut gathered = if first.len() > 1 {
            vec![Pattern::Required(first)]
        } else {
            first
        };
        while self.tokens.current() == Some("|") {
            self.tokens.next_tok();
            let alt = self.seq()?;
            if alt.len() > 1 {
                gathered.push(Pattern::Required(alt));
            } else {
                gathered.extend(alt);
            }
        }
        // Structurally equal alternatives collapse; the first stays.
        let mut alternatives: Vec<Pattern> = Vec::new();
        for alt in gathered {
            if !alternatives.iter().any(|a| a.eq_in(&alt, self.leaves)) {
                alternatives.push(alt);
            }
        }
        Ok(if alternatives.len() > 1 {
            vec![Pattern::Either(alternatives)]
        } else {
            alternatives
        })
    }

    /// seq ::= ( atom [ '...' ] )*
    fn seq(&mut self) -> Result<Vec<Pattern>, String> {
        let mut result = Vec::new();
        loop {
            match self.tokens.current() {
                None | Some("]") | Some(")") | Some("|") => break,
                Some(_) => {}
            }
            let mut atom = self.atom()?;
            if self.tokens.current() == Some("...") {
                self.tokens.next_tok();
                atom = atom
                    .into_iter()
                    .map(|p| Pattern::OneOrMore(Box::new(p)))
                    .collect();
            }
            result.extend(atom);
        }
        Ok(result)
    }

    /// atom ::= '(' expr ')' | '[' expr ']' | 'options'
    ///        | long | shorts | argument | command
    fn atom(&mut self) -> Result<Vec<Pattern>, String> {
        let token = self
            .tokens
            .current()
            .expect("atom called at end of tokens")
            .to_string();
        match token.as_str() {
            "(" | "[" => {
                self.tokens.next_tok();
                let inner = self.expr()?;
                let closing = if token == "(" { ")" } else { "]" };
                if self.tokens.next_tok().as_deref() != Some(closing) {
                    err!("unmatched '{}'", token);
                }
                Ok(vec![if token == "(" {
                    Pattern::Required(inner)
                } else {
                    Pattern::Optional(inner)
                }])
            }
            "options" => {
                self.tokens.next_tok();
                Ok(vec![Pattern::OptionsShortcut(vec![])])
            }
            t if t.starts_with("--") && t != "--" => {
                let spec = parse_long(&mut self.tokens, self.options, Ctx::UsagePattern)?;
                Ok(vec![Pattern::Leaf(self.leaves.push(Leaf::Option(spec)))])
            }
            t if t.starts_with('-') && t != "-" && t != "--" => {
                let specs = parse_shorts(&mut self.tokens, self.options, Ctx::UsagePattern)?;
                Ok(specs
                    .into_iter()
                    .map(|s| Pattern::Leaf(self.leaves.push(Leaf::Option(s))))
                    .collect())
            }
            t if is_argument_token(t) => {
                self.tokens.next_tok();
                Ok(vec![Pattern::Leaf(self.leaves.push(Leaf::argument(&token)))])
            }
            _ => {
                self.tokens.next_tok();
                Ok(vec![Pattern::Leaf(self.leaves.push(Leaf::command(&token)))])
            }
        }
    }
}

/// `<arg>` or ALLCAPS.
fn is_argument_token(s: &str) -> bool {
    (s.starts_with('<') && s.ends_with('>'))
        || (s.chars().any(|c| c.is_alphabetic()) && !s.chars().any(|c| c.is_lowercase()))
}

/// Parses `--long` / `--long=value` at the cursor. On the command line an
/// unambiguous prefix of a known long flag is accepted; unknown flags are
/// recorded as fresh options rather than rejected, so that matching (not
/// parsing) decides whether the grammar allows them.
fn parse_long(
    tokens: &mut Tokens,
    options: &mut Vec<OptSpec>,
    ctx: Ctx,
) -> Result<OptSpec, String> {
    let token = tokens.next_tok().expect("parse_long called at a token");
    let (long, eq_value) = match token.split_once('=') {
        Some((l, v)) => (l.to_string(), Some(v.to_string())),
        None => (token, None),
    };
    let mut similar: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, o)| o.long.as_deref() == Some(long.as_str()))
        .map(|(i, _)| i)
        .collect();
    if ctx == Ctx::Argv && similar.is_empty() {
        similar = options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.long.as_deref().map_or(false, |l| l.starts_with(&long)))
            .map(|(i, _)| i)
            .collect();
    }
    if similar.len() > 1 {
        let names: Vec<&str> = similar
            .iter()
            .map(|&i| options[i].long.as_deref().unwrap())
            .collect();
        err!("{} is not a unique prefix: {}?", long, names.join(", "));
    }
    if similar.is_empty() {
        let arg_count = u8::from(eq_value.is_some());
        let mut spec = OptSpec::new(None, Some(&long), arg_count);
        options.push(spec.clone());
        if ctx == Ctx::Argv {
            spec.value = if arg_count == 1 {
                Value::Plain(eq_value)
            } else {
                Value::Switch(true)
            };
        }
        return Ok(spec);
    }
    let mut spec = options[similar[0]].clone();
    let mut value = eq_value;
    if spec.arg_count == 0 {
        if value.is_some() {
            err!("{} must not have an argument", spec.name());
        }
    } else if value.is_none() {
        match tokens.current() {
            None | Some("--") => err!("{} requires argument", long),
            Some(_) => value = tokens.next_tok(),
        }
    }
    if ctx == Ctx::Argv {
        spec.value = match value {
            Some(v) => Value::Plain(Some(v)),
            None => Value::Switch(true),
        };
    }
    Ok(spec)
}

/// Parses a short-flag cluster like `-abc` at the cursor. A flag taking an
/// argument swallows the rest of the cluster, or the next token when the
/// cluster ends with it.
fn parse_shorts(
    tokens: &mut Tokens,
    options: &mut Vec<OptSpec>,
    ctx: Ctx,
) -> Result<Vec<OptSpec>, String> {
    let token = tokens.next_tok().expect("parse_shorts called at a token");
    let mut rest = &token[1..];
    let mut parsed = Vec::new();
    while !rest.is_empty() {
        let c = rest.chars().next().unwrap();
        let short = format!("-{}", c);
        rest = &rest[c.len_utf8()..];
        let similar: Vec<usize> = options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.short.as_deref() == Some(short.as_str()))
            .map(|(i, _)| i)
            .collect();
        if similar.len() > 1 {
            err!("{} is specified ambiguously {} times", short, similar.len());
        }
        if similar.is_empty() {
            let mut spec = OptSpec::new(Some(&short), None, 0);
            options.push(spec.clone());
            if ctx == Ctx::Argv {
                spec.value = Value::Switch(true);
            }
            parsed.push(spec);
            continue;
        }
        let mut spec = options[similar[0]].clone();
        let mut value: Option<String> = None;
        if spec.arg_count > 0 {
            if rest.is_empty() {
                match tokens.current() {
                    None | Some("--") => err!("{} requires argument", short),
                    Some(_) => value = tokens.next_tok(),
                }
            } else {
                value = Some(rest.to_string());
                rest = "";
            }
        }
        if ctx == Ctx::Argv {
            spec.value = match value {
                Some(v) => Value::Plain(Some(v)),
                None => Value::Switch(true),
            };
        }
        parsed.push(spec);
    }
    Ok(parsed)
}
