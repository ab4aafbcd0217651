use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::str::FromStr;

use regex::Captures;
use serde::de::{self, Deserialize, IntoDeserializer, Visitor};

use crate::errors::Error::{Argv, Deserialize as DeserializeErr, Help, NoMatch, Usage, Version, WithProgramUsage};
use crate::errors::{Error, Result};
use crate::parse::Parser;
use crate::pattern::ArgvItem;
use crate::synonym::SynonymMap;
use crate::utils::{cap_or_empty, closest_flag};

use self::Value::{Counted, List, Plain, Switch};

/// The main docarg type, constructed from a usage string.
///
/// Matching command line arguments against the usage produces an
/// [`ArgvMap`].
#[derive(Clone, Debug)]
pub struct Docarg {
    p: Parser,
    argv: Option<Vec<String>>,
    options_first: bool,
    help: bool,
    version: Option<String>,
}

impl Docarg {
    /// Parse the usage string given.
    ///
    /// The returned value may be used immediately to parse command line
    /// arguments with a default configuration: argv taken from the
    /// environment, `--help` handled, `--version` not.
    ///
    /// If the usage string is not a valid grammar, a `Usage` error is
    /// returned.
    pub fn new<S>(usage: S) -> Result<Docarg>
    where
        S: ::std::ops::Deref<Target = str>,
    {
        Parser::new(usage.deref()).map_err(Usage).map(|p| Docarg {
            p,
            argv: None,
            options_first: false,
            help: true,
            version: None,
        })
    }

    /// Parse command line arguments and match them against the usage.
    ///
    /// On a match, the returned [`ArgvMap`] maps every flag, command and
    /// argument of the usage to a value. If the argv cannot be parsed, an
    /// `Argv` error is returned; if it parses but matches no usage
    /// alternative, a `NoMatch` error. Both come wrapped in
    /// `WithProgramUsage`.
    ///
    /// When handling of `--help` is enabled (it is by default) and the
    /// command line asks for it, a `Help` error is returned; likewise
    /// `Version` when a version string was supplied with
    /// [`Docarg::version`].
    pub fn parse(&self) -> Result<ArgvMap> {
        let argv = self.argv.clone().unwrap_or_else(Docarg::get_argv);
        let items = self
            .p
            .parse_argv(&argv, self.options_first)
            .map_err(|s| self.err_with_usage(Argv(s)))?;
        if self.help && requests(&items, &["-h", "--help"]) {
            return Err(self.err_with_full_doc(Help));
        }
        if let Some(ref v) = self.version {
            if requests(&items, &["--version"]) {
                return Err(Version(v.clone()));
            }
        }
        match self.p.matches(&items) {
            Some(map) => Ok(ArgvMap { map }),
            None => Err(self.err_with_usage(self.no_match_error(&items))),
        }
    }

    /// Parse and deserialize the given argv into a `D`.
    ///
    /// This is a convenience method for
    /// `parse().and_then(|vals| vals.deserialize())`.
    pub fn deserialize<'de, D>(&self) -> Result<D>
    where
        D: Deserialize<'de>,
    {
        self.parse().and_then(|vals| vals.deserialize())
    }

    /// Set the argv to be used instead of `std::env::args()`.
    ///
    /// The `argv` given *must* be the full argv of the process, program
    /// name first: `["cp", "src", "dest"]`, not `["src", "dest"]`.
    pub fn argv<I, S>(mut self, argv: I) -> Docarg
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.argv = Some(
            argv.into_iter()
                .skip(1)
                .map(|s| s.as_ref().to_owned())
                .collect(),
        );
        self
    }

    /// Require all flags to precede the first positional argument.
    ///
    /// Once the first positional argument is seen, every following token
    /// is read as positional, even if it starts with `-`.
    pub fn options_first(mut self, yes: bool) -> Docarg {
        self.options_first = yes;
        self
    }

    /// Enable or disable the special handling of `-h` / `--help`
    /// (enabled by default). When enabled and present in the arguments,
    /// `parse` returns a `Help` error carrying the full doc string.
    pub fn help(mut self, yes: bool) -> Docarg {
        self.help = yes;
        self
    }

    /// Enable the special handling of `--version`: when present in the
    /// arguments, `parse` returns a `Version` error carrying the string
    /// given here.
    pub fn version(mut self, version: Option<String>) -> Docarg {
        self.version = version;
        self
    }

    #[doc(hidden)]
    pub fn parser(&self) -> &Parser {
        &self.p
    }

    /// Distinguishes "you gave a flag this program doesn't have" from a
    /// plain mismatch, and names the likely intended flag when one is
    /// close.
    fn no_match_error(&self, items: &[ArgvItem]) -> Error {
        for item in items {
            let spec = match item {
                ArgvItem::Flag(spec) => spec,
                ArgvItem::Positional(_) => continue,
            };
            let name = spec.name();
            if self.p.knows_flag(name) {
                continue;
            }
            return match closest_flag(name, self.p.long_flag_names()) {
                Some(best) => Argv(format!(
                    "Unknown flag: '{}'. Did you mean '{}'?",
                    name, best
                )),
                None => Argv(format!("Unknown flag: '{}'", name)),
            };
        }
        NoMatch
    }

    fn err_with_usage(&self, e: Error) -> Error {
        WithProgramUsage(Box::new(e), self.p.usage.trim().into())
    }

    fn err_with_full_doc(&self, e: Error) -> Error {
        WithProgramUsage(Box::new(e), self.p.full_doc.trim().into())
    }

    fn get_argv() -> Vec<String> {
        ::std::env::args().skip(1).collect()
    }
}

/// Whether the parsed argv carries one of the named flags with a truthy
/// value. Checked before matching, so `--help` wins even when the rest of
/// the command line is wrong.
fn requests(items: &[ArgvItem], names: &[&str]) -> bool {
    items.iter().any(|item| match item {
        ArgvItem::Flag(spec) => names.contains(&spec.name()) && spec.value.as_bool(),
        ArgvItem::Positional(_) => false,
    })
}

/// A map from usage names to matched values.
///
/// The keys are spelled as in the usage: `--flag` for a long flag, `-f`
/// for a short one (if `-f` is a synonym for `--flag`, either key works),
/// `ARG` or `<arg>` for a positional argument and `cmd` for a command.
#[derive(Clone)]
pub struct ArgvMap {
    #[doc(hidden)]
    pub map: SynonymMap<String, Value>,
}

impl ArgvMap {
    /// Deserializes the map into a struct.
    ///
    /// Each struct field must carry a prefix naming the kind of usage
    /// element it binds: `flag_` for short/long flags, `arg_` for
    /// positional arguments and `cmd_` for commands. A `-` in the usage
    /// name corresponds to a `_` in the field name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use docarg::Docarg;
    /// use serde_derive::Deserialize;
    ///
    /// const USAGE: &str = "
    /// Usage: cargo [options] (build | test)
    ///
    /// Options: -v, --verbose
    /// ";
    ///
    /// #[derive(Deserialize)]
    /// struct Args {
    ///     cmd_build: bool,
    ///     cmd_test: bool,
    ///     flag_verbose: bool,
    /// }
    ///
    /// let argv = || vec!["cargo", "build", "-v"];
    /// let args: Args = Docarg::new(USAGE)
    ///     .and_then(|d| d.argv(argv()).deserialize())
    ///     .unwrap_or_else(|e| e.exit());
    /// assert!(args.cmd_build && !args.cmd_test && args.flag_verbose);
    /// ```
    pub fn deserialize<'de, T: Deserialize<'de>>(self) -> Result<T> {
        T::deserialize(&mut Deserializer {
            vals: self,
            stack: vec![],
        })
    }

    /// The value for `key` as a bool; `false` when the key is absent.
    pub fn get_bool(&self, key: &str) -> bool {
        self.find(key).map_or(false, |v| v.as_bool())
    }

    /// The value for `key` as a count; `0` when the key is absent.
    pub fn get_count(&self, key: &str) -> u64 {
        self.find(key).map_or(0, |v| v.as_count())
    }

    /// The value for `key` as a string; `""` when the key is absent.
    pub fn get_str(&self, key: &str) -> &str {
        self.find(key).map_or("", |v| v.as_str())
    }

    /// The value for `key` as a list; empty when the key is absent.
    pub fn get_vec(&self, key: &str) -> Vec<&str> {
        self.find(key).map(|v| v.as_vec()).unwrap_or_default()
    }

    /// The raw value for `key`, spelled as in the usage (`<arg>`,
    /// `--flag`, ...).
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.map.find(&key.into())
    }

    /// The number of values, not counting synonyms.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Converts a usage key to a struct field name: `--flag-name` becomes
    /// `flag_flag_name`, `<arg>` and `ARG` become `arg_arg`, a command
    /// becomes `cmd_<name>`. No attempt is made to produce a *valid*
    /// identifier out of exotic names.
    #[doc(hidden)]
    pub fn key_to_struct_field(name: &str) -> String {
        decl_regex! {
            KEY: r"^(?:--?(?P<flag>\S+)|(?:(?P<argu>\p{Lu}+)|<(?P<argb>[^>]+)>)|(?P<cmd>\S+))$";
        }
        fn sanitize(name: &str) -> String {
            name.replace('-', "_")
        }

        KEY.replace(name, |cap: &Captures<'_>| {
            let (flag, cmd) = (cap_or_empty(cap, "flag"), cap_or_empty(cap, "cmd"));
            let (argu, argb) = (cap_or_empty(cap, "argu"), cap_or_empty(cap, "argb"));
            let (prefix, name) = if !flag.is_empty() {
                ("flag_", flag)
            } else if !argu.is_empty() {
                ("arg_", argu)
            } else if !argb.is_empty() {
                ("arg_", argb)
            } else if !cmd.is_empty() {
                ("cmd_", cmd)
            } else {
                panic!("Unknown ArgvMap key: '{}'", name)
            };
            let mut field = prefix.to_owned();
            field.push_str(&sanitize(name));
            field
        })
        .into_owned()
    }

    /// Converts a struct field name back to a usage key.
    #[doc(hidden)]
    pub fn struct_field_to_key(field: &str) -> String {
        decl_regex! {
            LETTERS: r"^\p{Lu}+$";
        }
        fn desanitize(name: &str) -> String {
            name.replace('_', "-")
        }
        let name = if let Some(name) = field.strip_prefix("flag_") {
            let mut key = (if name.chars().count() == 1 { "-" } else { "--" }).to_owned();
            key.push_str(name);
            key
        } else if let Some(name) = field.strip_prefix("arg_") {
            if LETTERS.is_match(name) {
                name.to_owned()
            } else {
                format!("<{}>", name)
            }
        } else if let Some(name) = field.strip_prefix("cmd_") {
            name.to_owned()
        } else {
            panic!("Unrecognized struct field: '{}'", field)
        };
        desanitize(&name)
    }
}

impl fmt::Debug for ArgvMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 0 {
            return write!(f, "{{EMPTY}}");
        }

        // Group synonyms with their keys and sort for predictable output.
        let reverse: HashMap<&String, &String> =
            self.map.synonyms().map(|(from, to)| (to, from)).collect();
        let mut keys: Vec<&String> = self.map.keys().collect();
        keys.sort();
        let mut first = true;
        for &k in &keys {
            if !first {
                writeln!(f)?;
            } else {
                first = false;
            }
            match reverse.get(&k) {
                None => write!(f, "{} => {:?}", k, self.map.get(k))?,
                Some(s) => write!(f, "{}, {} => {:?}", s, k, self.map.get(k))?,
            }
        }
        Ok(())
    }
}

/// A matched command line value.
///
/// The `as_{bool,count,str,vec}` methods each view any variant as one
/// type, with sensible conversions, so callers rarely need to
/// destructure.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A flag without an argument: present or not.
    Switch(bool),

    /// How many times a repeatable flag or command occurred.
    Counted(u64),

    /// A positional or flag argument, `None` when absent. A present but
    /// empty argument is `Some("")`.
    Plain(Option<String>),

    /// The values of a repeatable positional or flag argument.
    List(Vec<String>),
}

impl Value {
    /// The value as a bool: presence for switches and plain values, `> 0`
    /// for counts, non-emptiness for lists.
    pub fn as_bool(&self) -> bool {
        match *self {
            Switch(b) => b,
            Counted(n) => n > 0,
            Plain(None) => false,
            Plain(Some(_)) => true,
            List(ref vs) => !vs.is_empty(),
        }
    }

    /// The value as a count: `0` or `1` for switches and plain values,
    /// the length for lists.
    pub fn as_count(&self) -> u64 {
        match *self {
            Switch(b) => u64::from(b),
            Counted(n) => n,
            Plain(None) => 0,
            Plain(Some(_)) => 1,
            List(ref vs) => vs.len() as u64,
        }
    }

    /// The value as a string; everything but a present plain value is
    /// `""`.
    pub fn as_str(&self) -> &str {
        match *self {
            Switch(_) | Counted(_) | Plain(None) | List(_) => "",
            Plain(Some(ref s)) => s,
        }
    }

    /// The value as a list of strings: empty for switches and counts, a
    /// singleton for a present plain value.
    pub fn as_vec(&self) -> Vec<&str> {
        match *self {
            Switch(_) | Counted(_) | Plain(None) => vec![],
            Plain(Some(ref s)) => vec![s],
            List(ref vs) => vs.iter().map(|s| &**s).collect(),
        }
    }
}

/// Deserializer from an [`ArgvMap`] into user types.
///
/// Normally used through [`ArgvMap::deserialize`] or
/// [`Docarg::deserialize`]; exposed for generic code that wants to accept
/// any `Deserialize` target.
pub struct Deserializer {
    vals: ArgvMap,
    stack: Vec<DeserializerItem>,
}

#[derive(Debug)]
struct DeserializerItem {
    key: String,
    struct_field: &'static str,
    val: Option<Value>,
}

macro_rules! derr(
    ($($arg:tt)*) => (return Err(DeserializeErr(format!($($arg)*))))
);

impl Deserializer {
    fn push(&mut self, struct_field: &'static str) {
        let key = ArgvMap::struct_field_to_key(struct_field);
        self.stack.push(DeserializerItem {
            key: key.clone(),
            struct_field,
            val: self.vals.find(&key).cloned(),
        });
    }

    fn pop(&mut self) -> Result<DeserializerItem> {
        match self.stack.pop() {
            None => derr!("Could not deserialize value into unknown key."),
            Some(it) => Ok(it),
        }
    }

    fn pop_key_val(&mut self) -> Result<(String, Value)> {
        let it = self.pop()?;
        match it.val {
            None => derr!(
                "Could not find argument '{}' (from struct field '{}').
Note that each struct field must have the right key prefix, which must
be one of `cmd_`, `flag_` or `arg_`.",
                it.key,
                it.struct_field
            ),
            Some(v) => Ok((it.key, v)),
        }
    }

    fn pop_val(&mut self) -> Result<Value> {
        let (_, v) = self.pop_key_val()?;
        Ok(v)
    }

    fn to_number<T>(&mut self, expect: &str) -> Result<T>
    where
        T: FromStr + ToString,
        <T as FromStr>::Err: Debug,
    {
        let (k, v) = self.pop_key_val()?;
        match v {
            Counted(n) => match n.to_string().parse() {
                Ok(n) => Ok(n),
                Err(_) => derr!("Could not deserialize count {} to {} for '{}'.", n, expect, k),
            },
            _ => {
                let s = if v.as_str().trim().is_empty() {
                    "0"
                } else {
                    v.as_str()
                };
                match s.parse() {
                    Ok(n) => Ok(n),
                    Err(_) => derr!(
                        "Could not deserialize '{}' to {} for '{}'.",
                        v.as_str(),
                        expect,
                        k
                    ),
                }
            }
        }
    }

    fn to_float(&mut self, expect: &str) -> Result<f64> {
        let (k, v) = self.pop_key_val()?;
        match v {
            Counted(n) => Ok(n as f64),
            _ => match v.as_str().parse() {
                Ok(f) => Ok(f),
                Err(_) => derr!(
                    "Could not deserialize '{}' to {} for '{}'.",
                    v.as_str(),
                    expect,
                    k
                ),
            },
        }
    }
}

macro_rules! deserialize_num {
    ($name:ident, $visit:ident, $ty:ty) => {
        fn $name<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            let n = self.to_number::<$ty>(stringify!($ty))?;
            visitor.$visit(n)
        }
    };
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        // Dispatch on the shape of the matched value.
        let it = self.pop()?;
        match it.val {
            None | Some(Plain(None)) => visitor.visit_unit(),
            Some(Switch(b)) => visitor.visit_bool(b),
            Some(Counted(n)) => visitor.visit_u64(n),
            Some(Plain(Some(s))) => visitor.visit_string(s),
            Some(List(_)) => {
                self.stack.push(it);
                self.deserialize_seq(visitor)
            }
        }
    }

    deserialize_num!(deserialize_u8, visit_u8, u8);
    deserialize_num!(deserialize_u16, visit_u16, u16);
    deserialize_num!(deserialize_u32, visit_u32, u32);
    deserialize_num!(deserialize_u64, visit_u64, u64);
    deserialize_num!(deserialize_i8, visit_i8, i8);
    deserialize_num!(deserialize_i16, visit_i16, i16);
    deserialize_num!(deserialize_i32, visit_i32, i32);
    deserialize_num!(deserialize_i64, visit_i64, i64);

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_bool(self.pop_val()?.as_bool())
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let f = self.to_float("f32")?;
        visitor.visit_f32(f as f32)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let f = self.to_float("f64")?;
        visitor.visit_f64(f)
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let (k, v) = self.pop_key_val()?;
        let s = v.as_str();
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => derr!("Could not deserialize '{}' into char for '{}'.", s, k),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_string(self.pop_val()?.as_str().to_owned())
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let present = match self.stack.last() {
            None => derr!("Could not deserialize value into unknown key."),
            Some(it) => it.val.as_ref().map_or(false, |v| v.as_bool()),
        };
        if present {
            visitor.visit_some(self)
        } else {
            self.pop()?;
            visitor.visit_none()
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.pop()?;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let it = self.pop()?;
        let key = it.key;
        let struct_field = it.struct_field;
        let list = it.val.unwrap_or(List(vec![]));
        let vals = list.as_vec();
        let len = vals.len();
        for val in vals.iter().rev() {
            self.stack.push(DeserializerItem {
                key: key.clone(),
                struct_field,
                val: Some(Plain(Some((*val).into()))),
            });
        }
        visitor.visit_seq(SeqItems { de: self, len })
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _: usize, _: V) -> Result<V::Value> {
        derr!("Cannot deserialize a command line into a tuple.")
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        _: usize,
        _: V,
    ) -> Result<V::Value> {
        derr!("Cannot deserialize a command line into a tuple struct.")
    }

    fn deserialize_map<V: Visitor<'de>>(self, _: V) -> Result<V::Value> {
        derr!("Cannot deserialize a command line into a map; use a struct instead.")
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_map(StructFields {
            de: self,
            fields: fields.iter(),
        })
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let (k, v) = self.pop_key_val()?;
        let s = v.as_str().to_lowercase();
        match variants.iter().find(|n| n.to_lowercase() == s) {
            Some(&variant) => visitor.visit_enum(variant.into_deserializer()),
            None => derr!(
                "Could not match '{}' with any of the allowed variants: {:?} for '{}'.",
                v.as_str(),
                variants,
                k
            ),
        }
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, _: V) -> Result<V::Value> {
        derr!("Cannot deserialize an identifier from a command line.")
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.pop()?;
        visitor.visit_unit()
    }
}

struct StructFields<'a> {
    de: &'a mut Deserializer,
    fields: ::std::slice::Iter<'static, &'static str>,
}

impl<'de, 'a> de::MapAccess<'de> for StructFields<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.fields.next() {
            None => Ok(None),
            Some(&field) => {
                self.de.push(field);
                seed.deserialize(field.into_deserializer()).map(Some)
            }
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut *self.de)
    }
}

struct SeqItems<'a> {
    de: &'a mut Deserializer,
    len: usize,
}

impl<'de, 'a> de::SeqAccess<'de> for SeqItems<'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.len == 0 {
            return Ok(None);
        }
        self.len -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::{ArgvMap, Value};
    use rstest::rstest;

    #[rstest]
    #[case("--foo-bar", "flag_foo_bar")]
    #[case("-f", "flag_f")]
    #[case("<my-arg>", "arg_my_arg")]
    #[case("FILE", "arg_FILE")]
    #[case("build", "cmd_build")]
    fn keys_become_struct_fields(#[case] key: &str, #[case] field: &str) {
        assert_eq!(ArgvMap::key_to_struct_field(key), field);
    }

    #[rstest]
    #[case("flag_foo_bar", "--foo-bar")]
    #[case("flag_f", "-f")]
    #[case("arg_my_arg", "<my-arg>")]
    #[case("arg_FILE", "FILE")]
    #[case("cmd_build", "build")]
    fn struct_fields_become_keys(#[case] field: &str, #[case] key: &str) {
        assert_eq!(ArgvMap::struct_field_to_key(field), key);
    }

    #[rstest]
    #[case(Value::Switch(true), true, 1)]
    #[case(Value::Switch(false), false, 0)]
    #[case(Value::Counted(3), true, 3)]
    #[case(Value::Plain(None), false, 0)]
    #[case(Value::Plain(Some("x".to_string())), true, 1)]
    #[case(Value::List(vec![]), false, 0)]
    #[case(Value::List(vec!["a".to_string(), "b".to_string()]), true, 2)]
    fn value_conversions(#[case] v: Value, #[case] b: bool, #[case] n: u64) {
        assert_eq!(v.as_bool(), b);
        assert_eq!(v.as_count(), n);
    }
}
