//! Utilities that needed a home.

/// Wrapper for lazily compiled regexes.
pub struct RegexWrap(&'static str, ::once_cell::sync::OnceCell<::regex::Regex>);

impl RegexWrap {
    /// Create a new const instance with the given regexp.
    pub const fn new(re: &'static str) -> Self {
        Self(re, ::once_cell::sync::OnceCell::<::regex::Regex>::new())
    }
}

impl ::std::ops::Deref for RegexWrap {
    type Target = ::regex::Regex;
    fn deref(&self) -> &Self::Target {
        self.1.get_or_init(|| ::regex::Regex::new(self.0).unwrap())
    }
}

/// Declares a lazy static regex.
macro_rules! decl_regex {
    ($($name:ident : $re:literal; )*) => {
        $(
            static $name: $crate::utils::RegexWrap = $crate::utils::RegexWrap::new($re);
        )*
    };
}

/// Print an error.
macro_rules! werr(
    ($($arg:tt)*) => ({
        use std::io::{Write, stderr};
        write!(&mut stderr(), $($arg)*).unwrap();
    })
);

pub(crate) fn cap_or_empty<'t>(caps: &regex::Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Finds the flag in `candidates` closest to `unknown`, if any is close
/// enough to plausibly be a typo.
pub(crate) fn closest_flag<'a, I>(unknown: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .map(|c| (strsim::levenshtein(unknown, c), c))
        .filter(|&(dist, _)| dist <= 3)
        .min_by_key(|&(dist, _)| dist)
        .map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::closest_flag;
    use rstest::rstest;

    #[rstest]
    #[case("--releas", &["--release", "--verbose"], Some("--release"))]
    #[case("--complte", &["--import", "--complete"], Some("--complete"))]
    #[case("--zzzzzzz", &["--import", "--complete"], None)]
    fn suggests_nearest(
        #[case] unknown: &str,
        #[case] known: &[&'static str],
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(closest_flag(unknown, known.iter().copied()), expected);
    }

    #[test]
    fn prefers_smallest_distance() {
        let known = ["--exprot", "--export"];
        assert_eq!(closest_flag("--expotr", known), Some("--exprot"));
    }
}
