use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

/// A map where some keys are synonyms for others.
///
/// A synonym key is never stored with a value of its own; lookups through it
/// resolve to its canonical key. docarg uses this so that `-h` and `--help`
/// name the same matched value.
#[derive(Clone)]
pub struct SynonymMap<K, V> {
    vals: HashMap<K, V>,
    syns: HashMap<K, K>,
}

impl<K: Eq + Hash, V> SynonymMap<K, V> {
    pub fn new() -> SynonymMap<K, V> {
        SynonymMap {
            vals: HashMap::new(),
            syns: HashMap::new(),
        }
    }

    /// Registers `from` as a synonym for the existing key `to`.
    pub fn insert_synonym(&mut self, from: K, to: K) {
        assert!(self.vals.contains_key(&to));
        self.syns.insert(from, to);
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.vals.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.vals.iter()
    }

    pub fn synonyms(&self) -> hash_map::Iter<'_, K, K> {
        self.syns.iter()
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    fn canonical<'a>(&'a self, k: &'a K) -> &'a K {
        self.syns.get(k).unwrap_or(k)
    }

    pub fn find(&self, k: &K) -> Option<&V> {
        self.vals.get(self.canonical(k))
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.vals.contains_key(self.canonical(k))
    }

    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        self.vals.insert(k, v)
    }
}

impl<K: Eq + Hash + Clone, V> SynonymMap<K, V> {
    /// Resolves a key to its canonical form.
    pub fn resolve(&self, k: &K) -> K {
        self.canonical(k).clone()
    }

    pub fn get(&self, k: &K) -> &V {
        self.find(k).unwrap()
    }

    pub fn find_mut(&mut self, k: &K) -> Option<&mut V> {
        let k = self.canonical(k).clone();
        self.vals.get_mut(&k)
    }
}

impl<K: Eq + Hash, V> Default for SynonymMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for SynonymMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> SynonymMap<K, V> {
        let mut map = SynonymMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: Eq + Hash + fmt::Debug, V: fmt::Debug> fmt::Debug for SynonymMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.vals.fmt(f)?;
        write!(f, " (synonyms: {:?})", self.syns)
    }
}

#[cfg(test)]
mod tests {
    use super::SynonymMap;

    #[test]
    fn lookups_resolve_synonyms() {
        let mut map = SynonymMap::new();
        map.insert("--help".to_string(), 1);
        map.insert_synonym("-h".to_string(), "--help".to_string());

        assert_eq!(map.find(&"-h".to_string()), Some(&1));
        assert_eq!(map.find(&"--help".to_string()), Some(&1));
        assert!(map.contains_key(&"-h".to_string()));
        assert_eq!(map.resolve(&"-h".to_string()), "--help".to_string());
        // Synonyms don't count towards the length.
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn writes_through_synonyms() {
        let mut map = SynonymMap::new();
        map.insert("--verbose".to_string(), 0);
        map.insert_synonym("-v".to_string(), "--verbose".to_string());
        *map.find_mut(&"-v".to_string()).unwrap() += 1;
        assert_eq!(map.get(&"--verbose".to_string()), &1);
    }

    #[test]
    #[should_panic]
    fn synonym_requires_existing_target() {
        let mut map: SynonymMap<String, i32> = SynonymMap::new();
        map.insert_synonym("-h".to_string(), "--help".to_string());
    }

    #[test]
    fn collects_from_pairs() {
        let map: SynonymMap<String, i32> =
            vec![("-a".to_string(), 1), ("-b".to_string(), 2)]
                .into_iter()
                .collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.find(&"-b".to_string()), Some(&2));
    }
}
