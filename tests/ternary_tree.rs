// ==============================================
// TERNARY SEARCH TREE BEHAVIOR (integration)
// ==============================================
//
// Exercises the public tree API end to end, in both decomposition modes.

use assockit::ds::{KeyIterator, PathTree, StringTree, TernarySearchTree};

// ==============================================
// Exact lookups
// ==============================================

#[test]
fn keys_sharing_prefixes_stay_independent() {
    let mut tree = StringTree::for_strings();
    let keys = ["a", "ab", "abc", "abd", "b", "ba", ""];
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(tree.set(key, i), None);
    }
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(tree.get(key), Some(&i), "key {:?}", key);
    }
    assert_eq!(tree.get("abcd"), None);
    assert_eq!(tree.get("c"), None);
    assert_eq!(tree.len(), keys.len());
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn set_returns_prior_value() {
    let mut tree = PathTree::for_paths();
    assert_eq!(tree.set("etc/hosts", "v1"), None);
    assert_eq!(tree.set("etc/hosts", "v2"), Some("v1"));
    assert_eq!(tree.get("etc/hosts"), Some(&"v2"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn path_mode_siblings() {
    let mut tree = PathTree::for_paths();
    tree.set("a/b", 1);
    tree.set("a/c", 2);
    assert_eq!(tree.get("a/b"), Some(&1));
    assert_eq!(tree.get("a/c"), Some(&2));

    assert_eq!(tree.delete("a/b"), Some(1));
    assert_eq!(tree.get("a/b"), None);
    assert_eq!(tree.get("a/c"), Some(&2));
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn path_normalization_matches_equivalent_spellings() {
    let mut tree = PathTree::for_paths();
    tree.set("a/b/", 7);
    assert_eq!(tree.get("a/b"), Some(&7));
    assert_eq!(tree.get("a\\b"), Some(&7));
    assert_eq!(tree.get("/a//b"), Some(&7));
    assert_eq!(tree.set("a\\b\\", 8), Some(7));
    assert_eq!(tree.len(), 1);
}

// ==============================================
// Deletion
// ==============================================

#[test]
fn delete_removes_from_enumeration() {
    let mut tree = StringTree::for_strings();
    tree.extend([("cat", 1), ("car", 2), ("cart", 3)]);

    assert_eq!(tree.delete("car"), Some(2));
    assert_eq!(tree.delete("car"), None);
    assert_eq!(tree.delete("zebra"), None);

    let mut seen = Vec::new();
    tree.for_each(|value, key| seen.push((key.to_string(), *value)));
    assert_eq!(seen, vec![("cart".to_string(), 3), ("cat".to_string(), 1)]);
    assert!(tree.check_invariants().is_ok());
}

#[test]
fn deleting_everything_releases_all_nodes() {
    let mut tree = StringTree::for_strings();
    let keys = ["m", "f", "t", "fa", "fab", "tz", "mm"];
    for key in keys {
        tree.set(key, ());
    }
    for key in keys {
        assert!(tree.delete(key).is_some());
        assert!(tree.check_invariants().is_ok());
    }
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);

    tree.set("again", ());
    assert!(tree.contains_key("again"));
}

// ==============================================
// Prefix queries
// ==============================================

#[test]
fn find_substr_picks_deepest_stored_prefix() {
    let mut tree = StringTree::for_strings();
    tree.set("foo", 1);
    tree.set("foobar", 2);
    assert_eq!(tree.find_substr("foobarbaz"), Some(&2));
    assert_eq!(tree.find_substr("foo"), Some(&1));
    assert_eq!(tree.find_substr("foob"), Some(&1));
    assert_eq!(tree.find_substr("zzz"), None);
    assert_eq!(tree.find_substr("fo"), None);
}

#[test]
fn find_substr_on_paths_resolves_mount_points() {
    let mut tree = PathTree::for_paths();
    tree.set("/", "root");
    tree.set("/home", "home");
    tree.set("/home/user/projects", "projects");

    assert_eq!(tree.find_substr("/home/user/projects/x/y"), Some(&"projects"));
    assert_eq!(tree.find_substr("/home/user/music"), Some(&"home"));
    assert_eq!(tree.find_substr("/home"), Some(&"home"));
}

#[test]
fn find_superstr_enumerates_strict_extensions() {
    let mut tree = PathTree::for_paths();
    tree.set("a/b", 1);
    tree.set("a/c", 2);

    let mut found: Vec<i32> = tree.find_superstr("a").unwrap().copied().collect();
    found.sort();
    assert_eq!(found, vec![1, 2]);

    // each call yields a fresh enumerator
    let mut first = tree.find_superstr("a").unwrap();
    assert!(first.next().is_some());
    assert!(first.next().is_some());
    assert!(first.next().is_none());
    assert_eq!(tree.find_superstr("a").unwrap().count(), 2);
}

#[test]
fn find_superstr_distinguishes_missing_from_leaf() {
    let mut tree = PathTree::for_paths();
    tree.set("a/b", 1);

    assert!(tree.find_superstr("x").is_none());
    assert!(tree.find_superstr("a/b/c").is_none());
    let leaf = tree.find_superstr("a/b").expect("path exists");
    assert_eq!(leaf.count(), 0);
}

// ==============================================
// Traversal order and custom decomposition
// ==============================================

#[test]
fn string_traversal_is_lexicographic() {
    let words = ["pear", "apple", "peach", "fig", "apricot", "pea", "banana"];
    let tree: StringTree<usize> = words.iter().enumerate().map(|(i, w)| (*w, i)).collect();

    let mut expected: Vec<&str> = words.to_vec();
    expected.sort();
    assert_eq!(tree.keys().collect::<Vec<_>>(), expected);
    assert_eq!(tree.values().count(), words.len());
}

#[test]
fn path_traversal_nests_children_after_parent() {
    let mut tree = PathTree::for_paths();
    for key in ["b", "a/z", "a", "a/b", "c"] {
        tree.set(key, ());
    }
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["a", "a/b", "a/z", "b", "c"]);
}

/// Splits on `.` so dotted names share nodes per label.
#[derive(Default)]
struct DottedIterator {
    value: String,
    from: usize,
    to: usize,
}

impl KeyIterator for DottedIterator {
    fn reset(&mut self, key: &str) -> &mut Self {
        self.value.clear();
        self.value.push_str(key);
        self.from = 0;
        self.to = self.value.find('.').unwrap_or(self.value.len());
        self
    }

    fn advance(&mut self) -> &mut Self {
        self.from = (self.to + 1).min(self.value.len());
        self.to = self.value[self.from..]
            .find('.')
            .map_or(self.value.len(), |i| self.from + i);
        self
    }

    fn has_next(&self) -> bool {
        self.to < self.value.len()
    }

    fn value(&self) -> &str {
        &self.value[self.from..self.to]
    }
}

#[test]
fn custom_iterator_plugs_into_tree() {
    let mut tree = TernarySearchTree::with_iterator(DottedIterator::default());
    tree.set("com.example", 1);
    tree.set("com.example.api", 2);
    tree.set("org.rust", 3);

    assert_eq!(tree.get("com.example"), Some(&1));
    assert_eq!(tree.find_substr("com.example.www"), Some(&1));
    assert_eq!(tree.find_superstr("com").unwrap().count(), 2);
    assert_eq!(tree.node_count(), 5);
    assert!(tree.check_invariants().is_ok());
}
