use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tempfile::TempDir;
use unifieddb_index::{IndexEntry, IndexNode, TreeIndexer};

use crate::integration::support::write_tree;

/// (directory segments, file stem, extension)
type GeneratedFile = (Vec<String>, String, String);

fn generated_file() -> impl Strategy<Value = GeneratedFile> {
    (
        prop::collection::vec("d[0-2]", 0..3),
        "f[0-4]",
        prop::sample::select(vec!["yaml", "json", "txt", "YAML"]),
    )
        .prop_map(|(dirs, stem, ext)| (dirs, stem, ext.to_string()))
}

/// Keep one file per (directory, stem) so no two files share an index key.
fn dedupe(files: Vec<GeneratedFile>) -> Vec<String> {
    let mut unique: BTreeMap<(Vec<String>, String), String> = BTreeMap::new();
    for (dirs, stem, ext) in files {
        unique.entry((dirs, stem)).or_insert(ext);
    }
    unique
        .into_iter()
        .map(|((dirs, stem), ext)| {
            let mut parts = dirs;
            parts.push(format!("{}.{}", stem, ext));
            parts.join("/")
        })
        .collect()
}

fn directories(node: &IndexNode, prefix: &str, out: &mut BTreeSet<String>) {
    for (key, entry) in node {
        if let IndexEntry::Node(child) = entry {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}/{}", prefix, key)
            };
            directories(child, &path, out);
            out.insert(path);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn index_mirrors_generated_tree(files in prop::collection::vec(generated_file(), 0..12)) {
        let files = dedupe(files);
        let temp = TempDir::new().unwrap();
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        write_tree(temp.path(), &refs);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let node = runtime
            .block_on(TreeIndexer::new(temp.path()).index_root())
            .unwrap();

        let expected_refs: BTreeSet<String> = files
            .iter()
            .filter(|path| path.ends_with(".yaml") || path.ends_with(".json"))
            .cloned()
            .collect();
        let actual_refs: BTreeSet<String> =
            node.references().into_iter().map(|r| r.path.clone()).collect();
        prop_assert_eq!(actual_refs, expected_refs);

        let mut expected_dirs = BTreeSet::new();
        for path in &files {
            let segments: Vec<&str> = path.split('/').collect();
            for depth in 1..segments.len() {
                expected_dirs.insert(segments[..depth].join("/"));
            }
        }
        let mut actual_dirs = BTreeSet::new();
        directories(&node, "", &mut actual_dirs);
        prop_assert_eq!(actual_dirs, expected_dirs);
    }
}
