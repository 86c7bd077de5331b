use std::fs;
use tempfile::TempDir;
use unifieddb_index::config::IndexerConfig;
use unifieddb_index::{index, IndexEntry, IndexNode, PathSegments, Reference, TreeIndexer};

use crate::integration::support::{child, keys, reference, write_tree};

#[tokio::test]
async fn skips_files_with_other_extensions() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["a.yaml", "b.txt", "README", "Upper.YAML"]);
    fs::create_dir(temp.path().join("c")).unwrap();

    let node = index(PathSegments::root(), temp.path()).await.unwrap();

    assert_eq!(keys(&node), vec!["a", "c"]);
    assert_eq!(reference(&node, "a"), "a.yaml");
    assert!(child(&node, "c").is_empty());
}

#[tokio::test]
async fn one_key_per_file_and_directory() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &[
            "types/int.yaml",
            "types/float.json",
            "modules/core/module.yaml",
            "modules/core/params/xlen.yaml",
            "top.json",
        ],
    );

    let node = TreeIndexer::new(temp.path()).index_root().await.unwrap();

    assert_eq!(keys(&node), vec!["modules", "top", "types"]);
    assert_eq!(keys(child(&node, "types")), vec!["float", "int"]);
    let core = child(child(&node, "modules"), "core");
    assert_eq!(keys(core), vec!["module", "params"]);
    assert_eq!(
        reference(child(core, "params"), "xlen"),
        "modules/core/params/xlen.yaml"
    );
    assert_eq!(node.references().len(), 5);
    assert_eq!(node.directory_count(), 4);
}

#[tokio::test]
async fn nested_reference_is_root_relative() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["x/y/z.json"]);

    let node = TreeIndexer::new(temp.path()).index_root().await.unwrap();
    let y = child(child(&node, "x"), "y");

    assert_eq!(reference(y, "z"), "x/y/z.json");
}

#[tokio::test]
async fn empty_directories_still_contribute_keys() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("empty").join("deeper")).unwrap();
    write_tree(temp.path(), &["only-text/notes.txt"]);

    let node = TreeIndexer::new(temp.path()).index_root().await.unwrap();

    assert_eq!(keys(&node), vec!["empty", "only-text"]);
    assert_eq!(keys(child(&node, "empty")), vec!["deeper"]);
    assert!(child(&node, "only-text").is_empty());
}

#[tokio::test]
async fn directory_with_data_extension_is_a_node() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["bundle.json/inner.yaml"]);

    let node = TreeIndexer::new(temp.path()).index_root().await.unwrap();

    assert_eq!(keys(&node), vec!["bundle.json"]);
    assert_eq!(
        reference(child(&node, "bundle.json"), "inner"),
        "bundle.json/inner.yaml"
    );
}

#[tokio::test]
async fn every_reference_resolves_to_a_regular_file() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &["a.yaml", "d/b.json", "d/e/c.yaml", "d/e/f/g.json", "d/skip.md"],
    );

    let node = TreeIndexer::new(temp.path()).index_root().await.unwrap();

    let references = node.references();
    assert_eq!(references.len(), 4);
    for Reference { path } in references {
        let resolved = path
            .split('/')
            .fold(temp.path().to_path_buf(), |acc, segment| acc.join(segment));
        assert!(resolved.is_file(), "{} should resolve to a file", path);
    }
}

#[tokio::test]
async fn repeated_runs_produce_identical_documents() {
    let temp = TempDir::new().unwrap();
    write_tree(
        temp.path(),
        &["z.yaml", "a.json", "m/n.yaml", "m/o/p.json", "b/c.yaml"],
    );

    let indexer = TreeIndexer::new(temp.path());
    let first = serde_json::to_string_pretty(&indexer.index_root().await.unwrap()).unwrap();
    let second = serde_json::to_string_pretty(&indexer.index_root().await.unwrap()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn output_round_trips_through_json() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["a.yaml", "x/y/z.json"]);
    fs::create_dir(temp.path().join("empty")).unwrap();

    let node = TreeIndexer::new(temp.path()).index_root().await.unwrap();
    let text = serde_json::to_string(&node).unwrap();
    let parsed: IndexNode = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, node);
    assert_eq!(
        parsed.get("a"),
        Some(&IndexEntry::Reference(Reference::new("a.yaml")))
    );
}

#[tokio::test]
async fn extension_list_comes_from_config() {
    let temp = TempDir::new().unwrap();
    write_tree(temp.path(), &["a.yaml", "b.json", "c.yml"]);

    let config = IndexerConfig {
        extensions: vec![".json".to_string(), ".yml".to_string()],
        ..IndexerConfig::default()
    };
    let node = TreeIndexer::new(temp.path())
        .with_indexer_config(config)
        .index_root()
        .await
        .unwrap();

    assert_eq!(keys(&node), vec!["b", "c"]);
}

#[cfg(unix)]
#[tokio::test]
async fn symlinks_follow_target_kind_by_default() {
    use std::os::unix::fs::symlink;

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    write_tree(&root, &["real/a.yaml"]);
    write_tree(temp.path(), &["outside/b.json"]);
    symlink(root.join("real").join("a.yaml"), root.join("alias.yaml")).unwrap();
    symlink(temp.path().join("outside"), root.join("linked")).unwrap();

    let node = TreeIndexer::new(&root).index_root().await.unwrap();
    assert_eq!(keys(&node), vec!["alias", "linked", "real"]);
    assert_eq!(reference(&node, "alias"), "alias.yaml");
    assert_eq!(reference(child(&node, "linked"), "b"), "linked/b.json");

    let config = IndexerConfig {
        follow_symlinks: false,
        ..IndexerConfig::default()
    };
    let node = TreeIndexer::new(&root)
        .with_indexer_config(config)
        .index_root()
        .await
        .unwrap();
    assert_eq!(keys(&node), vec!["real"]);
}
