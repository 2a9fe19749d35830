//! Lives in its own test binary: the shutdown flag is process-wide and never cleared here.

use publink::{place_all, shutdown, urls, Placer, PublinkError, TargetDir};
use std::fs;
use tempfile::tempdir;

#[test]
fn items_after_interrupt_are_skipped_untouched() {
    let root_td = tempdir().unwrap();
    let src_td = tempdir().unwrap();
    let root = dunce::canonicalize(root_td.path()).unwrap();
    let placer = Placer::new(&root, "http://example.com/pub/");

    let a = src_td.path().join("a.txt");
    let b = src_td.path().join("b.txt");
    fs::write(&a, b"a").unwrap();
    fs::write(&b, b"b").unwrap();

    shutdown::request();
    let outcomes = place_all(&placer, &[&a, &b], &TargetDir::parse("t").unwrap(), true);

    assert!(outcomes
        .iter()
        .all(|o| matches!(o.result, Err(PublinkError::Interrupted))));
    assert!(urls(&outcomes).is_empty());
    assert!(a.exists() && b.exists(), "sources must not be moved");
    assert!(!root.join("t").exists(), "nothing is created under the root");
}
