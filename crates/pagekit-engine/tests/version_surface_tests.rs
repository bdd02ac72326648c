//! Snapshots, listing and lookup, including concurrent numbering

mod common;

use pagekit_core::snapshot::SnapshotRequest;
use pagekit_core::{ComponentPatch, PageVersion, PkErrorKind};
use serde_json::json;
use std::collections::BTreeSet;

#[test]
fn test_versions_number_from_one_and_list_newest_first() {
    let engine = common::memory_engine();
    let (page_id, _, _) = common::text_and_card(&engine);

    let v1 = engine
        .create_version(&page_id, SnapshotRequest::by("editor").named("Draft"))
        .unwrap();
    let v2 = engine
        .create_version(&page_id, SnapshotRequest::by("editor"))
        .unwrap();

    assert_eq!(v1.version_number(), 1);
    assert_eq!(v2.version_number(), 2);
    assert_eq!(v1.version_name(), Some("Draft"));
    let listed: Vec<u32> = engine
        .list_versions(&page_id)
        .unwrap()
        .iter()
        .map(PageVersion::version_number)
        .collect();
    assert_eq!(listed, vec![2, 1]);
}

#[test]
fn test_version_is_isolated_from_later_edits() {
    // GIVEN v1 taken before the card was retitled
    let engine = common::memory_engine();
    let (page_id, _, card_id) = common::text_and_card(&engine);
    let v1 = engine
        .create_version(&page_id, SnapshotRequest::by("editor"))
        .unwrap();

    // WHEN the page changes
    engine
        .update_component(&page_id, &card_id, ComponentPatch::payload(json!({ "title": "Later" })))
        .unwrap();

    // THEN the stored version still holds the old components
    let stored = engine.get_version_content(&page_id, v1.id()).unwrap();
    assert_eq!(stored.components(), v1.components());
    assert_ne!(
        stored.components(),
        engine.get_page(&page_id).unwrap().components()
    );
}

#[test]
fn test_version_lookup_is_scoped_to_page() {
    let engine = common::memory_engine();
    let (page_a, _, _) = common::text_and_card(&engine);
    let (page_b, _, _) = common::text_and_card(&engine);
    let v_a = engine
        .create_version(&page_a, SnapshotRequest::by("editor"))
        .unwrap();

    let err = engine.get_version_content(&page_b, v_a.id()).unwrap_err();
    assert_eq!(err.kind(), PkErrorKind::NotFound);
    assert_eq!(err.version_id(), Some(v_a.id()));
}

#[test]
fn test_snapshot_of_missing_page_fails() {
    let engine = common::memory_engine();
    let err = engine
        .create_version("missing", SnapshotRequest::by("editor"))
        .unwrap_err();
    assert_eq!(err.kind(), PkErrorKind::NotFound);
    assert_eq!(err.op(), Some("version_create"));
}

#[test]
fn test_concurrent_snapshots_get_contiguous_numbers() {
    // GIVEN a page that already has two versions
    let engine = common::memory_engine();
    let (page_id, _, _) = common::text_and_card(&engine);
    for _ in 0..2 {
        engine
            .create_version(&page_id, SnapshotRequest::by("seed"))
            .unwrap();
    }

    // WHEN sixteen threads snapshot it at once
    let numbers: Vec<u32> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let engine = &engine;
                let page_id = page_id.as_str();
                s.spawn(move || {
                    engine
                        .create_version(page_id, SnapshotRequest::by(format!("writer-{i}")))
                        .unwrap()
                        .version_number()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // THEN the numbers are exactly 3..=18
    let unique: BTreeSet<u32> = numbers.iter().copied().collect();
    assert_eq!(unique.len(), numbers.len());
    assert_eq!(unique, (3..=18).collect::<BTreeSet<u32>>());
}

#[test]
fn test_concurrent_snapshots_on_sqlite() {
    let (_dir, engine) = common::sqlite_engine();
    let (page_id, _, _) = common::text_and_card(&engine);

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                engine
                    .create_version(&page_id, SnapshotRequest::by("writer"))
                    .unwrap();
            });
        }
    });

    let listed: Vec<u32> = engine
        .list_versions(&page_id)
        .unwrap()
        .iter()
        .map(PageVersion::version_number)
        .collect();
    assert_eq!(listed, (1..=8).rev().collect::<Vec<u32>>());
}
