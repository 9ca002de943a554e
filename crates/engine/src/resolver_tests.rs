// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use sgf_adapters::FakeTrackingStore;
use std::collections::BTreeSet;

fn file(id: i64, downstream: &[i64]) -> TrackedFile {
    TrackedFile::builder()
        .id(id)
        .code(format!("file_{id}"))
        .downstream(downstream.iter().map(|id| EntityRef::published_file(*id)).collect())
        .build()
}

fn resolver(files: impl IntoIterator<Item = TrackedFile>) -> (DependencyResolver, FakeTrackingStore) {
    let store = FakeTrackingStore::new();
    for f in files {
        store.add_file(f);
    }
    (DependencyResolver::new(Arc::new(store.clone())), store)
}

fn ids(files: &[TrackedFile]) -> Vec<i64> {
    files.iter().map(|f| f.id).collect()
}

#[tokio::test]
async fn empty_input_expands_to_nothing() {
    let (resolver, store) = resolver([file(1, &[])]);

    assert!(resolver.expand(&[]).await.unwrap().is_empty());
    assert!(store.batch_lookups().is_empty());
}

#[tokio::test]
async fn leaf_expands_to_itself() {
    let (resolver, _) = resolver([file(1, &[])]);

    let expanded = resolver.expand(&[EntityRef::published_file(1)]).await.unwrap();

    assert_eq!(ids(&expanded), vec![1]);
}

#[tokio::test]
async fn chain_is_followed_one_query_per_level() {
    let (resolver, store) = resolver([file(1, &[2]), file(2, &[3]), file(3, &[])]);

    let expanded = resolver.expand(&[EntityRef::published_file(1)]).await.unwrap();

    assert_eq!(ids(&expanded), vec![1, 2, 3]);
    assert_eq!(store.batch_lookups(), vec![vec![1], vec![2], vec![3]]);
}

#[tokio::test]
async fn shared_child_appears_once() {
    let (resolver, store) = resolver([file(1, &[2, 3]), file(2, &[4]), file(3, &[4]), file(4, &[])]);

    let expanded = resolver.expand(&[EntityRef::published_file(1)]).await.unwrap();

    assert_eq!(ids(&expanded), vec![1, 2, 3, 4]);
    assert_eq!(store.batch_lookups(), vec![vec![1], vec![2, 3], vec![4]]);
}

#[tokio::test]
async fn cycle_terminates() {
    let (resolver, _) = resolver([file(1, &[2]), file(2, &[1]), file(3, &[3])]);

    let expanded = resolver.expand(&[EntityRef::published_file(1), EntityRef::published_file(3)]).await.unwrap();

    assert_eq!(ids(&expanded), vec![1, 3, 2]);
}

#[tokio::test]
async fn duplicate_inputs_are_queried_once() {
    let (resolver, store) = resolver([file(1, &[])]);

    let expanded = resolver.expand(&[EntityRef::published_file(1), EntityRef::published_file(1)]).await.unwrap();

    assert_eq!(ids(&expanded), vec![1]);
    assert_eq!(store.batch_lookups(), vec![vec![1]]);
}

#[tokio::test]
async fn unknown_reference_is_dropped() {
    let (resolver, _) = resolver([file(1, &[99])]);

    let expanded = resolver.expand(&[EntityRef::published_file(1)]).await.unwrap();

    assert_eq!(ids(&expanded), vec![1]);
}

fn reachable(edges: &[Vec<i64>], roots: &[i64]) -> BTreeSet<i64> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<i64> = roots.to_vec();
    while let Some(id) = stack.pop() {
        if seen.insert(id) {
            stack.extend(edges[id as usize].iter().copied());
        }
    }
    seen
}

fn graph() -> impl Strategy<Value = Vec<Vec<i64>>> {
    (1usize..12).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(0..n as i64, 0..4), n))
}

proptest! {
    #[test]
    fn expansion_terminates_and_covers_reachable_set(edges in graph(), root_count in 1usize..3) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let files: Vec<_> = edges.iter().enumerate().map(|(id, down)| file(id as i64, down)).collect();
        let roots: Vec<i64> = (0..root_count.min(edges.len()) as i64).collect();
        let (resolver, _) = resolver(files);

        let refs: Vec<_> = roots.iter().map(|id| EntityRef::published_file(*id)).collect();
        let expanded = runtime.block_on(resolver.expand(&refs)).unwrap();

        let got = ids(&expanded);
        let unique: BTreeSet<i64> = got.iter().copied().collect();
        prop_assert_eq!(unique.len(), got.len());
        prop_assert_eq!(unique, reachable(&edges, &roots));
    }
}
