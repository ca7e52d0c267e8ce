// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use pjs_adapters::FakeCluster;

use super::*;

#[tokio::test]
async fn miss_then_hit_calls_expander_once() {
    let cluster = FakeCluster::new();
    let cache = NodeListCache::new();

    let first = cache.expand("n[1-3]", &cluster).await.unwrap();
    let second = cache.expand("n[1-3]", &cluster).await.unwrap();

    assert_eq!(first, "n1,n2,n3");
    assert_eq!(first, second);
    assert_eq!(cluster.expand_calls("n[1-3]"), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn stores_under_the_compressed_expression() {
    let cluster = FakeCluster::new();
    cluster.set_expansion("gpu-a", &["g1", "g2"]);
    let cache = NodeListCache::new();

    cache.expand("gpu-a", &cluster).await.unwrap();

    assert_eq!(cache.get("gpu-a").as_deref(), Some("g1,g2"));
    assert_eq!(cache.get("g1,g2"), None);
}

#[tokio::test]
async fn unassigned_expressions_skip_the_expander() {
    let cluster = FakeCluster::new();
    let cache = NodeListCache::new();

    for expr in ["", "   ", "None assigned"] {
        assert_eq!(cache.expand(expr, &cluster).await.unwrap(), "", "{expr:?}");
    }
    assert_eq!(cluster.total_expand_calls(), 0);
    assert!(cache.is_empty());
}

#[tokio::test]
async fn failures_are_not_cached() {
    let cluster = FakeCluster::new();
    cluster.fail_expansion("n[1-2]");
    let cache = NodeListCache::new();

    assert!(cache.expand("n[1-2]", &cluster).await.is_err());
    assert!(cache.expand("n[1-2]", &cluster).await.is_err());

    assert_eq!(cluster.expand_calls("n[1-2]"), 2);
    assert!(cache.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_agree() {
    let cluster = Arc::new(FakeCluster::new());
    let cache = Arc::new(NodeListCache::new());
    cache.expand("n[01-10]", cluster.as_ref()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let (cluster, cache) = (Arc::clone(&cluster), Arc::clone(&cache));
        handles.push(tokio::spawn(async move {
            cache.expand("n[01-10]", cluster.as_ref()).await.unwrap()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().split(',').count(), 10);
    }
    assert_eq!(cluster.expand_calls("n[01-10]"), 1);
}
