//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{Height, Payload, RegisterId, StateCommitment, TrieUpdate};
use archive_mapper::{MapperConfig, MapperError};
use archive_storage::{IndexReader, IndexWriter};

use crate::support::{
    block_facts,
    checkpoint_trie,
    open_store,
    path,
    payload,
    run_until_last,
    test_config,
    MockChain,
    MockFeeder,
    MockLoader,
};
mod support;

#[tokio::test]
async fn bootstrap_happy_path() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();
    let chain = MockChain::new(Height(100)).with_block(block_facts(100, commit_100));

    let (_dir, store) = open_store();
    let result = run_until_last(
        chain,
        MockFeeder::default(),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(100),
    )
    .await;
    result.unwrap();

    assert_eq!(store.first().unwrap(), Height(100));
    assert_eq!(store.last().unwrap(), Height(100));
    assert_eq!(store.commit(Height(100)).unwrap(), commit_100);
    assert_eq!(store.latest_registers_height().unwrap(), Height(100));

    let values = store.registers(Height(100), &[path(1), path(2), path(3)]).unwrap();
    assert_eq!(values[0].as_ref().unwrap().value, b"v1");
    assert_eq!(values[1].as_ref().unwrap().value, b"v2");
    assert_eq!(values[2].as_ref().unwrap().value, b"v3");
}

#[tokio::test]
async fn two_block_update() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let update = TrieUpdate::new(
        commit_100,
        vec![path(1), path(4)],
        vec![payload(b"v1'"), payload(b"v4")],
    );
    let expected = checkpoint.update(&update.paths, &update.payloads).unwrap();
    let commit_101 = expected.root_hash();

    let chain = MockChain::new(Height(100))
        .with_block(block_facts(100, commit_100))
        .with_block(block_facts(101, commit_101));

    let (_dir, store) = open_store();
    run_until_last(
        chain,
        MockFeeder::new(vec![update]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(101),
    )
    .await
    .unwrap();

    assert_eq!(store.last().unwrap(), Height(101));
    assert_eq!(store.commit(Height(101)).unwrap(), commit_101);

    let at_101 = store.registers(Height(101), &[path(1), path(4), path(2)]).unwrap();
    assert_eq!(at_101[0].as_ref().unwrap().value, b"v1'");
    assert_eq!(at_101[1].as_ref().unwrap().value, b"v4");
    assert_eq!(at_101[2].as_ref().unwrap().value, b"v2");

    let at_100 = store.registers(Height(100), &[path(1)]).unwrap();
    assert_eq!(at_100[0].as_ref().unwrap().value, b"v1");
}

#[tokio::test]
async fn pruned_branch_update_is_discarded() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let orphan = TrieUpdate::new(
        StateCommitment::from([0xEE; 32]),
        vec![path(9)],
        vec![payload(b"orphaned")],
    );
    let update = TrieUpdate::new(
        commit_100,
        vec![path(1), path(4)],
        vec![payload(b"v1'"), payload(b"v4")],
    );
    let expected = checkpoint.update(&update.paths, &update.payloads).unwrap();
    let commit_101 = expected.root_hash();

    let chain = MockChain::new(Height(100))
        .with_block(block_facts(100, commit_100))
        .with_block(block_facts(101, commit_101));

    let (_dir, store) = open_store();
    run_until_last(
        chain,
        MockFeeder::new(vec![orphan, update]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(101),
    )
    .await
    .unwrap();

    assert_eq!(store.last().unwrap(), Height(101));
    let at_101 = store.registers(Height(101), &[path(1), path(4), path(9)]).unwrap();
    assert_eq!(at_101[0].as_ref().unwrap().value, b"v1'");
    assert_eq!(at_101[1].as_ref().unwrap().value, b"v4");
    assert!(at_101[2].is_none());
}

#[tokio::test]
async fn duplicate_paths_in_one_update_canonicalize() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    // Last write to p1 wins: [p1, p1, p2] with [vA, vB, v2"] becomes [p1, p2] = [vB, v2"].
    let update = TrieUpdate::new(
        commit_100,
        vec![path(1), path(1), path(2)],
        vec![payload(b"vA"), payload(b"vB"), payload(b"v2\"")],
    );
    let expected = checkpoint
        .update(&[path(1), path(2)], &[payload(b"vB"), payload(b"v2\"")])
        .unwrap();
    let commit_101 = expected.root_hash();

    let chain = MockChain::new(Height(100))
        .with_block(block_facts(100, commit_100))
        .with_block(block_facts(101, commit_101));

    let (_dir, store) = open_store();
    run_until_last(
        chain,
        MockFeeder::new(vec![update]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(101),
    )
    .await
    .unwrap();

    let at_101 = store.registers(Height(101), &[path(1), path(2)]).unwrap();
    assert_eq!(at_101[0].as_ref().unwrap().value, b"vB");
    assert_eq!(at_101[1].as_ref().unwrap().value, b"v2\"");
}

#[tokio::test]
async fn unavailable_chain_delays_but_does_not_fail() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let update = TrieUpdate::new(commit_100, vec![path(4)], vec![payload(b"v4")]);
    let expected = checkpoint.update(&update.paths, &update.payloads).unwrap();
    let commit_101 = expected.root_hash();

    let chain = MockChain::new(Height(100))
        .with_block(block_facts(100, commit_100))
        .with_block(block_facts(101, commit_101))
        .with_unavailable(Height(101), 3);
    let probe = chain.clone();

    let (_dir, store) = open_store();
    run_until_last(
        chain,
        MockFeeder::new(vec![update]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(101),
    )
    .await
    .unwrap();

    assert_eq!(probe.remaining_unavailable(Height(101)), 0);
    assert_eq!(store.last().unwrap(), Height(101));
    assert_eq!(store.commit(Height(101)).unwrap(), commit_101);
}

#[tokio::test]
async fn resume_continues_from_the_next_height() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let update_101 = TrieUpdate::new(
        commit_100,
        vec![path(1), path(4)],
        vec![payload(b"v1'"), payload(b"v4")],
    );
    let trie_101 = checkpoint.update(&update_101.paths, &update_101.payloads).unwrap();
    let commit_101 = trie_101.root_hash();

    let (_dir, store) = open_store();
    run_until_last(
        MockChain::new(Height(100))
            .with_block(block_facts(100, commit_100))
            .with_block(block_facts(101, commit_101)),
        MockFeeder::new(vec![update_101]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(101),
    )
    .await
    .unwrap();

    // Restart against the same store, one more block on the chain. No loader this time:
    // the non-empty store must resume, verify the reloaded trie and carry on.
    let update_102 = TrieUpdate::new(commit_101, vec![path(2)], vec![payload(b"v2'")]);
    let trie_102 = trie_101.update(&update_102.paths, &update_102.payloads).unwrap();
    let commit_102 = trie_102.root_hash();

    run_until_last(
        MockChain::new(Height(100))
            .with_block(block_facts(100, commit_100))
            .with_block(block_facts(101, commit_101))
            .with_block(block_facts(102, commit_102)),
        MockFeeder::new(vec![update_102]),
        None,
        store.clone(),
        test_config(),
        Height(102),
    )
    .await
    .unwrap();

    assert_eq!(store.first().unwrap(), Height(100));
    assert_eq!(store.last().unwrap(), Height(102));
    let at_102 = store.registers(Height(102), &[path(1), path(2)]).unwrap();
    assert_eq!(at_102[0].as_ref().unwrap().value, b"v1'");
    assert_eq!(at_102[1].as_ref().unwrap().value, b"v2'");
}

#[tokio::test]
async fn resume_with_tampered_registers_fails_verification() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let (_dir, store) = open_store();
    run_until_last(
        MockChain::new(Height(100)).with_block(block_facts(100, commit_100)),
        MockFeeder::default(),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(100),
    )
    .await
    .unwrap();

    // Corrupt the persisted register state, then restart.
    store
        .write_registers(Height(100), &[(path(1), payload(b"tampered"))])
        .unwrap();

    let result = run_until_last(
        MockChain::new(Height(100)).with_block(block_facts(100, commit_100)),
        MockFeeder::default(),
        None,
        store.clone(),
        test_config(),
        Height(101),
    )
    .await;
    assert!(matches!(result, Err(MapperError::CommitMismatch { height, .. }) if height == Height(100)));
}

#[tokio::test]
async fn empty_store_without_checkpoint_is_fatal() {
    let (_dir, store) = open_store();
    let result = run_until_last(
        MockChain::new(Height(100)),
        MockFeeder::default(),
        None,
        store,
        test_config(),
        Height(100),
    )
    .await;
    assert!(matches!(result, Err(MapperError::NoCheckpoint)));
}

#[tokio::test]
async fn skip_registers_indexes_block_facts_only() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let update = TrieUpdate::new(commit_100, vec![path(4)], vec![payload(b"v4")]);
    let expected = checkpoint.update(&update.paths, &update.payloads).unwrap();
    let commit_101 = expected.root_hash();

    let chain = MockChain::new(Height(100))
        .with_block(block_facts(100, commit_100))
        .with_block(block_facts(101, commit_101));

    let (_dir, store) = open_store();
    run_until_last(
        chain,
        MockFeeder::new(vec![update]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        MapperConfig {
            skip_registers: true,
            ..test_config()
        },
        Height(101),
    )
    .await
    .unwrap();

    // Block-level facts are complete, register queries come back empty.
    assert_eq!(store.first().unwrap(), Height(100));
    assert_eq!(store.last().unwrap(), Height(101));
    assert_eq!(store.commit(Height(101)).unwrap(), commit_101);
    assert!(store.header(Height(101)).is_ok());
    assert!(store.latest_registers_height().unwrap_err().is_not_found());

    let values = store.registers(Height(101), &[path(1), path(4)]).unwrap();
    assert!(values.iter().all(Option::is_none));
}

#[tokio::test]
async fn registers_map_in_small_batches() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let paths: Vec<_> = (10u8..15).map(path).collect();
    let payloads: Vec<_> = (10u8..15).map(|seed| payload(&[seed])).collect();
    let update = TrieUpdate::new(commit_100, paths.clone(), payloads.clone());
    let expected = checkpoint.update(&update.paths, &update.payloads).unwrap();
    let commit_101 = expected.root_hash();

    let chain = MockChain::new(Height(100))
        .with_block(block_facts(100, commit_100))
        .with_block(block_facts(101, commit_101));

    let (_dir, store) = open_store();
    run_until_last(
        chain,
        MockFeeder::new(vec![update]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        MapperConfig {
            map_batch_size: 2,
            ..test_config()
        },
        Height(101),
    )
    .await
    .unwrap();

    let values = store.registers(Height(101), &paths).unwrap();
    for (value, payload) in values.iter().zip(&payloads) {
        assert_eq!(value.as_ref().unwrap(), payload);
    }
}

#[tokio::test]
async fn tombstones_flow_through_to_the_index() {
    let checkpoint = checkpoint_trie();
    let commit_100 = checkpoint.root_hash();

    let update = TrieUpdate::new(
        commit_100,
        vec![path(2)],
        vec![Payload::tombstone(RegisterId::default())],
    );
    let expected = checkpoint.update(&update.paths, &update.payloads).unwrap();
    let commit_101 = expected.root_hash();

    let chain = MockChain::new(Height(100))
        .with_block(block_facts(100, commit_100))
        .with_block(block_facts(101, commit_101));

    let (_dir, store) = open_store();
    run_until_last(
        chain,
        MockFeeder::new(vec![update]),
        Some(MockLoader::new(checkpoint)),
        store.clone(),
        test_config(),
        Height(101),
    )
    .await
    .unwrap();

    let values = store.registers(Height(101), &[path(2)]).unwrap();
    assert!(values[0].as_ref().unwrap().is_tombstone());
    let values = store.registers(Height(100), &[path(2)]).unwrap();
    assert_eq!(values[0].as_ref().unwrap().value, b"v2");
}
