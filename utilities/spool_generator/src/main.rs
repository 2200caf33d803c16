//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Generates a synthetic root checkpoint and block data spool so an archive node can be
//! exercised end to end without a live execution node. All content is derived
//! deterministically from the parameters, so two runs produce identical spools.

use std::{fs, path::PathBuf};

use archive_common_types::{
    hasher::archive_hasher,
    BlockId,
    Height,
    Payload,
    RegisterId,
    RegisterPath,
    SealId,
    StateCommitment,
    TransactionId,
    TrieUpdate,
};
use archive_state_tree::{RootCheckpoint, StateTrie};
use archive_storage::records::{
    BlockData,
    Collection,
    Event,
    Guarantee,
    Header,
    Seal,
    Transaction,
    TransactionResult,
    TransactionStatus,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Directory to generate the checkpoint and spool into
    #[clap(long, short = 'o', default_value = "data")]
    out_dir: PathBuf,

    /// The first height of the generated spork
    #[clap(long, default_value_t = 100)]
    root_height: u64,

    /// How many blocks to spool
    #[clap(long, short = 'n', default_value_t = 10)]
    blocks: u64,

    /// How many registers the genesis checkpoint holds
    #[clap(long, default_value_t = 64)]
    registers: u64,

    /// How many registers change per block
    #[clap(long, default_value_t = 8)]
    writes_per_block: u64,

    /// How many transactions each block carries
    #[clap(long, default_value_t = 2)]
    transactions_per_block: u32,
}

fn register_id(index: u64) -> RegisterId {
    RegisterId::new(
        format!("account-{index}").into_bytes(),
        b"system".to_vec(),
        format!("register-{index}").into_bytes(),
    )
}

fn register_value(index: u64, revision: u64) -> Vec<u8> {
    archive_hasher("SpoolValue")
        .chain(&index.to_be_bytes())
        .chain(&revision.to_be_bytes())
        .finalize_into_array()
        .to_vec()
}

fn derived_id(label: &'static str, height: u64, index: u64) -> [u8; 32] {
    archive_hasher(label)
        .chain(&height.to_be_bytes())
        .chain(&index.to_be_bytes())
        .finalize_into_array()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let spool_dir = cli.out_dir.join("spool");
    fs::create_dir_all(&spool_dir)?;

    // Genesis: every register at revision 0.
    let registers: Vec<(RegisterPath, Payload)> = (0..cli.registers)
        .map(|index| {
            let id = register_id(index);
            (id.to_path(), Payload::new(id, register_value(index, 0)))
        })
        .collect();
    let checkpoint = RootCheckpoint { registers };
    let checkpoint_path = cli.out_dir.join("root.checkpoint");
    fs::write(&checkpoint_path, archive_codec::encode(&checkpoint)?)?;

    let mut trie = checkpoint.into_trie()?;
    println!(
        "Wrote {} ({} registers, commit {})",
        checkpoint_path.display(),
        cli.registers,
        trie.root_hash()
    );

    for offset in 0..cli.blocks {
        let height = cli.root_height + offset;
        let trie_updates = if offset == 0 {
            // The root block commits the checkpoint state itself.
            Vec::new()
        } else {
            let updates = build_updates(&cli, &trie, height);
            for update in &updates {
                trie = trie.update(&update.paths, &update.payloads)?;
            }
            updates
        };

        let data = block_data(&cli, height, trie_updates, trie.root_hash());
        let path = spool_dir.join(BlockData::file_name(height));
        fs::write(&path, archive_codec::encode(&data)?)?;
        println!("Wrote {} (commit {})", path.display(), data.final_commit);
    }

    Ok(())
}

/// The registers changing at `height`, rotated so every register gets written
/// eventually, split into two chunk updates the way execution emits them.
fn build_updates(cli: &Cli, parent: &StateTrie, height: u64) -> Vec<TrieUpdate> {
    let writes: Vec<(RegisterPath, Payload)> = (0..cli.writes_per_block)
        .map(|slot| {
            let index = (height * cli.writes_per_block + slot) % cli.registers.max(1);
            let id = register_id(index);
            (id.to_path(), Payload::new(id, register_value(index, height)))
        })
        .collect();

    let half = writes.len() / 2;
    let (first_chunk, second_chunk) = writes.split_at(half.max(1).min(writes.len()));

    let mut updates = Vec::new();
    let mut parent_commit = parent.root_hash();
    let mut intermediate = parent.clone();
    for chunk in [first_chunk, second_chunk] {
        if chunk.is_empty() {
            continue;
        }
        let (paths, payloads): (Vec<_>, Vec<_>) = chunk.iter().cloned().unzip();
        let update = TrieUpdate::new(parent_commit, paths, payloads);
        intermediate = intermediate
            .update(&update.paths, &update.payloads)
            .expect("update lengths match");
        parent_commit = intermediate.root_hash();
        updates.push(update);
    }
    updates
}

fn block_data(cli: &Cli, height: u64, trie_updates: Vec<TrieUpdate>, final_commit: StateCommitment) -> BlockData {
    let transactions: Vec<Transaction> = (0..cli.transactions_per_block)
        .map(|index| Transaction {
            id: TransactionId::from(derived_id("SpoolTransaction", height, index as u64)),
            script: format!("transfer({index})").into_bytes(),
            arguments: vec![index.to_be_bytes().to_vec()],
            payer: format!("account-{index}").into_bytes(),
            reference_block_id: BlockId::from(derived_id("SpoolBlock", height.saturating_sub(1), 0)),
            gas_limit: 9999,
        })
        .collect();

    let collection = Collection {
        id: derived_id("SpoolCollection", height, 0).into(),
        transaction_ids: transactions.iter().map(|tx| tx.id).collect(),
    };

    let results = transactions
        .iter()
        .map(|tx| TransactionResult {
            transaction_id: tx.id,
            status: TransactionStatus::Executed,
            error_message: None,
        })
        .collect();

    let events = transactions
        .iter()
        .enumerate()
        .flat_map(|(tx_index, tx)| {
            [("Withdrawal", 0u32), ("Deposit", 1u32)].map(|(event_type, event_index)| Event {
                transaction_id: tx.id,
                transaction_index: tx_index as u32,
                event_index,
                event_type: event_type.to_string(),
                payload: derived_id("SpoolEvent", height, tx_index as u64).to_vec(),
            })
        })
        .collect();

    BlockData {
        header: Header {
            height: Height(height),
            block_id: BlockId::from(derived_id("SpoolBlock", height, 0)),
            parent_id: BlockId::from(derived_id("SpoolBlock", height.saturating_sub(1), 0)),
            timestamp_ms: 1_700_000_000_000 + height * 1000,
            payload_hash: derived_id("SpoolPayloadHash", height, 0),
        },
        collections: vec![collection.clone()],
        guarantees: vec![Guarantee {
            collection_id: collection.id,
            signer_ids: vec![derived_id("SpoolSigner", height, 0)],
            signature: derived_id("SpoolSignature", height, 0).to_vec(),
        }],
        transactions,
        results,
        events,
        seals: vec![Seal {
            id: SealId::from(derived_id("SpoolSeal", height, 0)),
            block_id: BlockId::from(derived_id("SpoolBlock", height.saturating_sub(1), 0)),
            result_id: derived_id("SpoolResult", height, 0),
            final_state: final_commit,
        }],
        trie_updates,
        final_commit,
    }
}
