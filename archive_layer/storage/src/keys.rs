//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! The stable on-disk key schema.
//!
//! Every key is a one-byte prefix followed by either a big-endian height or an id, so
//! lexicographic key order within a prefix equals numeric height order. The prefix
//! values are part of the on-disk format and must never be renumbered.

use archive_common_types::{BlockId, CollectionId, Height, RegisterPath, SealId, TransactionId};

pub const PREFIX_FIRST: u8 = 1;
pub const PREFIX_LAST: u8 = 2;
pub const PREFIX_COMMIT: u8 = 3;
pub const PREFIX_HEADER: u8 = 4;
pub const PREFIX_EVENTS: u8 = 5;
pub const PREFIX_PAYLOAD: u8 = 6;
pub const PREFIX_HEIGHT_BY_BLOCK: u8 = 7;
pub const PREFIX_COLLECTION: u8 = 8;
pub const PREFIX_COLLECTIONS_BY_HEIGHT: u8 = 9;
pub const PREFIX_GUARANTEE: u8 = 10;
pub const PREFIX_TRANSACTION: u8 = 11;
pub const PREFIX_TRANSACTIONS_BY_HEIGHT: u8 = 12;
pub const PREFIX_HEIGHT_BY_TRANSACTION: u8 = 13;
pub const PREFIX_RESULT: u8 = 14;
pub const PREFIX_SEAL: u8 = 15;
pub const PREFIX_SEALS_BY_HEIGHT: u8 = 16;
pub const PREFIX_LATEST_REGISTERS: u8 = 17;

fn by_height(prefix: u8, height: Height) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(prefix);
    key.extend_from_slice(&height.to_be_bytes());
    key
}

fn by_id(prefix: u8, id: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + id.len());
    key.push(prefix);
    key.extend_from_slice(id);
    key
}

pub fn first() -> Vec<u8> {
    vec![PREFIX_FIRST]
}

pub fn last() -> Vec<u8> {
    vec![PREFIX_LAST]
}

pub fn latest_registers() -> Vec<u8> {
    vec![PREFIX_LATEST_REGISTERS]
}

pub fn commit(height: Height) -> Vec<u8> {
    by_height(PREFIX_COMMIT, height)
}

pub fn header(height: Height) -> Vec<u8> {
    by_height(PREFIX_HEADER, height)
}

pub fn events(height: Height) -> Vec<u8> {
    by_height(PREFIX_EVENTS, height)
}

/// `payload ‖ path ‖ BE(height)`: all versions of one register sit together, ordered by
/// height, so "latest at or below H" is a single reverse seek.
pub fn payload(path: &RegisterPath, height: Height) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + RegisterPath::BYTE_SIZE + 8);
    key.push(PREFIX_PAYLOAD);
    key.extend_from_slice(path.as_bytes());
    key.extend_from_slice(&height.to_be_bytes());
    key
}

/// The prefix shared by every version of one register.
pub fn payload_prefix(path: &RegisterPath) -> Vec<u8> {
    by_id(PREFIX_PAYLOAD, path.as_bytes())
}

/// Split a payload key back into its path and height components.
pub fn parse_payload(key: &[u8]) -> Option<(RegisterPath, Height)> {
    if key.len() != 1 + RegisterPath::BYTE_SIZE + 8 || key[0] != PREFIX_PAYLOAD {
        return None;
    }
    let path = RegisterPath::try_from(&key[1..1 + RegisterPath::BYTE_SIZE]).ok()?;
    let height = Height::from_be_bytes(key[1 + RegisterPath::BYTE_SIZE..].try_into().ok()?);
    Some((path, height))
}

pub fn height_by_block(id: &BlockId) -> Vec<u8> {
    by_id(PREFIX_HEIGHT_BY_BLOCK, id.as_bytes())
}

pub fn collection(id: &CollectionId) -> Vec<u8> {
    by_id(PREFIX_COLLECTION, id.as_bytes())
}

pub fn collections_by_height(height: Height) -> Vec<u8> {
    by_height(PREFIX_COLLECTIONS_BY_HEIGHT, height)
}

pub fn guarantee(id: &CollectionId) -> Vec<u8> {
    by_id(PREFIX_GUARANTEE, id.as_bytes())
}

pub fn transaction(id: &TransactionId) -> Vec<u8> {
    by_id(PREFIX_TRANSACTION, id.as_bytes())
}

pub fn transactions_by_height(height: Height) -> Vec<u8> {
    by_height(PREFIX_TRANSACTIONS_BY_HEIGHT, height)
}

pub fn height_by_transaction(id: &TransactionId) -> Vec<u8> {
    by_id(PREFIX_HEIGHT_BY_TRANSACTION, id.as_bytes())
}

pub fn result(id: &TransactionId) -> Vec<u8> {
    by_id(PREFIX_RESULT, id.as_bytes())
}

pub fn seal(id: &SealId) -> Vec<u8> {
    by_id(PREFIX_SEAL, id.as_bytes())
}

pub fn seals_by_height(height: Height) -> Vec<u8> {
    by_height(PREFIX_SEALS_BY_HEIGHT, height)
}
