//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::sync::{Arc, OnceLock};

use archive_common_types::{hasher::archive_hasher, FixedHash, Payload, RegisterPath, StateCommitment};

use crate::StateTreeError;

const MAX_DEPTH: usize = RegisterPath::BYTE_SIZE * 8;

/// The root commitment of a trie with no leaves.
///
/// This is distinct from the all-zero sentinel commitment, which only ever appears as a
/// parent link.
pub fn empty_trie_hash() -> StateCommitment {
    static HASH: OnceLock<FixedHash> = OnceLock::new();
    (*HASH.get_or_init(|| archive_hasher("TrieEmpty").result())).into()
}

fn leaf_hash(path: &RegisterPath, payload: &Payload) -> FixedHash {
    archive_hasher("TrieLeaf")
        .chain(path.as_bytes())
        .chain(&payload.register.owner)
        .chain(&payload.register.controller)
        .chain(&payload.register.key)
        .chain(&payload.value)
        .result()
}

fn branch_hash(left: &FixedHash, right: &FixedHash) -> FixedHash {
    archive_hasher("TrieBranch")
        .chain(left.as_slice())
        .chain(right.as_slice())
        .result()
}

/// A content-addressed trie node. Leaves sit at the shallowest depth at which their path
/// prefix is unique, so the structure (and therefore the root hash) is canonical for a
/// given set of registers regardless of insertion order.
#[derive(Debug)]
enum Node {
    Empty,
    Leaf {
        path: RegisterPath,
        payload: Payload,
        hash: FixedHash,
    },
    Branch {
        left: Arc<Node>,
        right: Arc<Node>,
        hash: FixedHash,
    },
}

impl Node {
    fn hash(&self) -> FixedHash {
        match self {
            Node::Empty => *empty_trie_hash().hash(),
            Node::Leaf { hash, .. } => *hash,
            Node::Branch { hash, .. } => *hash,
        }
    }

    fn leaf(path: RegisterPath, payload: Payload) -> Arc<Node> {
        let hash = leaf_hash(&path, &payload);
        Arc::new(Node::Leaf { path, payload, hash })
    }

    fn branch(left: Arc<Node>, right: Arc<Node>) -> Arc<Node> {
        let hash = branch_hash(&left.hash(), &right.hash());
        Arc::new(Node::Branch { left, right, hash })
    }

    fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }
}

/// An immutable sparse Merkle map from register paths to payloads.
///
/// `update` returns a new trie; the receiver is untouched and shares all unchanged
/// subtries with the result.
#[derive(Debug, Clone)]
pub struct StateTrie {
    root: Arc<Node>,
}

impl StateTrie {
    pub fn new() -> Self {
        Self {
            root: Arc::new(Node::Empty),
        }
    }

    pub fn root_hash(&self) -> StateCommitment {
        self.root.hash().into()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Apply a batch of writes, returning the resulting trie. `paths` and `payloads`
    /// must be parallel arrays. Writing an empty payload stores a tombstone leaf.
    pub fn update(&self, paths: &[RegisterPath], payloads: &[Payload]) -> Result<StateTrie, StateTreeError> {
        if paths.len() != payloads.len() {
            return Err(StateTreeError::LengthMismatch {
                paths: paths.len(),
                payloads: payloads.len(),
            });
        }
        let mut root = self.root.clone();
        for (path, payload) in paths.iter().zip(payloads) {
            root = insert(&root, 0, *path, payload.clone());
        }
        Ok(StateTrie { root })
    }

    /// Read payloads without producing inclusion proofs. Absent paths yield `None`;
    /// tombstones yield their (empty) payload.
    pub fn read(&self, paths: &[RegisterPath]) -> Vec<Option<Payload>> {
        paths.iter().map(|path| self.get(path)).collect()
    }

    pub fn get(&self, path: &RegisterPath) -> Option<Payload> {
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            match &**node {
                Node::Empty => return None,
                Node::Leaf {
                    path: leaf_path,
                    payload,
                    ..
                } => {
                    return if leaf_path == path { Some(payload.clone()) } else { None };
                },
                Node::Branch { left, right, .. } => {
                    node = if path.bit(depth) { right } else { left };
                    depth += 1;
                },
            }
        }
    }

    /// Iterate every leaf in path order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves {
            stack: vec![&self.root],
        }
    }

    /// All register paths present in the trie, in path order.
    pub fn paths(&self) -> Vec<RegisterPath> {
        self.leaves().map(|(path, _)| *path).collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }
}

impl Default for StateTrie {
    fn default() -> Self {
        Self::new()
    }
}

fn insert(node: &Arc<Node>, depth: usize, path: RegisterPath, payload: Payload) -> Arc<Node> {
    match &**node {
        Node::Empty => Node::leaf(path, payload),
        Node::Leaf { path: leaf_path, .. } => {
            if *leaf_path == path {
                return Node::leaf(path, payload);
            }
            split(node.clone(), Node::leaf(path, payload), depth)
        },
        Node::Branch { left, right, .. } => {
            if path.bit(depth) {
                Node::branch(left.clone(), insert(right, depth + 1, path, payload))
            } else {
                Node::branch(insert(left, depth + 1, path, payload), right.clone())
            }
        },
    }
}

// Pushes two distinct leaves down to the depth at which their paths diverge.
fn split(existing: Arc<Node>, incoming: Arc<Node>, depth: usize) -> Arc<Node> {
    debug_assert!(depth < MAX_DEPTH);
    let existing_bit = match &*existing {
        Node::Leaf { path, .. } => path.bit(depth),
        _ => unreachable!("split called on non-leaf"),
    };
    let incoming_bit = match &*incoming {
        Node::Leaf { path, .. } => path.bit(depth),
        _ => unreachable!("split called on non-leaf"),
    };

    match (existing_bit, incoming_bit) {
        (false, true) => Node::branch(existing, incoming),
        (true, false) => Node::branch(incoming, existing),
        (false, false) => Node::branch(split(existing, incoming, depth + 1), Arc::new(Node::Empty)),
        (true, true) => Node::branch(Arc::new(Node::Empty), split(existing, incoming, depth + 1)),
    }
}

pub struct Leaves<'a> {
    stack: Vec<&'a Arc<Node>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (&'a RegisterPath, &'a Payload);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match &**node {
                Node::Empty => {},
                Node::Leaf { path, payload, .. } => return Some((path, payload)),
                Node::Branch { left, right, .. } => {
                    // Right first so the left subtrie pops first: leaves come out in path order.
                    self.stack.push(right);
                    self.stack.push(left);
                },
            }
        }
        None
    }
}
