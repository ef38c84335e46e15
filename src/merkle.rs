use alloy_primitives::B256;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use crate::error::SszError;
use crate::ssz::{FieldValue, Record};

/// Leaf granularity of the Merkle tree
pub const BYTES_PER_CHUNK: usize = 32;

/// A 32-byte Merkle tree node
pub type Chunk = [u8; BYTES_PER_CHUNK];

const MAX_TREE_DEPTH: usize = 32;

/// Roots of all-zero subtrees by depth: entry 0 is the zero chunk, entry
/// n+1 hashes entry n with itself. Built once, read-only afterwards.
static ZERO_HASHES: Lazy<[Chunk; MAX_TREE_DEPTH]> = Lazy::new(|| {
    let mut table = [[0u8; BYTES_PER_CHUNK]; MAX_TREE_DEPTH];
    for depth in 1..MAX_TREE_DEPTH {
        table[depth] = hash_pair(&table[depth - 1], &table[depth - 1]);
    }
    table
});

/// Combine two tree nodes into their parent
pub fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Split bytes into consecutive 32-byte chunks, the final chunk
/// right-padded with zeros
fn pack_bytes(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|piece| {
            let mut chunk = [0u8; BYTES_PER_CHUNK];
            chunk[..piece.len()].copy_from_slice(piece);
            chunk
        })
        .collect()
}

/// A uint64 occupies one chunk: 8 little-endian value bytes then zeros
fn pack_uint64(value: u64) -> Chunk {
    let mut chunk = [0u8; BYTES_PER_CHUNK];
    chunk[..8].copy_from_slice(&value.to_le_bytes());
    chunk
}

/// Reduce a chunk list to a single root. A lone chunk is returned
/// unchanged; otherwise rounds of pairwise hashing halve the list, an odd
/// tail pairing with the zero subtree of the current depth (equivalent to
/// padding the leaf count to the next power of two with zero chunks).
pub fn merkleize(mut level: Vec<Chunk>) -> Chunk {
    if level.is_empty() {
        return ZERO_HASHES[0];
    }
    let mut depth = 0;
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            level.push(ZERO_HASHES[depth]);
        }
        level = level
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
        depth += 1;
    }
    level[0]
}

/// Hash-tree-root of a fixed-layout record: each field reduces to one leaf
/// (a multi-chunk byte field to the root of its own subtree first), then
/// the per-field leaves merkleize in declared order.
pub fn hash_tree_root<T: Record>(record: &T) -> Result<B256, SszError> {
    let mut leaves = Vec::with_capacity(T::FIELDS.len());
    for (index, field) in T::FIELDS.iter().enumerate() {
        match record.field(index) {
            FieldValue::Bytes(bytes) => {
                // Fail like the encoder rather than silently chunking
                // malformed input
                if bytes.len() != field.size {
                    return Err(SszError::FieldLengthMismatch {
                        record: T::NAME,
                        field: field.name,
                        expected: field.size,
                        actual: bytes.len(),
                    });
                }
                leaves.push(merkleize(pack_bytes(bytes)));
            }
            FieldValue::Uint64(value) => leaves.push(pack_uint64(value)),
        }
    }
    Ok(B256::from(merkleize(leaves)))
}
