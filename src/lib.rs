//! Trie Proof Library
//!
//! 以太坊 Merkle Patricia Trie 包含性证明校验库：
//! RLP 编解码、Hex-Prefix 路径、节点解码与根到叶的遍历校验

pub mod rlp;
pub mod schema;
pub mod trie;
pub mod utils;

pub use trie::{
    traverse, try_traverse, verify, AccountProof, MerkleProof, ProofError, ProofVerifier,
    StorageProof, TrieError, TrieVerifier,
};
