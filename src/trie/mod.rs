//! Merkle Patricia Trie 证明校验
//!
//! 给定可信根哈希与按根到叶排列的节点列表，校验 (key, value) 是否在树中

pub mod hasher;
pub mod nibbles;
pub mod node;
pub mod proof;
pub mod verifier;

pub use hasher::{Keccak256Hasher, NodeHasher};
pub use node::{NodeRef, TrieNode};
pub use proof::{AccountProof, MerkleProof, ProofReport, ProofVerifier, SlotReport, StorageProof};
pub use verifier::{traverse, try_traverse, verify, TrieVerifier};

use alloy_primitives::{Address, U256};
use thiserror::Error;
use crate::rlp::RlpError;

/// 证明校验错误码
///
/// 封闭集合，`try_traverse` 以数据形式返回
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ProofError {
    #[error("no error")]
    NoError = 0,

    /// 键为空
    #[error("empty key")]
    EmptyKey = 1,

    /// 第一个节点的哈希与根不符
    #[error("invalid root hash")]
    InvalidRoot = 2,

    /// 节点哈希与父节点中的 32 字节引用不符
    #[error("invalid large internal node hash")]
    InvalidLargeNode = 3,

    /// 节点与父节点中的内嵌编码不符
    #[error("invalid short internal node")]
    InvalidShortNode = 4,

    /// 叶子/扩展节点的路径为空
    #[error("empty path")]
    EmptyPath = 5,

    /// 节点路径不是剩余键的前缀
    #[error("invalid path remainder")]
    InvalidPathRemainder = 6,

    /// 扩展节点没有消费任何半字节
    #[error("empty extension path remainder")]
    EmptyExtensionPathRemainder = 7,

    /// 已到达值，但证明中还有多余节点
    #[error("invalid extra proof element")]
    InvalidExtraProofElement = 8,

    #[error("empty value")]
    EmptyValue = 9,

    /// 叶子路径与剩余键长度不一致
    #[error("mismatch between leaf path and key remainder")]
    MismatchLeafPathKeyRemainder = 10,

    /// 路径标志半字节不在 {0,1,2,3} 中
    #[error("unknown node prefix")]
    UnknownNodePrefix = 11,

    /// 节点不是合法的 2 项或 17 项 RLP 列表
    #[error("unparseable node")]
    UnparseableNode = 12,

    /// 证明为空或在到达值之前耗尽
    #[error("invalid proof")]
    InvalidProof = 13,
}

impl ProofError {
    /// 数值错误码
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn is_ok(&self) -> bool {
        *self == ProofError::NoError
    }

    /// 错误码名称（与其它生态中的常量名一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofError::NoError => "NO_ERROR",
            ProofError::EmptyKey => "EMPTY_KEY",
            ProofError::InvalidRoot => "INVALID_ROOT",
            ProofError::InvalidLargeNode => "INVALID_LARGE_NODE",
            ProofError::InvalidShortNode => "INVALID_SHORT_NODE",
            ProofError::EmptyPath => "EMPTY_PATH",
            ProofError::InvalidPathRemainder => "INVALID_PATH_REMAINDER",
            ProofError::EmptyExtensionPathRemainder => "EMPTY_EXTENSION_PATH_REMAINDER",
            ProofError::InvalidExtraProofElement => "INVALID_EXTRA_PROOF_ELEMENT",
            ProofError::EmptyValue => "EMPTY_VALUE",
            ProofError::MismatchLeafPathKeyRemainder => "MISMATCH_LEAF_PATH_KEY_REMAINDER",
            ProofError::UnknownNodePrefix => "UNKNOWN_NODE_PREFIX",
            ProofError::UnparseableNode => "UNPARSEABLE_NODE",
            ProofError::InvalidProof => "INVALID_PROOF",
        }
    }
}

/// Trie 错误类型
#[derive(Debug, Error)]
pub enum TrieError {
    #[error("Invalid proof: {0}")]
    Proof(#[from] ProofError),

    #[error("RLP decoding error: {0}")]
    Rlp(#[from] RlpError),

    #[error("Invalid account: {0}")]
    InvalidAccount(&'static str),

    #[error("Account mismatch: {0}")]
    AccountMismatch(Address),

    #[error("Storage value mismatch at slot {slot}")]
    StorageMismatch { slot: U256 },
}

impl TrieError {
    /// 若为遍历失败，返回对应错误码
    pub fn proof_error(&self) -> Option<ProofError> {
        match self {
            TrieError::Proof(code) => Some(*code),
            _ => None,
        }
    }
}
