//! 证明遍历
//!
//! 从根哈希出发，逐个消费证明节点，沿键的半字节向下走到值。
//! `try_traverse` 是唯一的实现，`traverse` 与 `verify` 都由它派生。

use alloy_primitives::{Bytes, B256};
use tracing::{debug, trace};
use super::hasher::{Keccak256Hasher, NodeHasher};
use super::nibbles::key_to_nibbles;
use super::node::{NodeRef, TrieNode};
use super::{ProofError, TrieError};

/// 证明校验器
///
/// 无状态，可在多个线程间共享
#[derive(Debug, Clone, Default)]
pub struct TrieVerifier<H = Keccak256Hasher> {
    hasher: H,
}

impl TrieVerifier<Keccak256Hasher> {
    /// 使用 Keccak256 的校验器（以太坊 Trie）
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: NodeHasher> TrieVerifier<H> {
    /// 使用自定义哈希函数
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// 校验 `expected` 是否为 `key` 在 `root` 下的值
    ///
    /// 任何遍历失败或值不一致都返回 false
    pub fn verify<P: AsRef<[u8]>>(&self, expected: &[u8], root: B256, key: &[u8], proof: &[P]) -> bool {
        let (value, error) = self.try_traverse(root, key, proof);
        error.is_ok() && &value[..] == expected
    }

    /// 遍历证明并返回值，失败时返回第一个遇到的错误
    pub fn traverse<P: AsRef<[u8]>>(&self, root: B256, key: &[u8], proof: &[P]) -> Result<Bytes, TrieError> {
        match self.try_traverse(root, key, proof) {
            (value, ProofError::NoError) => Ok(value),
            (_, error) => Err(TrieError::Proof(error)),
        }
    }

    /// 遍历证明，以数据形式返回结果
    ///
    /// 成功时返回 `(value, NoError)`，失败时返回 `(空, 错误码)`
    pub fn try_traverse<P: AsRef<[u8]>>(&self, root: B256, key: &[u8], proof: &[P]) -> (Bytes, ProofError) {
        match self.walk(root, key, proof) {
            Ok(value) => (value, ProofError::NoError),
            Err((index, error)) => {
                debug!(
                    "证明校验失败: {} (节点 {}/{}, root {})",
                    error.as_str(),
                    index,
                    proof.len(),
                    root
                );
                (Bytes::new(), error)
            }
        }
    }

    /// 遍历主循环
    ///
    /// 错误附带出错时的证明下标，仅用于日志
    fn walk<P: AsRef<[u8]>>(&self, root: B256, key: &[u8], proof: &[P]) -> Result<Bytes, (usize, ProofError)> {
        if key.is_empty() {
            return Err((0, ProofError::EmptyKey));
        }
        if proof.is_empty() {
            return Err((0, ProofError::InvalidProof));
        }

        let key_nibbles = key_to_nibbles(key);
        let mut remaining: &[u8] = &key_nibbles;
        // 子节点引用的形状在下一个节点到来时才检查
        let mut expected: Result<NodeRef<'_>, ProofError> = Ok(NodeRef::Hash(root));

        for (i, element) in proof.iter().enumerate() {
            let encoded = element.as_ref();
            let is_last = i + 1 == proof.len();

            // 1. 校验节点与父节点中的引用一致
            let reference = expected.map_err(|e| (i, e))?;
            self.check_reference(i, &reference, encoded).map_err(|e| (i, e))?;

            // 2. 解码节点
            let node = TrieNode::decode(encoded).map_err(|e| (i, e))?;
            trace!("节点 {}: {:?}, 剩余半字节 {}", i, node, remaining.len());

            // 3. 按节点类型推进
            match node {
                TrieNode::Branch { children, value } => match remaining.split_first() {
                    None => return terminal(value, is_last).map_err(|e| (i, e)),
                    Some((&nibble, rest)) => {
                        expected = NodeRef::from_item(&children[nibble as usize]);
                        remaining = rest;
                    }
                },
                TrieNode::Extension { path, child } => {
                    if path.is_empty() {
                        return Err((i, ProofError::EmptyExtensionPathRemainder));
                    }
                    if !remaining.starts_with(&path) {
                        return Err((i, ProofError::InvalidPathRemainder));
                    }
                    remaining = &remaining[path.len()..];
                    expected = NodeRef::from_item(&child);
                }
                TrieNode::Leaf { path, value } => {
                    if !remaining.starts_with(&path) {
                        return Err((i, ProofError::InvalidPathRemainder));
                    }
                    if path.len() != remaining.len() {
                        return Err((i, ProofError::MismatchLeafPathKeyRemainder));
                    }
                    return terminal(value, is_last).map_err(|e| (i, e));
                }
            }
        }

        // 证明耗尽仍未到达值
        Err((proof.len(), ProofError::InvalidProof))
    }

    fn check_reference(&self, index: usize, expected: &NodeRef<'_>, encoded: &[u8]) -> Result<(), ProofError> {
        match expected {
            NodeRef::Hash(hash) if self.hasher.hash(encoded) == *hash => Ok(()),
            // 根永远是完整哈希
            NodeRef::Hash(_) if index == 0 => Err(ProofError::InvalidRoot),
            NodeRef::Hash(_) => Err(ProofError::InvalidLargeNode),
            NodeRef::Inline(inline) if *inline == encoded => Ok(()),
            NodeRef::Inline(_) => Err(ProofError::InvalidShortNode),
        }
    }
}

/// 到达值所在节点
fn terminal(value: &[u8], is_last: bool) -> Result<Bytes, ProofError> {
    if value.is_empty() {
        return Err(ProofError::EmptyValue);
    }
    if !is_last {
        return Err(ProofError::InvalidExtraProofElement);
    }
    Ok(Bytes::copy_from_slice(value))
}

/// 使用 Keccak256 校验
pub fn verify<P: AsRef<[u8]>>(expected: &[u8], root: B256, key: &[u8], proof: &[P]) -> bool {
    TrieVerifier::new().verify(expected, root, key, proof)
}

/// 使用 Keccak256 遍历，失败时返回错误
pub fn traverse<P: AsRef<[u8]>>(root: B256, key: &[u8], proof: &[P]) -> Result<Bytes, TrieError> {
    TrieVerifier::new().traverse(root, key, proof)
}

/// 使用 Keccak256 遍历，错误以错误码返回
pub fn try_traverse<P: AsRef<[u8]>>(root: B256, key: &[u8], proof: &[P]) -> (Bytes, ProofError) {
    TrieVerifier::new().try_traverse(root, key, proof)
}
