//! Trie 节点解码
//!
//! 证明中的每个元素都是一个 RLP 列表：
//! - 17 项：分支节点，0..15 为按半字节索引的子节点引用，16 为当前位置的值
//! - 2 项：叶子或扩展节点，由路径的标志半字节区分

use alloy_primitives::B256;
use tracing::trace;
use crate::rlp::{decode_list, ItemKind, RlpItem};
use super::nibbles::decode_path;
use super::ProofError;

/// 分支节点项数
pub const BRANCH_NODE_LENGTH: usize = 17;

/// 叶子/扩展节点项数
pub const LEAF_OR_EXTENSION_NODE_LENGTH: usize = 2;

/// 分支节点的基数
pub const RADIX: usize = 16;

/// 子节点引用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    /// 下一个节点的哈希
    Hash(B256),

    /// 下一个节点的完整编码（小于 32 字节的节点直接内嵌）
    Inline(&'a [u8]),
}

impl<'a> NodeRef<'a> {
    /// 从父节点中的一项解析引用
    ///
    /// - 32 字节字符串：哈希引用
    /// - 空字符串：空槽位，只能匹配空的证明元素
    /// - 编码长度 < 32：内嵌节点
    ///
    /// 其余形状不可能与任何后续节点一致，按 `InvalidShortNode` 处理。
    /// 只在遍历真正经过该项时调用，未经过的槽位不做检查。
    pub fn from_item(item: &RlpItem<'a>) -> Result<Self, ProofError> {
        if item.kind == ItemKind::String {
            if item.payload.len() == 32 {
                return Ok(NodeRef::Hash(B256::from_slice(item.payload)));
            }
            if item.payload.is_empty() {
                return Ok(NodeRef::Inline(item.payload));
            }
        }

        if item.raw.len() < 32 {
            Ok(NodeRef::Inline(item.raw))
        } else {
            trace!("子节点引用形状非法: {} 字节", item.raw.len());
            Err(ProofError::InvalidShortNode)
        }
    }
}

/// 已解码的 Trie 节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieNode<'a> {
    /// 子节点保留原始条目，由遍历按需解析为 `NodeRef`
    Branch {
        children: [RlpItem<'a>; RADIX],
        value: &'a [u8],
    },
    Extension {
        path: Vec<u8>,
        child: RlpItem<'a>,
    },
    Leaf {
        path: Vec<u8>,
        value: &'a [u8],
    },
}

impl<'a> TrieNode<'a> {
    /// 解码一个证明元素
    ///
    /// RLP 畸形、项数不是 2 或 17、或者项的类型不对，都归为 `UnparseableNode`
    pub fn decode(encoded: &'a [u8]) -> Result<Self, ProofError> {
        let items = decode_list(encoded).map_err(|e| {
            trace!("节点 RLP 解码失败: {}", e);
            ProofError::UnparseableNode
        })?;

        match items.len() {
            BRANCH_NODE_LENGTH => {
                let children: [RlpItem<'a>; RADIX] = items[..RADIX]
                    .try_into()
                    .map_err(|_| ProofError::UnparseableNode)?;
                let value = string_item(&items[RADIX])?;

                Ok(TrieNode::Branch { children, value })
            }
            LEAF_OR_EXTENSION_NODE_LENGTH => {
                let path = decode_path(string_item(&items[0])?)?;

                if path.is_leaf {
                    Ok(TrieNode::Leaf {
                        path: path.nibbles,
                        value: string_item(&items[1])?,
                    })
                } else {
                    Ok(TrieNode::Extension {
                        path: path.nibbles,
                        child: items[1],
                    })
                }
            }
            other => {
                trace!("节点项数非法: {}", other);
                Err(ProofError::UnparseableNode)
            }
        }
    }
}

fn string_item<'a>(item: &RlpItem<'a>) -> Result<&'a [u8], ProofError> {
    item.as_bytes().map_err(|_| ProofError::UnparseableNode)
}
