//! 账户数据结构
//!
//! 状态树叶子中存放的账户记录：RLP([nonce, balance, storage_root, code_hash])

use alloy_primitives::{B256, U256};
use alloy_rlp::Decodable;
use serde::{Deserialize, Serialize};
use crate::rlp::{decode_list, encode_bytes, encode_raw_list, encode_u256, encode_u64, RlpItem};
use crate::trie::TrieError;

/// 以太坊账户
///
/// 包含账户的核心状态：余额、nonce、存储根、代码哈希
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieAccount {
    /// 交易计数器
    pub nonce: u64,

    /// 账户余额（以 wei 为单位）
    pub balance: U256,

    /// 存储树的根哈希
    pub storage_root: B256,

    /// 代码哈希
    /// 对于 EOA（外部账户），code_hash 为空哈希
    pub code_hash: B256,
}

impl TrieAccount {
    /// 从状态树叶子的值解码
    pub fn decode(buf: &[u8]) -> Result<Self, TrieError> {
        let items = decode_list(buf)?;
        if items.len() != 4 {
            return Err(TrieError::InvalidAccount("account must have 4 fields"));
        }

        Ok(Self {
            nonce: decode_field(&items[0])?,
            balance: decode_field(&items[1])?,
            storage_root: decode_field(&items[2])?,
            code_hash: decode_field(&items[3])?,
        })
    }

    /// 编码为状态树叶子的值
    pub fn encode(&self) -> Vec<u8> {
        encode_raw_list(&[
            encode_u64(self.nonce),
            encode_u256(self.balance),
            encode_bytes(self.storage_root.as_slice()),
            encode_bytes(self.code_hash.as_slice()),
        ])
    }

    /// 检查是否为合约账户
    pub fn is_contract(&self) -> bool {
        self.code_hash != EMPTY_CODE_HASH
    }

    /// 检查是否为空账户
    pub fn is_empty(&self) -> bool {
        self.nonce == 0
            && self.balance == U256::ZERO
            && self.code_hash == EMPTY_CODE_HASH
    }
}

impl Default for TrieAccount {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::ZERO,
            storage_root: EMPTY_STORAGE_ROOT,
            code_hash: EMPTY_CODE_HASH,
        }
    }
}

/// 按 alloy-rlp 的规范规则解码单个字段（拒绝前导零、长度不符等）
fn decode_field<T: Decodable>(item: &RlpItem<'_>) -> Result<T, TrieError> {
    let mut raw = item.raw;
    let value = T::decode(&mut raw).map_err(crate::rlp::RlpError::from)?;
    Ok(value)
}

/// 空存储根（空 Merkle Patricia Trie 的根哈希）
pub const EMPTY_STORAGE_ROOT: B256 = B256::new([
    0x56, 0xe8, 0x1f, 0x17, 0x1b, 0xcc, 0x55, 0xa6,
    0xff, 0x83, 0x45, 0xe6, 0x92, 0xc0, 0xf8, 0x6e,
    0x5b, 0x48, 0xe0, 0x1b, 0x99, 0x6c, 0xad, 0xc0,
    0x01, 0x62, 0x2f, 0xb5, 0xe3, 0x63, 0xb4, 0x21,
]);

/// 空代码哈希（keccak256("")）
pub const EMPTY_CODE_HASH: B256 = B256::new([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c,
    0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b,
    0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);
