//! RLP 编解码
//!
//! 以太坊 Trie 节点使用的递归长度前缀编码：
//! - 字节串：单字节 (< 0x80)、短字符串 (0x80-0xB7)、长字符串 (0xB8-0xBF)
//! - 列表：短列表 (0xC0-0xF7)、长列表 (0xF8-0xFF)
//!
//! 前缀解析与最小长度检查交给 `alloy_rlp::Header`，
//! 本模块负责零拷贝的条目切分和整数/布尔等标量的编码。

pub mod decode;
pub mod encode;

pub use decode::{decode_bytes, decode_item, decode_list, ItemKind, RlpItem};
pub use encode::{
    encode_address, encode_b256, encode_bool, encode_bytes, encode_list, encode_raw_list,
    encode_str, encode_u256, encode_u64,
};

use thiserror::Error;

/// RLP 解码错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("Malformed header: {0}")]
    Malformed(#[from] alloy_rlp::Error),

    #[error("Input too short")]
    InputTooShort,

    #[error("Expected list, got string")]
    UnexpectedString,

    #[error("Expected string, got list")]
    UnexpectedList,

    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),
}
