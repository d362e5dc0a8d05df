//! RLP 编码
//!
//! 标量先归约为字节串再编码：
//! - `bool`: false -> 空串，true -> 0x01
//! - 无符号整数：去掉前导零的大端表示（0 -> 空串）
//! - `B256`：视为 256 位大端整数
//! - `Address`：20 字节原样编码

use alloy_primitives::{Address, B256, U256};
use alloy_rlp::{Encodable, Header};

/// 编码字节串
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.length());
    bytes.encode(&mut out);
    out
}

/// 编码 UTF-8 字符串
pub fn encode_str(value: &str) -> Vec<u8> {
    encode_bytes(value.as_bytes())
}

/// 编码字节串列表（每个元素先按字符串编码）
pub fn encode_list<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let encoded: Vec<Vec<u8>> = items
        .iter()
        .map(|item| encode_bytes(item.as_ref()))
        .collect();
    encode_raw_list(&encoded)
}

/// 将已编码的条目包装为列表
///
/// 用于构造内嵌子节点等需要混合字符串与列表的场景
pub fn encode_raw_list<T: AsRef<[u8]>>(encoded_items: &[T]) -> Vec<u8> {
    let payload_length: usize = encoded_items.iter().map(|item| item.as_ref().len()).sum();
    let header = Header {
        list: true,
        payload_length,
    };

    let mut out = Vec::with_capacity(payload_length + 9);
    header.encode(&mut out);
    for item in encoded_items {
        out.extend_from_slice(item.as_ref());
    }
    out
}

pub fn encode_bool(value: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(1);
    value.encode(&mut out);
    out
}

pub fn encode_u64(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

pub fn encode_u256(value: U256) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.length());
    value.encode(&mut out);
    out
}

/// 编码 32 字节定长值（按大端整数处理，去掉前导零）
pub fn encode_b256(value: B256) -> Vec<u8> {
    encode_u256(U256::from_be_bytes(value.0))
}

pub fn encode_address(value: Address) -> Vec<u8> {
    encode_bytes(value.as_slice())
}
