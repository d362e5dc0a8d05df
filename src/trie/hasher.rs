//! 节点哈希
//!
//! 校验器只依赖哈希的确定性和 32 字节输出，具体算法由调用方注入

use alloy_primitives::B256;
use crate::utils::keccak256_hash;

/// 节点哈希函数
///
/// 必须是输入的纯函数，可在多线程中并发调用
pub trait NodeHasher: Send + Sync {
    fn hash(&self, data: &[u8]) -> B256;
}

/// Keccak256（以太坊状态/存储/交易/收据树）
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl NodeHasher for Keccak256Hasher {
    fn hash(&self, data: &[u8]) -> B256 {
        keccak256_hash(data)
    }
}

impl<F> NodeHasher for F
where
    F: Fn(&[u8]) -> B256 + Send + Sync,
{
    fn hash(&self, data: &[u8]) -> B256 {
        self(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn test_keccak_empty_rlp_string() {
        // keccak256(0x80) 即空树根
        assert_eq!(
            Keccak256Hasher.hash(&[0x80]),
            b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421")
        );
    }

    #[test]
    fn test_closure_hasher() {
        let hasher = |data: &[u8]| B256::left_padding_from(&[data.len() as u8]);
        assert_eq!(hasher.hash(&[1, 2, 3]), B256::with_last_byte(3));
    }
}
