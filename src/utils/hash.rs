//! 哈希与十六进制工具

use alloy_primitives::{keccak256 as alloy_keccak256, B256};

/// Keccak256 哈希（以太坊标准）
pub fn keccak256_hash(data: &[u8]) -> B256 {
    alloy_keccak256(data)
}

/// 将十六进制字符串转换为字节数组
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let hex_clean = hex_str.trim_start_matches("0x").trim_start_matches("0X");
    hex::decode(hex_clean)
}

/// 将字节数组转换为十六进制字符串
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256() {
        let hash = keccak256_hash(b"");
        assert_eq!(
            bytes_to_hex(hash.as_slice()),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hex_conversion() {
        let original = vec![0x01, 0x02, 0x03, 0xff];
        let hex_str = bytes_to_hex(&original);
        let decoded = hex_to_bytes(&hex_str).unwrap();

        assert_eq!(original, decoded);
    }

    #[test]
    fn test_hex_invalid() {
        assert!(hex_to_bytes("0xzz").is_err());
        assert!(hex_to_bytes("0x123").is_err());
    }
}
