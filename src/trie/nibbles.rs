//! 半字节与 Hex-Prefix 路径编码
//!
//! 叶子/扩展节点的第 0 项是压缩后的部分路径，第一个半字节是标志位：
//!
//! | 标志 | 节点类型 | 路径长度奇偶 |
//! |------|----------|--------------|
//! | 0    | 扩展     | 偶           |
//! | 1    | 扩展     | 奇           |
//! | 2    | 叶子     | 偶           |
//! | 3    | 叶子     | 奇           |
//!
//! 偶数长度时标志后补一个 0 半字节；奇数长度时路径的第一个半字节紧跟标志。

use super::ProofError;

pub const PREFIX_EXTENSION_EVEN: u8 = 0;
pub const PREFIX_EXTENSION_ODD: u8 = 1;
pub const PREFIX_LEAF_EVEN: u8 = 2;
pub const PREFIX_LEAF_ODD: u8 = 3;

/// 解码后的部分路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexPrefixPath {
    /// 路径半字节（每个元素取值 0-15）
    pub nibbles: Vec<u8>,

    /// 是否为叶子节点
    pub is_leaf: bool,
}

/// 将键展开为半字节序列（高半字节在前）
pub fn key_to_nibbles(key: &[u8]) -> Vec<u8> {
    let mut nibbles = Vec::with_capacity(key.len() * 2);
    for &b in key {
        nibbles.push(b >> 4);
        nibbles.push(b & 0x0f);
    }
    nibbles
}

/// Hex-Prefix 编码
///
/// 证明生成方使用，这里用于构造测试数据及与解码保持对称
pub fn encode_path(nibbles: &[u8], is_leaf: bool) -> Vec<u8> {
    let odd = nibbles.len() % 2 == 1;
    let flag = match (is_leaf, odd) {
        (false, false) => PREFIX_EXTENSION_EVEN,
        (false, true) => PREFIX_EXTENSION_ODD,
        (true, false) => PREFIX_LEAF_EVEN,
        (true, true) => PREFIX_LEAF_ODD,
    };

    let mut out = Vec::with_capacity(nibbles.len() / 2 + 1);
    let rest = if odd {
        out.push((flag << 4) | (nibbles[0] & 0x0f));
        &nibbles[1..]
    } else {
        out.push(flag << 4);
        nibbles
    };

    for pair in rest.chunks_exact(2) {
        out.push((pair[0] << 4) | (pair[1] & 0x0f));
    }
    out
}

/// Hex-Prefix 解码
///
/// # 错误
/// - `EmptyPath`: 输入为空，连标志半字节都没有
/// - `UnknownNodePrefix`: 标志半字节不在 {0,1,2,3} 中
pub fn decode_path(encoded: &[u8]) -> Result<HexPrefixPath, ProofError> {
    let (&first, rest) = encoded.split_first().ok_or(ProofError::EmptyPath)?;

    let flag = first >> 4;
    if flag > PREFIX_LEAF_ODD {
        return Err(ProofError::UnknownNodePrefix);
    }

    let is_leaf = flag == PREFIX_LEAF_EVEN || flag == PREFIX_LEAF_ODD;
    let odd = flag % 2 == 1;

    let mut nibbles = Vec::with_capacity(rest.len() * 2 + 1);
    if odd {
        nibbles.push(first & 0x0f);
    }
    nibbles.extend(key_to_nibbles(rest));

    Ok(HexPrefixPath { nibbles, is_leaf })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_nibbles() {
        assert_eq!(key_to_nibbles(&[0x12, 0xab]), vec![0x1, 0x2, 0xa, 0xb]);
        assert!(key_to_nibbles(&[]).is_empty());
    }

    #[test]
    fn test_encode_path_flags() {
        // 经典示例：[1,2,3,4,5] 扩展 -> 0x11 0x23 0x45
        assert_eq!(encode_path(&[1, 2, 3, 4, 5], false), vec![0x11, 0x23, 0x45]);
        // [0,1,2,3,4,5] 扩展 -> 0x00 0x01 0x23 0x45
        assert_eq!(encode_path(&[0, 1, 2, 3, 4, 5], false), vec![0x00, 0x01, 0x23, 0x45]);
        // [0,f,1,c,b,8] 叶子 -> 0x20 0x0f 0x1c 0xb8
        assert_eq!(encode_path(&[0, 0xf, 1, 0xc, 0xb, 8], true), vec![0x20, 0x0f, 0x1c, 0xb8]);
        // [f,1,c,b,8] 叶子 -> 0x3f 0x1c 0xb8
        assert_eq!(encode_path(&[0xf, 1, 0xc, 0xb, 8], true), vec![0x3f, 0x1c, 0xb8]);
        assert_eq!(encode_path(&[], true), vec![0x20]);
    }

    #[test]
    fn test_decode_path() {
        let path = decode_path(&[0x3f, 0x1c, 0xb8]).unwrap();
        assert!(path.is_leaf);
        assert_eq!(path.nibbles, vec![0xf, 1, 0xc, 0xb, 8]);

        let path = decode_path(&[0x00, 0x01, 0x23, 0x45]).unwrap();
        assert!(!path.is_leaf);
        assert_eq!(path.nibbles, vec![0, 1, 2, 3, 4, 5]);

        let path = decode_path(&[0x20]).unwrap();
        assert!(path.is_leaf);
        assert!(path.nibbles.is_empty());
    }

    #[test]
    fn test_decode_path_errors() {
        assert_eq!(decode_path(&[]), Err(ProofError::EmptyPath));
        assert_eq!(decode_path(&[0x40]), Err(ProofError::UnknownNodePrefix));
        assert_eq!(decode_path(&[0xf0, 0x12]), Err(ProofError::UnknownNodePrefix));
    }

    #[test]
    fn test_path_symmetry() {
        let nibbles: Vec<u8> = (0..64u8).map(|i| i % 16).collect();
        for len in [0, 1, 2, 7, 63, 64] {
            for is_leaf in [false, true] {
                let decoded = decode_path(&encode_path(&nibbles[..len], is_leaf)).unwrap();
                assert_eq!(decoded.nibbles, &nibbles[..len]);
                assert_eq!(decoded.is_leaf, is_leaf);
            }
        }
    }
}
