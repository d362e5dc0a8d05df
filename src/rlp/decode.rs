//! RLP 解码
//!
//! 所有解码路径都返回 `Result`，畸形输入不会导致 panic。

use alloy_rlp::Header;
use super::RlpError;

/// 条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// 字节串
    String,
    /// 列表
    List,
}

/// 已解码的 RLP 条目（零拷贝视图）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpItem<'a> {
    /// 条目类型
    pub kind: ItemKind,

    /// 内容：字符串的字节，或列表的负载（子条目编码的拼接）
    pub payload: &'a [u8],

    /// 完整编码（含前缀）
    pub raw: &'a [u8],
}

impl<'a> RlpItem<'a> {
    pub fn is_list(&self) -> bool {
        self.kind == ItemKind::List
    }

    /// 读取字符串内容
    pub fn as_bytes(&self) -> Result<&'a [u8], RlpError> {
        match self.kind {
            ItemKind::String => Ok(self.payload),
            ItemKind::List => Err(RlpError::UnexpectedList),
        }
    }

    /// 逐个解码列表中的子条目
    pub fn as_list(&self) -> Result<Vec<RlpItem<'a>>, RlpError> {
        if self.kind != ItemKind::List {
            return Err(RlpError::UnexpectedString);
        }

        let mut items = Vec::new();
        let mut offset = 0;
        while offset < self.payload.len() {
            let (item, consumed) = decode_item(&self.payload[offset..])?;
            items.push(item);
            offset += consumed;
        }

        Ok(items)
    }
}

/// 解码缓冲区开头的一个条目
///
/// # 返回
/// 条目本身，以及紧跟在条目之后的字节偏移
pub fn decode_item(buf: &[u8]) -> Result<(RlpItem<'_>, usize), RlpError> {
    let mut cursor = buf;
    let header = Header::decode(&mut cursor)?;

    // 单字节形式 (< 0x80) 没有前缀，cursor 不前进
    let header_len = buf.len() - cursor.len();
    let end = header_len
        .checked_add(header.payload_length)
        .ok_or(RlpError::InputTooShort)?;
    let raw = buf.get(..end).ok_or(RlpError::InputTooShort)?;

    let kind = if header.list { ItemKind::List } else { ItemKind::String };
    let item = RlpItem {
        kind,
        payload: &raw[header_len..],
        raw,
    };

    Ok((item, end))
}

/// 解码一个完整的条目，不允许尾随字节
fn decode_exact(buf: &[u8]) -> Result<RlpItem<'_>, RlpError> {
    let (item, end) = decode_item(buf)?;
    if end != buf.len() {
        return Err(RlpError::TrailingBytes(buf.len() - end));
    }
    Ok(item)
}

/// 解码列表
///
/// 外层必须是列表，负载必须恰好被完整的子条目消费
pub fn decode_list(buf: &[u8]) -> Result<Vec<RlpItem<'_>>, RlpError> {
    decode_exact(buf)?.as_list()
}

/// 解码字节串
pub fn decode_bytes(buf: &[u8]) -> Result<&[u8], RlpError> {
    decode_exact(buf)?.as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_byte() {
        let (item, end) = decode_item(&[0x42]).unwrap();
        assert_eq!(item.kind, ItemKind::String);
        assert_eq!(item.payload, &[0x42]);
        assert_eq!(item.raw, &[0x42]);
        assert_eq!(end, 1);
    }

    #[test]
    fn test_decode_short_string() {
        // "dog"
        let input = [0x83, b'd', b'o', b'g'];
        assert_eq!(decode_bytes(&input).unwrap(), b"dog");
    }

    #[test]
    fn test_decode_long_string() {
        let mut input = vec![0xb8, 0x38];
        input.extend_from_slice(&[0xaa; 56]);
        assert_eq!(decode_bytes(&input).unwrap(), &[0xaa; 56][..]);
    }

    #[test]
    fn test_decode_item_offset() {
        // 两个相邻条目："dog" 后跟 0x01
        let input = [0x83, b'd', b'o', b'g', 0x01];
        let (item, end) = decode_item(&input).unwrap();
        assert_eq!(item.payload, b"dog");
        assert_eq!(end, 4);

        let (next, _) = decode_item(&input[end..]).unwrap();
        assert_eq!(next.payload, &[0x01]);
    }

    #[test]
    fn test_decode_list() {
        // ["cat", "dog"]
        let input = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let items = decode_list(&input).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].payload, b"cat");
        assert_eq!(items[1].raw, &[0x83, b'd', b'o', b'g']);
    }

    #[test]
    fn test_decode_nested_list() {
        // [[], [[]]]
        let input = [0xc3, 0xc0, 0xc1, 0xc0];
        let items = decode_list(&input).unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_list());
        assert_eq!(items[1].as_list().unwrap().len(), 1);
    }

    #[test]
    fn test_decode_empty_list() {
        assert!(decode_list(&[0xc0]).unwrap().is_empty());
    }

    #[test]
    fn test_reject_non_canonical_single_byte() {
        // 长度为 1 且值 < 0x80 必须使用单字节形式
        assert!(decode_bytes(&[0x81, 0x00]).is_err());
        assert!(decode_bytes(&[0x81, 0x7f]).is_err());
        assert_eq!(decode_bytes(&[0x81, 0x80]).unwrap(), &[0x80]);
    }

    #[test]
    fn test_reject_non_minimal_length() {
        // 长度 < 56 使用了长格式
        let mut input = vec![0xb8, 0x02];
        input.extend_from_slice(&[0xaa, 0xbb]);
        assert!(decode_bytes(&input).is_err());

        // 长度编码带前导零
        let mut input = vec![0xb9, 0x00, 0x38];
        input.extend_from_slice(&[0xaa; 56]);
        assert!(decode_bytes(&input).is_err());
    }

    #[test]
    fn test_reject_truncated() {
        assert_eq!(decode_item(&[]).unwrap_err(), RlpError::Malformed(alloy_rlp::Error::InputTooShort));
        assert!(decode_bytes(&[0x83, b'd', b'o']).is_err());
        assert!(decode_bytes(&[0xb8]).is_err());
        assert!(decode_list(&[0xc2, 0x01]).is_err());
    }

    #[test]
    fn test_reject_overlapping_list_items() {
        // 列表负载长度 2，但子条目声明了 3 字节
        let input = [0xc3, 0x82, 0x01, 0x02];
        assert!(decode_list(&input[..3]).is_err());
        let input = [0xc2, 0x82, 0x01];
        assert!(decode_list(&input).is_err());
    }

    #[test]
    fn test_reject_trailing_bytes() {
        assert_eq!(decode_bytes(&[0x01, 0x02]).unwrap_err(), RlpError::TrailingBytes(1));
        assert_eq!(decode_list(&[0xc0, 0x00]).unwrap_err(), RlpError::TrailingBytes(1));
    }

    #[test]
    fn test_kind_mismatch() {
        assert_eq!(decode_list(&[0x83, b'd', b'o', b'g']).unwrap_err(), RlpError::UnexpectedString);
        assert_eq!(decode_bytes(&[0xc0]).unwrap_err(), RlpError::UnexpectedList);
    }
}
