//! 数据包类型
//!
//! 定义上层 message、线路上的 packet 以及校验和。

use crate::error::GbnError;

/// 单个 message / packet 的载荷容量（字节）
pub const PAYLOAD_LEN: usize = 20;

/// 上层（layer 5）交给传输层的数据单元：最多 20 字节，`length` 标明有效字节数。
#[derive(Debug, Clone, Copy)]
pub struct Message {
    length: usize,
    data: [u8; PAYLOAD_LEN],
}

impl Message {
    /// 从字节切片构造；超过 `PAYLOAD_LEN` 时返回错误。
    pub fn new(bytes: &[u8]) -> Result<Self, GbnError> {
        if bytes.len() > PAYLOAD_LEN {
            return Err(GbnError::PayloadTooLong {
                len: bytes.len(),
                max: PAYLOAD_LEN,
            });
        }
        let mut data = [0u8; PAYLOAD_LEN];
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            length: bytes.len(),
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// 有效字节
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.length]
    }
}

// 只比较有效字节
impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Message {}

/// 线路上的 packet。
///
/// 数据包由 A 构造（`acknum = 0`），ACK 由 B 构造（`seqnum = 0`）。
/// `payload` 中 `length` 之后的字节没有意义。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub seqnum: u32,
    pub acknum: u32,
    pub checksum: u32,
    pub length: u32,
    pub payload: [u8; PAYLOAD_LEN],
}

impl Packet {
    /// 构造一个数据包并填好校验和
    pub fn data(seqnum: u32, msg: &Message) -> Self {
        let mut pkt = Packet {
            seqnum,
            acknum: 0,
            checksum: 0,
            length: msg.len() as u32,
            payload: msg.data,
        };
        pkt.checksum = pkt.compute_checksum();
        pkt
    }

    /// 构造 ACK：载荷镜像被确认的 packet，长度截断到合法范围，保证 ACK 本身完整。
    pub fn ack(acknum: u32, mirror: &Packet) -> Self {
        let mut pkt = Packet {
            seqnum: 0,
            acknum,
            checksum: 0,
            length: mirror.length.min(PAYLOAD_LEN as u32),
            payload: mirror.payload,
        };
        pkt.checksum = pkt.compute_checksum();
        pkt
    }

    /// `seqnum + acknum + Σ payload`（20 个字节全部计入，与 `length` 无关）
    pub fn compute_checksum(&self) -> u32 {
        self.payload
            .iter()
            .fold(self.seqnum.wrapping_add(self.acknum), |acc, &b| {
                acc.wrapping_add(b as u32)
            })
    }

    /// 校验和是否与头部记录的一致
    pub fn verify(&self) -> bool {
        self.compute_checksum() == self.checksum
    }

    /// 可被实体接受：校验和正确且长度合法。
    ///
    /// 校验和不覆盖 `length`，所以长度字段单独检查。
    pub fn is_intact(&self) -> bool {
        self.verify() && self.length as usize <= PAYLOAD_LEN
    }

    /// 取出有效载荷交给上层；调用方须先确认 `is_intact()`。
    pub fn message(&self) -> Message {
        let length = (self.length as usize).min(PAYLOAD_LEN);
        Message {
            length,
            data: self.payload,
        }
    }
}
