//! 分块字节区间：闭区间 `[lo, hi]`，线上表示为 `bytes=lo-hi`。

/// 单个分块覆盖的字节区间（两端均含）。
///
/// 合法区间满足 `0 <= lo <= hi`；长度为 `hi - lo + 1`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    /// 区间起点（字节偏移，含）
    pub lo: i64,
    /// 区间终点（字节偏移，含）
    pub hi: i64,
}

impl ChunkRange {
    /// 首个分块区间：`[0, min(max_chunk_size, content_size) - 1]`。
    pub fn first(max_chunk_size: i64, content_size: i64) -> Self {
        Self {
            lo: 0,
            hi: max_chunk_size.min(content_size) - 1,
        }
    }

    /// 从 `offset` 起的下一个分块区间：`[offset, min(offset + max_chunk_size, content_size) - 1]`。
    pub fn next_from(offset: i64, max_chunk_size: i64, content_size: i64) -> Self {
        Self {
            lo: offset,
            hi: (offset + max_chunk_size).min(content_size) - 1,
        }
    }

    /// 区间长度（字节数）。
    pub fn len(&self) -> i64 {
        self.hi - self.lo + 1
    }

    /// 生成 `Range` 请求头的值：`bytes=lo-hi`，两端均含。
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.lo, self.hi)
    }

    /// 区间是否合法：`lo >= 0 且 hi > 0 且 lo <= hi`。
    pub fn is_valid(&self) -> bool {
        self.lo >= 0 && self.hi > 0 && self.lo <= self.hi
    }
}
