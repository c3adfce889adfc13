//! Chunked upload support
//!
//! Implements the OC-CHUNKED upload scheme: a large file is split into
//! bounded-size pieces that are PUT one at a time to
//! `<name>-chunking-<transfer_id>-<count>-<index>` and reassembled by the
//! server, so no single request is limited by the server's body-size cap.

/// Default chunk size: 10 MiB
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// Number of chunks needed for a file
pub fn chunk_count(file_size: u64, chunk_size: u64) -> usize {
    file_size.div_ceil(chunk_size) as usize
}

/// Byte range `[start, end)` of one chunk
pub fn chunk_byte_range(index: usize, chunk_size: u64, total_size: u64) -> (u64, u64) {
    let start = index as u64 * chunk_size;
    let end = (start + chunk_size).min(total_size);
    (start, end)
}

/// Remote name of one chunk of `name`.
///
/// The server groups chunks by transfer id and name, and assembles the file
/// once all `count` pieces have arrived.
pub fn chunk_name(name: &str, transfer_id: u64, count: usize, index: usize) -> String {
    format!("{name}-chunking-{transfer_id}-{count}-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(100, 10), 10);
        assert_eq!(chunk_count(101, 10), 11);
        assert_eq!(chunk_count(99, 10), 10);
        assert_eq!(chunk_count(0, 10), 0);
        assert_eq!(chunk_count(1, DEFAULT_CHUNK_SIZE), 1);
    }

    #[test]
    fn test_chunk_byte_range() {
        // First chunk
        let (start, end) = chunk_byte_range(0, 100, 250);
        assert_eq!(start, 0);
        assert_eq!(end, 100);

        // Middle chunk
        let (start, end) = chunk_byte_range(1, 100, 250);
        assert_eq!(start, 100);
        assert_eq!(end, 200);

        // Last chunk (smaller)
        let (start, end) = chunk_byte_range(2, 100, 250);
        assert_eq!(start, 200);
        assert_eq!(end, 250);
    }

    #[test]
    fn test_ranges_cover_file_exactly() {
        let total = 1234;
        let chunk = 100;
        let count = chunk_count(total, chunk);
        let mut covered = 0;
        for index in 0..count {
            let (start, end) = chunk_byte_range(index, chunk, total);
            assert_eq!(start, covered);
            covered = end;
        }
        assert_eq!(covered, total);
    }

    #[test]
    fn test_chunk_name() {
        assert_eq!(
            chunk_name("video.mkv", 1736160000, 3, 0),
            "video.mkv-chunking-1736160000-3-0"
        );
        assert_eq!(
            chunk_name("video.mkv", 1736160000, 3, 2),
            "video.mkv-chunking-1736160000-3-2"
        );
    }
}
