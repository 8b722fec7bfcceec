/// IEEE CRC-32 of `bytes` as 8 lowercase hex digits, the `Content-CRC32`
/// header format.
pub fn crc32_hex(bytes: &[u8]) -> String {
    format!("{:08x}", crc32fast::hash(bytes))
}
