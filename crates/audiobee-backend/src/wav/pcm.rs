//! PCM hashing.

/// BLAKE3 hash of raw PCM bytes, hex encoded.
pub fn hash_pcm(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}
