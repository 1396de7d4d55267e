//! Common utilities

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// Compute the xxh3 hash of a file's content
pub fn hash_file(path: &Path) -> std::io::Result<u64> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Xxh3::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hasher.digest())
}

/// Format a hash the way it is shown in diagnostics
pub fn hash_hex(hash: u64) -> String {
    format!("{:016x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xxhash_rust::xxh3::xxh3_64;

    #[test]
    fn test_hash_file_matches_one_shot_hash() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("a.txt");
        std::fs::write(&path, b"hello world").unwrap();

        assert_eq!(hash_file(&path).unwrap(), xxh3_64(b"hello world"));
    }

    #[test]
    fn test_hash_hex_width() {
        assert_eq!(hash_hex(1).len(), 16);
    }

    #[test]
    fn test_hash_file_missing() {
        let temp = tempfile::tempdir().unwrap();
        assert!(hash_file(&temp.path().join("nope")).is_err());
    }
}
