//! 字典文件读取
//!
//! 逐行流式读取换行分隔的字典，去除首尾空白并跳过空行。
//! 无法解码为 UTF-8 的字节被丢弃，而不是让整行失败。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{ResourceError, Result};

/// 内置的常见密码列表（字典不可用时使用）
pub static DEFAULT_WORDLIST: [&str; 20] = [
    "password",
    "123456",
    "12345678",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "dragon",
    "master",
    "sunshine",
    "princess",
    "football",
    "iloveyou",
    "shadow",
    "michael",
    "superman",
    "trustno1",
];

/// 流式字典读取器
#[derive(Debug)]
pub struct WordlistReader {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    done: bool,
}

impl WordlistReader {
    /// 打开字典文件
    ///
    /// 文件不存在或不可读时返回 [`ResourceError::Unavailable`]。
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ResourceError::Unavailable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            done: false,
        })
    }

    /// 字典文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for WordlistReader {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    let line = decode_lossy(&self.buf);
                    let word = line.trim();
                    if !word.is_empty() {
                        return Some(word.to_string());
                    }
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "wordlist read failed, stopping early"
                    );
                    self.done = true;
                }
            }
        }
        None
    }
}

// 只保留合法的 UTF-8 片段
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_wordlist(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "passlab-wordlist-{}-{}.txt",
            name,
            std::process::id()
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_reads_trimmed_non_blank_lines() {
        let path = temp_wordlist("trim", b"  alpha \n\n\tbeta\r\n   \ngamma");
        let words: Vec<String> = WordlistReader::open(&path).unwrap().collect();
        assert_eq!(words, vec!["alpha", "beta", "gamma"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_skips_invalid_utf8_bytes() {
        let path = temp_wordlist("utf8", b"pa\xffss\n\xfe\xfe\nok\n");
        let words: Vec<String> = WordlistReader::open(&path).unwrap().collect();
        assert_eq!(words, vec!["pass", "ok"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = WordlistReader::open("/nonexistent/passlab/words.txt").unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Resource(ResourceError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_default_wordlist() {
        assert_eq!(DEFAULT_WORDLIST.len(), 20);
        assert_eq!(DEFAULT_WORDLIST[0], "password");
    }
}
