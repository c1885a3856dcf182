use anyhow::bail;
use clap::ValueEnum;

/// How shader token words are pulled out of an input file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One shader per line; every run of 8 lowercase hex digits is a word.
    HexLines,
    /// `fxc /Fx` listing; the whole file is one shader.
    Fxc,
    /// Raw little-endian 32-bit words; the whole file is one shader.
    Binary,
}

/// Token words of one shader, plus the text echoed in front of its listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderWords {
    /// 1-based line number for line-oriented input.
    pub line: Option<usize>,
    pub echo: String,
    pub words: Vec<u32>,
}

pub fn extract(format: InputFormat, bytes: &[u8]) -> anyhow::Result<Vec<ShaderWords>> {
    match format {
        InputFormat::HexLines => {
            let text = String::from_utf8_lossy(bytes);
            Ok(text
                .lines()
                .enumerate()
                .map(|(idx, line)| ShaderWords {
                    line: Some(idx + 1),
                    echo: line.to_string(),
                    words: hex_words(line),
                })
                .collect())
        }
        InputFormat::Fxc => {
            let words = fxc_words(&String::from_utf8_lossy(bytes));
            Ok(vec![ShaderWords {
                line: None,
                echo: join_words(&words),
                words,
            }])
        }
        InputFormat::Binary => {
            let words = le_words(bytes)?;
            Ok(vec![ShaderWords {
                line: None,
                echo: join_words(&words),
                words,
            }])
        }
    }
}

fn is_word(chunk: &[u8]) -> bool {
    chunk.len() == 8
        && chunk
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
}

/// Non-overlapping runs of 8 lowercase hex digits, scanned left to right.
pub fn hex_words(line: &str) -> Vec<u32> {
    let bytes = line.as_bytes();
    let mut words = Vec::new();
    let mut i = 0;
    while i + 8 <= bytes.len() {
        let chunk = &bytes[i..i + 8];
        if is_word(chunk) {
            if let Some(word) = parse_word(chunk) {
                words.push(word);
            }
            i += 8;
        } else {
            i += 1;
        }
    }
    words
}

/// Words from the `// XXXX:  w0  w1  w2  w3` dump lines of an `fxc /Fx` listing.
pub fn fxc_words(text: &str) -> Vec<u32> {
    let mut words = Vec::new();
    for line in text.lines() {
        let Some(rest) = line.trim_start().strip_prefix("//") else {
            continue;
        };
        let mut fields = rest.split_whitespace();
        let Some(addr) = fields.next() else {
            continue;
        };
        let is_addr = addr
            .strip_suffix(':')
            .is_some_and(|a| a.len() == 4 && a.bytes().all(|b| b.is_ascii_hexdigit()));
        if !is_addr {
            continue;
        }
        // The dump columns may be followed by an ASCII rendering; stop at the first non-word.
        for field in fields.take(4) {
            if !is_word(field.as_bytes()) {
                break;
            }
            if let Some(word) = parse_word(field.as_bytes()) {
                words.push(word);
            }
        }
    }
    words
}

pub fn le_words(bytes: &[u8]) -> anyhow::Result<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        bail!(
            "binary shader length {} is not a multiple of 4 bytes",
            bytes.len()
        );
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

fn parse_word(chunk: &[u8]) -> Option<u32> {
    std::str::from_utf8(chunk)
        .ok()
        .and_then(|s| u32::from_str_radix(s, 16).ok())
}

fn join_words(words: &[u32]) -> String {
    words
        .iter()
        .map(|w| format!("{w:08x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
