use serde::Serialize;
use thiserror::Error;

/// Token sub-field that is validated against a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    RegisterType,
    SourceModifier,
    ResultModifier,
    TextureType,
    Usage,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterType => "register type",
            Self::SourceModifier => "source modifier",
            Self::ResultModifier => "result modifier",
            Self::TextureType => "texture type",
            Self::Usage => "usage",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Diagnostics produced while walking a token stream.
///
/// `UnknownOpcode` and `FieldOutOfRange` are attached to the token they came from and never stop
/// the walk. The remaining variants describe the stream as a whole and are reported once, next to
/// whatever tokens were decoded before the problem was noticed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum DecodeError {
    #[error("unknown opcode 0x{code:04x} at word {offset}")]
    UnknownOpcode { offset: usize, code: u16 },

    #[error("{field} value {value} at word {offset} is out of range")]
    FieldOutOfRange {
        offset: usize,
        field: Field,
        value: u32,
    },

    #[error("empty token stream")]
    EmptyStream,

    #[error("missing version token (first word is 0x{word:08x})")]
    MissingVersion { word: u32 },

    #[error(
        "instruction at word {offset} declares {declared} operand words but only {available} remain"
    )]
    TruncatedInstruction {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("missing end token")]
    MissingEnd,
}

impl DecodeError {
    /// Whether this diagnostic describes the stream structure rather than a single token.
    pub fn is_stream_level(&self) -> bool {
        matches!(
            self,
            Self::EmptyStream
                | Self::MissingVersion { .. }
                | Self::TruncatedInstruction { .. }
                | Self::MissingEnd
        )
    }
}
