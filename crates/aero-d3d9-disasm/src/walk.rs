//! Single-pass instruction stream walker.
//!
//! The walker classifies every word of a token stream by its position: the first word may be a
//! version header, words inside an instruction's declared operand span are operands (with a few
//! opcodes using a non-generic layout), the end sentinel stops the walk, and anything else starts
//! a new instruction.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::DecodeError;
use crate::tables::{OPCODE_COMMENT, OPCODE_DCL, OPCODE_DEF, OPCODE_IFC};
use crate::token::{
    CommentToken, ConstFloat, DclInfo, DstParam, OpcodeToken, ShaderStage, SrcParam, TokenKind,
    VersionToken, END_TOKEN,
};

/// Knobs controlling how a stream is decoded and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisasmOptions {
    /// Accept `0xFFFE_xxxx` as a vertex shader version header on the first word.
    pub vertex_headers: bool,
    /// Render comment payload words as printable text instead of nothing.
    pub comment_text: bool,
    /// Make [`Disassembly::into_result`] fail on per-token diagnostics too.
    pub fatal_field_errors: bool,
    /// Report [`DecodeError::MissingVersion`] when the first word is not a version header.
    pub require_version: bool,
}

impl Default for DisasmOptions {
    fn default() -> Self {
        Self {
            vertex_headers: false,
            comment_text: false,
            fatal_field_errors: false,
            require_version: true,
        }
    }
}

/// One classified word of the stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Word index into the input slice.
    pub offset: usize,
    pub word: u32,
    #[serde(flatten)]
    pub kind: TokenKind,
    /// Rendered assembly text of this token alone.
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DecodeError>,
}

impl Token {
    /// Whether the listing starts a new line before this token.
    pub fn starts_line(&self) -> bool {
        matches!(self.kind, TokenKind::Opcode(_) | TokenKind::End)
    }
}

/// Result of walking one token stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disassembly {
    pub tokens: Vec<Token>,
    pub stream_errors: Vec<DecodeError>,
    /// Words read up to and including the end token; the whole input if there was none.
    pub words_consumed: usize,
    #[serde(skip)]
    pub options: DisasmOptions,
}

impl Disassembly {
    /// Assembly listing: each token followed by a space, instructions and `end` on their own line.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            if token.starts_line() {
                out.push('\n');
            }
            let _ = write!(out, "{} ", token.text);
        }
        out
    }

    pub fn version(&self) -> Option<VersionToken> {
        match self.tokens.first().map(|t| t.kind) {
            Some(TokenKind::Version(v)) => Some(v),
            _ => None,
        }
    }

    /// Per-token diagnostics in stream order.
    pub fn field_errors(&self) -> impl Iterator<Item = &DecodeError> {
        self.tokens.iter().flat_map(|t| t.diagnostics.iter())
    }

    /// No stream-level and no per-token diagnostics.
    pub fn is_well_formed(&self) -> bool {
        self.stream_errors.is_empty() && self.field_errors().next().is_none()
    }

    /// Fails on the first stream-level diagnostic, or on the first per-token diagnostic when
    /// [`DisasmOptions::fatal_field_errors`] is set.
    pub fn into_result(self) -> Result<Self, DecodeError> {
        if let Some(err) = self.stream_errors.first() {
            return Err(err.clone());
        }
        if self.options.fatal_field_errors {
            if let Some(err) = self.field_errors().next() {
                return Err(err.clone());
            }
        }
        Ok(self)
    }
}

/// Walks `words` with the default options.
pub fn disassemble(words: &[u32]) -> Disassembly {
    disassemble_with(words, &DisasmOptions::default())
}

pub fn disassemble_with(words: &[u32], options: &DisasmOptions) -> Disassembly {
    let mut walker = Walker::new(*options);
    if words.is_empty() {
        debug!("empty token stream");
        walker.stream_errors.push(DecodeError::EmptyStream);
        return walker.finish(0);
    }

    for (offset, &word) in words.iter().enumerate() {
        if walker.step(offset, word) == Step::Stop {
            return walker.finish(offset + 1);
        }
    }

    if let Some(inst) = walker.active.take() {
        let err = DecodeError::TruncatedInstruction {
            offset: inst.offset,
            declared: inst.declared,
            available: inst.declared - inst.remaining,
        };
        debug!(%err, "instruction runs past the end of the input");
        walker.stream_errors.push(err);
    }
    debug!("token stream has no end token");
    walker.stream_errors.push(DecodeError::MissingEnd);
    walker.finish(words.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Stop,
}

/// How the operand words of an instruction are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandLayout {
    /// Every word is comment payload.
    Comment,
    /// Declaration info, then the declared register, then sources.
    Dcl,
    /// Destination constant register, then literal floats.
    Def,
    /// Source operands only.
    Ifc,
    /// Destination, then sources.
    Generic,
}

impl OperandLayout {
    fn for_opcode(code: u16) -> Self {
        match code {
            OPCODE_COMMENT => Self::Comment,
            OPCODE_DCL => Self::Dcl,
            OPCODE_DEF => Self::Def,
            OPCODE_IFC => Self::Ifc,
            _ => Self::Generic,
        }
    }

    fn classify(self, position: usize, word: u32) -> TokenKind {
        match (self, position) {
            (Self::Comment, _) => TokenKind::Comment(CommentToken::decode(word)),
            (Self::Dcl, 0) => TokenKind::DclInfo(DclInfo::decode(word)),
            (Self::Dcl, 1) => TokenKind::Dst(DstParam::decode(word)),
            (Self::Def, 0) | (Self::Generic, 0) => TokenKind::Dst(DstParam::decode(word)),
            (Self::Def, _) => TokenKind::ConstFloat(ConstFloat::decode(word)),
            (Self::Dcl, _) | (Self::Ifc, _) | (Self::Generic, _) => {
                TokenKind::Src(SrcParam::decode(word))
            }
        }
    }
}

/// Instruction whose operand span is still being consumed.
#[derive(Debug, Clone, Copy)]
struct ActiveInstruction {
    offset: usize,
    layout: OperandLayout,
    declared: usize,
    next_operand: usize,
    remaining: usize,
}

struct Walker {
    options: DisasmOptions,
    active: Option<ActiveInstruction>,
    tokens: Vec<Token>,
    stream_errors: Vec<DecodeError>,
}

impl Walker {
    fn new(options: DisasmOptions) -> Self {
        Self {
            options,
            active: None,
            tokens: Vec::new(),
            stream_errors: Vec::new(),
        }
    }

    fn step(&mut self, offset: usize, word: u32) -> Step {
        if offset == 0 {
            if let Some(version) = self.version_header(word) {
                trace!(%version, "version header");
                self.push(offset, word, TokenKind::Version(version), Vec::new());
                return Step::Continue;
            }
            if self.options.require_version {
                debug!(word, "first word is not a version header");
                self.stream_errors.push(DecodeError::MissingVersion { word });
            }
        }

        if let Some(inst) = self.active.as_mut() {
            let kind = inst.layout.classify(inst.next_operand, word);
            inst.next_operand += 1;
            inst.remaining -= 1;
            if inst.remaining == 0 {
                self.active = None;
            }
            let diagnostics = kind
                .out_of_range_fields()
                .into_iter()
                .map(|(field, value)| DecodeError::FieldOutOfRange {
                    offset,
                    field,
                    value,
                })
                .collect::<Vec<_>>();
            for err in &diagnostics {
                debug!(%err, "operand field out of range");
            }
            self.push(offset, word, kind, diagnostics);
            return Step::Continue;
        }

        if word == END_TOKEN {
            trace!(offset, "end token");
            self.push(offset, word, TokenKind::End, Vec::new());
            return Step::Stop;
        }

        let opcode = OpcodeToken::decode(word);
        let mut diagnostics = Vec::new();
        if !opcode.name().is_known() {
            debug!(offset, code = opcode.code, size = opcode.size, "unknown opcode");
            diagnostics.push(DecodeError::UnknownOpcode {
                offset,
                code: opcode.code,
            });
        }
        trace!(offset, opcode = %opcode, size = opcode.size, "instruction");
        let declared = opcode.operand_count();
        if declared > 0 {
            self.active = Some(ActiveInstruction {
                offset,
                layout: OperandLayout::for_opcode(opcode.code),
                declared,
                next_operand: 0,
                remaining: declared,
            });
        }
        self.push(offset, word, TokenKind::Opcode(opcode), diagnostics);
        Step::Continue
    }

    fn version_header(&self, word: u32) -> Option<VersionToken> {
        VersionToken::decode(word).filter(|v| match v.stage {
            ShaderStage::Pixel => true,
            ShaderStage::Vertex => self.options.vertex_headers,
        })
    }

    fn push(&mut self, offset: usize, word: u32, kind: TokenKind, diagnostics: Vec<DecodeError>) {
        let text = match kind {
            TokenKind::Comment(comment) if self.options.comment_text => comment.printable_text(),
            _ => kind.to_string(),
        };
        self.tokens.push(Token {
            offset,
            word,
            kind,
            text,
            diagnostics,
        });
    }

    fn finish(self, words_consumed: usize) -> Disassembly {
        Disassembly {
            tokens: self.tokens,
            stream_errors: self.stream_errors,
            words_consumed,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_pick_operand_kinds_by_position() {
        let kinds = |layout: OperandLayout| -> Vec<&'static str> {
            (0..4)
                .map(|pos| match layout.classify(pos, 0x8000_0000) {
                    TokenKind::Comment(_) => "comment",
                    TokenKind::DclInfo(_) => "dcl",
                    TokenKind::Dst(_) => "dst",
                    TokenKind::Src(_) => "src",
                    TokenKind::ConstFloat(_) => "float",
                    _ => "other",
                })
                .collect()
        };
        assert_eq!(kinds(OperandLayout::Comment), ["comment"; 4]);
        assert_eq!(kinds(OperandLayout::Dcl), ["dcl", "dst", "src", "src"]);
        assert_eq!(kinds(OperandLayout::Def), ["dst", "float", "float", "float"]);
        assert_eq!(kinds(OperandLayout::Ifc), ["src"; 4]);
        assert_eq!(kinds(OperandLayout::Generic), ["dst", "src", "src", "src"]);
    }

    #[test]
    fn layout_for_opcode() {
        assert_eq!(OperandLayout::for_opcode(OPCODE_COMMENT), OperandLayout::Comment);
        assert_eq!(OperandLayout::for_opcode(OPCODE_DCL), OperandLayout::Dcl);
        assert_eq!(OperandLayout::for_opcode(OPCODE_DEF), OperandLayout::Def);
        assert_eq!(OperandLayout::for_opcode(OPCODE_IFC), OperandLayout::Ifc);
        assert_eq!(OperandLayout::for_opcode(0x01), OperandLayout::Generic);
        assert_eq!(OperandLayout::for_opcode(0xFFFD), OperandLayout::Generic);
    }

    #[test]
    fn default_options() {
        let opts = DisasmOptions::default();
        assert!(opts.require_version);
        assert!(!opts.vertex_headers);
        assert!(!opts.comment_text);
        assert!(!opts.fatal_field_errors);
    }
}
