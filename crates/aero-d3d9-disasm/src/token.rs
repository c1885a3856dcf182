//! Per-kind token decoders.
//!
//! Each decoder reads one 32-bit word with a fixed field layout and has a `Display` impl producing
//! its assembly text. None of them look at neighbouring words; picking the right decoder for a
//! word is the walker's job.

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;

use crate::error::Field;
use crate::tables::{
    DeclUsage, OpcodeName, RegisterType, SrcModifier, TextureType, OPCODE_COMMENT,
};

/// Word terminating a token stream.
pub const END_TOKEN: u32 = 0x0000_FFFF;

const OPCODE_MASK: u32 = 0x0000_FFFF;
const SPECIFIC_CONTROLS_MASK: u32 = 0x00FF_0000;
const SPECIFIC_CONTROLS_SHIFT: u32 = 16;
const INSTRUCTION_SIZE_MASK: u32 = 0x0F00_0000;
const INSTRUCTION_SIZE_SHIFT: u32 = 24;
const PREDICATED: u32 = 0x1000_0000;

const COMMENT_SIZE_MASK: u32 = 0x7FFF_0000;
const COMMENT_SIZE_SHIFT: u32 = 16;

const VERSION_PIXEL: u32 = 0xFFFF;
const VERSION_VERTEX: u32 = 0xFFFE;

const REGNUM_MASK: u32 = 0x0000_07FF;
const REGTYPE_MASK: u32 = 0x7000_0000;
const REGTYPE_SHIFT: u32 = 28;
const REGTYPE_MASK2: u32 = 0x0000_1800;
const REGTYPE_SHIFT2: u32 = 8;
const RELATIVE: u32 = 0x0000_2000;

const SWIZZLE_MASK: u32 = 0x00FF_0000;
const SWIZZLE_SHIFT: u32 = 16;
const SRCMOD_MASK: u32 = 0x0F00_0000;
const SRCMOD_SHIFT: u32 = 24;

const WRITEMASK_MASK: u32 = 0x000F_0000;
const WRITEMASK_SHIFT: u32 = 16;
const DSTMOD_MASK: u32 = 0x00F0_0000;
const DSTMOD_SHIFT: u32 = 20;

const DCL_TEXTURE_TYPE_MASK: u32 = 0x7800_0000;
const DCL_TEXTURE_TYPE_SHIFT: u32 = 27;
const DCL_USAGE_INDEX_MASK: u32 = 0x000F_0000;
const DCL_USAGE_INDEX_SHIFT: u32 = 16;
const DCL_USAGE_MASK: u32 = 0x0000_000F;

/// Instruction token.
///
/// ```text
/// [15:00] opcode
/// [23:16] opcode-specific controls
/// [27:24] instruction size (operand words following this token)
/// [28]    predicated
/// ```
///
/// Comment tokens reuse the opcode field with `0xFFFE` and carry a 15-bit size in `[30:16]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpcodeToken {
    pub code: u16,
    pub size: u16,
    pub specific_controls: u8,
    pub predicated: bool,
}

impl OpcodeToken {
    pub fn decode(word: u32) -> Self {
        let code = (word & OPCODE_MASK) as u16;
        // The comment sentinel sits inside the regular opcode space, so it has to be recognised
        // before the generic size field is trusted.
        if code == OPCODE_COMMENT {
            return Self {
                code,
                size: ((word & COMMENT_SIZE_MASK) >> COMMENT_SIZE_SHIFT) as u16,
                specific_controls: 0,
                predicated: false,
            };
        }
        Self {
            code,
            size: ((word & INSTRUCTION_SIZE_MASK) >> INSTRUCTION_SIZE_SHIFT) as u16,
            specific_controls: ((word & SPECIFIC_CONTROLS_MASK) >> SPECIFIC_CONTROLS_SHIFT) as u8,
            predicated: (word & PREDICATED) != 0,
        }
    }

    pub fn name(&self) -> OpcodeName {
        OpcodeName::lookup(self.code)
    }

    /// Number of words after this token that belong to the instruction.
    pub fn operand_count(&self) -> usize {
        self.size as usize
    }
}

impl fmt::Display for OpcodeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderStage {
    Pixel,
    Vertex,
}

impl ShaderStage {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Pixel => "ps",
            Self::Vertex => "vs",
        }
    }
}

/// Version header: `0xFFFF` (pixel) or `0xFFFE` (vertex) in `[31:16]`, major in `[15:8]`, minor in
/// `[7:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VersionToken {
    pub stage: ShaderStage,
    pub major: u8,
    pub minor: u8,
}

impl VersionToken {
    pub fn decode(word: u32) -> Option<Self> {
        let stage = match word >> 16 {
            VERSION_PIXEL => ShaderStage::Pixel,
            VERSION_VERTEX => ShaderStage::Vertex,
            _ => return None,
        };
        Some(Self {
            stage,
            major: ((word >> 8) & 0xFF) as u8,
            minor: (word & 0xFF) as u8,
        })
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.stage.prefix(), self.major, self.minor)
    }
}

/// Register reference shared by source and destination parameters.
///
/// The 5-bit register type is split across the token: bits `[30:28]` hold the low three bits and
/// `[12:11]` the high two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Register {
    pub ty: RegisterType,
    pub number: u16,
    pub relative: bool,
}

impl Register {
    pub fn decode(word: u32) -> Self {
        let ty_raw = (((word & REGTYPE_MASK) >> REGTYPE_SHIFT)
            | ((word & REGTYPE_MASK2) >> REGTYPE_SHIFT2)) as u8;
        Self {
            ty: RegisterType::from_raw(ty_raw),
            number: (word & REGNUM_MASK) as u16,
            relative: (word & RELATIVE) != 0,
        }
    }

    fn check_fields(&self, out: &mut Vec<(Field, u32)>) {
        if let RegisterType::Unknown(raw) = self.ty {
            out.push((Field::RegisterType, raw as u32));
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ty.mnemonic(), self.number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    X,
    Y,
    Z,
    W,
}

impl Component {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => Self::X,
            1 => Self::Y,
            2 => Self::Z,
            _ => Self::W,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
            Self::W => 'w',
        }
    }
}

/// Source swizzle byte; two bits per output lane, lane 0 in the low bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Swizzle(pub u8);

impl Swizzle {
    pub const IDENTITY: Self = Self(0xE4);

    pub fn components(&self) -> [Component; 4] {
        let mut comps = [Component::X; 4];
        for (i, comp) in comps.iter_mut().enumerate() {
            *comp = Component::from_bits(self.0 >> (i * 2));
        }
        comps
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// All four lanes read the same component.
    pub fn is_replicate(&self) -> bool {
        let [a, b, c, d] = self.components();
        a == b && b == c && c == d
    }
}

impl fmt::Display for Swizzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comps = self.components();
        if self.is_replicate() {
            return write!(f, "{}", comps[0].as_char());
        }
        for comp in comps {
            write!(f, "{}", comp.as_char())?;
        }
        Ok(())
    }
}

/// Source parameter token.
///
/// ```text
/// [10:00] register number
/// [12:11] register type bits 3..4
/// [13]    relative addressing
/// [23:16] swizzle
/// [27:24] source modifier
/// [30:28] register type bits 0..2
/// [31]    1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SrcParam {
    pub reg: Register,
    pub swizzle: Swizzle,
    pub modifier: SrcModifier,
}

impl SrcParam {
    pub fn decode(word: u32) -> Self {
        Self {
            reg: Register::decode(word),
            swizzle: Swizzle(((word & SWIZZLE_MASK) >> SWIZZLE_SHIFT) as u8),
            modifier: SrcModifier::from_raw(((word & SRCMOD_MASK) >> SRCMOD_SHIFT) as u8),
        }
    }

    fn check_fields(&self, out: &mut Vec<(Field, u32)>) {
        self.reg.check_fields(out);
        if let SrcModifier::Unknown(raw) = self.modifier {
            out.push((Field::SourceModifier, raw as u32));
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reg)?;
        if !self.swizzle.is_identity() {
            write!(f, ".{}", self.swizzle)?;
        }
        Ok(())
    }
}

impl fmt::Display for SrcParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only negate and abs have a textual form; the remaining SM1 modifiers render bare.
        match self.modifier {
            SrcModifier::Negate => {
                f.write_str("-")?;
                self.fmt_operand(f)
            }
            SrcModifier::Abs => {
                f.write_str("abs(")?;
                self.fmt_operand(f)?;
                f.write_str(")")
            }
            _ => self.fmt_operand(f),
        }
    }
}

/// Destination write mask; bit 0 is `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WriteMask(pub u8);

impl WriteMask {
    pub const ALL: Self = Self(0xF);

    pub fn contains(&self, component: Component) -> bool {
        let bit = match component {
            Component::X => 0,
            Component::Y => 1,
            Component::Z => 2,
            Component::W => 3,
        };
        (self.0 & (1 << bit)) != 0
    }
}

impl fmt::Display for WriteMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comp in [Component::X, Component::Y, Component::Z, Component::W] {
            if self.contains(comp) {
                write!(f, "{}", comp.as_char())?;
            }
        }
        Ok(())
    }
}

bitflags! {
    /// `D3DSPDM_*` result modifiers of a destination parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct ResultModifier: u8 {
        const SATURATE = 0x1;
        const PARTIAL_PRECISION = 0x2;
        const CENTROID = 0x4;
    }
}

/// Destination parameter token.
///
/// ```text
/// [10:00] register number
/// [12:11] register type bits 3..4
/// [13]    relative addressing
/// [19:16] write mask
/// [23:20] result modifier
/// [30:28] register type bits 0..2
/// [31]    1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DstParam {
    pub reg: Register,
    pub write_mask: WriteMask,
    pub result_modifier: ResultModifier,
}

impl DstParam {
    pub fn decode(word: u32) -> Self {
        Self {
            reg: Register::decode(word),
            write_mask: WriteMask(((word & WRITEMASK_MASK) >> WRITEMASK_SHIFT) as u8),
            result_modifier: ResultModifier::from_bits_retain(
                ((word & DSTMOD_MASK) >> DSTMOD_SHIFT) as u8,
            ),
        }
    }

    fn check_fields(&self, out: &mut Vec<(Field, u32)>) {
        self.reg.check_fields(out);
        let raw = self.result_modifier.bits();
        if raw & !ResultModifier::all().bits() != 0 {
            out.push((Field::ResultModifier, raw as u32));
        }
    }
}

impl fmt::Display for DstParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Result modifiers belong to the instruction mnemonic in assembly, not to the operand.
        write!(f, "{}", self.reg)?;
        if self.write_mask != WriteMask::ALL {
            write!(f, ".{}", self.write_mask)?;
        }
        Ok(())
    }
}

/// Declaration info word following a `dcl` opcode.
///
/// ```text
/// [03:00] usage
/// [19:16] usage index
/// [30:27] sampler texture type (0 for non-sampler declarations)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DclInfo {
    pub texture_type: TextureType,
    pub usage: DeclUsage,
    pub usage_index: u8,
}

impl DclInfo {
    pub fn decode(word: u32) -> Self {
        Self {
            texture_type: TextureType::from_raw(
                ((word & DCL_TEXTURE_TYPE_MASK) >> DCL_TEXTURE_TYPE_SHIFT) as u8,
            ),
            usage: DeclUsage::from_raw((word & DCL_USAGE_MASK) as u8),
            usage_index: ((word & DCL_USAGE_INDEX_MASK) >> DCL_USAGE_INDEX_SHIFT) as u8,
        }
    }

    fn check_fields(&self, out: &mut Vec<(Field, u32)>) {
        match self.texture_type {
            TextureType::None => {
                if let DeclUsage::Unknown(raw) = self.usage {
                    out.push((Field::Usage, raw as u32));
                }
            }
            TextureType::Unknown(raw) => out.push((Field::TextureType, raw as u32)),
            _ => {}
        }
    }
}

impl fmt::Display for DclInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.texture_type {
            TextureType::None => write!(f, "{}{}", self.usage.name(), self.usage_index),
            other => f.write_str(other.mnemonic()),
        }
    }
}

/// Literal float word following the destination of a `def`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConstFloat {
    pub value: f32,
}

impl ConstFloat {
    pub fn decode(word: u32) -> Self {
        Self {
            value: f32::from_bits(word),
        }
    }
}

impl fmt::Display for ConstFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.value;
        if v.is_nan() {
            f.write_str("nan")
        } else if v.is_infinite() {
            f.write_str(if v > 0.0 { "inf" } else { "-inf" })
        } else {
            write!(f, "{v:.6}")
        }
    }
}

/// One word of comment payload: four bytes, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommentToken {
    pub bytes: [u8; 4],
}

impl CommentToken {
    pub fn decode(word: u32) -> Self {
        Self {
            bytes: word.to_be_bytes(),
        }
    }

    /// Raw payload, one char per byte.
    pub fn text(&self) -> String {
        self.bytes.iter().map(|&b| b as char).collect()
    }

    /// Payload with non-printable bytes replaced by `.`.
    pub fn printable_text(&self) -> String {
        self.bytes
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl fmt::Display for CommentToken {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Comment payloads are kept on the token but hidden from the listing.
        Ok(())
    }
}

/// A decoded word, tagged by how the walker classified it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenKind {
    Version(VersionToken),
    Opcode(OpcodeToken),
    Dst(DstParam),
    Src(SrcParam),
    DclInfo(DclInfo),
    ConstFloat(ConstFloat),
    Comment(CommentToken),
    End,
}

impl TokenKind {
    /// Table-backed fields whose raw value has no table entry, as `(field, raw value)`.
    pub fn out_of_range_fields(&self) -> Vec<(Field, u32)> {
        let mut out = Vec::new();
        match self {
            Self::Dst(dst) => dst.check_fields(&mut out),
            Self::Src(src) => src.check_fields(&mut out),
            Self::DclInfo(info) => info.check_fields(&mut out),
            Self::Version(_)
            | Self::Opcode(_)
            | Self::ConstFloat(_)
            | Self::Comment(_)
            | Self::End => {}
        }
        out
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(v) => fmt::Display::fmt(v, f),
            Self::Opcode(op) => fmt::Display::fmt(op, f),
            Self::Dst(dst) => fmt::Display::fmt(dst, f),
            Self::Src(src) => fmt::Display::fmt(src, f),
            Self::DclInfo(info) => fmt::Display::fmt(info, f),
            Self::ConstFloat(c) => fmt::Display::fmt(c, f),
            Self::Comment(c) => fmt::Display::fmt(c, f),
            Self::End => f.write_str("end"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg_word(regtype: u8, index: u32) -> u32 {
        let low3 = (regtype as u32) & 0x7;
        let high2 = (regtype as u32) & 0x18;
        0x8000_0000 | (low3 << 28) | (high2 << 8) | (index & 0x7FF)
    }

    fn src_word(regtype: u8, index: u32, swizzle: u8, srcmod: u8) -> u32 {
        reg_word(regtype, index) | ((swizzle as u32) << 16) | ((srcmod as u32) << 24)
    }

    fn dst_word(regtype: u8, index: u32, mask: u8) -> u32 {
        reg_word(regtype, index) | ((mask as u32) << 16)
    }

    #[test]
    fn opcode_fields() {
        let op = OpcodeToken::decode(0x1234_0002);
        assert_eq!(op.code, 2);
        assert_eq!(op.size, 2);
        assert_eq!(op.specific_controls, 0x34);
        assert!(op.predicated);
        assert_eq!(op.to_string(), "add");

        let op = OpcodeToken::decode(0x0300_0042);
        assert_eq!(op.operand_count(), 3);
        assert!(!op.predicated);
        assert_eq!(op.to_string(), "texld");
    }

    #[test]
    fn comment_opcode_uses_wide_size_field() {
        // Size 0x123 would be misread as 0x1 / controls 0x23 by the generic layout.
        let op = OpcodeToken::decode(0x0123_FFFE);
        assert_eq!(op.code, OPCODE_COMMENT);
        assert_eq!(op.size, 0x123);
        assert_eq!(op.specific_controls, 0);
        assert!(!op.predicated);
        assert_eq!(op.to_string(), "comment");

        let op = OpcodeToken::decode(0x7FFF_FFFE);
        assert_eq!(op.size, 0x7FFF);
    }

    #[test]
    fn unknown_opcode_renders_marker() {
        let op = OpcodeToken::decode(0x0200_FFFD);
        assert_eq!(op.name(), OpcodeName::Unknown(0xFFFD));
        assert_eq!(op.operand_count(), 2);
        assert_eq!(op.to_string(), "?");
    }

    #[test]
    fn version_header() {
        let v = VersionToken::decode(0xFFFF_0300).unwrap();
        assert_eq!((v.stage, v.major, v.minor), (ShaderStage::Pixel, 3, 0));
        assert_eq!(v.to_string(), "ps_3_0");

        let v = VersionToken::decode(0xFFFE_0201).unwrap();
        assert_eq!(v.to_string(), "vs_2_1");

        assert_eq!(VersionToken::decode(0x0200_0001), None);
    }

    #[test]
    fn register_type_is_assembled_from_split_fields() {
        // Type 10 (sampler) = 0b01010: low3 = 0b010, high2 = 0b01.
        let reg = Register::decode(reg_word(10, 3));
        assert_eq!(reg.ty, RegisterType::Sampler);
        assert_eq!(reg.number, 3);
        assert_eq!(reg.to_string(), "s3");

        let reg = Register::decode(reg_word(19, 0) | RELATIVE);
        assert_eq!(reg.ty, RegisterType::Predicate);
        assert!(reg.relative);
    }

    #[test]
    fn swizzle_renders_four_lanes_or_one_replicated() {
        for raw in 0..=255u8 {
            let swizzle = Swizzle(raw);
            let comps = swizzle.components();
            let expected: String = comps.iter().map(Component::as_char).collect();
            assert_eq!(expected.len(), 4);

            let rendered = swizzle.to_string();
            let all_same = comps.iter().all(|c| *c == comps[0]);
            if all_same {
                assert_eq!(rendered, expected[..1]);
            } else {
                assert_eq!(rendered, expected);
            }
        }
        assert_eq!(Swizzle::IDENTITY.to_string(), "xyzw");
        assert_eq!(Swizzle(0x00).to_string(), "x");
        assert_eq!(Swizzle(0xFF).to_string(), "w");
        assert_eq!(Swizzle(0x1B).to_string(), "wzyx");
    }

    #[test]
    fn write_mask_renders_set_components() {
        for raw in 0..16u8 {
            let rendered = WriteMask(raw).to_string();
            let expected: String = ['x', 'y', 'z', 'w']
                .iter()
                .enumerate()
                .filter(|(bit, _)| raw & (1u8 << *bit) != 0)
                .map(|(_, c)| *c)
                .collect();
            assert_eq!(rendered, expected);

            let dst = DstParam::decode(dst_word(0, 1, raw)).to_string();
            if raw == 0xF {
                assert_eq!(dst, "r1");
            } else {
                assert_eq!(dst, format!("r1.{expected}"));
            }
        }
    }

    #[test]
    fn src_modifiers() {
        assert_eq!(SrcParam::decode(src_word(2, 4, 0xE4, 0)).to_string(), "c4");
        assert_eq!(SrcParam::decode(src_word(2, 4, 0xE4, 1)).to_string(), "-c4");
        assert_eq!(SrcParam::decode(src_word(0, 0, 0x00, 1)).to_string(), "-r0.x");
        assert_eq!(
            SrcParam::decode(src_word(0, 2, 0x55, 0xB)).to_string(),
            "abs(r2.y)"
        );
        // Modifiers without a textual form (bias, x2, abs-negate, ...) render bare.
        for srcmod in [2u8, 4, 7, 12, 13] {
            assert_eq!(SrcParam::decode(src_word(1, 0, 0xE4, srcmod)).to_string(), "v0");
        }
    }

    #[test]
    fn out_of_range_fields_are_reported() {
        let src = TokenKind::Src(SrcParam::decode(src_word(25, 1, 0xE4, 0xF)));
        assert_eq!(src.to_string(), "?1");
        assert_eq!(
            src.out_of_range_fields(),
            vec![(Field::RegisterType, 25), (Field::SourceModifier, 0xF)]
        );

        let dst = TokenKind::Dst(DstParam::decode(dst_word(0, 0, 0xF) | (0x9 << 20)));
        assert_eq!(dst.out_of_range_fields(), vec![(Field::ResultModifier, 0x9)]);

        let ok = TokenKind::Dst(DstParam::decode(dst_word(8, 0, 0xF) | (0x5 << 20)));
        assert!(ok.out_of_range_fields().is_empty());
    }

    #[test]
    fn result_modifier_bits() {
        let dst = DstParam::decode(dst_word(0, 0, 0xF) | (0x5 << 20));
        assert!(dst.result_modifier.contains(ResultModifier::SATURATE));
        assert!(dst.result_modifier.contains(ResultModifier::CENTROID));
        assert!(!dst.result_modifier.contains(ResultModifier::PARTIAL_PRECISION));
        assert_eq!(dst.to_string(), "r0");
    }

    #[test]
    fn dcl_info_usage_or_texture_type() {
        // dcl_texcoord1
        let info = DclInfo::decode(0x8001_0005);
        assert_eq!(info.usage, DeclUsage::TexCoord);
        assert_eq!(info.usage_index, 1);
        assert_eq!(info.to_string(), "texcoord1");

        // dcl_2d / dcl_cube / dcl_volume
        assert_eq!(DclInfo::decode(0x9000_0000).to_string(), "2d");
        assert_eq!(DclInfo::decode(0x9800_0000).to_string(), "cube");
        assert_eq!(DclInfo::decode(0xA000_0000).to_string(), "volume");

        let bad = TokenKind::DclInfo(DclInfo::decode(0xB000_0000));
        assert_eq!(bad.out_of_range_fields(), vec![(Field::TextureType, 6)]);

        let bad = TokenKind::DclInfo(DclInfo::decode(0x8000_000E));
        assert_eq!(bad.out_of_range_fields(), vec![(Field::Usage, 14)]);
    }

    #[test]
    fn const_float_formatting() {
        assert_eq!(ConstFloat::decode(0x3F00_0000).to_string(), "0.500000");
        assert_eq!(ConstFloat::decode(0xBF80_0000).to_string(), "-1.000000");
        assert_eq!(ConstFloat::decode(0x0000_0000).to_string(), "0.000000");
        assert_eq!(ConstFloat::decode(0x7F80_0000).to_string(), "inf");
        assert_eq!(ConstFloat::decode(0xFF80_0000).to_string(), "-inf");
        assert_eq!(ConstFloat::decode(0x7FC0_0000).to_string(), "nan");
    }

    #[test]
    fn comment_text_is_kept_but_not_rendered() {
        let c = CommentToken::decode(0x4354_4142);
        assert_eq!(c.text(), "CTAB");
        assert_eq!(c.to_string(), "");

        let c = CommentToken::decode(0x4100_0A42);
        assert_eq!(c.printable_text(), "A..B");
    }
}
