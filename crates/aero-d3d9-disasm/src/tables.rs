//! Static lookup tables for SM1-SM3 token fields.
//!
//! Every lookup is bounded: values outside a table come back as an `Unknown` variant carrying the
//! raw value, so callers decide how to report them.

use serde::Serialize;

pub const OPCODE_DCL: u16 = 0x001F;
pub const OPCODE_IFC: u16 = 0x0029;
pub const OPCODE_DEF: u16 = 0x0051;
pub const OPCODE_COMMENT: u16 = 0xFFFE;

/// Marker rendered for values that have no table entry.
pub const UNKNOWN_MARKER: &str = "?";

/// `D3DSHADER_INSTRUCTION_OPCODE_TYPE` mnemonics indexed by opcode value. `None` marks codes the
/// instruction set leaves unassigned.
#[rustfmt::skip]
static OPCODE_NAMES: [Option<&str>; 97] = [
    Some("nop"), Some("mov"), Some("add"), Some("sub"),
    Some("mad"), Some("mul"), Some("rcp"), Some("rsq"),
    Some("dp3"), Some("dp4"), Some("min"), Some("max"),
    Some("slt"), Some("sge"), Some("exp"), Some("log"),
    Some("lit"), Some("dst"), Some("lrp"), Some("frc"),
    Some("m4x4"), Some("m4x3"), Some("m3x4"), Some("m3x3"),
    Some("m3x2"), Some("call"), Some("callnz"), Some("loop"),
    Some("ret"), Some("endloop"), Some("label"), Some("dcl"),
    Some("pow"), Some("crs"), Some("sgn"), Some("abs"),
    Some("nrm"), Some("sincos"), Some("rep"), Some("endrep"),
    Some("if"), Some("ifc"), Some("else"), Some("endif"),
    Some("break"), Some("breakc"), Some("mova"), Some("defb"),
    Some("defi"),
    // 0x31..=0x3F
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None,
    // 0x40: ps_1_x texture ops
    Some("texcoord"), Some("texkill"), Some("texld"), Some("texbem"),
    Some("texbeml"), Some("texreg2ar"), Some("texreg2gb"), Some("texm3x2pad"),
    Some("texm3x2tex"), Some("texm3x3pad"), Some("texm3x3tex"), Some("reserved0"),
    Some("texm3x3spec"), Some("texm3x3vspec"), Some("expp"), Some("logp"),
    Some("cnd"), Some("def"), Some("texreg2rgb"), Some("texdp3tex"),
    Some("texm3x2depth"), Some("texdp3"), Some("texm3x3"), Some("texdepth"),
    Some("cmp"), Some("bem"), Some("dp2add"), Some("dsx"),
    Some("dsy"), Some("texldd"), Some("setp"), Some("texldl"),
    Some("breakp"),
];

/// Result of looking an opcode value up in the mnemonic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpcodeName {
    Known(&'static str),
    Comment,
    Unknown(u16),
}

impl OpcodeName {
    pub fn lookup(code: u16) -> Self {
        if code == OPCODE_COMMENT {
            return Self::Comment;
        }
        match OPCODE_NAMES.get(code as usize) {
            Some(Some(name)) => Self::Known(*name),
            _ => Self::Unknown(code),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Known(name) => *name,
            Self::Comment => "comment",
            Self::Unknown(_) => UNKNOWN_MARKER,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for OpcodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `D3DSHADER_PARAM_REGISTER_TYPE`.
///
/// Type 3 doubles as `a#` in vertex shaders and type 6 as `oT#`; the stage is not known from a
/// parameter token alone, so the pixel-shader reading is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterType {
    Temp,
    Input,
    Const,
    Texture,
    RastOut,
    AttrOut,
    Output,
    ConstInt,
    ColorOut,
    DepthOut,
    Sampler,
    Const2,
    Const3,
    Const4,
    ConstBool,
    Loop,
    TempFloat16,
    MiscType,
    Label,
    Predicate,
    Unknown(u8),
}

impl RegisterType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Temp,
            1 => Self::Input,
            2 => Self::Const,
            3 => Self::Texture,
            4 => Self::RastOut,
            5 => Self::AttrOut,
            6 => Self::Output,
            7 => Self::ConstInt,
            8 => Self::ColorOut,
            9 => Self::DepthOut,
            10 => Self::Sampler,
            11 => Self::Const2,
            12 => Self::Const3,
            13 => Self::Const4,
            14 => Self::ConstBool,
            15 => Self::Loop,
            16 => Self::TempFloat16,
            17 => Self::MiscType,
            18 => Self::Label,
            19 => Self::Predicate,
            other => Self::Unknown(other),
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Temp => "r",
            Self::Input => "v",
            Self::Const => "c",
            Self::Texture => "t",
            Self::RastOut => "rastout",
            Self::AttrOut => "attrout",
            Self::Output => "o",
            Self::ConstInt => "i",
            Self::ColorOut => "oC",
            Self::DepthOut => "oDepth",
            Self::Sampler => "s",
            Self::Const2 => "const2",
            Self::Const3 => "const3",
            Self::Const4 => "const4",
            Self::ConstBool => "b",
            Self::Loop => "aL",
            Self::TempFloat16 => "tempfloat16",
            Self::MiscType => "misctype",
            Self::Label => "label",
            Self::Predicate => "predicate",
            Self::Unknown(_) => UNKNOWN_MARKER,
        }
    }
}

/// `D3DSHADER_PARAM_SRCMOD_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SrcModifier {
    None,
    Negate,
    Bias,
    BiasNegate,
    Sign,
    SignNegate,
    Comp,
    X2,
    X2Negate,
    Dz,
    Dw,
    Abs,
    AbsNegate,
    Not,
    Unknown(u8),
}

impl SrcModifier {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Negate,
            2 => Self::Bias,
            3 => Self::BiasNegate,
            4 => Self::Sign,
            5 => Self::SignNegate,
            6 => Self::Comp,
            7 => Self::X2,
            8 => Self::X2Negate,
            9 => Self::Dz,
            10 => Self::Dw,
            11 => Self::Abs,
            12 => Self::AbsNegate,
            13 => Self::Not,
            other => Self::Unknown(other),
        }
    }
}

/// Sampler texture type from a `dcl` info token (`D3DSAMPLER_TEXTURE_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    /// Not a sampler declaration; the usage fields apply instead.
    None,
    Texture1D,
    Texture2D,
    Cube,
    Volume,
    Unknown(u8),
}

impl TextureType {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Texture1D,
            2 => Self::Texture2D,
            3 => Self::Cube,
            4 => Self::Volume,
            other => Self::Unknown(other),
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            // 1D samplers have no mnemonic in SM2/SM3 assembly.
            Self::None | Self::Texture1D => "",
            Self::Texture2D => "2d",
            Self::Cube => "cube",
            Self::Volume => "volume",
            Self::Unknown(_) => UNKNOWN_MARKER,
        }
    }
}

/// `D3DDECLUSAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclUsage {
    Position,
    BlendWeight,
    BlendIndices,
    Normal,
    PointSize,
    TexCoord,
    Tangent,
    Binormal,
    TessFactor,
    PositionT,
    Color,
    Fog,
    Depth,
    Sample,
    Unknown(u8),
}

impl DeclUsage {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Position,
            1 => Self::BlendWeight,
            2 => Self::BlendIndices,
            3 => Self::Normal,
            4 => Self::PointSize,
            5 => Self::TexCoord,
            6 => Self::Tangent,
            7 => Self::Binormal,
            8 => Self::TessFactor,
            9 => Self::PositionT,
            10 => Self::Color,
            11 => Self::Fog,
            12 => Self::Depth,
            13 => Self::Sample,
            other => Self::Unknown(other),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::BlendWeight => "blendweight",
            Self::BlendIndices => "blendindices",
            Self::Normal => "normal",
            Self::PointSize => "psize",
            Self::TexCoord => "texcoord",
            Self::Tangent => "tangent",
            Self::Binormal => "binormal",
            Self::TessFactor => "tessfactor",
            Self::PositionT => "positiont",
            Self::Color => "color",
            Self::Fog => "fog",
            Self::Depth => "depth",
            Self::Sample => "sample",
            Self::Unknown(_) => UNKNOWN_MARKER,
        }
    }
}
