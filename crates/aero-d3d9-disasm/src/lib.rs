//! Direct3D 9 shader model 1-3 token stream disassembler.
//!
//! A compiled D3D9 shader is a flat stream of little-endian 32-bit words: a version header, a
//! sequence of instructions (each an opcode token followed by the operand tokens it declares), and
//! a terminating `0x0000FFFF`. [`disassemble`] classifies every word in one pass and returns the
//! decoded tokens together with a textual listing.
//!
//! ```
//! let words = [0xFFFF_0300, 0x0200_0001, 0x900F_0000, 0x8000_0000, 0x0000_FFFF];
//! let disasm = aero_d3d9_disasm::disassemble(&words);
//! assert!(disasm.is_well_formed());
//! assert_eq!(disasm.listing(), "ps_3_0 \nmov v0 r0.x \nend ");
//! ```
//!
//! Malformed input never aborts the walk. Out-of-range fields and unknown opcodes are attached to
//! the token they came from; structural problems (missing header, missing end, truncated operand
//! span) are collected in [`Disassembly::stream_errors`].

pub mod error;
pub mod tables;
pub mod token;
pub mod walk;

pub use error::{DecodeError, Field};
pub use token::{ShaderStage, TokenKind, VersionToken, END_TOKEN};
pub use walk::{disassemble, disassemble_with, DisasmOptions, Disassembly, Token};
