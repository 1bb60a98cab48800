//! MIPS opcode constants.
//!
//! Three encoding spaces reach the pipeline:
//! 1. **Primary opcodes** (bits 31..26) — `OP_*`.
//! 2. **SPECIAL functions** (bits 5..0 when the primary opcode is 0) — `SUBOP_*`.
//! 3. **REGIMM branch codes** (the `rt` field when the primary opcode is 1) — `BROP_*`.
//!
//! An instruction word matching none of these flows through the pipeline as a
//! nop-equivalent: no destination, no side effect.

/// SPECIAL: R-type ALU, shift, jump-register, multiply/divide, and syscall space.
pub const OP_SPECIAL: u32 = 0x00;
/// REGIMM: BLTZ/BGEZ family, including the and-link variants.
pub const OP_BRSPEC: u32 = 0x01;
/// Unconditional jump.
pub const OP_J: u32 = 0x02;
/// Jump and link through `$ra`.
pub const OP_JAL: u32 = 0x03;
/// Branch on equal.
pub const OP_BEQ: u32 = 0x04;
/// Branch on not equal.
pub const OP_BNE: u32 = 0x05;
/// Branch on less than or equal to zero.
pub const OP_BLEZ: u32 = 0x06;
/// Branch on greater than zero.
pub const OP_BGTZ: u32 = 0x07;
/// Add immediate (overflow is not trapped in this model).
pub const OP_ADDI: u32 = 0x08;
/// Add immediate unsigned.
pub const OP_ADDIU: u32 = 0x09;
/// Set on less than immediate (signed).
pub const OP_SLTI: u32 = 0x0A;
/// Set on less than immediate unsigned.
pub const OP_SLTIU: u32 = 0x0B;
/// And immediate (zero-extended).
pub const OP_ANDI: u32 = 0x0C;
/// Or immediate (zero-extended).
pub const OP_ORI: u32 = 0x0D;
/// Xor immediate (zero-extended).
pub const OP_XORI: u32 = 0x0E;
/// Load upper immediate.
pub const OP_LUI: u32 = 0x0F;
/// Load byte (sign-extended).
pub const OP_LB: u32 = 0x20;
/// Load halfword (sign-extended).
pub const OP_LH: u32 = 0x21;
/// Load word.
pub const OP_LW: u32 = 0x23;
/// Load byte unsigned.
pub const OP_LBU: u32 = 0x24;
/// Load halfword unsigned.
pub const OP_LHU: u32 = 0x25;
/// Store byte.
pub const OP_SB: u32 = 0x28;
/// Store halfword.
pub const OP_SH: u32 = 0x29;
/// Store word.
pub const OP_SW: u32 = 0x2B;

/// Shift left logical by `shamt`.
pub const SUBOP_SLL: u32 = 0x00;
/// Shift right logical by `shamt`.
pub const SUBOP_SRL: u32 = 0x02;
/// Shift right arithmetic by `shamt`.
pub const SUBOP_SRA: u32 = 0x03;
/// Shift left logical by register.
pub const SUBOP_SLLV: u32 = 0x04;
/// Shift right logical by register.
pub const SUBOP_SRLV: u32 = 0x06;
/// Shift right arithmetic by register.
pub const SUBOP_SRAV: u32 = 0x07;
/// Jump register.
pub const SUBOP_JR: u32 = 0x08;
/// Jump and link register.
pub const SUBOP_JALR: u32 = 0x09;
/// System call (v0 == 10 halts the simulator).
pub const SUBOP_SYSCALL: u32 = 0x0C;
/// Move from HI.
pub const SUBOP_MFHI: u32 = 0x10;
/// Move to HI.
pub const SUBOP_MTHI: u32 = 0x11;
/// Move from LO.
pub const SUBOP_MFLO: u32 = 0x12;
/// Move to LO.
pub const SUBOP_MTLO: u32 = 0x13;
/// Signed multiply into HI/LO.
pub const SUBOP_MULT: u32 = 0x18;
/// Unsigned multiply into HI/LO.
pub const SUBOP_MULTU: u32 = 0x19;
/// Signed divide: quotient into LO, remainder into HI.
pub const SUBOP_DIV: u32 = 0x1A;
/// Unsigned divide: quotient into LO, remainder into HI.
pub const SUBOP_DIVU: u32 = 0x1B;
/// Add (overflow is not trapped in this model).
pub const SUBOP_ADD: u32 = 0x20;
/// Add unsigned.
pub const SUBOP_ADDU: u32 = 0x21;
/// Subtract (overflow is not trapped in this model).
pub const SUBOP_SUB: u32 = 0x22;
/// Subtract unsigned.
pub const SUBOP_SUBU: u32 = 0x23;
/// Bitwise and.
pub const SUBOP_AND: u32 = 0x24;
/// Bitwise or.
pub const SUBOP_OR: u32 = 0x25;
/// Bitwise xor.
pub const SUBOP_XOR: u32 = 0x26;
/// Bitwise nor.
pub const SUBOP_NOR: u32 = 0x27;
/// Set on less than (signed).
pub const SUBOP_SLT: u32 = 0x2A;
/// Set on less than unsigned.
pub const SUBOP_SLTU: u32 = 0x2B;

/// Branch on less than zero.
pub const BROP_BLTZ: u32 = 0x00;
/// Branch on greater than or equal to zero.
pub const BROP_BGEZ: u32 = 0x01;
/// Branch on less than zero and link.
pub const BROP_BLTZAL: u32 = 0x10;
/// Branch on greater than or equal to zero and link.
pub const BROP_BGEZAL: u32 = 0x11;
