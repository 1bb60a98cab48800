//! The in-flight instruction record.
//!
//! A [`PipeOp`] is the high-level representation of one instruction flowing
//! through the pipeline. It does not correspond 1-to-1 with the control
//! signals real hardware would latch; it carries the original instruction
//! word plus operand, destination, memory, and branch information as the
//! stages collect them.
//!
//! Exactly one stage slot owns an op at a time: fetch creates it, each stage
//! moves it into the next slot, and write-back (or a flush) drops it.

/// One in-flight instruction.
#[derive(Debug, Clone)]
pub struct PipeOp {
    /// PC this instruction was fetched from.
    pub pc: u32,
    /// Raw 32-bit instruction word.
    pub inst: u32,

    /// Decoded primary opcode.
    pub opcode: u32,
    /// Decoded sub-opcode: SPECIAL function or REGIMM branch code.
    pub subop: u32,

    /// 16-bit immediate, zero-extended.
    pub imm16: u32,
    /// 16-bit immediate, sign-extended.
    pub se_imm16: u32,
    /// Shift amount field.
    pub shamt: u32,

    /// First source register, if this instruction has one.
    pub src1: Option<usize>,
    /// Second source register, if this instruction has one.
    pub src2: Option<usize>,
    /// Resolved value of the first source operand.
    pub src1_value: u32,
    /// Resolved value of the second source operand.
    pub src2_value: u32,

    /// Destination register, if this instruction has one.
    pub dst: Option<usize>,
    /// Value to commit into the destination register.
    pub dst_value: u32,
    /// Whether `dst_value` has been produced yet.
    ///
    /// The bypass network forwards a ready value and stalls on an unready one.
    pub dst_ready: bool,

    /// Is this a load or store?
    pub is_mem: bool,
    /// Is this a store?
    pub mem_write: bool,
    /// Effective address, computed in execute.
    pub mem_addr: u32,
    /// Pending store value (or sub-word to merge) for stores.
    pub mem_value: u32,

    /// Is this a branch or jump?
    pub is_branch: bool,
    /// Conditional branch (resolved in execute) vs unconditional.
    pub branch_cond: bool,
    /// Branch resolved taken. Set in decode for unconditional jumps, in
    /// execute for everything else.
    pub branch_taken: bool,
    /// Control-flow target when taken.
    pub branch_dest: u32,
}

impl PipeOp {
    /// Creates a fresh op as fetch emits it: only the PC and instruction word
    /// are meaningful until decode fills in the rest.
    pub const fn new(pc: u32, inst: u32) -> Self {
        Self {
            pc,
            inst,
            opcode: 0,
            subop: 0,
            imm16: 0,
            se_imm16: 0,
            shamt: 0,
            src1: None,
            src2: None,
            src1_value: 0,
            src2_value: 0,
            dst: None,
            dst_value: 0,
            dst_ready: false,
            is_mem: false,
            mem_write: false,
            mem_addr: 0,
            mem_value: 0,
            is_branch: false,
            branch_cond: false,
            branch_taken: false,
            branch_dest: 0,
        }
    }
}
