//! Instruction Decode (ID) Stage.
//!
//! Extracts the instruction fields, classifies the op, and records source
//! and destination registers, immediates, and branch targets. Register
//! values are read together with the bypass network in execute, not here.
//!
//! Unconditional jumps are declared taken already in decode; JR/JALR are
//! marked branches but get their target from a register in execute.
//! An instruction matching no known opcode flows through with no sources,
//! no destination, and no side effects.

use crate::core::pipeline::Pipeline;
use crate::isa::{self, abi, opcodes};
use tracing::trace;

/// Branch target for PC-relative branches: `pc + 4 + signExt(imm16) * 4`.
const fn branch_target(pc: u32, se_imm16: u32) -> u32 {
    pc.wrapping_add(4).wrapping_add(se_imm16 << 2)
}

/// Executes the decode stage.
///
/// Precondition: the execute slot is empty and the decode slot is not.
pub fn decode_stage(pipe: &mut Pipeline) {
    if pipe.execute_in.is_some() {
        return;
    }
    let Some(mut op) = pipe.decode_in.take() else {
        return;
    };

    let inst = op.inst;
    let rs = isa::rs(inst);
    let rt = isa::rt(inst);
    let rd = isa::rd(inst);

    op.opcode = isa::opcode(inst);
    op.imm16 = isa::imm16(inst);
    op.se_imm16 = isa::se_imm16(inst);
    op.shamt = isa::shamt(inst);

    match op.opcode {
        opcodes::OP_SPECIAL => {
            // R-types use the ALU and both source registers.
            op.src1 = Some(rs);
            op.src2 = Some(rt);
            op.dst = Some(rd);
            op.subop = isa::funct(inst);
            if op.subop == opcodes::SUBOP_SYSCALL {
                // Syscalls read v0 (the service number) and v1.
                op.src1 = Some(abi::REG_V0);
                op.src2 = Some(abi::REG_V1);
            }
            if op.subop == opcodes::SUBOP_JR || op.subop == opcodes::SUBOP_JALR {
                // Target comes out of a register in execute.
                op.is_branch = true;
                op.branch_cond = false;
            }
        }

        opcodes::OP_BRSPEC => {
            // BLTZ/BGEZ family: the branch code lives in the rt field, the
            // only register operand is rs.
            op.is_branch = true;
            op.branch_cond = true;
            op.src1 = Some(rs);
            op.branch_dest = branch_target(op.pc, op.se_imm16);
            op.subop = rt as u32;
            if op.subop == opcodes::BROP_BLTZAL || op.subop == opcodes::BROP_BGEZAL {
                // The link register is written whether or not the branch is
                // taken, and its value is known now.
                op.dst = Some(abi::REG_RA);
                op.dst_value = op.pc.wrapping_add(4);
                op.dst_ready = true;
            }
        }

        opcodes::OP_J | opcodes::OP_JAL => {
            if op.opcode == opcodes::OP_JAL {
                op.dst = Some(abi::REG_RA);
                op.dst_value = op.pc.wrapping_add(4);
                op.dst_ready = true;
            }
            // Unconditional: taken is known at decode.
            op.is_branch = true;
            op.branch_cond = false;
            op.branch_taken = true;
            op.branch_dest = (op.pc & 0xF0000000) | isa::jump_target(inst);
        }

        opcodes::OP_BEQ | opcodes::OP_BNE | opcodes::OP_BLEZ | opcodes::OP_BGTZ => {
            // Ordinary conditional branches, resolved in execute.
            op.is_branch = true;
            op.branch_cond = true;
            op.branch_dest = branch_target(op.pc, op.se_imm16);
            op.src1 = Some(rs);
            op.src2 = Some(rt);
        }

        opcodes::OP_ADDI
        | opcodes::OP_ADDIU
        | opcodes::OP_SLTI
        | opcodes::OP_SLTIU
        | opcodes::OP_ANDI
        | opcodes::OP_ORI
        | opcodes::OP_XORI
        | opcodes::OP_LUI => {
            // I-type ALU ops; execute picks the right immediate extension.
            op.src1 = Some(rs);
            op.dst = Some(rt);
        }

        opcodes::OP_LW | opcodes::OP_LH | opcodes::OP_LHU | opcodes::OP_LB | opcodes::OP_LBU => {
            op.is_mem = true;
            op.mem_write = false;
            op.src1 = Some(rs);
            op.dst = Some(rt);
        }

        opcodes::OP_SW | opcodes::OP_SH | opcodes::OP_SB => {
            op.is_mem = true;
            op.mem_write = true;
            op.src1 = Some(rs);
            op.src2 = Some(rt);
        }

        // Anything else flows through as a nop-equivalent: no destination,
        // no side effect.
        _ => {}
    }

    trace!(
        pc = format_args!("{:#010x}", op.pc),
        opcode = op.opcode,
        subop = op.subop,
        "ID"
    );
    pipe.execute_in = Some(op);
}
