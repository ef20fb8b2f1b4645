use crate::cpu_65xx::*;

/// The shared conditional-branch core. Offsets are signed and applied
/// relative to one past the opcode byte; the page-cross comparison uses
/// that same base. A taken branch costs `penalty` extra cycles (the
/// variant's base penalty for the conditional branches, zero for BRA) plus
/// one more when the target sits on a different page.
pub(crate) fn branch(cpu: &mut Cpu, condition: bool, offset: u8, penalty: u32, pcp: u32) {
    if !condition {
        return;
    }
    let base = cpu.branch_base();
    let target = base.wrapping_add(offset as i8 as u16);
    cpu.add_cycles(penalty);
    if pcp != 0 && (target & 0xff00) != (base & 0xff00) {
        cpu.add_cycles(pcp);
    }
    cpu.pc = target;
}

/// Branch if plus
/// Function: branch on N=0
/// Flags:
pub fn bpl(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.n == 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch if minus
/// Function: branch on N=1
/// Flags:
pub fn bmi(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.n != 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch if Overflow Clear
/// Function: branch on V=0
/// Flags:
pub fn bvc(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.v == 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch if Overflow Set
/// Function: branch on V=1
/// Flags:
pub fn bvs(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.v != 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch if Carry Clear
/// Function: branch on C=0
/// Flags:
pub fn bcc(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.c == 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch if Carry Set
/// Function: branch on C=1
/// Flags:
pub fn bcs(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.c != 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch if Not Equal
/// Function: branch on Z=0
/// Flags:
pub fn bne(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.z == 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch if Equal
/// Function: branch on Z=1
/// Flags:
pub fn beq(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, cpu.z != 0, ops[0], cpu.config.variant.branch_penalty(), pcp);
}

/// Branch always (CMOS). The taken-branch cost is folded into the base
/// cycles, so the penalty here is zero; only the page cross can add one.
/// Function: PC:=PC+{offset}
/// Flags:
pub fn bra(cpu: &mut Cpu, _mode: Mode, ops: &[u8], pcp: u32) {
    branch(cpu, true, ops[0], 0, pcp);
}

/// Break - software interrupt. The byte after the opcode is a signature
/// byte the CPU skips; the pushed status always has B set.
/// Function: (S)-:=PC,P PC:=(INT_VEC)
/// Flags: B I (D and T per variant)
pub fn brk(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.pc = cpu.pc.wrapping_add(1);
    let [pcl, pch] = cpu.pc.to_le_bytes();
    cpu.push(pch);
    cpu.push(pcl);
    let flags = cpu.pack_flags() | Status::BREAK.bits();
    cpu.push(flags);
    cpu.pc = cpu.read_word(cpu.config.variant.irq_brk_vector());
    cpu.t = cpu.config.variant.t_init();
    cpu.i = 1;
    cpu.b = 1;
    if !cpu
        .config
        .variant
        .interrupt_preserved()
        .contains(Status::DECIMAL)
    {
        cpu.d = 0;
    }
}

/// Return from Interrupt. Pops the flags and then the PC; unlike RTS there
/// is no increment, the pushed address is used as-is.
/// Function: P,PC:=+(S)
/// Flags: N V T B D I Z C (as the variant restores them)
pub fn rti(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    let packed = cpu.pop();
    cpu.unpack_flags(packed);
    let pcl = cpu.pop();
    let pch = cpu.pop();
    cpu.pc = u16::from_le_bytes([pcl, pch]);
}

/// Jump to subroutine. Pushes the address of the last byte of the JSR
/// itself; RTS undoes the off-by-one.
/// Function: (S)-:=PC-1 PC:={adr}
/// Flags:
pub fn jsr(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    cpu.pc = cpu.pc.wrapping_sub(1);
    let [pcl, pch] = cpu.pc.to_le_bytes();
    cpu.push(pch);
    cpu.push(pcl);
    cpu.pc = u16::from_le_bytes([ops[0], ops[1]]);
}

/// Return from Sub Routine
/// Function: PC:=+(S)+1
/// Flags:
pub fn rts(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    let pcl = cpu.pop();
    let pch = cpu.pop();
    cpu.pc = u16::from_le_bytes([pcl, pch]).wrapping_add(1);
}

/// Jump
/// Function: PC:={adr}
/// Flags:
pub fn jmp(cpu: &mut Cpu, mode: Mode, ops: &[u8], _pcp: u32) {
    if cpu.config.variant == Variant::Nmos6502 && mode == Mode::Indirect && ops[0] == 0xff {
        // The NMOS part never carries into the pointer's high byte: a
        // pointer at $xxFF reads its own high byte from $xx00.
        let low = cpu.read_byte(u16::from_le_bytes([0xff, ops[1]]));
        let high = cpu.read_byte(u16::from_le_bytes([0x00, ops[1]]));
        cpu.pc = u16::from_le_bytes([low, high]);
    } else {
        cpu.pc = cpu.resolve_jump_target(mode, ops);
    }
}

/// Bit test. The immediate form (added on the 65C02) only affects Z.
/// http://www.6502.org/tutorials/65c02opcodes.html
/// Function: N:=b7 V:=b6 Z:=A&{adr}
/// Flags: N V Z
pub fn bit(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.z = (cpu.a & operand.value == 0) as u8;
    if mode != Mode::Immediate {
        cpu.n = (operand.value & 0x80 != 0) as u8;
        cpu.v = (operand.value & 0x40 != 0) as u8;
    }
}

/// Clear Carry flag
/// Function: C:=0
/// Flags: C
pub fn clc(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.c = 0;
}

/// Set Carry flag
/// Function: C:=1
/// Flags: C
pub fn sec(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.c = 1;
}

/// Clear Decimal flag
/// Function: D:=0
/// Flags: D
pub fn cld(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.d = 0;
}

/// Set Decimal flag
/// Function: D:=1
/// Flags: D
pub fn sed(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.d = 1;
}

/// Clear Interrupt disable
/// Function: I:=0
/// Flags: I
pub fn cli(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.i = 0;
}

/// Set Interrupt disable
/// Function: I:=1
/// Flags: I
pub fn sei(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.i = 1;
}

/// Clear overflow flag
/// Function: V:=0
/// Flags: V
pub fn clv(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.v = 0;
}

/// No operation. The undocumented variants consume (and read) an operand,
/// and the absolute-X forms pay the page-cross penalty.
/// Function:
/// Flags:
pub fn nop(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    match mode {
        Mode::Implied | Mode::Implied2 => {}
        _ => {
            cpu.fetch_operand(mode, ops, pcp);
        }
    }
}

/// The NMOS halt. Every execution resource stops until a reset; execute
/// calls return zero cycles while halted.
/// Function: halts the CPU
/// Flags:
pub fn kil(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.state = RunState::Halted;
}

/// The CMOS stop. Same observable behaviour as KIL here: only a reset
/// restarts the CPU.
/// Function: halts the CPU
/// Flags:
pub fn stp(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.state = RunState::Halted;
}

/// Wait for interrupt. Parks the CPU until the host injects an IRQ or NMI.
/// Function: waits for an interrupt
/// Flags:
pub fn wai(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.state = RunState::WaitingForInterrupt;
}
