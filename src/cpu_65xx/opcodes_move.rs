use crate::cpu_65xx::*;

/// Load the value into register A
/// Function: A:={adr}
/// Flags: N Z
pub fn lda(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.a = operand.value;
    cpu.set_zn(cpu.a);
}

/// Store register A at address
/// Function: {adr}:=A
/// Flags:
pub fn sta(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.store_operand(operand.target, cpu.a);
}

/// Load register X with the value
/// Function: X:={adr}
/// Flags: N Z
pub fn ldx(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.x = operand.value;
    cpu.set_zn(cpu.x);
}

/// Store register X at address
/// Function: {adr}:=X
/// Flags:
pub fn stx(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.store_operand(operand.target, cpu.x);
}

/// Load register Y with the value
/// Function: Y:={adr}
/// Flags: N Z
pub fn ldy(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.y = operand.value;
    cpu.set_zn(cpu.y);
}

/// Store register Y at address
/// Function: {adr}:=Y
/// Flags:
pub fn sty(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.store_operand(operand.target, cpu.y);
}

/// Store zero, a CMOS addition.
/// Function: {adr}:=0
/// Flags:
pub fn stz(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.store_operand(operand.target, 0);
}

/// Transfer A to X
/// Function: X:=A
/// Flags: N Z
pub fn tax(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.x = cpu.a;
    cpu.set_zn(cpu.x);
}

/// Transfer X to A
/// Function: A:=X
/// Flags: N Z
pub fn txa(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.a = cpu.x;
    cpu.set_zn(cpu.a);
}

/// Transfer A to Y
/// Function: Y:=A
/// Flags: N Z
pub fn tay(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.y = cpu.a;
    cpu.set_zn(cpu.y);
}

/// Transfer Y to A
/// Function: A:=Y
/// Flags: N Z
pub fn tya(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.a = cpu.y;
    cpu.set_zn(cpu.a);
}

/// Transfer S to X
/// Function: X:=S
/// Flags: N Z
pub fn tsx(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.x = cpu.s;
    cpu.set_zn(cpu.x);
}

/// Transfer X to S. The only transfer that leaves the flags alone.
/// Function: S:=X
/// Flags:
pub fn txs(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.s = cpu.x;
}

/// Pull A
/// Function: A:=+(S)
/// Flags: N Z
pub fn pla(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.a = cpu.pop();
    cpu.set_zn(cpu.a);
}

/// Push A to the stack
/// Function: (S)-:=A
/// Flags:
pub fn pha(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.push(cpu.a);
}

/// Pull the status register from the stack, through the variant's mask so
/// the synthetic T and B bits keep reading as 1 outside the HuC6280.
/// Function: P:=+(S)
/// Flags: N V T B D I Z C (as masked)
pub fn plp(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    let packed = cpu.pop() & cpu.config.variant.plp_mask().bits();
    cpu.unpack_flags(packed);
}

/// Push the status register to the stack with the B bit forced on, as PHP
/// always does.
/// Function: (S)-:=P
/// Flags:
pub fn php(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    let packed = cpu.pack_flags() | Status::BREAK.bits();
    cpu.push(packed);
}

/// Pull X (CMOS)
/// Function: X:=+(S)
/// Flags: N Z
pub fn plx(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.x = cpu.pop();
    cpu.set_zn(cpu.x);
}

/// Push X (CMOS)
/// Function: (S)-:=X
/// Flags:
pub fn phx(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.push(cpu.x);
}

/// Pull Y (CMOS)
/// Function: Y:=+(S)
/// Flags: N Z
pub fn ply(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.y = cpu.pop();
    cpu.set_zn(cpu.y);
}

/// Push Y (CMOS)
/// Function: (S)-:=Y
/// Flags:
pub fn phy(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.push(cpu.y);
}
