use crate::memory::Memory;
use crate::opcodes::{table_for, Instruction, Mode, Op};
use crate::trace;
use crate::variant::{Config, Status, Variant};

mod opcodes_huc;
mod opcodes_illegal;
mod opcodes_jump;
mod opcodes_logical;
mod opcodes_move;

use opcodes_huc::*;
use opcodes_illegal::*;
use opcodes_jump::*;
use opcodes_logical::*;
use opcodes_move::*;

#[cfg(test)]
mod test_helpers;


/// What the dispatch loop is allowed to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// A KIL (NMOS) or STP (CMOS) was executed. Only a reset revives the
    /// CPU; execute calls return zero cycles until then.
    Halted,
    /// A WAI was executed. An IRQ or NMI resumes execution.
    WaitingForInterrupt,
}

/// Where a resolved operand lives, so a read-modify-write handler can put
/// its result back through the same path the value came in on.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    /// Immediate operands have no writable home.
    None,
    Accumulator,
    /// An offset into the zero page view.
    ZeroPage(u8),
    /// An effective address serviced by the host.
    Memory(u16),
}

/// A resolved operand: the byte the instruction works on plus the place a
/// result would be written back to.
#[derive(Debug, Clone, Copy)]
pub struct Operand {
    pub value: u8,
    pub target: Target,
}

/// This struct implements the 6502 CPU family: the NMOS original, the WDC
/// and Rockwell CMOS parts, and Hudson's HuC6280.
///
/// http://www.6502.org/
/// https://en.wikipedia.org/wiki/MOS_Technology_6502
///
/// The flags are deliberately held as individual 0/1 bytes rather than a
/// packed status register: almost every instruction touches one or two of
/// them, while the packed byte only exists on the stack. `pack_flags` and
/// `unpack_flags` convert at the push/pop boundary.
pub struct Cpu<'a> {
    /// The host's memory. Instruction fetches and every access outside the
    /// zero-page/stack view go through here.
    pub mem: &'a mut dyn Memory,
    /// Zero page plus the stack page, borrowed from the host for the
    /// lifetime of the CPU. Bytes 0-255 are page zero, 256-511 the stack.
    zp: &'a mut [u8; 512],
    pub config: Config,

    /// "PC" - Program counter.
    pub pc: u16,
    // "A" register - The accumulator. Typical results of operations are
    // stored here.
    pub a: u8,
    /// "X" register.
    pub x: u8,
    /// "Y" register.
    pub y: u8,
    /// "S" - Stack pointer: the low byte of an address in the 0x0100 page.
    /// The 6502 uses a descending stack (it grows downwards).
    pub s: u8,

    /// Negative.
    pub n: u8,
    /// Overflow.
    pub v: u8,
    /// Memory transfer, HuC6280 only; pinned to 1 everywhere else.
    pub t: u8,
    /// Break; pinned to 1 on everything but the HuC6280.
    pub b: u8,
    /// Decimal mode.
    pub d: u8,
    /// Interrupt disable.
    pub i: u8,
    /// Zero.
    pub z: u8,
    /// Carry.
    pub c: u8,

    pub state: RunState,
    /// Cycles accumulated by the current execute call.
    cycles: u32,
    /// Address of the opcode currently being executed. Branch offsets are
    /// applied relative to one past this, and the tracer prints it.
    insn_pc: u16,
    /// When set, receives one rendered line per instruction, before the
    /// instruction runs.
    pub trace: Option<Box<dyn FnMut(&str) + 'a>>,
}

impl<'a> Cpu<'a> {
    /// Build a CPU around a host memory and a 512-byte zero-page/stack
    /// region. State comes up zeroed with `S` at the top of the stack and
    /// the T/B flags at their variant-defined initial values; call `reset`
    /// to point it at code.
    pub fn new(config: Config, mem: &'a mut dyn Memory, zeropage: &'a mut [u8; 512]) -> Cpu<'a> {
        let mut cpu = Cpu {
            mem,
            zp: zeropage,
            config,
            pc: 0,
            a: 0,
            x: 0,
            y: 0,
            s: 0,
            n: 0,
            v: 0,
            t: 0,
            b: 0,
            d: 0,
            i: 0,
            z: 0,
            c: 0,
            state: RunState::Running,
            cycles: 0,
            insn_pc: 0,
            trace: None,
        };
        cpu.reset(0);
        cpu
    }

    /// Reinitialise every register and flag and start executing at `pc`.
    /// This is also the only way out of the Halted state.
    pub fn reset(&mut self, pc: u16) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        // Stack pointer - It grows down, so initialize it at the top.
        self.s = 0xff;
        self.n = 0;
        self.v = 0;
        self.t = self.config.variant.t_init();
        self.b = self.config.variant.b_init();
        self.d = 0;
        self.i = 0;
        self.z = 0;
        self.c = 0;
        self.state = RunState::Running;
        self.cycles = 0;
        self.insn_pc = pc;
        self.pc = pc;
    }

    /// Run instructions until at least `min_cycles` cycles have been
    /// accumulated, the CPU halts, or a WAI parks it. Returns the cycles
    /// actually spent, which can overshoot the request by one instruction.
    pub fn execute(&mut self, min_cycles: u32) -> u32 {
        self.cycles = 0;
        let table = table_for(self.config.variant);
        let fetch_len = self.config.variant.max_fetch();

        while self.state == RunState::Running {
            let mut fetched = [0u8; 8];
            self.insn_pc = self.pc;
            self.mem.read(&mut fetched[..fetch_len], self.pc);

            let op = table[fetched[0] as usize];
            if self.trace.is_some() {
                self.trace_instruction(op, &fetched);
            }

            self.pc = self.pc.wrapping_add(op.mode.instruction_len());
            self.cycles += op.cycles as u32;
            self.dispatch(op, fetched[0], &fetched[1..]);

            if self.cycles >= min_cycles {
                break;
            }
        }
        self.cycles
    }

    fn dispatch(&mut self, op: Op, opcode: u8, ops: &[u8]) {
        let pcp = if self.config.page_cross_penalty {
            op.pcp as u32
        } else {
            0
        };
        let mode = op.mode;
        // The per-bit Rockwell instructions encode the bit number in the
        // high nibble of the opcode.
        let zp_bit = (opcode >> 4) & 7;

        use Instruction::*;
        match op.instruction {
            ORA => ora(self, mode, ops, pcp),
            AND => and(self, mode, ops, pcp),
            EOR => eor(self, mode, ops, pcp),
            ADC => adc(self, mode, ops, pcp),
            SBC => sbc(self, mode, ops, pcp),
            CMP => cmp(self, mode, ops, pcp),
            CPX => cpx(self, mode, ops, pcp),
            CPY => cpy(self, mode, ops, pcp),
            DEC => dec(self, mode, ops, pcp),
            DEX => dex(self, mode, ops, pcp),
            DEY => dey(self, mode, ops, pcp),
            INC => inc(self, mode, ops, pcp),
            INX => inx(self, mode, ops, pcp),
            INY => iny(self, mode, ops, pcp),
            ASL => asl(self, mode, ops, pcp),
            ROL => rol(self, mode, ops, pcp),
            LSR => lsr(self, mode, ops, pcp),
            ROR => ror(self, mode, ops, pcp),
            BIT => bit(self, mode, ops, pcp),
            TRB => trb(self, mode, ops, pcp),
            TSB => tsb(self, mode, ops, pcp),
            LDA => lda(self, mode, ops, pcp),
            STA => sta(self, mode, ops, pcp),
            LDX => ldx(self, mode, ops, pcp),
            STX => stx(self, mode, ops, pcp),
            LDY => ldy(self, mode, ops, pcp),
            STY => sty(self, mode, ops, pcp),
            STZ => stz(self, mode, ops, pcp),
            TAX => tax(self, mode, ops, pcp),
            TXA => txa(self, mode, ops, pcp),
            TAY => tay(self, mode, ops, pcp),
            TYA => tya(self, mode, ops, pcp),
            TSX => tsx(self, mode, ops, pcp),
            TXS => txs(self, mode, ops, pcp),
            PLA => pla(self, mode, ops, pcp),
            PHA => pha(self, mode, ops, pcp),
            PLP => plp(self, mode, ops, pcp),
            PHP => php(self, mode, ops, pcp),
            PLX => plx(self, mode, ops, pcp),
            PHX => phx(self, mode, ops, pcp),
            PLY => ply(self, mode, ops, pcp),
            PHY => phy(self, mode, ops, pcp),
            BPL => bpl(self, mode, ops, pcp),
            BMI => bmi(self, mode, ops, pcp),
            BVC => bvc(self, mode, ops, pcp),
            BVS => bvs(self, mode, ops, pcp),
            BCC => bcc(self, mode, ops, pcp),
            BCS => bcs(self, mode, ops, pcp),
            BNE => bne(self, mode, ops, pcp),
            BEQ => beq(self, mode, ops, pcp),
            BRA => bra(self, mode, ops, pcp),
            BRK => brk(self, mode, ops, pcp),
            RTI => rti(self, mode, ops, pcp),
            JSR => jsr(self, mode, ops, pcp),
            BSR => bsr(self, mode, ops, pcp),
            RTS => rts(self, mode, ops, pcp),
            JMP => jmp(self, mode, ops, pcp),
            CLC => clc(self, mode, ops, pcp),
            SEC => sec(self, mode, ops, pcp),
            CLD => cld(self, mode, ops, pcp),
            SED => sed(self, mode, ops, pcp),
            CLI => cli(self, mode, ops, pcp),
            SEI => sei(self, mode, ops, pcp),
            CLV => clv(self, mode, ops, pcp),
            NOP => nop(self, mode, ops, pcp),
            KIL => kil(self, mode, ops, pcp),
            STP => stp(self, mode, ops, pcp),
            WAI => wai(self, mode, ops, pcp),
            SLO => slo(self, mode, ops, pcp),
            RLA => rla(self, mode, ops, pcp),
            SRE => sre(self, mode, ops, pcp),
            RRA => rra(self, mode, ops, pcp),
            AXS => axs(self, mode, ops, pcp),
            LAX => lax(self, mode, ops, pcp),
            DCP => dcp(self, mode, ops, pcp),
            ISC => isc(self, mode, ops, pcp),
            ANC => anc(self, mode, ops, pcp),
            ALR => alr(self, mode, ops, pcp),
            ARR => arr(self, mode, ops, pcp),
            XAA => xaa(self, mode, ops, pcp),
            LXA => lxa(self, mode, ops, pcp),
            SBX => sbx(self, mode, ops, pcp),
            AHX => ahx(self, mode, ops, pcp),
            SHY => shy(self, mode, ops, pcp),
            SHX => shx(self, mode, ops, pcp),
            TAS => tas(self, mode, ops, pcp),
            LAS => las(self, mode, ops, pcp),
            BBR => bbr(self, zp_bit, ops, pcp),
            BBS => bbs(self, zp_bit, ops, pcp),
            RMB => rmb(self, zp_bit, ops, pcp),
            SMB => smb(self, zp_bit, ops, pcp),
            SAX => sax(self, mode, ops, pcp),
            SAY => say(self, mode, ops, pcp),
            SXY => sxy(self, mode, ops, pcp),
            SET => set(self, mode, ops, pcp),
            TST => tst(self, mode, ops, pcp),
            CLA => cla(self, mode, ops, pcp),
            CLX => clx(self, mode, ops, pcp),
            CLY => cly(self, mode, ops, pcp),
            TII => tii(self, mode, ops, pcp),
            TDD => tdd(self, mode, ops, pcp),
            TIN => tin(self, mode, ops, pcp),
            TIA => tia(self, mode, ops, pcp),
            TAI => tai(self, mode, ops, pcp),
        }
    }

    /// Inject a maskable interrupt between instructions. Returns whether it
    /// was taken. A parked (WAI) CPU wakes up either way; with I set the
    /// interrupt itself is ignored, which matches how WAI falls through on
    /// the CMOS parts.
    pub fn irq(&mut self) -> bool {
        if self.state == RunState::Halted {
            return false;
        }
        if self.state == RunState::WaitingForInterrupt {
            self.state = RunState::Running;
        }
        if self.i != 0 {
            return false;
        }
        self.interrupt(self.config.variant.irq_brk_vector());
        true
    }

    /// Inject a non-maskable interrupt between instructions.
    pub fn nmi(&mut self) {
        if self.state == RunState::Halted {
            return;
        }
        self.state = RunState::Running;
        self.interrupt(self.config.variant.nmi_vector());
    }

    /// The common entry sequence for hardware interrupts. Unlike BRK the
    /// pushed status has B clear, and the PC is not bumped past a signature
    /// byte.
    fn interrupt(&mut self, vector: u16) {
        let [pcl, pch] = self.pc.to_le_bytes();
        self.push(pch);
        self.push(pcl);
        let flags = self.pack_flags() & !Status::BREAK.bits();
        self.push(flags);
        self.pc = self.read_word(vector);
        self.t = self.config.variant.t_init();
        self.i = 1;
        if !self
            .config
            .variant
            .interrupt_preserved()
            .contains(Status::DECIMAL)
        {
            self.d = 0;
        }
    }

    /// These flags are commonly set together.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.z = (value == 0) as u8;
        self.n = (value & 0x80 != 0) as u8;
    }

    /// Build the packed status byte, used when flags go onto the stack.
    pub fn pack_flags(&self) -> u8 {
        (self.n << 7)
            | (self.v << 6)
            | (self.t << 5)
            | (self.b << 4)
            | (self.d << 3)
            | (self.i << 2)
            | (self.z << 1)
            | self.c
    }

    /// Scatter a packed status byte back into the flag bytes. On anything
    /// but the HuC6280 there is no stored B or T bit in the register file;
    /// the packed byte only materialises them on pushes, so popping always
    /// reads them back as 1.
    pub fn unpack_flags(&mut self, packed: u8) {
        let flags = Status::from_bits_truncate(packed);
        self.n = flags.contains(Status::NEGATIVE) as u8;
        self.v = flags.contains(Status::OVERFLOW) as u8;
        if self.config.variant == Variant::HuC6280 {
            self.t = flags.contains(Status::MEMORY) as u8;
            self.b = flags.contains(Status::BREAK) as u8;
        } else {
            self.t = 1;
            self.b = 1;
        }
        self.d = flags.contains(Status::DECIMAL) as u8;
        self.i = flags.contains(Status::INTERRUPT_DISABLE) as u8;
        self.z = flags.contains(Status::ZERO) as u8;
        self.c = flags.contains(Status::CARRY) as u8;
    }

    /// Direct access to the zero-page/stack view, for hosts that want to
    /// inspect or seed it between execute calls.
    pub fn zero_page_mut(&mut self) -> &mut [u8; 512] {
        &mut *self.zp
    }

    pub(crate) fn zp_read(&self, offset: u8) -> u8 {
        self.zp[offset as usize]
    }

    pub(crate) fn zp_write(&mut self, offset: u8, value: u8) {
        self.zp[offset as usize] = value;
    }

    /// Fetch a 16-bit pointer from the zero page. The second byte wraps
    /// around within the page when `offset` is 0xff.
    pub(crate) fn zp_pointer(&self, offset: u8) -> u16 {
        let low = self.zp[offset as usize];
        let high = self.zp[offset.wrapping_add(1) as usize];
        u16::from_le_bytes([low, high])
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.zp[0x100 + self.s as usize] = value;
        self.s = self.s.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        self.zp[0x100 + self.s as usize]
    }

    pub(crate) fn read_byte(&mut self, addr: u16) -> u8 {
        let mut buffer = [0u8; 1];
        self.mem.read(&mut buffer, addr);
        buffer[0]
    }

    pub(crate) fn read_word(&mut self, addr: u16) -> u16 {
        let mut buffer = [0u8; 2];
        self.mem.read(&mut buffer, addr);
        u16::from_le_bytes(buffer)
    }

    pub(crate) fn write_byte(&mut self, addr: u16, value: u8) {
        self.mem.write(&[value], addr);
    }

    /// Charge the one-cycle penalty when indexing walks off the operand's
    /// page. `pcp` is already zero when the opcode or the configuration
    /// says the penalty does not apply.
    fn index_penalty(&mut self, base: u16, index: u8, pcp: u32) {
        if pcp != 0 && (base.wrapping_add(index as u16) ^ base) > 0xff {
            self.cycles += pcp;
        }
    }

    pub(crate) fn add_cycles(&mut self, cycles: u32) {
        self.cycles += cycles;
    }

    /// Resolve the operand for the current instruction: its value, and
    /// where a result would be written back to. `ops` is the slice of
    /// bytes following the opcode in the fetch buffer.
    pub(crate) fn fetch_operand(&mut self, mode: Mode, ops: &[u8], pcp: u32) -> Operand {
        match mode {
            Mode::Immediate => Operand {
                value: ops[0],
                target: Target::None,
            },
            Mode::RegisterA => Operand {
                value: self.a,
                target: Target::Accumulator,
            },
            Mode::ZeroPage => self.zero_page_operand(ops[0]),
            Mode::ZeroPageX => self.zero_page_operand(ops[0].wrapping_add(self.x)),
            Mode::ZeroPageY => self.zero_page_operand(ops[0].wrapping_add(self.y)),
            Mode::ZeroPageIndirect => {
                let addr = self.zp_pointer(ops[0]);
                self.memory_operand(addr)
            }
            Mode::IndirectX => {
                let addr = self.zp_pointer(ops[0].wrapping_add(self.x));
                self.memory_operand(addr)
            }
            Mode::IndirectY => {
                let base = self.zp_pointer(ops[0]);
                self.index_penalty(base, self.y, pcp);
                let addr = base.wrapping_add(self.y as u16);
                self.memory_operand(addr)
            }
            Mode::Absolute => {
                let addr = u16::from_le_bytes([ops[0], ops[1]]);
                self.memory_operand(addr)
            }
            Mode::AbsoluteX => {
                let base = u16::from_le_bytes([ops[0], ops[1]]);
                self.index_penalty(base, self.x, pcp);
                let addr = base.wrapping_add(self.x as u16);
                self.memory_operand(addr)
            }
            Mode::AbsoluteY => {
                let base = u16::from_le_bytes([ops[0], ops[1]]);
                self.index_penalty(base, self.y, pcp);
                let addr = base.wrapping_add(self.y as u16);
                self.memory_operand(addr)
            }
            // The HuC TST modes: the destination operand follows the
            // leading immediate, which the handler reads on its own.
            Mode::ImmediateZeroPage => self.zero_page_operand(ops[1]),
            Mode::ImmediateZeroPageX => self.zero_page_operand(ops[1].wrapping_add(self.x)),
            Mode::ImmediateAbsolute => {
                let addr = u16::from_le_bytes([ops[1], ops[2]]);
                self.memory_operand(addr)
            }
            Mode::ImmediateAbsoluteX => {
                let addr = u16::from_le_bytes([ops[1], ops[2]]).wrapping_add(self.x as u16);
                self.memory_operand(addr)
            }
            _ => unreachable!("no data operand for addressing mode {:?}", mode),
        }
    }

    fn zero_page_operand(&mut self, offset: u8) -> Operand {
        Operand {
            value: self.zp_read(offset),
            target: Target::ZeroPage(offset),
        }
    }

    fn memory_operand(&mut self, addr: u16) -> Operand {
        Operand {
            value: self.read_byte(addr),
            target: Target::Memory(addr),
        }
    }

    /// The write half of the resolver: put `value` wherever the operand
    /// came from.
    pub(crate) fn store_operand(&mut self, target: Target, value: u8) {
        match target {
            Target::Accumulator => self.a = value,
            Target::ZeroPage(offset) => self.zp_write(offset, value),
            Target::Memory(addr) => self.write_byte(addr, value),
            Target::None => unreachable!("store to an immediate operand"),
        }
    }

    /// Resolve the target of a JMP. The NMOS page-wrap bug is handled by
    /// the JMP handler itself before it gets here.
    pub(crate) fn resolve_jump_target(&mut self, mode: Mode, ops: &[u8]) -> u16 {
        match mode {
            Mode::Absolute => u16::from_le_bytes([ops[0], ops[1]]),
            Mode::Indirect => {
                let pointer = u16::from_le_bytes([ops[0], ops[1]]);
                self.read_word(pointer)
            }
            Mode::AbsoluteIndexedIndirect => {
                let pointer =
                    u16::from_le_bytes([ops[0], ops[1]]).wrapping_add(self.x as u16);
                self.read_word(pointer)
            }
            _ => unreachable!("JMP with addressing mode {:?}", mode),
        }
    }

    pub(crate) fn branch_base(&self) -> u16 {
        self.insn_pc.wrapping_add(1)
    }

    fn trace_instruction(&mut self, op: Op, fetched: &[u8; 8]) {
        let mut flags = String::with_capacity(8);
        for (bit, letter) in [
            (self.n, 'n'),
            (self.v, 'v'),
            (self.t, 't'),
            (self.b, 'b'),
            (self.d, 'd'),
            (self.i, 'i'),
            (self.z, 'z'),
            (self.c, 'c'),
        ] {
            flags.push(if bit != 0 {
                letter.to_ascii_uppercase()
            } else {
                letter
            });
        }
        let line = format!(
            "PC:{:04x} S:{:02x} A:{:02x} X:{:02x} Y:{:02x} {} O:{:02x} {:?}{}",
            self.insn_pc,
            self.s,
            self.a,
            self.x,
            self.y,
            flags,
            fetched[0],
            op.instruction,
            trace::operand_string(op.mode, &fetched[1..]),
        );
        if let Some(sink) = self.trace.as_mut() {
            sink(&line);
        }
    }
}
