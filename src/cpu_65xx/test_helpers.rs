use crate::cpu_65xx::{Cpu, RunState};
use crate::memory::FlatMemory;
use crate::variant::{Config, Variant};

/// Programs are loaded and started here, away from the zero page and the
/// vectors.
pub const START: u16 = 0x4000;

pub const C: u8 = 0b0000_0001;
pub const Z: u8 = 0b0000_0010;
pub const I: u8 = 0b0000_0100;
pub const D: u8 = 0b0000_1000;
pub const B: u8 = 0b0001_0000;
pub const T: u8 = 0b0010_0000;
pub const V: u8 = 0b0100_0000;
pub const N: u8 = 0b1000_0000;

/// The packed status right after reset on the non-HuC variants: only the
/// synthetic T and B bits read as set. The HuC6280 comes up as 0x00.
pub const P: u8 = T | B;

/// Everything a test wants to look at once the CPU has stopped: the
/// register file, the packed status, and both memories.
pub struct Run {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub s: u8,
    pub pc: u16,
    pub p: u8,
    pub state: RunState,
    pub cycles: u32,
    pub zp: [u8; 512],
    pub mem: FlatMemory,
}

/// The opcode appended to programs so they stop the CPU when they fall off
/// the end: KIL on the NMOS part, STP on everything later.
pub fn halt_opcode(variant: Variant) -> u8 {
    match variant {
        Variant::Nmos6502 => 0x02,
        _ => 0xdb,
    }
}

/// Place `program` at `start` exactly as given, seed any extra memory, and
/// run until the CPU halts (or a large cycle backstop trips).
pub fn run_raw(config: Config, start: u16, program: &[u8], seed: &[(u16, u8)]) -> Run {
    let mut mem = FlatMemory::new();
    mem.load(start, program);
    for (addr, value) in seed {
        mem.set_u8(*addr, *value);
    }
    let mut zp = [0u8; 512];
    let mut cpu = Cpu::new(config, &mut mem, &mut zp);
    cpu.reset(start);
    let cycles = cpu.execute(100_000);

    let (a, x, y, s, pc, p, state) = (
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.s,
        cpu.pc,
        cpu.pack_flags(),
        cpu.state,
    );
    drop(cpu);
    Run {
        a,
        x,
        y,
        s,
        pc,
        p,
        state,
        cycles,
        zp,
        mem,
    }
}

/// Run `program` from the default start address with a halt opcode
/// appended, on the given configuration.
pub fn run_program_with(config: Config, program: &[u8]) -> Run {
    let mut bytes = program.to_vec();
    bytes.push(halt_opcode(config.variant));
    run_raw(config, START, &bytes, &[])
}

/// The common case: an NMOS 6502 with default configuration.
pub fn run_program(program: &[u8]) -> Run {
    run_program_with(Config::new(Variant::Nmos6502), program)
}

/// Run exactly `steps` instructions (executing with a one-cycle budget runs
/// a single instruction) and report the cycle cost of each one.
pub fn run_steps(
    config: Config,
    start: u16,
    program: &[u8],
    seed: &[(u16, u8)],
    steps: usize,
) -> (Run, Vec<u32>) {
    let mut mem = FlatMemory::new();
    mem.load(start, program);
    for (addr, value) in seed {
        mem.set_u8(*addr, *value);
    }
    let mut zp = [0u8; 512];
    let mut cpu = Cpu::new(config, &mut mem, &mut zp);
    cpu.reset(start);

    let mut per_step = Vec::with_capacity(steps);
    let mut total = 0;
    for _ in 0..steps {
        let cycles = cpu.execute(1);
        total += cycles;
        per_step.push(cycles);
    }

    let (a, x, y, s, pc, p, state) = (
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.s,
        cpu.pc,
        cpu.pack_flags(),
        cpu.state,
    );
    drop(cpu);
    (
        Run {
            a,
            x,
            y,
            s,
            pc,
            p,
            state,
            cycles: total,
            zp,
            mem,
        },
        per_step,
    )
}

pub fn assert_register_a(run: &Run, value: u8) {
    if run.a != value {
        panic!(
            "\nExpected register A to be {:#04x} ({:#010b}) but it was {:#04x} ({:#010b})",
            value, value, run.a, run.a
        );
    }
}

pub fn assert_register_x(run: &Run, value: u8) {
    if run.x != value {
        panic!(
            "\nExpected register X to be {:#04x} ({:#010b}) but it was {:#04x} ({:#010b})",
            value, value, run.x, run.x
        );
    }
}

pub fn assert_register_y(run: &Run, value: u8) {
    if run.y != value {
        panic!(
            "\nExpected register Y to be {:#04x} ({:#010b}) but it was {:#04x} ({:#010b})",
            value, value, run.y, run.y
        );
    }
}

pub fn assert_status(run: &Run, expected: u8) {
    if run.p == expected {
        return;
    }
    let mut result = String::new();
    for (mask, name) in [
        (N, "Negative"),
        (V, "Overflow"),
        (T, "Memory"),
        (B, "Break"),
        (D, "Decimal"),
        (I, "InterruptDisable"),
        (Z, "Zero"),
        (C, "Carry"),
    ] {
        let want = expected & mask != 0;
        let got = run.p & mask != 0;
        if want != got {
            result.push_str(&format!(
                "Expected flag {} to be {} but received {}\n",
                name, want, got
            ));
        }
    }
    panic!(
        "\nExpected cpu status {:#010b} to match {:#010b}\n{}",
        run.p, expected, result
    );
}

/// These test the CPU using a macro, in order to tersely test the system.
/// For instance:
///
///             TestName   Register Result
///             |          |     Status Register
///             |          |     |  Program bytes
///             |          |     |  |
/// register_a!(test_adc1, 0x33, P, [0xa9, 0x22, 0x69, 0x11]);
#[macro_export]
macro_rules! register_a {
    ($name:ident, $a:expr, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            let run = run_program(&$program);
            assert_register_a(&run, $a);
            assert_status(&run, $p);
        }
    };
}

#[macro_export]
macro_rules! register_x {
    ($name:ident, $x:expr, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            let run = run_program(&$program);
            assert_register_x(&run, $x);
            assert_status(&run, $p);
        }
    };
}

#[macro_export]
macro_rules! register_y {
    ($name:ident, $y:expr, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            let run = run_program(&$program);
            assert_register_y(&run, $y);
            assert_status(&run, $p);
        }
    };
}

#[macro_export]
macro_rules! status {
    ($name:ident, $p:expr, $program:expr) => {
        #[test]
        fn $name() {
            let run = run_program(&$program);
            assert_status(&run, $p);
        }
    };
}

#[macro_export]
macro_rules! zero_page {
    ($name:ident, [$addr:expr, $expected:expr], $program:expr) => {
        #[test]
        fn $name() {
            let run = run_program(&$program);
            let actual = run.zp[$addr as usize];
            if actual != $expected {
                panic!(
                    "\nExpected zero page address {:#x} to contain {:#04x} but it was {:#04x}",
                    $addr, $expected, actual
                );
            }
        }
    };
}
