// Clippy rules to disable.
#![allow(clippy::new_without_default)]
// Mnemonics are spelled the way the datasheets spell them.
#![allow(clippy::upper_case_acronyms)]

pub mod cpu_65xx;
pub mod memory;
pub mod opcodes;
pub mod trace;
pub mod variant;
