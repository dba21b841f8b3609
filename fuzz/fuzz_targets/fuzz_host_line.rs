//! Fuzz target: host console line assembly and interpretation.
//!
//! Feeds raw UART bytes into the line assembler and runs every completed
//! line through the parser, asserting the assembler's bounds and the
//! parser's totality.
//!
//! cargo fuzz run fuzz_host_line

#![no_main]

use cabinwatch::config::HOST_LINE_MAX;
use cabinwatch::host::{self, HostLineAssembler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut asm = HostLineAssembler::new();
    for &byte in data {
        if let Some(line) = asm.push(byte) {
            assert!(!line.is_empty(), "assembler must swallow blank lines");
            assert!(line.len() <= HOST_LINE_MAX, "line exceeds the UART bound");
            let _ = host::parse_line(&line);
        }
    }
});
