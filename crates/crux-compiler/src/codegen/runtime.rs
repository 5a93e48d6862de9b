//! Fixed runtime support: the string constants and the six built-in
//! routines every generated program carries.
//!
//! Built-ins that take an argument read it from `0($sp)`, where the caller
//! left it, and never build a frame of their own. Results come back in `$v0`.

use std::fmt::{self, Write};

const STRINGS: &[&str] = &[
    "data.newline:      .asciiz       \"\\n\"",
    "data.floatquery:   .asciiz       \"float?\"",
    "data.intquery:     .asciiz       \"int?\"",
    "data.trueString:   .asciiz       \"true\"",
    "data.falseString:  .asciiz       \"false\"",
];

const PRINT_BOOL: &[&str] = &[
    "func.printBool:",
    "lw $a0, 0($sp)",
    "beqz $a0, label.printBool.loadFalse",
    "la $a0, data.trueString",
    "j label.printBool.join",
    "label.printBool.loadFalse:",
    "la $a0, data.falseString",
    "label.printBool.join:",
    "li   $v0, 4",
    "syscall",
    "jr $ra",
];

const PRINT_FLOAT: &[&str] = &[
    "func.printFloat:",
    "l.s  $f12, 0($sp)",
    "li   $v0,  2",
    "syscall",
    "jr $ra",
];

const PRINT_INT: &[&str] = &[
    "func.printInt:",
    "lw   $a0, 0($sp)",
    "li   $v0, 1",
    "syscall",
    "jr $ra",
];

const PRINTLN: &[&str] = &[
    "func.println:",
    "la   $a0, data.newline",
    "li   $v0, 4",
    "syscall",
    "jr $ra",
];

const READ_FLOAT: &[&str] = &[
    "func.readFloat:",
    "la   $a0, data.floatquery",
    "li   $v0, 4",
    "syscall",
    "li   $v0, 6",
    "syscall",
    "mfc1 $v0, $f0",
    "jr $ra",
];

const READ_INT: &[&str] = &[
    "func.readInt:",
    "la   $a0, data.intquery",
    "li   $v0, 4",
    "syscall",
    "li   $v0, 5",
    "syscall",
    "jr $ra",
];

/// Routines in the order they are written out.
const ROUTINES: &[&[&str]] = &[
    PRINT_BOOL,
    PRINT_FLOAT,
    PRINT_INT,
    PRINTLN,
    READ_FLOAT,
    READ_INT,
];

/// Write the string constants used by the routines.
pub(super) fn write_strings(out: &mut impl Write) -> fmt::Result {
    write_lines(out, STRINGS)
}

/// Write the six built-in routines.
pub(super) fn write_routines(out: &mut impl Write) -> fmt::Result {
    for routine in ROUTINES {
        write_lines(out, routine)?;
    }
    Ok(())
}

fn write_lines(out: &mut impl Write, lines: &[&str]) -> fmt::Result {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
