//! Assembly program buffer.
//!
//! [`Program`] collects the code and data segments of one generated program,
//! issues unique labels and tracks how many words the generated code has
//! pushed on the evaluation stack, so callers can check that every expression
//! gains exactly one word and every statement leaves the stack unchanged.
//!
//! # Example
//!
//! ```
//! use crux_compiler::codegen::Program;
//!
//! let mut program = Program::new();
//! program.emit("li $t0, 1");
//! program.push_int("$t0");
//! assert_eq!(program.depth(), 1);
//!
//! program.pop_int("$t1");
//! assert_eq!(program.depth(), 0);
//! ```

use std::fmt::{self, Write};

use crux_core::WORD_SIZE;

use super::labels::LabelRegistry;
use super::runtime;

/// Bytes holding the saved frame pointer and return address.
pub const FIXED_FRAME_SIZE: u32 = 8;

/// Code and data segments of a program under construction.
#[derive(Debug, Default)]
pub struct Program {
    code: Vec<String>,
    data: Vec<String>,
    labels: LabelRegistry,
    /// Words currently pushed by generated code.
    depth: usize,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================
    // Segments
    // =========================================

    /// Request a label that no other request returns.
    pub fn request_label(&mut self, name: &str) -> String {
        self.labels.request(name)
    }

    /// Append one instruction to the code segment.
    pub fn emit(&mut self, instruction: impl Into<String>) {
        self.code.push(instruction.into());
    }

    /// Place `label` at the current position.
    pub fn emit_label(&mut self, label: &str) {
        self.code.push(format!("{}:", label));
    }

    /// Append one line to the data segment.
    pub fn append_data(&mut self, line: impl Into<String>) {
        self.data.push(line.into());
    }

    /// Lines of the code segment, in order.
    pub fn code(&self) -> &[String] {
        &self.code
    }

    /// Lines of the data segment, in order.
    pub fn data(&self) -> &[String] {
        &self.data
    }

    // =========================================
    // Evaluation stack
    // =========================================

    /// Words currently on the evaluation stack.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Push an integer register.
    pub fn push_int(&mut self, reg: &str) {
        self.emit(format!("subu $sp, $sp, {}", WORD_SIZE));
        self.emit(format!("sw {}, 0($sp)", reg));
        self.depth += 1;
    }

    /// Push a single precision float register.
    pub fn push_float(&mut self, reg: &str) {
        self.emit(format!("subu $sp, $sp, {}", WORD_SIZE));
        self.emit(format!("swc1 {}, 0($sp)", reg));
        self.depth += 1;
    }

    /// Pop the top word into an integer register.
    pub fn pop_int(&mut self, reg: &str) {
        self.emit(format!("lw {}, 0($sp)", reg));
        self.emit(format!("addiu $sp, $sp, {}", WORD_SIZE));
        self.take_words(1);
    }

    /// Pop the top word into a float register.
    pub fn pop_float(&mut self, reg: &str) {
        self.emit(format!("lwc1 {}, 0($sp)", reg));
        self.emit(format!("addiu $sp, $sp, {}", WORD_SIZE));
        self.take_words(1);
    }

    /// Discard the top `words` words.
    pub fn drop_words(&mut self, words: usize) {
        if words == 0 {
            return;
        }
        self.emit(format!("addi $sp, $sp, {}", words as u32 * WORD_SIZE));
        self.take_words(words);
    }

    /// Jump to `label`, handing it the word on top of the stack.
    ///
    /// The word stays in memory; the code at `label` is responsible for
    /// popping it with [`Program::retrieve_value`].
    pub fn jump_with_value(&mut self, label: &str) {
        self.emit(format!("j {}", label));
        self.take_words(1);
    }

    /// Pop a word handed over by [`Program::jump_with_value`].
    pub fn retrieve_value(&mut self, reg: &str) {
        self.emit(format!("lw {}, 0($sp)", reg));
        self.emit(format!("addiu $sp, $sp, {}", WORD_SIZE));
    }

    fn take_words(&mut self, words: usize) {
        debug_assert!(self.depth >= words, "evaluation stack underflow");
        self.depth = self.depth.saturating_sub(words);
    }

    // =========================================
    // Frames
    // =========================================

    /// Save the caller's frame, establish `$fp` and reserve `locals` bytes.
    pub fn emit_prologue(&mut self, locals: u32) {
        self.emit(format!("subu $sp, $sp, {}", FIXED_FRAME_SIZE));
        self.emit("sw $fp, 0($sp)");
        self.emit("sw $ra, 4($sp)");
        self.emit(format!("addi $fp, $sp, {}", FIXED_FRAME_SIZE));
        self.emit(format!("subu $sp, $sp, {}", locals));
    }

    /// Undo [`Program::emit_prologue`] and return to the caller.
    pub fn emit_epilogue(&mut self, locals: u32) {
        self.emit(format!("addu $sp, $sp, {}", locals));
        self.emit("lw $ra, 4($sp)");
        self.emit("lw $fp, 0($sp)");
        self.emit(format!("addu $sp, $sp, {}", FIXED_FRAME_SIZE));
        self.emit("jr $ra");
    }

    /// Terminate the process.
    pub fn emit_exit(&mut self) {
        self.emit("li    $v0, 10");
        self.emit("syscall");
    }

    // =========================================
    // Output
    // =========================================

    /// Write the finished program: data segment, runtime routines, then the
    /// generated code.
    pub fn print(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, ".data                         # BEGIN Data Segment")?;
        for line in &self.data {
            writeln!(out, "{}", line)?;
        }
        runtime::write_strings(out)?;
        writeln!(out, "                              # END Data Segment")?;

        writeln!(out, ".text                         # BEGIN Code Segment")?;
        runtime::write_routines(out)?;

        writeln!(out, ".text                         # BEGIN Crux Program")?;
        for line in &self.code {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "                              # END Code Segment")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_track_depth() {
        let mut program = Program::new();
        program.push_int("$t0");
        program.push_float("$f0");
        assert_eq!(program.depth(), 2);

        program.pop_float("$f1");
        program.pop_int("$t1");
        assert_eq!(program.depth(), 0);
        assert_eq!(
            program.code(),
            [
                "subu $sp, $sp, 4",
                "sw $t0, 0($sp)",
                "subu $sp, $sp, 4",
                "swc1 $f0, 0($sp)",
                "lwc1 $f1, 0($sp)",
                "addiu $sp, $sp, 4",
                "lw $t1, 0($sp)",
                "addiu $sp, $sp, 4",
            ]
        );
    }

    #[test]
    fn drop_words_releases_bytes() {
        let mut program = Program::new();
        program.push_int("$t0");
        program.push_int("$t1");
        program.drop_words(2);
        program.drop_words(0);
        assert_eq!(program.depth(), 0);
        assert_eq!(program.code().last().map(String::as_str), Some("addi $sp, $sp, 8"));
    }

    #[test]
    fn value_handed_over_by_jump() {
        let mut program = Program::new();
        program.push_int("$t0");
        program.jump_with_value("func.f.end");
        assert_eq!(program.depth(), 0);

        program.emit_label("func.f.end");
        program.retrieve_value("$v0");
        assert_eq!(program.depth(), 0);
    }

    #[test]
    fn prologue_and_epilogue_mirror() {
        let mut program = Program::new();
        program.emit_prologue(12);
        program.emit_epilogue(12);
        assert_eq!(
            program.code(),
            [
                "subu $sp, $sp, 8",
                "sw $fp, 0($sp)",
                "sw $ra, 4($sp)",
                "addi $fp, $sp, 8",
                "subu $sp, $sp, 12",
                "addu $sp, $sp, 12",
                "lw $ra, 4($sp)",
                "lw $fp, 0($sp)",
                "addu $sp, $sp, 8",
                "jr $ra",
            ]
        );
    }

    #[test]
    fn print_orders_segments() {
        let mut program = Program::new();
        program.append_data("cruxdata.x: .space 4");
        program.emit_label("main");
        program.emit_exit();

        let text = program.to_string();
        let data = text.find("cruxdata.x: .space 4").unwrap();
        let strings = text.find("data.newline:").unwrap();
        let routines = text.find("func.printBool:").unwrap();
        let user = text.find("main:\n").unwrap();

        assert!(text.starts_with(".data"));
        assert!(data < strings && strings < routines && routines < user);
        assert!(text.ends_with("# END Code Segment\n"));
    }
}
