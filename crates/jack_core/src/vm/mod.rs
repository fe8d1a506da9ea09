//! VM instruction vocabulary and a thin writer that serializes it as the
//! text format the downstream translator consumes (one instruction per
//! line, whitespace-separated fields).

use std::fmt::Display;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticCommand {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
    ShiftLeft,
    ShiftRight,
}

impl Display for ArithmeticCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArithmeticCommand::Add => "add",
            ArithmeticCommand::Sub => "sub",
            ArithmeticCommand::Neg => "neg",
            ArithmeticCommand::Eq => "eq",
            ArithmeticCommand::Gt => "gt",
            ArithmeticCommand::Lt => "lt",
            ArithmeticCommand::And => "and",
            ArithmeticCommand::Or => "or",
            ArithmeticCommand::Not => "not",
            ArithmeticCommand::ShiftLeft => "shiftleft",
            ArithmeticCommand::ShiftRight => "shiftright",
        };
        f.write_str(s)
    }
}

/// Writes VM text instructions to any `Write` sink. Each method corresponds
/// to one VM command family; callers never format instruction text by hand.
pub struct VmWriter<W: Write> {
    out: W,
}

impl<W: Write> VmWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_push(&mut self, segment: Segment, index: u16) -> io::Result<()> {
        writeln!(self.out, "push {segment} {index}")
    }

    pub fn write_pop(&mut self, segment: Segment, index: u16) -> io::Result<()> {
        writeln!(self.out, "pop {segment} {index}")
    }

    pub fn write_arithmetic(&mut self, command: ArithmeticCommand) -> io::Result<()> {
        writeln!(self.out, "{command}")
    }

    pub fn write_label(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "label {label}")
    }

    pub fn write_goto(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "goto {label}")
    }

    pub fn write_if(&mut self, label: &str) -> io::Result<()> {
        writeln!(self.out, "if-goto {label}")
    }

    pub fn write_call(&mut self, name: &str, n_args: u16) -> io::Result<()> {
        writeln!(self.out, "call {name} {n_args}")
    }

    pub fn write_function(&mut self, name: &str, n_locals: u16) -> io::Result<()> {
        writeln!(self.out, "function {name} {n_locals}")
    }

    pub fn write_return(&mut self) -> io::Result<()> {
        writeln!(self.out, "return")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut VmWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut w = VmWriter::new(Vec::new());
        f(&mut w).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn push_and_pop_render_segment_and_index() {
        assert_eq!(
            render(|w| w.write_push(Segment::Local, 2)),
            "push local 2\n"
        );
        assert_eq!(
            render(|w| w.write_pop(Segment::That, 0)),
            "pop that 0\n"
        );
    }

    #[test]
    fn arithmetic_renders_bare_mnemonic() {
        assert_eq!(render(|w| w.write_arithmetic(ArithmeticCommand::Neg)), "neg\n");
        assert_eq!(
            render(|w| w.write_arithmetic(ArithmeticCommand::ShiftLeft)),
            "shiftleft\n"
        );
    }

    #[test]
    fn branch_and_call_render_correctly() {
        assert_eq!(render(|w| w.write_label("WHILE_EXP0")), "label WHILE_EXP0\n");
        assert_eq!(render(|w| w.write_goto("WHILE_END0")), "goto WHILE_END0\n");
        assert_eq!(render(|w| w.write_if("IF_TRUE0")), "if-goto IF_TRUE0\n");
        assert_eq!(
            render(|w| w.write_call("Memory.alloc", 1)),
            "call Memory.alloc 1\n"
        );
        assert_eq!(
            render(|w| w.write_function("Main.main", 3)),
            "function Main.main 3\n"
        );
        assert_eq!(render(|w| w.write_return()), "return\n");
    }
}
