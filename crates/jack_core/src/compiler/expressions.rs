//! Expression and term grammar, including the three-way subroutine-call
//! resolution (bound method on `this`, method on a known-typed variable,
//! or a static/constructor call on a class name).

use std::io::Write;

use crate::lexer::Keyword;
use crate::symbol_table::VarType;
use crate::vm::{ArithmeticCommand, Segment};

use super::engine::CompilationEngine;
use super::error::{CompileError, CompileResult, SemanticError};

const BINARY_OPS: [char; 9] = ['+', '-', '*', '/', '&', '|', '<', '>', '='];

impl<W: Write> CompilationEngine<W> {
    pub(super) fn compile_expression(&mut self) -> CompileResult<()> {
        self.compile_term()?;

        while let Some(op) = self.cursor.symbol() {
            if !BINARY_OPS.contains(&op) {
                break;
            }
            self.expect_symbol(op)?;
            self.compile_term()?;
            self.write_binary_op(op)?;
        }

        Ok(())
    }

    pub(super) fn compile_term(&mut self) -> CompileResult<()> {
        if let Some(n) = self.cursor.int_val() {
            self.bump();
            self.writer.write_push(Segment::Constant, n)?;
            return Ok(());
        }

        if let Some(s) = self.cursor.string_val().map(str::to_string) {
            self.bump();
            self.compile_string_constant(&s)?;
            return Ok(());
        }

        if let Some(kw) = self.cursor.keyword() {
            return self.compile_keyword_constant(kw);
        }

        if let Some(c) = self.cursor.symbol() {
            return self.compile_bracketed_or_unary_term(c);
        }

        if let Some(name) = self.cursor.identifier().map(str::to_string) {
            self.bump();
            return self.compile_name_term(name);
        }

        Err(self.mismatch("a term"))
    }

    fn compile_keyword_constant(&mut self, kw: Keyword) -> CompileResult<()> {
        match kw {
            Keyword::True => {
                self.bump();
                self.writer.write_push(Segment::Constant, 0)?;
                self.writer.write_arithmetic(ArithmeticCommand::Not)?;
            }
            Keyword::False | Keyword::Null => {
                self.bump();
                self.writer.write_push(Segment::Constant, 0)?;
            }
            Keyword::This => {
                self.bump();
                self.writer.write_push(Segment::Pointer, 0)?;
            }
            _ => return Err(self.mismatch("a term")),
        }
        Ok(())
    }

    fn compile_bracketed_or_unary_term(&mut self, c: char) -> CompileResult<()> {
        match c {
            '(' => {
                self.expect_symbol('(')?;
                self.compile_expression()?;
                self.expect_symbol(')')?;
            }
            '-' | '~' | '^' | '#' => {
                self.expect_symbol(c)?;
                self.compile_term()?;
                self.write_unary_op(c)?;
            }
            _ => return Err(self.mismatch("a term")),
        }
        Ok(())
    }

    /// `name` has already been consumed; the current token decides whether
    /// it names an array element, a subroutine call, or a plain variable.
    fn compile_name_term(&mut self, name: String) -> CompileResult<()> {
        match self.cursor.symbol() {
            Some('[') => {
                self.expect_symbol('[')?;
                self.compile_expression()?;
                self.push_variable(&name)?;
                self.writer.write_arithmetic(ArithmeticCommand::Add)?;
                self.expect_symbol(']')?;
                self.writer.write_pop(Segment::Pointer, 1)?;
                self.writer.write_push(Segment::That, 0)?;
            }
            Some('(') | Some('.') => {
                self.compile_subroutine_call(name)?;
            }
            _ => {
                self.push_variable(&name)?;
            }
        }
        Ok(())
    }

    fn compile_string_constant(&mut self, s: &str) -> CompileResult<()> {
        self.writer
            .write_push(Segment::Constant, s.chars().count() as u16)?;
        self.writer.write_call("String.new", 1)?;
        for ch in s.chars() {
            self.writer.write_push(Segment::Constant, ch as u16)?;
            self.writer.write_call("String.appendChar", 2)?;
        }
        Ok(())
    }

    pub(super) fn compile_expression_list(&mut self) -> CompileResult<u16> {
        if self.cursor.symbol() == Some(')') {
            return Ok(0);
        }

        let mut count: u16 = 0;
        self.compile_expression()?;
        count += 1;

        while self.cursor.symbol() == Some(',') {
            self.expect_symbol(',')?;
            self.compile_expression()?;
            count += 1;
        }

        Ok(count)
    }

    /// `first_name` has already been consumed. Resolves to exactly one of:
    /// a no-dot call on `this` (implicit receiver), a dot call on a
    /// variable whose declared type names the callee's class, or a dot
    /// call on a bare class name (static function or constructor).
    pub(super) fn compile_subroutine_call(&mut self, first_name: String) -> CompileResult<()> {
        if self.cursor.symbol() == Some('(') {
            self.expect_symbol('(')?;
            self.writer.write_push(Segment::Pointer, 0)?;
            let n_args = self.compile_expression_list()?;
            self.expect_symbol(')')?;
            self.writer
                .write_call(&format!("{}.{}", self.class_name, first_name), n_args + 1)?;
            return Ok(());
        }

        self.expect_symbol('.')?;
        let member_name = self.expect_identifier()?;
        self.expect_symbol('(')?;

        if let Some(var_type) = self.symbols.type_of(&first_name).cloned() {
            let class_name = match var_type {
                VarType::Class(name) => name,
                other => {
                    return Err(CompileError::Semantic(SemanticError {
                        line: self.cursor.current_line(),
                        line_text: self.cursor.current_line_text(),
                        message: format!("cannot call a method on a value of type '{other}'"),
                    }))
                }
            };

            self.push_variable(&first_name)?;
            let n_args = self.compile_expression_list()?;
            self.expect_symbol(')')?;
            self.writer
                .write_call(&format!("{class_name}.{member_name}"), n_args + 1)?;
        } else {
            let n_args = self.compile_expression_list()?;
            self.expect_symbol(')')?;
            self.writer
                .write_call(&format!("{first_name}.{member_name}"), n_args)?;
        }

        Ok(())
    }

    fn write_binary_op(&mut self, op: char) -> CompileResult<()> {
        match op {
            '+' => self.writer.write_arithmetic(ArithmeticCommand::Add)?,
            '-' => self.writer.write_arithmetic(ArithmeticCommand::Sub)?,
            '*' => self.writer.write_call("Math.multiply", 2)?,
            '/' => self.writer.write_call("Math.divide", 2)?,
            '&' => self.writer.write_arithmetic(ArithmeticCommand::And)?,
            '|' => self.writer.write_arithmetic(ArithmeticCommand::Or)?,
            '<' => self.writer.write_arithmetic(ArithmeticCommand::Lt)?,
            '>' => self.writer.write_arithmetic(ArithmeticCommand::Gt)?,
            '=' => self.writer.write_arithmetic(ArithmeticCommand::Eq)?,
            _ => unreachable!("BINARY_OPS is the only source of `op`"),
        }
        Ok(())
    }

    /// `-` negates, `~` bit-negates; `^`/`#` are the Hack VM's shift
    /// extensions, reachable only as unary operators.
    fn write_unary_op(&mut self, op: char) -> CompileResult<()> {
        match op {
            '-' => self.writer.write_arithmetic(ArithmeticCommand::Neg)?,
            '~' => self.writer.write_arithmetic(ArithmeticCommand::Not)?,
            '^' => self.writer.write_arithmetic(ArithmeticCommand::ShiftLeft)?,
            '#' => self.writer.write_arithmetic(ArithmeticCommand::ShiftRight)?,
            _ => unreachable!("caller only passes one of -~^#"),
        }
        Ok(())
    }
}
