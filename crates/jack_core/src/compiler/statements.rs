//! Statement grammar: `let`, `if`, `while`, `do`, `return`. Each compiles
//! directly to VM text; there is no intermediate statement tree.

use std::io::Write;

use crate::lexer::Keyword;
use crate::vm::{ArithmeticCommand, Segment};

use super::engine::CompilationEngine;
use super::error::CompileResult;

impl<W: Write> CompilationEngine<W> {
    pub(super) fn compile_statements(&mut self) -> CompileResult<()> {
        loop {
            match self.cursor.keyword() {
                Some(Keyword::Let) => self.compile_let()?,
                Some(Keyword::If) => self.compile_if()?,
                Some(Keyword::While) => self.compile_while()?,
                Some(Keyword::Do) => self.compile_do()?,
                Some(Keyword::Return) => self.compile_return()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn compile_let(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Let)?;
        let name = self.expect_identifier()?;

        if self.cursor.symbol() == Some('[') {
            self.expect_symbol('[')?;
            self.compile_expression()?;
            self.push_variable(&name)?;
            self.writer.write_arithmetic(ArithmeticCommand::Add)?;
            self.expect_symbol(']')?;

            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;

            self.writer.write_pop(Segment::Temp, 0)?;
            self.writer.write_pop(Segment::Pointer, 1)?;
            self.writer.write_push(Segment::Temp, 0)?;
            self.writer.write_pop(Segment::That, 0)?;
        } else {
            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;
            self.pop_variable(&name)?;
        }

        Ok(())
    }

    fn compile_if(&mut self) -> CompileResult<()> {
        let label_id = self.if_counter;
        self.if_counter += 1;
        let l_true = format!("IF_TRUE{label_id}");
        let l_false = format!("IF_FALSE{label_id}");
        let l_end = format!("IF_END{label_id}");

        self.expect_keyword(Keyword::If)?;
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        self.writer.write_if(&l_true)?;
        self.writer.write_goto(&l_false)?;
        self.writer.write_label(&l_true)?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        if self.cursor.keyword() == Some(Keyword::Else) {
            self.writer.write_goto(&l_end)?;
            self.writer.write_label(&l_false)?;

            self.expect_keyword(Keyword::Else)?;
            self.expect_symbol('{')?;
            self.compile_statements()?;
            self.expect_symbol('}')?;

            self.writer.write_label(&l_end)?;
        } else {
            self.writer.write_label(&l_false)?;
        }

        Ok(())
    }

    fn compile_while(&mut self) -> CompileResult<()> {
        let label_id = self.while_counter;
        self.while_counter += 1;
        let l_exp = format!("WHILE_EXP{label_id}");
        let l_end = format!("WHILE_END{label_id}");

        self.writer.write_label(&l_exp)?;

        self.expect_keyword(Keyword::While)?;
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        self.writer.write_arithmetic(ArithmeticCommand::Not)?;
        self.writer.write_if(&l_end)?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        self.writer.write_goto(&l_exp)?;
        self.writer.write_label(&l_end)?;

        Ok(())
    }

    fn compile_do(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Do)?;
        let name = self.expect_identifier()?;
        self.compile_subroutine_call(name)?;
        self.expect_symbol(';')?;

        // a `do` discards the subroutine's return value.
        self.writer.write_pop(Segment::Temp, 0)?;
        Ok(())
    }

    fn compile_return(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Return)?;

        if self.cursor.symbol() == Some(';') {
            self.writer.write_push(Segment::Constant, 0)?;
        } else {
            self.compile_expression()?;
        }

        self.expect_symbol(';')?;
        self.writer.write_return()?;
        Ok(())
    }
}
