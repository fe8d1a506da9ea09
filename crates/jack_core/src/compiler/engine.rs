//! The compilation engine itself: a recursive-descent walk over the token
//! stream that emits VM text as it goes, with no separate parse-tree stage.
//! This file holds construction, class-level structure, and the shared
//! `expect_*` helpers; [`super::statements`] and [`super::expressions`] add
//! the statement and expression grammars as further `impl` blocks on the
//! same type.

use std::io::Write;

use crate::lexer::{Keyword, Token, TokenCursor, TokenKind};
use crate::symbol_table::{Kind, SymbolTable, VarType};
use crate::vm::{Segment, VmWriter};

use super::error::{CompileError, CompileResult, SemanticError, SyntaxError};

pub struct CompilationEngine<W: Write> {
    pub(super) cursor: TokenCursor,
    pub(super) symbols: SymbolTable,
    pub(super) writer: VmWriter<W>,
    pub(super) class_name: String,
    pub(super) if_counter: u32,
    pub(super) while_counter: u32,
}

impl<W: Write> CompilationEngine<W> {
    fn new(tokens: Vec<Token>, out: W) -> CompileResult<Self> {
        let mut cursor = TokenCursor::new(tokens);
        if !cursor.has_more() {
            return Err(CompileError::Syntax(SyntaxError {
                line: 0,
                line_text: String::new(),
                expected: "keyword 'class'".into(),
                found: "end of input".into(),
            }));
        }
        cursor.advance();

        Ok(Self {
            cursor,
            symbols: SymbolTable::new(),
            writer: VmWriter::new(out),
            class_name: String::new(),
            if_counter: 0,
            while_counter: 0,
        })
    }

    /// Compiles one class from `tokens`, returning the sink it wrote VM
    /// text into.
    pub fn compile(tokens: Vec<Token>, out: W) -> CompileResult<W> {
        let mut engine = Self::new(tokens, out)?;
        engine.compile_class()?;
        engine.expect_end()?;
        Ok(engine.writer.into_inner())
    }

    /// Like [`Self::compile`], but also hands back the class's symbol
    /// table and name, for driver-level `--dump-symbols` output.
    pub fn compile_keep_symbols(
        tokens: Vec<Token>,
        out: W,
    ) -> CompileResult<(W, SymbolTable, String)> {
        let mut engine = Self::new(tokens, out)?;
        engine.compile_class()?;
        engine.expect_end()?;
        Ok((engine.writer.into_inner(), engine.symbols, engine.class_name))
    }

    fn describe_current(&self) -> String {
        match self.cursor.current() {
            None => "end of input".to_string(),
            Some(Token { kind, .. }) => match kind {
                TokenKind::Keyword(kw) => format!("keyword '{kw}'"),
                TokenKind::Symbol(c) => format!("symbol '{c}'"),
                TokenKind::IntegerConstant(n) => format!("integer constant '{n}'"),
                TokenKind::StringConstant(s) => format!("string constant \"{s}\""),
                TokenKind::Identifier(name) => format!("identifier '{name}'"),
            },
        }
    }

    pub(super) fn mismatch(&self, expected: impl Into<String>) -> CompileError {
        CompileError::Syntax(SyntaxError {
            line: self.cursor.current_line(),
            line_text: self.cursor.current_line_text(),
            expected: expected.into(),
            found: self.describe_current(),
        })
    }

    /// Loads the next pending token as current. If none remains, the
    /// cursor goes to its exhausted state (`current()` becomes `None`)
    /// rather than erroring — running out of tokens right after a
    /// successfully matched final token is exactly what a well-formed
    /// single-class file looks like. [`Self::expect_end`] is what catches
    /// a *premature* end, by checking the expectation before bumping.
    pub(super) fn bump(&mut self) {
        if self.cursor.has_more() {
            self.cursor.advance();
        } else {
            self.cursor.exhaust();
        }
    }

    /// Asserts nothing but whitespace remains after the class's closing
    /// `}`. A token still sitting as current here is trailing content.
    pub(super) fn expect_end(&mut self) -> CompileResult<()> {
        if self.cursor.current().is_some() {
            return Err(self.mismatch("end of input"));
        }
        Ok(())
    }

    pub(super) fn expect_keyword(&mut self, kw: Keyword) -> CompileResult<()> {
        match self.cursor.keyword() {
            Some(found) if found == kw => {
                self.bump();
                Ok(())
            }
            _ => Err(self.mismatch(format!("keyword '{kw}'"))),
        }
    }

    pub(super) fn expect_keyword_one_of(&mut self, kws: &[Keyword]) -> CompileResult<Keyword> {
        match self.cursor.keyword() {
            Some(found) if kws.contains(&found) => {
                self.bump();
                Ok(found)
            }
            _ => {
                let names: Vec<String> = kws.iter().map(|k| format!("'{k}'")).collect();
                Err(self.mismatch(format!("one of keywords {}", names.join(", "))))
            }
        }
    }

    pub(super) fn expect_symbol(&mut self, c: char) -> CompileResult<()> {
        match self.cursor.symbol() {
            Some(found) if found == c => {
                self.bump();
                Ok(())
            }
            _ => Err(self.mismatch(format!("symbol '{c}'"))),
        }
    }

    pub(super) fn expect_identifier(&mut self) -> CompileResult<String> {
        match self.cursor.identifier() {
            Some(name) => {
                let name = name.to_string();
                self.bump();
                Ok(name)
            }
            None => Err(self.mismatch("an identifier")),
        }
    }

    /// `'int' | 'char' | 'boolean' | className`.
    pub(super) fn expect_type(&mut self) -> CompileResult<VarType> {
        if let Some(kw) = self.cursor.keyword() {
            let prim = match kw {
                Keyword::Int => Some(VarType::Int),
                Keyword::Char => Some(VarType::Char),
                Keyword::Boolean => Some(VarType::Boolean),
                _ => None,
            };
            if let Some(var_type) = prim {
                self.bump();
                return Ok(var_type);
            }
        }
        if let Some(name) = self.cursor.identifier() {
            let var_type = VarType::Class(name.to_string());
            self.bump();
            return Ok(var_type);
        }
        Err(self.mismatch("a type ('int', 'char', 'boolean', or a class name)"))
    }

    pub(super) fn kind_to_segment(kind: Kind) -> Segment {
        match kind {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Argument => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }

    /// Resolves a bare name to the segment/index pair the symbol table
    /// assigned it. A name that was never `define`d is the one semantic
    /// error this grammar-only engine still has to catch: without a kind
    /// there is no segment to emit.
    pub(super) fn resolve_variable(&self, name: &str) -> CompileResult<(Segment, u16)> {
        match (self.symbols.kind_of(name), self.symbols.index_of(name)) {
            (Some(kind), Some(index)) => Ok((Self::kind_to_segment(kind), index)),
            _ => Err(CompileError::Semantic(SemanticError {
                line: self.cursor.current_line(),
                line_text: self.cursor.current_line_text(),
                message: format!("'{name}' is not declared in this scope"),
            })),
        }
    }

    pub(super) fn push_variable(&mut self, name: &str) -> CompileResult<()> {
        let (segment, index) = self.resolve_variable(name)?;
        self.writer.write_push(segment, index)?;
        Ok(())
    }

    pub(super) fn pop_variable(&mut self, name: &str) -> CompileResult<()> {
        let (segment, index) = self.resolve_variable(name)?;
        self.writer.write_pop(segment, index)?;
        Ok(())
    }

    fn compile_class(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Class)?;
        self.class_name = self.expect_identifier()?;
        self.expect_symbol('{')?;

        while matches!(self.cursor.keyword(), Some(Keyword::Static) | Some(Keyword::Field)) {
            self.compile_class_var_dec()?;
        }

        while matches!(
            self.cursor.keyword(),
            Some(Keyword::Constructor) | Some(Keyword::Function) | Some(Keyword::Method)
        ) {
            self.compile_subroutine()?;
        }

        self.expect_symbol('}')?;
        Ok(())
    }

    fn compile_class_var_dec(&mut self) -> CompileResult<()> {
        let kind = match self.expect_keyword_one_of(&[Keyword::Static, Keyword::Field])? {
            Keyword::Static => Kind::Static,
            Keyword::Field => Kind::Field,
            _ => unreachable!("expect_keyword_one_of only returns a requested keyword"),
        };
        let var_type = self.expect_type()?;

        let name = self.expect_identifier()?;
        self.symbols.define(name, var_type.clone(), kind);

        while self.cursor.symbol() == Some(',') {
            self.expect_symbol(',')?;
            let name = self.expect_identifier()?;
            self.symbols.define(name, var_type.clone(), kind);
        }

        self.expect_symbol(';')?;
        Ok(())
    }

    fn compile_subroutine(&mut self) -> CompileResult<()> {
        let subroutine_kind = self.expect_keyword_one_of(&[
            Keyword::Constructor,
            Keyword::Function,
            Keyword::Method,
        ])?;

        if self.cursor.keyword() == Some(Keyword::Void) {
            self.expect_keyword(Keyword::Void)?;
        } else {
            self.expect_type()?;
        }

        let name = self.expect_identifier()?;
        let qualified_name = format!("{}.{}", self.class_name, name);

        self.symbols.start_subroutine();
        self.if_counter = 0;
        self.while_counter = 0;

        if subroutine_kind == Keyword::Method {
            self.symbols.define(
                "this",
                VarType::Class(self.class_name.clone()),
                Kind::Argument,
            );
        }

        self.expect_symbol('(')?;
        self.compile_parameter_list()?;
        self.expect_symbol(')')?;

        self.compile_subroutine_body(&qualified_name, subroutine_kind)
    }

    fn compile_parameter_list(&mut self) -> CompileResult<()> {
        if self.cursor.symbol() == Some(')') {
            return Ok(());
        }

        let var_type = self.expect_type()?;
        let name = self.expect_identifier()?;
        self.symbols.define(name, var_type, Kind::Argument);

        while self.cursor.symbol() == Some(',') {
            self.expect_symbol(',')?;
            let var_type = self.expect_type()?;
            let name = self.expect_identifier()?;
            self.symbols.define(name, var_type, Kind::Argument);
        }

        Ok(())
    }

    fn compile_subroutine_body(
        &mut self,
        qualified_name: &str,
        subroutine_kind: Keyword,
    ) -> CompileResult<()> {
        self.expect_symbol('{')?;

        while self.cursor.keyword() == Some(Keyword::Var) {
            self.compile_var_dec()?;
        }

        let n_locals = self.symbols.var_count(Kind::Local);
        self.writer.write_function(qualified_name, n_locals)?;

        match subroutine_kind {
            Keyword::Constructor => {
                let n_fields = self.symbols.var_count(Kind::Field);
                self.writer.write_push(Segment::Constant, n_fields)?;
                self.writer.write_call("Memory.alloc", 1)?;
                self.writer.write_pop(Segment::Pointer, 0)?;
            }
            Keyword::Method => {
                self.writer.write_push(Segment::Argument, 0)?;
                self.writer.write_pop(Segment::Pointer, 0)?;
            }
            Keyword::Function => {}
            _ => unreachable!("subroutine_kind is one of constructor/function/method"),
        }

        self.compile_statements()?;
        self.expect_symbol('}')?;
        Ok(())
    }

    fn compile_var_dec(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Var)?;
        let var_type = self.expect_type()?;

        let name = self.expect_identifier()?;
        self.symbols.define(name, var_type.clone(), Kind::Local);

        while self.cursor.symbol() == Some(',') {
            self.expect_symbol(',')?;
            let name = self.expect_identifier()?;
            self.symbols.define(name, var_type.clone(), Kind::Local);
        }

        self.expect_symbol(';')?;
        Ok(())
    }
}
