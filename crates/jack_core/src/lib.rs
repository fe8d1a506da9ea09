//! Tokenizer, two-scope symbol table, and recursive-descent compilation
//! engine for the Jack language, emitting the stack-machine VM instruction
//! text a separate translator turns into assembly.
//!
//! This crate stops at VM text. Argument parsing, file discovery, the
//! VM-to-assembly translator, and parse-tree pretty-printing all live
//! outside it, in the `jackc` driver binary or further downstream.

pub mod compiler;
pub mod lexer;
pub mod symbol_table;
pub mod vm;

pub use compiler::{CompilationEngine, CompileError, CompileResult, SemanticError, SyntaxError};
pub use lexer::LexError;
pub use symbol_table::SymbolTable;

/// Compiles one Jack source file's contents to VM instruction text.
pub fn compile(source: &str) -> CompileResult<String> {
    let tokens = lexer::lex(source)?;
    let buf = CompilationEngine::compile(tokens, Vec::new())?;
    Ok(String::from_utf8(buf).expect("VM writer only ever emits ASCII/UTF-8 text"))
}

/// Like [`compile`], but also returns the class's symbol table and name,
/// for `--dump-symbols` driver output.
pub fn compile_with_symbols(source: &str) -> CompileResult<(String, SymbolTable, String)> {
    let tokens = lexer::lex(source)?;
    let (buf, symbols, class_name) = CompilationEngine::compile_keep_symbols(tokens, Vec::new())?;
    let vm = String::from_utf8(buf).expect("VM writer only ever emits ASCII/UTF-8 text");
    Ok((vm, symbols, class_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_an_empty_void_method() {
        let source = r#"
            class Main {
                function void main() {
                    return;
                }
            }
        "#;
        let vm = compile(source).unwrap();
        assert_eq!(vm, "function Main.main 0\npush constant 0\nreturn\n");
    }

    #[test]
    fn compiles_a_constructor_with_one_field() {
        let source = r#"
            class Point {
                field int x;

                constructor Point new(int ax) {
                    let x = ax;
                    return this;
                }
            }
        "#;
        let vm = compile(source).unwrap();
        assert_eq!(
            vm,
            concat!(
                "function Point.new 0\n",
                "push constant 1\n",
                "call Memory.alloc 1\n",
                "pop pointer 0\n",
                "push argument 0\n",
                "pop this 0\n",
                "push pointer 0\n",
                "return\n",
            )
        );
    }

    #[test]
    fn array_store_computes_address_before_value() {
        let source = r#"
            class Main {
                function void main() {
                    var Array a;
                    let a[0] = 5;
                    return;
                }
            }
        "#;
        let vm = compile(source).unwrap();
        assert_eq!(
            vm,
            concat!(
                "function Main.main 1\n",
                "push constant 0\n",
                "push local 0\n",
                "add\n",
                "push constant 5\n",
                "pop temp 0\n",
                "pop pointer 1\n",
                "push temp 0\n",
                "pop that 0\n",
                "push constant 0\n",
                "return\n",
            )
        );
    }

    #[test]
    fn while_loop_emits_labels_and_negated_guard() {
        let source = r#"
            class Main {
                function void main() {
                    while (true) {
                        return;
                    }
                    return;
                }
            }
        "#;
        let vm = compile(source).unwrap();
        assert_eq!(
            vm,
            concat!(
                "function Main.main 0\n",
                "label WHILE_EXP0\n",
                "push constant 0\n",
                "not\n",
                "not\n",
                "if-goto WHILE_END0\n",
                "push constant 0\n",
                "return\n",
                "goto WHILE_EXP0\n",
                "label WHILE_END0\n",
                "push constant 0\n",
                "return\n",
            )
        );
    }

    #[test]
    fn string_literal_expands_to_new_and_appendchar_calls() {
        let source = r#"
            class Main {
                function void main() {
                    do Output.printString("hi");
                    return;
                }
            }
        "#;
        let vm = compile(source).unwrap();
        assert_eq!(
            vm,
            concat!(
                "function Main.main 0\n",
                "push constant 2\n",
                "call String.new 1\n",
                "push constant 104\n",
                "call String.appendChar 2\n",
                "push constant 105\n",
                "call String.appendChar 2\n",
                "call Output.printString 1\n",
                "pop temp 0\n",
                "push constant 0\n",
                "return\n",
            )
        );
    }

    #[test]
    fn method_call_on_a_typed_variable_pushes_receiver_first() {
        let source = r#"
            class Main {
                function void main() {
                    var Point p;
                    do p.dispose();
                    return;
                }
            }
        "#;
        let vm = compile(source).unwrap();
        assert_eq!(
            vm,
            concat!(
                "function Main.main 1\n",
                "push local 0\n",
                "call Point.dispose 1\n",
                "pop temp 0\n",
                "push constant 0\n",
                "return\n",
            )
        );
    }

    #[test]
    fn function_call_on_a_bare_class_name_has_no_receiver() {
        let source = r#"
            class Main {
                function void main() {
                    do Memory.deAlloc(0);
                    return;
                }
            }
        "#;
        let vm = compile(source).unwrap();
        assert_eq!(
            vm,
            concat!(
                "function Main.main 0\n",
                "push constant 0\n",
                "call Memory.deAlloc 1\n",
                "pop temp 0\n",
                "push constant 0\n",
                "return\n",
            )
        );
    }

    #[test]
    fn undeclared_variable_is_a_semantic_error() {
        let source = r#"
            class Main {
                function void main() {
                    let x = 1;
                    return;
                }
            }
        "#;
        assert!(matches!(compile(source), Err(CompileError::Semantic(_))));
    }

    #[test]
    fn malformed_class_header_is_a_syntax_error() {
        let source = "class { }";
        assert!(matches!(compile(source), Err(CompileError::Syntax(_))));
    }

    #[test]
    fn content_after_the_closing_brace_is_a_syntax_error() {
        let source = r#"
            class Main {
                function void main() {
                    return;
                }
            }
            garbage
        "#;
        assert!(matches!(compile(source), Err(CompileError::Syntax(_))));
    }
}
