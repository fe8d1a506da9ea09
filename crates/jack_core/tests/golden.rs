//! Golden-output tests driving the public `compile` entry point directly,
//! as a caller outside the crate would.

#[test]
fn if_else_emits_true_false_end_labels() {
    let source = r#"
        class Main {
            function void main() {
                if (false) {
                    do Sys.halt();
                } else {
                    do Sys.halt();
                }
                return;
            }
        }
    "#;
    let vm = jack_core::compile(source).unwrap();
    assert_eq!(
        vm,
        concat!(
            "function Main.main 0\n",
            "push constant 0\n",
            "if-goto IF_TRUE0\n",
            "goto IF_FALSE0\n",
            "label IF_TRUE0\n",
            "call Sys.halt 0\n",
            "pop temp 0\n",
            "goto IF_END0\n",
            "label IF_FALSE0\n",
            "call Sys.halt 0\n",
            "pop temp 0\n",
            "label IF_END0\n",
            "push constant 0\n",
            "return\n",
        )
    );
}

#[test]
fn if_without_else_only_emits_true_false_labels() {
    let source = r#"
        class Main {
            function void main() {
                if (true) {
                    return;
                }
                return;
            }
        }
    "#;
    let vm = jack_core::compile(source).unwrap();
    assert_eq!(
        vm,
        concat!(
            "function Main.main 0\n",
            "push constant 0\n",
            "not\n",
            "if-goto IF_TRUE0\n",
            "goto IF_FALSE0\n",
            "label IF_TRUE0\n",
            "push constant 0\n",
            "return\n",
            "label IF_FALSE0\n",
            "push constant 0\n",
            "return\n",
        )
    );
}

#[test]
fn unary_shift_operators_are_reachable_only_as_unary_ops() {
    let source = r#"
        class Main {
            function int main() {
                return ^1;
            }
        }
    "#;
    let vm = jack_core::compile(source).unwrap();
    assert_eq!(
        vm,
        concat!(
            "function Main.main 0\n",
            "push constant 1\n",
            "shiftleft\n",
            "return\n",
        )
    );
}

#[test]
fn nested_if_statements_get_distinct_label_ids() {
    let source = r#"
        class Main {
            function void main() {
                if (true) {
                    if (false) {
                        return;
                    }
                }
                return;
            }
        }
    "#;
    let vm = jack_core::compile(source).unwrap();
    assert!(vm.contains("IF_TRUE0"));
    assert!(vm.contains("IF_FALSE0"));
    assert!(vm.contains("IF_TRUE1"));
    assert!(vm.contains("IF_FALSE1"));
    assert!(!vm.contains("IF_END"), "neither if has an else branch");
}
