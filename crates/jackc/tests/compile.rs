use std::path::Path;

use test_utils::{check_compilation, check_failing_compilation};

#[test]
fn compiles_array_store_to_expected_vm_text() {
    check_compilation(
        Path::new("tests/fixtures/Main.jack"),
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
        ),
    )
    .unwrap();
}

#[test]
fn rejects_a_class_missing_its_name() {
    check_failing_compilation(Path::new("tests/fixtures/Broken.jack")).unwrap();
}
