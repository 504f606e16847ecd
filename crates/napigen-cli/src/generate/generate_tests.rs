#![allow(non_snake_case)]

use super::*;
use napigen::GenerateError;
use tempfile::TempDir;

const SOLVER_TS: &str = r#"
@Struct()
export class InputData {
    value: number;
}

export class Solver {
    @Export()
    static process(input: InputData): InputData {
        return input;
    }
}
"#;

fn schema_args(dir: &Path, source: &str) -> SchemaArgs {
    let path = dir.join("solver.ts");
    std::fs::write(&path, source).unwrap();
    SchemaArgs {
        inputs: vec![path.to_string_lossy().into_owned()],
        metadata: None,
        config: None,
    }
}

#[test]
fn run___valid_schema___writes_all_outputs() {
    let temp = TempDir::new().unwrap();
    let args = schema_args(temp.path(), SOLVER_TS);
    let out = temp.path().join("native");

    run(&args, &out).unwrap();

    for name in [
        "generated_structs.hpp",
        "generated_structs.cpp",
        "generated_api.h",
        "generated_api.cpp",
        "index.ts",
        "implementation.cpp",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
}

#[test]
fn run___rejected_schema___nothing_written() {
    let temp = TempDir::new().unwrap();
    let source = "export class Solver {\n    @Export()\n    process(x: number): number { return x; }\n}\n";
    let args = schema_args(temp.path(), source);
    let out = temp.path().join("native");

    let err = run(&args, &out).unwrap_err();

    assert!(err.downcast_ref::<GenerateError>().is_some());
    assert!(!out.join("generated_api.cpp").exists());
}
