#![allow(non_snake_case)]

//! End-to-end runs of the generator against the Solver example.

use napigen::{
    Generator, GeneratorConfig, NativeValue, ReferenceBridge, SchemaInput, SourceFile, StructValue,
};
use serde_json::json;
use tempfile::TempDir;

const SOLVER_TS: &str = r#"
import { Struct, Export, AsyncExport } from "napigen";

@Struct()
export class InputData {
    name: string;
    value: number;
    numbers: number[];
}

@Struct()
export class OutputData {
    greeting: string;
    doubled: number;
    squared: number[];
}

export class Solver {
    @Export()
    static process(input: InputData): OutputData {
        return new OutputData();
    }

    @AsyncExport()
    static async heavy(input: InputData): Promise<OutputData> {
        return new OutputData();
    }
}
"#;

fn solver_input() -> SchemaInput {
    SchemaInput::Sources(vec![SourceFile::new("solver.ts", SOLVER_TS)])
}

fn snapshot(dir: &std::path::Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            (
                entry.file_name().to_string_lossy().into_owned(),
                std::fs::read(entry.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}

fn solve(input: NativeValue) -> Result<NativeValue, String> {
    let input = input.as_struct().ok_or("expected InputData")?;
    let name = input.get("name").and_then(NativeValue::as_str).unwrap_or_default();
    let value = input.get("value").and_then(NativeValue::as_f64).unwrap_or_default();
    let squared = input
        .get("numbers")
        .and_then(NativeValue::as_array)
        .unwrap_or_default()
        .iter()
        .filter_map(NativeValue::as_f64)
        .map(|n| NativeValue::Number(n * n))
        .collect();
    Ok(NativeValue::Struct(StructValue {
        name: "OutputData".into(),
        fields: vec![
            ("greeting".into(), NativeValue::text(format!("Hello, {name}!"))),
            ("doubled".into(), NativeValue::Number(value * 2.0)),
            ("squared".into(), NativeValue::Array(squared)),
        ],
    }))
}

#[test]
fn Generator___second_run___byte_identical_and_stub_untouched() {
    let temp = TempDir::new().unwrap();
    let generator = Generator::new(GeneratorConfig::default());

    let first = generator.generate(&solver_input(), temp.path()).unwrap();
    let stub = temp.path().join("implementation.cpp");
    let mut edited = std::fs::read_to_string(&stub).unwrap();
    edited.push_str("// hand-written change\n");
    std::fs::write(&stub, &edited).unwrap();
    let before = snapshot(temp.path());

    let second = generator.generate(&solver_input(), temp.path()).unwrap();

    assert_eq!(first.written.len(), 6);
    assert_eq!(second.written.len(), 5);
    assert_eq!(second.skipped, vec![stub.clone()]);
    assert_eq!(snapshot(temp.path()), before);
    assert_eq!(std::fs::read_to_string(&stub).unwrap(), edited);
}

#[test]
fn Generator___solver_scenario___emits_expected_surfaces() {
    let temp = TempDir::new().unwrap();
    Generator::new(GeneratorConfig::default())
        .generate(&solver_input(), temp.path())
        .unwrap();
    let read = |name: &str| std::fs::read_to_string(temp.path().join(name)).unwrap();

    let structs = read("generated_structs.hpp");
    assert!(structs.contains("std::vector<double> squared{};"));

    let api = read("generated_api.cpp");
    assert!(api.contains("OutputData result = Solver_process(input);"));
    assert!(api.contains("class Solver_heavy_AsyncWorker : public Napi::AsyncWorker {"));
    assert!(api.contains("exports.Set(\"Solver_process\""));

    let facade = read("index.ts");
    assert!(facade.contains("static process(input: InputData): OutputData {"));
    assert!(facade.contains("return addon.Solver_process(input);"));
    assert!(facade.contains("static async heavy(input: InputData): Promise<OutputData> {"));

    let stub = read("implementation.cpp");
    assert!(stub.contains("OutputData Solver_process(const InputData& input) {"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ReferenceBridge___solver_scenario___sync_and_async_agree() {
    let report = Generator::new(GeneratorConfig::default())
        .render(&solver_input())
        .unwrap();
    let bridge = ReferenceBridge::new(report.0.ir, tokio::runtime::Handle::current());
    bridge.implement("Solver_process", solve).unwrap();
    bridge.implement("Solver_heavy", solve).unwrap();
    let input = json!({"name": "World", "value": 21, "numbers": [1, 2, 3]});
    let expected = json!({
        "greeting": "Hello, World!",
        "doubled": 42.0,
        "squared": [1.0, 4.0, 9.0]
    });

    let sync = bridge.call("Solver_process", &[input.clone()]).unwrap();
    let promised = bridge
        .call_async("Solver_heavy", &[input])
        .wait()
        .await
        .unwrap();

    assert_eq!(sync, expected);
    assert_eq!(promised, expected);
}

#[test]
fn ReferenceBridge___solver_scenario___bad_argument_is_type_error() {
    let runtime = napigen::AsyncRuntime::with_defaults().unwrap();
    let (extraction, _) = Generator::new(GeneratorConfig::default())
        .render(&solver_input())
        .unwrap();
    let bridge = ReferenceBridge::new(extraction.ir, runtime.handle());
    bridge.implement("Solver_process", solve).unwrap();

    let err = bridge.call("Solver_process", &[json!(42)]).unwrap_err();

    assert!(err.is_type_error());
    assert_eq!(err.to_string(), "Solver_process: expected InputData");
}
