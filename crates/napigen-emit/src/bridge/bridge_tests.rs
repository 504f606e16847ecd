#![allow(non_snake_case)]

use super::*;
use napigen_core::{FieldSchema, ScalarKind, StructSchema};
use test_case::test_case;

fn input() -> SemanticType {
    SemanticType::Struct("InputData".to_string())
}

fn output() -> SemanticType {
    SemanticType::Struct("OutputData".to_string())
}

fn solver_ir() -> SchemaIr {
    let structs = vec![
        StructSchema::new("InputData")
            .with_field(FieldSchema::new("value", SemanticType::scalar(ScalarKind::F64))),
        StructSchema::new("OutputData")
            .with_field(FieldSchema::new("doubled", SemanticType::scalar(ScalarKind::F64))),
    ];
    let exports = vec![
        ExportSchema::method("Solver", "process")
            .with_param("input", input())
            .returning(output()),
        ExportSchema::method("Solver", "heavy")
            .with_param("input", input())
            .returning(output())
            .asynchronous(),
    ];
    SchemaIr::new(structs, exports)
}

fn renderer() -> BridgeRenderer {
    BridgeRenderer::new(TypeMapper::new(), NameSanitizer::new())
}

#[test]
fn BridgeRenderer___render_header___declares_extern_contracts() {
    let header = renderer()
        .render_header(&solver_ir(), "generated_structs.hpp")
        .unwrap();

    assert!(header.contains("#include \"generated_structs.hpp\""));
    assert!(header.contains("extern OutputData Solver_process(const InputData& input);"));
    assert!(header.contains("extern OutputData Solver_heavy(const InputData& input);"));
    assert!(header.contains("Napi::Object InitGeneratedAPI(Napi::Env env, Napi::Object exports);"));
}

#[test]
fn BridgeRenderer___sync_wrapper___validates_converts_and_calls() {
    let source = renderer()
        .render_source(&solver_ir(), "generated_api.h", "addon")
        .unwrap();

    assert!(source.contains("static Napi::Value Solver_process_wrapper(const Napi::CallbackInfo& info) {"));
    assert!(source.contains("if (info.Length() < 1 || !info[0].IsObject()) {"));
    assert!(source.contains("Napi::TypeError::New(env, \"Solver_process: expected InputData\")"));
    assert!(source.contains("InputData input = InputData::FromNapi(info[0].As<Napi::Object>());"));
    assert!(source.contains("OutputData result = Solver_process(input);"));
    assert!(source.contains("return result.ToNapi(env);"));
    assert!(source.contains("catch (const Napi::Error& e) {"));
}

#[test]
fn BridgeRenderer___async_export___emits_worker_with_deferred() {
    let source = renderer()
        .render_source(&solver_ir(), "generated_api.h", "addon")
        .unwrap();

    assert!(source.contains("class Solver_heavy_AsyncWorker : public Napi::AsyncWorker {"));
    assert!(source.contains("Solver_heavy_AsyncWorker(Napi::Env env, InputData input)"));
    assert!(source.contains("deferred_(Napi::Promise::Deferred::New(env)) {}"));
    assert!(source.contains("result_ = Solver_heavy(input_);"));
    assert!(source.contains("deferred_.Resolve(result_.ToNapi(env));"));
    assert!(source.contains("deferred_.Reject(error.Value());"));
    assert!(source.contains("OutputData result_{};"));
    assert!(source.contains("auto* worker = new Solver_heavy_AsyncWorker(env, std::move(input));"));
    assert!(source.contains("worker->Queue();"));
    assert!(!source.contains("OutputData result = Solver_heavy("));
}

#[test]
fn BridgeRenderer___async_invalid_argument___returns_rejected_promise() {
    let source = renderer()
        .render_source(&solver_ir(), "generated_api.h", "addon")
        .unwrap();
    let wrapper = source
        .split("static Napi::Value Solver_heavy_wrapper")
        .nth(1)
        .unwrap();

    assert!(wrapper.contains("rejected.Reject(Napi::TypeError::New(env, \"Solver_heavy: expected InputData\").Value());"));
    assert!(wrapper.contains("return rejected.Promise();"));
    assert!(!wrapper.contains("ThrowAsJavaScriptException"));
}

#[test]
fn BridgeRenderer___render_source___registers_every_export() {
    let source = renderer()
        .render_source(&solver_ir(), "generated_api.h", "solver")
        .unwrap();

    assert!(source.contains("exports.Set(\"Solver_process\", Napi::Function::New(env, Solver_process_wrapper));"));
    assert!(source.contains("exports.Set(\"Solver_heavy\", Napi::Function::New(env, Solver_heavy_wrapper));"));
    assert!(source.trim_end().ends_with("NODE_API_MODULE(solver, Init)"));
}

#[test]
fn BridgeRenderer___void_without_parameter___skips_validation() {
    let ir = SchemaIr::new(vec![], vec![ExportSchema::method("Engine", "reset")]);
    let r = renderer();
    let header = r.render_header(&ir, "s.hpp").unwrap();
    let source = r.render_source(&ir, "api.h", "addon").unwrap();

    assert!(header.contains("extern void Engine_reset();"));
    assert!(!source.contains("info.Length()"));
    assert!(source.contains("Engine_reset();\n"));
    assert!(source.contains("return env.Undefined();"));
}

#[test]
fn BridgeRenderer___async_void___resolves_undefined() {
    let ir = SchemaIr::new(
        vec![],
        vec![ExportSchema::method("Engine", "warm").asynchronous()],
    );
    let source = renderer().render_source(&ir, "api.h", "addon").unwrap();

    assert!(source.contains("explicit Engine_warm_AsyncWorker(Napi::Env env)"));
    assert!(source.contains("deferred_.Resolve(env.Undefined());"));
    assert!(source.contains("auto* worker = new Engine_warm_AsyncWorker(env);"));
    assert!(!source.contains("result_{}"));
}

#[test_case(SemanticType::scalar(ScalarKind::Text), "IsString", "string" ; "text")]
#[test_case(SemanticType::scalar(ScalarKind::Bool), "IsBoolean", "boolean" ; "boolean")]
#[test_case(SemanticType::scalar(ScalarKind::I32), "IsNumber", "number" ; "int32")]
#[test_case(SemanticType::scalar(ScalarKind::F64), "IsNumber", "number" ; "double")]
#[test_case(SemanticType::array_of(SemanticType::scalar(ScalarKind::F64)), "IsArray", "number[]" ; "array")]
#[test_case(SemanticType::Struct("Point".to_string()), "IsObject", "Point" ; "struct")]
fn BridgeRenderer___typed_parameter___guarded_by_matching_check(
    ty: SemanticType,
    check: &str,
    display: &str,
) {
    let ir = SchemaIr::new(vec![], vec![ExportSchema::function("take").with_param("value", ty)]);
    let source = renderer().render_source(&ir, "api.h", "addon").unwrap();

    assert!(source.contains(&format!("if (info.Length() < 1 || !info[0].{check}()) {{")));
    assert!(source.contains(&format!("\"take: expected {display}\"")));
}

#[test]
fn BridgeRenderer___scalar_and_array_parameters___read_into_storage() {
    let ir = SchemaIr::new(
        vec![],
        vec![
            ExportSchema::function("greet")
                .with_param("name", SemanticType::scalar(ScalarKind::Text))
                .returning(SemanticType::scalar(ScalarKind::Text)),
            ExportSchema::function("sum")
                .with_param("values", SemanticType::array_of(SemanticType::scalar(ScalarKind::F64)))
                .returning(SemanticType::scalar(ScalarKind::F64)),
        ],
    );
    let source = renderer().render_source(&ir, "api.h", "addon").unwrap();

    assert!(source.contains("std::string name = info[0].As<Napi::String>().Utf8Value();"));
    assert!(source.contains("std::vector<double> values = napigen_detail::ReadArray<double>(info[0]"));
}

#[test]
fn BridgeRenderer___async_wrapper___rejects_on_unknown_throw() {
    let source = renderer()
        .render_source(&solver_ir(), "generated_api.h", "addon")
        .unwrap();
    let wrapper = source
        .split("static Napi::Value Solver_heavy_wrapper")
        .nth(1)
        .unwrap();

    assert!(wrapper.contains("catch (...) {"));
    assert!(wrapper.contains(
        "rejected.Reject(Napi::Error::New(env, \"Solver_heavy: unknown native error\").Value());"
    ));
}

#[test]
fn BridgeRenderer___reserved_parameter_name___sanitized_in_wrapper() {
    let ir = SchemaIr::new(
        vec![],
        vec![ExportSchema::function("run")
            .with_param("new", SemanticType::scalar(ScalarKind::Bool))
            .returning(SemanticType::scalar(ScalarKind::Bool))],
    );
    let r = renderer();
    let header = r.render_header(&ir, "s.hpp").unwrap();
    let source = r.render_source(&ir, "api.h", "addon").unwrap();

    assert!(header.contains("extern bool run(const bool& new_);"));
    assert!(source.contains("bool new_ = info[0].As<Napi::Boolean>().Value();"));
    assert!(source.contains("bool result = run(new_);"));
}

#[test]
fn BridgeRenderer___dynamic_parameter___checks_length_only() {
    let ir = SchemaIr::new(
        vec![],
        vec![ExportSchema::function("store")
            .with_param("blob", SemanticType::Dynamic("Buffer".to_string()))],
    );
    let source = renderer().render_source(&ir, "api.h", "addon").unwrap();

    assert!(source.contains("if (info.Length() < 1) {"));
    assert!(source.contains("Buffer blob = napigen::FromBoundary<Buffer>(info[0]);"));
    assert!(source.contains("\"store: expected any\""));
}
