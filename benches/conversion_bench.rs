use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use zwconv::{convert_zw_to_json_object, prettify_zw, to_zw, to_zw_with_config, ZwConfig};

fn benchmark_json_to_zw_conversion(c: &mut Criterion) {
    // Simple object benchmark
    c.bench_function("simple_object", |b| {
        let json = json!({
            "name": "Alice",
            "age": 30,
            "active": true,
            "balance": 1250.5
        });
        b.iter(|| to_zw(black_box(&json), Some("ZW-USER")))
    });

    // Dialogue list benchmark
    c.bench_function("dialogue_list", |b| {
        let json = json!({
            "DIALOGUE": [
                {"SPEAKER": "Tran", "LINE": "We leave at dawn."},
                {"SPEAKER": "Mai", "LINE": "Then we rest now."},
                {"SPEAKER": "Tran", "LINE": "First, the map.\nSecond, the supplies."}
            ]
        });
        b.iter(|| to_zw(black_box(&json), Some("ZW-NARRATIVE-SCENE")))
    });

    // Large array benchmark
    c.bench_function("large_array", |b| {
        let users: Vec<_> = (0..1000)
            .map(|i| {
                json!({
                    "id": i,
                    "name": format!("User{}", i),
                    "email": format!("user{}@example.com", i),
                    "active": i % 2 == 0
                })
            })
            .collect();
        let json = json!({ "users": users });
        b.iter(|| to_zw(black_box(&json), None))
    });

    // Output validation adds a re-parse
    c.bench_function("without_output_validation", |b| {
        let json = json!({"name": "Test", "data": [1, 2, 3, 4, 5], "nested": {"key": "value"}});
        let config = ZwConfig::new().with_validation(false);
        b.iter(|| to_zw_with_config(black_box(&json), black_box(&config)))
    });
}

fn benchmark_zw_parsing(c: &mut Criterion) {
    let scene = "ZW-NARRATIVE-SCENE:\n  TITLE: The Awakening\n  META:\n    ACT: 1\n    DRAFT: true\n  DIALOGUE:\n    - SPEAKER: Tran\n      LINE: We leave at dawn.\n    - SPEAKER: Mai\n      LINE: Then we rest now.\n  NOTES: first line\n  second line\n";

    c.bench_function("zw_to_json", |b| {
        b.iter(|| convert_zw_to_json_object(black_box(scene)))
    });

    let mut large = String::from("ZW-LOG:\n  ENTRIES:\n");
    for i in 0..1000 {
        large.push_str(&format!("    - ID: {}\n      TEXT: entry {}\n", i, i));
    }
    c.bench_function("zw_to_json_large", |b| {
        b.iter(|| convert_zw_to_json_object(black_box(&large)))
    });

    c.bench_function("prettify", |b| b.iter(|| prettify_zw(black_box(scene))));
}

criterion_group!(benches, benchmark_json_to_zw_conversion, benchmark_zw_parsing);
criterion_main!(benches);
