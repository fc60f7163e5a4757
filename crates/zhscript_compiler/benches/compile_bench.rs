use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zhscript_compiler::{compile, Project};
use zhscript_options::CompilerOptions;

const MEDIUM_SOURCE: &str = r#"
导入 { 格式化 } 从 "./工具";

常量 税率 = 0.13;

函数 计算总价(单价, 数量) {
    令 小计 = 单价 * 数量;
    如果 (小计 > 1000) {
        小计 = 小计 * 0.9;
    } 否则 {
        小计 -= 20;
    }
    返回 小计 + 小计 * 税率;
}

对于 (令 i = 0; i < 10; i += 1) {
    如果 (i % 2 === 0) { 继续; }
    控制台.日志(格式化(“第 ” + i + “ 项”));
}

组件 商品卡片(属性) {
    返回 <div 类名="卡片" 点击={属性.选择}>
        <标题>{属性.名称}</标题>
        <价格 数值={计算总价(属性.单价, 1)} />
    </div>;
}
"#;

// ============================================================================
// Helpers
// ============================================================================

/// Generate a source with `count` functions.
fn generate_large_source(count: usize) -> String {
    let mut source = String::new();
    for i in 0..count {
        source.push_str(&format!(
            "函数 函数{i}(a, b) {{\n    令 结果 = a * {i} + b;\n    如果 (结果 > {i}) {{ 返回 结果; }}\n    返回 <span>{{结果}}</span>;\n}}\n"
        ));
    }
    source
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_medium", |b| {
        b.iter(|| black_box(compile(black_box(MEDIUM_SOURCE))));
    });
}

fn bench_project_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_compile");

    group.bench_function("single_file", |b| {
        let mut project = Project::new(vec![], CompilerOptions::default());
        project.add_source("bench.zh", MEDIUM_SOURCE);
        b.iter(|| black_box(project.compile_all()));
    });

    group.bench_function("multiple_files", |b| {
        let mut project = Project::new(vec![], CompilerOptions::default());
        for i in 0..32 {
            project.add_source(format!("file_{}.zh", i), MEDIUM_SOURCE);
        }
        b.iter(|| black_box(project.compile_all()));
    });

    group.finish();
}

// ============================================================================
// Scaling Benchmarks
// ============================================================================

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [10, 50, 100, 200] {
        let source = generate_large_source(size);
        group.bench_with_input(BenchmarkId::new("functions", size), &source, |b, source| {
            b.iter(|| black_box(compile(black_box(source))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_project_compile, bench_scaling);
criterion_main!(benches);
