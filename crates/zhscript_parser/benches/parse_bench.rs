use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zhscript_parser::parse;
use zhscript_scanner::tokenize;

// A medium-size zhscript source with statements, expressions and JSX
const ZHSCRIPT_SOURCE: &str = r#"
// 工具函数
导入 { 格式化, 求和 } 从 "./工具";

常量 税率 = 0.13;
令 [首项, , 末项] = 列表;

函数 计算总价(单价, 数量) {
    令 小计 = 单价 * 数量;
    如果 (小计 > 1000) {
        小计 = 小计 * 0.9;
    } 否则 如果 (小计 > 500) {
        小计 -= 20;
    }
    返回 小计 + 小计 * 税率;
}

函数 阶乘(n) {
    如果 (n <= 1) { 返回 1; }
    返回 n * 阶乘(n - 1);
}

对于 (令 i = 0; i < 10; i += 1) {
    如果 (i % 2 === 0) { 继续; }
    控制台.日志(格式化(“第 ” + i + “ 项”));
}

令 计数 = 0;
当 (计数 < 100) {
    计数 = 计数 + 1;
    如果 (计数 ** 2 > 50) { 跳出; }
}

常量 配置 = { 名称: "商店", 版本: 2, 启用: 真, 备注: 空 };
常量 名称 = 配置?.名称 ?? "默认";
常量 结果 = 计数 > 10 ? "多" : "少";

组件 商品卡片(属性) {
    返回 <div 类名="卡片" 点击={属性.选择}>
        <标题>{属性.名称}</标题>
        <价格 数值={计算总价(属性.单价, 1)} />
        <>
            <span>库存</span>
            {属性.库存}
        </>
    </div>;
}

导出 默认 组件 应用() {
    返回 <界面.容器>
        <商品卡片 名称="苹果" 单价={5} />
        <商品卡片 名称="香蕉" 单价={3} 推荐 />
    </界面.容器>;
}
"#;

fn bench_parse_zhscript(c: &mut Criterion) {
    let tokens = tokenize(ZHSCRIPT_SOURCE);
    c.bench_function("parse_zhscript_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let program = parse(&arena, black_box(&tokens));
            black_box(program.map(|p| p.body.len()))
        });
    });
}

fn bench_tokenize_zhscript(c: &mut Criterion) {
    c.bench_function("tokenize_zhscript_medium", |b| {
        b.iter(|| black_box(tokenize(black_box(ZHSCRIPT_SOURCE))));
    });
}

criterion_group!(benches, bench_parse_zhscript, bench_tokenize_zhscript);
criterion_main!(benches);
