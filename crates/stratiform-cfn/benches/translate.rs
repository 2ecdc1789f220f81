//! Benchmarks for the parse, translate, and render stages.
//!
//! Run with: cargo bench -p stratiform-cfn

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stratiform_cfn::{Config, to_string, translate};
use stratiform_syntax::parse;

fn network(subnets: usize) -> String {
    let mut source = String::from(
        r#"
version "2010-09-09";
parameters { env: string = "dev"; vpc_cidr: cidr = "10.0.0.0/16"; }
resources {
    vpc main_vpc { name = "{{ env }}-vpc"; description = "vpc"; cidr_block = "{{ vpc_cidr }}"; }
    route_table routes { name = "routes"; description = "routes"; vpc_id = "{{ main_vpc }}"; }
    network_acl acl { name = "acl"; description = "acl"; vpc_id = "{{ main_vpc }}"; }
"#,
    );
    for i in 0..subnets {
        source.push_str(&format!(
            "    subnet subnet_{i} {{ name = \"{{{{ env }}}}-subnet-{i}\"; description = \"subnet {i}\"; \
             vpc_id = \"{{{{ main_vpc }}}}\"; route_table_id = \"{{{{ routes }}}}\"; \
             network_acl_id = \"{{{{ acl }}}}\"; availability_zone = \"us-east-1a\"; \
             cidr_block = \"10.0.{i}.0/24\"; }}\n"
        ));
    }
    source.push_str("}\n");
    source
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for subnets in [10, 200] {
        let source = network(subnets);
        let template = parse(&source).unwrap();

        group.bench_with_input(BenchmarkId::new("parse", subnets), &source, |b, source| {
            b.iter(|| parse(black_box(source)).unwrap())
        });
        group.bench_with_input(
            BenchmarkId::new("translate", subnets),
            &template,
            |b, template| b.iter(|| translate(black_box(template)).unwrap()),
        );
        group.bench_with_input(BenchmarkId::new("end_to_end", subnets), &source, |b, source| {
            b.iter(|| {
                let template = parse(black_box(source)).unwrap();
                let doc = translate(&template).unwrap();
                to_string(&doc, &Config::default()).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_translate);
criterion_main!(benches);
