use criterion::{Criterion, criterion_group, criterion_main};

/// A bibliography exercising most token classes.
fn generate(entries: usize) -> String {
    let mut input = String::from("% generated\n@string{pub = \"Publisher\"}\n");
    for idx in 0..entries {
        input.push_str(&format!(
            "@book{{key{idx},\n  author = {{A. Author and B. {{Other}}}},\n  title = \"On $x_{{{idx}}}$ and \\emph{{more}}\",\n  publisher = pub # {{ Press}},\n  year = {year},\n  month = jan,\n}}\n\n",
            year = 1900 + idx % 100,
        ));
    }
    input
}

pub fn criterion_benchmark(c: &mut Criterion) {
    use bibtex_lint::{Config, parse, tokenize, validate};

    let input = generate(500);
    let config = Config::default();

    c.bench_function("generated tokenize", |b| b.iter(|| tokenize(&input)));

    c.bench_function("generated parse", |b| b.iter(|| parse(&input)));

    let doc = parse(&input);
    c.bench_function("generated validate", |b| {
        b.iter(|| validate(&doc, &config))
    });

    c.bench_function("generated parse and validate", |b| {
        b.iter(|| validate(&parse(&input), &config))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
