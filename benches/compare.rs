use criterion::{Criterion, criterion_group, criterion_main};

/// Plain entries which every compared parser accepts.
fn generate(entries: usize) -> String {
    let mut input = String::new();
    for idx in 0..entries {
        input.push_str(&format!(
            "@article{{key{idx},\n  author = {{A. Author and B. Other}},\n  title = {{A {{Title}} number {idx}}},\n  journal = {{Journal}},\n  year = {{{year}}},\n  pages = {{1--10}}\n}}\n\n",
            year = 1900 + idx % 100,
        ));
    }
    input
}

pub fn criterion_benchmark(c: &mut Criterion) {
    use bibtex_lint::parse;

    let input_str = generate(1000);

    c.bench_function("generated bibtex_lint", |b| b.iter(|| parse(&input_str)));

    use biblatex::RawBibliography as RawBib;

    c.bench_function("generated biblatex", |b| {
        b.iter(|| RawBib::parse(&input_str).unwrap())
    });

    use nom_bibtex::Bibtex;

    c.bench_function("generated nom", |b| {
        b.iter(|| Bibtex::parse(&input_str).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
