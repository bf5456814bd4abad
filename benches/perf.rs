use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mathlayout::{Settings, render};
use serde::Deserialize;

#[path = "../tests/setup/mod.rs"]
mod setup;

const CASES_TO_RUN: [&str; 10] = [
    "Quadratic",
    "Binomial",
    "Continued",
    "Matrix",
    "Cases",
    "Delimiters",
    "Accents",
    "Fonts",
    "Radicals",
    "Aligned",
];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTestCase {
    Simple(String),
    Detailed(DetailedCase),
}

#[derive(Debug, Deserialize)]
struct DetailedCase {
    tex: String,
    #[serde(default)]
    display: Option<DisplayValue>,
    #[serde(flatten)]
    _extra: HashMap<String, serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DisplayValue {
    Bool(bool),
    Int(i64),
}

impl From<DisplayValue> for bool {
    fn from(value: DisplayValue) -> Self {
        match value {
            DisplayValue::Bool(value) => value,
            DisplayValue::Int(value) => value != 0,
        }
    }
}

impl RawTestCase {
    fn into_prepared(self, name: &'static str) -> PreparedCase {
        let (tex, display_mode) = match self {
            RawTestCase::Simple(tex) => (tex, false),
            RawTestCase::Detailed(case) => (case.tex, case.display.is_some_and(Into::into)),
        };
        PreparedCase {
            name,
            tex: Arc::<str>::from(tex),
            settings: Arc::new(Settings::builder().display_mode(display_mode).build()),
        }
    }
}

struct PreparedCase {
    name: &'static str,
    tex: Arc<str>,
    settings: Arc<Settings>,
}

fn load_cases() -> Result<Vec<PreparedCase>, Box<dyn Error>> {
    let data_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("benches/formulas.yaml");
    let file = File::open(&data_path)?;
    let reader = BufReader::new(file);
    let mut raw_cases: HashMap<String, RawTestCase> = serde_yaml::from_reader(reader)?;

    CASES_TO_RUN
        .iter()
        .map(|&name| -> Result<PreparedCase, Box<dyn Error>> {
            let case = raw_cases
                .remove(name)
                .ok_or_else(|| std::io::Error::other(format!("missing case '{name}' in {}", data_path.display())))?;
            Ok(case.into_prepared(name))
        })
        .collect()
}

fn bench_rendering(c: &mut Criterion) {
    let symbols = setup::symbols();
    let fonts = setup::fonts();
    let cases = load_cases().expect("failed to load benchmark formulas");

    let mut group = c.benchmark_group("mathlayout_render");
    for PreparedCase { name, tex, settings } in cases {
        // Ensure layout succeeds once before measuring performance.
        render(symbols, fonts, tex.as_ref(), settings.as_ref()).expect("layout failed while priming benchmark");

        group.bench_function(name, move |b| {
            b.iter(|| {
                let display = render(symbols, fonts, tex.as_ref(), settings.as_ref())
                    .expect("layout failed during benchmark");
                black_box(display.width);
            });
        });
    }

    group.finish();
}

fn bench_parsing(c: &mut Criterion) {
    let symbols = setup::symbols();
    let cases = load_cases().expect("failed to load benchmark formulas");

    let mut group = c.benchmark_group("mathlayout_parse");
    for PreparedCase { name, tex, .. } in cases {
        group.bench_function(name, move |b| {
            b.iter(|| {
                let list = mathlayout::parser::build(symbols, tex.as_ref()).expect("parse failed during benchmark");
                black_box(list.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rendering, bench_parsing);
criterion_main!(benches);
