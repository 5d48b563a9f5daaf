use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use libpartmatch::{prelude::*, scoring};

fn thick_film() -> (Vec<Rule>, Component) {
  let rules = vec![
    Rule::new("Resistance", RuleAttributes::Single("Resistance (Ohm)".into()), Operator::Equal, false),
    Rule::new("Power Rating", RuleAttributes::Single("Rated_Power (W)".into()), Operator::AtLeast, false),
    Rule::new(
      "Dimensions",
      RuleAttributes::Composite(vec!["Size_Code".into(), "Length (mm)".into(), "Height (mm)".into(), "Width (mm)".into()]),
      Operator::Equal,
      false,
    ),
    Rule::new("Tolerance", RuleAttributes::Single("Tolerance (%)".into()), Operator::AtMost, true),
  ];

  let source = Component::builder("Resistors", "Thick Film Resistors")
    .attributes(&[
      ("Resistance (Ohm)", 100.0.into()),
      ("Rated_Power (W)", 0.25.into()),
      ("Size_Code", "1206".into()),
      ("Length (mm)", 3.2.into()),
      ("Height (mm)", 0.6.into()),
      ("Width (mm)", 1.6.into()),
    ])
    .build();

  (rules, source)
}

fn rank(c: &mut Criterion) {
  let (rules, source) = thick_film();
  let candidates = (0..1000)
    .map(|idx| {
      Component::builder("Resistors", if idx % 4 == 0 { "Metal Plate Resistors" } else { "Thick Film Resistors" })
        .order_code(&idx.to_string())
        .attributes(&[
          ("Resistance (Ohm)", (idx as f64).into()),
          ("Rated_Power (W)", 0.125.into()),
          ("Length (mm)", 3.1.into()),
          ("Tolerance (%)", 1.0.into()),
        ])
        .build()
    })
    .collect::<Vec<_>>();

  c.bench_function("rank", |b| b.iter(|| black_box(scoring::rank(&rules, &source, &candidates, 5))));
}

fn report(c: &mut Criterion) {
  let partmatch = PartMatch::embedded().unwrap();
  let (_, source) = thick_film();

  c.bench_function("report", |b| b.iter(|| black_box(partmatch.report(&source, &MatchParams::default()))));
}

criterion_group!(benches, rank, report);
criterion_main!(benches);
