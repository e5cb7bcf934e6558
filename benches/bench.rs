use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use p1788::{Cell, DecoratedInterval, Format, InfSup, Round, argument, reduction, root};

// Establish a baseline with a naive fpu sum

fn baseline_fpu_sum(c: &mut Criterion) {
  let xs = terms(1000);
  c.bench_function("baseline_fpu_sum", |b| {
    b.iter(|| black_box(&xs).iter().sum::<f64>());
  });
}

/// Terms of wildly varying magnitude, with lots of cancellation.
fn terms(n: usize) -> Vec<f64> {
  (0..n)
    .map(|i| {
      let x = (i as f64 * 0.618_033_988_749_895).fract() - 0.5;
      x * 2f64.powi((i % 61) as i32 * 10 - 300)
    })
    .collect()
}

// Exact reductions

fn sum(c: &mut Criterion) {
  let mut g = c.benchmark_group("sum");
  for n in [10, 100, 1000] {
    let xs = terms(n);
    g.throughput(Throughput::Elements(n as u64));
    g.bench_with_input(BenchmarkId::from_parameter(n), &xs, |b, xs| {
      b.iter(|| reduction::sum(black_box(xs), Round::Nearest));
    });
  }
  g.finish();
}

fn dot(c: &mut Criterion) {
  let mut g = c.benchmark_group("dot");
  for n in [10, 100, 1000] {
    let xs = terms(n);
    let ys: Vec<f64> = xs.iter().rev().copied().collect();
    g.throughput(Throughput::Elements(n as u64));
    g.bench_with_input(BenchmarkId::from_parameter(n), &(xs, ys), |b, (xs, ys)| {
      b.iter(|| reduction::dot(black_box(xs), black_box(ys), Round::Nearest));
    });
  }
  g.finish();
}

// Argument reduction and inverse functions

const ARGS: [f64; 4] = [0.5, 1e10, 1e100, 1e300];

fn quadrant(c: &mut Criterion) {
  let mut g = c.benchmark_group("quadrant");
  for x in ARGS {
    let cell = Cell::from_native(Format::F64, x, Round::Nearest).0;
    g.bench_with_input(BenchmarkId::from_parameter(format_args!("{x:e}")), &cell, |b, cell| {
      b.iter(|| argument::quadrant(black_box(cell)));
    });
  }
  g.finish();
}

fn asin(c: &mut Criterion) {
  let mut g = c.benchmark_group("asin");
  for x in [0.1, 0.5, 0.999] {
    let cell = Cell::from_native(Format::F64, x, Round::Nearest).0;
    g.bench_with_input(BenchmarkId::from_parameter(x), &cell, |b, cell| {
      b.iter(|| argument::asin(black_box(cell), Format::F64, Round::Up));
    });
  }
  g.finish();
}

// Roots

fn root_negative(c: &mut Criterion) {
  let mut g = c.benchmark_group("root");
  let cell = Cell::from_native(Format::F64, 3.0, Round::Nearest).0;
  for k in [-3, -5, -17] {
    g.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
      b.iter(|| root(black_box(&cell), k, Format::F64, Round::Down));
    });
  }
  g.finish();
}

// Decorated interval arithmetic, end to end

fn decorated(c: &mut Criterion) {
  type D = DecoratedInterval<InfSup<f64>>;
  let x = D::new(0.1, 0.2);
  let y = D::new(-3.0, 7.0);
  c.bench_function("decorated_mul_add", |b| {
    b.iter(|| black_box(&x) * black_box(&y) + black_box(&x));
  });
  c.bench_function("decorated_div", |b| {
    b.iter(|| black_box(&x) / black_box(&y));
  });
}

criterion_group!(baseline_fpu,
  baseline_fpu_sum,
);

criterion_group!(reductions,
  sum,
  dot,
);

criterion_group!(elementary,
  quadrant,
  asin,
  root_negative,
);

criterion_group!(intervals,
  decorated,
);

criterion_main!(baseline_fpu, reductions, elementary, intervals);
