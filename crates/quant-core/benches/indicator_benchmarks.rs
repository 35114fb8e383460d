use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quant_core::indicators::{BarData, Indicator, IndicatorEngine, IndicatorField, BollingerBands, ATR, EMA, MACD, RSI, SMA};
use quant_data::{Bar, Timeframe};
use std::collections::HashSet;
use std::time::Duration;

fn generate_bar_data(count: usize) -> Vec<BarData> {
    let mut bars = Vec::with_capacity(count);
    let mut price = 100.0;

    for i in 0..count {
        price += (i as f64 * 0.01).sin() * 2.0;
        bars.push(BarData {
            open: price,
            high: price + 1.0,
            low: price - 1.0,
            close: price + 0.5,
            volume: 10_000.0 + (i as f64 * 100.0),
        });
    }

    bars
}

fn generate_bars(count: usize) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(count);
    let mut price = 100.0;

    for i in 0..count {
        price += (i as f64 * 0.01).sin() * 2.0;
        bars.push(
            Bar::try_new(
                "AAPL",
                Timeframe::OneDay,
                i as i64,
                price,
                price + 1.0,
                price - 1.0,
                price + 0.5,
                10_000.0 + (i as f64 * 100.0),
            )
            .unwrap(),
        );
    }

    bars
}

fn bench_individual_indicators(c: &mut Criterion) {
    let bars = generate_bar_data(1000);

    let mut group = c.benchmark_group("individual_indicators");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("SMA_20", |b| {
        let mut sma = SMA::new(20);
        let mut idx = 0;
        b.iter(|| {
            let result = sma.update(black_box(bars[idx % bars.len()]));
            idx += 1;
            black_box(result)
        });
    });

    group.bench_function("EMA_26", |b| {
        let mut ema = EMA::new(26);
        let mut idx = 0;
        b.iter(|| {
            let result = ema.update(black_box(bars[idx % bars.len()]));
            idx += 1;
            black_box(result)
        });
    });

    group.bench_function("RSI_14", |b| {
        let mut rsi = RSI::new(14);
        let mut idx = 0;
        b.iter(|| {
            let result = rsi.update(black_box(bars[idx % bars.len()]));
            idx += 1;
            black_box(result)
        });
    });

    group.bench_function("MACD", |b| {
        let mut macd = MACD::new(12, 26, 9);
        let mut idx = 0;
        b.iter(|| {
            macd.update(black_box(bars[idx % bars.len()]));
            idx += 1;
            black_box(macd.get_output())
        });
    });

    group.bench_function("BollingerBands_20", |b| {
        let mut bb = BollingerBands::new(20, 2.0);
        let mut idx = 0;
        b.iter(|| {
            bb.update(black_box(bars[idx % bars.len()]));
            idx += 1;
            black_box(bb.get_bands())
        });
    });

    group.bench_function("ATR_14", |b| {
        let mut atr = ATR::new(14);
        let mut idx = 0;
        b.iter(|| {
            let result = atr.update(black_box(bars[idx % bars.len()]));
            idx += 1;
            black_box(result)
        });
    });

    group.finish();
}

fn bench_engine_enrich(c: &mut Criterion) {
    let bars = generate_bars(1000);

    let mut group = c.benchmark_group("engine_enrich");
    group.measurement_time(Duration::from_secs(10));

    let field_sets: [(&str, HashSet<IndicatorField>); 3] = [
        ("one_field", HashSet::from([IndicatorField::Rsi])),
        (
            "five_fields",
            HashSet::from([
                IndicatorField::Sma20,
                IndicatorField::Ema12,
                IndicatorField::Rsi,
                IndicatorField::Macd,
                IndicatorField::Atr,
            ]),
        ),
        (
            "all_fields",
            HashSet::from([
                IndicatorField::Sma20,
                IndicatorField::Sma50,
                IndicatorField::Sma200,
                IndicatorField::Ema12,
                IndicatorField::Ema26,
                IndicatorField::Rsi,
                IndicatorField::Macd,
                IndicatorField::BollingerBands,
                IndicatorField::Atr,
                IndicatorField::VolumeAvg,
            ]),
        ),
    ];

    for (label, requested) in field_sets {
        group.bench_with_input(BenchmarkId::from_parameter(label), &requested, |b, requested| {
            let mut engine = IndicatorEngine::new();
            let mut idx = 0;
            b.iter(|| {
                let result = engine.enrich("AAPL", black_box(&bars[idx % bars.len()]), requested);
                idx += 1;
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_multi_ticker_enrich(c: &mut Criterion) {
    let bars = generate_bars(500);
    let requested = HashSet::from([IndicatorField::Sma20, IndicatorField::Rsi]);

    let mut group = c.benchmark_group("multi_ticker_enrich");
    group.sample_size(20);

    for num_tickers in [1, 10, 50].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_tickers), num_tickers, |b, &num| {
            let tickers: Vec<String> = (0..num).map(|i| format!("T{i}")).collect();
            b.iter(|| {
                let mut engine = IndicatorEngine::new();
                for bar in &bars {
                    for ticker in &tickers {
                        black_box(engine.enrich(ticker, bar, &requested));
                    }
                }
                black_box(engine)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_individual_indicators, bench_engine_enrich, bench_multi_ticker_enrich);
criterion_main!(benches);
