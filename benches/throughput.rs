//! Throughput benchmarks for the core book operations:
//! - Order submission (resting and crossing)
//! - Order cancellation
//! - Snapshot construction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matchbook::{Order, OrderBook, OrderId, Price, Side, TimeInForce};

fn gtc(id: u64, side: Side, price: i32, qty: u32) -> Order {
    Order::new(OrderId(id), side, TimeInForce::GTC, Price(price), qty).unwrap()
}

/// Build a book with `levels` price levels per side, `orders_per_level`
/// orders each. Bids descend from 9_900, asks ascend from 10_100.
fn build_book(levels: i32, orders_per_level: i32) -> (OrderBook, u64) {
    let mut book = OrderBook::new();
    let mut next_id = 1u64;

    for i in 0..levels {
        for _ in 0..orders_per_level {
            book.submit(gtc(next_id, Side::Buy, 9_900 - i, 100)).unwrap();
            next_id += 1;
        }
    }
    for i in 0..levels {
        for _ in 0..orders_per_level {
            book.submit(gtc(next_id, Side::Sell, 10_100 + i, 100)).unwrap();
            next_id += 1;
        }
    }

    (book, next_id)
}

/// Submit limit orders that rest without matching.
fn bench_submit_no_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_no_match");

    for levels in [10, 100, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(levels),
            &levels,
            |b, &levels| {
                let (mut book, mut next_id) = build_book(levels, 1);
                let mut price_offset = 0i32;

                b.iter(|| {
                    // A bid far below the best bid never crosses
                    let price = 5_000 - price_offset;
                    price_offset = (price_offset + 1) % 1000;
                    let id = next_id;
                    next_id += 1;
                    black_box(book.submit(gtc(id, Side::Buy, price, 100)).unwrap())
                });
            },
        );
    }

    group.finish();
}

/// Submit a limit order that fully matches one resting order.
fn bench_submit_with_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_with_match");
    group.throughput(Throughput::Elements(1));

    group.bench_function("single_fill", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::new();
                book.submit(gtc(1, Side::Sell, 100, 100)).unwrap();
                book
            },
            |mut book| black_box(book.submit(gtc(2, Side::Buy, 100, 100)).unwrap()),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Cancel an order resting in the middle of a deep level.
fn bench_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancel");

    for num_orders in [100u64, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("deep_level", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter_batched(
                    || {
                        let mut book = OrderBook::new();
                        for id in 1..=num_orders {
                            book.submit(gtc(id, Side::Buy, 100, 10)).unwrap();
                        }
                        (book, OrderId(num_orders / 2))
                    },
                    |(mut book, id)| black_box(book.cancel(id)),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Build a top-10 depth snapshot of a populated book.
fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth");

    for levels in [10, 100, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(levels),
            &levels,
            |b, &levels| {
                let (book, _) = build_book(levels, 2);
                b.iter(|| black_box(book.depth(10)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_submit_no_match,
    bench_submit_with_match,
    bench_cancel,
    bench_depth
);
criterion_main!(benches);
