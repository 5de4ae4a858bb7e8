//! Benchmarks for collectd-client reply handling

use std::io::Cursor;

use collectd_client::protocol::{parse_listing, parse_values, read_reply, Command, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn listval_reply(n: usize) -> Vec<u8> {
    let mut raw = format!("{} Values found\n", n);
    for i in 0..n {
        raw.push_str(&format!("1634000000.{:03} host{}/cpu-{}/cpu-idle\n", i % 1000, i % 7, i));
    }
    raw.into_bytes()
}

fn protocol_benchmarks(c: &mut Criterion) {
    let reply = listval_reply(1000);
    c.bench_function("read_reply 1000 lines", |b| {
        b.iter(|| read_reply(&mut Cursor::new(black_box(&reply))).unwrap())
    });

    let lines = read_reply(&mut Cursor::new(&reply)).unwrap();
    c.bench_function("parse_listing 1000 lines", |b| {
        b.iter(|| parse_listing(black_box(&lines)).unwrap())
    });

    let values: Vec<String> = (0..64).map(|i| format!("ds{}={}.25", i, i)).collect();
    c.bench_function("parse_values 64 lines", |b| {
        b.iter(|| parse_values(black_box(&values)).unwrap())
    });

    let cmd = Command::put_val(
        "myhost/interface-eth0/if_octets",
        [("interval", "10")],
        None,
        [Value::Number(1234.5), Value::Undefined],
    );
    c.bench_function("render putval", |b| b.iter(|| black_box(&cmd).to_string()));
}

criterion_group!(benches, protocol_benchmarks);
criterion_main!(benches);
