//! Benchmarks for rotor machine conversion.
//!
//! Measures configuration parsing, single-character conversion and message
//! throughput scaling across message lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use enigma::{Machine, MachineConfig, Settings};

/// Standard five-slot configuration used across all benchmarks.
const BENCH_CONF: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
5 3
I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)
";

/// Setting line applied before every measured conversion run.
const BENCH_SETTING: &str = "* B Beta III IV I AXLE BCDE (HQ) (EX) (IP) (TR) (BY)";

fn configured_machine(config: &MachineConfig) -> Machine {
    let mut machine = config.build_machine().unwrap();
    Settings::parse(BENCH_SETTING, config.num_rotors())
        .unwrap()
        .apply(&mut machine)
        .unwrap();
    machine
}

/// Benchmarks `MachineConfig::parse()` on the standard configuration.
fn bench_parse_config(c: &mut Criterion) {
    c.bench_function("parse_config", |b| {
        b.iter(|| MachineConfig::parse(black_box(BENCH_CONF)).unwrap());
    });
}

/// Benchmarks single-character `convert()`.
///
/// The machine is configured once and keeps stepping between iterations,
/// so notch carries are included at their natural rate.
fn bench_convert_char(c: &mut Criterion) {
    let config = MachineConfig::parse(BENCH_CONF).unwrap();
    let mut machine = configured_machine(&config);

    let mut group = c.benchmark_group("convert_char");
    group.throughput(Throughput::Elements(1));
    group.bench_function("single", |b| {
        b.iter(|| machine.convert(black_box(7)).unwrap());
    });
    group.finish();
}

/// Benchmarks `convert_message()` across message lengths.
fn bench_convert_message(c: &mut Criterion) {
    let config = MachineConfig::parse(BENCH_CONF).unwrap();

    let mut group = c.benchmark_group("convert_message");
    for &len in &[16usize, 256, 4096] {
        let msg: String = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG"
            .chars()
            .cycle()
            .take(len)
            .collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &msg, |b, msg| {
            let mut machine = configured_machine(&config);
            b.iter(|| machine.convert_message(black_box(msg)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_config,
    bench_convert_char,
    bench_convert_message
);
criterion_main!(benches);
