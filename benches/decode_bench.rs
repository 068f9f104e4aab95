// SPDX-License-Identifier: MIT OR Apache-2.0
//! Benchmarks for decoding captured output under each supported encoding.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use subproc::{Encoding, StreamKind, decode};

/// ASCII text of roughly `len` bytes, valid under every 8-bit encoding.
fn ascii_payload(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// The same text as UTF-16LE with a byte-order mark.
fn utf16_payload(len: usize) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for b in ascii_payload(len / 2) {
        out.extend_from_slice(&u16::from(b).to_le_bytes());
    }
    out
}

fn bench_decode_by_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_by_encoding");
    let len = 64 * 1024;
    group.throughput(Throughput::Bytes(len as u64));

    for encoding in [Encoding::Utf8, Encoding::Ascii, Encoding::IsoLatin1] {
        let bytes = ascii_payload(len);
        group.bench_with_input(BenchmarkId::from_parameter(encoding), &bytes, |b, bytes| {
            b.iter(|| {
                decode(black_box(bytes.clone()), encoding, StreamKind::Stdout)
                    .unwrap()
            });
        });
    }

    let bytes = utf16_payload(len);
    group.bench_with_input(
        BenchmarkId::from_parameter(Encoding::Utf16),
        &bytes,
        |b, bytes| {
            b.iter(|| Encoding::Utf16.decode_bytes(black_box(bytes)).unwrap());
        },
    );

    group.finish();
}

fn bench_decode_failure(c: &mut Criterion) {
    let mut bytes = ascii_payload(64 * 1024);
    bytes.push(0xFF);

    c.bench_function("decode_invalid_utf8_64k", |b| {
        b.iter(|| {
            decode(black_box(bytes.clone()), Encoding::Utf8, StreamKind::Stdout)
                .unwrap_err()
        });
    });
}

criterion_group!(benches, bench_decode_by_encoding, bench_decode_failure);
criterion_main!(benches);
