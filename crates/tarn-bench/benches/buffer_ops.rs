//! Criterion micro-benchmarks for buffer and stream operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tarn_buffer::{Buffer, BufferOptions, HeapAllocator};

const CAPACITY: usize = 64 * 1024;

fn bench_offset_write_read(c: &mut Criterion) {
    let buf = Buffer::<HeapAllocator>::new(CAPACITY).unwrap();
    let payload = [0xA5u8; 4096];

    c.bench_function("write_at_4k", |b| {
        b.iter(|| {
            buf.write_at(black_box(&payload), black_box(1024)).unwrap();
        })
    });

    let mut dst = [0u8; 4096];
    c.bench_function("read_at_4k", |b| {
        b.iter(|| {
            assert!(buf.read_at(black_box(&mut dst), black_box(1024)));
        })
    });
}

fn bench_scalar_round_trip(c: &mut Criterion) {
    c.bench_function("scalar_round_trip_u64", |b| {
        let mut buf = Buffer::<HeapAllocator>::new(CAPACITY).unwrap();
        b.iter(|| {
            buf.rewind();
            for i in 0..512u64 {
                buf.write_scalar(black_box(i)).unwrap();
            }
            buf.rewind();
            for _ in 0..512 {
                black_box(buf.read_scalar::<u64>().unwrap());
            }
        })
    });
}

fn bench_growth(c: &mut Criterion) {
    c.bench_function("expand_16k_steps_x8", |b| {
        b.iter(|| {
            let buf = Buffer::<HeapAllocator>::with_options(
                1024,
                BufferOptions {
                    expand_increment: 16 * 1024,
                    ..BufferOptions::default()
                },
            )
            .unwrap();
            for _ in 0..8 {
                buf.expand().unwrap();
            }
            black_box(buf.capacity())
        })
    });
}

fn bench_stream_sequential(c: &mut Criterion) {
    let buf = Buffer::<HeapAllocator>::new(CAPACITY).unwrap();

    c.bench_function("stream_get_u32_drain", |b| {
        b.iter(|| {
            let mut stream = buf.utf32_stream();
            let mut acc = 0u32;
            while let Some(v) = stream.get() {
                acc = acc.wrapping_add(v);
            }
            black_box(acc)
        })
    });

    c.bench_function("stream_put_u32_fill", |b| {
        b.iter(|| {
            let mut stream = buf.utf32_stream();
            for i in 0..(CAPACITY / 4) as u32 {
                stream.put(black_box(i)).unwrap();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_offset_write_read,
    bench_scalar_round_trip,
    bench_growth,
    bench_stream_sequential
);
criterion_main!(benches);
