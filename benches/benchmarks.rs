// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Three key metrics:
//   1. Image encoding throughput — base64 + MIME sniff on upload payloads
//   2. Context resolution — prompt/image selection against deep sessions
//   3. Chunker throughput — splitting long replies for speech synthesis

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fovea::core::resolver;
use fovea::core::session::Session;
use fovea::speech::chunk_text;
use fovea::vision::codec;

const PERSONA: &str = "You are a helpful visual assistant.";

// ─── Helpers ────────────────────────────────────────────────────────────────

/// A JPEG-tagged payload of the given size.
fn jpeg_payload(len: usize) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(len, 0xAB);
    bytes
}

/// A session that has already seen `n` uploads.
fn session_with_images(n: usize) -> Session {
    let mut session = Session::new("bench");
    let bytes = jpeg_payload(512);
    for _ in 0..n {
        session.push_image(codec::encode(&bytes).expect("encode"));
    }
    session
}

// ─── Benchmark: Image encoding ──────────────────────────────────────────────

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for (label, size) in [
        ("encode_1kb", 1 << 10),
        ("encode_64kb", 1 << 16),
        ("encode_1mb", 1 << 20),
    ] {
        let bytes = jpeg_payload(size);
        group.bench_function(label, |b| {
            b.iter(|| codec::encode(black_box(&bytes)).expect("encode"))
        });
    }

    group.finish();
}

// ─── Benchmark: Context resolution ──────────────────────────────────────────

fn bench_resolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");

    // Text-only turn against a session with a deep upload history.
    group.bench_function("text_turn_100_images", |b| {
        let mut session = session_with_images(100);
        b.iter(|| {
            resolver::resolve(
                black_box(&mut session),
                PERSONA,
                Some("what changed since the last one?"),
                None,
            )
            .expect("resolve")
        })
    });

    // Fresh upload: encode + append + placeholder turn.
    group.bench_function("upload_turn_4kb", |b| {
        let mut session = Session::new("bench");
        let bytes = jpeg_payload(4096);
        b.iter(|| {
            resolver::resolve(black_box(&mut session), PERSONA, None, Some(&bytes))
                .expect("resolve")
        })
    });

    group.finish();
}

// ─── Benchmark: Speech chunker ──────────────────────────────────────────────

fn bench_chunker(c: &mut Criterion) {
    let sentence = "The photograph shows a healthy optic disc with a clear, well-defined macula.";
    let long = "A detailed description of everything visible in the image. ".repeat(170);

    let mut group = c.benchmark_group("chunker");

    group.bench_function("chunk_short", |b| {
        b.iter(|| chunk_text(black_box(sentence), 200))
    });

    group.bench_function("chunk_10kb", |b| {
        b.iter(|| chunk_text(black_box(&long), 200))
    });

    group.finish();
}

// ─── Main ───────────────────────────────────────────────────────────────────

criterion_group!(benches, bench_codec, bench_resolver, bench_chunker);
criterion_main!(benches);
