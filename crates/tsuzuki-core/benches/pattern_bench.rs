use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tsuzuki_core::{EpisodeParser, ProviderPatternExtractor};

const INPUTS: [&str; 5] = [
    "ワンピース.S02E078.第208話 フォクシー海賊団とデービーバック！.WEBRip.Amazon.ja-jp[sdh].srt",
    "[VCB-Studio] Sound! Euphonium [05][Hi10p_1080p][x264_flac].srt",
    "Hibike! Euphonium - 01 (720p).ass",
    "Show.S02E078.srt",
    "[SubsPlease] Jujutsu Kaisen - 24 (1080p) [A1B2C3D4].ass",
];

fn bench_episode_parse(c: &mut Criterion) {
    let parser = EpisodeParser::new().unwrap();

    c.bench_function("episode_parse_single", |b| {
        b.iter(|| parser.parse(black_box(INPUTS[0])));
    });

    c.bench_function("episode_parse_batch_5", |b| {
        b.iter(|| {
            for input in &INPUTS {
                let _ = parser.parse(black_box(input));
            }
        });
    });
}

fn bench_pattern_extract(c: &mut Criterion) {
    let extractor = ProviderPatternExtractor::new().unwrap();

    c.bench_function("pattern_extract_single", |b| {
        b.iter(|| extractor.extract(black_box(INPUTS[0])));
    });

    c.bench_function("pattern_extract_batch_5", |b| {
        b.iter(|| {
            for input in &INPUTS {
                let _ = extractor.extract(black_box(input));
            }
        });
    });
}

criterion_group!(benches, bench_episode_parse, bench_pattern_extract);
criterion_main!(benches);
