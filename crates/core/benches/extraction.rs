use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fediscan_core::{Document, extract_from_html, extract_post_id, parse_reply};

const URL: &str = "https://mastodon.social/@user/123456789";

fn page(replies: usize) -> String {
    let mut html = String::from(
        r#"<html><head><meta property="og:description" content="preview"></head><body>
        <div class="detailed-status__wrapper">
            <a class="detailed-status__display-name"><strong>Author</strong></a>
            <div class="status__content"><p>Main post body with a <a href="https://example.com">link</a>.</p></div>
        </div>"#,
    );
    for i in 0..replies {
        html.push_str(&format!(
            r#"<article><div class="status__display-name"><strong>Reply {i}</strong></div><div class="content"><p>Reply body {i}</p></div></article>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for replies in [0, 50, 500] {
        let html = page(replies);
        group.bench_with_input(BenchmarkId::new("replies", replies), &html, |b, html| {
            b.iter(|| Document::parse(black_box(html)))
        });
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_from_html");

    for replies in [0, 50, 500] {
        let html = page(replies);
        group.bench_with_input(BenchmarkId::new("replies", replies), &html, |b, html| {
            b.iter(|| extract_from_html(black_box(html), URL))
        });
    }

    group.finish();
}

fn bench_post_id(c: &mut Criterion) {
    c.bench_function("extract_post_id", |b| {
        b.iter(|| extract_post_id(black_box("https://example.social/users/bob/statuses/110000000000000001")))
    });
}

fn bench_parse_reply(c: &mut Criterion) {
    let reply = r#"Here you go: {"is_suspicious": true, "confidence": 90, "category": "phishing", "explanation": "Credential lure", "red_flags": ["urgency"], "recommendations": "Do not click"}"#;

    c.bench_function("parse_reply", |b| b.iter(|| parse_reply(black_box(reply))));
}

criterion_group!(benches, bench_parse, bench_extract, bench_post_id, bench_parse_reply);
criterion_main!(benches);
