use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urlguard::extract_features;

const URLS: &[&str] = &[
    "https://www.google.com",
    "http://bit.ly/abc123",
    "http://192.168.10.4/secure-login/update.php?acct=1&token=%20",
    "paypal.com.account-verify.example-free-bonus.ru/signin//redirect",
    "",
];

fn bench_extract(c: &mut Criterion) {
    urlguard::warm_up();
    c.bench_function("extract_features/mixed", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(extract_features(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
