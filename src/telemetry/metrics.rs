use once_cell::sync::Lazy;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
};

pub static METER: Lazy<Meter> = Lazy::new(|| global::meter("planet-news-api"));

pub static HTTP_REQUESTS_TOTAL: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("http.server.requests")
        .with_description("Total HTTP requests handled")
        .build()
});

pub static HTTP_REQUEST_DURATION: Lazy<Histogram<f64>> = Lazy::new(|| {
    METER
        .f64_histogram("http.server.duration")
        .with_description("HTTP request latency in milliseconds")
        .build()
});

pub static TOKENS_ISSUED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("auth.tokens.issued")
        .with_description("Total auth tokens issued")
        .build()
});

pub static NEWS_CREATED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("news.created")
        .with_description("Total articles inserted")
        .build()
});

pub static FAVORITES_ADDED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("favorites.added")
        .with_description("Total favorites added")
        .build()
});

pub static FAVORITES_UPDATED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("favorites.updated")
        .with_description("Total favorite status updates")
        .build()
});

pub static FAVORITES_REMOVED: Lazy<Counter<u64>> = Lazy::new(|| {
    METER
        .u64_counter("favorites.removed")
        .with_description("Total favorites removed")
        .build()
});
