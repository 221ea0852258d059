//! Randomized request/log record synthesis.

use crate::config::LogMix;
use crate::random::RandomSource;
use chrono::{DateTime, Utc};
use pulse_types::{LogEvent, LogEventId, LogSeverity};
use rand::{rngs::StdRng, SeedableRng};
use std::net::Ipv4Addr;

/// A message paired with the endpoint it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTemplate {
    pub message: &'static str,
    pub endpoint: &'static str,
}

const fn template(message: &'static str, endpoint: &'static str) -> LogTemplate {
    LogTemplate { message, endpoint }
}

const INFO_TEMPLATES: &[LogTemplate] = &[
    template("GET /api/users completed", "/api/users"),
    template("POST /api/auth/login processed", "/api/auth/login"),
    template("Cache refreshed successfully", "cache"),
    template("Database connection established", "database"),
    template("GET /api/products completed", "/api/products"),
    template("User session started", "session"),
    template("Static asset served: bundle.js", "static"),
    template("Health check passed", "/health"),
    template("GET /api/orders completed", "/api/orders"),
    template("WebSocket client connected", "websocket"),
];

const WARNING_TEMPLATES: &[LogTemplate] = &[
    template("Elevated response time on /api/search", "/api/search"),
    template("Request rate above expected baseline", "rate-limiter"),
    template("Database connection pool near capacity", "database"),
    template("Cache miss for hot key", "cache"),
    template("Retry required for external service", "external-api"),
    template("Heap usage above 70%", "memory"),
    template("TLS certificate expires in 30 days", "ssl"),
    template("Slow request detected: 2.5s", "performance"),
];

const ERROR_TEMPLATES: &[LogTemplate] = &[
    template("Authentication failed: invalid token", "/api/auth"),
    template("Timed out connecting to external service", "external-api"),
    template("500: unhandled exception in /api/payment", "/api/payment"),
    template("Failed to write to database", "database"),
    template("Rate limit exceeded for 192.168.1.100", "rate-limiter"),
    template("Validation error: invalid email field", "/api/users"),
    template("WebSocket connection dropped unexpectedly", "websocket"),
    template("Failed to process message queue", "queue"),
];

/// Message templates for a severity.
pub fn templates(severity: LogSeverity) -> &'static [LogTemplate] {
    match severity {
        LogSeverity::Info => INFO_TEMPLATES,
        LogSeverity::Warning => WARNING_TEMPLATES,
        LogSeverity::Error => ERROR_TEMPLATES,
    }
}

/// Candidate HTTP status codes for a severity.
pub fn status_codes(severity: LogSeverity) -> &'static [u16] {
    match severity {
        LogSeverity::Info => &[200, 201, 204],
        LogSeverity::Warning => &[200, 201, 204, 301, 302],
        LogSeverity::Error => &[400, 401, 403, 404, 500, 502, 503],
    }
}

/// Response time range in milliseconds, `[low, high]`.
pub fn response_time_range(severity: LogSeverity) -> (f64, f64) {
    match severity {
        LogSeverity::Info => (20.0, 220.0),
        LogSeverity::Warning => (300.0, 1800.0),
        LogSeverity::Error => (500.0, 3500.0),
    }
}

/// Stateless log synthesizer; the only state carried between calls is the
/// random source.
pub struct LogEventGenerator<R = StdRng> {
    mix: LogMix,
    rng: R,
}

impl LogEventGenerator<StdRng> {
    pub fn new(mix: LogMix) -> Self {
        Self::with_rng(mix, StdRng::from_entropy())
    }
}

impl<R: RandomSource> LogEventGenerator<R> {
    pub fn with_rng(mix: LogMix, rng: R) -> Self {
        Self { mix, rng }
    }

    pub fn generate(&mut self) -> LogEvent {
        self.generate_at(Utc::now())
    }

    /// Draw order: severity, template, status code, response time, the two
    /// variable IP octets.
    pub fn generate_at(&mut self, timestamp: DateTime<Utc>) -> LogEvent {
        let severity = self.mix.severity_for(self.rng.next_unit());

        let candidates = templates(severity);
        let template = candidates[self.rng.index(candidates.len())];

        let codes = status_codes(severity);
        let status_code = codes[self.rng.index(codes.len())];

        let (low, high) = response_time_range(severity);
        let response_time_ms = self.rng.uniform(low, high).round() as u32;

        let source_ip = Ipv4Addr::new(192, 168, self.octet(), self.octet());

        LogEvent {
            id: LogEventId::generate(),
            severity,
            message: template.message.to_string(),
            endpoint: template.endpoint.to_string(),
            status_code,
            response_time_ms,
            timestamp,
            source_ip,
        }
    }

    /// Octet in `0..=254`.
    fn octet(&mut self) -> u8 {
        self.rng.index(255) as u8
    }
}
