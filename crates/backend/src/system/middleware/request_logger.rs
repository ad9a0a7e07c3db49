use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Local};
use std::time::Duration;

use crate::shared::format::format_size;

/// Middleware для логирования HTTP запросов
///
/// Выводит в консоль:
/// - Timestamp (локальное время)
/// - Длительность (ms)
/// - Размер ответа по Content-Length (`-` для потоковых ответов)
/// - Статус код
/// - Метод и путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    println!(
        "{}",
        format_line(
            Local::now(),
            start.elapsed(),
            content_length(response.headers()),
            response.status(),
            &method,
            &path,
        )
    );

    response
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Одна строка лога: голубое время для успешных ответов, коричневое для остальных
fn format_line(
    at: DateTime<Local>,
    elapsed: Duration,
    size: Option<usize>,
    status: StatusCode,
    method: &Method,
    path: &str,
) -> String {
    let color_code = if status.is_success() || status == StatusCode::NOT_MODIFIED {
        "36"
    } else {
        "33"
    };

    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        at.format("%H:%M:%S"),
        elapsed.as_millis(),
        format_size(size),
        status.as_u16(),
        method,
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap()
    }

    #[test]
    fn test_format_line() {
        let line = format_line(
            at(),
            Duration::from_millis(12),
            Some(48_213),
            StatusCode::OK,
            &Method::GET,
            "/data/resource-categories.json",
        );
        assert_eq!(
            line,
            "\x1b[36m09:30:05\x1b[0m |    12ms |       48.213 | 200    GET /data/resource-categories.json"
        );
    }

    #[test]
    fn test_format_line_colors() {
        let missing = format_line(at(), Duration::ZERO, None, StatusCode::NOT_FOUND, &Method::GET, "/x");
        assert!(missing.starts_with("\x1b[33m"));
        assert!(missing.contains("|            - |"));

        let cached = format_line(at(), Duration::ZERO, Some(0), StatusCode::NOT_MODIFIED, &Method::GET, "/");
        assert!(cached.starts_with("\x1b[36m"));
    }

    #[test]
    fn test_content_length() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_length(&headers), None);
        headers.insert(header::CONTENT_LENGTH, "1024".parse().unwrap());
        assert_eq!(content_length(&headers), Some(1024));
    }
}
