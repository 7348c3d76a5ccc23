use pharos::config::Config;
use pharos::http::connection::{Connection, Verdict};

fn process(conn: &mut Connection, cfg: &Config) -> (String, Verdict) {
    let mut out = Vec::new();
    let verdict = conn.process(cfg, &mut out);
    (String::from_utf8(out).unwrap(), verdict)
}

#[test]
fn test_single_request_roundtrip() {
    let cfg = Config::default();
    let mut conn = Connection::new();

    conn.ingest(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n");
    let (out, verdict) = process(&mut conn, &cfg);

    assert_eq!(
        out,
        "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: keep-alive\r\n\r\nhello"
    );
    assert_eq!(verdict, Verdict::KeepOpen);
    assert_eq!(conn.buffered(), 0);
}

#[test]
fn test_pipelined_requests_answered_in_arrival_order() {
    let cfg = Config::default();
    let mut conn = Connection::new();

    conn.ingest(b"GET /one HTTP/1.1\r\nHost: a\r\n\r\nGET /two HTTP/1.1\r\nHost: a\r\n\r\n");
    let (out, verdict) = process(&mut conn, &cfg);

    let first = out.find("Path: /one").expect("first response missing");
    let second = out.find("Path: /two").expect("second response missing");
    assert!(first < second);
    assert_eq!(verdict, Verdict::KeepOpen);
    assert_eq!(conn.buffered(), 0);
}

#[test]
fn test_partial_request_produces_no_output() {
    let cfg = Config::default();
    let mut conn = Connection::new();

    conn.ingest(b"GET / HTTP/1.1\r\nHos");
    let (out, verdict) = process(&mut conn, &cfg);

    assert!(out.is_empty());
    assert_eq!(verdict, Verdict::KeepOpen);

    conn.ingest(b"t: a\r\n\r\n");
    let (out, verdict) = process(&mut conn, &cfg);

    assert!(out.ends_with("hello"));
    assert_eq!(verdict, Verdict::KeepOpen);
}

#[test]
fn test_invalid_request_emits_error_and_closes() {
    let cfg = Config::default();
    let mut conn = Connection::new();

    conn.ingest(b"DELETE / HTTP/1.1\r\nHost: a\r\n\r\n");
    let (out, verdict) = process(&mut conn, &cfg);

    assert!(out.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert!(out.contains("Connection: close\r\n"));
    assert_eq!(verdict, Verdict::Close);
}

#[test]
fn test_error_stops_dispatch_of_later_pipelined_requests() {
    let cfg = Config::default();
    let mut conn = Connection::new();

    conn.ingest(b"DELETE / HTTP/1.1\r\nHost: a\r\n\r\nGET / HTTP/1.1\r\nHost: a\r\n\r\n");
    let (out, verdict) = process(&mut conn, &cfg);

    assert!(out.starts_with("HTTP/1.1 405"));
    assert!(!out.contains("200 OK"));
    assert_eq!(verdict, Verdict::Close);
}

#[test]
fn test_connection_close_request_closes_after_response() {
    let cfg = Config::default();
    let mut conn = Connection::new();

    conn.ingest(b"GET / HTTP/1.1\r\nHost: a\r\nConnection: close\r\n\r\n");
    let (out, verdict) = process(&mut conn, &cfg);

    assert!(out.contains("Connection: close\r\n"));
    assert!(out.ends_with("hello"));
    assert_eq!(verdict, Verdict::Close);
}

#[test]
fn test_oversized_headers_yield_413_across_many_reads() {
    let mut cfg = Config::default();
    cfg.max_header_size = 256;
    let mut conn = Connection::new();

    conn.ingest(b"GET / HTTP/1.1\r\n");
    loop {
        let (out, verdict) = process(&mut conn, &cfg);
        if verdict == Verdict::Close {
            assert!(out.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
            return;
        }
        assert!(out.is_empty());
        conn.ingest(b"X-Slow-Header: aaaaaaaaaaaaaaaaaaaaaaaa\r\n");
    }
}

#[test]
fn test_buffer_keeps_unconsumed_tail_for_next_read() {
    let cfg = Config::default();
    let mut conn = Connection::new();

    // One complete request plus the start of a second one.
    conn.ingest(b"GET / HTTP/1.1\r\nHost: a\r\n\r\nGET /next HTTP");
    let (out, verdict) = process(&mut conn, &cfg);

    assert!(out.ends_with("hello"));
    assert_eq!(verdict, Verdict::KeepOpen);
    assert_eq!(conn.buffered(), b"GET /next HTTP".len());

    conn.ingest(b"/1.1\r\nHost: a\r\n\r\n");
    let (out, _) = process(&mut conn, &cfg);
    assert!(out.ends_with("Path: /next"));
}
