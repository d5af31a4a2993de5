use tinybot::http::parser::parse_request;
use tinybot::http::response::{BuildError, Response, StatusCode};
use tinybot::pool::Pool;

#[test]
fn test_build_exact_bytes() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status(201, "Created");
    res.add_header("Content-Type", "application/json");
    res.add_header("Content-Length", "11");
    res.set_body(b"{\"ok\":true}");

    let raw = res.build().unwrap();

    let expected = b"HTTP/1.1 201 Created\r\n\
Content-Type: application/json\r\n\
Content-Length: 11\r\n\
\r\n\
{\"ok\":true}";
    assert_eq!(raw, expected.as_slice());
}

#[test]
fn test_build_without_status_fails() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.add_header("Content-Type", "text/plain");

    assert!(matches!(res.build(), Err(BuildError::MissingStatus)));
}

#[test]
fn test_build_headers_in_insertion_order() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status_code(StatusCode::Ok);
    res.add_header("B-Second", "2");
    res.add_header("A-First", "1");
    res.add_header("C-Third", "3");

    let raw = res.build().unwrap();
    let text = std::str::from_utf8(raw).unwrap();

    let b = text.find("B-Second").unwrap();
    let a = text.find("A-First").unwrap();
    let c = text.find("C-Third").unwrap();
    assert!(b < a && a < c);
}

#[test]
fn test_build_empty_body() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status_code(StatusCode::NoContent);

    let raw = res.build().unwrap();
    assert_eq!(raw, b"HTTP/1.1 204 No Content\r\n\r\n".as_slice());
}

#[test]
fn test_status_code_helpers() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_set_status_code_convenience() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status_code(StatusCode::MethodNotAllowed);

    let raw = res.build().unwrap();
    assert!(raw.starts_with(b"HTTP/1.1 405 Method Not Allowed\r\n"));
}

#[test]
fn test_raw_none_before_build() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status_code(StatusCode::Ok);

    assert!(res.raw().is_none());
    res.build().unwrap();
    assert!(res.raw().is_some());
}

#[test]
fn test_mutation_after_build_leaves_raw_stale() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status_code(StatusCode::Ok);
    let first = res.build().unwrap().to_vec();

    res.add_header("X-Later", "1");
    assert_eq!(res.raw().unwrap(), first.as_slice());

    let second = res.build().unwrap();
    assert_ne!(second, first.as_slice());
    assert!(second.windows(7).any(|w| w == b"X-Later"));
}

#[test]
fn test_content_length_is_not_validated() {
    // The builder serializes whatever Content-Length the caller supplied;
    // framing consistency is the caller's contract.
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status_code(StatusCode::Ok);
    res.add_header("Content-Length", "999");
    res.set_body(b"four");

    let raw = res.build().unwrap();
    let text = std::str::from_utf8(raw).unwrap();
    assert!(text.contains("Content-Length: 999\r\n"));
    assert!(text.ends_with("four"));
}

#[test]
fn test_build_parse_round_trip() {
    let pool = Pool::new();
    let mut res = Response::new(&pool);
    res.set_status(404, "Not Found");
    res.add_header("Content-Type", "text/html");
    res.add_header("Content-Length", "5");
    res.set_body(b"hello");
    let first = res.build().unwrap().to_vec();

    // A response serializes as <version> <code> <reason>, which the message
    // parser splits on the same two-space rule
    let pool2 = Pool::new();
    let msg = parse_request(&pool2, &first).unwrap();
    assert_eq!(msg.method, "HTTP/1.1");
    assert_eq!(msg.path, "404");
    assert_eq!(msg.version, "Not Found");

    let mut rebuilt = Response::new(&pool2);
    rebuilt.set_status(msg.path.parse().unwrap(), msg.version);
    for h in &msg.headers {
        rebuilt.add_header(h.name, h.value.raw);
    }
    rebuilt.set_body(msg.body);

    assert_eq!(rebuilt.build().unwrap(), first.as_slice());
}
