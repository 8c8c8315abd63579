//! One-shot HTTP responder for exercising the ureq clients in tests.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

/// A request as seen by the test server.
pub struct Captured {
    pub request_line: String,
    pub body: String,
}

/// Serves exactly one canned JSON response and reports what it received.
/// Returns the base URL (`http://127.0.0.1:<port>`).
pub fn serve_once(status: &str, body: &'static str) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let status = status.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                if key.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut received = vec![0; content_length];
        reader.read_exact(&mut received).unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        let _ = tx.send(Captured {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8(received).unwrap(),
        });
    });

    (format!("http://{addr}"), rx)
}
