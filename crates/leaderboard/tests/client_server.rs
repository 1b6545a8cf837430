use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use leaderboard::client::{self, ClientError};
use leaderboard::http::serve;
use leaderboard::*;

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Starts a server on its own thread and waits until it accepts connections.
fn spawn_server() -> String {
    let port = free_port();
    let addr = format!("127.0.0.1:{port}");
    let bind = addr.clone();
    thread::spawn(move || serve(&bind, Leaderboard::new(MemoryStore::default())));
    for _ in 0..100 {
        if TcpStream::connect(&addr).is_ok() {
            return format!("http://{addr}");
        }
        thread::sleep(Duration::from_millis(20));
    }
    panic!("server on {addr} never came up");
}

fn req(name: &str, score: f64) -> SubmitRequest {
    SubmitRequest {
        username: name.into(),
        score,
    }
}

#[test]
fn submit_then_fetch_over_the_wire() {
    let base = spawn_server();
    let low = client::submit(&base, &req("ann", 40.0)).unwrap();
    let high = client::submit(&format!("{base}/"), &req(" bob ", 95.5)).unwrap();
    assert_eq!(high.username, "bob");
    assert_eq!(high.score, 95);
    assert_ne!(low.id, high.id);

    let top = client::fetch_top(&base).unwrap();
    assert_eq!(top, vec![high, low]);
}

#[test]
fn blank_name_comes_back_as_rejected_400() {
    let base = spawn_server();
    let err = client::submit(&base, &req("   ", 3.0)).unwrap_err();
    match &err {
        ClientError::Rejected { status, message } => {
            assert_eq!(*status, 400);
            assert!(message.contains("username"), "{message}");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(!err.is_retryable());
    assert!(client::fetch_top(&base).unwrap().is_empty());
}

#[test]
fn negative_score_comes_back_as_rejected_400() {
    let base = spawn_server();
    let err = client::submit(&base, &req("ann", -1.0)).unwrap_err();
    assert!(matches!(err, ClientError::Rejected { status: 400, .. }), "{err:?}");
}

#[test]
fn closed_port_is_a_retryable_transport_error() {
    let base = format!("http://127.0.0.1:{}", free_port());
    let err = client::fetch_top(&base).unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
    assert!(err.is_retryable());
}
