// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end bootstrap: config → app → codec logging → teardown.

use std::sync::{Arc, Mutex};

use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use wirex_app::App;
use wirex_error::Error;
use wirex_status::{Code, WireStatus, decode, encode};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

fn capturing_app() -> (App, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    (App::with_dispatch("test", Dispatch::new(subscriber)), logs)
}

#[test]
fn codec_logs_go_to_the_entered_app() {
    let (app, logs) = capturing_app();
    {
        let _guard = app.enter();
        let got = decode(&WireStatus::new(Code::NotFound, "not a proxy request")).unwrap();
        assert_eq!(
            got.message(),
            "missing subtype specifier for NotFound. wire:NotFound: not a proxy request"
        );
    }
    assert!(logs.contents().contains("subtype specifier"));
    app.close().unwrap();
}

#[test]
fn closer_failures_are_logged_and_aggregated() {
    let (mut app, logs) = capturing_app();
    app.on_close("querier", || Err::<(), _>(Error::internal("connection pool busy")));
    app.on_close("server", || Ok::<(), Error>(()));

    let err = app.close().unwrap_err();
    assert_eq!(
        err.to_string(),
        "error 1: wire:Internal: connection pool busy"
    );
    let out = logs.contents();
    assert!(out.contains("closer failed"));
    assert!(out.contains("querier"));
}

#[test]
fn decoded_errors_can_be_closer_failures() {
    let (mut app, _logs) = capturing_app();
    let remote = decode(&encode(&Error::disabled("remote read is turned off"))).unwrap();
    app.on_close("remote-read", move || Err::<(), _>(remote));
    assert_eq!(
        app.close().unwrap_err().failures(),
        ["wire:Unavailable: remote read is turned off".to_string()]
    );
}
