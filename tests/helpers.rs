// Shared test helpers: an in-memory transport replaying canned wire responses.
//
// Each test file includes this with `mod helpers;`.

use std::collections::VecDeque;
use std::sync::Mutex;

use wire_client::error_handling::TransportErrorKind;
use wire_client::{
    ClientError, ProtocolVersion, RawResponse, Transport, TransportInfo, TransportOptions,
};

struct Step {
    head: String,
    body: Vec<u8>,
    redirect_count: usize,
}

/// Transport that answers from a script and records the options of every call.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    calls: Mutex<Vec<TransportOptions>>,
    http2: bool,
}

#[allow(dead_code)] // Not every test file uses every helper
impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            http2: true,
        }
    }

    /// Queues a response; `head` must end with the blank line.
    pub fn respond(self, head: &str, body: &str) -> Self {
        self.respond_after_redirects(head, body, 0)
    }

    /// Queues a response the transport claims to have reached after
    /// following `redirect_count` redirects itself.
    pub fn respond_after_redirects(self, head: &str, body: &str, redirect_count: usize) -> Self {
        self.steps.lock().expect("lock").push_back(Step {
            head: head.to_string(),
            body: body.as_bytes().to_vec(),
            redirect_count,
        });
        self
    }

    pub fn without_http2(mut self) -> Self {
        self.http2 = false;
        self
    }

    pub fn calls(&self) -> Vec<TransportOptions> {
        self.calls.lock().expect("lock").clone()
    }
}

impl Transport for ScriptedTransport {
    fn supports_protocol(&self, version: ProtocolVersion) -> bool {
        self.http2 || version != ProtocolVersion::Http2
    }

    async fn execute(&self, options: &TransportOptions) -> Result<RawResponse, ClientError> {
        self.calls.lock().expect("lock").push(options.clone());
        let step = self
            .steps
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| ClientError::Transport {
                kind: TransportErrorKind::Other,
                message: "script exhausted".to_string(),
            })?;

        let header_size = step.head.len();
        let mut raw = step.head.into_bytes();
        raw.extend_from_slice(&step.body);
        Ok(RawResponse {
            raw,
            info: TransportInfo {
                redirect_count: step.redirect_count,
                header_size,
            },
        })
    }
}
