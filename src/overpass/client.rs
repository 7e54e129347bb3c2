use crate::diagnostic;
use crate::elements::RawElement;
use crate::error::{Error, Result};

use serde_json::Value;
use std::io::Read;
use std::time::Duration;

pub const DEFAULT_URL: &str = "https://overpass-api.de/api/interpreter";

pub struct OverpassClient {
    agent: ureq::Agent,
    url: String,
    timeout: u64,
}

impl OverpassClient {
    pub fn new(url: &str, timeout: u64) -> OverpassClient {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout))
            .user_agent(concat!("osmpower/", env!("CARGO_PKG_VERSION")))
            .build();
        OverpassClient {
            agent: agent,
            url: String::from(url),
            timeout: timeout,
        }
    }

    pub fn agent(&self) -> &ureq::Agent {
        &self.agent
    }

    /// POSTs one query and decodes the returned element list. A transport
    /// timeout is fatal for the whole run, there is no partial result.
    pub fn query(&self, query: &str) -> Result<Vec<RawElement>> {
        diagnostic!("OSM query: {}", query);
        let response = match self.agent.post(&self.url).send_string(query) {
            Ok(r) => r,
            Err(e) => {
                if is_timeout(&e) {
                    return Err(Error::RemoteQueryTimeout {
                        url: self.url.clone(),
                        seconds: self.timeout,
                    });
                }
                return Err(Error::from(e));
            }
        };
        let mut body = String::new();
        response.into_reader().read_to_string(&mut body)?;
        parse_elements(&body)
    }
}

pub fn parse_elements(body: &str) -> Result<Vec<RawElement>> {
    let doc: Value = serde_json::from_str(body)?;
    let elements = match doc.get("elements").and_then(Value::as_array) {
        Some(e) => e,
        None => {
            return Err(Error::BadResponse(String::from(
                "response without an elements member",
            )))
        }
    };
    let mut res = Vec::with_capacity(elements.len());
    for e in elements {
        res.push(RawElement::from_json(e)?);
    }
    Ok(res)
}

fn is_timeout(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::Transport(t) => {
            if t.message().map(|m| m.contains("timed out")).unwrap_or(false) {
                return true;
            }
            // the transport message is not stable across io error kinds,
            // walk the source chain for the underlying io error too
            let mut source = std::error::Error::source(e);
            while let Some(s) = source {
                if let Some(io) = s.downcast_ref::<std::io::Error>() {
                    return is_timeout_io(io);
                }
                source = s.source();
            }
            false
        }
        _ => false,
    }
}

fn is_timeout_io(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}
