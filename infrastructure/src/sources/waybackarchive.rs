//! Wayback Machine CDX index

use std::sync::Arc;

use scout_application::{CancellationToken, ResultStream, ScrapeSession, Source};

/// Percent-decode one archived URL; invalid UTF-8 is replaced, not rejected
fn decode_line(line: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(line.as_bytes())).into_owned()
}

/// Undo the residue double-encoded URLs leave in front of hosts
/// (`%252f` decodes to `%2f`, and the extractor drops the `%`).
fn strip_encoding_residue(host: &str) -> &str {
    let lower = host.to_ascii_lowercase();
    if lower.starts_with("25") || lower.starts_with("2f") {
        &host[2..]
    } else {
        host
    }
}

/// Archived URLs under `*.<domain>`; slow, so not a default source
#[derive(Debug, Default)]
pub struct WaybackArchive;

impl WaybackArchive {
    pub fn new() -> Self {
        Self
    }
}

impl Source for WaybackArchive {
    fn name(&self) -> &str {
        "waybackarchive"
    }

    fn is_default(&self) -> bool {
        false
    }

    fn has_recursive_support(&self) -> bool {
        false
    }

    fn needs_key(&self) -> bool {
        false
    }

    fn add_api_keys(&mut self, _keys: Vec<String>) {}

    fn run(
        &self,
        cancel: CancellationToken,
        domain: &str,
        session: Arc<dyn ScrapeSession>,
    ) -> ResultStream {
        let url = format!(
            "http://web.archive.org/cdx/search/cdx?url=*.{}/*&output=txt&fl=original&collapse=urlkey",
            domain
        );

        ResultStream::spawn(self.name(), move |emitter| async move {
            let response = match session.simple_get(&cancel, &url).await {
                Ok(response) => response,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            for line in response.lines() {
                let line = decode_line(line);
                let Some(host) = session.extract(&line) else {
                    continue;
                };
                let host = strip_encoding_residue(&host).to_string();
                if !emitter.subdomain(host).await {
                    return;
                }
            }
        })
    }
}
