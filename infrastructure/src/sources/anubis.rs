//! Anubis subdomain database

use std::sync::Arc;

use scout_application::{CancellationToken, ResultStream, ScrapeSession, Source};

#[derive(Debug, Default)]
pub struct Anubis;

impl Anubis {
    pub fn new() -> Self {
        Self
    }
}

impl Source for Anubis {
    fn name(&self) -> &str {
        "anubis"
    }

    fn is_default(&self) -> bool {
        true
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
        let url = format!("https://jonlu.ca/anubis/subdomains/{}", domain);

        ResultStream::spawn(self.name(), move |emitter| async move {
            let response = match session.simple_get(&cancel, &url).await {
                Ok(response) => response,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            // Plain JSON string array
            let names: Vec<String> = match response.json() {
                Ok(names) => names,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            for name in names {
                if let Some(subdomain) = session.extract(&name)
                    && !emitter.subdomain(subdomain).await
                {
                    return;
                }
            }
        })
    }
}
