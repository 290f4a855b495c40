//! crt.sh certificate transparency search
//!
//! crt.sh exposes its `certwatch` Postgres database to a public `guest`
//! user. The database is tried first; the JSON endpoint is the fallback
//! when it is unreachable or knows nothing about the domain.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scout_application::{
    CancellationToken, ResultEmitter, ResultStream, ScrapeSession, SessionError, Source,
};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

const CERTWATCH_QUERY: &str = "SELECT DISTINCT ci.NAME_VALUE AS domain FROM certificate_identity ci \
     WHERE reverse(lower(ci.NAME_VALUE)) LIKE reverse(lower($1)) \
     ORDER BY ci.NAME_VALUE";

/// Upper bound on connecting to and querying `certwatch`
const CERTWATCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct CertificateEntry {
    /// Newline-separated SAN / CN values
    name_value: String,
}

/// Split a crt.sh JSON payload into candidate names
fn parse_names(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let entries: Vec<CertificateEntry> = serde_json::from_str(body)?;
    Ok(entries
        .iter()
        .flat_map(|e| e.name_value.split('\n'))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect())
}

/// Direct lookup of certificate names for a domain
#[async_trait]
pub trait CertificateIndex: Send + Sync {
    async fn names_for(&self, domain: &str) -> Result<Vec<String>, SessionError>;
}

/// The public `certwatch` database on `crt.sh:5432`
#[derive(Debug, Clone)]
pub struct CertwatchDatabase {
    options: PgConnectOptions,
}

impl CertwatchDatabase {
    pub fn new() -> Self {
        Self {
            options: PgConnectOptions::new()
                .host("crt.sh")
                .port(5432)
                .username("guest")
                .database("certwatch")
                .ssl_mode(PgSslMode::Disable),
        }
    }

    async fn query(&self, domain: &str) -> Result<Vec<String>, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(CERTWATCH_TIMEOUT)
            .connect_with(self.options.clone())
            .await?;

        let names = sqlx::query_scalar::<_, String>(CERTWATCH_QUERY)
            .bind(format!("%.{}", domain))
            .fetch_all(&pool)
            .await;

        pool.close().await;
        names
    }
}

impl Default for CertwatchDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CertificateIndex for CertwatchDatabase {
    async fn names_for(&self, domain: &str) -> Result<Vec<String>, SessionError> {
        match tokio::time::timeout(CERTWATCH_TIMEOUT, self.query(domain)).await {
            Ok(Ok(names)) => Ok(names),
            Ok(Err(e)) => Err(SessionError::Network(format!("certwatch: {}", e))),
            Err(_) => Err(SessionError::Network(format!(
                "certwatch: no answer within {:?}",
                CERTWATCH_TIMEOUT
            ))),
        }
    }
}

/// Certificates logged for `%.<domain>` on crt.sh
pub struct CrtSh {
    database: Option<Arc<dyn CertificateIndex>>,
}

impl CrtSh {
    pub fn new() -> Self {
        Self {
            database: Some(Arc::new(CertwatchDatabase::new())),
        }
    }

    /// Skip the database and use the JSON endpoint only
    pub fn http_only() -> Self {
        Self { database: None }
    }

    pub fn with_database(database: Arc<dyn CertificateIndex>) -> Self {
        Self {
            database: Some(database),
        }
    }
}

impl Default for CrtSh {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CrtSh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrtSh")
            .field("database", &self.database.is_some())
            .finish()
    }
}

/// Emit extracted names; returns how many were emitted, `None` once the
/// consumer has gone away
async fn emit_names(
    emitter: &ResultEmitter,
    session: &dyn ScrapeSession,
    names: &[String],
) -> Option<usize> {
    let mut count = 0;
    for name in names {
        if let Some(subdomain) = session.extract(name) {
            if !emitter.subdomain(subdomain).await {
                return None;
            }
            count += 1;
        }
    }
    Some(count)
}

impl Source for CrtSh {
    fn name(&self) -> &str {
        "crtsh"
    }

    fn is_default(&self) -> bool {
        true
    }

    fn has_recursive_support(&self) -> bool {
        true
    }

    fn needs_key(&self) -> bool {
        false
    }

    fn add_api_keys(&mut self, _keys: Vec<String>) {
        // no key needed
    }

    fn run(
        &self,
        cancel: CancellationToken,
        domain: &str,
        session: Arc<dyn ScrapeSession>,
    ) -> ResultStream {
        let database = self.database.clone();
        let domain = domain.to_string();
        let url = format!("https://crt.sh/?q=%25.{}&output=json", domain);

        ResultStream::spawn(self.name(), move |emitter| async move {
            if let Some(database) = database {
                let lookup = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    lookup = database.names_for(&domain) => lookup,
                };
                match lookup {
                    Ok(names) => match emit_names(&emitter, session.as_ref(), &names).await {
                        None => return,
                        Some(count) if count > 0 => return,
                        Some(_) => {}
                    },
                    Err(e) => {
                        if !emitter.report(e).await {
                            return;
                        }
                    }
                }
            }

            let response = match session.simple_get(&cancel, &url).await {
                Ok(response) => response,
                Err(e) => {
                    emitter.report(e).await;
                    return;
                }
            };

            match parse_names(&response.body) {
                Ok(names) => {
                    emit_names(&emitter, session.as_ref(), &names).await;
                }
                Err(e) => {
                    emitter.error(e).await;
                }
            }
        })
    }
}
