//! Shared HTTPS client construction.

use std::sync::Arc;
use std::time::Duration;

use hyper::client::HttpConnector;
use hyper::{Body, Client};
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use webpki_roots::TLS_SERVER_ROOTS;

pub(crate) type HyperClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Builds a rustls-backed client trusting the bundled web PKI roots.
///
/// Idle connections are dropped after `idle_timeout`; the same value bounds
/// TCP connect time.
pub(crate) fn build_https_client(idle_timeout: Duration) -> HyperClient {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(Some(idle_timeout));

    let connector = HttpsConnector::from((http, Arc::new(config)));

    Client::builder()
        .pool_idle_timeout(idle_timeout)
        .build::<_, Body>(connector)
}
