#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use host_security::{Right, SecurityContext};
use scaffolding::config::{IdentitySeed, ScaffoldingConfig};
use scaffolding::infra::storage::InMemoryIdentityStore;
use scaffolding::{IdentityRecord, ScaffoldingError, ScaffoldingModule};
use tower::ServiceExt;

fn seeds() -> ScaffoldingConfig {
    ScaffoldingConfig {
        identities: vec![
            IdentitySeed {
                name: "john.doe@example.com".to_owned(),
                id: "2c9180835d2e5168015d32f890ca1581".to_owned(),
                email: Some("john.doe@example.com".to_owned()),
            },
            IdentitySeed {
                name: "svc-reporting".to_owned(),
                id: "2c9180835d2e5168015d32f890ca1582".to_owned(),
                email: None,
            },
        ],
    }
}

#[tokio::test]
async fn client_reads_configured_identities() {
    let module = ScaffoldingModule::from_config(seeds()).unwrap();
    let client = module.client();

    let record = client.get_info(" svc-reporting ").await.unwrap();
    assert_eq!(
        record,
        IdentityRecord {
            name: "svc-reporting".to_owned(),
            id: "2c9180835d2e5168015d32f890ca1582".to_owned(),
            email: None,
        }
    );

    let err = client.get_info("nobody").await.unwrap_err();
    assert_eq!(err, ScaffoldingError::NotFound("Identity not found".to_owned()));
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = seeds();
    cfg.identities[1].name = "svc reporting".to_owned();

    assert!(ScaffoldingModule::from_config(cfg).is_err());
}

#[tokio::test]
async fn every_request_releases_its_context() {
    let store = Arc::new(InMemoryIdentityStore::new(
        seeds().identities.into_iter().map(IdentityRecord::from),
    ));
    let module = ScaffoldingModule::new(store.clone());
    let ctx = SecurityContext::builder()
        .subject("auditor")
        .right(Right::view_identity())
        .build();

    let uris = [
        "/scaffolding/info/john.doe@example.com",
        "/scaffolding/info/unknown",
        "/scaffolding/info/bad%20name",
        "/scaffolding/info",
    ];
    let mut handles = Vec::new();
    for round in 0..8 {
        let router = module.router().layer(axum::Extension(ctx.clone()));
        let uri = uris[round % uris.len()];
        handles.push(tokio::spawn(async move {
            router
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap()
                .status()
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        2
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::NOT_FOUND)
            .count(),
        2
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::BAD_REQUEST)
            .count(),
        4
    );
    assert_eq!(store.open_contexts(), 0);
}
