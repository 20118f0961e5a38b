use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use tracing::debug;

use super::invalid_json;
use crate::{
    api::validation,
    error::Error,
    models::orgs::RegisterOrgRequest,
    services::{auth::AuthenticatedUser, Services},
};

pub async fn check_membership(
    State(services): State<Services>,
    AuthenticatedUser { address, .. }: AuthenticatedUser,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %address, "POST org check");
    let response = services.orgs.check_membership(&address).await?;
    Ok(Json(response))
}

pub async fn register(
    State(services): State<Services>,
    AuthenticatedUser { address, .. }: AuthenticatedUser,
    payload: Result<Json<RegisterOrgRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %address, "POST org register");
    let Json(payload) = payload.map_err(invalid_json)?;
    let name = validation::require(payload.name.as_deref(), "name")?;
    let domain = validation::require(payload.domain.as_deref(), "domain")?;

    let response = services
        .orgs
        .register(&address, name, domain, payload.description.clone())
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        api::test_app,
        constants::{
            api::{ORG_CHECK_ENDPOINT, ORG_REGISTER_ENDPOINT},
            auth::ORG_OWNER_ROLE,
            test::orgs::{DEFAULT_ORG_DOMAIN, DEFAULT_ORG_NAME},
        },
        models::orgs::{MembershipResponse, RegisterOrgRequest, RegisterOrgResponse},
        test_utils::auth::{eth_wallet, login},
    };

    #[tokio::test]
    async fn register_then_check_membership() {
        let server = TestServer::new(test_app()).unwrap();
        let (address, signing_key) = eth_wallet();
        let (_, cookie) = login(&server, &address, &signing_key).await;

        // Before registration the wallet belongs to nothing
        let response = server
            .post(ORG_CHECK_ENDPOINT)
            .add_cookie(cookie.clone())
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let membership: MembershipResponse = response.json();
        assert!(!membership.exists);
        assert!(membership.organization.is_none());
        assert!(membership.role.is_none());

        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .add_cookie(cookie.clone())
            .json(&RegisterOrgRequest {
                name: Some(DEFAULT_ORG_NAME.to_string()),
                domain: Some("Vibent.Example".to_string()),
                description: Some("Events platform".to_string()),
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let registered: RegisterOrgResponse = response.json();
        assert_eq!(registered.organization.name, DEFAULT_ORG_NAME);
        // Domains are stored lowercased
        assert_eq!(registered.organization.domain, "vibent.example");
        assert_eq!(registered.member.address, address);
        assert_eq!(registered.member.role, ORG_OWNER_ROLE);
        assert_eq!(registered.member.organization_id, registered.organization.id);

        let response = server.post(ORG_CHECK_ENDPOINT).add_cookie(cookie).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let membership: MembershipResponse = response.json();
        assert!(membership.exists);
        assert_eq!(
            membership.organization.unwrap().id,
            registered.organization.id
        );
        assert_eq!(membership.role.as_deref(), Some(ORG_OWNER_ROLE));
    }

    #[tokio::test]
    async fn duplicate_domain_is_a_conflict() {
        let server = TestServer::new(test_app()).unwrap();

        let (address1, signing_key1) = eth_wallet();
        let (_, cookie1) = login(&server, &address1, &signing_key1).await;
        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .add_cookie(cookie1)
            .json(&RegisterOrgRequest {
                name: Some("First Org".to_string()),
                domain: Some(DEFAULT_ORG_DOMAIN.to_string()),
                description: None,
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        // Another wallet cannot claim the same domain, whatever the casing
        let (address2, signing_key2) = eth_wallet();
        let (_, cookie2) = login(&server, &address2, &signing_key2).await;
        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .add_cookie(cookie2.clone())
            .json(&RegisterOrgRequest {
                name: Some("Second Org".to_string()),
                domain: Some(DEFAULT_ORG_DOMAIN.to_uppercase()),
                description: None,
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::CONFLICT);
        let json: serde_json::Value = response.json();
        assert!(json["error"].as_str().unwrap().contains("already exists"));

        // The failed attempt must not leave the wallet with a membership
        let response = server.post(ORG_CHECK_ENDPOINT).add_cookie(cookie2).await;
        let membership: MembershipResponse = response.json();
        assert!(!membership.exists);
    }

    #[tokio::test]
    async fn register_requires_fields() {
        let server = TestServer::new(test_app()).unwrap();
        let (address, signing_key) = eth_wallet();
        let (_, cookie) = login(&server, &address, &signing_key).await;

        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .add_cookie(cookie.clone())
            .json(&RegisterOrgRequest {
                name: None,
                domain: Some(DEFAULT_ORG_DOMAIN.to_string()),
                description: None,
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = response.json();
        assert!(json["error"].as_str().unwrap().contains("name"));

        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .add_cookie(cookie)
            .json(&RegisterOrgRequest {
                name: Some(DEFAULT_ORG_NAME.to_string()),
                domain: Some("   ".to_string()),
                description: None,
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = response.json();
        assert!(json["error"].as_str().unwrap().contains("domain"));
    }

    #[tokio::test]
    async fn org_routes_require_session() {
        let server = TestServer::new(test_app()).unwrap();

        let response = server.post(ORG_CHECK_ENDPOINT).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .json(&RegisterOrgRequest {
                name: Some(DEFAULT_ORG_NAME.to_string()),
                domain: Some(DEFAULT_ORG_DOMAIN.to_string()),
                description: None,
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn each_wallet_sees_its_own_membership() {
        let server = TestServer::new(test_app()).unwrap();

        let (address1, signing_key1) = eth_wallet();
        let (_, cookie1) = login(&server, &address1, &signing_key1).await;
        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .add_cookie(cookie1.clone())
            .json(&RegisterOrgRequest {
                name: Some("Org One".to_string()),
                domain: Some("one.example".to_string()),
                description: None,
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let (address2, signing_key2) = eth_wallet();
        let (_, cookie2) = login(&server, &address2, &signing_key2).await;
        let response = server
            .post(ORG_REGISTER_ENDPOINT)
            .add_cookie(cookie2.clone())
            .json(&RegisterOrgRequest {
                name: Some("Org Two".to_string()),
                domain: Some("two.example".to_string()),
                description: None,
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let response = server.post(ORG_CHECK_ENDPOINT).add_cookie(cookie1).await;
        let membership: MembershipResponse = response.json();
        assert_eq!(membership.organization.unwrap().domain, "one.example");

        let response = server.post(ORG_CHECK_ENDPOINT).add_cookie(cookie2).await;
        let membership: MembershipResponse = response.json();
        assert_eq!(membership.organization.unwrap().domain, "two.example");
    }
}
