//! The request-scoped authn/tenant context (§3.1, §6, §9 Design Notes).
//! Stands in for the external JWT verifier this spec does not implement:
//! a real deployment replaces this extractor's body, not its shape, once
//! a verified-identity middleware sits in front of the router.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

// Layer 3: Internal module imports
use crate::error::AppError;

const TENANT_HEADER: &str = "x-abaco-tenant";
const USER_HEADER: &str = "x-abaco-user";
const API_SERVER_HEADER: &str = "x-abaco-api-server";
const JWT_HEADER_NAME_HEADER: &str = "x-abaco-jwt-header-name";

/// Per-request caller identity. Built from inbound headers by an axum
/// extractor; a handler that cannot build one fails 401 before touching
/// any store (§6 Request context).
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub tenant: String,
    pub user: String,
    pub api_server: String,
    pub jwt_header_name: Option<String>,
    /// Minted fresh per request for log correlation (§3.1); never part of
    /// the external contract.
    pub request_id: Uuid,
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| -> Option<String> {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let tenant = header(TENANT_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Unauthenticated("missing tenant context".into()))?;
        let user = header(USER_HEADER)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Unauthenticated("missing user context".into()))?;
        let api_server = header(API_SERVER_HEADER).unwrap_or_default();
        let jwt_header_name = header(JWT_HEADER_NAME_HEADER);

        Ok(Self {
            tenant,
            user,
            api_server,
            jwt_header_name,
            request_id: Uuid::new_v4(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(req: Request<()>) -> Result<RequestContext, AppError> {
        let (mut parts, _) = req.into_parts();
        RequestContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn missing_tenant_is_rejected() {
        let req = Request::builder()
            .header(USER_HEADER, "alice")
            .body(())
            .unwrap();
        assert!(matches!(extract(req).await, Err(AppError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn missing_user_is_rejected() {
        let req = Request::builder()
            .header(TENANT_HEADER, "T")
            .body(())
            .unwrap();
        assert!(matches!(extract(req).await, Err(AppError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn full_headers_populate_context() {
        let req = Request::builder()
            .header(TENANT_HEADER, "T")
            .header(USER_HEADER, "alice")
            .header(API_SERVER_HEADER, "https://api.example.com")
            .body(())
            .unwrap();
        let ctx = extract(req).await.unwrap();
        assert_eq!(ctx.tenant, "T");
        assert_eq!(ctx.user, "alice");
        assert_eq!(ctx.api_server, "https://api.example.com");
        assert_eq!(ctx.jwt_header_name, None);
    }
}
