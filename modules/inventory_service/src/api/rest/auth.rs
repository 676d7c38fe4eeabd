//! Bearer token extractor

use crate::contract::{AuthContext, InventoryError};
use crate::domain::AccountService;
use super::error::{map_domain_error, Problem};
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use std::sync::Arc;

/// The authenticated caller, resolved from `Authorization: Bearer <token>`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accounts = parts
            .extensions
            .get::<Arc<AccountService>>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("AccountService extension missing from router");
                Problem::internal()
            })?;

        let token = bearer_token(&parts.headers)
            .ok_or_else(|| map_domain_error(InventoryError::unauthorized("Not authenticated")))?;

        let ctx = accounts
            .authenticate(token)
            .await
            .map_err(map_domain_error)?;
        Ok(CurrentUser(ctx))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
