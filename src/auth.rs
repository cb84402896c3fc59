use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use uuid::Uuid;

use crate::{identity::IdentityState, policy::Role};

/// Header carrying the authenticated user id, set by the upstream identity
/// gateway once it has verified the session.
pub const USER_ID_HEADER: &str = "x-user-id";

/// AuthUser Extractor Result
///
/// The resolved identity of an authenticated request. Handlers read `role` from
/// here and hand it to the access policy.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// AuthUser Extractor Implementation
///
/// Token verification happens upstream; this extractor only:
/// 1. reads the user id from the `x-user-id` header,
/// 2. looks it up in the identity directory to obtain the current role.
///
/// Rejection: 401 when the header is missing or malformed or the user is
/// unknown, 503 when the directory itself fails.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    IdentityState: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let directory = IdentityState::from_ref(state);

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let user = match directory.get_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!(%user_id, "unknown user id presented");
                return Err(StatusCode::UNAUTHORIZED);
            }
            Err(e) => {
                tracing::error!(%user_id, error = %e, "identity lookup failed");
                return Err(StatusCode::SERVICE_UNAVAILABLE);
            }
        };

        // The session is valid but the role label is not one the dashboard
        // knows. It still authenticates; the policy gives it zero access.
        if !user.role.is_recognized() {
            tracing::warn!(%user_id, "user has an unrecognized role");
        }

        Ok(AuthUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        })
    }
}
