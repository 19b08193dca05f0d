use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

use crate::domain::model::Operator;

/// Identity headers set by the fronting authentication proxy. Requests
/// reach this service only through that proxy, which strips any client
/// supplied values before forwarding.
pub const USER_HEADER: &str = "x-forwarded-user";
pub const GROUPS_HEADER: &str = "x-forwarded-groups";

impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .ok_or((StatusCode::UNAUTHORIZED, "Missing identity"))?
            .to_string();

        let groups = parts
            .headers
            .get(GROUPS_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|group| !group.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Operator { username, groups })
    }
}
