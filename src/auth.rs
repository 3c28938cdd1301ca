//! The seam between the out-of-scope authentication layer and this API.
//!
//! The fronting auth proxy authenticates each request and injects the
//! signed-in user's ID as the [VIEWER_ID_HEADER] header. This module only
//! extracts that identity, it does not authenticate anything itself.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{Error, user::UserId};

/// The header the auth layer uses to pass the signed-in user's ID.
pub const VIEWER_ID_HEADER: &str = "x-user-id";

/// The identity of the user making the current request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer(pub UserId);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(VIEWER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i64>().ok())
            .ok_or(Error::Unauthorized)?;

        Ok(Viewer(UserId::new(id)))
    }
}
