//! Caller identity.
//!
//! Authentication happens in front of this service; the gateway forwards the
//! authenticated player as an `X-Player-Id` header.

use actix_web::{
    dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest, Result as ActixResult,
};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

pub const PLAYER_HEADER: &str = "X-Player-Id";

/// The player a request acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerId(pub Uuid);

impl FromRequest for PlayerId {
    type Error = actix_web::Error;
    type Future = Ready<ActixResult<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
        let res = (|| {
            let hdr = req
                .headers()
                .get(PLAYER_HEADER)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ErrorUnauthorized("missing X-Player-Id header"))?;

            let id = Uuid::parse_str(hdr.trim())
                .map_err(|_| ErrorUnauthorized("malformed X-Player-Id header"))?;

            Ok(PlayerId(id))
        })();

        ready(res)
    }
}
