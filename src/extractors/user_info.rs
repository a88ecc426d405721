use crate::auth::AppState;
use crate::error::JournalError;
use actix_web::error::ErrorInternalServerError;
use actix_web::{dev, web::Data, Error, FromRequest, HttpRequest};
use futures::future::{err, ok, Ready};

fn identify(req: &HttpRequest) -> Result<Option<String>, Error> {
    let state = req
        .app_data::<Data<AppState>>()
        .ok_or_else(|| ErrorInternalServerError("application state not configured"))?;
    Ok(state.session.identify(req))
}

/// Whoever is behind the request; `username` is `None` for anonymous visitors.
pub struct CurrentUser {
    pub username: Option<String>,
}

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<CurrentUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        match identify(req) {
            Ok(username) => ok(CurrentUser { username }),
            Err(e) => err(e),
        }
    }
}

/// Rejects the request with 403 unless the session names a user.
pub struct AuthenticatedUser {
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        match identify(req) {
            Ok(Some(username)) => ok(AuthenticatedUser { username }),
            Ok(None) => err(JournalError::Unauthorized.into()),
            Err(e) => err(e),
        }
    }
}
