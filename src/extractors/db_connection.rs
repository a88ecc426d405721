use crate::db::Conn;
use crate::error::{JournalError, Result};
use crate::lifecycle::RequestScope;
use actix_web::{dev, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{err, ok, Ready};
use std::cell::RefMut;
use std::rc::Rc;

/// Handle on the request-scoped connection opened by the lifecycle middleware.
pub struct DbConnection {
    scope: Rc<RequestScope>,
}

impl DbConnection {
    pub fn get(&self) -> Result<RefMut<'_, Conn>> {
        self.scope.connection()
    }
}

impl FromRequest for DbConnection {
    type Error = Error;
    type Future = Ready<std::result::Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut dev::Payload) -> Self::Future {
        match req.extensions().get::<Rc<RequestScope>>() {
            Some(scope) => ok(DbConnection {
                scope: scope.clone(),
            }),
            None => err(JournalError::Storage(diesel::result::Error::NotInTransaction).into()),
        }
    }
}
