//! Request-scoped database connection.
//!
//! [`connection_lifecycle`] wraps every request in a [`RequestScope`]. The
//! first handler that asks for a connection checks one out of the pool and
//! opens a transaction on it. When the handler is done the transaction is
//! committed, or rolled back if the handler failed, and the connection goes
//! back to the pool on every path. A commit that fails turns the response
//! into a 500.

use crate::db::{Conn, DbPool};
use crate::error::{JournalError, Result};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::ErrorInternalServerError;
use actix_web::middleware::Next;
use actix_web::{web::Data, Error, HttpMessage};
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::PgConnection;
use log::{debug, error};
use std::cell::{RefCell, RefMut};
use std::rc::Rc;

pub struct RequestScope {
    pool: DbPool,
    conn: RefCell<Option<Conn>>,
}

impl RequestScope {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            conn: RefCell::new(None),
        }
    }

    /// Returns the request's connection, checking it out on first use.
    pub fn connection(&self) -> Result<RefMut<'_, Conn>> {
        let mut slot = self.conn.borrow_mut();
        if slot.is_none() {
            let mut conn = self.pool.get()?;
            let pg: &mut PgConnection = &mut conn;
            AnsiTransactionManager::begin_transaction(pg)?;
            *slot = Some(conn);
        }
        RefMut::filter_map(slot, Option::as_mut)
            .map_err(|_| JournalError::Storage(diesel::result::Error::NotInTransaction))
    }

    pub fn is_open(&self) -> bool {
        self.conn.borrow().is_some()
    }

    /// Commits when `success`, rolls back otherwise, and releases the connection.
    ///
    /// A failed commit is returned so the caller can turn the response into an error.
    pub fn finish(&self, success: bool) -> Result<()> {
        let mut conn = match self.conn.borrow_mut().take() {
            Some(conn) => conn,
            None => return Ok(()),
        };
        let pg: &mut PgConnection = &mut conn;
        if !success {
            debug!("rolling back request transaction");
            return Ok(AnsiTransactionManager::rollback_transaction(pg)?);
        }
        if let Err(e) = AnsiTransactionManager::commit_transaction(pg) {
            if let Err(rollback) = AnsiTransactionManager::rollback_transaction(pg) {
                debug!("rollback after failed commit: {}", rollback);
            }
            return Err(e.into());
        }
        Ok(())
    }
}

impl Drop for RequestScope {
    // a dropped request future must not hand an open transaction back to the pool
    fn drop(&mut self) {
        if let Err(e) = self.finish(false) {
            error!("rollback failed: {}", e);
        }
    }
}

/// Middleware installing a [`RequestScope`] around each request.
pub async fn connection_lifecycle(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> std::result::Result<ServiceResponse<BoxBody>, Error> {
    let pool = req
        .app_data::<Data<DbPool>>()
        .ok_or_else(|| ErrorInternalServerError("database pool not configured"))?
        .get_ref()
        .clone();
    let scope = Rc::new(RequestScope::new(pool));
    req.extensions_mut().insert(scope.clone());

    let res = match next.call(req).await {
        Ok(res) => res,
        Err(e) => {
            if let Err(rollback) = scope.finish(false) {
                error!("rollback failed: {}", rollback);
            }
            return Err(e);
        }
    };
    let success = res.response().error().is_none() && !res.status().is_server_error();
    match scope.finish(success) {
        Ok(()) => Ok(res.map_into_boxed_body()),
        Err(e) if success => Ok(res.error_response(e)),
        Err(e) => {
            error!("rollback failed: {}", e);
            Ok(res.map_into_boxed_body())
        }
    }
}
