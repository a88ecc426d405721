use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type Conn = PooledConnection<ConnectionManager<PgConnection>>;

const DB_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS entries (
        id serial PRIMARY KEY,
        title VARCHAR (127) NOT NULL,
        text TEXT NOT NULL,
        created TIMESTAMP NOT NULL
    )";

pub fn create_connection_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("Failed to create pool.")
}

/// Creates the `entries` table when it does not exist yet.
pub fn init_schema(conn: &mut PgConnection) -> QueryResult<()> {
    diesel::sql_query(DB_SCHEMA).execute(conn)?;
    Ok(())
}
