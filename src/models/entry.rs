use crate::error::{JournalError, Result};
use crate::schema::entries;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = entries)]
pub struct Entry {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub created: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = entries)]
struct NewEntry<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub created: NaiveDateTime,
}

/// Fields overwritten by [`Entry::update`]. `created` is left untouched when `None`.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = entries)]
pub struct EntryChanges<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub created: Option<NaiveDateTime>,
}

impl Entry {
    /// All entries, newest first.
    pub fn list_all(conn: &mut PgConnection) -> Result<Vec<Entry>> {
        let rows = entries::table
            .order((entries::created.desc(), entries::id.desc()))
            .load::<Entry>(conn)?;
        Ok(rows)
    }

    pub fn find(conn: &mut PgConnection, entry_id: i32) -> Result<Entry> {
        entries::table
            .find(entry_id)
            .first::<Entry>(conn)
            .optional()?
            .ok_or(JournalError::NotFound(entry_id))
    }

    pub fn create(
        conn: &mut PgConnection,
        title: &str,
        text: &str,
        created: NaiveDateTime,
    ) -> Result<i32> {
        let new_entry = NewEntry {
            title,
            text,
            created,
        };
        let id = diesel::insert_into(entries::table)
            .values(&new_entry)
            .returning(entries::id)
            .get_result::<i32>(conn)?;
        Ok(id)
    }

    pub fn update(conn: &mut PgConnection, entry_id: i32, changes: &EntryChanges) -> Result<()> {
        let updated = diesel::update(entries::table.find(entry_id))
            .set(changes)
            .execute(conn)?;
        if updated == 0 {
            return Err(JournalError::NotFound(entry_id));
        }
        Ok(())
    }
}
