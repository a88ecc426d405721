diesel::table! {
    entries (id) {
        id -> Int4,
        title -> Varchar,
        text -> Text,
        created -> Timestamp,
    }
}
