use mongodb::error::{ErrorKind, WriteFailure};

/// MongoDB server error code for a unique index violation.
const MONGO_DUPLICATE_KEY: i32 = 11000;

/// Returns true if the Postgres error is a unique violation on `urls.short_code`.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("urls_short_code_key"))
}

/// Returns true if the MongoDB error is a duplicate key write error.
pub fn is_mongo_duplicate_key(e: &mongodb::error::Error) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == MONGO_DUPLICATE_KEY
        }
        _ => false,
    }
}
