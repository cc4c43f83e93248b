//! Classification of sqlx errors for the batch loader.
//!
//! Connectivity failures end a batch; everything else is scoped to the one
//! document being written.

/// SQLSTATE codes outside class `08` that still mean the session is gone:
/// admin shutdown, crash shutdown, cannot connect now.
const SESSION_TERMINATED_CODES: &[&str] = &["57P01", "57P02", "57P03"];

/// Whether an error means the store is unreachable or the session is dead.
pub fn is_connectivity_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => code.starts_with("08") || SESSION_TERMINATED_CODES.contains(&&*code),
            None => false,
        },
        _ => false,
    }
}

/// Whether an error is an integrity constraint violation (SQLSTATE class `23`).
pub fn is_constraint_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.starts_with("23")),
        _ => false,
    }
}
