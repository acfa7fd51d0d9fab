//! Classification of database driver errors.

use sqlx::mysql::MySqlDatabaseError;

/// Client and server error numbers meaning the connection is no longer usable.
///
/// - 1053 `ER_SERVER_SHUTDOWN`
/// - 1927 `ER_CONNECTION_KILLED`
/// - 2006 `CR_SERVER_GONE_ERROR`
/// - 2013 `CR_SERVER_LOST`
/// - 4031 `ER_CLIENT_INTERACTION_TIMEOUT`
const DISCONNECT_ERROR_NUMBERS: &[u16] = &[1053, 1927, 2006, 2013, 4031];

/// Returns true if `e` says the server went away and the connection must be
/// re-established.
///
/// Authentication, syntax and constraint errors are not transient disconnects.
/// Neither are pool errors: `PoolTimedOut` means every connection is busy and
/// `PoolClosed` means the pool was already replaced.
pub fn is_transient_disconnect(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => {
            if let Some(mysql_err) = db_err.try_downcast_ref::<MySqlDatabaseError>() {
                return DISCONNECT_ERROR_NUMBERS.contains(&mysql_err.number());
            }
            is_disconnect_message(db_err.message())
        }
        sqlx::Error::Protocol(message) => is_disconnect_message(message),
        _ => false,
    }
}

fn is_disconnect_message(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("server has gone away")
        || message.contains("lost connection")
        || message.contains("connection was killed")
}
