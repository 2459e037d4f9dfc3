/// Starting cash allowance credited to every account, in account currency
/// units. The balance shown to a user is this allowance plus the signed sum
/// of their ledger; the allowance itself is never written to the database.
pub const BASE_CASH: f64 = 50_000.0;

/// Default lifetime of a login session, in seconds.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60 * 24;
