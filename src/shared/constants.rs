/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum rows returned by the admin user directory listing
pub const MAX_USER_LISTING: i64 = 500;
