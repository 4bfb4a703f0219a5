use redb::TableDefinition;

/// Users table: user id -> UserRecord (serialized)
pub const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Username index: username -> user id
/// Enforces username uniqueness and serves login lookup
pub const USERNAMES: TableDefinition<&str, u64> = TableDefinition::new("usernames");

/// Uploads table: upload id -> UploadRecord (serialized)
pub const UPLOADS: TableDefinition<u64, &[u8]> = TableDefinition::new("uploads");

/// Id allocation table: counter name -> last issued id
pub const NEXT_IDS: TableDefinition<&str, u64> = TableDefinition::new("next_ids");

/// Counter name for user ids
pub const USER_ID_COUNTER: &str = "user";

/// Counter name for upload ids
pub const UPLOAD_ID_COUNTER: &str = "upload";
