//! Record access over the redb tables.
//!
//! Every create is one write transaction committed atomically; no multi-row
//! transaction spans request handlers. Blocking redb work runs on the
//! blocking pool so request tasks are not starved.

use redb::ReadableTable;

use super::{tables, Db};
use crate::error::{AppError, Result};
use crate::models::{UploadRecord, UserRecord};

/// Issue the next id from a named counter, inside the caller's transaction
fn next_id(table: &mut redb::Table<'_, &'static str, u64>, counter: &str) -> Result<u64> {
    let last = table.get(counter)?.map(|v| v.value()).unwrap_or(0);
    let id = last + 1;
    table.insert(counter, id)?;
    Ok(id)
}

/// Create a user row, enforcing username uniqueness
///
/// Returns the new user id, or `UsernameTaken` without touching the
/// existing row.
pub async fn create_user(db: Db, username: String, password_hash: String) -> Result<u64> {
    tokio::task::spawn_blocking(move || {
        let write_txn = db.begin_write()?;
        let id = {
            let mut usernames = write_txn.open_table(tables::USERNAMES)?;
            if usernames.get(username.as_str())?.is_some() {
                tracing::info!("Registration rejected, username taken: {}", username);
                return Err(AppError::UsernameTaken);
            }

            let mut next_ids = write_txn.open_table(tables::NEXT_IDS)?;
            let id = next_id(&mut next_ids, tables::USER_ID_COUNTER)?;
            drop(next_ids);

            usernames.insert(username.as_str(), id)?;
            drop(usernames);

            let record = UserRecord {
                username: username.clone(),
                password_hash,
                created_at: chrono::Utc::now().timestamp(),
            };
            let bytes = bincode::serialize(&record)?;
            let mut users = write_txn.open_table(tables::USERS)?;
            users.insert(id, bytes.as_slice())?;
            id
        };
        write_txn.commit()?;

        tracing::info!("New user registered: {} (id {})", username, id);
        Ok(id)
    })
    .await?
}

/// Look up a user by username for login
pub async fn find_user_by_username(db: Db, username: String) -> Result<Option<(u64, UserRecord)>> {
    tokio::task::spawn_blocking(move || {
        let read_txn = db.begin_read()?;

        let usernames = read_txn.open_table(tables::USERNAMES)?;
        let id = match usernames.get(username.as_str())? {
            Some(v) => v.value(),
            None => return Ok(None),
        };

        let users = read_txn.open_table(tables::USERS)?;
        let record: UserRecord = match users.get(id)? {
            Some(bytes) => bincode::deserialize(bytes.value())?,
            None => return Ok(None),
        };

        Ok(Some((id, record)))
    })
    .await?
}

/// Create an upload row and return its id
pub async fn create_upload(db: Db, record: UploadRecord) -> Result<u64> {
    tokio::task::spawn_blocking(move || {
        let write_txn = db.begin_write()?;
        let id = {
            let mut next_ids = write_txn.open_table(tables::NEXT_IDS)?;
            let id = next_id(&mut next_ids, tables::UPLOAD_ID_COUNTER)?;
            drop(next_ids);

            let bytes = bincode::serialize(&record)?;
            let mut uploads = write_txn.open_table(tables::UPLOADS)?;
            uploads.insert(id, bytes.as_slice())?;
            id
        };
        write_txn.commit()?;

        tracing::info!(
            "Upload row created: id {} batch {} user {}",
            id,
            record.batch_number,
            record.user_id
        );
        Ok(id)
    })
    .await?
}

/// Load a single upload row by id
pub async fn get_upload(db: Db, id: u64) -> Result<Option<UploadRecord>> {
    tokio::task::spawn_blocking(move || {
        let read_txn = db.begin_read()?;
        let uploads = read_txn.open_table(tables::UPLOADS)?;

        let record = uploads
            .get(id)?
            .map(|bytes| bincode::deserialize(bytes.value()))
            .transpose()?;

        Ok(record)
    })
    .await?
}

/// All upload rows for one user and batch, in id order
///
/// Includes the batch's initial row, which matches like any other.
pub async fn uploads_for_batch(
    db: Db,
    user_id: u64,
    batch_number: String,
) -> Result<Vec<(u64, UploadRecord)>> {
    tokio::task::spawn_blocking(move || {
        let read_txn = db.begin_read()?;
        let uploads = read_txn.open_table(tables::UPLOADS)?;

        let mut matching = Vec::new();
        for entry in uploads.iter()? {
            let (key, value) = entry?;
            let record: UploadRecord = bincode::deserialize(value.value())?;
            if record.user_id == user_id && record.batch_number == batch_number {
                matching.push((key.value(), record));
            }
        }

        Ok(matching)
    })
    .await?
}
