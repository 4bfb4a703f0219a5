use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::db::store;
use crate::error::{AppError, Result};
use crate::models::UploadView;
use crate::session::{take_flash, Session};
use crate::AppState;

/// Show the initial image alongside every upload for its batch
///
/// The row set is every upload owned by the session user whose batch_number
/// matches the initial record's; the initial row itself matches and is
/// included.
pub async fn results(
    State(state): State<AppState>,
    Path(initial_image_id): Path<u64>,
    session: Session,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>)> {
    let user_id = session.user_id.ok_or(AppError::LoginRequired)?;

    let initial = store::get_upload(state.db.clone(), initial_image_id)
        .await?
        .ok_or(AppError::InitialImageNotFound)?;

    let rows = store::uploads_for_batch(state.db.clone(), user_id, initial.batch_number.clone())
        .await?;
    let compared_images: Vec<UploadView> = rows
        .iter()
        .map(|(id, record)| UploadView::from_record(*id, record))
        .collect();

    let (jar, flash) = take_flash(jar);
    Ok((
        jar,
        Json(json!({
            "page": "results",
            "initial_image": UploadView::from_record(initial_image_id, &initial),
            "compared_images": compared_images,
            "flash": flash,
        })),
    ))
}
