use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use serde_json::{json, Value};

use crate::constants::{
    MSG_BATCH_AND_POWDER_REQUIRED, MSG_COMPARISON_UPLOADED, MSG_CYCLE_REQUIRED,
    MSG_INITIAL_UPLOADED, MSG_NO_FILE_PART, MSG_NO_SELECTED_FILE,
};
use crate::db::store;
use crate::error::{AppError, Result};
use crate::models::{UploadKind, UploadRecord};
use crate::session::{take_flash, Flash, Session};
use crate::storage::{sanitize_filename, save_file};
use crate::AppState;

/// Collected multipart submission: one expected file part plus text fields
#[derive(Debug, Default)]
struct UploadForm {
    file_present: bool,
    filename: String,
    data: Vec<u8>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

/// Drain a multipart body, treating `file_field` as the file part
async fn read_form(mut multipart: Multipart, file_field: &str) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            form.file_present = true;
            form.filename = field.file_name().unwrap_or_default().to_string();
            form.data = field.bytes().await?.to_vec();
        } else {
            form.fields.insert(name, field.text().await?);
        }
    }

    Ok(form)
}

/// Validate the file part in submission order: part present, then a usable
/// filename. Returns the sanitized filename.
fn require_file(form: &UploadForm, redirect: &str) -> Result<String> {
    if !form.file_present {
        return Err(AppError::FormRejected {
            message: MSG_NO_FILE_PART,
            redirect: redirect.to_string(),
        });
    }

    let sanitized = sanitize_filename(&form.filename);
    if form.filename.is_empty() || sanitized.is_empty() {
        return Err(AppError::FormRejected {
            message: MSG_NO_SELECTED_FILE,
            redirect: redirect.to_string(),
        });
    }

    Ok(sanitized)
}

/// Initial upload page data
pub async fn index_form(session: Session, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let (jar, flash) = take_flash(jar);
    (
        jar,
        Json(json!({
            "page": "index",
            "username": session.username,
            "flash": flash,
        })),
    )
}

/// Accept a batch's initial reference image
///
/// On success the new row id rides along in the session and in the redirect
/// target, so the comparison upload addresses its initial image explicitly.
pub async fn upload_initial(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect)> {
    let user_id = session.user_id.ok_or(AppError::LoginRequired)?;

    let form = read_form(multipart, "initial_image").await?;
    let filename = require_file(&form, "/")?;

    let batch_number = form.field("batch_number").to_string();
    let powder_type = form.field("powder_type").to_string();
    if batch_number.is_empty() || powder_type.is_empty() {
        return Err(AppError::FormRejected {
            message: MSG_BATCH_AND_POWDER_REQUIRED,
            redirect: "/".to_string(),
        });
    }

    save_file(
        std::path::Path::new(&state.config.upload_dir),
        &filename,
        &form.data,
    )
    .await?;

    let record = UploadRecord {
        user_id,
        batch_number,
        powder_type,
        image_path: filename,
        created_at: Utc::now().timestamp(),
        kind: UploadKind::Initial,
    };
    let id = store::create_upload(state.db.clone(), record).await?;

    let mut session = session;
    session.initial_image_id = Some(id);

    let jar = session.write_to(jar, &state.config.session_secret_key);
    let jar = Flash::success(MSG_INITIAL_UPLOADED).write_to(jar);
    Ok((jar, Redirect::to(&format!("/upload_new/{id}"))))
}

/// Comparison upload page data, prefilled from the initial record
pub async fn comparison_form(
    State(state): State<AppState>,
    Path(initial_image_id): Path<u64>,
    session: Session,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>)> {
    session.user_id.ok_or(AppError::LoginRequired)?;

    let initial = store::get_upload(state.db.clone(), initial_image_id)
        .await?
        .ok_or(AppError::InitialImageNotFound)?;

    let (jar, flash) = take_flash(jar);
    Ok((
        jar,
        Json(json!({
            "page": "upload_new",
            "initial_image_id": initial_image_id,
            "batch_number": initial.batch_number,
            "powder_type": initial.powder_type,
            "flash": flash,
        })),
    ))
}

/// Accept a comparison image for the initial image named in the path
///
/// batch_number and powder_type always come from the initial record, never
/// from the form. The prediction comes from the injected predictor.
pub async fn upload_comparison(
    State(state): State<AppState>,
    Path(initial_image_id): Path<u64>,
    session: Session,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<(CookieJar, Redirect)> {
    let user_id = session.user_id.ok_or(AppError::LoginRequired)?;

    let initial = store::get_upload(state.db.clone(), initial_image_id)
        .await?
        .ok_or(AppError::InitialImageNotFound)?;

    let back = format!("/upload_new/{initial_image_id}");
    let form = read_form(multipart, "new_image").await?;
    let filename = require_file(&form, &back)?;

    let cycle_number = form.field("cycle_number").to_string();
    if cycle_number.is_empty() {
        return Err(AppError::FormRejected {
            message: MSG_CYCLE_REQUIRED,
            redirect: back,
        });
    }

    let upload_dir = std::path::Path::new(&state.config.upload_dir);
    let candidate_path = save_file(upload_dir, &filename, &form.data).await?;
    let initial_path = upload_dir.join(&initial.image_path);

    let predicted_value = state.predictor.compare(&initial_path, &candidate_path);

    let record = UploadRecord {
        user_id,
        batch_number: initial.batch_number,
        powder_type: initial.powder_type,
        image_path: filename,
        created_at: Utc::now().timestamp(),
        kind: UploadKind::Comparison {
            cycle_number,
            predicted_value,
        },
    };
    store::create_upload(state.db.clone(), record).await?;

    let jar = Flash::success(MSG_COMPARISON_UPLOADED).write_to(jar);
    Ok((jar, Redirect::to(&format!("/results/{initial_image_id}"))))
}
