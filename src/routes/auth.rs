use axum::{
    extract::State,
    response::{Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{MSG_CREDENTIALS_REQUIRED, MSG_LOGGED_IN, MSG_LOGGED_OUT, MSG_REGISTERED};
use crate::db::store;
use crate::error::{AppError, Result};
use crate::models::UserRecord;
use crate::security::{hash_password, verify_password};
use crate::session::{take_flash, Flash, Session};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Registration page data (flash only; the form itself is template territory)
pub async fn register_form(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let (jar, flash) = take_flash(jar);
    (jar, Json(json!({ "page": "register", "flash": flash })))
}

/// Create a new account
///
/// Stores a salted PBKDF2-SHA256 hash, never the plain password. A taken
/// username re-prompts without touching the existing account.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response> {
    if !UserRecord::validate_username(&form.username) || form.password.is_empty() {
        return Err(AppError::FormRejected {
            message: MSG_CREDENTIALS_REQUIRED,
            redirect: "/register".to_string(),
        });
    }

    let password_hash = hash_password(&form.password)?;
    store::create_user(state.db.clone(), form.username, password_hash).await?;

    Ok(Flash::success(MSG_REGISTERED).into_redirect("/login"))
}

/// Login page data
pub async fn login_form(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let (jar, flash) = take_flash(jar);
    (jar, Json(json!({ "page": "login", "flash": flash })))
}

/// Authenticate and establish the session
///
/// Every failure path answers with the same generic message so usernames
/// cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect)> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(AppError::BadCredentials);
    }

    let (user_id, record) = store::find_user_by_username(state.db.clone(), form.username)
        .await?
        .ok_or(AppError::BadCredentials)?;

    if !verify_password(&form.password, &record.password_hash) {
        tracing::info!("Failed login for user id {}", user_id);
        return Err(AppError::BadCredentials);
    }

    let mut session = session;
    session.user_id = Some(user_id);
    session.username = Some(record.username);

    let jar = session.write_to(jar, &state.config.session_secret_key);
    let jar = Flash::success(MSG_LOGGED_IN).write_to(jar);
    Ok((jar, Redirect::to("/")))
}

/// Clear the session
///
/// The cookie is stateless, so clearing it is the whole story; there is no
/// server-side token to revoke.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = Session::default().write_to(jar, &state.config.session_secret_key);
    let jar = Flash::info(MSG_LOGGED_OUT).write_to(jar);
    (jar, Redirect::to("/login"))
}
