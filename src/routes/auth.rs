use super::{redirect_home, render};
use crate::auth::AppState;
use crate::error::{JournalError, Result};
use crate::extractors::CurrentUser;
use actix_web::{web, HttpResponse};
use askama::Template;
use log::{info, warn};
use serde::Deserialize;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    authenticated: bool,
    error: String,
    username: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct LoginForm {
    username: Option<String>,
    password: Option<String>,
}

pub async fn login_form(user: CurrentUser) -> Result<HttpResponse> {
    render(LoginTemplate {
        authenticated: user.is_authenticated(),
        error: String::new(),
        username: String::new(),
    })
}

// a body that is not a form is treated as a login with no fields
pub async fn login(
    state: web::Data<AppState>,
    form: Option<web::Form<LoginForm>>,
) -> Result<HttpResponse> {
    let LoginForm { username, password } = form.map(web::Form::into_inner).unwrap_or_default();
    let authenticated = match state.admin.check(username.as_deref(), password.as_deref()) {
        Ok(valid) => valid,
        // same answer as a wrong password, the client learns nothing more
        Err(JournalError::InvalidInput) => false,
        Err(e) => return Err(e),
    };
    let username = username.unwrap_or_default();
    if authenticated {
        info!("{} logged in", username);
        let cookie = state.session.remember(&username)?;
        return Ok(redirect_home().cookie(cookie).finish());
    }
    warn!("failed login attempt");
    render(LoginTemplate {
        authenticated: false,
        error: "Login Failed".to_owned(),
        username,
    })
}

pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    redirect_home().cookie(state.session.forget()).finish()
}
