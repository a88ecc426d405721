use crate::error::Result;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{web, HttpResponse, HttpResponseBuilder};
use askama::Template;

#[cfg(test)]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool))
                .app_data(actix_web::web::Data::new(crate::auth::testing::test_state()))
                .wrap(actix_web::middleware::from_fn(
                    crate::lifecycle::connection_lifecycle,
                ))
                .configure(crate::routes::configure),
        )
        .await
    };
}

pub mod auth;
pub mod entries;

/// The route table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(entries::list))
        .route("/post/{id}", web::get().to(entries::view))
        .service(
            web::resource("/add")
                .route(web::get().to(entries::add_form))
                .route(web::post().to(entries::add)),
        )
        .route("/edit/{id}", web::get().to(entries::edit))
        .route("/update/{id}", web::post().to(entries::update))
        .service(
            web::resource("/login")
                .route(web::get().to(auth::login_form))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::get().to(auth::logout));
}

fn render<T: Template>(tmpl: T) -> Result<HttpResponse> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

fn redirect_home() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Found();
    builder.insert_header((LOCATION, "/"));
    builder
}
