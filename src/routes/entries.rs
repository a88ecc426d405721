use super::{redirect_home, render};
use crate::error::Result;
use crate::extractors::{AuthenticatedUser, CurrentUser, DbConnection};
use crate::models::{Entry, EntryChanges};
use crate::renderer;
use actix_web::{web, HttpResponse};
use actix_web_validator::Form;
use askama::Template;
use chrono::Utc;
use log::info;
use serde::Deserialize;
use validator::Validate;

/// An entry prepared for display, with its text already rendered to HTML.
pub struct EntryView {
    pub id: i32,
    pub title: String,
    pub html: String,
    pub created: String,
}

impl From<&Entry> for EntryView {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            html: renderer::render(&entry.text),
            created: entry.created.format("%b %d, %Y").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "list.html")]
struct ListTemplate {
    authenticated: bool,
    entries: Vec<EntryView>,
}

#[derive(Template)]
#[template(path = "entry.html")]
struct EntryTemplate {
    authenticated: bool,
    entry: EntryView,
}

#[derive(Template)]
#[template(path = "add.html")]
struct AddTemplate {
    authenticated: bool,
}

#[derive(Template)]
#[template(path = "edit.html")]
struct EditTemplate {
    authenticated: bool,
    entry: Entry,
}

#[derive(Deserialize, Validate, Debug)]
pub struct EntryForm {
    #[validate(length(min = 1, max = 127))]
    pub title: String,
    #[validate(length(min = 1))]
    pub text: String,
}

pub async fn list(user: CurrentUser, db: DbConnection) -> Result<HttpResponse> {
    let entries = {
        let mut conn = db.get()?;
        Entry::list_all(&mut conn)?
    };
    render(ListTemplate {
        authenticated: user.is_authenticated(),
        entries: entries.iter().map(EntryView::from).collect(),
    })
}

pub async fn view(
    user: CurrentUser,
    db: DbConnection,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let entry = {
        let mut conn = db.get()?;
        Entry::find(&mut conn, path.into_inner())?
    };
    render(EntryTemplate {
        authenticated: user.is_authenticated(),
        entry: EntryView::from(&entry),
    })
}

pub async fn add_form(_user: AuthenticatedUser) -> Result<HttpResponse> {
    render(AddTemplate {
        authenticated: true,
    })
}

pub async fn add(
    user: AuthenticatedUser,
    db: DbConnection,
    form: Form<EntryForm>,
) -> Result<HttpResponse> {
    let mut conn = db.get()?;
    let id = Entry::create(&mut conn, &form.title, &form.text, Utc::now().naive_utc())?;
    info!("{} created entry {}", user.username, id);
    Ok(redirect_home().finish())
}

pub async fn edit(
    _user: AuthenticatedUser,
    db: DbConnection,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let entry = {
        let mut conn = db.get()?;
        Entry::find(&mut conn, path.into_inner())?
    };
    render(EditTemplate {
        authenticated: true,
        entry,
    })
}

pub async fn update(
    user: AuthenticatedUser,
    db: DbConnection,
    path: web::Path<i32>,
    form: Form<EntryForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let changes = EntryChanges {
        title: &form.title,
        text: &form.text,
        created: None,
    };
    let mut conn = db.get()?;
    Entry::update(&mut conn, id, &changes)?;
    info!("{} updated entry {}", user.username, id);
    Ok(redirect_home().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::test_state;
    use crate::db::testing::{delete_entries_titled, test_pool, unreachable_pool};
    use crate::session::AUTH_COOKIE;
    use actix_web::body::MessageBody;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::header::LOCATION;
    use actix_web::test;

    const INPUT_BTN: &str = "<input type='submit' value='Add post' name='Add post' />";

    fn admin_cookie() -> Cookie<'static> {
        test_state().session.remember("admin").unwrap()
    }

    fn unique_title(prefix: &str) -> String {
        format!("{} {}", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
    }

    async fn body_string<B: MessageBody>(resp: ServiceResponse<B>) -> String {
        let body = test::read_body(resp).await;
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[actix_rt::test]
    async fn test_list_template_add_control() {
        let anonymous = ListTemplate {
            authenticated: false,
            entries: vec![],
        }
        .render()
        .unwrap();
        assert!(!anonymous.contains(INPUT_BTN));
        assert!(anonymous.contains("Nothin!"));

        let admin = ListTemplate {
            authenticated: true,
            entries: vec![],
        }
        .render()
        .unwrap();
        assert!(admin.contains(INPUT_BTN));
    }

    #[actix_rt::test]
    async fn test_list_template_renders_entries() {
        let html = ListTemplate {
            authenticated: false,
            entries: vec![EntryView {
                id: 7,
                title: "<b>Title</b>".to_owned(),
                html: renderer::render("Some *text*"),
                created: "Jan 01, 2020".to_owned(),
            }],
        }
        .render()
        .unwrap();
        assert!(html.contains("&lt;b&gt;Title&lt;/b&gt;"));
        assert!(html.contains("<p>Some <em>text</em></p>"));
        assert!(html.contains("/post/7"));
        assert!(!html.contains("Nothin!"));
        assert!(!html.contains("/edit/7"));
    }

    #[actix_rt::test]
    async fn test_writes_require_login() {
        let app = test_app!(unreachable_pool());
        let requests = vec![
            test::TestRequest::get().uri("/add").to_request(),
            test::TestRequest::post()
                .uri("/add")
                .set_form(&[("title", "Hello there"), ("text", "This is a post")])
                .to_request(),
            test::TestRequest::get().uri("/edit/1").to_request(),
            test::TestRequest::post()
                .uri("/update/1")
                .set_form(&[("title", "Hello there"), ("text", "This is a post")])
                .to_request(),
        ];
        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 403);
        }
    }

    #[actix_rt::test]
    async fn test_add_form_for_admin() {
        let app = test_app!(unreachable_pool());
        let req = test::TestRequest::get()
            .uri("/add")
            .cookie(admin_cookie())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        assert!(body_string(resp).await.contains(INPUT_BTN));
    }

    #[actix_rt::test]
    async fn test_add_validation() {
        let app = test_app!(unreachable_pool());
        let long_title = "x".repeat(128);
        let invalid: Vec<Vec<(&str, &str)>> = vec![
            vec![("title", ""), ("text", "text")],
            vec![("title", "title"), ("text", "")],
            vec![("title", long_title.as_str()), ("text", "text")],
            vec![("title", "only a title")],
        ];
        for form in invalid {
            let req = test::TestRequest::post()
                .uri("/add")
                .cookie(admin_cookie())
                .set_form(&form)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 400);
        }
    }

    #[actix_rt::test]
    async fn test_forged_cookie_is_anonymous() {
        let app = test_app!(unreachable_pool());
        let req = test::TestRequest::get()
            .uri("/add")
            .cookie(Cookie::new(AUTH_COOKIE, "admin"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403);
    }

    #[actix_rt::test]
    async fn test_post_to_add_view() {
        let pool = test_pool();
        let app = test_app!(pool.clone());
        let title = unique_title("Hello there");
        let req = test::TestRequest::post()
            .uri("/add")
            .cookie(admin_cookie())
            .set_form(&[("title", title.as_str()), ("text", "This is a post")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 302);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/");

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let body = body_string(resp).await;
        assert!(body.contains(&title));
        assert!(body.contains("This is a post"));
        assert!(!body.contains(INPUT_BTN));

        delete_entries_titled(&pool, &title);
    }

    #[actix_rt::test]
    async fn test_edit_and_update() {
        let pool = test_pool();
        let app = test_app!(pool.clone());
        let title = unique_title("Before");
        let id = {
            let mut conn = pool.get().unwrap();
            Entry::create(&mut conn, &title, "old text", Utc::now().naive_utc()).unwrap()
        };

        let req = test::TestRequest::get()
            .uri(&format!("/edit/{}", id))
            .cookie(admin_cookie())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let body = body_string(resp).await;
        assert!(body.contains(&format!("/update/{}", id)));
        assert!(body.contains("old text"));

        let new_title = unique_title("After");
        let req = test::TestRequest::post()
            .uri(&format!("/update/{}", id))
            .cookie(admin_cookie())
            .set_form(&[("title", new_title.as_str()), ("text", "new **text**")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 302);

        let req = test::TestRequest::get().uri("/").to_request();
        let body = body_string(test::call_service(&app, req).await).await;
        assert!(body.contains(&new_title));
        assert!(body.contains("new <strong>text</strong>"));
        assert!(!body.contains(&title));

        let mut conn = pool.get().unwrap();
        let entry = Entry::find(&mut conn, id).unwrap();
        assert_eq!(entry.title, new_title);
        assert_eq!(entry.text, "new **text**");
        delete_entries_titled(&pool, &new_title);
    }

    #[actix_rt::test]
    async fn test_view_entry() {
        let pool = test_pool();
        let app = test_app!(pool.clone());
        let title = unique_title("Viewed");
        let id = {
            let mut conn = pool.get().unwrap();
            Entry::create(&mut conn, &title, "# Heading", Utc::now().naive_utc()).unwrap()
        };
        let req = test::TestRequest::get()
            .uri(&format!("/post/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        let body = body_string(resp).await;
        assert!(body.contains(&title));
        assert!(body.contains("<h1>Heading</h1>"));
        delete_entries_titled(&pool, &title);
    }

    #[actix_rt::test]
    async fn test_missing_entry() {
        let pool = test_pool();
        let app = test_app!(pool);
        let missing = i32::MAX;
        let req = test::TestRequest::get()
            .uri(&format!("/post/{}", missing))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);

        let req = test::TestRequest::get()
            .uri(&format!("/edit/{}", missing))
            .cookie(admin_cookie())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);

        let req = test::TestRequest::post()
            .uri(&format!("/update/{}", missing))
            .cookie(admin_cookie())
            .set_form(&[("title", "t"), ("text", "x")])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 404);
    }
}
