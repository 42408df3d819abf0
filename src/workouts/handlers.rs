use axum::{
    extract::{rejection::FormRejection, FromRef, State},
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info, instrument, warn};

use crate::{
    notice::{self, Notice, NoticeKeys},
    state::AppState,
    views,
};

use super::dto::NewTrainingForm;
use super::services::submit;

pub const NEW_TRAINING_PATH: &str = "/new-training";

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

pub fn training_routes() -> Router<AppState> {
    Router::new().route(
        NEW_TRAINING_PATH,
        get(new_training_form).post(create_training),
    )
}

pub async fn dashboard() -> Html<&'static str> {
    Html(views::dashboard_page())
}

#[instrument(skip(state, jar))]
pub async fn new_training_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let keys = NoticeKeys::from_ref(&state);
    let (jar, notice) = notice::take(jar, &keys);
    (jar, Html(views::new_training_page(notice.as_ref())))
}

/// POST /new-training
/// Always redirects back to the empty form; the outcome travels as a notice.
#[instrument(skip(state, jar, form))]
pub async fn create_training(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<NewTrainingForm>, FormRejection>,
) -> (CookieJar, Redirect) {
    let notice = match form {
        Err(rejection) => {
            warn!(error = %rejection, "unreadable submission");
            Notice::danger(rejection.body_text())
        }
        Ok(Form(form)) => match submit(state.store.as_ref(), &form).await {
            Ok(session_id) => {
                info!(session_id, "workout saved");
                Notice::success("Workout saved.")
            }
            Err(e) if e.is_validation() => {
                warn!(error = %e, "submission rejected");
                Notice::danger(e.to_string())
            }
            Err(e) => {
                error!(error = %e, "persisting workout failed");
                Notice::danger(e.to_string())
            }
        },
    };

    let keys = NoticeKeys::from_ref(&state);
    (
        notice::attach(jar, &keys, &notice),
        Redirect::to(NEW_TRAINING_PATH),
    )
}
