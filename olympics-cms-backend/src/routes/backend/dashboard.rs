use axum::response::Redirect;
use olympics_cms_database::models::Athlete;

use crate::resource::Resource as _;
use crate::routes::LOGIN;
use crate::session::Session;

/// The dashboard opens on the athletes form.
pub async fn dashboard(session: Session) -> (Session, Redirect) {
    let target = if session.login().is_some() {
        format!("/backend/{}", Athlete::KIND)
    } else {
        LOGIN.to_owned()
    };
    (session, Redirect::to(&target))
}
