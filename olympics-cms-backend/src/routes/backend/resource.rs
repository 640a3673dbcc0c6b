use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use olympics_cms_database::{Collection, DocumentId};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::csrf_protection::{CsrfSafeForm, DeleteForm, Submission};
use crate::error::{AppError, ViewError};
use crate::resource::{FieldErrors, Resource, ResourceForm, ResourceList};
use crate::routes::{Banner, Pagination, LOGIN};
use crate::session::Session;
use crate::AppState;

#[derive(Deserialize, Debug, Default)]
pub struct ResourceQuery {
    page: Option<usize>,
    /// Id of the record to load into the form.
    edit: Option<String>,
}

impl ResourceQuery {
    fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Serialize)]
struct Row<'a, R> {
    id: &'a str,
    record: &'a R,
}

#[derive(Serialize)]
struct ResourcePage<'a, R: Resource> {
    kind: &'static str,
    page: usize,
    form_title: &'static str,
    draft: &'a R::Draft,
    edit_id: Option<&'a str>,
    errors: &'a FieldErrors,
    options: serde_json::Value,
    rows: Vec<Row<'a, R>>,
    pagination: Pagination,
    banner: Banner,
}

fn render<R: Resource>(
    state: &AppState,
    session: Session,
    page: usize,
    list: &ResourceList<R>,
    form: &ResourceForm<R>,
    banner: Banner,
) -> Result<(Session, Response), AppError> {
    let rows = list
        .page(page)
        .iter()
        .map(|record| Row {
            id: record.id.as_str(),
            record: &record.data,
        })
        .collect();
    let html = state.templates.render(
        &session,
        R::KIND,
        form.title(),
        ResourcePage::<R> {
            kind: R::KIND,
            page,
            form_title: form.title(),
            draft: form.draft(),
            edit_id: form.edit_target().map(DocumentId::as_str),
            errors: form.errors(),
            options: R::options(),
            rows,
            pagination: Pagination::new(
                format!("/backend/{}?", R::KIND),
                page,
                list.page_count(),
            ),
            banner,
        },
    )?;
    Ok((session, html.into_response()))
}

async fn load<R: Resource>(
    state: &AppState,
    collection: &Collection<'_, R>,
    page: usize,
) -> (ResourceList<R>, Banner) {
    let mut list = ResourceList::default();
    list.load_for(
        state.listing,
        collection,
        page,
        ViewError::Fetch(R::MESSAGES.fetch_failed),
    )
    .await;
    let mut banner = Banner::default();
    banner.list(&list);
    (list, banner)
}

fn logged_out(session: Session) -> (Session, Response) {
    (session, Redirect::to(LOGIN).into_response())
}

pub async fn show<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ResourceQuery>,
) -> Result<(Session, Response), AppError> {
    if session.login().is_none() {
        return Ok(logged_out(session));
    }
    let page = query.page();
    let collection = state.collection::<R>();
    let (list, mut banner) = load(&state, &collection, page).await;
    let mut form = ResourceForm::<R>::default();
    if let Some(edit) = query.edit.as_deref().filter(|edit| !edit.is_empty()) {
        let started = DocumentId::parse(edit)
            .map_err(|_err| ViewError::EditTargetMissing)
            .and_then(|id| form.begin_edit(&list, &id));
        if let Err(err) = started {
            banner.error(err);
        }
    }
    render(&state, session, page, &list, &form, banner)
}

pub async fn submit<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
    CsrfSafeForm { session, value }: CsrfSafeForm<Submission<R::Draft>>,
) -> Result<(Session, Response), AppError> {
    if session.login().is_none() {
        return Ok(logged_out(session));
    }
    let page = query.page();
    let collection = state.collection::<R>();
    let (mut list, mut banner) = load(&state, &collection, page).await;
    let edit_target = match value.edit_id.trim() {
        "" => Ok(None),
        id => DocumentId::parse(id).map(Some),
    };
    let form = match edit_target {
        Ok(edit_target) => {
            let mut form = ResourceForm::<R>::submitted(value.draft, edit_target);
            match form.submit(&collection, &mut list).await {
                Ok(submitted) => banner.success(submitted.message::<R>()),
                Err(err) => banner.error(err),
            }
            form
        }
        Err(_) => {
            banner.error(ViewError::EditTargetMissing);
            ResourceForm::<R>::submitted(value.draft, None)
        }
    };
    render(&state, session, page, &list, &form, banner)
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
    CsrfSafeForm { session, value }: CsrfSafeForm<DeleteForm>,
) -> Result<(Session, Response), AppError> {
    if session.login().is_none() {
        return Ok(logged_out(session));
    }
    let page = query.page();
    let collection = state.collection::<R>();
    let (mut list, mut banner) = load(&state, &collection, page).await;
    let deleted = match DocumentId::parse(&value.id) {
        Ok(id) => collection.delete(&id).await.map(|()| id).map_err(|err| {
            error!("deleting from {} failed: {err}", collection.id());
        }),
        Err(err) => {
            error!("{err}");
            Err(())
        }
    };
    match deleted {
        Ok(id) => {
            info!("deleted {} {id}", R::KIND);
            list.apply_deleted(&id);
            banner.success(R::MESSAGES.deleted);
        }
        Err(()) => banner.error(ViewError::Delete(R::MESSAGES.delete_failed)),
    }
    render(&state, session, page, &list, &ResourceForm::default(), banner)
}

