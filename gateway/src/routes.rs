use actix_session::Session;
use actix_web::{Responder, get, web};
use common::error::Res;
use common::http::Success;
use db::store::PgStore;

use api_auth::verifier::CredentialVerifier;

use crate::pipeline;

fn session_username(session: &Session) -> Option<String> {
    session.get::<String>("username").ok().flatten()
}

async fn serve(
    session: Session,
    store: web::Data<PgStore>,
    verifier: web::Data<dyn CredentialVerifier>,
    service: &str,
    message: &str,
) -> Res<impl Responder> {
    pipeline::enforce_service_access(
        store.get_ref(),
        verifier.get_ref(),
        session_username(&session),
        service,
    )
    .await?;
    Success::ok(serde_json::json!({ "message": message }))
}

/// Reports the currently logged-in user, if any.
#[get("/")]
pub async fn home(session: Session) -> Res<impl Responder> {
    Success::ok(serde_json::json!({ "user": session_username(&session) }))
}

#[get("/compute")]
pub async fn compute(
    session: Session,
    store: web::Data<PgStore>,
    verifier: web::Data<dyn CredentialVerifier>,
) -> Res<impl Responder> {
    serve(session, store, verifier, "compute", "Accessed compute service").await
}

#[get("/storage")]
pub async fn storage(
    session: Session,
    store: web::Data<PgStore>,
    verifier: web::Data<dyn CredentialVerifier>,
) -> Res<impl Responder> {
    serve(session, store, verifier, "storage", "Accessed storage service").await
}

#[get("/container")]
pub async fn container(
    session: Session,
    store: web::Data<PgStore>,
    verifier: web::Data<dyn CredentialVerifier>,
) -> Res<impl Responder> {
    serve(session, store, verifier, "container", "Accessed container service").await
}

#[get("/db")]
pub async fn database(
    session: Session,
    store: web::Data<PgStore>,
    verifier: web::Data<dyn CredentialVerifier>,
) -> Res<impl Responder> {
    serve(session, store, verifier, "db", "Accessed database service").await
}

#[get("/app")]
pub async fn app(
    session: Session,
    store: web::Data<PgStore>,
    verifier: web::Data<dyn CredentialVerifier>,
) -> Res<impl Responder> {
    serve(session, store, verifier, "app", "Accessed app service").await
}

#[get("/ai")]
pub async fn ai(
    session: Session,
    store: web::Data<PgStore>,
    verifier: web::Data<dyn CredentialVerifier>,
) -> Res<impl Responder> {
    serve(session, store, verifier, "ai", "Accessed AI model service").await
}
