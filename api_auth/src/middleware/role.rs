use std::{future::Future, pin::Pin, rc::Rc};

use actix_session::SessionExt;
use actix_web::{
    Error, web,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::error::AppError;
use common::misc::Role;
use db::store::PgStore;
use futures::future::{Ready, ok};

use crate::identity;
use crate::verifier::CredentialVerifier;

/// Middleware restricting a scope to users holding a given role.
///
/// Resolves the session identity against the store and compares the
/// user's role to the required one. Plan and subscription state are
/// not consulted; this is the coarse administrative gate, not the
/// service-access pipeline.
pub struct RoleGuard {
    required_role: Role,
}

impl RoleGuard {
    pub fn new(required_role: Role) -> Self {
        RoleGuard { required_role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = RoleGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RoleGuardService {
            service: Rc::new(service),
            required_role: self.required_role,
        })
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    required_role: Role,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let required_role = self.required_role;
        let username = req
            .get_session()
            .get::<String>("username")
            .ok()
            .flatten();

        let store = req.app_data::<web::Data<PgStore>>().cloned();
        let verifier = req.app_data::<web::Data<dyn CredentialVerifier>>().cloned();

        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            let (Some(store), Some(verifier)) = (store, verifier) else {
                return Ok(req.error_response(AppError::Internal(
                    "Store or credential verifier not configured".to_string(),
                )));
            };

            match identity::require_role(store.get_ref(), verifier.get_ref(), username, required_role)
                .await
            {
                Ok(_) => srv.call(req).await.map(|res| res.map_into_boxed_body()),
                Err(err) => Ok(req.error_response(err)),
            }
        })
    }
}
