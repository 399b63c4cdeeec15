/// JWT authentication middleware for Bearer token validation.
/// Validates the access token statelessly and adds the authenticated
/// identity to request extensions.
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Role;
use crate::security::jwt;

/// Identity extracted from a validated access token
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub role: Role,
}

/// JWT authentication middleware factory
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // Copy the header to an owned String so no borrow of `req` is
            // alive when extensions_mut() is called below.
            let auth_header = match req.headers().get("Authorization") {
                Some(header) => match header.to_str() {
                    Ok(h) => h.to_string(),
                    Err(_) => {
                        return Err(AppError::Unauthenticated(
                            "invalid Authorization header".to_string(),
                        )
                        .into());
                    }
                },
                None => {
                    return Err(AppError::Unauthenticated(
                        "missing Authorization header".to_string(),
                    )
                    .into());
                }
            };

            let token = match auth_header.strip_prefix("Bearer ") {
                Some(t) => t,
                None => {
                    return Err(AppError::Unauthenticated(
                        "expected Bearer authorization scheme".to_string(),
                    )
                    .into());
                }
            };

            let claims = match jwt::validate_access_token(token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!("Access token rejected: {}", e);
                    return Err(e.into());
                }
            };

            let user_id = match claims.user_id() {
                Ok(id) => id,
                Err(_) => {
                    return Err(
                        AppError::Unauthenticated("invalid token subject".to_string()).into(),
                    );
                }
            };

            req.extensions_mut().insert(AuthenticatedUser {
                id: user_id,
                role: claims.role,
            });

            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().copied() {
            Some(user) => ready(Ok(user)),
            None => ready(Err(AppError::Unauthenticated(
                "authentication context missing".to_string(),
            )
            .into())),
        }
    }
}
