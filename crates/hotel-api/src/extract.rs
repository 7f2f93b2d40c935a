//! Actor extraction from request headers
//!
//! Identity and role are resolved by the gateway in front of this service
//! and forwarded as headers. Missing or malformed headers degrade to an
//! anonymous Guest rather than failing the request; role checks happen in
//! the handlers.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use hotel_core::models::{Actor, Role};

/// Headers carrying the forwarded identity
pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";
pub const ACTOR_NAME_HEADER: &str = "X-Actor-Name";
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

/// The acting agent, extracted from forwarded headers
pub struct RequestActor(pub Actor);

impl FromRequest for RequestActor {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
        };

        let id = header(ACTOR_ID_HEADER).and_then(|v| v.parse::<i32>().ok());
        let name = header(ACTOR_NAME_HEADER).unwrap_or("anonymous").to_string();
        let role = header(ACTOR_ROLE_HEADER)
            .map(Role::from_str)
            .unwrap_or_default();

        ready(Ok(RequestActor(Actor::new(id, name, role))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_full_headers() {
        let req = TestRequest::default()
            .insert_header((ACTOR_ID_HEADER, "7"))
            .insert_header((ACTOR_NAME_HEADER, "reception"))
            .insert_header((ACTOR_ROLE_HEADER, "Receptionist"))
            .to_http_request();

        let RequestActor(actor) = RequestActor::extract(&req).await.unwrap();
        assert_eq!(actor.id, Some(7));
        assert_eq!(actor.name, "reception");
        assert_eq!(actor.role, Role::Receptionist);
    }

    #[actix_web::test]
    async fn test_missing_headers_degrade_to_guest() {
        let req = TestRequest::default().to_http_request();

        let RequestActor(actor) = RequestActor::extract(&req).await.unwrap();
        assert_eq!(actor.id, None);
        assert_eq!(actor.name, "anonymous");
        assert_eq!(actor.role, Role::Guest);
        assert!(!actor.is_staff());
    }

    #[actix_web::test]
    async fn test_unknown_role_degrades_to_guest() {
        let req = TestRequest::default()
            .insert_header((ACTOR_ROLE_HEADER, "root"))
            .to_http_request();

        let RequestActor(actor) = RequestActor::extract(&req).await.unwrap();
        assert_eq!(actor.role, Role::Guest);
    }
}
