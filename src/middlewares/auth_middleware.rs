//! JWT 인증 필터
//!
//! 요청 파이프라인에서 JWT 토큰을 추출·검증하고 요청 스코프 인증
//! 컨텍스트를 설정합니다.
//!
//! 요청별 상태 기계는 `익명 → 인증됨(user_id)` 두 상태뿐이며, 모든
//! 요청은 익명 상태로 시작합니다 (요청 간 인증 캐싱 없음). 검증에
//! 실패해도 요청을 거부하지 않고 익명 상태로 다음 단계에 전달합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::JwtAuthFilterService;

/// JWT 인증 필터
///
/// 항상 다음 단계로 요청을 전달하는 fail-open 필터입니다.
/// 인증이 필요한 엔드포인트의 최종 거부는
/// [`AuthenticatedPrincipal`](crate::domain::models::auth::authenticated_user::AuthenticatedPrincipal)
/// 추출자가 담당합니다.
#[derive(Default)]
pub struct JwtAuthFilter;

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for JwtAuthFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtAuthFilterService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthFilterService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::Method;
    use actix_web::{test, web, App, HttpResponse};

    use super::*;
    use crate::domain::models::auth::authenticated_user::OptionalPrincipal;
    use crate::services::auth::token_service::TokenService;

    async fn whoami(principal: OptionalPrincipal) -> HttpResponse {
        match principal.0 {
            Some(p) => HttpResponse::Ok().body(p.user_id),
            None => HttpResponse::Ok().body("anonymous"),
        }
    }

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl actix_web::body::MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(JwtAuthFilter)
            .route("/whoami", web::get().to(whoami))
            .route("/whoami", web::route().method(Method::OPTIONS).to(whoami))
    }

    #[actix_web::test]
    async fn test_valid_bearer_token_sets_principal() {
        let app = test::init_service(test_app()).await;

        let token = TokenService::instance().create("42").unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "42");
    }

    #[actix_web::test]
    async fn test_missing_header_stays_anonymous_and_forwards() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let res = test::call_service(&app, req).await;

        assert!(res.status().is_success());
        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_literal_null_token_stays_anonymous() {
        let app = test::init_service(test_app()).await;

        for literal in ["null", "NULL", "Null"] {
            let req = test::TestRequest::get()
                .uri("/whoami")
                .insert_header(("Authorization", format!("Bearer {}", literal)))
                .to_request();

            let body = test::call_and_read_body(&app, req).await;
            assert_eq!(body, "anonymous");
        }
    }

    #[actix_web::test]
    async fn test_tampered_token_stays_anonymous_and_forwards() {
        let app = test::init_service(test_app()).await;

        let token = TokenService::instance().create("42").unwrap();
        // 서명 마지막 문자를 변조
        let mut tampered = token;
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", tampered)))
            .to_request();

        let res = test::call_service(&app, req).await;

        // 필터는 요청을 거부하지 않고 익명으로 전달
        assert!(res.status().is_success());
        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_non_bearer_header_stays_anonymous() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn test_options_request_bypasses_filter() {
        let app = test::init_service(test_app()).await;

        // 유효한 토큰이 있어도 OPTIONS 요청은 토큰 추출을 건너뜀
        let token = TokenService::instance().create("42").unwrap();
        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }
}
