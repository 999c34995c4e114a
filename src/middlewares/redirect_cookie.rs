//! 리디렉션 URL 쿠키 필터
//!
//! 소셜 로그인 시작 시 클라이언트가 보낸 `redirect_url` 파라미터를
//! 쿠키로 저장해 두고, 로그인 완료 후 해당 URL로 리다이렉트하기 위한
//! 기반을 마련합니다. 서버 세션이 없으므로 OAuth 핸드셰이크의 두 구간
//! (시작과 완료) 사이 상태는 브라우저가 쿠키로 들고 있습니다.
//!
//! 동작 흐름:
//!
//! ```text
//! GET /oauth2/authorization/google?redirect_url=http://localhost:3000/welcome
//! → Set-Cookie: redirect_url=http://localhost:3000/welcome; Max-Age=180; Path=/; HttpOnly
//! → 로그인 완료 핸들러가 consume_redirect_url()로 다시 꺼내 사용
//! ```
//!
//! 캡처 단계의 어떤 실패도 핸드셰이크를 중단시키지 않습니다 — 로그만
//! 남기고 기본 리디렉션 대상으로 로그인이 계속됩니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::cookie::{time::Duration, Cookie};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpRequest, Result};
use futures_util::future::LocalBoxFuture;

/// 요청 파라미터 및 쿠키 이름
pub const REDIRECT_URI_PARAM: &str = "redirect_url";

/// 쿠키 유효 시간: 180초
const MAX_AGE_SECONDS: i64 = 180;

/// 소셜 로그인 시작 경로 접두사
const LOGIN_INITIATION_PREFIX: &str = "/oauth2/authorization";

/// 리디렉션 URL 쿠키 필터
///
/// `/oauth2/authorization`으로 시작하는 요청에서만 동작하며,
/// 나머지 요청은 그대로 통과시킵니다.
#[derive(Default)]
pub struct RedirectUrlCookieFilter;

impl<S, B> Transform<S, ServiceRequest> for RedirectUrlCookieFilter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RedirectUrlCookieFilterService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectUrlCookieFilterService {
            service: Rc::new(service),
        }))
    }
}

/// 쿠키 저장 로직을 수행하는 서비스
pub struct RedirectUrlCookieFilterService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RedirectUrlCookieFilterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        // 소셜 로그인 시작 요청에서만 redirect_url 캡처
        let redirect_url = if req.path().starts_with(LOGIN_INITIATION_PREFIX) {
            log::info!("소셜 로그인 시작: {}", req.path());
            extract_redirect_url(&req)
        } else {
            None
        };

        Box::pin(async move {
            let mut res = service.call(req).await?;

            if let Some(url) = redirect_url {
                let cookie = Cookie::build(REDIRECT_URI_PARAM, url)
                    .path("/")
                    .http_only(true)
                    .max_age(Duration::seconds(MAX_AGE_SECONDS))
                    .finish();

                // 쿠키 설정 실패도 핸드셰이크를 중단시키지 않음
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    log::error!("redirect_url 쿠키 설정 실패: {}", e);
                }
            }

            Ok(res)
        })
    }
}

/// 쿼리 스트링에서 redirect_url 파라미터를 추출
///
/// 파라미터가 없거나 비어 있거나 디코딩에 실패하면 None을 반환합니다
/// (실패는 로그 후 무시).
fn extract_redirect_url(req: &ServiceRequest) -> Option<String> {
    for pair in req.query_string().split('&') {
        if let Some((name, value)) = pair.split_once('=') {
            if name == REDIRECT_URI_PARAM {
                return match urlencoding::decode(value) {
                    Ok(decoded) if !decoded.is_empty() => Some(decoded.into_owned()),
                    Ok(_) => None,
                    Err(e) => {
                        log::error!("redirect_url 파라미터 디코딩 실패: {}", e);
                        None
                    }
                };
            }
        }
    }

    None
}

/// 요청 쿠키에서 저장된 리디렉션 URL을 꺼냅니다.
///
/// 로그인 완료 시점에 호출됩니다. 해당 쿠키가 없거나 쿠키가 아예 없는
/// 요청이면 None을 반환하며 (기본 리디렉션 대상 사용), 쿠키를 명시적으로
/// 삭제하지는 않습니다 — 만료는 브라우저가 처리합니다.
pub fn consume_redirect_url(req: &HttpRequest) -> Option<String> {
    req.cookie(REDIRECT_URI_PARAM)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App, HttpResponse};

    use super::*;

    async fn probe() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_capture_sets_cookie_on_login_initiation_path() {
        let app = test::init_service(
            App::new()
                .wrap(RedirectUrlCookieFilter)
                .route("/oauth2/authorization/google", web::get().to(probe)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/oauth2/authorization/google?redirect_url=http%3A%2F%2Fx%2Fy")
            .to_request();
        let res = test::call_service(&app, req).await;

        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == REDIRECT_URI_PARAM)
            .expect("redirect_url cookie should be set");

        assert_eq!(cookie.value(), "http://x/y");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(180)));
    }

    #[actix_web::test]
    async fn test_no_cookie_without_redirect_url_parameter() {
        let app = test::init_service(
            App::new()
                .wrap(RedirectUrlCookieFilter)
                .route("/oauth2/authorization/google", web::get().to(probe)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/oauth2/authorization/google")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert!(res.status().is_success());
        assert!(res
            .response()
            .cookies()
            .all(|c| c.name() != REDIRECT_URI_PARAM));
    }

    #[actix_web::test]
    async fn test_other_paths_are_ignored() {
        let app = test::init_service(
            App::new()
                .wrap(RedirectUrlCookieFilter)
                .route("/todo", web::get().to(probe)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/todo?redirect_url=http%3A%2F%2Fx%2Fy")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert!(res
            .response()
            .cookies()
            .all(|c| c.name() != REDIRECT_URI_PARAM));
    }

    #[actix_web::test]
    async fn test_consume_round_trip() {
        let req = test::TestRequest::default()
            .cookie(Cookie::new(REDIRECT_URI_PARAM, "http://x/y"))
            .to_http_request();

        assert_eq!(consume_redirect_url(&req), Some("http://x/y".to_string()));
    }

    #[actix_web::test]
    async fn test_consume_without_any_cookies_is_none() {
        // 쿠키가 하나도 없는 요청도 "쿠키 없음"과 동일하게 처리
        let req = test::TestRequest::default().to_http_request();

        assert_eq!(consume_redirect_url(&req), None);
    }
}
