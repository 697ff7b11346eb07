//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{CurrentUserQueryImpl, SignInServiceImpl, UserRepository};
use backend::inbound::http::applications::{dashboard, list_applications, submit_application};
use backend::inbound::http::auth::{login, logout, me};
use backend::inbound::http::catalogue::list_visa_types;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselApplicationRepository, DieselUserRepository, DieselVisaTypeRepository,
};

/// Build the HTTP state from configuration.
///
/// Uses Diesel-backed adapters when a pool is configured; otherwise serves
/// in-memory fixtures so a development instance runs without PostgreSQL.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => {
            let users: Arc<dyn UserRepository> =
                Arc::new(DieselUserRepository::new(pool.clone()));
            Ok(HttpState::new(
                Arc::new(SignInServiceImpl::new(users.clone())),
                Arc::new(CurrentUserQueryImpl::new(users)),
                Arc::new(DieselVisaTypeRepository::new(pool.clone())),
                Arc::new(DieselApplicationRepository::new(pool.clone())),
            ))
        }
        None => HttpState::fixtures()
            .map_err(|err| std::io::Error::other(format!("fixture catalogue seed: {err}"))),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(me)
        .service(logout)
        .service(list_visa_types)
        .service(list_applications)
        .service(submit_application)
        .service(dashboard);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark it ready once bound.
pub fn run(config: &ServerConfig) -> std::io::Result<Server> {
    let health_state = web::Data::new(HealthState::new());
    let http_state = web::Data::new(build_http_state(config)?);

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        key: config.key.clone(),
        cookie_secure: config.cookie_secure,
        same_site: config.same_site,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
