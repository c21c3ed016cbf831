//! 인증 토큰 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동합니다.
//! 토큰 저장소(Redis 또는 인메모리)와 토큰 코덱을 초기화한 뒤
//! `AppContext`로 묶어 모든 워커에 공유합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use auth_token_service::caching::{InMemoryTokenStore, RedisClient, TokenStore};
use auth_token_service::config::{
    CacheBackend, CacheConfig, CookieSettings, Environment, JwtSettings, ServerConfig,
    UpstreamAuthConfig,
};
use auth_token_service::core::AppContext;
use auth_token_service::errors::ErrorContext;
use auth_token_service::repositories::users::UserRepository;
use auth_token_service::routes::configure_all_routes;
use auth_token_service::utils::clock::{Clock, SystemClock};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 인증 토큰 서비스 시작중... (environment: {:?})", Environment::current());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let jwt = JwtSettings::from_env()
        .context("JWT 설정 로드 실패")
        .map_err(io::Error::other)?;
    let store = initialize_token_store(clock.clone()).await?;
    let users = Arc::new(UserRepository::new(clock.clone()));

    let mut context = AppContext::new(&jwt, store, users, CookieSettings::from_env(), clock)
        .context("토큰 코덱 초기화 실패")
        .map_err(io::Error::other)?;

    match UpstreamAuthConfig::secret() {
        Some(secret) => context = context.with_upstream_secret(secret),
        None => warn!("⚠️ UPSTREAM_AUTH_SECRET 미설정: 로그인 요청이 모두 거부됩니다"),
    }

    info!(
        "✅ 서비스 초기화 완료 (access {}분, refresh {}초)",
        jwt.access_lifetime.num_minutes(),
        jwt.refresh_ttl_seconds()
    );

    // HTTP 서버 시작
    start_http_server(web::Data::new(context)).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, Rate Limiting, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - Rate Limiting 설정 오류, 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(context: web::Data<AppContext>) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1/auth", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            .app_data(context.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 설정된 백엔드로 리프레시 토큰 저장소를 생성합니다
///
/// * `CACHE_BACKEND=redis` (기본값) - `REDIS_URL`에 연결, 실패하면 기동 중단
/// * `CACHE_BACKEND=memory` - 프로세스 로컬 저장소 (재시작 시 모든 세션 소멸)
async fn initialize_token_store(clock: Arc<dyn Clock>) -> io::Result<Arc<dyn TokenStore>> {
    match CacheConfig::backend() {
        CacheBackend::Redis => {
            info!("📡 Redis 연결 중...");
            let redis = RedisClient::new(&CacheConfig::redis_url())
                .await
                .context("Redis 연결 실패")
                .map_err(io::Error::other)?;
            Ok(Arc::new(redis))
        }
        CacheBackend::Memory => {
            if !Environment::current().allows_insecure_defaults() {
                warn!("⚠️ 인메모리 토큰 저장소는 여러 인스턴스 간에 공유되지 않습니다");
            }
            info!("🧠 인메모리 토큰 저장소 사용");
            Ok(Arc::new(InMemoryTokenStore::new(clock)))
        }
    }
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// CORS 설정을 구성합니다
///
/// `CORS_ALLOWED_ORIGINS`(쉼표 구분)가 없으면 로컬 개발 Origin을 허용합니다.
/// 리프레시 토큰 쿠키를 주고받기 위해 자격 증명을 허용합니다.
fn configure_cors() -> Cors {
    let origins = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| {
        "http://localhost:3000,http://127.0.0.1:3000,http://localhost:8080,http://127.0.0.1:8080"
            .to_string()
    });

    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
