//! Per-IP rate limiting for the login endpoints

use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU32;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::warn;

use catalog_shared::config::RateLimitSettings;

use crate::error::ApiError;
use crate::extract::client_ip;
use crate::state::AppState;

pub struct LoginRateLimiter {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
}

impl LoginRateLimiter {
    pub fn new(settings: &RateLimitSettings) -> Self {
        let per_minute = NonZeroU32::new(settings.login_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(settings.login_burst).unwrap_or(per_minute);
        let quota = Quota::per_minute(per_minute).allow_burst(burst);
        Self { limiter: RateLimiter::keyed(quota) }
    }

    /// Consumes one attempt for `ip`; false once the quota is spent.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.limiter.check_key(&ip).is_ok()
    }

    /// Forgets addresses whose quota has fully refilled. Returns how many
    /// addresses are still tracked.
    pub fn purge_idle(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        self.limiter.len()
    }
}

pub async fn limit_login(State(state): State<AppState>, req: Request, next: Next) -> Result<Response, ApiError> {
    let trust_forwarded = state.config.rate_limit.trust_forwarded;
    let ip = client_ip(req.headers(), req.extensions(), trust_forwarded)
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if !state.login_limiter.check(ip) {
        warn!(%ip, path = %req.uri().path(), "Login rate limit exceeded");
        return Err(ApiError::TooManyRequests);
    }
    Ok(next.run(req).await)
}
