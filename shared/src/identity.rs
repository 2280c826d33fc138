//! Identity providers issuing the opaque id attached to leaderboard records.

use rand::RngCore;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::{IdentityConfig, IdentityMode};
use crate::constants::leaderboard_constants::ANONYMOUS_ID_PREFIX;
use crate::error::{AppError, AppResult};

/// Supplies a stable identity once available.
///
/// Callers only distinguish "not yet available" from "available"; a failed
/// acquisition is reported and the caller stays in the unavailable state.
pub trait IdentityProvider: Send + Sync {
    fn acquire(&mut self) -> AppResult<String>;
}

/// Random `anon-xxxxxxxx` ids. The id is generated on first acquisition and then reused.
pub struct AnonymousIdentity {
    rng: ChaCha8Rng,
    issued: Option<String>,
}

impl AnonymousIdentity {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            issued: None,
        }
    }

    /// Seeded from the wall clock, so separate installs issue different ids.
    pub fn from_clock() -> Self {
        Self::from_seed(crate::now_millis())
    }
}

impl IdentityProvider for AnonymousIdentity {
    fn acquire(&mut self) -> AppResult<String> {
        if let Some(id) = &self.issued {
            return Ok(id.clone());
        }
        let id = format!("{ANONYMOUS_ID_PREFIX}-{:08x}", self.rng.next_u32());
        log::info!("Issued anonymous identity {id}");
        self.issued = Some(id.clone());
        Ok(id)
    }
}

/// A fixed id supplied through configuration.
pub struct CustomIdentity {
    id: String,
}

impl CustomIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl IdentityProvider for CustomIdentity {
    fn acquire(&mut self) -> AppResult<String> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(AppError::AuthFailure("custom identity is empty".into()));
        }
        Ok(id.to_string())
    }
}

/// Builds the provider described by `config`.
pub fn provider_from_config(config: &IdentityConfig) -> Box<dyn IdentityProvider> {
    match config.mode {
        IdentityMode::Anonymous => Box::new(match config.seed {
            Some(seed) => AnonymousIdentity::from_seed(seed),
            None => AnonymousIdentity::from_clock(),
        }),
        IdentityMode::Custom => Box::new(CustomIdentity::new(
            config.custom_id.clone().unwrap_or_default(),
        )),
    }
}
