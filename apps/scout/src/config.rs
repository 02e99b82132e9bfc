use anyhow::{bail, Context, Result};
use chrono::FixedOffset;

const DEFAULT_PAGE_LIMIT: u32 = 50;
const DEFAULT_MAX_PAGES: u32 = 5;
/// Asia/Kolkata has no DST, so a fixed offset is exact.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;
const DEFAULT_TZ_LABEL: &str = "IST";

/// Gate criteria applied to every fetched posting.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// Lowercased, trimmed, non-empty.
    pub keywords: Vec<String>,
    pub min_budget: f64,
    pub require_payment_verified: bool,
}

/// Fixed timezone used when rendering timestamps for the operator.
#[derive(Debug, Clone)]
pub struct DisplayZone {
    pub offset: FixedOffset,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct MarketplaceSettings {
    pub access_token: String,
    pub page_limit: u32,
    pub max_pages: u32,
}

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}

/// Process configuration, read once at startup and never mutated.
/// Any missing required variable fails before the run begins.
#[derive(Debug, Clone)]
pub struct Config {
    pub criteria: FilterCriteria,
    pub score_threshold: f64,
    pub profile_summary: String,
    /// When set, a scoring response that cannot be parsed skips that job
    /// instead of aborting the run.
    pub skip_malformed_scores: bool,
    pub display_zone: DisplayZone,
    pub marketplace: MarketplaceSettings,
    pub telegram: TelegramSettings,
    pub anthropic_api_key: String,
    pub database_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let keywords = parse_keywords(&env.require("JOB_KEYWORDS")?);
        if keywords.is_empty() {
            bail!("JOB_KEYWORDS must contain at least one keyword");
        }

        let offset_minutes = env.parse_or("DISPLAY_UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES)?;
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .with_context(|| format!("DISPLAY_UTC_OFFSET_MINUTES out of range: {offset_minutes}"))?;

        let max_pages = env.parse_or("MARKETPLACE_MAX_PAGES", DEFAULT_MAX_PAGES)?;
        let page_limit = env.parse_or("MARKETPLACE_PAGE_LIMIT", DEFAULT_PAGE_LIMIT)?;
        if page_limit == 0 {
            bail!("MARKETPLACE_PAGE_LIMIT must be greater than zero");
        }
        // The last page offset must fit in the request parameter.
        if page_limit.checked_mul(max_pages).is_none() {
            bail!("MARKETPLACE_PAGE_LIMIT * MARKETPLACE_MAX_PAGES is too large");
        }

        Ok(Config {
            criteria: FilterCriteria {
                keywords,
                min_budget: env.parse_finite("MIN_BUDGET")?,
                require_payment_verified: env.flag_or("REQUIRE_PAYMENT_VERIFIED", true),
            },
            score_threshold: env.parse_finite("AI_SCORE_THRESHOLD")?,
            profile_summary: env.require("YOUR_PROFILE_SUMMARY")?,
            skip_malformed_scores: env.flag_or("SKIP_MALFORMED_SCORES", false),
            display_zone: DisplayZone {
                offset,
                label: env
                    .get("DISPLAY_TZ_LABEL")
                    .unwrap_or_else(|| DEFAULT_TZ_LABEL.to_string()),
            },
            marketplace: MarketplaceSettings {
                access_token: env.require("FL_ACCESS_TOKEN")?,
                page_limit,
                max_pages,
            },
            telegram: TelegramSettings {
                bot_token: env.require("TELEGRAM_BOT_TOKEN")?,
                chat_id: env.require("TELEGRAM_CHAT_ID")?,
            },
            anthropic_api_key: env.require("ANTHROPIC_API_KEY")?,
            database_url: env.require("DATABASE_URL")?,
            rust_log: env.get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Splits a comma-separated keyword list into trimmed lowercase terms.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn require(&self, key: &str) -> Result<String> {
        self.get(key)
            .with_context(|| format!("Required environment variable '{key}' is not set"))
    }

    fn parse_required<T>(&self, key: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.require(key)?
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a number"))
    }

    /// Like `parse_required`, but rejects `NaN` and infinities.
    fn parse_finite(&self, key: &str) -> Result<f64> {
        let value: f64 = self.parse_required(key)?;
        if !value.is_finite() {
            bail!("{key} must be a finite number");
        }
        Ok(value)
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{key} must be a number")),
            None => Ok(default),
        }
    }

    fn flag_or(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(default)
    }
}
