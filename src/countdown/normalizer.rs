//! Request Normalizer
//!
//! Turns a countdown request into the canonical form used for caching: a
//! timezone-aware target instant, the non-negative time remaining, and a
//! SHA-256 cache key over the fields that affect the rendered image.

use std::time::Duration;

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeDelta, TimeZone,
    Utc,
};
use chrono_tz::Tz;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::countdown::{AssetFormat, Style, TargetDateTime};
use crate::error::{AppError, Result};
use crate::models::CountdownRequest;

/// How far before a DST gap to look for the offset that was in force.
const GAP_PROBE_HOURS: i64 = 3;

/// Calendar years accepted for a target, in the target's own wall-clock terms.
const MIN_TARGET_YEAR: i32 = 1;
const MAX_TARGET_YEAR: i32 = 9999;

// == Normalized Request ==
/// Canonical view of a countdown request.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    /// Target instant expressed in the resolved timezone
    pub target_instant: DateTime<Tz>,
    /// Resolved IANA timezone
    pub timezone: Tz,
    pub style: Style,
    pub format: AssetFormat,
    /// `max(target - now, 0)`
    pub remaining: Duration,
    /// Hex SHA-256 over the canonical fields
    pub cache_key: String,
}

impl NormalizedRequest {
    /// IANA identifier of the resolved timezone.
    pub fn timezone_id(&self) -> &'static str {
        self.timezone.name()
    }
}

// == Normalizer ==
/// Resolves requests against a configured default timezone.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    default_timezone: Tz,
}

impl Normalizer {
    /// Creates a normalizer, failing if `default_timezone` is not an IANA zone.
    pub fn new(default_timezone: &str) -> Result<Self> {
        Ok(Self {
            default_timezone: parse_timezone(default_timezone)?,
        })
    }

    /// Resolves an optional identifier, falling back to the default when it
    /// is absent or blank.
    pub fn resolve_timezone(&self, name: Option<&str>) -> Result<Tz> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => parse_timezone(name),
            None => Ok(self.default_timezone),
        }
    }

    /// Normalizes `request` against the current wall clock.
    pub fn normalize(&self, request: &CountdownRequest) -> Result<NormalizedRequest> {
        self.normalize_at(request, Utc::now())
    }

    /// Normalizes `request` as if the current time were `now`.
    pub fn normalize_at(
        &self,
        request: &CountdownRequest,
        now: DateTime<Utc>,
    ) -> Result<NormalizedRequest> {
        let timezone = self.resolve_timezone(request.timezone.as_deref())?;
        let target_instant = resolve_target(&request.target_datetime, timezone)?;
        let normalized = NormalizedRequest {
            remaining: remaining(&target_instant, now),
            cache_key: cache_key(&target_instant, timezone, request.style, request.asset_format),
            target_instant,
            timezone,
            style: request.style,
            format: request.asset_format,
        };

        debug!(
            target_instant = %iso_string(&normalized.target_instant),
            timezone = normalized.timezone_id(),
            cache_key = %normalized.cache_key,
            "Normalized countdown request"
        );

        Ok(normalized)
    }
}

// == Timezone ==
/// Parses an IANA timezone identifier such as `Europe/Paris`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

// == Target Instant ==
/// Places `target` in `timezone`.
///
/// Naive values are read as local time in the zone. An ambiguous local time
/// (clocks going back) takes the earlier instant; a local time that falls in
/// a gap (clocks going forward) uses the offset in force before the gap.
/// Values carrying an offset are converted into the zone.
///
/// Targets outside years 1 to 9999 are rejected with `InvalidRequest`.
pub fn resolve_target(target: &TargetDateTime, timezone: Tz) -> Result<DateTime<Tz>> {
    let year = match target {
        TargetDateTime::Offset(dt) => dt.year(),
        TargetDateTime::Naive(naive) => naive.year(),
    };
    if !(MIN_TARGET_YEAR..=MAX_TARGET_YEAR).contains(&year) {
        return Err(out_of_range(target));
    }

    match target {
        TargetDateTime::Offset(dt) => Ok(dt.with_timezone(&timezone)),
        TargetDateTime::Naive(naive) => {
            localize(*naive, timezone).ok_or_else(|| out_of_range(target))
        }
    }
}

fn out_of_range(target: &TargetDateTime) -> AppError {
    AppError::InvalidRequest(format!("target_datetime out of range: {target}"))
}

fn localize(naive: NaiveDateTime, timezone: Tz) -> Option<DateTime<Tz>> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before_gap = naive.checked_sub_signed(TimeDelta::hours(GAP_PROBE_HOURS))?;
            let offset_seconds = timezone
                .offset_from_local_datetime(&before_gap)
                .earliest()
                .map(|offset| offset.fix().local_minus_utc())
                .unwrap_or(0);
            let utc = naive.checked_sub_signed(TimeDelta::seconds(i64::from(offset_seconds)))?;
            Some(timezone.from_utc_datetime(&utc))
        }
    }
}

// == Remaining ==
/// Time left until `target`, clamped to zero once it has passed.
pub fn remaining(target: &DateTime<Tz>, now: DateTime<Utc>) -> Duration {
    (target.with_timezone(&Utc) - now)
        .to_std()
        .unwrap_or(Duration::ZERO)
}

// == Cache Key ==
/// ISO-8601 form of `dt` with its numeric offset, e.g. `2025-12-31T23:59:59+00:00`.
pub fn iso_string(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&dt.offset().fix())
        .to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Hex SHA-256 of `"{iso}|{timezone}|{style}|{format}"`.
///
/// Contains no salt, so keys are stable across restarts.
pub fn cache_key(
    target: &DateTime<Tz>,
    timezone: Tz,
    style: Style,
    format: AssetFormat,
) -> String {
    let payload = format!(
        "{}|{}|{}|{}",
        iso_string(target),
        timezone.name(),
        style.as_str(),
        format.as_str()
    );
    hex::encode(Sha256::digest(payload.as_bytes()))
}
