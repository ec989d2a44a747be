//! Quantity derivation from booking windows
//!
//! Whole-day unit types count calendar-day boundaries between start and end
//! (end exclusive). Hour bookings keep fractional hours. The overlap
//! calculator converts to local wall-clock time and intersects the booking
//! with a half-open `[from_hour, to_hour)` window anchored on the start day;
//! the window does not recur on later days of the booking.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::{PricingError, PricingResult, UnitType};

/// Timezone used when a listing configures none
pub const DEFAULT_TIMEZONE: &str = "Europe/Zurich";

/// Window start for surcharge rules that omit `fromHour`
pub const DEFAULT_SURCHARGE_FROM_HOUR: Decimal = Decimal::from_parts(17, 0, 0, false, 0);

/// Window end for surcharge rules that omit `toHour`
pub const DEFAULT_SURCHARGE_TO_HOUR: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Window start for the legacy evening surcharge
pub const DEFAULT_BUSINESS_HOURS_END: Decimal = Decimal::from_parts(17, 0, 0, false, 0);

const HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);
const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

pub fn default_timezone() -> Tz {
    chrono_tz::Europe::Zurich
}

/// Count of calendar-day boundaries between `start` and `end`, end exclusive.
///
/// Valid only for whole-day unit types; nights and days share the same count.
pub fn calculate_quantity_from_dates(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    unit_type: UnitType,
) -> PricingResult<i64> {
    if !unit_type.uses_day_count() {
        return Err(PricingError::UnsupportedUnitType(unit_type.code()));
    }
    Ok((end.date_naive() - start.date_naive()).num_days())
}

/// Duration between two instants in hours, fractional hours preserved
pub fn calculate_quantity_from_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    Decimal::from((end - start).num_seconds()) / SECONDS_PER_HOUR
}

/// Overlap in hours between `[start, end)` and the wall-clock window
/// `[from_hour, to_hour)` on the booking's start day in `timezone`.
///
/// Half-open on both sides: ending exactly at `from_hour` or starting exactly
/// at `to_hour` yields zero. A reversed or empty window also yields zero.
pub fn calculate_overlapping_hours(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    timezone: Tz,
    from_hour: Decimal,
    to_hour: Decimal,
) -> Decimal {
    if end <= start {
        return Decimal::ZERO;
    }

    let local_start = start.with_timezone(&timezone);
    let local_end = end.with_timezone(&timezone);

    // Hours on a single axis anchored at the start day's midnight, so a
    // booking running past midnight keeps increasing instead of wrapping.
    let start_hours = hours_since_midnight(&local_start);
    let day_offset = (local_end.date_naive() - local_start.date_naive()).num_days();
    let end_hours = hours_since_midnight(&local_end) + Decimal::from(day_offset) * HOURS_PER_DAY;

    let overlap = end_hours.min(to_hour) - start_hours.max(from_hour);
    overlap.max(Decimal::ZERO)
}

/// Overlap with the implicit after-hours window `[business_hours_end, 24)`
pub fn calculate_non_business_hours(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    timezone: Tz,
    business_hours_end: Decimal,
) -> Decimal {
    calculate_overlapping_hours(start, end, timezone, business_hours_end, HOURS_PER_DAY)
}

fn hours_since_midnight(local: &DateTime<Tz>) -> Decimal {
    Decimal::from(local.num_seconds_from_midnight()) / SECONDS_PER_HOUR
}
