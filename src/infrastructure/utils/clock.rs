use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Current time at the microsecond precision PostgreSQL stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a write following one made at `previous`.
///
/// Never returns a value at or before `previous`, even when the clock has
/// not ticked between the two writes.
pub fn next_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::microseconds(1);
    now().max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_after_is_strictly_later() {
        let future = now() + Duration::seconds(30);
        assert!(next_after(future) > future);

        let past = now() - Duration::seconds(30);
        assert!(next_after(past) > past);
    }
}
