//! Identifier minting.
//!
//! Identifiers carry a millisecond timestamp in their high 48 bits and a
//! 12-bit per-millisecond counter after the version nibble, so primary-key
//! order tracks insertion order within a process.

use std::sync::Mutex;

use rand::{TryRngCore, rngs::OsRng};
use uuid::{Builder, Uuid};

const MAX_COUNTER: u16 = 0x0fff;

/// Last issued (millisecond, counter) pair.
static LAST: Mutex<(u64, u16)> = Mutex::new((0, 0));

pub fn mint() -> Uuid {
    let now = jiff::Timestamp::now().as_millisecond().max(0) as u64;
    let (millis, counter) = next_tick(now);

    let mut bytes = [0u8; 10];
    if let Err(err) = OsRng.try_fill_bytes(&mut bytes) {
        tracing::warn!(error = %err, "os entropy unavailable, using thread rng");
        bytes = rand::random();
    }
    bytes[..2].copy_from_slice(&counter.to_be_bytes());

    Builder::from_unix_timestamp_millis(millis, &bytes).into_uuid()
}

/// Advances the shared clock. A clock that stalls or steps back keeps the
/// previous millisecond and bumps the counter; an exhausted counter borrows
/// the next millisecond.
fn next_tick(now: u64) -> (u64, u16) {
    let mut last = LAST.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let tick = advance(*last, now);
    *last = tick;
    tick
}

fn advance((last_millis, last_counter): (u64, u16), now: u64) -> (u64, u16) {
    if now > last_millis {
        (now, 0)
    } else if last_counter < MAX_COUNTER {
        (last_millis, last_counter + 1)
    } else {
        (last_millis + 1, 0)
    }
}

/// Parses a transport parameter into an identifier.
pub fn parse(raw: &str) -> Option<Uuid> {
    Uuid::try_parse(raw.trim()).ok()
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;

    #[test]
    fn minted_ids_are_v7() {
        let id = mint();
        assert_eq!(id.get_version_num(), 7);
        assert_eq!(id.to_string().len(), 36);
    }

    #[test]
    fn later_mints_sort_after_earlier_ones() {
        let first = mint();
        thread::sleep(Duration::from_millis(3));
        let second = mint();
        assert!(first < second);
    }

    #[test]
    fn same_millisecond_mints_stay_ordered() {
        let ids: Vec<Uuid> = (0..5000).map(|_| mint()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(ids.iter().all(|id| id.get_version_num() == 7));
    }

    #[test]
    fn clock_steps_are_absorbed_by_the_counter() {
        assert_eq!(advance((100, 7), 101), (101, 0));
        assert_eq!(advance((100, 7), 100), (100, 8));
        assert_eq!(advance((100, 7), 90), (100, 8));
        assert_eq!(advance((100, MAX_COUNTER), 100), (101, 0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse("not-a-uuid").is_none());
        assert_eq!(parse("00000000-0000-0000-0000-000000000000"), Some(Uuid::nil()));
    }
}
