//! Unlock schedule policies.

use serde::{Deserialize, Serialize};

use crate::domain::document::UnlockTranche;
use crate::domain::errors::GenesisError;

/// How an allocation's initial amount becomes spendable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnlockPolicy {
    /// One tranche, spendable at genesis.
    #[default]
    Unlocked,
    /// One tranche, locked until `locktime` (unix seconds, non-zero).
    LockedUntil { locktime: u64 },
    /// `tranches` equal tranches unlocking every `period_secs` after `start`.
    ///
    /// Tranche *i* (0-based) unlocks at `start + (i + 1) * period_secs`. The
    /// division remainder goes into the last tranche.
    Vesting {
        start: u64,
        tranches: u32,
        period_secs: u64,
    },
}

impl UnlockPolicy {
    /// Schedule for `amount`. The tranche amounts always sum to `amount`.
    pub fn schedule(&self, amount: u64) -> Result<Vec<UnlockTranche>, GenesisError> {
        match *self {
            UnlockPolicy::Unlocked => Ok(vec![UnlockTranche {
                amount,
                locktime: 0,
            }]),
            UnlockPolicy::LockedUntil { locktime } => {
                if locktime == 0 {
                    return Err(GenesisError::InvalidConfig(
                        "locked_until requires a non-zero locktime".into(),
                    ));
                }
                Ok(vec![UnlockTranche { amount, locktime }])
            }
            UnlockPolicy::Vesting {
                start,
                tranches,
                period_secs,
            } => vesting(amount, start, tranches, period_secs),
        }
    }
}

fn vesting(
    amount: u64,
    start: u64,
    tranches: u32,
    period_secs: u64,
) -> Result<Vec<UnlockTranche>, GenesisError> {
    if tranches == 0 || period_secs == 0 {
        return Err(GenesisError::InvalidConfig(
            "vesting needs at least one tranche and a non-zero period".into(),
        ));
    }
    let count = u64::from(tranches);
    if amount < count {
        return Err(GenesisError::InvalidConfig(format!(
            "amount {} cannot be split into {} tranches",
            amount, tranches
        )));
    }

    let per_tranche = amount / count;
    let remainder = amount % count;

    (1..=count)
        .map(|i| {
            let locktime = period_secs
                .checked_mul(i)
                .and_then(|offset| start.checked_add(offset))
                .ok_or_else(|| {
                    GenesisError::InvalidConfig("vesting locktime overflows u64".into())
                })?;
            let amount = if i == count {
                per_tranche + remainder
            } else {
                per_tranche
            };
            Ok(UnlockTranche { amount, locktime })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: u64 = 365 * 24 * 60 * 60;

    fn total(schedule: &[UnlockTranche]) -> u64 {
        schedule.iter().map(|t| t.amount).sum()
    }

    #[test]
    fn test_unlocked_single_tranche() {
        let schedule = UnlockPolicy::Unlocked.schedule(500).unwrap();
        assert_eq!(schedule, vec![UnlockTranche { amount: 500, locktime: 0 }]);
    }

    #[test]
    fn test_locked_until_rejects_zero() {
        assert!(UnlockPolicy::LockedUntil { locktime: 0 }.schedule(1).is_err());
        let schedule = UnlockPolicy::LockedUntil { locktime: 1_700_000_000 }
            .schedule(9)
            .unwrap();
        assert_eq!(schedule[0].locktime, 1_700_000_000);
    }

    #[test]
    fn test_vesting_totals_exactly() {
        let policy = UnlockPolicy::Vesting {
            start: 1_577_836_800,
            tranches: 100,
            period_secs: YEAR,
        };
        let amount = 1_000_000_000_000_000_007;
        let schedule = policy.schedule(amount).unwrap();

        assert_eq!(schedule.len(), 100);
        assert_eq!(total(&schedule), amount);
        assert_eq!(schedule[0].locktime, 1_577_836_800 + YEAR);
        assert_eq!(schedule[99].amount, amount / 100 + 7);
        assert!(schedule.windows(2).all(|w| w[0].locktime < w[1].locktime));
    }

    #[test]
    fn test_vesting_rejects_degenerate_input() {
        let zero_tranches = UnlockPolicy::Vesting { start: 0, tranches: 0, period_secs: 1 };
        assert!(zero_tranches.schedule(10).is_err());

        let too_small = UnlockPolicy::Vesting { start: 0, tranches: 10, period_secs: 1 };
        assert!(too_small.schedule(9).is_err());

        let overflow = UnlockPolicy::Vesting { start: u64::MAX - 1, tranches: 2, period_secs: 1 };
        assert!(overflow.schedule(10).is_err());
    }

    #[test]
    fn test_policy_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            unlock: UnlockPolicy,
        }
        let parsed: Wrapper = toml::from_str(
            "[unlock]\nkind = \"vesting\"\nstart = 10\ntranches = 4\nperiod_secs = 5\n",
        )
        .unwrap();
        assert_eq!(
            parsed.unlock,
            UnlockPolicy::Vesting { start: 10, tranches: 4, period_secs: 5 }
        );
    }
}
