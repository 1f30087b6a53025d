//! Text damage meter for the current monster.

use std::{fmt::Write as _, time::Duration};

use crate::ranking::{PartyMember, entries};

/// The monster a meter is rendered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterStatus {
    /// Display name.
    pub name: String,
    /// Current health.
    pub hp: u64,
    /// Maximum health.
    pub max_hp: u64,
}

/// Damage per second, or 0 when no time has passed.
pub fn dps(damage: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { damage as f64 / secs } else { 0.0 }
}

/// Render the meter: a header line and one line per named member, in party
/// order.
pub fn summary(monster: &MonsterStatus, party: &[PartyMember], elapsed: Duration) -> String {
    let mut out = format!(
        "Damage Meter({}) {}/{}\n",
        monster.name, monster.hp, monster.max_hp
    );
    for e in entries(party) {
        let _ignored = writeln!(
            out,
            "{} {} {:.2}% DPS: {:.2}/s",
            e.name,
            e.damage,
            e.share * 100.0,
            dps(e.damage, elapsed)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster() -> MonsterStatus {
        MonsterStatus {
            name: "Rathalos".into(),
            hp: 1200,
            max_hp: 5000,
        }
    }

    #[test]
    fn renders_party_order_with_dps() {
        let party = vec![
            PartyMember::new("Bob", 100),
            PartyMember::new("", 100),
            PartyMember::new("Alice", 200),
        ];
        let text = summary(&monster(), &party, Duration::from_secs(8));
        assert_eq!(
            text,
            "Damage Meter(Rathalos) 1200/5000\n\
             Bob 100 25.00% DPS: 12.50/s\n\
             Alice 200 50.00% DPS: 25.00/s\n"
        );
    }

    #[test]
    fn zero_elapsed_reports_zero_dps() {
        let party = vec![PartyMember::new("Alice", 700)];
        let text = summary(&monster(), &party, Duration::ZERO);
        assert!(text.ends_with("Alice 700 100.00% DPS: 0.00/s\n"), "{text}");
    }
}
