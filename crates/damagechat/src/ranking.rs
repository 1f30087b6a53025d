//! Party damage ranking and chat line formatting.

use serde::Deserialize;

/// One party slot as reported by the game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PartyMember {
    /// Display name. Empty slots have no name.
    #[serde(default)]
    pub name: String,
    /// Damage dealt so far.
    #[serde(default)]
    pub damage: u64,
    /// Fraction of the party total, when the game supplies it.
    #[serde(default)]
    pub share: Option<f64>,
}

impl PartyMember {
    /// A member with no precomputed share.
    pub fn new(name: impl Into<String>, damage: u64) -> Self {
        Self {
            name: name.into(),
            damage,
            share: None,
        }
    }

    /// True if the slot holds a named player. Only the empty name marks an
    /// empty slot.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A named member with a resolved share.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageRankingEntry {
    /// Display name.
    pub name: String,
    /// Damage dealt.
    pub damage: u64,
    /// Fraction of the party total, in `[0, 1]`.
    pub share: f64,
}

impl DamageRankingEntry {
    /// Whole percent of the party total, rounded down.
    pub fn percent(&self) -> u64 {
        (self.share * 100.0).floor() as u64
    }
}

/// Named members in party order, with shares resolved.
///
/// Missing shares are computed against the total of every slot, named or not.
pub fn entries(party: &[PartyMember]) -> Vec<DamageRankingEntry> {
    let total: u128 = party.iter().map(|m| u128::from(m.damage)).sum();
    party
        .iter()
        .filter(|m| m.is_named())
        .map(|m| {
            let share = match m.share {
                Some(s) => s,
                None if total == 0 => 0.0,
                None => m.damage as f64 / total as f64,
            };
            DamageRankingEntry {
                name: m.name.clone(),
                damage: m.damage,
                share: share.clamp(0.0, 1.0),
            }
        })
        .collect()
}

/// Named members, highest damage first. Tied members appear in reverse
/// party order.
pub fn rank(party: &[PartyMember]) -> Vec<DamageRankingEntry> {
    let mut ranked = entries(party);
    ranked.sort_by_key(|e| e.damage);
    ranked.reverse();
    ranked
}

/// `"{name} dealt {damage} ({pct}%) damage"`.
pub fn format_line(entry: &DamageRankingEntry) -> String {
    format!(
        "{} dealt {} ({}%) damage",
        entry.name,
        entry.damage,
        entry.percent()
    )
}

/// The chat lines for `party`, in posting order.
pub fn chat_lines(party: &[PartyMember]) -> Vec<String> {
    rank(party).iter().map(format_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_members_are_excluded_and_order_is_by_damage() {
        let party = vec![
            PartyMember::new("Bob", 300),
            PartyMember::new("", 50),
            PartyMember::new("Alice", 650),
        ];
        let ranked = rank(&party);
        let names: Vec<_> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob"]);
        // The unnamed slot still counts towards the total.
        assert_eq!(ranked[0].percent(), 65);
        assert_eq!(ranked[1].percent(), 30);
    }

    #[test]
    fn tied_members_list_later_slots_first() {
        let party = vec![
            PartyMember::new("Cid", 10),
            PartyMember::new("Ace", 10),
            PartyMember::new("Bea", 20),
        ];
        let names: Vec<_> = rank(&party).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Bea", "Ace", "Cid"]);
    }

    #[test]
    fn whitespace_name_is_a_named_slot() {
        let party = vec![PartyMember::new("   ", 1), PartyMember::new("Alice", 3)];
        assert!(party[0].is_named());
        assert_eq!(
            chat_lines(&party),
            ["Alice dealt 3 (75%) damage", "    dealt 1 (25%) damage"]
        );
    }

    #[test]
    fn huge_damage_totals_do_not_overflow() {
        let party = vec![
            PartyMember::new("Alice", u64::MAX),
            PartyMember::new("Bob", u64::MAX),
        ];
        for e in rank(&party) {
            assert_eq!(e.share, 0.5);
            assert_eq!(e.percent(), 50);
        }
    }

    #[test]
    fn zero_total_gives_zero_share() {
        let party = vec![PartyMember::new("Alice", 0), PartyMember::new("Bob", 0)];
        for e in rank(&party) {
            assert_eq!(e.share, 0.0);
        }
    }

    #[test]
    fn supplied_share_wins_and_is_clamped() {
        let party = vec![
            PartyMember {
                name: "Alice".into(),
                damage: 1,
                share: Some(0.999),
            },
            PartyMember {
                name: "Bob".into(),
                damage: 0,
                share: Some(1.5),
            },
        ];
        let ranked = rank(&party);
        assert_eq!(ranked[0].percent(), 99);
        assert_eq!(ranked[1].share, 1.0);
    }

    #[test]
    fn line_format_floors_percent() {
        let party = vec![PartyMember::new("Alice", 2), PartyMember::new("Bob", 1)];
        assert_eq!(
            chat_lines(&party),
            [
                "Alice dealt 2 (66%) damage",
                "Bob dealt 1 (33%) damage"
            ]
        );
    }

    #[test]
    fn deserializes_game_snapshot() {
        let m: PartyMember = serde_json::from_str(r#"{"name": "Alice", "damage": 12}"#).unwrap();
        assert_eq!(m, PartyMember::new("Alice", 12));
        let empty: PartyMember = serde_json::from_str("{}").unwrap();
        assert!(!empty.is_named());
    }
}
