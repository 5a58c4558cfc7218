//! Stat pools for the player and world entities.

use serde::{Deserialize, Serialize};

use crate::constants::player;

/// Resource pools plus a damage scalar. Each `current` stays within
/// `0..=max`; damage resolution clamps hp at zero so it is never exposed
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: i32,
    pub max_hp: i32,
    pub stamina: i32,
    pub max_stamina: i32,
    pub ember: i32,
    pub max_ember: i32,
    pub strength: i32,
}

impl Stats {
    /// Starting player stats.
    pub fn player() -> Self {
        Self {
            hp: player::MAX_HP,
            max_hp: player::MAX_HP,
            stamina: player::MAX_STAMINA,
            max_stamina: player::MAX_STAMINA,
            ember: 0,
            max_ember: player::MAX_EMBER,
            strength: player::STRENGTH,
        }
    }

    /// Boss stats scale with depth; resource pools spawn maxed.
    pub fn boss(depth: u32) -> Self {
        let depth = depth as i32;
        Self {
            hp: 200 + depth * 50,
            max_hp: 200 + depth * 50,
            stamina: 999,
            max_stamina: 999,
            ember: 100,
            max_ember: 100,
            strength: 15 + depth * 2,
        }
    }

    /// Regular enemy stats, elevated for elites.
    pub fn enemy(depth: u32, elite: bool) -> Self {
        let depth = depth as i32;
        let hp = if elite { 60 + depth * 20 } else { 30 + depth * 10 };
        let strength = if elite { 8 + depth } else { 5 + depth };
        Self {
            hp,
            max_hp: hp,
            stamina: 50,
            max_stamina: 50,
            ember: 0,
            max_ember: 0,
            strength,
        }
    }

    /// Dummy stats for inert entities like chests.
    pub fn inert() -> Self {
        Self {
            hp: 1,
            max_hp: 1,
            stamina: 1,
            max_stamina: 1,
            ember: 0,
            max_ember: 1,
            strength: 1,
        }
    }

    /// Apply damage, clamping hp at zero. Returns true if this brought the
    /// pool down (defeat for the player, death for an entity).
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount).max(0);
        self.hp == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn gain_ember(&mut self, amount: i32) {
        self.ember = (self.ember + amount).min(self.max_ember);
    }

    /// Deduct `cost` ember if available. Returns false (and changes
    /// nothing) when the pool is short.
    pub fn spend_ember(&mut self, cost: i32) -> bool {
        if self.ember < cost {
            return false;
        }
        self.ember -= cost;
        true
    }

    pub fn regen_stamina(&mut self, amount: i32) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    pub fn is_down(&self) -> bool {
        self.hp <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut stats = Stats::enemy(1, false);
        let down = stats.take_damage(stats.hp + 100);
        assert!(down);
        assert_eq!(stats.hp, 0);
    }

    #[test]
    fn test_heal_and_ember_respect_caps() {
        let mut stats = Stats::player();
        for _ in 0..100 {
            stats.gain_ember(25);
        }
        assert_eq!(stats.ember, stats.max_ember);

        stats.take_damage(3);
        stats.heal(1000);
        assert_eq!(stats.hp, stats.max_hp);

        for _ in 0..1000 {
            stats.regen_stamina(1);
        }
        assert_eq!(stats.stamina, stats.max_stamina);
    }

    #[test]
    fn test_spend_ember_is_all_or_nothing() {
        let mut stats = Stats::player();
        stats.gain_ember(30);
        assert!(!stats.spend_ember(50));
        assert_eq!(stats.ember, 30);
        stats.gain_ember(20);
        assert!(stats.spend_ember(50));
        assert_eq!(stats.ember, 0);
    }

    #[test]
    fn test_boss_scaling() {
        let shallow = Stats::boss(1);
        let deep = Stats::boss(5);
        assert!(deep.max_hp > shallow.max_hp);
        assert!(deep.strength > shallow.strength);
    }
}
