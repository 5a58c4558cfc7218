//! Passive regeneration tick.

use crate::components::Stats;
use crate::constants::combat;

/// Restore one regen tick's worth of stamina, capped at max.
pub fn regen_system(player: &mut Stats) {
    player.regen_stamina(combat::STAMINA_REGEN);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regen_never_overfills() {
        let mut player = Stats::player();
        player.stamina = 0;
        for _ in 0..player.max_stamina + 50 {
            regen_system(&mut player);
        }
        assert_eq!(player.stamina, player.max_stamina);
    }
}
