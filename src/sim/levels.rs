//! Hand-tuned level table
//!
//! Ten static records indexed by 1-based level number. The shooter reads
//! every field; the collector only needs its star quota, which grows
//! linearly.

use crate::consts::MAX_LEVEL;
use crate::consts::collector::{BASE_STARS, STARS_PER_LEVEL};

/// Difficulty settings for a single level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// Stars that must be collected to clear the level
    pub stars_required: u32,
    /// Enemies kept alive on screen
    pub enemy_count: u32,
    /// Multiplier on enemy fall speed and fire rate
    pub enemy_speed_factor: f32,
    /// Smallest star group spawned at once
    pub group_min: u32,
    /// Largest star group spawned at once
    pub group_max: u32,
    /// Per-frame chance of spawning a star group
    pub spawn_chance: f32,
    /// Decorative planets drifting behind the action
    pub planet_count: u32,
}

const fn level(
    stars_required: u32,
    enemy_count: u32,
    enemy_speed_factor: f32,
    group_min: u32,
    group_max: u32,
    spawn_chance: f32,
    planet_count: u32,
) -> LevelConfig {
    LevelConfig {
        stars_required,
        enemy_count,
        enemy_speed_factor,
        group_min,
        group_max,
        spawn_chance,
        planet_count,
    }
}

pub static LEVELS: [LevelConfig; MAX_LEVEL as usize] = [
    level(8, 2, 1.0, 1, 2, 0.020, 1),
    level(10, 3, 1.1, 1, 2, 0.022, 1),
    level(12, 3, 1.2, 1, 3, 0.025, 2),
    level(14, 4, 1.3, 2, 3, 0.027, 2),
    level(16, 4, 1.4, 2, 3, 0.030, 2),
    level(18, 5, 1.5, 2, 4, 0.032, 3),
    level(20, 5, 1.6, 2, 4, 0.035, 3),
    level(22, 6, 1.75, 3, 4, 0.037, 3),
    level(24, 6, 1.9, 3, 5, 0.040, 4),
    level(26, 7, 2.0, 3, 5, 0.045, 4),
];

/// Look up a level (1-based). `None` outside `1..=MAX_LEVEL`.
pub fn level_config(level: u32) -> Option<&'static LevelConfig> {
    level.checked_sub(1).and_then(|i| LEVELS.get(i as usize))
}

/// Look up a level, clamping out-of-range numbers to the nearest valid one
pub fn clamped_level_config(level: u32) -> &'static LevelConfig {
    &LEVELS[(level.clamp(1, MAX_LEVEL) - 1) as usize]
}

/// Stars the collector drops on a level
pub fn collector_star_quota(level: u32) -> u32 {
    BASE_STARS + STARS_PER_LEVEL * level.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one() {
        let cfg = level_config(1).unwrap();
        assert_eq!(cfg.stars_required, 8);
        assert_eq!(cfg.enemy_count, 2);
    }

    #[test]
    fn test_out_of_range() {
        assert!(level_config(0).is_none());
        assert!(level_config(MAX_LEVEL + 1).is_none());
        assert!(level_config(MAX_LEVEL).is_some());
        assert_eq!(clamped_level_config(0), &LEVELS[0]);
        assert_eq!(clamped_level_config(99), &LEVELS[9]);
    }

    #[test]
    fn test_table_is_sane() {
        for (i, cfg) in LEVELS.iter().enumerate() {
            assert!(cfg.stars_required > 0, "level {}", i + 1);
            assert!(cfg.group_min >= 1 && cfg.group_min <= cfg.group_max);
            assert!(cfg.spawn_chance > 0.0 && cfg.spawn_chance < 1.0);
        }
        // Difficulty never drops from one level to the next
        for pair in LEVELS.windows(2) {
            assert!(pair[1].stars_required >= pair[0].stars_required);
            assert!(pair[1].enemy_speed_factor >= pair[0].enemy_speed_factor);
        }
    }

    #[test]
    fn test_collector_quota() {
        assert_eq!(collector_star_quota(1), 4);
        assert_eq!(collector_star_quota(2), 7);
        assert_eq!(collector_star_quota(10), 31);
    }
}
