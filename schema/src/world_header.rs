//! The world header field table.
//!
//! Fields appear in the exact order the game stores them. A field is never
//! moved between versions; new fields are appended behind a gate and a few
//! change representation at one version (the seed, the game-mode block).

use crate::field::{FieldDef, FieldKind as K};

/// Names of the fields other sections and tools depend on.
pub mod names {
    pub const MAP_NAME: &str = "map_name";
    pub const SEED: &str = "seed";
    pub const WORLD_ID: &str = "world_id";
    pub const MAX_TILES_X: &str = "max_tiles_x";
    pub const MAX_TILES_Y: &str = "max_tiles_y";
    pub const GAME_MODE: &str = "game_mode";
    pub const MOON_TYPE: &str = "moon_type";
    pub const SPAWN_TILE_X: &str = "spawn_tile_x";
    pub const SPAWN_TILE_Y: &str = "spawn_tile_y";
    pub const HARD_MODE: &str = "hard_mode";
    pub const CREATION_TIME: &str = "creation_time";
}

/// Every field of the world header, in stored order.
pub static WORLD_HEADER: &[FieldDef] = &[
    FieldDef::new(names::MAP_NAME, K::Str),
    FieldDef::new(names::SEED, K::I32).exactly(179),
    FieldDef::new(names::SEED, K::Str).since(180),
    FieldDef::new("world_generator_version", K::Bytes(8)).since(179),
    FieldDef::new("guid", K::Bytes(16)).since(181),
    FieldDef::new(names::WORLD_ID, K::I32),
    FieldDef::new("left_world", K::I32),
    FieldDef::new("right_world", K::I32),
    FieldDef::new("top_world", K::I32),
    FieldDef::new("bottom_world", K::I32),
    FieldDef::new(names::MAX_TILES_Y, K::I32),
    FieldDef::new(names::MAX_TILES_X, K::I32),
    // Difficulty: an i32 mode plus special-seed flags, a one-version master
    // flag, or the classic expert flag.
    FieldDef::new(names::GAME_MODE, K::I32).since(209),
    FieldDef::flag("drunk_world").since(222),
    FieldDef::flag("get_good_world").since(227),
    FieldDef::flag("tenth_anniversary_world").since(238),
    FieldDef::flag("dont_starve_world").since(239),
    FieldDef::flag("not_the_bees_world").since(241),
    FieldDef::flag("remix_world").since(249),
    FieldDef::flag("no_traps_world").since(266),
    FieldDef::flag("zenith_world").since(267),
    FieldDef::flag("master_mode").exactly(208),
    FieldDef::flag("expert_mode").between(112, 208),
    FieldDef::new(names::CREATION_TIME, K::Bytes(8)).since(141),
    FieldDef::new(names::MOON_TYPE, K::MoonType),
    FieldDef::new("tree_x", K::I32Array(3)),
    FieldDef::new("tree_style", K::I32Array(4)),
    FieldDef::new("cave_back_x", K::I32Array(3)),
    FieldDef::new("cave_back_style", K::I32Array(4)),
    FieldDef::new("ice_back_style", K::I32),
    FieldDef::new("jungle_back_style", K::I32),
    FieldDef::new("hell_back_style", K::I32),
    FieldDef::new(names::SPAWN_TILE_X, K::I32),
    FieldDef::new(names::SPAWN_TILE_Y, K::I32),
    FieldDef::new("world_surface", K::F64),
    FieldDef::new("rock_layer", K::F64),
    FieldDef::new("time", K::F64),
    FieldDef::flag("day_time"),
    FieldDef::new("moon_phase", K::I32),
    FieldDef::flag("blood_moon"),
    FieldDef::flag("eclipse"),
    FieldDef::new("dungeon_x", K::I32),
    FieldDef::new("dungeon_y", K::I32),
    FieldDef::flag("crimson"),
    FieldDef::flag("downed_boss_1"),
    FieldDef::flag("downed_boss_2"),
    FieldDef::flag("downed_boss_3"),
    FieldDef::flag("downed_queen_bee"),
    FieldDef::flag("downed_mech_boss_1"),
    FieldDef::flag("downed_mech_boss_2"),
    FieldDef::flag("downed_mech_boss_3"),
    FieldDef::flag("downed_mech_boss_any"),
    FieldDef::flag("downed_plant_boss"),
    FieldDef::flag("downed_golem_boss"),
    FieldDef::flag("downed_slime_king").since(118),
    FieldDef::flag("saved_goblin"),
    FieldDef::flag("saved_wizard"),
    FieldDef::flag("saved_mech"),
    FieldDef::flag("downed_goblins"),
    FieldDef::flag("downed_clown"),
    FieldDef::flag("downed_frost"),
    FieldDef::flag("downed_pirates"),
    FieldDef::flag("shadow_orb_smashed"),
    FieldDef::flag("spawn_meteor"),
    FieldDef::new("shadow_orb_count", K::U8),
    FieldDef::new("altar_count", K::I32),
    FieldDef::flag(names::HARD_MODE),
    FieldDef::new("invasion_delay", K::I32),
    FieldDef::new("invasion_size", K::I32),
    FieldDef::new("invasion_type", K::I32),
    FieldDef::new("invasion_x", K::F64),
    FieldDef::new("slime_rain_time", K::F64).since(118),
    FieldDef::new("sundial_cooldown", K::U8).since(113),
    FieldDef::flag("raining"),
    FieldDef::new("rain_time", K::I32),
    FieldDef::new("max_rain", K::F32),
    FieldDef::new("ore_tier_1", K::I32),
    FieldDef::new("ore_tier_2", K::I32),
    FieldDef::new("ore_tier_3", K::I32),
    FieldDef::new("bg_tree", K::U8),
    FieldDef::new("bg_corruption", K::U8),
    FieldDef::new("bg_jungle", K::U8),
    FieldDef::new("bg_snow", K::U8),
    FieldDef::new("bg_hallow", K::U8),
    FieldDef::new("bg_crimson", K::U8),
    FieldDef::new("bg_desert", K::U8),
    FieldDef::new("bg_ocean", K::U8),
    FieldDef::new("cloud_bg_active", K::I32),
    FieldDef::new("num_clouds", K::I16),
    FieldDef::new("wind_speed", K::F32),
    FieldDef::new("angler_who_finished_today", K::StrList).since(95),
    FieldDef::flag("saved_angler").since(95),
    FieldDef::new("angler_quest", K::I32).since(101),
    FieldDef::flag("saved_stylist").after(104),
    FieldDef::flag("saved_tax_collector").since(129),
    FieldDef::flag("saved_golfer").since(201),
    FieldDef::new("invasion_size_start", K::I32).since(107),
    FieldDef::new("cultist_delay", K::I32).since(108),
    FieldDef::new("kill_count", K::I32ShortList).since(109),
    FieldDef::flag("fast_forward_time").since(140),
    FieldDef::flag("downed_fishron").since(131),
    FieldDef::flag("downed_martians").since(140),
    FieldDef::flag("downed_ancient_cultist").since(140),
    FieldDef::flag("downed_moonlord").since(140),
    FieldDef::flag("downed_halloween_king").since(131),
    FieldDef::flag("downed_halloween_tree").since(131),
    FieldDef::flag("downed_christmas_ice_queen").since(131),
    FieldDef::flag("downed_christmas_santank").since(140),
    FieldDef::flag("downed_christmas_tree").since(140),
    FieldDef::flag("downed_tower_solar").since(140),
    FieldDef::flag("downed_tower_vortex").since(140),
    FieldDef::flag("downed_tower_nebula").since(140),
    FieldDef::flag("downed_tower_stardust").since(140),
    FieldDef::flag("tower_active_solar").since(140),
    FieldDef::flag("tower_active_vortex").since(140),
    FieldDef::flag("tower_active_nebula").since(140),
    FieldDef::flag("tower_active_stardust").since(140),
    FieldDef::flag("lunar_apocalypse_is_up").since(140),
    FieldDef::flag("party_manual").since(170),
    FieldDef::flag("party_genuine").since(170),
    FieldDef::new("party_cooldown", K::I32).since(170),
    FieldDef::new("party_celebrating_npcs", K::I32List).since(170),
    FieldDef::flag("sandstorm_happening").since(174),
    FieldDef::new("sandstorm_time_left", K::I32).since(174),
    FieldDef::new("sandstorm_severity", K::F32).since(174),
    FieldDef::new("sandstorm_intended_severity", K::F32).since(174),
    FieldDef::flag("saved_bartender").after(178),
    FieldDef::flag("downed_invasion_t1").after(178),
    FieldDef::flag("downed_invasion_t2").after(178),
    FieldDef::flag("downed_invasion_t3").after(178),
    FieldDef::new("bg_mushroom", K::U8).since(194),
    FieldDef::new("bg_underworld", K::U8).since(215),
    FieldDef::new("bg_tree_2", K::U8).since(195),
    FieldDef::new("bg_tree_3", K::U8).since(195),
    FieldDef::new("bg_tree_4", K::U8).since(195),
    FieldDef::flag("combat_book_used").since(204),
    FieldDef::new("lantern_night_cooldown", K::I32).since(207),
    FieldDef::flag("lantern_night_genuine").since(207),
    FieldDef::flag("lantern_night_manual").since(207),
    FieldDef::flag("lantern_night_next_is_genuine").since(207),
    FieldDef::new("tree_top_variations", K::I32List).since(211),
    FieldDef::flag("force_halloween_today").since(212),
    FieldDef::flag("force_xmas_today").since(212),
    FieldDef::new("saved_ore_tier_copper", K::I32).since(216),
    FieldDef::new("saved_ore_tier_iron", K::I32).since(216),
    FieldDef::new("saved_ore_tier_silver", K::I32).since(216),
    FieldDef::new("saved_ore_tier_gold", K::I32).since(216),
    FieldDef::flag("bought_cat").since(217),
    FieldDef::flag("bought_dog").since(217),
    FieldDef::flag("bought_bunny").since(217),
    FieldDef::flag("downed_empress_of_light").since(223),
    FieldDef::flag("downed_queen_slime").since(223),
    FieldDef::flag("downed_deerclops").since(240),
    FieldDef::flag("unlocked_slime_blue_spawn").since(250),
    FieldDef::flag("unlocked_merchant_spawn").since(251),
    FieldDef::flag("unlocked_demolitionist_spawn").since(251),
    FieldDef::flag("unlocked_party_girl_spawn").since(251),
    FieldDef::flag("unlocked_dye_trader_spawn").since(251),
    FieldDef::flag("unlocked_truffle_spawn").since(251),
    FieldDef::flag("unlocked_arms_dealer_spawn").since(251),
    FieldDef::flag("unlocked_nurse_spawn").since(251),
    FieldDef::flag("unlocked_princess_spawn").since(251),
    FieldDef::flag("combat_book_volume_two_used").since(259),
    FieldDef::flag("peddlers_satchel_used").since(260),
    FieldDef::flag("unlocked_slime_green_spawn").since(261),
    FieldDef::flag("unlocked_slime_old_spawn").since(261),
    FieldDef::flag("unlocked_slime_purple_spawn").since(261),
    FieldDef::flag("unlocked_slime_rainbow_spawn").since(261),
    FieldDef::flag("unlocked_slime_red_spawn").since(261),
    FieldDef::flag("unlocked_slime_yellow_spawn").since(261),
    FieldDef::flag("unlocked_slime_copper_spawn").since(261),
    FieldDef::flag("fast_forward_time_to_dusk").since(264),
    FieldDef::new("moondial_cooldown", K::U8).since(264),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn kind_at(name: &str, version: i32) -> Option<FieldKind> {
        WORLD_HEADER
            .iter()
            .find(|field| field.name == name && field.is_present(version))
            .map(|field| field.kind)
    }

    #[test]
    fn seed_changes_representation_at_179() {
        assert_eq!(kind_at(names::SEED, 178), None);
        assert_eq!(kind_at(names::SEED, 179), Some(FieldKind::I32));
        assert_eq!(kind_at(names::SEED, 180), Some(FieldKind::Str));
        assert_eq!(kind_at(names::SEED, 279), Some(FieldKind::Str));
    }

    #[test]
    fn bartender_fields_start_after_178() {
        for name in [
            "saved_bartender",
            "downed_invasion_t1",
            "downed_invasion_t2",
            "downed_invasion_t3",
        ] {
            assert_eq!(kind_at(name, 178), None, "{name} at 178");
            assert_eq!(kind_at(name, 179), Some(FieldKind::Bool), "{name} at 179");
        }
    }

    #[test]
    fn difficulty_block_is_exclusive() {
        assert!(kind_at("expert_mode", 207).is_some());
        assert!(kind_at("master_mode", 207).is_none());
        assert!(kind_at("master_mode", 208).is_some());
        assert!(kind_at("expert_mode", 208).is_none());
        assert!(kind_at(names::GAME_MODE, 208).is_none());
        assert!(kind_at(names::GAME_MODE, 209).is_some());
        assert!(kind_at("master_mode", 209).is_none());
    }

    #[test]
    fn dimensions_are_always_stored() {
        assert_eq!(kind_at(names::MAX_TILES_X, 0), Some(FieldKind::I32));
        assert_eq!(kind_at(names::MAX_TILES_Y, 0), Some(FieldKind::I32));
        let y = WORLD_HEADER
            .iter()
            .position(|f| f.name == names::MAX_TILES_Y);
        let x = WORLD_HEADER
            .iter()
            .position(|f| f.name == names::MAX_TILES_X);
        assert!(y < x, "height is stored before width");
    }

    #[test]
    fn latest_fields_close_the_table() {
        let last = WORLD_HEADER.last().unwrap();
        assert_eq!(last.name, "moondial_cooldown");
        assert_eq!(last.kind, FieldKind::U8);
    }
}
