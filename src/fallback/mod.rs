// Synthetic demo snapshots for when the remote source is unavailable

use crate::state::{CharacterSnapshot, InventoryItem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Stable per-name seed so repeated generations within a run agree.
fn name_seed(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

/// Generate a fully populated synthetic snapshot for `name`.
///
/// Every field the real decoder would populate gets a value in its plausible
/// range, plus a small fixed demo inventory. Cooldown state is not touched;
/// position is left at the origin for the caller to fill in.
pub fn demo_snapshot(name: &str) -> CharacterSnapshot {
    let mut rng = StdRng::seed_from_u64(name_seed(name));
    let mut c = CharacterSnapshot {
        name: name.to_string(),
        ..Default::default()
    };

    c.account = "demo_account".to_string();
    c.skin = "default".to_string();
    c.level = rng.gen_range(1..50);
    c.xp = rng.gen_range(1000..5000);
    c.max_xp = 10_000;
    c.gold = rng.gen_range(100..10_000);
    c.speed = rng.gen_range(5..20);

    // Skills
    c.mining_level = rng.gen_range(1..30);
    c.mining_xp = rng.gen_range(100..1000);
    c.mining_max_xp = 1000;
    c.woodcutting_level = rng.gen_range(1..30);
    c.woodcutting_xp = rng.gen_range(100..1000);
    c.woodcutting_max_xp = 1000;
    c.fishing_level = rng.gen_range(1..30);
    c.fishing_xp = rng.gen_range(100..1000);
    c.fishing_max_xp = 1000;
    c.weaponcrafting_level = rng.gen_range(1..30);
    c.weaponcrafting_xp = rng.gen_range(100..1000);
    c.weaponcrafting_max_xp = 1000;
    c.gearcrafting_level = rng.gen_range(1..30);
    c.gearcrafting_xp = rng.gen_range(100..1000);
    c.gearcrafting_max_xp = 1000;
    c.jewelrycrafting_level = rng.gen_range(1..30);
    c.jewelrycrafting_xp = rng.gen_range(100..1000);
    c.jewelrycrafting_max_xp = 1000;
    c.cooking_level = rng.gen_range(1..30);
    c.cooking_xp = rng.gen_range(100..1000);
    c.cooking_max_xp = 1000;
    c.alchemy_level = rng.gen_range(1..30);
    c.alchemy_xp = rng.gen_range(100..1000);
    c.alchemy_max_xp = 1000;

    // Combat stats
    c.hp = rng.gen_range(50..200);
    c.max_hp = 200;
    c.haste = rng.gen_range(1..20);
    c.critical_strike = rng.gen_range(1..20);
    c.wisdom = rng.gen_range(1..20);
    c.prospecting = rng.gen_range(1..20);
    c.attack_fire = rng.gen_range(1..20);
    c.attack_earth = rng.gen_range(1..20);
    c.attack_water = rng.gen_range(1..20);
    c.attack_air = rng.gen_range(1..20);
    c.dmg = rng.gen_range(10..50);
    c.dmg_fire = rng.gen_range(1..20);
    c.dmg_earth = rng.gen_range(1..20);
    c.dmg_water = rng.gen_range(1..20);
    c.dmg_air = rng.gen_range(1..20);
    c.res_fire = rng.gen_range(1..20);
    c.res_earth = rng.gen_range(1..20);
    c.res_water = rng.gen_range(1..20);
    c.res_air = rng.gen_range(1..20);

    // Equipment
    c.weapon_slot = "Demo Weapon".to_string();
    c.rune_slot = "Demo Rune".to_string();
    c.shield_slot = "Demo Shield".to_string();
    c.helmet_slot = "Demo Helmet".to_string();
    c.body_armor_slot = "Demo Body Armor".to_string();
    c.leg_armor_slot = "Demo Leg Armor".to_string();
    c.boots_slot = "Demo Boots".to_string();
    c.ring1_slot = "Demo Ring 1".to_string();
    c.ring2_slot = "Demo Ring 2".to_string();
    c.amulet_slot = "Demo Amulet".to_string();
    c.artifact1_slot = "Demo Artifact 1".to_string();
    c.artifact2_slot = "Demo Artifact 2".to_string();
    c.artifact3_slot = "Demo Artifact 3".to_string();
    c.utility1_slot = "Demo Utility 1".to_string();
    c.utility1_slot_quantity = rng.gen_range(1..10);
    c.utility2_slot = "Demo Utility 2".to_string();
    c.utility2_slot_quantity = rng.gen_range(1..10);
    c.bag_slot = "Demo Bag".to_string();

    c.task = "Demo Task".to_string();
    c.task_type = "Gathering".to_string();
    c.task_progress = rng.gen_range(1..10);
    c.task_total = 10;

    c.inventory_max_items = 20;
    c.inventory = vec![
        demo_item(1, "wood", rng.gen_range(1..50)),
        demo_item(2, "stone", rng.gen_range(1..50)),
        demo_item(3, "iron_ore", rng.gen_range(1..30)),
        demo_item(4, "gold_ore", rng.gen_range(1..20)),
        demo_item(5, "fish", rng.gen_range(1..15)),
        demo_item(6, "potion", rng.gen_range(1..5)),
    ];

    c
}

fn demo_item(slot: i32, code: &str, quantity: i32) -> InventoryItem {
    InventoryItem {
        slot,
        code: code.to_string(),
        quantity,
    }
}
