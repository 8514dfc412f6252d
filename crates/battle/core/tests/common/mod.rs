#![allow(dead_code)]

use std::collections::HashMap;

use battle_core::{
    BaseStats, BattleConfig, BattleEnv, BossTemplate, CombatantOracle, ConsumableEffect, Element,
    EnemyTemplate, FishTemplate, ItemDefinition, ItemOracle, Move, MoveCategory, MoveOracle,
    PlayerFish, Power, RngOracle,
};

/// RNG that returns the same value for every seed.
///
/// `Constant(0)` makes every chance succeed, every d100 roll 1 and every
/// range pick its minimum.
pub struct Constant(pub u32);

impl RngOracle for Constant {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// In-memory content used by the integration tests.
#[derive(Default)]
pub struct Library {
    pub moves: HashMap<String, Move>,
    pub fish: HashMap<String, FishTemplate>,
    pub enemies: HashMap<String, EnemyTemplate>,
    pub bosses: HashMap<String, BossTemplate>,
    pub items: HashMap<String, ItemDefinition>,
}

impl MoveOracle for Library {
    fn move_template(&self, id: &str) -> Option<Move> {
        self.moves.get(id).cloned()
    }
}

impl CombatantOracle for Library {
    fn fish(&self, id: &str) -> Option<FishTemplate> {
        self.fish.get(id).cloned()
    }

    fn enemy(&self, id: &str) -> Option<EnemyTemplate> {
        self.enemies.get(id).cloned()
    }

    fn boss(&self, id: &str) -> Option<BossTemplate> {
        self.bosses.get(id).cloned()
    }
}

impl ItemOracle for Library {
    fn item(&self, id: &str) -> Option<ItemDefinition> {
        self.items.get(id).cloned()
    }
}

impl Library {
    pub fn with_move(mut self, mv: Move) -> Self {
        self.moves.insert(mv.id.clone(), mv);
        self
    }

    pub fn with_fish(mut self, template: FishTemplate) -> Self {
        self.fish.insert(template.id.clone(), template);
        self
    }

    pub fn with_enemy(mut self, template: EnemyTemplate) -> Self {
        self.enemies.insert(template.id.clone(), template);
        self
    }

    pub fn with_boss(mut self, template: BossTemplate) -> Self {
        self.bosses.insert(template.base.id.clone(), template);
        self
    }

    pub fn with_item(mut self, item: ItemDefinition) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle, config: &'a BattleConfig) -> BattleEnv<'a> {
        BattleEnv::new(self, self, self, rng, config)
    }

    pub fn spawn_fish(&self, id: &str, level: u32) -> PlayerFish {
        let template = self.fish.get(id).expect("fish template registered");
        PlayerFish::from_template(template, level, self)
    }
}

/// Moves, fish, enemies, a two-phase boss and a few consumables.
pub fn library() -> Library {
    Library::default()
        .with_move(Move::new("splash", "Splash", Element::Water, Power::Fixed(40)))
        .with_move(Move::new("nibble", "Nibble", Element::Normal, Power::Fixed(30)))
        .with_move(
            Move::new("quick_jab", "Quick Jab", Element::Normal, Power::Fixed(5)).with_priority(1),
        )
        .with_move(Move::new("crush", "Crush", Element::Normal, Power::Fixed(100)))
        .with_move(
            Move::new("glare", "Glare", Element::Normal, Power::Fixed(0))
                .with_category(MoveCategory::Status),
        )
        .with_fish(FishTemplate::new(
            "carp",
            "Carp",
            Element::Water,
            BaseStats::new(100, 100, 10, 100),
            vec!["splash".into(), "nibble".into()],
        ))
        .with_fish(FishTemplate::new(
            "tilapia",
            "Tilapia",
            Element::Water,
            BaseStats::new(100, 0, 0, 100),
            vec!["nibble".into()],
        ))
        .with_fish(FishTemplate::new(
            "sprat",
            "Sprat",
            Element::Water,
            BaseStats::new(10, 5, 0, 1),
            vec!["quick_jab".into(), "nibble".into()],
        ))
        .with_enemy(
            EnemyTemplate::new(
                "minnow",
                "Minnow",
                Element::Normal,
                BaseStats::new(10, 1, 0, 1),
                Vec::new(),
            )
            .with_rewards(30, 15),
        )
        .with_enemy(EnemyTemplate::new(
            "brute",
            "Brute",
            Element::Normal,
            BaseStats::new(500, 200, 50, 50),
            vec!["crush".into()],
        ))
        .with_enemy(EnemyTemplate::new(
            "watcher",
            "Watcher",
            Element::Normal,
            BaseStats::new(200, 10, 0, 1),
            vec!["glare".into()],
        ))
        .with_boss({
            let base = EnemyTemplate::new(
                "steward",
                "Steward",
                Element::Normal,
                BaseStats::new(100, 0, 0, 1),
                Vec::new(),
            );
            let mut template = BossTemplate::new(base, 2);
            template.title = "Master of the Feast".into();
            template.intro_dialogue = "Who dares disturb the banquet?".into();
            template.defeat_dialogue = "The good wine... saved for last.".into();
            template.phase_dialogue = vec![(2, "Bring out the reserve jars!".into())];
            template
        })
        .with_item(ItemDefinition::new("bread", "Bread", ConsumableEffect::Heal(20)))
        .with_item(ItemDefinition::new(
            "jar_of_oil",
            "Jar of Oil",
            ConsumableEffect::Revive(50),
        ))
}
