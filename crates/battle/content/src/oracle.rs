//! In-memory oracles over loaded content.

use std::collections::HashMap;

use battle_core::{
    BattleConfig, BattleEnv, BossTemplate, CombatantOracle, EnemyTemplate, FishTemplate,
    ItemDefinition, ItemOracle, Move, MoveOracle, PcgRng,
};

use crate::loaders::{
    BossLoader, ConfigLoader, EncounterLoader, EncounterSpec, EnemyLoader, FishLoader, ItemLoader,
    LoadResult, MoveLoader, PartyLoader, PartySpec,
};

/// Static battle content keyed by id.
///
/// Implements every core oracle trait, so one value backs a whole
/// [`BattleEnv`]. The data is immutable once built.
#[derive(Clone, Debug, Default)]
pub struct ContentOracles {
    moves: HashMap<String, Move>,
    fish: HashMap<String, FishTemplate>,
    enemies: HashMap<String, EnemyTemplate>,
    bosses: HashMap<String, BossTemplate>,
    items: HashMap<String, ItemDefinition>,
    encounters: Vec<EncounterSpec>,
    party: PartySpec,
    config: BattleConfig,
    rng: PcgRng,
}

impl ContentOracles {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Content compiled into the crate from its `data/` directory.
    pub fn builtin() -> LoadResult<Self> {
        let mut content = Self::new(ConfigLoader::parse(include_str!("../data/config.toml"))?);
        content.extend_moves(MoveLoader::parse(include_str!("../data/moves.ron"))?);
        content.extend_fish(FishLoader::parse(include_str!("../data/fish.ron"))?);
        content.extend_enemies(EnemyLoader::parse(include_str!("../data/enemies.ron"))?);
        content.extend_bosses(BossLoader::parse(include_str!("../data/bosses.ron"))?);
        content.extend_items(ItemLoader::parse(include_str!("../data/items.ron"))?);
        content.encounters = EncounterLoader::parse(include_str!("../data/encounters.ron"))?;
        content.party = PartyLoader::parse(include_str!("../data/party.ron"))?;
        content.audit();
        Ok(content)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    pub fn extend_moves(&mut self, moves: impl IntoIterator<Item = Move>) {
        for mv in moves {
            self.moves.insert(mv.id.clone(), mv);
        }
    }

    pub fn extend_fish(&mut self, fish: impl IntoIterator<Item = FishTemplate>) {
        for template in fish {
            self.fish.insert(template.id.clone(), template);
        }
    }

    pub fn extend_enemies(&mut self, enemies: impl IntoIterator<Item = EnemyTemplate>) {
        for template in enemies {
            self.enemies.insert(template.id.clone(), template);
        }
    }

    pub fn extend_bosses(&mut self, bosses: impl IntoIterator<Item = BossTemplate>) {
        for template in bosses {
            self.bosses.insert(template.base.id.clone(), template);
        }
    }

    pub fn extend_items(&mut self, items: impl IntoIterator<Item = ItemDefinition>) {
        for item in items {
            self.items.insert(item.id.clone(), item);
        }
    }

    pub fn set_encounters(&mut self, encounters: Vec<EncounterSpec>) {
        self.encounters = encounters;
    }

    pub fn set_party(&mut self, party: PartySpec) {
        self.party = party;
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Borrow everything as a core environment.
    pub fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(self, self, self, &self.rng, &self.config)
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn encounter(&self, id: &str) -> Option<&EncounterSpec> {
        self.encounters.iter().find(|spec| spec.id == id)
    }

    pub fn encounters(&self) -> &[EncounterSpec] {
        &self.encounters
    }

    pub fn party(&self) -> &PartySpec {
        &self.party
    }

    /// Move ids referenced by templates but absent from the catalog.
    ///
    /// Those moves degrade to the generic strike at spawn time; each one is
    /// also reported through `tracing`.
    pub fn audit(&self) -> Vec<String> {
        let referenced = self
            .fish
            .values()
            .flat_map(|fish| fish.moves.iter())
            .chain(self.enemies.values().flat_map(|enemy| enemy.moves.iter()))
            .chain(self.bosses.values().flat_map(|boss| boss.base.moves.iter()));

        let mut missing: Vec<String> = referenced
            .filter(|id| !self.moves.contains_key(id.as_str()))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();
        for id in &missing {
            tracing::warn!(move_id = %id, "template references an unknown move");
        }
        missing
    }
}

impl MoveOracle for ContentOracles {
    fn move_template(&self, id: &str) -> Option<Move> {
        self.moves.get(id).cloned()
    }
}

impl CombatantOracle for ContentOracles {
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

impl ItemOracle for ContentOracles {
    fn item(&self, id: &str) -> Option<ItemDefinition> {
        self.items.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{BattleSession, Element, EncounterKind, Power};

    #[test]
    fn builtin_content_is_consistent() {
        let content = ContentOracles::builtin().expect("embedded data parses");
        assert!(content.audit().is_empty());
        assert!(!content.encounters().is_empty());

        let env = content.env();
        let party = content
            .party()
            .build(&content, &content)
            .expect("party templates exist");
        assert!(!party.fish.is_empty());
        for spec in content.encounters() {
            let encounter = spec.build(&env, 7).expect("encounter templates exist");
            let session = BattleSession::start(content.config(), &party, encounter);
            assert!(!session.opponents().is_empty(), "{} spawns opponents", spec.id);
        }
    }

    #[test]
    fn boss_encounters_are_flagged() {
        let content = ContentOracles::builtin().expect("embedded data parses");
        let spec = content
            .encounters()
            .iter()
            .find(|spec| spec.boss.is_some())
            .expect("at least one boss encounter");
        let encounter = spec.build(&content.env(), 1).expect("templates exist");
        assert_eq!(encounter.kind(), EncounterKind::Boss);
    }

    #[test]
    fn audit_reports_unknown_moves() {
        let mut content = ContentOracles::default();
        content.extend_moves([Move::new("splash", "Splash", Element::Water, Power::Fixed(40))]);
        content.extend_fish([FishTemplate::new(
            "carp",
            "Carp",
            Element::Water,
            battle_core::BaseStats::new(10, 1, 1, 1),
            vec!["splash".into(), "tidal_wave".into(), "tidal_wave".into()],
        )]);
        assert_eq!(content.audit(), vec!["tidal_wave".to_string()]);
    }
}
