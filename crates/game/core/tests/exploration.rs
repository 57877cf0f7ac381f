use delve_core::{
    BattleResult, CombatStats, DungeonDefinition, EncounterEvent, EncounterKind,
    EncounterTableDefinition, EnemyDefinition, Env, EventCategory, EventKind, ExplorationConfig,
    ExplorationEngine, FloorDefinition, MasterDataSnapshot, PartyMember, RunStatus,
    RuntimePartyState, SchedulerWeights, StepOutcome, SuperRareDailyState, decode_log,
    encode_log, outcome_digest,
};

const CRYPT: u32 = 7;
const WARDEN: u32 = 42;

/// One floor, one event, one boss.
fn boss_crypt() -> MasterDataSnapshot {
    MasterDataSnapshot::new()
        .with_dungeon(DungeonDefinition {
            id: CRYPT,
            name: "Warden's Crypt".into(),
            chapter: 1,
            recommended_level: 30,
            floor_count: 1,
            events_per_floor: 1,
            tags: vec!["crypt".into()],
        })
        .with_floor(FloorDefinition {
            dungeon_id: CRYPT,
            floor_number: 1,
            encounter_table_id: 1,
        })
        .with_encounter_table(EncounterTableDefinition {
            id: 1,
            events: vec![EncounterEvent {
                kind: EncounterKind::Boss,
                enemy_id: Some(WARDEN),
                level: 30,
                weight: Some(1.0),
                group_min: 1,
                group_max: 1,
            }],
        })
        .with_enemy(EnemyDefinition {
            id: WARDEN,
            name: "Crypt Warden".into(),
            base_experience: 100,
            is_boss: true,
            base_stats: Default::default(),
            resistances: Default::default(),
            skill_ids: vec![],
            skill_rate_percent: 0.0,
            drop_item_ids: vec![],
        })
}

/// Several floors of ordinary encounters for longer runs.
fn catacombs(floors: u32, events_per_floor: u32) -> MasterDataSnapshot {
    let mut data = boss_crypt().with_dungeon(DungeonDefinition {
        id: CRYPT,
        name: "Catacombs".into(),
        chapter: 1,
        recommended_level: 5,
        floor_count: floors,
        events_per_floor,
        tags: vec![],
    });
    data.floors.clear();
    for number in 1..=floors {
        data = data.with_floor(FloorDefinition {
            dungeon_id: CRYPT,
            floor_number: number,
            encounter_table_id: 1,
        });
    }
    data.with_encounter_table(EncounterTableDefinition {
        id: 1,
        events: vec![EncounterEvent {
            kind: EncounterKind::Enemy,
            enemy_id: Some(WARDEN),
            level: 1,
            weight: None,
            group_min: 1,
            group_max: 3,
        }],
    })
}

fn champions() -> RuntimePartyState {
    let stats = CombatStats {
        max_hp: 100_000,
        hp: 100_000,
        physical_attack: 5_000,
        accuracy: 500,
        speed: 50,
        ..CombatStats::default()
    };
    RuntimePartyState::new(vec![
        PartyMember::new(1, 30, stats.clone()),
        PartyMember::new(2, 30, stats),
    ])
    .expect("valid party")
}

fn novice() -> RuntimePartyState {
    let stats = CombatStats {
        max_hp: 1,
        hp: 1,
        physical_attack: 1,
        evasion: 0,
        ..CombatStats::default()
    };
    RuntimePartyState::new(vec![PartyMember::new(1, 1, stats)]).expect("valid party")
}

fn combat_only() -> ExplorationConfig {
    ExplorationConfig::default().with_scheduler(SchedulerWeights::new(0.0, 0.0, 1.0))
}

fn run_to_end(
    data: &MasterDataSnapshot,
    config: &ExplorationConfig,
    party: &RuntimePartyState,
    seed: u64,
) -> (Vec<StepOutcome>, RunStatus) {
    let env = Env::with_all(data, data, data, data, data).into_master_env();
    let engine = ExplorationEngine::new(env, config).expect("valid weights");
    let (plan, mut state) = engine
        .prepare(CRYPT, u32::MAX, SuperRareDailyState::new(1), seed)
        .expect("run prepared");

    let mut outcomes = Vec::new();
    while let Some(outcome) = engine.step(&plan, &mut state, party).expect("step succeeds") {
        outcomes.push(outcome);
    }
    (outcomes, state.status)
}

#[test]
fn single_boss_run_terminates_exactly_on_defeat() {
    let data = boss_crypt();
    let config = combat_only();

    for (party, seed) in [(champions(), 11), (novice(), 11), (champions(), 12), (novice(), 12)] {
        let (outcomes, status) = run_to_end(&data, &config, &party, seed);
        assert_eq!(outcomes.len(), 1, "one floor with one event");
        let outcome = &outcomes[0];
        assert_eq!(outcome.category(), EventCategory::Combat);

        let summary = outcome.combat.as_ref().expect("combat summary");
        assert_eq!(outcome.should_terminate, summary.result == BattleResult::Defeat);
        match summary.result {
            BattleResult::Defeat => assert_eq!(status, RunStatus::Defeated),
            _ => assert_eq!(status, RunStatus::Completed),
        }
    }
}

#[test]
fn champions_beat_the_warden_and_share_experience() {
    let (outcomes, status) = run_to_end(&boss_crypt(), &combat_only(), &champions(), 3);
    assert_eq!(status, RunStatus::Completed);

    let outcome = &outcomes[0];
    let summary = outcome.combat.as_ref().expect("combat summary");
    assert_eq!(summary.result, BattleResult::Victory);
    assert!(summary.enemies.iter().all(|enemy| enemy.defeated));
    assert_eq!(summary.enemies[0].actor, 1_000 + WARDEN);

    let EventKind::Combat { enemy_ids, .. } = &outcome.entry.kind else {
        panic!("expected combat entry");
    };
    assert_eq!(enemy_ids, &vec![WARDEN]);

    // Equal levels and two survivors: experience 100 / 2 each,
    // gold 100 * 0.5 / 2 per survivor.
    assert_eq!(outcome.member_experience().get(&1), Some(&50));
    assert_eq!(outcome.member_experience().get(&2), Some(&50));
    assert_eq!(outcome.experience(), 100);
    assert_eq!(outcome.gold(), 50);

    let log = outcome.battle_log.as_ref().expect("battle log");
    assert_eq!(decode_log(&encode_log(log)).expect("log decodes"), *log);
}

#[test]
fn novice_falls_to_the_warden() {
    let (outcomes, status) = run_to_end(&boss_crypt(), &combat_only(), &novice(), 5);
    let outcome = &outcomes[0];
    assert_eq!(outcome.combat.as_ref().map(|c| c.result), Some(BattleResult::Defeat));
    assert!(outcome.should_terminate);
    assert_eq!(outcome.experience(), 0);
    assert_eq!(outcome.gold(), 0);
    assert_eq!(status, RunStatus::Defeated);
}

#[test]
fn full_run_resolves_every_floor_event_once() {
    let data = catacombs(4, 3);
    let (outcomes, status) =
        run_to_end(&data, &ExplorationConfig::default(), &champions(), 2024);

    assert_eq!(status, RunStatus::Completed);
    assert_eq!(outcomes.len(), 12);
    for (sequence, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.entry.sequence as usize, sequence);
        assert_eq!(outcome.entry.floor_number as usize, sequence / 3 + 1);
        assert_eq!(outcome.entry.event_index as usize, sequence % 3);
    }
}

#[test]
fn same_seed_replays_to_the_same_digest() {
    let data = catacombs(3, 4);
    let config = ExplorationConfig::default();

    let (first, _) = run_to_end(&data, &config, &champions(), 99);
    let (second, _) = run_to_end(&data, &config, &champions(), 99);
    assert_eq!(first, second);

    let digest = outcome_digest(&first);
    assert_eq!(hex::encode(digest), hex::encode(outcome_digest(&second)));
    assert_eq!(hex::encode(digest).len(), 64);
}
