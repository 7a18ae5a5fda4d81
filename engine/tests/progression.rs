use proptest::prelude::*;
use witcher_engine::{learn_skill, Difficulty, LearnOutcome, School, SkillId, Witcher};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

proptest! {
    #[test]
    fn gain_exp_scales_and_levels_once(
        diff in difficulty(),
        start in 0i32..100,
        amount in 0i32..1000,
    ) {
        let mut w = Witcher::new("Geralt", School::Wolf, diff);
        w.exp = start;
        let expected = (amount as f64 * diff.settings().exp_mult) as i32;

        let gain = w.gain_exp(amount);

        prop_assert_eq!(gain.gained, expected);
        if start + expected >= 100 {
            prop_assert!(gain.leveled_up);
            prop_assert_eq!(w.level, 2);
            prop_assert_eq!(w.exp, 0);
            prop_assert_eq!(w.skill_points, 1);
        } else {
            prop_assert!(!gain.leveled_up);
            prop_assert_eq!(w.level, 1);
            prop_assert_eq!(w.exp, start + expected);
        }
    }
}

#[test]
fn level_up_restores_and_improves() {
    let mut w = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
    w.hp = 3;
    let gain = w.gain_exp(250);
    assert!(gain.leveled_up);
    assert_eq!((w.level, w.exp), (2, 0));
    assert_eq!((w.max_hp, w.hp, w.base_dmg), (125, 125, 14));
}

#[test]
fn easy_mode_boosts_experience() {
    let mut w = Witcher::new("Geralt", School::Wolf, Difficulty::JustTheStory);
    assert_eq!(w.gain_exp(25).gained, 30);
    let mut w = Witcher::new("Geralt", School::Wolf, Difficulty::DeathMarch);
    assert_eq!(w.gain_exp(150).gained, 90);
}

#[test]
fn learning_spends_points_and_buffs_damage() {
    let mut w = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
    assert_eq!(learn_skill(&mut w, "Muscle Memory"), LearnOutcome::InsufficientPoints);
    assert!(!w.has_learned(SkillId::MuscleMemory));

    w.skill_points = 2;
    assert_eq!(learn_skill(&mut w, "Muscle Memory"), LearnOutcome::Learned);
    assert_eq!((w.skill_points, w.base_dmg), (1, 15));
    assert!(w.has_learned(SkillId::MuscleMemory));
    assert_eq!(learn_skill(&mut w, "Muscle Memory"), LearnOutcome::AlreadyLearned);
    assert_eq!(w.skill_points, 1);

    assert_eq!(learn_skill(&mut w, "Strength Training"), LearnOutcome::Learned);
    assert_eq!((w.skill_points, w.base_dmg), (0, 20));
}

#[test]
fn sign_and_alchemy_skills_leave_stats_alone() {
    let mut w = Witcher::new("Coen", School::Griffin, Difficulty::StoryAndSwords);
    w.skill_points = 3;
    let before = (w.base_dmg, w.sign_power, w.max_hp);
    for name in ["Far-Reaching Aard", "Delusion", "Heightened Tolerance"] {
        assert_eq!(learn_skill(&mut w, name), LearnOutcome::Learned);
    }
    assert_eq!((w.base_dmg, w.sign_power, w.max_hp), before);
    assert_eq!(w.skill_points, 0);
}

#[test]
fn unknown_skill_is_reported() {
    let mut w = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
    w.skill_points = 1;
    assert_eq!(learn_skill(&mut w, "Whirl"), LearnOutcome::UnknownSkill);
    assert_eq!(w.skill_points, 1);
}

#[test]
fn new_game_plus_carries_progress() {
    let mut old = Witcher::new("Geralt", School::Wolf, Difficulty::BloodAndBrokenBones);
    old.level = 5;
    old.exp = 40;
    old.skill_points = 2;
    old.gold = 320;
    assert_eq!(learn_skill(&mut old, "Muscle Memory"), LearnOutcome::Learned);
    old.inventory.push("Fiend Eye".into());

    let next = Witcher::new_game_plus(&old);
    assert_eq!(next.name, "Geralt");
    assert_eq!(next.difficulty, Difficulty::BloodAndBrokenBones);
    assert_eq!((next.level, next.exp, next.skill_points, next.gold), (5, 0, 1, 320));
    assert_eq!(next.ng_plus, 1);
    assert!(next.has_learned(SkillId::MuscleMemory));
    // school stats plus the NG+ bump; learned skill bonuses are not re-granted
    assert_eq!((next.max_hp, next.hp, next.base_dmg), (130, 130, 17));
    assert_eq!(next.inventory, vec!["Bread", "Dwarven Spirit"]);

    let again = Witcher::new_game_plus(&next);
    assert_eq!(again.ng_plus, 2);
    assert_eq!((again.max_hp, again.base_dmg), (150, 22));
}

#[test]
fn meditate_and_respawn() {
    let mut w = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
    w.hp = 0;
    w.temp_buff = 5;
    w.respawn();
    assert_eq!((w.hp, w.temp_buff), (110, 0));
    w.hp = 12;
    w.meditate();
    assert_eq!(w.hp, 110);
}
