use witcher_engine::shop::STOCK;
use witcher_engine::skills::SkillId;
use witcher_engine::{CombatEvent, Witcher};

pub fn separator() -> String {
    "=".repeat(60)
}

pub fn status(w: &Witcher) -> Vec<String> {
    let bag = if w.inventory.is_empty() {
        "-".to_string()
    } else {
        w.inventory.join(", ")
    };
    vec![
        separator(),
        format!("{} ({} School) - {}", w.name, w.school.label(), w.difficulty.label()),
        format!("Level: {} | HP: {}/{} | Gold: {}", w.level, w.hp, w.max_hp, w.gold),
        format!(
            "Damage: {} | Defense: {} | Sign Power: {}",
            w.base_dmg, w.defense, w.sign_power
        ),
        format!("Skill Points: {} | NG+: {} | XP: {}/100", w.skill_points, w.ng_plus, w.exp),
        format!("Sword: {} | Armor: {}", w.equipped_sword, w.equipped_armor),
        format!("Inventory: {}", bag),
        separator(),
    ]
}

pub fn skill_tree(w: &Witcher) -> Vec<String> {
    let mut lines = vec![format!("--- SKILL TREE (Points: {}) ---", w.skill_points)];
    for (i, id) in SkillId::ALL.iter().enumerate() {
        let skill = id.info();
        let status = if w.has_learned(*id) {
            "[Learned]".to_string()
        } else {
            format!("[Cost: {}]", skill.cost)
        };
        lines.push(format!("{}. {} ({:?}) - {}", i + 1, id.name(), skill.category, status));
        lines.push(format!("   > {}", skill.description));
    }
    lines.push(format!("{}. Back", SkillId::ALL.len() + 1));
    lines
}

pub fn merchant(w: &Witcher) -> Vec<String> {
    let mut lines = vec![format!("--- MERCHANT (Gold: {}) ---", w.gold)];
    for (i, ware) in STOCK.iter().enumerate() {
        lines.push(format!("{}. {} - {} Gold", i + 1, ware.name, ware.price));
    }
    lines
}

pub fn inventory(w: &Witcher) -> String {
    let items = w
        .inventory
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}.{}", i + 1, item))
        .collect::<Vec<_>>()
        .join(" ");
    format!("Inventory: {}", items)
}

pub fn event(e: &CombatEvent) -> String {
    use CombatEvent::*;
    match e {
        Encounter { monster, hp } => {
            format!("{}\nWitcher encounters: {} ({} HP)", separator(), monster, hp)
        }
        FastAttack { dmg } | StrongAttack { dmg } => format!("You deal {} damage!", dmg),
        StrongAttackMissed => "Strong attack missed!".to_string(),
        Aard { dmg } => format!("Used Aard for {} damage!", dmg),
        Igni { dmg } => format!("Used Igni for {} damage!", dmg),
        ArmorMelted { min_dmg, max_dmg } => {
            format!("The flames melt its armor! (now hits for {}-{})", min_dmg, max_dmg)
        }
        QuenRaised { shield } => format!("Quen shield activated! (+{} defense)", shield),
        AxiiStunned => "Axii stunned the enemy! They skip a turn!".to_string(),
        AxiiFailed => "Axii failed!".to_string(),
        YrdenSet => "Yrden trap set! Enemy slowed.".to_string(),
        ItemUsed { item, hp } => format!("Used {}! HP restored to {}.", item, hp),
        InventoryEmpty => "Inventory empty!".to_string(),
        ItemUnusable { item } => format!("{} is no use in a fight.", item),
        Defending => "You take a defensive stance!".to_string(),
        EnemyAttack { monster, dmg } => format!("{} attacks you for {} damage!", monster, dmg),
        EnemyDefends { monster } => format!("{} defends!", monster),
        EnemyHeals { monster, .. } => format!("{} heals itself!", monster),
        EnemySpecial { monster, dmg } => {
            format!("{} uses special attack for {} damage!", monster, dmg)
        }
        Victory { exp, gold, loot } => {
            let mut text =
                format!("Victory!\nGained {} XP, {} gold and {}", exp.gained, gold, loot);
            if exp.leveled_up {
                text.push_str("\n*** LEVEL UP! (Gained 1 Skill Point) ***");
            }
            text
        }
        Defeat => "You collapse...".to_string(),
        Abandoned => "You slip away from the fight.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use witcher_engine::{Difficulty, ExpGain, School};

    #[test]
    fn victory_mentions_level_up() {
        let text = event(&CombatEvent::Victory {
            exp: ExpGain { gained: 30, leveled_up: true },
            gold: 10,
            loot: "Ghoul Blood".into(),
        });
        assert!(text.contains("Gained 30 XP"));
        assert!(text.contains("LEVEL UP"));
    }

    #[test]
    fn skill_tree_lists_every_skill_and_back() {
        let w = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
        let lines = skill_tree(&w);
        assert_eq!(lines.len(), 1 + SkillId::ALL.len() * 2 + 1);
        assert_eq!(lines.last().map(String::as_str), Some("7. Back"));
    }

    #[test]
    fn inventory_is_numbered() {
        let w = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
        assert_eq!(inventory(&w), "Inventory: 1.Bread 2.Dwarven Spirit");
    }
}
