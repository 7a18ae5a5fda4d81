use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;
use witcher_engine::content::{is_consumable, monster_keys};
use witcher_engine::{
    resolve_combat, Difficulty, Dice, Outcome, PlayerAction, School, Witcher,
};

#[derive(Parser)]
#[command(name = "simulate-hunts")]
#[command(about = "Monte Carlo sim: many fights of a scripted witcher against one monster")]
struct Args {
    /// Monster key (bandit, bear, drowner, fiend, ghoul)
    #[arg(long, default_value = "drowner")]
    monster: String,

    /// Fight the conjunction-empowered variant
    #[arg(long, default_value_t = false)]
    conjunction: bool,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on player turns per trial
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// School label: Wolf | Griffin | Bear | Cat
    #[arg(long, default_value = "Wolf")]
    school: String,

    /// Difficulty label, e.g. "Death March!"
    #[arg(long, default_value = "Story and Swords")]
    difficulty: String,

    /// Character level to simulate (applies level-ups before fighting)
    #[arg(long, default_value_t = 1)]
    level: i32,

    /// NG+ cycle of the witcher
    #[arg(long, default_value_t = 0)]
    ng_plus: i32,

    /// Drink a consumable below this percent of max HP
    #[arg(long, default_value_t = 30)]
    heal_below: i32,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    monster: String,
    trials: u32,
    wins: u32,
    losses: u32,
    stalemates: u32,
    win_rate: f64,
    avg_rounds_wins: f64,
    median_rounds_wins: u32,
    avg_hp_left_wins: f64,
}

fn build_witcher(args: &Args) -> Result<Witcher> {
    let Some(school) = School::from_label(&args.school) else {
        bail!("unknown school: {}", args.school);
    };
    let Some(difficulty) = Difficulty::from_label(&args.difficulty) else {
        bail!("unknown difficulty: {}", args.difficulty);
    };
    let mut w = Witcher::new("Simulant", school, difficulty);
    for _ in 1..args.level {
        w.level_up();
    }
    w.ng_plus = args.ng_plus;
    Ok(w)
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !monster_keys().any(|k| k == args.monster) {
        bail!("unknown monster: {}", args.monster);
    }
    let template = build_witcher(&args)?;

    let mut wins = 0u32;
    let mut losses = 0u32;
    let mut stalemates = 0u32;
    let mut hp_left_total = 0i64;
    let mut rounds_vec: Vec<u32> = Vec::with_capacity(args.trials as usize);

    for i in 0..args.trials {
        let mut witcher = template.clone();
        let mut dice = Dice::from_seed(args.seed.wrapping_add(i as u64));
        let mut rounds = 0u32;

        let outcome = resolve_combat(
            &mut witcher,
            &args.monster,
            args.conjunction,
            &mut dice,
            |w, _| {
                if rounds >= args.max_rounds {
                    return None;
                }
                rounds += 1;
                let low = w.hp * 100 < w.max_hp * args.heal_below;
                match w.inventory.iter().position(|item| is_consumable(item)) {
                    Some(slot) if low => Some(PlayerAction::UseItem(Some(slot))),
                    _ => Some(PlayerAction::FastAttack),
                }
            },
            |_| {},
        )?;

        match outcome {
            Outcome::Victory => {
                wins += 1;
                hp_left_total += witcher.hp as i64;
                rounds_vec.push(rounds);
            }
            Outcome::Defeat => losses += 1,
            Outcome::Abandoned => stalemates += 1,
        }
    }

    rounds_vec.sort_unstable();
    let avg_rounds = if rounds_vec.is_empty() {
        0.0
    } else {
        rounds_vec.iter().map(|&r| r as u64).sum::<u64>() as f64 / wins as f64
    };
    let median_rounds = if rounds_vec.is_empty() {
        0
    } else {
        let m = rounds_vec.len() / 2;
        if rounds_vec.len() % 2 == 1 {
            rounds_vec[m]
        } else {
            (rounds_vec[m - 1] + rounds_vec[m]) / 2
        }
    };
    let summary = Summary {
        monster: args.monster.clone(),
        trials: args.trials,
        wins,
        losses,
        stalemates,
        win_rate: if args.trials == 0 { 0.0 } else { wins as f64 / args.trials as f64 },
        avg_rounds_wins: avg_rounds,
        median_rounds_wins: median_rounds,
        avg_hp_left_wins: if wins == 0 { 0.0 } else { hp_left_total as f64 / wins as f64 },
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("simulate-hunts results");
    println!("----------------------");
    println!("trials:             {}", summary.trials);
    println!(
        "monster:            {}{}",
        summary.monster,
        if args.conjunction { " (conjunction)" } else { "" }
    );
    println!(
        "witcher:            {} School, {}, level {}, NG+{}",
        template.school.label(),
        template.difficulty.label(),
        template.level,
        template.ng_plus
    );
    println!();
    println!("win rate:           {:.1}%", summary.win_rate * 100.0);
    println!("losses:             {}", summary.losses);
    println!("stalemates:         {}", summary.stalemates);
    println!("avg rounds (wins):  {:.2}", summary.avg_rounds_wins);
    println!("median rounds:      {}", summary.median_rounds_wins);
    println!("avg hp left (wins): {:.1}", summary.avg_hp_left_wins);

    Ok(())
}
