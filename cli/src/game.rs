use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use witcher_engine::config::GameConfig;
use witcher_engine::save::{load_from_path, save_to_path};
use witcher_engine::session::go_hunting;
use witcher_engine::shop::{buy, Purchase};
use witcher_engine::skills::learn;
use witcher_engine::{
    CombatEvent, Dice, Difficulty, LearnOutcome, Outcome, PlayerAction, School, SkillId, Witcher,
};

use crate::menu::{self, CombatChoice, MainChoice, StartChoice};
use crate::render;

/// Line-oriented terminal. `ask` yields `None` once input is exhausted.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}", line)
    }

    pub fn say_all(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Stay,
    Quit,
}

pub struct Game<R, W> {
    console: Console<R, W>,
    dice: Dice,
    config: GameConfig,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(console: Console<R, W>, dice: Dice, config: GameConfig) -> Self {
        Self { console, dice, config }
    }

    pub fn run(&mut self) -> Result<()> {
        self.console.say(render::separator())?;
        self.console.say("   THE WITCHER: TEXT RPG")?;
        self.console.say(render::separator())?;
        self.console.say("1. Continue (Load Game)")?;
        self.console.say("2. New Game / NG+")?;
        let Some(choice) = self.console.ask("Choose: ")? else {
            return Ok(());
        };

        if StartChoice::parse(&choice) == StartChoice::Continue {
            if let Some(mut witcher) = self.load_save()? {
                self.console.say(format!("Welcome back, {}!", witcher.name))?;
                return self.main_loop(&mut witcher);
            }
            self.console.say("No saved game found! Starting a new game.")?;
        }

        match self.new_game()? {
            Some(mut witcher) => self.main_loop(&mut witcher),
            None => Ok(()),
        }
    }

    /// An unreadable save is reported and treated as no save at all.
    fn load_save(&mut self) -> Result<Option<Witcher>> {
        match load_from_path(&self.config.save_path) {
            Ok(found) => Ok(found),
            Err(err) => {
                warn!(path = %self.config.save_path.display(), %err, "save unusable");
                self.console.say(format!("Save data could not be read ({}).", err))?;
                Ok(None)
            }
        }
    }

    fn new_game(&mut self) -> Result<Option<Witcher>> {
        if let Some(previous) = self.load_save()? {
            self.console.say("Found previous save data. Continue with NG+?")?;
            self.console.say("1. New Game (Fresh start)")?;
            self.console.say(format!("2. New Game+ (Continue from level {})", previous.level))?;
            let Some(choice) = self.console.ask("Choose: ")? else {
                return Ok(None);
            };
            if choice.trim() == "2" {
                let witcher = Witcher::new_game_plus(&previous);
                info!(ng_plus = witcher.ng_plus, "new game plus");
                self.console.say(format!("Starting New Game+ Round {}!", witcher.ng_plus))?;
                self.console.say("Enemies are stronger, but you keep your skills and level.")?;
                return Ok(Some(witcher));
            }
        }
        self.create_character()
    }

    fn create_character(&mut self) -> Result<Option<Witcher>> {
        let Some(name) = self.console.ask("Enter your Witcher's name: ")? else {
            return Ok(None);
        };
        let name = menu::parse_name(&name);

        self.console.say("Choose your school:")?;
        for (i, school) in School::ALL.iter().enumerate() {
            self.console.say(format!("{}. {} School", i + 1, school.label()))?;
        }
        let Some(school) = self.console.ask("Choose: ")? else {
            return Ok(None);
        };
        let school = menu::parse_school(&school);

        self.console.say("Choose difficulty:")?;
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            self.console.say(format!("{}. {}", i + 1, difficulty.label()))?;
        }
        let Some(difficulty) = self.console.ask("Choose: ")? else {
            return Ok(None);
        };
        let difficulty = menu::parse_difficulty(&difficulty);

        let witcher = Witcher::new(name, school, difficulty);
        info!(
            name = %witcher.name,
            school = school.label(),
            difficulty = difficulty.label(),
            "character created"
        );
        self.console.say(format!("Welcome, {} of the {} School!", witcher.name, school.label()))?;
        Ok(Some(witcher))
    }

    fn main_loop(&mut self, witcher: &mut Witcher) -> Result<()> {
        loop {
            self.console.say_all(&render::status(witcher))?;
            self.console.say("1. Hunt Monster")?;
            self.console.say("2. Skill Tree")?;
            self.console.say("3. Meditate (Heal)")?;
            self.console.say("4. Save Game")?;
            self.console.say("5. Quit")?;
            self.console.say("6. Visit Merchant")?;
            let Some(input) = self.console.ask("Choose: ")? else {
                return Ok(());
            };
            let Some(choice) = MainChoice::parse(&input) else {
                continue;
            };

            let flow = match choice {
                MainChoice::Hunt => self.hunt(witcher)?,
                MainChoice::SkillTree => self.skill_tree(witcher)?,
                MainChoice::Meditate => {
                    witcher.meditate();
                    self.console.say("You meditate... HP fully restored.")?;
                    Flow::Stay
                }
                MainChoice::Save => {
                    match save_to_path(&self.config.save_path, witcher) {
                        Ok(()) => self.console.say("Game saved successfully!")?,
                        Err(err) => {
                            warn!(path = %self.config.save_path.display(), %err, "save failed");
                            self.console.say(format!("Error: Could not save game! ({})", err))?;
                        }
                    }
                    Flow::Stay
                }
                MainChoice::Quit => Flow::Quit,
                MainChoice::Merchant => self.merchant(witcher)?,
            };
            if flow == Flow::Quit {
                self.console.say("Farewell, Witcher!")?;
                return Ok(());
            }
        }
    }

    fn hunt(&mut self, witcher: &mut Witcher) -> Result<Flow> {
        let events = RefCell::new(Vec::new());
        let mut io_err = None;
        let console = &mut self.console;

        let (hunt, outcome) = go_hunting(
            witcher,
            &mut self.dice,
            self.config.conjunction_chance,
            |w, monster| {
                let action = flush_events(console, &events)
                    .and_then(|()| choose_action(console, w, monster.name.as_str(), monster.hp));
                action.unwrap_or_else(|err| {
                    io_err = Some(err);
                    None
                })
            },
            |event| events.borrow_mut().push(event),
        )
        .context("hunt failed")?;
        if let Some(err) = io_err {
            return Err(err.into());
        }
        flush_events(&mut self.console, &events)?;
        if hunt.conjunction {
            info!(monster = hunt.monster_key, "conjunction hunt finished");
        }

        match outcome {
            Outcome::Victory => Ok(Flow::Stay),
            Outcome::Abandoned => Ok(Flow::Quit),
            Outcome::Defeat => {
                self.console.say("=== YOU DIED ===")?;
                let answer = self
                    .console
                    .ask("Press Enter to respawn (or type 'quit' to exit): ")?;
                match answer {
                    Some(answer) if !answer.trim().eq_ignore_ascii_case("quit") => {
                        witcher.respawn();
                        self.console.say("You awaken at the campfire, fully healed.")?;
                        Ok(Flow::Stay)
                    }
                    _ => Ok(Flow::Quit),
                }
            }
        }
    }

    fn skill_tree(&mut self, witcher: &mut Witcher) -> Result<Flow> {
        loop {
            self.console.say_all(&render::skill_tree(witcher))?;
            let Some(input) = self.console.ask("Choose skill to learn: ")? else {
                return Ok(Flow::Quit);
            };
            if input.trim() == (SkillId::ALL.len() + 1).to_string() {
                return Ok(Flow::Stay);
            }
            let Some(idx) = menu::parse_index(&input, SkillId::ALL.len()) else {
                continue;
            };
            let id = SkillId::ALL[idx];
            let line = match learn(witcher, id) {
                LearnOutcome::Learned => format!("Learned {}!", id.name()),
                LearnOutcome::AlreadyLearned => "Already learned!".to_string(),
                LearnOutcome::InsufficientPoints => "Not enough skill points!".to_string(),
                LearnOutcome::UnknownSkill => "No such skill.".to_string(),
            };
            self.console.say(line)?;
        }
    }

    fn merchant(&mut self, witcher: &mut Witcher) -> Result<Flow> {
        loop {
            self.console.say_all(&render::merchant(witcher))?;
            let Some(input) = self.console.ask("Buy (Enter to leave): ")? else {
                return Ok(Flow::Quit);
            };
            if input.trim().is_empty() {
                return Ok(Flow::Stay);
            }
            let Some(idx) = menu::parse_index(&input, witcher_engine::shop::STOCK.len()) else {
                continue;
            };
            let line = match buy(witcher, idx) {
                Purchase::Bought { item, gold_left } => {
                    format!("Bought {}! Gold left: {}", item, gold_left)
                }
                Purchase::NotEnoughGold { price, gold } => {
                    format!("Not enough gold! ({} needed, you have {})", price, gold)
                }
                Purchase::UnknownItem => "The merchant shrugs.".to_string(),
            };
            self.console.say(line)?;
        }
    }
}

fn flush_events<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    events: &RefCell<Vec<CombatEvent>>,
) -> io::Result<()> {
    for event in events.borrow_mut().drain(..) {
        console.say(render::event(&event))?;
    }
    Ok(())
}

/// Prompt until the player picks something; `None` on end of input.
fn choose_action<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    witcher: &Witcher,
    monster: &str,
    monster_hp: i32,
) -> io::Result<Option<PlayerAction>> {
    loop {
        console.say(format!(
            "\n{}: {}/{} HP | {}: {} HP",
            witcher.name, witcher.hp, witcher.max_hp, monster, monster_hp
        ))?;
        console.say("1. Fast Attack  2. Strong Attack  3. Sign  4. Item  5. Defend")?;
        let Some(input) = console.ask("Choose action: ")? else {
            return Ok(None);
        };
        let action = match CombatChoice::parse(&input) {
            Some(CombatChoice::FastAttack) => PlayerAction::FastAttack,
            Some(CombatChoice::StrongAttack) => PlayerAction::StrongAttack,
            Some(CombatChoice::Defend) => PlayerAction::Defend,
            Some(CombatChoice::Sign) => {
                console.say("Choose Sign: 1.Aard 2.Igni 3.Quen 4.Axii 5.Yrden")?;
                let Some(input) = console.ask("Sign: ")? else {
                    return Ok(None);
                };
                match menu::parse_sign(&input) {
                    Some(sign) => PlayerAction::Sign(sign),
                    None => continue,
                }
            }
            Some(CombatChoice::Item) => {
                if witcher.inventory.is_empty() {
                    // the engine reports the empty bag and asks again
                    return Ok(Some(PlayerAction::UseItem(None)));
                }
                console.say(render::inventory(witcher))?;
                let Some(input) = console.ask("Choose item (0 to cancel): ")? else {
                    return Ok(None);
                };
                PlayerAction::UseItem(menu::parse_index(&input, witcher.inventory.len()))
            }
            None => continue,
        };
        return Ok(Some(action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn game(input: &str, save: &std::path::Path) -> Game<Cursor<Vec<u8>>, Vec<u8>> {
        let config = GameConfig { save_path: save.to_path_buf(), ..GameConfig::default() };
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Game::new(console, Dice::from_seed(7), config)
    }

    fn output(game: Game<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(game.console.out).unwrap()
    }

    #[test]
    fn ask_strips_line_endings_and_reports_eof() {
        let mut console = Console::new(Cursor::new(b"two\r\n".to_vec()), Vec::new());
        assert_eq!(console.ask("> ").unwrap().as_deref(), Some("two"));
        assert_eq!(console.ask("> ").unwrap(), None);
    }

    #[test]
    fn merchant_then_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.txt");
        let mut g = game("2\nVesemir\n1\n2\n6\n3\n1\n\n4\n5\n", &path);
        g.run().unwrap();

        let text = output(g);
        assert!(text.contains("Bought Witcher Steel Sword! Gold left: 0"));
        assert!(text.contains("Not enough gold! (5 needed, you have 0)"));
        let saved = load_from_path(&path).unwrap().unwrap();
        assert_eq!(saved.name, "Vesemir");
        assert_eq!(saved.equipped_sword, "Witcher Steel Sword");
        assert_eq!(saved.gold, 0);
    }

    #[test]
    fn skill_tree_refuses_without_points() {
        let dir = tempfile::tempdir().unwrap();
        let mut g = game("2\n\n\n\n2\n1\n7\n5\n", &dir.path().join("save.txt"));
        g.run().unwrap();
        let text = output(g);
        assert!(text.contains("Not enough skill points!"));
        assert!(text.contains("Farewell, Witcher!"));
    }

    #[test]
    fn eof_mid_fight_ends_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let mut g = game("2\n\n\n\n1\n", &dir.path().join("save.txt"));
        g.run().unwrap();
        let text = output(g);
        assert!(text.contains("Witcher encounters:"));
        assert!(text.contains("You slip away from the fight."));
    }
}
