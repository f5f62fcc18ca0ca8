//! Compact singles simulator behind the [`crate::player::Player`] boundary.
//!
//! Each step either resolves a full turn (both sides choose) or a forced-switch phase
//! (only sides whose active creature fainted choose a replacement).

use crate::error::BattleError;
use crate::model::{Move, MoveCategory, Pokemon, SideCondition, StatusCondition, Terrain, Weather};
use crate::protocol::{ident, ProtocolLog};
use crate::types::{type_effectiveness, PokeType};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const MAX_TURNS: u32 = 500;
const FIELD_TURNS: u8 = 5;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Protocol slot name.
    pub fn slot(self) -> &'static str {
        match self {
            Side::A => "p1",
            Side::B => "p2",
        }
    }

    fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum BattleResult {
    AWins,
    BWins,
    Tie,
}

impl BattleResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            BattleResult::AWins => Some(Side::A),
            BattleResult::BWins => Some(Side::B),
            BattleResult::Tie => None,
        }
    }
}

/// A side's submitted order. Indices point into [`BattleView::available_moves`] and
/// [`BattleView::available_switches`], not into the team.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Choice {
    Move(usize),
    Switch(usize),
}

#[derive(Clone, Debug)]
pub struct CreatureView {
    pub species: String,
    pub types: Vec<PokeType>,
    pub current_hp: u32,
    pub max_hp: u32,
    pub status: Option<StatusCondition>,
    pub fainted: bool,
}

#[derive(Clone, Debug)]
pub struct MoveOption {
    pub id: String,
    pub name: String,
    pub move_type: PokeType,
    pub category: MoveCategory,
    pub base_power: u32,
    /// Percent; 0 never misses.
    pub accuracy: f32,
    pub priority: i32,
    pub pp: u8,
}

/// What one side is allowed to see when it is asked for a choice.
#[derive(Clone, Debug)]
pub struct BattleView {
    pub tag: String,
    pub format: String,
    pub turn: u32,
    pub side: Side,
    pub force_switch: bool,
    pub active: Option<CreatureView>,
    /// Opponent HP is reported in percent (`max_hp == 100`).
    pub opponent_active: Option<CreatureView>,
    pub available_moves: Vec<MoveOption>,
    pub available_switches: Vec<CreatureView>,
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub side_conditions: Vec<SideCondition>,
    pub opponent_side_conditions: Vec<SideCondition>,
}

impl BattleView {
    pub fn legal_choices(&self) -> Vec<Choice> {
        let moves = (0..self.available_moves.len()).map(Choice::Move);
        let switches = (0..self.available_switches.len()).map(Choice::Switch);
        if self.force_switch {
            switches.collect()
        } else {
            moves.chain(switches).collect()
        }
    }

    pub fn is_legal(&self, choice: Choice) -> bool {
        match choice {
            Choice::Move(i) => !self.force_switch && i < self.available_moves.len(),
            Choice::Switch(i) => i < self.available_switches.len(),
        }
    }
}

#[derive(Clone, Debug)]
struct Battler {
    pokemon: Pokemon,
    current_hp: i32,
    pp: Vec<u8>,
    status: Option<StatusCondition>,
    sleep_turns: u8,
}

impl Battler {
    fn new(pokemon: &Pokemon) -> Self {
        Battler {
            pokemon: pokemon.clone(),
            current_hp: pokemon.initial_hp(),
            pp: pokemon.moves.iter().map(|m| m.pp).collect(),
            status: None,
            sleep_turns: 0,
        }
    }

    fn is_fainted(&self) -> bool {
        self.current_hp <= 0
    }

    fn max_hp(&self) -> u32 {
        self.pokemon.stats.hp
    }

    fn name(&self) -> &str {
        &self.pokemon.name
    }

    fn view(&self) -> CreatureView {
        CreatureView {
            species: self.pokemon.name.clone(),
            types: self.pokemon.types.clone(),
            current_hp: self.current_hp.max(0) as u32,
            max_hp: self.max_hp(),
            status: self.status,
            fainted: self.is_fainted(),
        }
    }

    fn public_view(&self) -> CreatureView {
        let max = self.max_hp().max(1) as f32;
        let pct = (100.0 * self.current_hp.max(0) as f32 / max).round() as u32;
        CreatureView {
            current_hp: if self.is_fainted() { 0 } else { pct.max(1) },
            max_hp: 100,
            ..self.view()
        }
    }
}

#[derive(Clone, Debug)]
struct SideState {
    team: Vec<Battler>,
    active: usize,
    conditions: Vec<(SideCondition, u8)>,
}

impl SideState {
    fn active(&self) -> &Battler {
        &self.team[self.active]
    }

    fn active_mut(&mut self) -> &mut Battler {
        &mut self.team[self.active]
    }

    fn alive_count(&self) -> usize {
        self.team.iter().filter(|b| !b.is_fainted()).count()
    }

    /// Team indices of benched, non-fainted members in team order.
    fn switch_targets(&self) -> Vec<usize> {
        self.team
            .iter()
            .enumerate()
            .filter(|(idx, b)| *idx != self.active && !b.is_fainted())
            .map(|(idx, _)| idx)
            .collect()
    }

    fn has_condition(&self, condition: SideCondition) -> bool {
        self.conditions.iter().any(|(c, _)| *c == condition)
    }
}

#[derive(Clone)]
struct PlannedAction {
    side: Side,
    move_index: usize,
    priority: i32,
    speed: u32,
    tie_break: u64,
    battler_slot: usize,
}

/// Damage modifiers that come from the field rather than from the two creatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct DamageContext {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub attacker_burned: bool,
    /// Reflect against a physical hit or Light Screen against a special one.
    pub screened: bool,
}

pub struct Battle {
    tag: String,
    format: String,
    sides: [SideState; 2],
    weather: Option<(Weather, u8)>,
    terrain: Option<(Terrain, u8)>,
    turn: u32,
    // Ref: pokemon-showdown/sim/battle.ts: a single shared PRNG (Battle.prng) drives every roll.
    rng: SmallRng,
    log: ProtocolLog,
    result: Option<BattleResult>,
}

impl Battle {
    pub fn new(
        tag: impl Into<String>,
        format: impl Into<String>,
        team_a: &[Pokemon],
        team_b: &[Pokemon],
        seed: u64,
    ) -> Result<Self, BattleError> {
        if team_a.is_empty() {
            return Err(BattleError::EmptyTeam(Side::A));
        }
        if team_b.is_empty() {
            return Err(BattleError::EmptyTeam(Side::B));
        }
        let tag = tag.into();
        let format = format.into();
        let side = |team: &[Pokemon]| SideState {
            team: team.iter().map(Battler::new).collect(),
            active: 0,
            conditions: Vec::new(),
        };
        let mut battle = Battle {
            log: ProtocolLog::new(&tag, &format),
            tag,
            format,
            sides: [side(team_a), side(team_b)],
            weather: None,
            terrain: None,
            turn: 0,
            rng: SmallRng::seed_from_u64(seed),
            result: None,
        };
        for side in Side::BOTH {
            battle.log_switch_in(side);
        }
        battle.update_result();
        Ok(battle)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    pub fn log(&self) -> &ProtocolLog {
        &self.log
    }

    pub fn log_players(&mut self, name_a: &str, name_b: &str) {
        self.log.player(Side::A, name_a);
        self.log.player(Side::B, name_b);
    }

    pub fn alive_count(&self, side: Side) -> usize {
        self.side(side).alive_count()
    }

    /// Current HP of the side's active creature.
    pub fn active_hp(&self, side: Side) -> i32 {
        self.side(side).active().current_hp
    }

    fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side.index()]
    }

    fn needs_switch(&self, side: Side) -> bool {
        let state = self.side(side);
        state.active().is_fainted() && !state.switch_targets().is_empty()
    }

    fn in_switch_phase(&self) -> bool {
        Side::BOTH.iter().any(|s| self.needs_switch(*s))
    }

    /// Whether the side must submit a choice for the next [`Battle::step`].
    pub fn requested(&self, side: Side) -> bool {
        if self.result.is_some() {
            return false;
        }
        if self.in_switch_phase() {
            self.needs_switch(side)
        } else {
            true
        }
    }

    /// Move slots with PP left; empty when the active creature has to Struggle.
    fn usable_slots(&self, side: Side) -> Vec<usize> {
        let active = self.side(side).active();
        active
            .pp
            .iter()
            .enumerate()
            .filter(|(_, pp)| **pp > 0)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn view(&self, side: Side) -> BattleView {
        let own = self.side(side);
        let foe = self.side(side.opponent());
        let force_switch = self.needs_switch(side);
        let available_moves = if own.active().is_fainted() {
            Vec::new()
        } else {
            let slots = self.usable_slots(side);
            if slots.is_empty() {
                vec![move_option(&struggle(), 1)]
            } else {
                slots
                    .into_iter()
                    .map(|slot| move_option(&own.active().pokemon.moves[slot], own.active().pp[slot]))
                    .collect()
            }
        };
        let conditions =
            |s: &SideState| -> Vec<SideCondition> { s.conditions.iter().map(|(c, _)| *c).collect() };
        BattleView {
            tag: self.tag.clone(),
            format: self.format.clone(),
            turn: self.turn,
            side,
            force_switch,
            active: Some(own.active().view()),
            opponent_active: Some(foe.active().public_view()),
            available_moves,
            available_switches: own
                .switch_targets()
                .into_iter()
                .map(|idx| own.team[idx].view())
                .collect(),
            weather: self.weather.map(|(w, _)| w),
            terrain: self.terrain.map(|(t, _)| t),
            side_conditions: conditions(own),
            opponent_side_conditions: conditions(foe),
        }
    }

    pub fn is_legal(&self, side: Side, choice: Choice) -> bool {
        self.requested(side) && self.view(side).is_legal(choice)
    }

    /// Advance the battle with the choices of the requested sides.
    ///
    /// Choices for sides that were not requested are ignored.
    pub fn step(&mut self, choice_a: Option<Choice>, choice_b: Option<Choice>) -> Result<(), BattleError> {
        if self.result.is_some() {
            return Err(BattleError::Finished);
        }
        let choices = [choice_a, choice_b];
        for side in Side::BOTH {
            if !self.requested(side) {
                continue;
            }
            let choice = choices[side.index()].ok_or(BattleError::MissingChoice(side))?;
            if !self.view(side).is_legal(choice) {
                return Err(BattleError::IllegalChoice { side, choice });
            }
        }

        if self.in_switch_phase() {
            for side in Side::BOTH {
                if let (true, Some(Choice::Switch(i))) = (self.needs_switch(side), choices[side.index()]) {
                    self.switch_to(side, i);
                }
            }
            return Ok(());
        }

        self.run_turn(choice_a, choice_b);
        Ok(())
    }

    fn switch_to(&mut self, side: Side, switch_index: usize) {
        let targets = self.side(side).switch_targets();
        if let Some(&team_idx) = targets.get(switch_index) {
            let state = self.side_mut(side);
            state.active = team_idx;
            self.log_switch_in(side);
        }
    }

    fn log_switch_in(&mut self, side: Side) {
        let active = self.side(side).active();
        let (name, hp, max_hp) = (active.name().to_string(), active.current_hp, active.max_hp());
        self.log.switch(side, &name, hp, max_hp);
    }

    fn effective_speed(&self, side: Side) -> u32 {
        let active = self.side(side).active();
        let speed = active.pokemon.stats.spe;
        if active.status == Some(StatusCondition::Paralysis) {
            speed / 2
        } else {
            speed
        }
    }

    fn resolve_move(&self, side: Side, move_index: usize) -> (Option<usize>, Move) {
        let slots = self.usable_slots(side);
        match slots.get(move_index) {
            Some(&slot) => (Some(slot), self.side(side).active().pokemon.moves[slot].clone()),
            None => (None, struggle()),
        }
    }

    fn run_turn(&mut self, choice_a: Option<Choice>, choice_b: Option<Choice>) {
        self.turn += 1;
        self.log.turn(self.turn);

        let choices = [choice_a, choice_b];
        for side in Side::BOTH {
            if let Some(Choice::Switch(i)) = choices[side.index()] {
                self.switch_to(side, i);
            }
        }

        let mut actions = Vec::new();
        for side in Side::BOTH {
            if let Some(Choice::Move(m)) = choices[side.index()] {
                let (_, mv) = self.resolve_move(side, m);
                actions.push(PlannedAction {
                    side,
                    move_index: m,
                    priority: mv.priority,
                    speed: self.effective_speed(side),
                    // Ref: pokemon-showdown/sim/battle.ts: priority, then speed, then a random tie-break.
                    tie_break: self.rng.gen(),
                    battler_slot: self.side(side).active,
                });
            }
        }
        actions.sort_by(|lhs, rhs| {
            rhs.priority
                .cmp(&lhs.priority)
                .then_with(|| rhs.speed.cmp(&lhs.speed))
                .then_with(|| lhs.tie_break.cmp(&rhs.tie_break))
        });

        for action in actions {
            if self.side(action.side).active != action.battler_slot {
                continue;
            }
            if self.side(action.side).active().is_fainted() {
                continue;
            }
            if self.side(action.side.opponent()).alive_count() == 0 {
                break;
            }
            self.execute_move(action.side, action.move_index);
        }

        self.end_of_turn();
        self.update_result();
    }

    fn can_act(&mut self, side: Side) -> bool {
        let name = self.side(side).active().name().to_string();
        let status = self.side(side).active().status;
        match status {
            Some(StatusCondition::Sleep) => {
                let active = self.side_mut(side).active_mut();
                if active.sleep_turns == 0 {
                    active.status = None;
                    self.log.cure(side, &name, StatusCondition::Sleep.code());
                    true
                } else {
                    active.sleep_turns -= 1;
                    self.log.cant(side, &name, "slp");
                    false
                }
            }
            // Ref: pokemon-showdown/data/conditions.ts: par has a 25% chance to skip the move.
            Some(StatusCondition::Paralysis) if self.rng.gen_bool(0.25) => {
                self.log.cant(side, &name, "par");
                false
            }
            _ => true,
        }
    }

    fn execute_move(&mut self, side: Side, move_index: usize) {
        if !self.can_act(side) {
            return;
        }
        let (slot, move_def) = self.resolve_move(side, move_index);
        if let Some(slot) = slot {
            let pp = &mut self.side_mut(side).active_mut().pp[slot];
            *pp = pp.saturating_sub(1);
        }

        let foe = side.opponent();
        let attacker_name = self.side(side).active().name().to_string();
        let defender_name = self.side(foe).active().name().to_string();
        let target = if move_def.is_damaging() || move_def.status.is_some() {
            ident(foe, &defender_name)
        } else {
            ident(side, &attacker_name)
        };
        self.log.action(side, &attacker_name, &move_def.name, &target);

        if !roll_accuracy(&move_def, &mut self.rng) {
            self.log.miss(side, &attacker_name);
            return;
        }

        if move_def.is_damaging() {
            self.apply_damaging_move(side, &move_def);
        } else {
            self.apply_status_move(side, &move_def);
        }
    }

    fn apply_damaging_move(&mut self, side: Side, move_def: &Move) {
        let foe = side.opponent();
        let attacker = self.side(side).active().clone();
        let defender = self.side(foe).active().clone();
        let multiplier = type_effectiveness(move_def.move_type, &defender.pokemon.types);
        self.log.effectiveness(foe, defender.name(), multiplier);
        if multiplier == 0.0 {
            return;
        }
        let screen = match move_def.category {
            MoveCategory::Physical => SideCondition::Reflect,
            _ => SideCondition::LightScreen,
        };
        let ctx = DamageContext {
            weather: self.weather.map(|(w, _)| w),
            terrain: self.terrain.map(|(t, _)| t),
            attacker_burned: attacker.status == Some(StatusCondition::Burn),
            screened: self.side(foe).has_condition(screen),
        };
        let damage = compute_damage(&attacker.pokemon, &defender.pokemon, move_def, &ctx, &mut self.rng);
        self.hurt(foe, damage);

        if move_def.id == STRUGGLE_ID {
            let recoil = (attacker.max_hp() / 4).max(1);
            self.hurt(side, recoil);
        }

        if let (Some(status), Some(chance)) = (move_def.status, move_def.status_chance) {
            if self.rng.gen_range(0.0..100.0) < chance {
                self.inflict(foe, status);
            }
        }
    }

    fn apply_status_move(&mut self, side: Side, move_def: &Move) {
        if let Some(status) = move_def.status {
            self.inflict(side.opponent(), status);
        }
        if let Some(weather) = move_def.set_weather {
            if self.weather.map(|(w, _)| w) != Some(weather) {
                self.weather = Some((weather, FIELD_TURNS));
                self.log.weather(weather.name());
            }
        }
        if let Some(terrain) = move_def.set_terrain {
            if self.terrain.map(|(t, _)| t) != Some(terrain) {
                self.terrain = Some((terrain, FIELD_TURNS));
                self.log.field_start(terrain.name());
            }
        }
        if let Some(condition) = move_def.side_condition {
            if !self.side(side).has_condition(condition) {
                self.side_mut(side).conditions.push((condition, FIELD_TURNS));
                self.log.side_start(side, condition.name());
            }
        }
    }

    fn hurt(&mut self, side: Side, amount: u32) {
        if amount == 0 {
            return;
        }
        let active = self.side_mut(side).active_mut();
        active.current_hp -= amount as i32;
        let (name, hp, max_hp, fainted) = (
            active.name().to_string(),
            active.current_hp,
            active.max_hp(),
            active.is_fainted(),
        );
        self.log.damage(side, &name, hp, max_hp);
        if fainted {
            self.log.faint(side, &name);
        }
    }

    fn inflict(&mut self, side: Side, status: StatusCondition) -> bool {
        if self.terrain.map(|(t, _)| t) == Some(Terrain::Misty) {
            return false;
        }
        let sleep_turns = self.rng.gen_range(1..=3);
        let active = self.side_mut(side).active_mut();
        if active.is_fainted()
            || active.status.is_some()
            || active.pokemon.types.iter().any(|t| status.blocked_by(*t))
        {
            return false;
        }
        active.status = Some(status);
        if status == StatusCondition::Sleep {
            active.sleep_turns = sleep_turns;
        }
        let name = active.name().to_string();
        self.log.status(side, &name, status.code());
        true
    }

    fn end_of_turn(&mut self) {
        let weather = self.weather.map(|(w, _)| w);
        for side in Side::BOTH {
            let active = self.side(side).active();
            if active.is_fainted() {
                continue;
            }
            let max_hp = active.max_hp();
            let residual = match active.status {
                Some(StatusCondition::Burn) => max_hp / 16,
                Some(StatusCondition::Poison) => max_hp / 8,
                _ => 0,
            };
            if residual > 0 {
                self.hurt(side, residual.max(1));
            }
            let sand_immune = [PokeType::Rock, PokeType::Ground, PokeType::Steel]
                .iter()
                .any(|t| self.side(side).active().pokemon.has_type(*t));
            if weather == Some(Weather::Sand) && !sand_immune && !self.side(side).active().is_fainted() {
                self.hurt(side, (max_hp / 16).max(1));
            }
            if self.terrain.map(|(t, _)| t) == Some(Terrain::Grassy) {
                let active = self.side_mut(side).active_mut();
                if !active.is_fainted() && (active.current_hp as u32) < max_hp {
                    active.current_hp = (active.current_hp + (max_hp / 16).max(1) as i32).min(max_hp as i32);
                }
            }
        }

        if let Some((w, turns)) = self.weather {
            self.weather = if turns <= 1 { None } else { Some((w, turns - 1)) };
            if self.weather.is_none() {
                self.log.weather("none");
            }
        }
        if let Some((t, turns)) = self.terrain {
            self.terrain = if turns <= 1 { None } else { Some((t, turns - 1)) };
            if self.terrain.is_none() {
                self.log.field_end(t.name());
            }
        }
        for side in Side::BOTH {
            let mut expired = Vec::new();
            let state = self.side_mut(side);
            state.conditions.retain_mut(|(condition, turns)| {
                *turns = turns.saturating_sub(1);
                if *turns == 0 {
                    expired.push(*condition);
                    false
                } else {
                    true
                }
            });
            for condition in expired {
                self.log.side_end(side, condition.name());
            }
        }
    }

    fn update_result(&mut self) {
        let a_alive = self.alive_count(Side::A);
        let b_alive = self.alive_count(Side::B);
        let result = match (a_alive, b_alive) {
            (0, 0) => Some(BattleResult::Tie),
            (0, _) => Some(BattleResult::BWins),
            (_, 0) => Some(BattleResult::AWins),
            _ if self.turn >= MAX_TURNS => Some(BattleResult::Tie),
            _ => None,
        };
        match result {
            Some(BattleResult::Tie) => self.log.tie(),
            Some(r) => {
                if let Some(winner) = r.winner() {
                    self.log.win(winner.slot());
                }
            }
            None => {}
        }
        self.result = result;
    }
}

pub const STRUGGLE_ID: &str = "struggle";

/// Used when the active creature has no PP left in any move.
pub fn struggle() -> Move {
    Move {
        id: STRUGGLE_ID.to_string(),
        name: "Struggle".to_string(),
        move_type: PokeType::Normal,
        category: MoveCategory::Physical,
        power: 50,
        accuracy: 0.0,
        priority: 0,
        pp: 1,
        status: None,
        status_chance: None,
        set_weather: None,
        set_terrain: None,
        side_condition: None,
    }
}

fn move_option(m: &Move, pp: u8) -> MoveOption {
    MoveOption {
        id: m.ident(),
        name: m.name.clone(),
        move_type: m.move_type,
        category: m.category,
        base_power: m.power,
        accuracy: m.accuracy,
        priority: m.priority,
        pp,
    }
}

fn roll_accuracy(move_def: &Move, rng: &mut SmallRng) -> bool {
    // Ref: pokemon-showdown/sim/battle-actions.ts: hitStepAccuracy uses randomChance(accuracy, 100).
    if move_def.accuracy <= 0.0 || move_def.accuracy >= 100.0 {
        return true;
    }
    let roll = rng.gen_range(0.0..100.0);
    roll < move_def.accuracy
}

pub fn sample_accuracy_hits(move_def: &Move, seed: u64, trials: usize) -> usize {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..trials).filter(|_| roll_accuracy(move_def, &mut rng)).count()
}

pub fn compute_damage(
    attacker: &Pokemon,
    defender: &Pokemon,
    move_def: &Move,
    ctx: &DamageContext,
    rng: &mut SmallRng,
) -> u32 {
    // Ref: pokemon-showdown/sim/battle-actions.ts: getDamage reduced to level, STAB, type, field and random factors.
    let (atk, def) = match move_def.category {
        MoveCategory::Physical => (attacker.stats.atk as f32, defender.stats.def as f32),
        MoveCategory::Special => (attacker.stats.spa as f32, defender.stats.spd as f32),
        MoveCategory::Status => return 0,
    };
    if move_def.power == 0 || def == 0.0 {
        return 0;
    }
    let type_mod = type_effectiveness(move_def.move_type, &defender.types);
    if type_mod == 0.0 {
        return 0;
    }
    let level = crate::dex::LEVEL as f32;
    let mut damage = (((2.0 * level / 5.0 + 2.0) * move_def.power as f32 * atk / def) / 50.0) + 2.0;
    if attacker.has_type(move_def.move_type) {
        damage *= 1.5;
    }
    damage *= type_mod;
    damage *= match (ctx.weather, move_def.move_type) {
        (Some(Weather::Sun), PokeType::Fire) | (Some(Weather::Rain), PokeType::Water) => 1.5,
        (Some(Weather::Sun), PokeType::Water) | (Some(Weather::Rain), PokeType::Fire) => 0.5,
        _ => 1.0,
    };
    if ctx.terrain.map(|t| t.boosted_type()) == Some(move_def.move_type) {
        damage *= 1.3;
    }
    if ctx.attacker_burned && move_def.category == MoveCategory::Physical {
        damage *= 0.5;
    }
    if ctx.screened {
        damage *= 0.5;
    }
    let rand_mod = (rng.gen_range(85..=100) as f32) / 100.0;
    damage *= rand_mod;
    damage.floor().max(1.0) as u32
}

/// Damage on a neutral field with a fixed random roll seed.
pub fn compute_damage_preview(attacker: &Pokemon, defender: &Pokemon, move_def: &Move, seed: u64) -> u32 {
    let mut rng = SmallRng::seed_from_u64(seed);
    compute_damage(attacker, defender, move_def, &DamageContext::default(), &mut rng)
}
