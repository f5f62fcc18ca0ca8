//! Static species and move tables used to build random teams.
//!
//! Numbers follow the gen 9 dex; only the fields the simulator models are kept.

use crate::error::BattleError;
use crate::model::{to_id, Move, MoveCategory, Pokemon, SideCondition, Stats, StatusCondition, Terrain, Weather};
use crate::types::PokeType;
use crate::types::PokeType::*;
use phf::phf_map;

pub const LEVEL: u32 = 50;

#[derive(Debug)]
pub struct SpeciesData {
    pub name: &'static str,
    pub types: &'static [PokeType],
    /// hp, atk, def, spa, spd, spe
    pub base: [u32; 6],
    pub movepool: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub enum MoveEffect {
    None,
    /// Status inflicted on the target with the given percent chance (100 = guaranteed).
    Status(StatusCondition, f32),
    Weather(Weather),
    Terrain(Terrain),
    Screen(SideCondition),
}

#[derive(Debug)]
pub struct MoveData {
    pub name: &'static str,
    pub move_type: PokeType,
    pub category: MoveCategory,
    pub power: u32,
    /// Percent; 0 never misses.
    pub accuracy: f32,
    pub priority: i32,
    pub pp: u8,
    pub effect: MoveEffect,
}

const fn mv(
    name: &'static str,
    move_type: PokeType,
    category: MoveCategory,
    power: u32,
    accuracy: f32,
    pp: u8,
) -> MoveData {
    MoveData {
        name,
        move_type,
        category,
        power,
        accuracy,
        priority: 0,
        pp,
        effect: MoveEffect::None,
    }
}

const fn with_priority(mut data: MoveData, priority: i32) -> MoveData {
    data.priority = priority;
    data
}

const fn with_effect(mut data: MoveData, effect: MoveEffect) -> MoveData {
    data.effect = effect;
    data
}

use MoveCategory::{Physical, Special, Status};

pub static MOVES: phf::Map<&'static str, MoveData> = phf_map! {
    "flamethrower" => with_effect(mv("Flamethrower", Fire, Special, 90, 100.0, 15), MoveEffect::Status(StatusCondition::Burn, 10.0)),
    "fireblast" => with_effect(mv("Fire Blast", Fire, Special, 110, 85.0, 5), MoveEffect::Status(StatusCondition::Burn, 10.0)),
    "flareblitz" => with_effect(mv("Flare Blitz", Fire, Physical, 120, 100.0, 15), MoveEffect::Status(StatusCondition::Burn, 10.0)),
    "willowisp" => with_effect(mv("Will-O-Wisp", Fire, Status, 0, 85.0, 15), MoveEffect::Status(StatusCondition::Burn, 100.0)),
    "sunnyday" => with_effect(mv("Sunny Day", Fire, Status, 0, 0.0, 5), MoveEffect::Weather(Weather::Sun)),
    "surf" => mv("Surf", Water, Special, 90, 100.0, 15),
    "hydropump" => mv("Hydro Pump", Water, Special, 110, 80.0, 5),
    "waterfall" => mv("Waterfall", Water, Physical, 80, 100.0, 15),
    "raindance" => with_effect(mv("Rain Dance", Water, Status, 0, 0.0, 5), MoveEffect::Weather(Weather::Rain)),
    "thunderbolt" => with_effect(mv("Thunderbolt", Electric, Special, 90, 100.0, 15), MoveEffect::Status(StatusCondition::Paralysis, 10.0)),
    "thunder" => with_effect(mv("Thunder", Electric, Special, 110, 70.0, 10), MoveEffect::Status(StatusCondition::Paralysis, 30.0)),
    "thunderwave" => with_effect(mv("Thunder Wave", Electric, Status, 0, 90.0, 20), MoveEffect::Status(StatusCondition::Paralysis, 100.0)),
    "voltswitch" => mv("Volt Switch", Electric, Special, 70, 100.0, 20),
    "electricterrain" => with_effect(mv("Electric Terrain", Electric, Status, 0, 0.0, 10), MoveEffect::Terrain(Terrain::Electric)),
    "energyball" => mv("Energy Ball", Grass, Special, 90, 100.0, 10),
    "gigadrain" => mv("Giga Drain", Grass, Special, 75, 100.0, 10),
    "leafblade" => mv("Leaf Blade", Grass, Physical, 90, 100.0, 15),
    "powerwhip" => mv("Power Whip", Grass, Physical, 120, 85.0, 10),
    "spore" => with_effect(mv("Spore", Grass, Status, 0, 100.0, 15), MoveEffect::Status(StatusCondition::Sleep, 100.0)),
    "grassyterrain" => with_effect(mv("Grassy Terrain", Grass, Status, 0, 0.0, 10), MoveEffect::Terrain(Terrain::Grassy)),
    "icebeam" => mv("Ice Beam", Ice, Special, 90, 100.0, 10),
    "iceshard" => with_priority(mv("Ice Shard", Ice, Physical, 40, 100.0, 30), 1),
    "iciclecrash" => mv("Icicle Crash", Ice, Physical, 85, 90.0, 10),
    "closecombat" => mv("Close Combat", Fighting, Physical, 120, 100.0, 5),
    "aurasphere" => mv("Aura Sphere", Fighting, Special, 80, 0.0, 20),
    "sludgebomb" => with_effect(mv("Sludge Bomb", Poison, Special, 90, 100.0, 10), MoveEffect::Status(StatusCondition::Poison, 30.0)),
    "poisonpowder" => with_effect(mv("Poison Powder", Poison, Status, 0, 75.0, 35), MoveEffect::Status(StatusCondition::Poison, 100.0)),
    "earthquake" => mv("Earthquake", Ground, Physical, 100, 100.0, 10),
    "earthpower" => mv("Earth Power", Ground, Special, 90, 100.0, 10),
    "bravebird" => mv("Brave Bird", Flying, Physical, 120, 100.0, 15),
    "airslash" => mv("Air Slash", Flying, Special, 75, 95.0, 15),
    "aerialace" => mv("Aerial Ace", Flying, Physical, 60, 0.0, 20),
    "psychic" => mv("Psychic", Psychic, Special, 90, 100.0, 10),
    "psyshock" => mv("Psyshock", Psychic, Special, 80, 100.0, 10),
    "psychicterrain" => with_effect(mv("Psychic Terrain", Psychic, Status, 0, 0.0, 10), MoveEffect::Terrain(Terrain::Psychic)),
    "reflect" => with_effect(mv("Reflect", Psychic, Status, 0, 0.0, 20), MoveEffect::Screen(SideCondition::Reflect)),
    "lightscreen" => with_effect(mv("Light Screen", Psychic, Status, 0, 0.0, 30), MoveEffect::Screen(SideCondition::LightScreen)),
    "uturn" => mv("U-turn", Bug, Physical, 70, 100.0, 20),
    "bugbuzz" => mv("Bug Buzz", Bug, Special, 90, 100.0, 10),
    "stoneedge" => mv("Stone Edge", Rock, Physical, 100, 80.0, 5),
    "rockslide" => mv("Rock Slide", Rock, Physical, 75, 90.0, 10),
    "shadowball" => mv("Shadow Ball", Ghost, Special, 80, 100.0, 15),
    "shadowsneak" => with_priority(mv("Shadow Sneak", Ghost, Physical, 40, 100.0, 30), 1),
    "dracometeor" => mv("Draco Meteor", Dragon, Special, 130, 90.0, 5),
    "dragonclaw" => mv("Dragon Claw", Dragon, Physical, 80, 100.0, 15),
    "darkpulse" => mv("Dark Pulse", Dark, Special, 80, 100.0, 15),
    "knockoff" => mv("Knock Off", Dark, Physical, 65, 100.0, 20),
    "suckerpunch" => with_priority(mv("Sucker Punch", Dark, Physical, 70, 100.0, 5), 1),
    "ironhead" => mv("Iron Head", Steel, Physical, 80, 100.0, 15),
    "flashcannon" => mv("Flash Cannon", Steel, Special, 80, 100.0, 10),
    "moonblast" => mv("Moonblast", Fairy, Special, 95, 100.0, 15),
    "playrough" => mv("Play Rough", Fairy, Physical, 90, 90.0, 10),
    "mistyterrain" => with_effect(mv("Misty Terrain", Fairy, Status, 0, 0.0, 10), MoveEffect::Terrain(Terrain::Misty)),
    "bodyslam" => with_effect(mv("Body Slam", Normal, Physical, 85, 100.0, 15), MoveEffect::Status(StatusCondition::Paralysis, 30.0)),
    "extremespeed" => with_priority(mv("Extreme Speed", Normal, Physical, 80, 100.0, 5), 2),
    "hypervoice" => mv("Hyper Voice", Normal, Special, 90, 100.0, 10),
    "sandstorm" => with_effect(mv("Sandstorm", Rock, Status, 0, 0.0, 10), MoveEffect::Weather(Weather::Sand)),
    "snowscape" => with_effect(mv("Snowscape", Ice, Status, 0, 0.0, 10), MoveEffect::Weather(Weather::Snow)),
};

pub static SPECIES: phf::Map<&'static str, SpeciesData> = phf_map! {
    "charizard" => SpeciesData { name: "Charizard", types: &[Fire, Flying], base: [78, 84, 78, 109, 85, 100], movepool: &["flamethrower", "airslash", "dragonclaw", "sunnyday", "willowisp", "earthquake"] },
    "blastoise" => SpeciesData { name: "Blastoise", types: &[Water], base: [79, 83, 100, 85, 105, 78], movepool: &["surf", "hydropump", "icebeam", "raindance", "darkpulse", "flashcannon"] },
    "venusaur" => SpeciesData { name: "Venusaur", types: &[Grass, Poison], base: [80, 82, 83, 100, 100, 80], movepool: &["gigadrain", "energyball", "sludgebomb", "earthquake", "poisonpowder", "grassyterrain"] },
    "jolteon" => SpeciesData { name: "Jolteon", types: &[Electric], base: [65, 65, 60, 110, 95, 130], movepool: &["thunderbolt", "voltswitch", "shadowball", "thunderwave", "electricterrain", "thunder"] },
    "gengar" => SpeciesData { name: "Gengar", types: &[Ghost, Poison], base: [60, 65, 60, 130, 75, 110], movepool: &["shadowball", "sludgebomb", "thunderbolt", "darkpulse", "willowisp", "psychic"] },
    "garchomp" => SpeciesData { name: "Garchomp", types: &[Dragon, Ground], base: [108, 130, 95, 80, 85, 102], movepool: &["earthquake", "dragonclaw", "stoneedge", "ironhead", "flamethrower", "sandstorm"] },
    "tyranitar" => SpeciesData { name: "Tyranitar", types: &[Rock, Dark], base: [100, 134, 110, 95, 100, 61], movepool: &["stoneedge", "knockoff", "earthquake", "icebeam", "rockslide", "sandstorm"] },
    "scizor" => SpeciesData { name: "Scizor", types: &[Bug, Steel], base: [70, 130, 100, 55, 80, 65], movepool: &["uturn", "ironhead", "knockoff", "closecombat", "aerialace"] },
    "gardevoir" => SpeciesData { name: "Gardevoir", types: &[Psychic, Fairy], base: [68, 65, 65, 125, 115, 80], movepool: &["moonblast", "psychic", "thunderbolt", "psychicterrain", "shadowball", "mistyterrain"] },
    "lucario" => SpeciesData { name: "Lucario", types: &[Fighting, Steel], base: [70, 110, 70, 115, 70, 90], movepool: &["aurasphere", "flashcannon", "closecombat", "extremespeed", "darkpulse"] },
    "gyarados" => SpeciesData { name: "Gyarados", types: &[Water, Flying], base: [95, 125, 79, 60, 100, 81], movepool: &["waterfall", "earthquake", "stoneedge", "bodyslam", "raindance"] },
    "snorlax" => SpeciesData { name: "Snorlax", types: &[Normal], base: [160, 110, 65, 65, 110, 30], movepool: &["bodyslam", "earthquake", "knockoff", "hypervoice", "rockslide"] },
    "dragonite" => SpeciesData { name: "Dragonite", types: &[Dragon, Flying], base: [91, 134, 95, 100, 100, 80], movepool: &["extremespeed", "dragonclaw", "earthquake", "bravebird", "ironhead", "fireblast"] },
    "weavile" => SpeciesData { name: "Weavile", types: &[Dark, Ice], base: [70, 120, 65, 45, 85, 125], movepool: &["knockoff", "iceshard", "suckerpunch", "iciclecrash", "aerialace"] },
    "alakazam" => SpeciesData { name: "Alakazam", types: &[Psychic], base: [55, 50, 45, 135, 95, 120], movepool: &["psychic", "psyshock", "shadowball", "energyball", "reflect", "lightscreen"] },
    "breloom" => SpeciesData { name: "Breloom", types: &[Grass, Fighting], base: [60, 130, 80, 60, 60, 70], movepool: &["spore", "closecombat", "leafblade", "stoneedge", "suckerpunch"] },
    "togekiss" => SpeciesData { name: "Togekiss", types: &[Fairy, Flying], base: [85, 50, 95, 120, 115, 80], movepool: &["airslash", "moonblast", "flamethrower", "aurasphere", "thunderwave"] },
    "mamoswine" => SpeciesData { name: "Mamoswine", types: &[Ice, Ground], base: [110, 130, 80, 70, 60, 80], movepool: &["earthquake", "iceshard", "iciclecrash", "stoneedge", "knockoff", "snowscape"] },
    "volcarona" => SpeciesData { name: "Volcarona", types: &[Bug, Fire], base: [85, 60, 65, 135, 105, 100], movepool: &["bugbuzz", "fireblast", "flamethrower", "gigadrain", "sunnyday", "psychic"] },
    "ferrothorn" => SpeciesData { name: "Ferrothorn", types: &[Grass, Steel], base: [74, 94, 131, 54, 116, 20], movepool: &["powerwhip", "ironhead", "knockoff", "thunderwave", "gigadrain"] },
    "clefable" => SpeciesData { name: "Clefable", types: &[Fairy], base: [95, 70, 73, 95, 90, 60], movepool: &["moonblast", "flamethrower", "thunderwave", "reflect", "lightscreen", "icebeam"] },
    "azumarill" => SpeciesData { name: "Azumarill", types: &[Water, Fairy], base: [100, 50, 80, 60, 80, 50], movepool: &["playrough", "waterfall", "knockoff", "iceshard", "bodyslam"] },
    "hydreigon" => SpeciesData { name: "Hydreigon", types: &[Dark, Dragon], base: [92, 105, 90, 125, 90, 98], movepool: &["darkpulse", "dracometeor", "flamethrower", "earthpower", "uturn"] },
    "excadrill" => SpeciesData { name: "Excadrill", types: &[Ground, Steel], base: [110, 135, 60, 50, 65, 88], movepool: &["earthquake", "ironhead", "rockslide", "aerialace", "sandstorm"] },
    "starmie" => SpeciesData { name: "Starmie", types: &[Water, Psychic], base: [60, 75, 85, 100, 85, 115], movepool: &["surf", "psyshock", "icebeam", "thunderbolt", "lightscreen"] },
    "pelipper" => SpeciesData { name: "Pelipper", types: &[Water, Flying], base: [60, 50, 100, 95, 70, 65], movepool: &["surf", "hydropump", "airslash", "raindance", "uturn"] },
};

pub fn species(id: &str) -> Option<&'static SpeciesData> {
    SPECIES.get(to_id(id).as_str())
}

pub fn move_data(id: &str) -> Option<&'static MoveData> {
    MOVES.get(to_id(id).as_str())
}

/// Species ids in a stable order, independent of the hash layout.
pub fn species_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = SPECIES.keys().copied().collect();
    ids.sort_unstable();
    ids
}

pub fn build_move(id: &str) -> Result<Move, BattleError> {
    let key = to_id(id);
    let data = MOVES
        .get(key.as_str())
        .ok_or_else(|| BattleError::UnknownMove(id.to_string()))?;
    let (status, status_chance) = match data.effect {
        MoveEffect::Status(status, chance) if chance >= 100.0 => (Some(status), None),
        MoveEffect::Status(status, chance) => (Some(status), Some(chance)),
        _ => (None, None),
    };
    Ok(Move {
        id: key,
        name: data.name.to_string(),
        move_type: data.move_type,
        category: data.category,
        power: data.power,
        accuracy: data.accuracy,
        priority: data.priority,
        pp: data.pp,
        status,
        status_chance,
        set_weather: match data.effect {
            MoveEffect::Weather(w) => Some(w),
            _ => None,
        },
        set_terrain: match data.effect {
            MoveEffect::Terrain(t) => Some(t),
            _ => None,
        },
        side_condition: match data.effect {
            MoveEffect::Screen(s) => Some(s),
            _ => None,
        },
    })
}

/// Level-50 stats with perfect IVs and no EVs.
// Ref: pokemon-showdown/sim/dex.ts: spreadModify
pub fn level_stats(base: [u32; 6]) -> Stats {
    let other = |b: u32| (2 * b + 31) * LEVEL / 100 + 5;
    Stats {
        hp: (2 * base[0] + 31) * LEVEL / 100 + LEVEL + 10,
        atk: other(base[1]),
        def: other(base[2]),
        spa: other(base[3]),
        spd: other(base[4]),
        spe: other(base[5]),
    }
}

pub fn build_pokemon(species_id: &str, move_ids: &[&str]) -> Result<Pokemon, BattleError> {
    let data = species(species_id).ok_or_else(|| BattleError::UnknownSpecies(species_id.to_string()))?;
    let moves = move_ids
        .iter()
        .map(|id| build_move(id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Pokemon {
        name: data.name.to_string(),
        types: data.types.to_vec(),
        stats: level_stats(data.base),
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_movepool_entry_exists() {
        for (id, data) in SPECIES.entries() {
            assert!(data.movepool.len() >= 4, "{id} needs at least four moves");
            for m in data.movepool {
                assert!(MOVES.contains_key(m), "{id} references unknown move {m}");
            }
        }
    }

    #[test]
    fn level_fifty_stats() {
        let stats = level_stats([100, 100, 100, 100, 100, 100]);
        assert_eq!(stats.hp, 175);
        assert_eq!(stats.atk, 120);
    }

    #[test]
    fn lookups_normalize_names() {
        assert!(species("Garchomp").is_some());
        assert_eq!(build_move("Will-O-Wisp").unwrap().id, "willowisp");
        assert!(matches!(build_move("splash"), Err(BattleError::UnknownMove(_))));
    }
}
