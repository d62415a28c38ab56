//! PokeAPI client
//!
//! Builds one `CreatureRecord` from two sequential requests keyed by the
//! same identifier: the core record (`/pokemon/{id}`) for stats, sizes, and
//! the sprite, then the species record (`/pokemon-species/{id}`) for the
//! localized names, habitat, color, and generation.

use super::{cry_url, CreatureSource};
use crate::data::{CreatureRecord, StatSet};
use crate::QuizError;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking PokeAPI client
pub struct PokeApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new() -> crate::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom endpoint, for tests and mirrors.
    pub fn with_base_url(base_url: &str) -> crate::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("poke-quizz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, id: u32) -> Result<T, QuizError> {
        let url = format!("{}/{}/{}", self.base_url, path, id);
        tracing::debug!(%url, "fetching");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| QuizError::Network {
                id,
                message: e.to_string(),
            })?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(QuizError::NotFound(id));
        }
        if !response.status().is_success() {
            return Err(QuizError::Network {
                id,
                message: format!("unexpected status {}", response.status()),
            });
        }
        response.json().map_err(|e| QuizError::MalformedPayload {
            id,
            message: e.to_string(),
        })
    }
}

impl CreatureSource for PokeApiClient {
    fn fetch_creature(&self, id: u32) -> Result<CreatureRecord, QuizError> {
        let pokemon: PokemonPayload = self.get_json("pokemon", id)?;
        let species: SpeciesPayload = self.get_json("pokemon-species", id)?;
        let record = build_record(id, pokemon, species);
        tracing::info!(id, name = %record.name_en, "creature fetched");
        Ok(record)
    }
}

// --- wire payloads ----------------------------------------------------------

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PokemonPayload {
    name: String,
    height: Option<u32>,
    weight: Option<u32>,
    #[serde(default)]
    sprites: Sprites,
    #[serde(default)]
    stats: Vec<StatSlot>,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct SpeciesPayload {
    #[serde(default)]
    names: Vec<LocalizedName>,
    habitat: Option<NamedResource>,
    color: Option<NamedResource>,
    generation: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct LocalizedName {
    name: String,
    language: NamedResource,
}

fn localized_name(species: &SpeciesPayload, language: &str) -> Option<String> {
    species
        .names
        .iter()
        .find(|n| n.language.name == language)
        .map(|n| n.name.clone())
}

fn build_record(id: u32, pokemon: PokemonPayload, species: SpeciesPayload) -> CreatureRecord {
    let mut stats = StatSet::default();
    for slot in &pokemon.stats {
        let value = Some(slot.base_stat);
        match slot.stat.name.as_str() {
            "hp" => stats.hp = value,
            "attack" => stats.attack = value,
            "special-attack" => stats.special_attack = value,
            "defense" => stats.defense = value,
            "special-defense" => stats.special_defense = value,
            "speed" => stats.speed = value,
            _ => {}
        }
    }

    // The species name list is authoritative; the slug on the core record
    // is the fallback for both languages.
    let name_en = localized_name(&species, "en").unwrap_or_else(|| pokemon.name.clone());
    let name_fr = localized_name(&species, "fr").unwrap_or_else(|| pokemon.name.clone());

    CreatureRecord {
        id,
        name_en,
        name_fr,
        sprite_url: pokemon.sprites.front_default,
        cry_url: cry_url(id),
        stats,
        height: pokemon.height,
        weight: pokemon.weight,
        habitat: species.habitat.map(|h| h.name),
        color: species.color.map(|c| c.name),
        generation: species.generation.map(|g| g.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pokemon() -> PokemonPayload {
        serde_json::from_str(
            r#"{
                "name": "pikachu",
                "height": 4,
                "weight": 60,
                "sprites": { "front_default": "https://img.test/25.png" },
                "stats": [
                    { "base_stat": 35, "stat": { "name": "hp" } },
                    { "base_stat": 55, "stat": { "name": "attack" } },
                    { "base_stat": 90, "stat": { "name": "speed" } },
                    { "base_stat": 40, "stat": { "name": "accuracy" } }
                ]
            }"#,
        )
        .unwrap()
    }

    fn sample_species() -> SpeciesPayload {
        serde_json::from_str(
            r#"{
                "names": [
                    { "name": "Pikachu", "language": { "name": "en" } },
                    { "name": "Pikachu", "language": { "name": "fr" } },
                    { "name": "ピカチュウ", "language": { "name": "ja" } }
                ],
                "habitat": { "name": "forest" },
                "color": { "name": "yellow" },
                "generation": { "name": "generation-i" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn record_assembles_from_both_payloads() {
        let record = build_record(25, sample_pokemon(), sample_species());
        assert_eq!(record.id, 25);
        assert_eq!(record.name_en, "Pikachu");
        assert_eq!(record.name_fr, "Pikachu");
        assert_eq!(record.sprite_url.as_deref(), Some("https://img.test/25.png"));
        assert_eq!(record.cry_url, "https://pokemoncries.com/cries/25.mp3");
        assert_eq!(record.stats.hp, Some(35));
        assert_eq!(record.stats.speed, Some(90));
        assert_eq!(record.stats.defense, None);
        assert_eq!(record.habitat.as_deref(), Some("forest"));
    }

    #[test]
    fn unknown_stat_slugs_are_ignored() {
        let record = build_record(25, sample_pokemon(), sample_species());
        // "accuracy" above maps to nothing and must not panic or misfile.
        assert_eq!(record.stats.special_attack, None);
    }

    #[test]
    fn missing_localized_names_fall_back_to_the_slug() {
        let species: SpeciesPayload = serde_json::from_str(r#"{ "names": [] }"#).unwrap();
        let record = build_record(25, sample_pokemon(), species);
        assert_eq!(record.name_en, "pikachu");
        assert_eq!(record.name_fr, "pikachu");
        assert_eq!(record.habitat, None);
        assert_eq!(record.generation, None);
    }
}
