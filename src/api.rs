//! Remote catalog gateway: typed fetches against the PokéAPI endpoints the
//! tracker consumes. Responses are mapped into app types here; memoization
//! lives in the `AppState` caches so a failed fetch is never remembered.

use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

use crate::state::{
    DexEntry, EncounterLocation, EncounterSlot, EncounterVersionDetail, EntryDetail, SpeciesInfo,
};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed payload: {0}")]
    Parse(String),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct IndexResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct DetailResponse {
    id: u16,
    name: String,
    types: Vec<TypeSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    generation: Option<NamedResource>,
    #[serde(default)]
    genera: Vec<GenusEntry>,
    #[serde(default)]
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct GenusEntry {
    genus: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct EncounterLocationResponse {
    location_area: NamedResource,
    #[serde(default)]
    version_details: Vec<EncounterVersionResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct EncounterVersionResponse {
    version: NamedResource,
    #[serde(default)]
    encounter_details: Vec<EncounterSlotResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct EncounterSlotResponse {
    method: NamedResource,
    #[serde(default)]
    min_level: Option<u32>,
    #[serde(default)]
    max_level: Option<u32>,
    #[serde(default)]
    chance: Option<u32>,
}

/// Catalog index: ids are assigned as 1-based positions in the list.
pub async fn fetch_index(limit: u16) -> Result<Vec<DexEntry>, FetchError> {
    let url = format!("{API_BASE}/pokemon?limit={limit}&offset=0");
    let response: IndexResponse = fetch_json(&url).await?;
    Ok(response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, resource)| DexEntry {
            id: index as u16 + 1,
            name: resource.name,
        })
        .collect())
}

pub async fn fetch_detail(id: u16) -> Result<EntryDetail, FetchError> {
    let url = format!("{API_BASE}/pokemon/{id}");
    let response: DetailResponse = fetch_json(&url).await?;
    Ok(EntryDetail {
        id: response.id,
        name: response.name,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
    })
}

pub async fn fetch_species(id: u16) -> Result<SpeciesInfo, FetchError> {
    let url = format!("{API_BASE}/pokemon-species/{id}");
    let response: SpeciesResponse = fetch_json(&url).await?;
    Ok(SpeciesInfo {
        generation: response.generation.map(|generation| generation.name),
        genus: english_genus(&response.genera),
        flavor_text: pick_flavor(&response.flavor_text_entries),
    })
}

pub async fn fetch_encounters(id: u16) -> Result<Vec<EncounterLocation>, FetchError> {
    let url = format!("{API_BASE}/pokemon/{id}/encounters");
    let response: Vec<EncounterLocationResponse> = fetch_json(&url).await?;
    Ok(response
        .into_iter()
        .map(|location| EncounterLocation {
            area: location.location_area.name,
            version_details: location
                .version_details
                .into_iter()
                .map(|version| EncounterVersionDetail {
                    version: version.version.name,
                    encounters: version
                        .encounter_details
                        .into_iter()
                        .map(|slot| EncounterSlot {
                            method: slot.method.name,
                            min_level: slot.min_level,
                            max_level: slot.max_level,
                            chance: slot.chance,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect())
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    let response = checked(url).await?;
    Ok(response
        .bytes()
        .await
        .map_err(|error| FetchError::Transport(error.to_string()))?
        .to_vec())
}

/// Deterministic sprite URL for an entry id.
pub fn sprite_url(id: u16) -> String {
    format!("{SPRITE_BASE}/{id}.png")
}

/// First English genus, if any.
fn english_genus(genera: &[GenusEntry]) -> Option<String> {
    genera
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| entry.genus.clone())
}

/// Display flavor text: the last English entry (later game entries override
/// earlier ones), falling back to the first entry of any language.
fn pick_flavor(entries: &[FlavorTextEntry]) -> Option<String> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.language.name == "en")
        .or_else(|| entries.first())
        .map(|entry| sanitize_flavor(&entry.flavor_text))
}

/// Collapse form feeds, newlines, and other whitespace runs to single spaces.
fn sanitize_flavor(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = checked(url).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|error| FetchError::Transport(error.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|error| FetchError::Parse(error.to_string()))
}

async fn checked(url: &str) -> Result<reqwest::Response, FetchError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|error| FetchError::Transport(error.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        });
    }
    Ok(response)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flavor(language: &str, text: &str) -> FlavorTextEntry {
        FlavorTextEntry {
            flavor_text: text.to_string(),
            language: NamedResource {
                name: language.to_string(),
            },
        }
    }

    fn genus(language: &str, text: &str) -> GenusEntry {
        GenusEntry {
            genus: text.to_string(),
            language: NamedResource {
                name: language.to_string(),
            },
        }
    }

    #[test]
    fn flavor_prefers_english_and_collapses_form_feeds() {
        let entries = vec![flavor("en", "A.\u{000C}B."), flavor("fr", "C.")];
        assert_eq!(pick_flavor(&entries).as_deref(), Some("A. B."));
    }

    #[test]
    fn flavor_takes_the_last_english_entry() {
        let entries = vec![
            flavor("en", "Old text."),
            flavor("de", "Alter Text."),
            flavor("en", "New\ntext."),
        ];
        assert_eq!(pick_flavor(&entries).as_deref(), Some("New text."));
    }

    #[test]
    fn flavor_falls_back_to_the_first_entry_of_any_language() {
        let entries = vec![flavor("ja", "テキスト"), flavor("fr", "Texte.")];
        assert_eq!(pick_flavor(&entries).as_deref(), Some("テキスト"));
        assert_eq!(pick_flavor(&[]), None);
    }

    #[test]
    fn sanitize_collapses_whitespace_runs_and_trims() {
        assert_eq!(sanitize_flavor("  a \u{000C}\n  b  "), "a b");
    }

    #[test]
    fn genus_is_the_first_english_entry_or_none() {
        let genera = vec![
            genus("ja", "たねポケモン"),
            genus("en", "Seed Pokémon"),
            genus("en", "Other"),
        ];
        assert_eq!(english_genus(&genera).as_deref(), Some("Seed Pokémon"));
        assert_eq!(english_genus(&[genus("ja", "たねポケモン")]), None);
    }

    #[test]
    fn sprite_url_is_templated_by_id() {
        assert_eq!(
            sprite_url(25),
            "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png"
        );
    }
}
