/// Upstream catalog constants shared by the client, config defaults and CLI.

// Catalog service
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const POKEMON_COLLECTION: &str = "pokemon";

// Listing defaults
pub const DEFAULT_LIMIT: u32 = 20;
pub const DEFAULT_OFFSET: u32 = 0;

// Sprites live outside the API host; `{id}` is replaced with the numeric id.
pub const SPRITE_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png";

// HTTP client
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const USER_AGENT: &str = concat!("dex_catalog/", env!("CARGO_PKG_VERSION"));

// Card assembly
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 4;

/// Build the thumbnail URL for a numeric id.
pub fn sprite_url(id: u32) -> String {
    SPRITE_URL_TEMPLATE.replace("{id}", &id.to_string())
}
