//! Join links - shareable URLs pointing at a match, a slot, or an invitation

use std::fmt::Write as _;

use rand::Rng;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Length of generated opaque tokens
pub const DEFAULT_TOKEN_LENGTH: usize = 12;

// Excludes the look-alikes 0, 1, I, O and l
const TOKEN_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Kind of resource a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkResource {
    Match,
    Player,
    Turn,
    User,
    Ranking,
    Comment,
}

impl LinkResource {
    /// Path segment for this resource
    pub fn path(self) -> &'static str {
        match self {
            Self::Match => "m",
            Self::Player => "j",
            Self::Turn => "t",
            Self::User => "u",
            Self::Ranking => "ranking",
            Self::Comment => "c",
        }
    }
}

/// Builds absolute links against a configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// Create a builder. A base without scheme gets `https://`; a blank one
    /// falls back to [`DEFAULT_BASE_URL`].
    pub fn new(base_url: Option<&str>) -> Self {
        let raw = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);

        let mut base_url = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `<base>/<resource>/<id>` with optional query parameters.
    /// Parameters without a value are skipped.
    pub fn resolve(&self, resource: LinkResource, id: &str, params: &[(&str, Option<&str>)]) -> String {
        let mut url = format!(
            "{}{}/{}",
            self.base_url,
            resource.path(),
            percent_encode(id)
        );

        let mut first = true;
        for (key, value) in params {
            let Some(value) = value else { continue };
            url.push(if first { '?' } else { '&' });
            first = false;
            let _ = write!(url, "{}={}", percent_encode(key), percent_encode(value));
        }

        url
    }

    /// Canonical share link of a match
    pub fn match_link(&self, match_id: &str) -> String {
        self.resolve(LinkResource::Match, match_id, &[])
    }

    /// Direct link to claim one slot
    pub fn player_link(&self, player_id: &str) -> String {
        self.resolve(LinkResource::Player, player_id, &[])
    }

    /// Match link carrying an invitation token
    pub fn invitation_link(&self, match_id: &str, token: &str) -> String {
        self.resolve(LinkResource::Match, match_id, &[("token", Some(token))])
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new(None)
    }
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

/// Generate a random opaque token of [`DEFAULT_TOKEN_LENGTH`] characters
pub fn generate_token() -> String {
    generate_token_with_len(DEFAULT_TOKEN_LENGTH)
}

/// Generate a random opaque token of the given length
pub fn generate_token_with_len(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())]))
        .collect()
}
