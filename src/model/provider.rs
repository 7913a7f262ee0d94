use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    Discord,
    Spotify,
    LastFm,
}

impl Provider {
    /// Providers a user can link to and unlink from their account, in
    /// the order the dashboard lists them.
    pub const LINKABLE: [Provider; 2] = [Provider::Spotify, Provider::LastFm];

    /// Identifier used in the database and in URLs.
    pub fn slug(self) -> &'static str {
        match self {
            Provider::Discord => "discord",
            Provider::Spotify => "spotify",
            Provider::LastFm => "lastfm",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Provider::Discord => "Discord",
            Provider::Spotify => "Spotify",
            Provider::LastFm => "Last.fm",
        }
    }

    pub fn is_linkable(self) -> bool {
        Self::LINKABLE.contains(&self)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown service {:?}", self.0)
    }
}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "discord" => Ok(Provider::Discord),
            "spotify" => Ok(Provider::Spotify),
            "lastfm" => Ok(Provider::LastFm),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}
