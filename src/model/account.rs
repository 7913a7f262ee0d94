use super::{Database, Provider, UserId};

/// Whether a user has connected a given provider.
///
/// The linked account name only exists in the `Linked` case, so a link can
/// never claim to be active without a name to show.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ProviderLink {
    #[default]
    Unlinked,
    Linked {
        username: String,
    },
}

impl ProviderLink {
    pub fn linked(username: impl Into<String>) -> ProviderLink {
        ProviderLink::Linked {
            username: username.into(),
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self, ProviderLink::Linked { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            ProviderLink::Linked { username } => Some(username),
            ProviderLink::Unlinked => None,
        }
    }
}

/// Everything the dashboard shows about one signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub user_id: UserId,
    /// Discord display name of the signed-in user.
    pub display_name: String,
    pub spotify: ProviderLink,
    pub lastfm: ProviderLink,
}

impl Account {
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Account {
        Account {
            user_id,
            display_name: display_name.into(),
            spotify: ProviderLink::Unlinked,
            lastfm: ProviderLink::Unlinked,
        }
    }

    /// Get the link state for a linkable provider.
    /// Discord is the identity itself and always reads as unlinked here.
    pub fn link(&self, provider: Provider) -> &ProviderLink {
        const UNLINKED: &ProviderLink = &ProviderLink::Unlinked;
        match provider {
            Provider::Spotify => &self.spotify,
            Provider::LastFm => &self.lastfm,
            Provider::Discord => UNLINKED,
        }
    }

    /// Load an account from the store.
    /// Returns `None` if the user never signed in with Discord.
    pub fn load(database: &Database, user_id: UserId) -> rusqlite::Result<Option<Account>> {
        let Some(discord) = database.get_credentials(Provider::Discord, user_id)? else {
            return Ok(None);
        };

        let link = |provider: Provider| -> rusqlite::Result<ProviderLink> {
            Ok(match database.get_credentials(provider, user_id)? {
                Some(credentials) => ProviderLink::linked(credentials.username),
                None => ProviderLink::Unlinked,
            })
        };

        Ok(Some(Account {
            user_id,
            display_name: discord.username,
            spotify: link(Provider::Spotify)?,
            lastfm: link(Provider::LastFm)?,
        }))
    }
}
