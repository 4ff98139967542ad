/// A token and its secret, as handed out by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    token: String,
    secret: String,
}

impl TokenPair {
    pub fn new<TToken, TSecret>(token: TToken, secret: TSecret) -> Self
    where
        TToken: Into<String>,
        TSecret: Into<String>,
    {
        TokenPair {
            token: token.into(),
            secret: secret.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

/// Long-lived credentials plus what the provider told us about their owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredentials {
    pair: TokenPair,
    user_id: u64,
    screen_name: String,
    // the temporary pair this was exchanged from; absent when restored from storage
    temporary: Option<TokenPair>,
}

impl AccessCredentials {
    pub(crate) fn new(
        pair: TokenPair,
        user_id: u64,
        screen_name: String,
        temporary: Option<TokenPair>,
    ) -> Self {
        AccessCredentials {
            pair,
            user_id,
            screen_name,
            temporary,
        }
    }

    pub fn pair(&self) -> &TokenPair {
        &self.pair
    }

    /// Provider-assigned user id, 0 when unknown.
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Provider-assigned screen name, empty when unknown.
    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    pub fn temporary(&self) -> Option<&TokenPair> {
        self.temporary.as_ref()
    }
}

/// Which credential tier a session currently holds.
///
/// Moves only forward, `Unauthorized -> Temporary -> Access`. A new
/// temporary-credential request may replace `Temporary` with a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Unauthorized,
    Temporary(TokenPair),
    Access(AccessCredentials),
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials::Unauthorized
    }
}

impl Credentials {
    /// The temporary pair, if one is held or was used to reach `Access`.
    pub fn temporary(&self) -> Option<&TokenPair> {
        match self {
            Credentials::Unauthorized => None,
            Credentials::Temporary(pair) => Some(pair),
            Credentials::Access(access) => access.temporary(),
        }
    }

    pub fn access(&self) -> Option<&AccessCredentials> {
        match self {
            Credentials::Access(access) => Some(access),
            _ => None,
        }
    }

    /// The secret that completes the signing key: access secret first, then
    /// the temporary one.
    pub(crate) fn token_secret(&self) -> Option<&str> {
        match self {
            Credentials::Unauthorized => None,
            Credentials::Temporary(pair) => Some(pair.secret()),
            Credentials::Access(access) => Some(access.pair().secret()),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.access()
            .map(|access| !access.pair().token().is_empty() && !access.pair().secret().is_empty())
            .unwrap_or(false)
    }
}
