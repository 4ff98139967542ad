/*!
oauth1-dance: the OAuth 1.0a three-legged dance and HMAC-SHA1 request signing.

# Overview

This library walks a client through the OAuth 1.0a authorization dance
(temporary credentials, owner authorization, access token) against a service
provider such as Twitter, and signs subsequent requests with an
`Authorization: OAuth ...` header as described in
[RFC 5849](https://tools.ietf.org/html/rfc5849).

The HTTP exchange itself is delegated to a [`Transport`]; `reqwest::Client`
implements it out of the box.

# How to use

## Acquiring access token & secret

```rust,ignore
use std::io;
use oauth1_dance::{Config, OAuth};

let config = Config::twitter("[CONSUMER_KEY]", "[CONSUMER_SECRET]");
let mut session = OAuth::new(config, reqwest::Client::new())?;

// step 1: acquire temporary credentials
session.request_temporary_credentials().await?;

// step 2: let the user authorize us and read the pin
println!("please access to: {}", session.authorization_url()?);
println!("input pin: ");
let mut user_input = String::new();
io::stdin().read_line(&mut user_input)?;

// step 3: acquire access token
session.request_access_token(user_input.trim()).await?;
println!(
    "authorized as {} ({})",
    session.user_name(),
    session.user_id()
);
```

## Signing requests

```rust,ignore
use oauth1_dance::{FileStore, Params};

// restore a previous dance
session.load(&FileStore::new("twitter.token"))?;

let mut params = Params::new();
params.insert("status".to_string(), "Hello, Twitter!".to_string());
let resp = session
    .post("https://api.twitter.com/1.1/statuses/update.json", &params)
    .await?;
```
*/
mod config;
mod credentials;
pub mod encoding;
mod error;
pub mod params;
mod session;
pub mod signer;
mod store;
mod transport;

// exposed to external program
pub use config::{Config, OOB_CALLBACK};
pub use credentials::{AccessCredentials, Credentials, TokenPair};
pub use error::{
    DancePhase, Error, Result, TokenReaderError, TokenReaderResult, TransportError,
    TransportResult,
};
pub use params::Params;
pub use session::OAuth;
pub use signer::SignatureMethod;
pub use store::{CredentialStore, FileStore};
pub use transport::{Transport, TransportResponse};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_callback_confirmed`.
pub const OAUTH_CALLBACK_CONFIRMED_KEY: &str = "oauth_callback_confirmed";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";
/// The only legal `oauth_version` value.
pub const OAUTH_VERSION: &str = "1.0";

// crate-private constant variables
pub(crate) const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
pub(crate) const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
