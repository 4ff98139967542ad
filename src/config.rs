use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Params, Result, SignatureMethod};

const TWITTER_REQUEST_TOKEN_URL: &str = "https://api.twitter.com/oauth/request_token";
const TWITTER_OWNER_AUTH_URL: &str = "https://api.twitter.com/oauth/authorize";
const TWITTER_ACCESS_TOKEN_URL: &str = "https://api.twitter.com/oauth/access_token";

/// Out-of-band callback, for clients that read the verifier from the user.
pub const OOB_CALLBACK: &str = "oob";

/// Everything a session needs to know about the consumer and the provider.
///
/// `Config` can be deserialized, or assembled with the consuming setters:
///
/// ```
/// use oauth1_dance::Config;
///
/// let config = Config::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
///     .endpoints(
///         "https://photos.example.net/initiate",
///         "https://photos.example.net/authorize",
///         "https://photos.example.net/token",
///     )
///     .callback("http://printer.example.com/ready");
/// assert_eq!(config.callback_url(), "http://printer.example.com/ready");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    consumer_key: String,
    consumer_secret: String,
    #[serde(default = "default_signature_method")]
    signature_method: String,
    #[serde(default = "default_callback")]
    callback: String,
    #[serde(default)]
    request_token_url: String,
    #[serde(default)]
    owner_auth_url: String,
    #[serde(default)]
    access_token_url: String,
    /// Extra parameters sent with the temporary-credential request.
    #[serde(default)]
    request_token_params: Params,
    #[serde(default)]
    realm: Option<String>,
}

fn default_signature_method() -> String {
    SignatureMethod::default().as_str().to_string()
}

fn default_callback() -> String {
    OOB_CALLBACK.to_string()
}

impl Config {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Config {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            signature_method: default_signature_method(),
            callback: default_callback(),
            request_token_url: String::new(),
            owner_auth_url: String::new(),
            access_token_url: String::new(),
            request_token_params: Params::new(),
            realm: None,
        }
    }

    /// A config pointing at Twitter's OAuth endpoints.
    pub fn twitter<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Config::new(consumer_key, consumer_secret).endpoints(
            TWITTER_REQUEST_TOKEN_URL,
            TWITTER_OWNER_AUTH_URL,
            TWITTER_ACCESS_TOKEN_URL,
        )
    }

    /// Set the temporary-credential, owner-authorization and access-token endpoints.
    pub fn endpoints<TRequest, TAuth, TAccess>(
        self,
        request_token_url: TRequest,
        owner_auth_url: TAuth,
        access_token_url: TAccess,
    ) -> Self
    where
        TRequest: Into<String>,
        TAuth: Into<String>,
        TAccess: Into<String>,
    {
        Config {
            request_token_url: request_token_url.into(),
            owner_auth_url: owner_auth_url.into(),
            access_token_url: access_token_url.into(),
            ..self
        }
    }

    /// Set the `oauth_callback` value, `oob` by default.
    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<String>,
    {
        Config {
            callback: callback.into(),
            ..self
        }
    }

    /// Set the signature method by its protocol name.
    ///
    /// # Note
    /// Only `HMAC-SHA1` is supported; anything else is rejected when the
    /// session is constructed.
    pub fn signature_method<T>(self, signature_method: T) -> Self
    where
        T: Into<String>,
    {
        Config {
            signature_method: signature_method.into(),
            ..self
        }
    }

    /// Add a parameter to the temporary-credential request, such as
    /// `x_auth_access_type`. These win over the protocol parameters.
    pub fn request_token_param<TKey, TValue>(mut self, key: TKey, value: TValue) -> Self
    where
        TKey: Into<String>,
        TValue: Into<String>,
    {
        self.request_token_params.insert(key.into(), value.into());
        self
    }

    /// Set the `realm` attribute of the `Authorization` header.
    pub fn realm<T>(self, realm: T) -> Self
    where
        T: Into<String>,
    {
        Config {
            realm: Some(realm.into()),
            ..self
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub(crate) fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn callback_url(&self) -> &str {
        &self.callback
    }

    pub fn request_token_url(&self) -> &str {
        &self.request_token_url
    }

    pub fn owner_auth_url(&self) -> &str {
        &self.owner_auth_url
    }

    pub fn access_token_url(&self) -> &str {
        &self.access_token_url
    }

    pub fn request_token_params(&self) -> &Params {
        &self.request_token_params
    }

    pub fn realm_value(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    /// Check the config and resolve its signature method.
    pub(crate) fn validate(&self) -> Result<SignatureMethod> {
        let method = self.signature_method.parse::<SignatureMethod>()?;
        for endpoint in &[
            &self.request_token_url,
            &self.owner_auth_url,
            &self.access_token_url,
        ] {
            Url::parse(endpoint).map_err(|source| Error::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                source,
            })?;
        }
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_preset() {
        let config = Config::twitter("key", "secret");
        assert_eq!(config.consumer_key(), "key");
        assert_eq!(config.callback_url(), OOB_CALLBACK);
        assert_eq!(
            config.owner_auth_url(),
            "https://api.twitter.com/oauth/authorize"
        );
        assert_eq!(config.validate().unwrap(), SignatureMethod::HmacSha1);
    }

    #[test]
    fn builder_setters() {
        let config = Config::twitter("key", "secret")
            .callback("http://localhost/cb")
            .request_token_param("x_auth_access_type", "read")
            .realm("Photos");
        assert_eq!(config.callback_url(), "http://localhost/cb");
        assert_eq!(
            config.request_token_params().get("x_auth_access_type").map(String::as_str),
            Some("read")
        );
        assert_eq!(config.realm_value(), Some("Photos"));
    }

    #[test]
    fn rejects_unsupported_signature_method() {
        let config = Config::twitter("key", "secret").signature_method("PLAINTEXT");
        match config.validate() {
            Err(Error::UnsupportedSignatureMethod(name)) => assert_eq!(name, "PLAINTEXT"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_endpoints() {
        match Config::new("key", "secret").validate() {
            Err(Error::InvalidEndpoint { endpoint, .. }) => assert_eq!(endpoint, ""),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_urlencoded::from_str(
            "consumer_key=key&consumer_secret=secret&request_token_url=https%3A%2F%2Fx%2Fr&owner_auth_url=https%3A%2F%2Fx%2Fa&access_token_url=https%3A%2F%2Fx%2Ft",
        )
        .unwrap();
        assert_eq!(config.callback_url(), OOB_CALLBACK);
        assert_eq!(config.validate().unwrap(), SignatureMethod::HmacSha1);
        assert!(config.request_token_params().is_empty());
        assert_eq!(config.realm_value(), None);
    }
}
