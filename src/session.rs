use http::header::AUTHORIZATION;
use http::{Method, Request};
use tracing::{debug, warn};

use crate::params::{add_as_query, authorization_header, escape_values, merge, parse};
use crate::signer::{base_string, nonce, signing_key, timestamp};
use crate::store::{persisted_line, CredentialStore, SCREEN_NAME_KEY, USER_ID_KEY};
use crate::transport::{Transport, TransportResponse};
use crate::{
    encoding, AccessCredentials, Config, Credentials, DancePhase, Error, Params, Result,
    SignatureMethod, TokenPair, TokenReaderError, TokenReaderResult, TransportError,
};
use crate::{
    OAUTH_CALLBACK_CONFIRMED_KEY, OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY,
    OAUTH_SIGNATURE_KEY, OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY,
    OAUTH_TOKEN_SECRET_KEY, OAUTH_VERIFIER_KEY, OAUTH_VERSION, OAUTH_VERSION_KEY,
};

const UNAUTHORIZED_STATUS: u16 = 401;

/// An OAuth 1.0a session: runs the dance, then signs requests with the
/// access credentials it obtained.
///
/// Dance steps take `&mut self`; share a session between tasks behind a
/// mutex. Once authorized, [`OAuth::signed_request`] only needs `&self` and
/// may be called concurrently.
#[derive(Debug)]
pub struct OAuth<T> {
    config: Config,
    signature_method: SignatureMethod,
    credentials: Credentials,
    transport: T,
}

impl<T> OAuth<T>
where
    T: Transport,
{
    /// Constructs a new session.
    ///
    /// # Errors
    ///
    /// Fails when the configured signature method is not supported or an
    /// endpoint is not an absolute URL.
    pub fn new(config: Config, transport: T) -> Result<Self> {
        let signature_method = config.validate()?;
        Ok(OAuth {
            config,
            signature_method,
            credentials: Credentials::Unauthorized,
            transport,
        })
    }

    /// The configuration this session was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Credentials held at the current step of the dance.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// True iff both the access token and its secret are known.
    pub fn is_authorized(&self) -> bool {
        self.credentials.is_authorized()
    }

    /// The user id reported with the access token, or 0.
    ///
    /// Never fails; check [`OAuth::is_authorized`] first.
    pub fn user_id(&self) -> u64 {
        self.credentials
            .access()
            .map(AccessCredentials::user_id)
            .unwrap_or_default()
    }

    /// The screen name reported with the access token, or "".
    pub fn user_name(&self) -> &str {
        self.credentials
            .access()
            .map(AccessCredentials::screen_name)
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // The dance

    /// Step 1: obtain temporary credentials.
    ///
    /// Parameters added with [`Config::request_token_param`] override the
    /// protocol parameters of the same name.
    pub async fn request_temporary_credentials(&mut self) -> Result<()> {
        let phase = DancePhase::TemporaryCredentials;
        if let Credentials::Access(_) = self.credentials {
            return Err(Error::dance(phase, "access credentials already held"));
        }

        let mut protocol = self.protocol_params(None);
        protocol.insert(
            OAUTH_CALLBACK_KEY.to_string(),
            self.config.callback_url().to_string(),
        );
        let oauth = merge(self.config.request_token_params(), &protocol);

        let url = self.config.request_token_url();
        debug!(endpoint = %url, "requesting temporary credentials");
        let request = self.build_request(
            Method::POST,
            url,
            oauth,
            &Params::new(),
            self.credentials.token_secret(),
        )?;
        let mut params = self.exchange(request, phase).await?;

        let confirmed = params
            .get(OAUTH_CALLBACK_CONFIRMED_KEY)
            .map(|confirmed| confirmed == "true")
            .unwrap_or(false);
        if !confirmed {
            warn!(callback = %self.config.callback_url(), "callback not confirmed by provider");
            return Err(Error::Callback {
                callback: self.config.callback_url().to_string(),
            });
        }
        let pair = take_token_pair(&mut params)?;

        self.credentials = Credentials::Temporary(pair);
        Ok(())
    }

    /// Step 2: the URL the resource owner visits to grant access.
    pub fn authorization_url(&self) -> Result<String> {
        let pair = self.credentials.temporary().ok_or_else(|| {
            Error::dance(
                DancePhase::OwnerAuthorization,
                "temporary credentials not available",
            )
        })?;
        Ok(format!(
            "{}?{}={}",
            self.config.owner_auth_url(),
            OAUTH_TOKEN_KEY,
            pair.token()
        ))
    }

    /// Step 3: exchange the verifier for access credentials.
    pub async fn request_access_token(&mut self, verifier: &str) -> Result<()> {
        let phase = DancePhase::AccessToken;
        let temporary = match self.credentials {
            Credentials::Temporary(ref pair) => pair.clone(),
            _ => {
                return Err(Error::dance(phase, "temporary credentials not available"));
            }
        };

        let mut oauth = self.protocol_params(Some(temporary.token()));
        oauth.insert(OAUTH_VERIFIER_KEY.to_string(), verifier.to_string());

        let url = self.config.access_token_url();
        debug!(endpoint = %url, "requesting access token");
        let request = self.build_request(
            Method::POST,
            url,
            oauth,
            &Params::new(),
            self.credentials.token_secret(),
        )?;
        let params = self.exchange(request, phase).await?;

        self.credentials = Credentials::Access(read_access(params, Some(temporary))?);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Authorized requests

    /// Sign and send a request with the access credentials.
    ///
    /// `params` are signed and sent on the query string. The response is
    /// returned as-is; its status is not interpreted.
    pub async fn signed_request(
        &self,
        method: Method,
        url: &str,
        params: &Params,
    ) -> Result<T::Response> {
        let access = match self.credentials.access() {
            Some(access) if self.is_authorized() => access,
            _ => return Err(Error::dance(DancePhase::SignedRequest, "not authorized")),
        };

        let oauth = self.protocol_params(Some(access.pair().token()));
        debug!(%method, url, "sending signed request");
        let request = self.build_request(
            method,
            url,
            oauth,
            params,
            self.credentials.token_secret(),
        )?;
        Ok(self.transport.send(request).await?)
    }

    /// Convenience method for a signed `GET`.
    pub async fn get(&self, url: &str, params: &Params) -> Result<T::Response> {
        self.signed_request(Method::GET, url, params).await
    }

    /// Convenience method for a signed `POST`.
    pub async fn post(&self, url: &str, params: &Params) -> Result<T::Response> {
        self.signed_request(Method::POST, url, params).await
    }

    // ------------------------------------------------------------------------
    // Persistence

    /// The access credentials as a storable line, if authorized.
    pub fn persisted_line(&self) -> Option<String> {
        match self.credentials.access() {
            Some(access) if self.is_authorized() => Some(persisted_line(access)),
            _ => None,
        }
    }

    /// Write the access credentials to `store`.
    pub fn save<S>(&self, store: &S) -> Result<()>
    where
        S: CredentialStore,
    {
        let line = self
            .persisted_line()
            .ok_or_else(|| Error::dance(DancePhase::Persist, "not authorized"))?;
        store.save(&line)?;
        Ok(())
    }

    /// Read access credentials back from `store`.
    pub fn load<S>(&mut self, store: &S) -> Result<()>
    where
        S: CredentialStore,
    {
        let line = store.load()?;
        self.restore(&line)
    }

    /// Adopt access credentials from a persisted line, as if the
    /// access-token step had answered with it.
    pub fn restore(&mut self, line: &str) -> Result<()> {
        let access = read_access(parse(line.trim()), None)?;
        debug!(user_id = access.user_id(), "restored access credentials");
        self.credentials = Credentials::Access(access);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Internals

    fn protocol_params(&self, token: Option<&str>) -> Params {
        let mut params = Params::new();
        params.insert(
            OAUTH_CONSUMER_KEY.to_string(),
            self.config.consumer_key().to_string(),
        );
        params.insert(
            OAUTH_SIGNATURE_METHOD_KEY.to_string(),
            self.signature_method.as_str().to_string(),
        );
        params.insert(OAUTH_TIMESTAMP_KEY.to_string(), timestamp());
        params.insert(OAUTH_NONCE_KEY.to_string(), nonce());
        params.insert(OAUTH_VERSION_KEY.to_string(), OAUTH_VERSION.to_string());
        if let Some(token) = token {
            params.insert(OAUTH_TOKEN_KEY.to_string(), token.to_string());
        }
        params
    }

    /// Sign `oauth` together with `params` and assemble the HTTP request.
    ///
    /// `oauth` ends up in the `Authorization` header, `params` on the query
    /// string; on a key clash the `oauth` value is the one signed.
    fn build_request(
        &self,
        method: Method,
        url: &str,
        mut oauth: Params,
        params: &Params,
        token_secret: Option<&str>,
    ) -> Result<Request<String>> {
        let mut params = params.clone();
        escape_values(&mut oauth);
        escape_values(&mut params);

        let all = merge(&oauth, &params);
        let base = base_string(method.as_str(), url, &all);
        let key = signing_key(self.config.consumer_secret(), token_secret);
        let signature = self.signature_method.sign(&base, &key);
        oauth.insert(
            OAUTH_SIGNATURE_KEY.to_string(),
            encoding::encode(&signature),
        );

        let header = authorization_header(&oauth, self.config.realm_value());
        let request = Request::builder()
            .method(method)
            .uri(add_as_query(url, &params))
            .header(AUTHORIZATION, header)
            .body(String::new())
            .map_err(TransportError::from)?;
        Ok(request)
    }

    /// Send a dance request and parse the provider's answer.
    async fn exchange(&self, request: Request<String>, phase: DancePhase) -> Result<Params> {
        let response = self.transport.send(request).await?;
        let status = response.status();
        let body = response.text().await?;
        if status == UNAUTHORIZED_STATUS {
            warn!(%phase, status, "provider rejected the request");
            return Err(Error::dance(phase, body));
        }
        Ok(parse(&body))
    }
}

/// Pull the token pair out of a provider answer. An empty token or secret
/// counts as missing.
fn take_token_pair(params: &mut Params) -> TokenReaderResult<TokenPair> {
    let token = params.remove(OAUTH_TOKEN_KEY).filter(|token| !token.is_empty());
    let secret = params
        .remove(OAUTH_TOKEN_SECRET_KEY)
        .filter(|secret| !secret.is_empty());
    match (token, secret) {
        (Some(token), Some(secret)) => Ok(TokenPair::new(token, secret)),
        (None, _) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_KEY,
            render(params),
        )),
        (_, None) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            render(params),
        )),
    }
}

// the remaining keys, for diagnostics; values may be credentials
fn render(params: &Params) -> String {
    params.keys().cloned().collect::<Vec<_>>().join("&")
}

fn read_access(mut params: Params, temporary: Option<TokenPair>) -> Result<AccessCredentials> {
    let pair = take_token_pair(&mut params)?;
    let user_id = params
        .get(USER_ID_KEY)
        .and_then(|id| id.parse::<u64>().ok())
        .unwrap_or_default();
    let screen_name = params.remove(SCREEN_NAME_KEY).unwrap_or_default();
    Ok(AccessCredentials::new(pair, user_id, screen_name, temporary))
}
