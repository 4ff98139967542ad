//! Persisting access credentials between runs.
//!
//! The stored form is the same `k=v&k=v` line the access-token endpoint
//! answers with, so restoring is just replaying that step.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::AccessCredentials;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const SCREEN_NAME_KEY: &str = "screen_name";

/// Somewhere to keep the persisted credential line.
pub trait CredentialStore {
    fn save(&self, line: &str) -> io::Result<()>;

    fn load(&self) -> io::Result<String>;
}

/// Keeps the credential line in a single file, readable by its owner only.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn save(&self, line: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).truncate(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(line.as_bytes())
    }

    fn load(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}

/// Render access credentials as `oauth_token=..&oauth_token_secret=..`,
/// followed by `user_id` and `screen_name` when known.
pub(crate) fn persisted_line(access: &AccessCredentials) -> String {
    let mut line = format!(
        "{}={}&{}={}",
        crate::OAUTH_TOKEN_KEY,
        access.pair().token(),
        crate::OAUTH_TOKEN_SECRET_KEY,
        access.pair().secret()
    );
    if access.user_id() != 0 {
        line.push_str(&format!("&{}={}", USER_ID_KEY, access.user_id()));
    }
    if !access.screen_name().is_empty() {
        line.push_str(&format!("&{}={}", SCREEN_NAME_KEY, access.screen_name()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenPair;

    #[test]
    fn line_with_owner() {
        let access = AccessCredentials::new(
            TokenPair::new("T2", "S2"),
            42,
            "alice".to_string(),
            None,
        );
        assert_eq!(
            persisted_line(&access),
            "oauth_token=T2&oauth_token_secret=S2&user_id=42&screen_name=alice"
        );
    }

    #[test]
    fn line_without_owner() {
        let access = AccessCredentials::new(TokenPair::new("T2", "S2"), 0, String::new(), None);
        assert_eq!(
            persisted_line(&access),
            "oauth_token=T2&oauth_token_secret=S2"
        );
    }

    #[test]
    fn file_store_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("token"));
        store.save("oauth_token=old&oauth_token_secret=older").unwrap();
        store.save("oauth_token=T&oauth_token_secret=S").unwrap();
        assert_eq!(store.load().unwrap(), "oauth_token=T&oauth_token_secret=S");
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("token"));
        store.save("oauth_token=T&oauth_token_secret=S").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing"));
        assert_eq!(
            store.load().unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
