//! Token authentication: `t = md5(password ++ salt)`.
//!
//! MD5 is what the protocol's token scheme mandates; anything stronger would
//! not interoperate with existing servers.

use rand::{distributions::Uniform, rngs::OsRng, Rng};

/// Protocol version the client speaks.
pub const API_VERSION: &str = "1.16.1";

/// Response format requested on every call.
pub const FORMAT: &str = "json";

const SALT_SIZE: usize = 16;

/// Salt and token for one client. The password itself is not kept.
#[derive(Clone)]
pub struct SubsonicAuth {
    client: String,
    user: String,
    salt: String,
    token: String,
}

impl std::fmt::Debug for SubsonicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsonicAuth")
            .field("client", &self.client)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl SubsonicAuth {
    pub fn new(
        client: impl Into<String>,
        user: impl Into<String>,
        password: impl AsRef<str>,
    ) -> SubsonicAuth {
        let salt = generate_salt();
        let token = derive_token(password.as_ref(), &salt);

        SubsonicAuth {
            client: client.into(),
            user: user.into(),
            salt,
            token,
        }
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The parameters sent with every request.
    pub fn params(&self) -> [(&'static str, &str); 6] {
        [
            ("u", self.user.as_str()),
            ("t", self.token.as_str()),
            ("s", self.salt.as_str()),
            ("v", API_VERSION),
            ("c", self.client.as_str()),
            ("f", FORMAT),
        ]
    }

    pub fn add_to_query_pairs(
        &self,
        query_pairs: &mut url::form_urlencoded::Serializer<url::UrlQuery>,
    ) {
        query_pairs.extend_pairs(self.params());
    }
}

/// 16 printable, non-space ASCII characters from the OS random source.
fn generate_salt() -> String {
    OsRng
        .sample_iter(Uniform::new_inclusive(b'!', b'~'))
        .take(SALT_SIZE)
        .map(char::from)
        .collect()
}

fn derive_token(password: &str, salt: &str) -> String {
    let mut data = Vec::with_capacity(password.len() + salt.len());
    data.extend_from_slice(password.as_bytes());
    data.extend_from_slice(salt.as_bytes());
    format!("{:x}", md5::compute(data))
}
