use serde::{Deserialize, Serialize};

const MASK: &str = "***";

/// Connection metadata safe to log and persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedConnection {
    pub engine: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub redacted: String,
}

/// Mask the password of a connection URL and pull out the non-secret parts.
///
/// Accepts `scheme://[user[:password]@]host[:port][/database][?params]`.
/// The password may contain `/`, `?` or `@`. Sensitive query parameters are
/// masked too. Strings without a scheme are returned unchanged apart from
/// query masking.
pub fn redact_connection_string(conn: &str) -> RedactedConnection {
    let Some((scheme, rest)) = conn.split_once("://") else {
        let (base, query) = split_query(conn);
        return RedactedConnection {
            engine: None,
            user: None,
            host: None,
            port: None,
            database: None,
            redacted: join_query(base.to_string(), query),
        };
    };

    let (credentials, location) = split_credentials(rest);
    let (location, query) = split_query(location);
    let (host_port, path) = location.split_once('/').unwrap_or((location, ""));

    let (user, masked_credentials) = match credentials {
        Some(credentials) => match credentials.split_once(':') {
            Some((user, _password)) => (Some(user.to_string()), format!("{user}:{MASK}@")),
            None => (Some(credentials.to_string()), format!("{credentials}@")),
        },
        None => (None, String::new()),
    };

    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) => (host.to_string(), port.parse::<u16>().ok()),
        None => (host_port.to_string(), None),
    };

    let mut redacted = format!("{scheme}://{masked_credentials}{host_port}");
    if !path.is_empty() {
        redacted.push('/');
        redacted.push_str(path);
    }

    RedactedConnection {
        engine: Some(scheme.to_string()),
        user,
        host: (!host.is_empty()).then_some(host),
        port,
        database: (!path.is_empty()).then(|| path.to_string()),
        redacted: join_query(redacted, query),
    }
}

/// Split `[user[:password]@]rest` at the `@` that ends the userinfo.
///
/// The userinfo starts with a user name free of `:/?@`. It ends at the first
/// `@` followed by a host segment (up to the next `/` or `?`) with no further
/// `@`, so reserved characters inside the password stay in the credentials.
fn split_credentials(rest: &str) -> (Option<&str>, &str) {
    let Some(user_end) = rest.find([':', '@', '/', '?']) else {
        return (None, rest);
    };
    if !rest[user_end..].starts_with([':', '@']) {
        return (None, rest);
    }

    let at = rest[user_end..]
        .match_indices('@')
        .map(|(offset, _)| user_end + offset)
        .find(|&at| {
            let host = &rest[at + 1..];
            let host_end = host.find(['/', '?']).unwrap_or(host.len());
            !host[..host_end].contains('@')
        });

    match at {
        Some(at) => (Some(&rest[..at]), &rest[at + 1..]),
        None => (None, rest),
    }
}

fn split_query(value: &str) -> (&str, Option<&str>) {
    match value.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (value, None),
    }
}

fn join_query(mut base: String, query: Option<&str>) -> String {
    let Some(query) = query else {
        return base;
    };

    let params: Vec<String> = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive_key(key) => format!("{key}={MASK}"),
            _ => pair.to_string(),
        })
        .collect();

    base.push('?');
    base.push_str(&params.join("&"));
    base
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "password" | "pass" | "token" | "api_key" | "apikey"
    )
}
