//! URI and URL validation
//!
//! A URI is split into its RFC 3986 components first, then each component is
//! checked against its own character grammar so that failures can name the
//! component at fault.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RuleViolation, UriComponent};

static URI_COMPONENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URI component pattern is valid")
});

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("scheme pattern is valid")
});

static USERINFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$&'()*+,;=:]|%[0-9A-Fa-f]{2})*$")
        .expect("userinfo pattern is valid")
});

static HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:localhost|(?:[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}\.?|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})$",
    )
    .expect("host pattern is valid")
});

static IPV6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9A-Fa-f]{0,4}:){2,7}(?:[0-9A-Fa-f]{0,4}|\d{1,3}(?:\.\d{1,3}){3})$")
        .expect("IPv6 pattern is valid")
});

static PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("port pattern is valid"));

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$&'()*+,;=:@/]|%[0-9A-Fa-f]{2})*$")
        .expect("path pattern is valid")
});

static QUERY_OR_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~!$&'()*+,;=:@/?\[\]]|%[0-9A-Fa-f]{2})*$")
        .expect("query pattern is valid")
});

/// The five top-level components of a URI reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UriParts<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl<'a> UriParts<'a> {
    /// Split a URI reference into components without checking them
    #[must_use]
    pub fn split(uri: &'a str) -> Self {
        let Some(captures) = URI_COMPONENTS.captures(uri) else {
            return Self {
                path: uri,
                ..Self::default()
            };
        };
        Self {
            scheme: captures.get(1).map(|m| m.as_str()),
            authority: captures.get(2).map(|m| m.as_str()),
            path: captures.get(3).map_or("", |m| m.as_str()),
            query: captures.get(4).map(|m| m.as_str()),
            fragment: captures.get(5).map(|m| m.as_str()),
        }
    }

    /// Host portion of the authority, with userinfo and port removed
    #[must_use]
    pub fn host(&self) -> Option<&'a str> {
        let authority = self.authority?;
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, rest)| rest);
        let host = if host_port.starts_with('[') {
            host_port
                .find(']')
                .map_or(host_port, |end| &host_port[..=end])
        } else {
            host_port.split_once(':').map_or(host_port, |(host, _)| host)
        };
        (!host.is_empty()).then_some(host)
    }
}

/// Check that `uri` is an absolute URI
///
/// # Errors
///
/// Returns `RuleViolation::MissingScheme` for relative references and
/// `RuleViolation::InvalidComponent` naming the first component whose
/// characters fall outside its grammar.
pub fn absolute_uri(uri: &str) -> Result<(), RuleViolation> {
    let parts = UriParts::split(uri);

    let scheme = parts.scheme.ok_or(RuleViolation::MissingScheme)?;
    if !SCHEME.is_match(scheme) {
        return Err(RuleViolation::component(UriComponent::Scheme, scheme));
    }

    if let Some(authority) = parts.authority {
        if !authority_is_valid(authority) {
            return Err(RuleViolation::component(UriComponent::Authority, authority));
        }
    }

    if !PATH.is_match(parts.path) {
        return Err(RuleViolation::component(UriComponent::Path, parts.path));
    }

    if let Some(query) = parts.query {
        if !QUERY_OR_FRAGMENT.is_match(query) {
            return Err(RuleViolation::component(UriComponent::Query, query));
        }
    }

    if let Some(fragment) = parts.fragment {
        if !QUERY_OR_FRAGMENT.is_match(fragment) {
            return Err(RuleViolation::component(UriComponent::Fragment, fragment));
        }
    }

    Ok(())
}

/// Check that `url` is an absolute http(s) URL with a host
///
/// # Errors
///
/// Returns any [`absolute_uri`] failure, `RuleViolation::UnsupportedScheme`
/// for schemes other than http and https, and `RuleViolation::MissingHost`
/// when there is no authority.
pub fn url(url: &str) -> Result<(), RuleViolation> {
    absolute_uri(url)?;

    let parts = UriParts::split(url);
    let scheme = parts.scheme.unwrap_or_default();
    if scheme != "http" && scheme != "https" {
        return Err(RuleViolation::UnsupportedScheme(scheme.to_string()));
    }

    if parts.host().is_none() {
        return Err(RuleViolation::MissingHost);
    }

    Ok(())
}

fn authority_is_valid(authority: &str) -> bool {
    let (userinfo, host_port) = match authority.rsplit_once('@') {
        Some((userinfo, rest)) => (Some(userinfo), rest),
        None => (None, authority),
    };

    if userinfo.is_some_and(|info| !USERINFO.is_match(info)) {
        return false;
    }

    if let Some(literal) = host_port.strip_prefix('[') {
        let Some((address, rest)) = literal.split_once(']') else {
            return false;
        };
        if !IPV6.is_match(address) {
            return false;
        }
        return match rest.strip_prefix(':') {
            Some(port) => PORT.is_match(port),
            None => rest.is_empty(),
        };
    }

    let (host, port) = match host_port.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (host_port, None),
    };

    HOST.is_match(host) && port.is_none_or(|port| PORT.is_match(port))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_URIS: &[&str] = &[
        "https://john.doe@www.example.com:1234/forum/questions/?tag=networking&order=newest#top",
        "https://john.doe@www.example.com:1234/forum/questions/?tag=networking&order=newest#:~:text=whatever",
        "ldap://[2001:db8::7]/c=GB?objectClass?one",
        "mailto:John.Doe@example.com",
        "news:comp.infosystems.www.servers.unix",
        "tel:+1-816-555-1212",
        "telnet://192.0.2.16:80/",
        "urn:oasis:names:specification:docbook:dtd:xml:4.1.2",
        "urn:uuid:4fb3af44-d4f8-4226-9475-2d09c2d8d9e0",
        "http://localhost:5005/inbox/origin",
    ];

    #[test]
    fn accepts_well_formed_uris() {
        for uri in VALID_URIS {
            assert_eq!(absolute_uri(uri), Ok(()), "{uri}");
        }
    }

    #[test]
    fn relative_references_need_a_scheme() {
        assert_eq!(absolute_uri("not a uri"), Err(RuleViolation::MissingScheme));
        assert_eq!(absolute_uri("/path/only"), Err(RuleViolation::MissingScheme));
    }

    #[test]
    fn failures_name_the_component() {
        let cases = [
            ("9whatever:none", "Invalid URI scheme `9whatever`"),
            ("http://wibble/stuff", "Invalid URI authority `wibble`"),
            ("http://example.com/^path", "Invalid URI path `/^path`"),
            ("http://example.com/path/here/?^=what", "Invalid URI query `^=what`"),
            ("http://example.com/path/here/#^frag", "Invalid URI fragment `^frag`"),
            ("http://example.com:port/", "Invalid URI authority `example.com:port`"),
        ];
        for (uri, message) in cases {
            let err = absolute_uri(uri).expect_err("Test operation failed");
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn urls_are_http_with_a_host() {
        assert_eq!(url("https://generic-service.com/system"), Ok(()));
        assert_eq!(url("http://localhost:5005/inbox"), Ok(()));
        assert_eq!(
            url("ftp://example.com"),
            Err(RuleViolation::UnsupportedScheme("ftp".into()))
        );
        assert_eq!(url("http:/example.com"), Err(RuleViolation::MissingHost));
        assert!(url("http://domain/path").is_err());
        assert!(url("http://example.com/path^wrong").is_err());
        assert!(url("urn:uuid:4fb3af44-d4f8-4226-9475-2d09c2d8d9e0").is_err());
    }

    #[test]
    fn url_scheme_is_matched_exactly() {
        assert_eq!(
            url("HTTP://example.com/"),
            Err(RuleViolation::UnsupportedScheme("HTTP".into()))
        );
        assert_eq!(
            url("Https://example.com/"),
            Err(RuleViolation::UnsupportedScheme("Https".into()))
        );
        assert_eq!(absolute_uri("HTTP://example.com/"), Ok(()));
    }

    #[test]
    fn host_strips_userinfo_and_port() {
        let parts = UriParts::split("https://john.doe@www.example.com:1234/forum");
        assert_eq!(parts.host(), Some("www.example.com"));
        assert_eq!(UriParts::split("ldap://[2001:db8::7]/c=GB").host(), Some("[2001:db8::7]"));
        assert_eq!(UriParts::split("mailto:a@b.com").host(), None);
    }
}
