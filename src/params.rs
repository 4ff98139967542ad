use std::collections::BTreeMap;

use crate::encoding;

/// Flat, single-valued parameter set.
///
/// Keys iterate in lexicographic order, which is the order the signature base
/// string and the `Authorization` header are rendered in.
pub type Params = BTreeMap<String, String>;

const AUTHORIZATION_SCHEME: &str = "OAuth ";
const REALM_KEY: &str = "realm";

/// Combine two parameter sets. Entries in `primary` take precedence over
/// entries in `secondary`.
pub fn merge(primary: &Params, secondary: &Params) -> Params {
    let mut all = secondary.clone();
    for (key, value) in primary {
        all.insert(key.clone(), value.clone());
    }
    all
}

/// Percent-encode every value in place.
///
/// Keys are left as they are; every key the protocol and the providers use
/// stays within the unreserved set.
pub fn escape_values(params: &mut Params) {
    for value in params.values_mut() {
        *value = encoding::encode(value);
    }
}

/// Form-decode every value in place. Values that do not decode are kept.
pub fn unescape_values(params: &mut Params) {
    for value in params.values_mut() {
        if let Some(decoded) = encoding::decode_form(value) {
            *value = decoded;
        }
    }
}

/// Parse a `k1=v1&k2=v2` body.
///
/// Only the first `=` of a pair separates key and value. A pair without `=`
/// yields an empty value, a pair starting with `=` yields an empty key, and
/// empty pairs are skipped. Values are returned as found on the wire.
pub fn parse(body: &str) -> Params {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut kv = pair.splitn(2, '=');
            (
                kv.next().unwrap_or_default().to_string(),
                kv.next().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

/// Append `params` to `url` as a query string.
///
/// Each value is decoded before being form-encoded again, so values the
/// caller already escaped are not escaped twice.
pub fn add_as_query(url: &str, params: &Params) -> String {
    let mut query = String::from(url);
    let mut separator = if url.contains('?') { '&' } else { '?' };
    for (key, value) in params {
        let raw = encoding::decode_form(value).unwrap_or_else(|| value.clone());
        query.push(separator);
        query.push_str(key);
        query.push('=');
        query.push_str(&encoding::encode_form(&raw));
        separator = '&';
    }
    query
}

/// Render the `Authorization` header value from already-escaped values.
pub fn authorization_header(params: &Params, realm: Option<&str>) -> String {
    let realm = realm.map(|realm| format!("{}=\"{}\"", REALM_KEY, realm));
    let pairs = params
        .iter()
        .map(|(key, value)| format!("{}=\"{}\"", key, value));
    let rendered = realm.into_iter().chain(pairs).collect::<Vec<_>>();
    format!("{}{}", AUTHORIZATION_SCHEME, rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn merge_prefers_primary() {
        let primary = params(&[("a", "1")]);
        let secondary = params(&[("a", "2"), ("b", "3")]);
        assert_eq!(
            merge(&primary, &secondary),
            params(&[("a", "1"), ("b", "3")])
        );
        // inputs are left alone
        assert_eq!(secondary.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn merge_with_empty() {
        let some = params(&[("a", "1")]);
        assert_eq!(merge(&some, &Params::new()), some);
        assert_eq!(merge(&Params::new(), &some), some);
    }

    #[test]
    fn escape_touches_values_only() {
        let mut p = params(&[("status", "Hello Ladies + Gentlemen!"), ("a b", "c d")]);
        escape_values(&mut p);
        assert_eq!(p["status"], "Hello%20Ladies%20%2B%20Gentlemen%21");
        assert_eq!(p["a b"], "c%20d");
    }

    #[test]
    fn unescape_reverses_escape() {
        let original = params(&[("status", "50% off + free/shipping"), ("n", "1")]);
        let mut p = original.clone();
        escape_values(&mut p);
        unescape_values(&mut p);
        assert_eq!(p, original);
    }

    #[test]
    fn unescape_keeps_undecodable_values() {
        let mut p = params(&[("bin", "%FF"), ("form", "a+b")]);
        unescape_values(&mut p);
        assert_eq!(p["bin"], "%FF");
        assert_eq!(p["form"], "a b");
    }

    #[test]
    fn parse_typical() {
        let body = "oauth_token=Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik&oauth_token_secret=Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM&oauth_callback_confirmed=true";
        let parsed = parse(body);
        assert_eq!(parsed.len(), 3);
        assert_eq!(
            parsed["oauth_token"],
            "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik"
        );
        assert_eq!(parsed["oauth_callback_confirmed"], "true");
        assert_eq!(
            parsed,
            serde_urlencoded::from_str::<Params>(body).unwrap()
        );
    }

    #[test]
    fn parse_simple() {
        assert_eq!(parse("a=1&b=2"), params(&[("a", "1"), ("b", "2")]));
        assert_eq!(parse(""), Params::new());
        assert_eq!(parse("a"), params(&[("a", "")]));
    }

    #[test]
    fn parse_edge() {
        let parsed = parse("oauth_token==&oauth_token_secret=&keyonly&a=b=c&&");
        assert_eq!(parsed["oauth_token"], "=");
        assert_eq!(parsed["oauth_token_secret"], "");
        assert_eq!(parsed["keyonly"], "");
        assert_eq!(parsed["a"], "b=c");
        assert_eq!(parsed.len(), 4);
    }

    #[test]
    fn parse_empty_key() {
        let parsed = parse("=v&a=1");
        assert_eq!(parsed[""], "v");
        assert_eq!(parsed["a"], "1");
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn parse_keeps_values_escaped() {
        let parsed = parse("screen_name=a%20b");
        assert_eq!(parsed["screen_name"], "a%20b");
    }

    #[test]
    fn query_is_appended() {
        let p = params(&[("size", "original"), ("file", "vacation.jpg")]);
        assert_eq!(
            add_as_query("http://photos.example.net/photos", &p),
            "http://photos.example.net/photos?file=vacation.jpg&size=original"
        );
        assert_eq!(
            add_as_query("http://x/y?page=2", &params(&[("a", "1")])),
            "http://x/y?page=2&a=1"
        );
        assert_eq!(add_as_query("http://x/y", &Params::new()), "http://x/y");
    }

    #[test]
    fn query_does_not_double_encode() {
        let raw = params(&[("status", "a b&c")]);
        let mut escaped = raw.clone();
        escape_values(&mut escaped);
        assert_eq!(
            add_as_query("http://x", &raw),
            add_as_query("http://x", &escaped)
        );
        assert_eq!(add_as_query("http://x", &raw), "http://x?status=a+b%26c");
    }

    #[test]
    fn header_rendering() {
        let p = params(&[("oauth_nonce", "abc"), ("oauth_consumer_key", "key")]);
        assert_eq!(
            authorization_header(&p, None),
            "OAuth oauth_consumer_key=\"key\", oauth_nonce=\"abc\""
        );
        assert_eq!(
            authorization_header(&p, Some("Photos")),
            "OAuth realm=\"Photos\", oauth_consumer_key=\"key\", oauth_nonce=\"abc\""
        );
    }
}
