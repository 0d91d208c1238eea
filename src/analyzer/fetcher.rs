// ---------------------------------------------------------------------------
// analyzer/fetcher.rs — page download and failure classification
// ---------------------------------------------------------------------------

use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

/// Client label sent with every outbound fetch.
pub const USER_AGENT: &str = "GreenCheckAnalyzer/1.0 (+https://greencheck.local)";

/// Total budget for one fetch, connect and body included.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// A downloaded page: decompressed bytes plus the text decoded with the
/// declared (or assumed UTF-8) charset.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    pub encoding: String,
    pub text: String,
}

/// Fetch failures, classified for the user. Display carries the exact
/// French message shown in the error body; keep the wording stable, the
/// frontend and its translations key off it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{}", connection_message(.detail, .dns))]
    ConnectionFailed { detail: String, dns: bool },

    #[error("Le site a pris trop de temps à répondre. Veuillez réessayer.")]
    Timeout,

    #[error("{}", http_status_message(.0))]
    HttpStatus(u16),

    #[error("Impossible d'analyser le site : {0}")]
    Unknown(String),
}

impl FetchError {
    /// Map a transport error onto the user-facing categories. Connect
    /// failures are checked before the timeout flag so a connect that dies
    /// at the deadline still reads as a connection problem.
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() {
            let detail = source_chain(&err);
            let dns = looks_like_dns_failure(&detail);
            return FetchError::ConnectionFailed { detail, dns };
        }
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        FetchError::Unknown(source_chain(&err))
    }
}

fn connection_message(detail: &str, dns: &bool) -> String {
    if *dns {
        "Impossible de se connecter au site. Vérifiez votre connexion Internet et que le nom de domaine est correct."
            .to_string()
    } else {
        format!("Impossible de se connecter au site : {detail}")
    }
}

fn http_status_message(code: &u16) -> String {
    match *code {
        404 => "Le site demandé n'a pas été trouvé (404). Vérifiez que l'URL est correcte."
            .to_string(),
        403 => "Accès refusé au site (403). Le site bloque peut-être les requêtes automatisées."
            .to_string(),
        c if c >= 500 => {
            format!("Le site rencontre une erreur serveur (HTTP {c}). Réessayez plus tard.")
        }
        c => format!("Impossible d'analyser le site : erreur HTTP {c}"),
    }
}

/// Flatten an error and its sources into one line. reqwest's top-level
/// Display hides the interesting cause (io/dns) behind generic wording.
fn source_chain(err: &reqwest::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

/// Resolver failures carry no dedicated reqwest kind; recognize them from
/// the error chain text instead.
fn looks_like_dns_failure(detail: &str) -> bool {
    let lower = detail.to_lowercase();
    lower.contains("dns error")
        || lower.contains("failed to lookup address")
        || lower.contains("name or service not known")
}

/// Issue the single GET for a normalized URL and decode the body.
///
/// User agent, timeout and redirect handling sit on the shared client; a
/// non-2xx status is an error here, not a page to analyze.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_default();

    let body = response
        .bytes()
        .await
        .map_err(FetchError::from_reqwest)?
        .to_vec();

    let (text, encoding) = decode_body(&body, &content_type);

    Ok(FetchedPage {
        body,
        encoding,
        text,
    })
}

/// Decode with the charset declared in Content-Type, falling back to lossy
/// UTF-8. Returns the text and the canonical name of the encoding used.
fn decode_body(body: &[u8], content_type: &str) -> (String, String) {
    if let Some(label) = parse_charset(content_type)
        && let Some(encoding) = Encoding::for_label(label.as_bytes())
    {
        let (text, _, _) = encoding.decode(body);
        return (text.into_owned(), encoding.name().to_string());
    }
    (
        String::from_utf8_lossy(body).into_owned(),
        UTF_8.name().to_string(),
    )
}

/// Pull the charset parameter out of a Content-Type header value.
fn parse_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if key.eq_ignore_ascii_case("charset") {
            Some(value.trim_matches('"').to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_parsed_from_content_type() {
        assert_eq!(
            parse_charset("text/html; charset=ISO-8859-1").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(
            parse_charset("text/html; Charset=\"utf-8\"").as_deref(),
            Some("utf-8")
        );
        assert_eq!(parse_charset("text/html"), None);
        assert_eq!(parse_charset(""), None);
    }

    #[test]
    fn latin1_body_decodes_with_declared_charset() {
        // "été" in ISO-8859-1
        let body = [0xe9u8, 0x74, 0xe9];
        let (text, encoding) = decode_body(&body, "text/html; charset=iso-8859-1");
        assert_eq!(text, "été");
        assert_eq!(encoding, "windows-1252");
    }

    #[test]
    fn missing_charset_falls_back_to_utf8_lossy() {
        let body = b"ok \xff bytes";
        let (text, encoding) = decode_body(body, "text/html");
        assert_eq!(encoding, "UTF-8");
        assert!(text.starts_with("ok "));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn status_messages_match_the_published_wording() {
        assert_eq!(
            http_status_message(&404),
            "Le site demandé n'a pas été trouvé (404). Vérifiez que l'URL est correcte."
        );
        assert_eq!(
            http_status_message(&403),
            "Accès refusé au site (403). Le site bloque peut-être les requêtes automatisées."
        );
        assert_eq!(
            http_status_message(&503),
            "Le site rencontre une erreur serveur (HTTP 503). Réessayez plus tard."
        );
        assert_eq!(
            http_status_message(&418),
            "Impossible d'analyser le site : erreur HTTP 418"
        );
    }

    #[test]
    fn dns_flavored_connection_error_gets_friendly_message() {
        let err = FetchError::ConnectionFailed {
            detail: "client error (Connect): dns error: failed to lookup address information"
                .to_string(),
            dns: true,
        };
        assert_eq!(
            err.to_string(),
            "Impossible de se connecter au site. Vérifiez votre connexion Internet et que le nom de domaine est correct."
        );
    }

    #[test]
    fn other_connection_error_carries_the_detail() {
        let err = FetchError::ConnectionFailed {
            detail: "connection refused".to_string(),
            dns: false,
        };
        assert_eq!(
            err.to_string(),
            "Impossible de se connecter au site : connection refused"
        );
    }

    #[test]
    fn dns_detection_matches_resolver_wording() {
        assert!(looks_like_dns_failure(
            "error sending request: dns error: failed to lookup address information"
        ));
        assert!(looks_like_dns_failure("Name or service not known"));
        assert!(!looks_like_dns_failure("connection refused (os error 111)"));
    }
}
