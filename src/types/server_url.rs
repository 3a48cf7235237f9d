//! NewType for the address users give when first connecting to SonarQube.

use crate::errors::InvalidServerUrl;
use aliri_braid::braid;

/// A [ServerUrl] is the base URL of a SonarQube server, e.g.
/// `https://sonarcloud.io/` or `http://localhost:9000/sonar`.
///
/// API paths such as `api/ce/activity` are resolved relative to it.
#[braid(validator, serde)]
pub struct ServerUrl(String);

impl aliri_braid::Validator for ServerUrl {
    type Error = InvalidServerUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            Err(InvalidServerUrl::Protocol(s.to_string()))
        } else if s.contains('?') || s.contains('#') {
            Err(InvalidServerUrl::NotABase(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl ServerUrlRef {
    /// Parse into a [url::Url] whose path ends with `/`, so that relative
    /// API paths are appended rather than replacing the last segment.
    pub(crate) fn to_base(&self) -> Result<url::Url, url::ParseError> {
        let s = self.as_str();
        if s.ends_with('/') {
            url::Url::parse(s)
        } else {
            url::Url::parse(&format!("{}/", s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("http://localhost:9000")]
    #[case("http://localhost:9000/")]
    #[case("https://sonarcloud.io/")]
    #[case("https://ci.example.org/sonar")]
    fn test_parse_url(#[case] url: &str) {
        assert!(ServerUrl::try_from(url).is_ok());
    }

    #[rstest]
    #[case("ftp://localhost/")]
    #[case("localhost:9000")]
    fn test_reject_bad_protocol(#[case] url: &str) {
        assert!(matches!(
            ServerUrl::try_from(url).unwrap_err(),
            InvalidServerUrl::Protocol { .. }
        ))
    }

    #[rstest]
    #[case("http://localhost:9000/?x=1")]
    #[case("http://localhost:9000/#top")]
    fn test_reject_not_a_base(#[case] url: &str) {
        assert!(matches!(
            ServerUrl::try_from(url).unwrap_err(),
            InvalidServerUrl::NotABase { .. }
        ))
    }

    #[rstest]
    #[case("http://localhost:9000", "http://localhost:9000/api/ce/task")]
    #[case("http://localhost:9000/sonar", "http://localhost:9000/sonar/api/ce/task")]
    #[case("http://localhost:9000/sonar/", "http://localhost:9000/sonar/api/ce/task")]
    fn test_base_keeps_prefix(#[case] url: &str, #[case] expected: &str) {
        let url = ServerUrl::try_from(url).unwrap();
        let joined = url.to_base().unwrap().join("api/ce/task").unwrap();
        assert_eq!(joined.as_str(), expected);
    }
}
