use super::SonarClient;
use crate::encoding::{to_body, to_query};
use crate::errors::SonarError;
use crate::validation::Validate;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::Serialize;
use std::borrow::Cow;

impl SonarClient {
    /// Create a request for an API endpoint.
    ///
    /// `path` is relative to the server URL, e.g. `api/ce/activity`.
    /// Options are validated first. For GET requests they are encoded in
    /// the query string; for POST and PUT requests they become a JSON body.
    pub fn build_request<O>(
        &self,
        method: Method,
        path: &str,
        options: Option<&O>,
    ) -> Result<Request, SonarError>
    where
        O: Serialize + Validate + ?Sized,
    {
        if let Some(options) = options {
            options.validate()?;
        }

        let mut url = self.base.join(path.trim_start_matches('/'))?;
        unescape_path(&url)?;

        let mut body = None;
        if let Some(options) = options {
            if has_body(&method) {
                url.set_query(None);
                body = Some(to_body(options)?);
            } else {
                let query = to_query(options)?;
                url.set_query(if query.is_empty() { None } else { Some(&query) });
            }
        }

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            log::trace!("request body is {} bytes", body.len());
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .header(CONTENT_LENGTH, body.len())
                .body(body);
        }
        if let Some(auth) = &self.auth {
            builder = auth.apply(builder);
        }
        Ok(builder.build()?)
    }
}

fn has_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// The path of `url` with percent-escapes decoded, for display.
pub(crate) fn unescape_path(url: &url::Url) -> Result<Cow<'_, str>, SonarError> {
    urlencoding::decode(url.path()).map_err(|source| SonarError::PathUnescape {
        path: url.path().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Auth;
    use crate::encoding::comma_separated;
    use crate::types::ServerUrl;
    use crate::validation::{required, ValidationError, ValidationKind};
    use reqwest::header::AUTHORIZATION;
    use rstest::*;

    #[derive(Serialize, Default)]
    struct Listing {
        #[serde(skip_serializing_if = "Option::is_none")]
        q: Option<String>,
        #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
        status: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        ps: Option<u32>,
    }

    impl Validate for Listing {}

    #[derive(Serialize, Default)]
    struct Cancel {
        id: String,
    }

    impl Validate for Cancel {
        fn validate(&self) -> Result<(), ValidationError> {
            required("id", &self.id)
        }
    }

    #[fixture]
    fn client() -> SonarClient {
        SonarClient::builder(ServerUrl::try_from("http://localhost:9000/sonar").unwrap())
            .token("squ_123")
            .build()
            .unwrap()
    }

    fn body_json(req: &Request) -> serde_json::Value {
        let bytes = req.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[rstest]
    fn test_get_encodes_query(client: SonarClient) {
        let options = Listing {
            q: Some("core".to_string()),
            status: vec!["FAILED".to_string(), "CANCELED".to_string()],
            ps: Some(20),
        };
        let req = client
            .build_request(Method::GET, "api/ce/activity", Some(&options))
            .unwrap();
        assert_eq!(*req.method(), Method::GET);
        assert_eq!(req.url().path(), "/sonar/api/ce/activity");
        assert_eq!(req.url().query(), Some("q=core&status=FAILED%2CCANCELED&ps=20"));
        assert!(req.body().is_none());
        assert_eq!(req.headers()[ACCEPT], "application/json");
    }

    #[rstest]
    fn test_none_has_no_query_and_no_body(client: SonarClient) {
        let req = client
            .build_request::<Listing>(Method::GET, "api/ce/activity", None)
            .unwrap();
        assert_eq!(req.url().query(), None);
        assert!(req.body().is_none());

        let req = client
            .build_request::<Listing>(Method::POST, "api/ce/cancel_all", None)
            .unwrap();
        assert!(req.body().is_none());
        assert!(req.headers().get(CONTENT_TYPE).is_none());
    }

    #[rstest]
    fn test_empty_options_have_no_query(client: SonarClient) {
        let req = client
            .build_request(Method::GET, "api/ce/activity", Some(&Listing::default()))
            .unwrap();
        assert_eq!(req.url().query(), None);
    }

    #[rstest]
    fn test_post_encodes_json_body(client: SonarClient) {
        let options = Cancel {
            id: "AVAn5RKqYwETbXvgas-I".to_string(),
        };
        let req = client
            .build_request(Method::POST, "api/ce/cancel?stale=1", Some(&options))
            .unwrap();
        assert_eq!(req.url().query(), None);
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        let expected_len = serde_json::to_vec(&options).unwrap().len().to_string();
        assert_eq!(req.headers()[CONTENT_LENGTH], expected_len.as_str());
        assert_eq!(body_json(&req), serde_json::json!({"id": "AVAn5RKqYwETbXvgas-I"}));
    }

    #[rstest]
    fn test_validation_fails_before_building(client: SonarClient) {
        let err = client
            .build_request(Method::POST, "api/ce/cancel", Some(&Cancel::default()))
            .unwrap_err();
        match err {
            SonarError::Validation(e) => {
                assert_eq!(e.field, "id");
                assert_eq!(e.kind, ValidationKind::MissingRequired);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[rstest]
    fn test_build_is_idempotent(client: SonarClient) {
        let options = Listing {
            q: Some("a b".to_string()),
            status: vec!["SUCCESS".to_string()],
            ps: None,
        };
        let first = client
            .build_request(Method::GET, "api/ce/activity", Some(&options))
            .unwrap();
        let second = client
            .build_request(Method::GET, "api/ce/activity", Some(&options))
            .unwrap();
        assert_eq!(first.url(), second.url());

        let cancel = Cancel {
            id: "x".to_string(),
        };
        let first = client
            .build_request(Method::POST, "api/ce/cancel", Some(&cancel))
            .unwrap();
        let second = client
            .build_request(Method::POST, "api/ce/cancel", Some(&cancel))
            .unwrap();
        assert_eq!(
            first.body().and_then(|b| b.as_bytes()),
            second.body().and_then(|b| b.as_bytes())
        );
    }

    #[rstest]
    fn test_escaped_path_is_preserved(client: SonarClient) {
        let req = client
            .build_request::<Listing>(Method::GET, "api/sources/raw/my%2Fkey", None)
            .unwrap();
        assert_eq!(req.url().path(), "/sonar/api/sources/raw/my%2Fkey");
        assert_eq!(unescape_path(req.url()).unwrap(), "/sonar/api/sources/raw/my/key");
    }

    #[rstest]
    fn test_bad_escape_is_an_error(client: SonarClient) {
        let err = client
            .build_request::<Listing>(Method::GET, "api/sources/raw/%FF", None)
            .unwrap_err();
        assert!(matches!(err, SonarError::PathUnescape { .. }));
    }

    #[rstest]
    #[case(Auth::Token("squ_123".to_string()), "Basic c3F1XzEyMzo=")]
    #[case(Auth::Basic { login: "admin".to_string(), password: "admin".to_string() }, "Basic YWRtaW46YWRtaW4=")]
    #[case(Auth::Bearer("squ_123".to_string()), "Bearer squ_123")]
    fn test_auth_header(#[case] auth: Auth, #[case] expected: &str) {
        let client = SonarClient::builder(ServerUrl::try_from("http://localhost:9000").unwrap())
            .auth(auth)
            .build()
            .unwrap();
        let req = client
            .build_request::<Listing>(Method::GET, "api/system/ping", None)
            .unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], expected);
        assert!(req.headers()[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_anonymous_has_no_auth_header() {
        let client = SonarClient::builder(ServerUrl::try_from("http://localhost:9000").unwrap())
            .build()
            .unwrap();
        let req = client
            .build_request::<Listing>(Method::GET, "api/system/ping", None)
            .unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }
}
