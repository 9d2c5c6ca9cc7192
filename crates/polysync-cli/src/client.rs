use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use polysync_core::error::{Result, SyncError};
use polysync_core::model::{PatchBody, PolicyGroup, PolicyGroupList};
use polysync_core::service::PolicyService;

pub struct PolicyClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PolicyClient {
    pub fn new(endpoint: &str, org: &str, token: &str) -> Self {
        let endpoint = endpoint.trim_end_matches('/');
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{endpoint}/api/orgs/{org}/policygroups"),
            token: token.to_string(),
        }
    }

    fn group_url(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("Authorization", format!("token {}", self.token))
    }

    async fn send(&self, req: reqwest::RequestBuilder, url: &str) -> Result<String> {
        let resp = req
            .send()
            .await
            .map_err(|e| SyncError::transport(format!("request to {url} failed: {e}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SyncError::transport(format!("failed to read response body: {e}")))?;
        if !status.is_success() {
            return Err(SyncError::http_status(status.as_u16(), body));
        }
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(Into::into)
}

#[async_trait]
impl PolicyService for PolicyClient {
    async fn list_groups(&self) -> Result<PolicyGroupList> {
        let url = self.base_url.clone();
        let body = self.send(self.request(reqwest::Method::GET, &url), &url).await?;
        decode(&body)
    }

    async fn get_group(&self, name: &str) -> Result<PolicyGroup> {
        let url = self.group_url(name);
        let body = self.send(self.request(reqwest::Method::GET, &url), &url).await?;
        decode(&body)
    }

    async fn patch_group(&self, name: &str, patch: &PatchBody) -> Result<()> {
        let url = self.group_url(name);
        let req = self.request(reqwest::Method::PATCH, &url).json(patch);
        let body = self.send(req, &url).await?;
        if !body.is_empty() {
            debug!(group = name, response = %body, "patch accepted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use polysync_core::sync;

    const ORG: &str = "acme";
    const TOKEN: &str = "test-token";

    fn client_for(server: &MockServer) -> PolicyClient {
        PolicyClient::new(&server.uri(), ORG, TOKEN)
    }

    fn groups_path() -> String {
        format!("/api/orgs/{ORG}/policygroups")
    }

    fn group_path(name: &str) -> String {
        format!("/api/orgs/{ORG}/policygroups/{name}")
    }

    #[tokio::test]
    async fn test_list_groups_sends_auth_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(groups_path()))
            .and(header("Authorization", format!("token {TOKEN}")))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "policyGroups": [{"name": "g1", "numEnabledPolicyPacks": 1}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let listing = client_for(&server).list_groups().await.unwrap();
        assert_eq!(listing.policy_groups.len(), 1);
        assert_eq!(listing.policy_groups[0].name, "g1");
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_transport_error_with_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(group_path("g1")))
            .respond_with(ResponseTemplate::new(403).set_body_string("unauthorized org"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_group("g1").await.unwrap_err();
        match err {
            SyncError::Transport { status, body, .. } => {
                assert_eq!(status, Some(403));
                assert_eq!(body.as_deref(), Some("unauthorized org"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_maps_to_malformed_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(groups_path()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_groups().await.unwrap_err();
        assert!(matches!(err, SyncError::MalformedData(_)));
    }

    #[tokio::test]
    async fn test_sync_submits_full_pack_definition() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(group_path("prod")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "appliedPolicyPacks": [{
                    "name": "platform-policies",
                    "displayName": "Platform Policies",
                    "versionTag": "3",
                    "config": {
                        "check-component-versions": {
                            "allowedComponentVersions": [
                                {"type": "pkg:A", "version": "1.0.0"}
                            ]
                        },
                        "check-component-usage": {"allowedResourceTypes": ["aws:s3"]}
                    }
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path(group_path("prod")))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "addPolicyPack": {
                    "name": "platform-policies",
                    "displayName": "Platform Policies",
                    "versionTag": "3",
                    "config": {
                        "check-component-versions": {
                            "allowedComponentVersions": [
                                {"type": "pkg:A", "version": "2.0.0"},
                                {"type": "pkg:B", "version": "2.0.0"}
                            ]
                        },
                        "check-component-usage": {"allowedResourceTypes": ["aws:s3"]}
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let groups = vec!["prod".to_string()];
        let desired = vec!["pkg:A".to_string(), "pkg:B".to_string()];
        let summary = sync::run(&client, &groups, "platform-policies", &desired, "2.0.0").await;

        assert_eq!(summary.submitted, vec!["prod"]);
        assert!(summary.failed.is_empty());
    }

    #[tokio::test]
    async fn test_sync_skips_group_without_target_pack() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(group_path("dev")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "appliedPolicyPacks": [{"name": "unrelated-pack", "config": {}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path(group_path("dev")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let groups = vec!["dev".to_string()];
        let desired = vec!["pkg:A".to_string()];
        let summary = sync::run(&client, &groups, "platform-policies", &desired, "2.0.0").await;

        assert_eq!(summary.skipped, vec!["dev"]);
    }

    #[tokio::test]
    async fn test_sync_isolates_one_failing_group() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(group_path("g1")))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(group_path("g2")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "appliedPolicyPacks": [{
                    "name": "platform-policies",
                    "displayName": "Platform Policies",
                    "versionTag": "1",
                    "config": {
                        "check-component-versions": {
                            "allowedComponentVersions": []
                        }
                    }
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path(group_path("g2")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let groups = vec!["g1".to_string(), "g2".to_string()];
        let desired = vec!["pkg:A".to_string()];
        let summary = sync::run(&client, &groups, "platform-policies", &desired, "2.0.0").await;

        assert_eq!(summary.failed, vec!["g1"]);
        assert_eq!(summary.submitted, vec!["g2"]);
    }

    #[tokio::test]
    async fn test_second_run_with_same_versions_patches_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(group_path("prod")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "appliedPolicyPacks": [{
                    "name": "platform-policies",
                    "config": {
                        "check-component-versions": {
                            "allowedComponentVersions": [
                                {"type": "pkg:A", "version": "2.0.0"}
                            ]
                        }
                    }
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path(group_path("prod")))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let groups = vec!["prod".to_string()];
        let desired = vec!["pkg:A".to_string()];
        let summary = sync::run(&client, &groups, "platform-policies", &desired, "2.0.0").await;

        assert_eq!(summary.skipped, vec!["prod"]);
    }

    #[tokio::test]
    async fn test_malformed_discovery_response_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(groups_path()))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = sync::discover(&client_for(&server)).await.unwrap_err();
        assert!(matches!(err, SyncError::MalformedData(_)));
    }
}
