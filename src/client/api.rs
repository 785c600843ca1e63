use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::{
    client::error::ClientError,
    entities::{
        project::{NewProject, Project, UpdateProjectRequest},
        skill::{NewSkill, Skill, UpdateSkillRequest},
    },
};

const PROJECTS_PATH: &str = "api/projects";
const SKILLS_PATH: &str = "api/skills";

/// Body every API error and delete confirmation carries.
#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Thin typed wrapper over the Collection API.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    base_url: Url,
    http: reqwest::Client,
}

impl PortfolioClient {
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(api_url, reqwest::Client::new())
    }

    pub fn with_http_client(api_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let mut base = api_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(PortfolioClient { base_url: Url::parse(&base)?, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.send(self.request(Method::GET, PROJECTS_PATH)?).await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        self.send(self.request(Method::POST, PROJECTS_PATH)?.json(project)).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        changes: &UpdateProjectRequest,
    ) -> Result<Project, ClientError> {
        let path = format!("{PROJECTS_PATH}/{id}");
        self.send(self.request(Method::PUT, &path)?.json(changes)).await
    }

    /// Returns the server's confirmation message.
    pub async fn delete_project(&self, id: &str) -> Result<String, ClientError> {
        let path = format!("{PROJECTS_PATH}/{id}");
        let body: MessageBody = self.send(self.request(Method::DELETE, &path)?).await?;
        Ok(body.message)
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, ClientError> {
        self.send(self.request(Method::GET, SKILLS_PATH)?).await
    }

    pub async fn create_skill(&self, skill: &NewSkill) -> Result<Skill, ClientError> {
        self.send(self.request(Method::POST, SKILLS_PATH)?.json(skill)).await
    }

    pub async fn update_skill(
        &self,
        id: &str,
        changes: &UpdateSkillRequest,
    ) -> Result<Skill, ClientError> {
        let path = format!("{SKILLS_PATH}/{id}");
        self.send(self.request(Method::PUT, &path)?.json(changes)).await
    }

    pub async fn delete_skill(&self, id: &str) -> Result<String, ClientError> {
        let path = format!("{SKILLS_PATH}/{id}");
        let body: MessageBody = self.send(self.request(Method::DELETE, &path)?).await?;
        Ok(body.message)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.base_url.join(path)?;
        Ok(self.http.request(method, url))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("Request failed").to_string();
            let message = response
                .json::<MessageBody>()
                .await
                .map(|body| body.message)
                .unwrap_or(fallback);

            tracing::debug!("API answered {}: {}", status, message);
            return Err(ClientError::Api { status: status.as_u16(), message });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
