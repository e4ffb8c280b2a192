use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Campus, CampusId, Student, StudentId},
    error::ApiError,
    protocol::{CampusDraft, StudentDraft},
};
use tracing::debug;
use url::Url;

use crate::error::RemoteError;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Backend holding the authoritative Campus and Student records.
#[async_trait]
pub trait RemoteDataService: Send + Sync {
    async fn get_campus(&self, id: CampusId) -> RemoteResult<Campus>;
    async fn list_campuses(&self) -> RemoteResult<Vec<Campus>>;
    async fn create_campus(&self, draft: &CampusDraft) -> RemoteResult<Campus>;
    async fn update_campus(&self, id: CampusId, draft: &CampusDraft) -> RemoteResult<Campus>;
    async fn delete_campus(&self, id: CampusId) -> RemoteResult<CampusId>;

    async fn get_student(&self, id: StudentId) -> RemoteResult<Student>;
    async fn list_students(&self) -> RemoteResult<Vec<Student>>;
    async fn create_student(&self, draft: &StudentDraft) -> RemoteResult<Student>;
    async fn update_student(&self, id: StudentId, draft: &StudentDraft)
        -> RemoteResult<Student>;
    async fn delete_student(&self, id: StudentId) -> RemoteResult<StudentId>;
}

/// JSON-over-HTTP implementation talking to `{base}/api/campuses` and
/// `{base}/api/students`.
pub struct HttpDataService {
    http: Client,
    api_root: Url,
}

impl HttpDataService {
    pub fn new(server_url: &str) -> RemoteResult<Self> {
        Self::with_client(server_url, Client::new())
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> RemoteResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| RemoteError::Transport {
                url: server_url.to_string(),
                source,
            })?;
        Self::with_client(server_url, http)
    }

    pub fn with_client(server_url: &str, http: Client) -> RemoteResult<Self> {
        let mut base = Url::parse(server_url.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http,
            api_root: base.join("api/")?,
        })
    }

    fn endpoint(&self, path: &str) -> RemoteResult<Url> {
        Ok(self.api_root.join(path)?)
    }

    async fn send<T: DeserializeOwned>(&self, method: Method, path: &str) -> RemoteResult<T> {
        let url = self.endpoint(path)?;
        let request = self.http.request(method, url.clone());
        let body = Self::execute(request, &url).await?;
        serde_json::from_str(&body).map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, payload: &B) -> RemoteResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.request(method, url.clone()).json(payload);
        let body = Self::execute(request, &url).await?;
        serde_json::from_str(&body).map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn execute(request: RequestBuilder, url: &Url) -> RemoteResult<String> {
        let transport = |source: reqwest::Error| RemoteError::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        debug!(%url, status = status.as_u16(), "remote: response");
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                message: ApiError::from_body(&body).message,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl RemoteDataService for HttpDataService {
    async fn get_campus(&self, id: CampusId) -> RemoteResult<Campus> {
        self.send(Method::GET, &format!("campuses/{id}")).await
    }

    async fn list_campuses(&self) -> RemoteResult<Vec<Campus>> {
        self.send(Method::GET, "campuses").await
    }

    async fn create_campus(&self, draft: &CampusDraft) -> RemoteResult<Campus> {
        self.send_json(Method::POST, "campuses", draft).await
    }

    async fn update_campus(&self, id: CampusId, draft: &CampusDraft) -> RemoteResult<Campus> {
        self.send_json(Method::PUT, &format!("campuses/{id}"), draft)
            .await
    }

    async fn delete_campus(&self, id: CampusId) -> RemoteResult<CampusId> {
        let url = self.endpoint(&format!("campuses/{id}"))?;
        Self::execute(self.http.delete(url.clone()), &url).await?;
        Ok(id)
    }

    async fn get_student(&self, id: StudentId) -> RemoteResult<Student> {
        self.send(Method::GET, &format!("students/{id}")).await
    }

    async fn list_students(&self) -> RemoteResult<Vec<Student>> {
        self.send(Method::GET, "students").await
    }

    async fn create_student(&self, draft: &StudentDraft) -> RemoteResult<Student> {
        self.send_json(Method::POST, "students", draft).await
    }

    async fn update_student(
        &self,
        id: StudentId,
        draft: &StudentDraft,
    ) -> RemoteResult<Student> {
        self.send_json(Method::PUT, &format!("students/{id}"), draft)
            .await
    }

    async fn delete_student(&self, id: StudentId) -> RemoteResult<StudentId> {
        let url = self.endpoint(&format!("students/{id}"))?;
        Self::execute(self.http.delete(url.clone()), &url).await?;
        Ok(id)
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
