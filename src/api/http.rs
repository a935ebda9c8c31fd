//! HTTP implementation of the backend collaborator.

use crate::api::MaterialApi;
use crate::config::api::ApiConfig;
use crate::entities::{
    CatalogAddOn, CatalogIngredient, MaterialRecord, MeasurementUnits, SubmitMaterialRequest,
};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

const INGREDIENTS_PATH: &str = "api/ingredients";
const ADD_ONS_PATH: &str = "api/add-ons";
const UNITS_PATH: &str = "api/units";
const MATERIALS_PATH: &str = "api/pastry-materials";

/// Responses arrive either bare or wrapped as `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Body<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Body<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Decodes a successful response body.
pub(crate) fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str::<Body<T>>(text)
        .map(Body::into_inner)
        .map_err(|e| Error::InvalidResponse(format!("{e}: {text}")))
}

/// Maps a non-success status onto an error.
pub(crate) fn status_error(status: StatusCode, text: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::Unauthorized,
        StatusCode::FORBIDDEN => Error::Forbidden(text),
        StatusCode::NOT_FOUND => Error::NotFound(text),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(text),
        _ => Error::Api {
            status: status.as_u16(),
            message: text,
        },
    }
}

/// REST client for the pastry-material endpoints.
#[derive(Debug, Clone)]
pub struct HttpMaterialApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpMaterialApi {
    /// Builds a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self
            .authorize(self.client.post(&url).json(body))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, text));
        }
        decode_body(&text)
    }
}

#[async_trait]
impl MaterialApi for HttpMaterialApi {
    #[instrument(skip(self))]
    async fn fetch_ingredients(&self) -> Result<Vec<CatalogIngredient>> {
        self.get(INGREDIENTS_PATH).await
    }

    #[instrument(skip(self))]
    async fn fetch_add_ons(&self) -> Result<Vec<CatalogAddOn>> {
        self.get(ADD_ONS_PATH).await
    }

    #[instrument(skip(self))]
    async fn fetch_units(&self) -> Result<MeasurementUnits> {
        self.get(UNITS_PATH).await
    }

    #[instrument(skip(self))]
    async fn fetch_material(&self, material_id: &str) -> Result<MaterialRecord> {
        self.get(&format!("{MATERIALS_PATH}/{material_id}")).await
    }

    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    async fn submit_material(&self, request: &SubmitMaterialRequest) -> Result<MaterialRecord> {
        match &request.id {
            Some(id) => self.post(&format!("{MATERIALS_PATH}/{id}"), request).await,
            None => self.post(MATERIALS_PATH, request).await,
        }
    }
}
